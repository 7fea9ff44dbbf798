//! # voltage_iec101
//!
//! IEC 60870-5-101 protocol codec for Rust.
//!
//! This crate converts the octet stream of an IEC 60870-5-101 serial link
//! into structured link frames and application messages, and back. It does
//! no I/O of its own; transports feed it bytes directly or through the
//! tokio-util [`codec::Ft12Codec`].
//!
//! ## Features
//!
//! - **FT 1.2 framing**: fixed, variable and single-character frames with
//!   checksum verification
//! - **Full ASDU Support**: every type identifier in 1-21, 30-40, 45-51, 70,
//!   including sequence (SQ=1) addressing
//! - **Bit-exact**: reserved bits, reserved codes and out-of-range time
//!   fields survive a decode/encode cycle
//! - **Type Safe**: Strong typing for TypeID, COT, IOA and every packed
//!   quality or command octet
//!
//! ## Quick Start
//!
//! ```rust
//! use voltage_iec101::{
//!     decode_frame, Asdu, ControlField, FunctionCode, InformationElement, LinkFrame, Sco,
//!     TypeId, VariableFrame,
//! };
//!
//! // Select a single command ON at IOA 0x0100, station 1
//! let asdu = Asdu::command(
//!     TypeId::SingleCommand,
//!     1,
//!     0x0100,
//!     InformationElement::SingleCommand(Sco::new(true, 0, true)),
//! );
//! let control = ControlField::primary(FunctionCode::UserDataConfirm).with_fcv(true);
//! let frame = LinkFrame::from(VariableFrame::new(control, 1, Some(asdu))?);
//!
//! let bytes = frame.encode()?;
//! assert_eq!(decode_frame(&bytes)?, frame);
//! # Ok::<(), voltage_iec101::Iec101Error>(())
//! ```
//!
//! ## Protocol Overview
//!
//! ```text
//! Variable frame:
//! +------+---+---+------+---------+---------+----------------+----------+------+
//! | 0x68 | L | L | 0x68 | Control | Address | ASDU (L-2)     | Checksum | 0x16 |
//! +------+---+---+------+---------+---------+----------------+----------+------+
//!
//! ASDU:
//! +---------+-----+-----+----+----------------------------------------+
//! | Type ID | VSQ | COT | CA | Information objects (IOA is 2 octets)  |
//! +---------+-----+-----+----+----------------------------------------+
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod codec;
pub mod config;
pub mod error;
pub mod parser;
pub mod types;

// Re-export main types
pub use codec::Ft12Codec;
pub use config::{ChecksumPolicy, CodecConfig};
pub use error::{Iec101Error, Result};
pub use parser::{decode_objects, encode_objects};
pub use types::*;
