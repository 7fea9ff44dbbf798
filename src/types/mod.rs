//! IEC 60870-5-101 type definitions.
//!
//! This module contains all the core types for the IEC 101 protocol:
//!
//! - `LinkFrame` - FT 1.2 link frames and their control field
//! - `TypeId` - Type identification and the object registry
//! - `Cot` - Cause of transmission
//! - `Asdu` - Application Service Data Unit
//! - `InformationElement` - Element groups and their bitfield records
//! - `Cp24Time2a` / `Cp56Time2a` - Binary time tags

mod asdu;
mod cot;
#[macro_use]
mod element;
mod frame;
mod time;
mod type_id;

pub use asdu::*;
pub use cot::*;
pub use element::*;
pub use frame::*;
pub use time::*;
pub use type_id::*;
