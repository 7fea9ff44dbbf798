//! Information object engine.
//!
//! One generic decoder and encoder for every supported type identifier,
//! driven by the registry entry [`TypeId::descriptor`]. The addressing layout
//! is selected solely by the VSQ sequence flag, never by the object count.

use bytes::{Buf, BufMut};

use crate::error::{Iec101Error, Result};
use crate::types::{
    InformationElement, InformationObject, InformationObjects, Ioa, ObjectDescriptor, TimeTag,
    TypeId, Vsq, IOA_SIZE, MAX_OBJECTS,
};

/// Decode the information objects that follow an ASDU header.
///
/// `data` must hold exactly the objects announced by `vsq`: a short buffer is
/// [`Iec101Error::TruncatedInput`], leftover bytes are
/// [`Iec101Error::TrailingBytes`].
///
/// # Example
///
/// ```rust
/// use voltage_iec101::{parser::decode_objects, TypeId, Vsq};
///
/// // SQ=1, three single points from base address 0x1000
/// let data = [0x00, 0x10, 0x01, 0x00, 0x01];
/// let objects = decode_objects(TypeId::SinglePoint, Vsq::new(3, true), &data).unwrap();
/// let addresses: Vec<u16> = objects.iter().map(|(ioa, _, _)| ioa.value()).collect();
/// assert_eq!(addresses, [0x1000, 0x1001, 0x1002]);
/// ```
pub fn decode_objects(type_id: TypeId, vsq: Vsq, data: &[u8]) -> Result<InformationObjects> {
    if vsq.count == 0 {
        return Err(Iec101Error::VsqNumberZero);
    }

    let descriptor = type_id.descriptor();
    let count = vsq.count as usize;
    let mut buf = data;

    let objects = if vsq.sequence {
        if !descriptor.sequence_allowed {
            return Err(Iec101Error::IllegalSequenceMode(type_id));
        }
        debug_assert!(descriptor.time_tag.is_none());

        check_exact_len(data, IOA_SIZE + count * descriptor.element.size())?;
        let base = Ioa(buf.get_u16_le());
        let elements = (0..count)
            .map(|_| InformationElement::decode(descriptor.element, &mut buf))
            .collect();

        InformationObjects::Sequence { base, elements }
    } else {
        check_exact_len(data, count * (IOA_SIZE + descriptor.group_size()))?;
        let objects = (0..count)
            .map(|_| decode_object(&descriptor, &mut buf))
            .collect();

        InformationObjects::Discrete(objects)
    };

    #[cfg(feature = "tracing-support")]
    tracing::trace!(%type_id, count, sequence = vsq.sequence, "decoded information objects");

    Ok(objects)
}

fn decode_object(descriptor: &ObjectDescriptor, buf: &mut &[u8]) -> InformationObject {
    let address = Ioa(buf.get_u16_le());
    let element = InformationElement::decode(descriptor.element, buf);
    let time = descriptor.time_tag.map(|kind| TimeTag::decode(kind, buf));

    InformationObject {
        address,
        element,
        time,
    }
}

fn check_exact_len(data: &[u8], needed: usize) -> Result<()> {
    if data.len() < needed {
        Err(Iec101Error::truncated(needed, data.len()))
    } else if data.len() > needed {
        Err(Iec101Error::TrailingBytes(data.len() - needed))
    } else {
        Ok(())
    }
}

/// Check that `objects` can be encoded under `type_id`.
///
/// Verifies the object count, sequence legality, every element layout and
/// every time tag against the registry.
pub fn validate_objects(type_id: TypeId, objects: &InformationObjects) -> Result<()> {
    match objects.len() {
        0 => return Err(Iec101Error::VsqNumberZero),
        n if n > MAX_OBJECTS => return Err(Iec101Error::TooManyObjects(n)),
        _ => {}
    }

    let descriptor = type_id.descriptor();
    let element_mismatch = |reason| Iec101Error::ElementMismatch { type_id, reason };

    match objects {
        InformationObjects::Sequence { elements, .. } => {
            if !descriptor.sequence_allowed {
                return Err(Iec101Error::IllegalSequenceMode(type_id));
            }
            if elements.iter().any(|e| e.kind() != descriptor.element) {
                return Err(element_mismatch("wrong element kind"));
            }
        }
        InformationObjects::Discrete(list) => {
            for obj in list {
                if obj.element.kind() != descriptor.element {
                    return Err(element_mismatch("wrong element kind"));
                }
                if obj.time.map(|t| t.kind()) != descriptor.time_tag {
                    return Err(element_mismatch("wrong or missing time tag"));
                }
            }
        }
    }

    Ok(())
}

/// Encode information objects (without ASDU header).
///
/// Validates first; on error nothing is written to `buf`.
pub fn encode_objects(
    type_id: TypeId,
    objects: &InformationObjects,
    buf: &mut impl BufMut,
) -> Result<()> {
    validate_objects(type_id, objects)?;

    match objects {
        InformationObjects::Sequence { base, elements } => {
            buf.put_u16_le(base.value());
            for element in elements {
                element.encode(buf);
            }
        }
        InformationObjects::Discrete(list) => {
            for obj in list {
                buf.put_u16_le(obj.address.value());
                obj.element.encode(buf);
                if let Some(time) = &obj.time {
                    time.encode(buf);
                }
            }
        }
    }

    Ok(())
}

/// Encoded size of `objects` under `type_id`, as laid out by the registry.
pub fn objects_len(type_id: TypeId, objects: &InformationObjects) -> usize {
    let descriptor = type_id.descriptor();
    match objects {
        InformationObjects::Sequence { elements, .. } => {
            IOA_SIZE + elements.len() * descriptor.element.size()
        }
        InformationObjects::Discrete(list) => list.len() * (IOA_SIZE + descriptor.group_size()),
    }
}
