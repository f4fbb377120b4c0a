//! Interface object directory
//!
//! The directory maps the object index used by callers to the object type
//! and instance carried in device management frames. It is built once per
//! adapter from the object index list (`PID_IO_LIST`) of the Device Object.

use crate::link::ManagementLink;
use crate::session::MgmtSession;
use knx_cemi::MAX_ELEMENTS;
use knx_core::{object_type, pid, KnxError, KnxResult};
use serde::Serialize;

/// Instance of the Device Object holding the object index list
const DEVICE_OBJECT_INSTANCE: u8 = 1;

/// Interface object entry of the directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InterfaceObject {
    index: u16,
    object_type: u16,
}

impl InterfaceObject {
    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn object_type(&self) -> u16 {
        self.object_type
    }
}

/// Ordered directory of the interface objects of a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directory {
    objects: Vec<InterfaceObject>,
}

impl Directory {
    /// Build a directory from object types in index order
    pub fn from_types(types: impl IntoIterator<Item = u16>) -> Self {
        let objects = types
            .into_iter()
            .enumerate()
            .map(|(index, object_type)| InterfaceObject {
                index: index as u16,
                object_type,
            })
            .collect();
        Self { objects }
    }

    /// Directory assumed for devices without an object index list
    ///
    /// Contains the Device Object at index 0 and the cEMI Server Object at
    /// index 1.
    pub fn fallback() -> Self {
        Self::from_types([object_type::DEVICE, object_type::CEMI_SERVER])
    }

    pub fn objects(&self) -> &[InterfaceObject] {
        &self.objects
    }

    /// Resolve an object index to its object type and instance
    ///
    /// The instance is the 1-based count of objects up to and including
    /// `index` that share its object type.
    ///
    /// # Errors
    /// Returns `Remote` if the index is not listed in the directory
    pub fn resolve(&self, index: u16) -> KnxResult<(u16, u8)> {
        let object = self
            .objects
            .get(index as usize)
            .ok_or_else(|| KnxError::Remote(format!("object not listed (index {})", index)))?;

        let instance = self.objects[..=index as usize]
            .iter()
            .filter(|o| o.object_type == object.object_type)
            .count();
        let instance = u8::try_from(instance).map_err(|_| {
            KnxError::InvalidData(format!("object instance {} out of range", instance))
        })?;
        Ok((object.object_type, instance))
    }
}

/// Parse big-endian 16-bit object types
fn parse_types(data: &[u8], elements: usize) -> KnxResult<Vec<u16>> {
    if data.len() < elements * 2 {
        return Err(KnxError::InvalidResponse(format!(
            "object index list too short: expected {} object types, got {} bytes",
            elements,
            data.len()
        )));
    }
    Ok(data
        .chunks_exact(2)
        .take(elements)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect())
}

/// Discover the interface object directory of the device
///
/// Falls back to [`Directory::fallback`] if the object count request fails
/// with a remote error. A reset of the device during that request also
/// falls back, leaving the adapter closed.
pub(crate) async fn discover<L: ManagementLink>(session: &MgmtSession<L>) -> KnxResult<Directory> {
    let data = match session
        .read(object_type::DEVICE, DEVICE_OBJECT_INSTANCE, pid::IO_LIST, 0, 1)
        .await
    {
        Ok(data) => data,
        Err(e) if e.is_remote() => {
            log::debug!("object index list not available ({}), using default objects", e);
            return Ok(Directory::fallback());
        }
        Err(e) => return Err(e),
    };
    let count = parse_types(&data, 1)?[0] as usize;

    let mut types = Vec::with_capacity(count);
    let mut start: u16 = 1;
    while types.len() < count {
        let elements = (count - types.len()).min(MAX_ELEMENTS as usize);
        let data = session
            .read(
                object_type::DEVICE,
                DEVICE_OBJECT_INSTANCE,
                pid::IO_LIST,
                start,
                elements as u8,
            )
            .await?;
        types.extend(parse_types(&data, elements)?);
        start += elements as u16;
    }

    let directory = Directory::from_types(types);
    log::debug!("discovered {} interface objects", directory.objects().len());
    Ok(directory)
}
