//! Property description

use crate::error::{KnxError, KnxResult};
use serde::{Deserialize, Serialize};

/// Length of an encoded property description
pub const DESCRIPTION_LENGTH: usize = 7;

/// Write-enable flag in the fourth octet of a property description
pub const WRITE_ENABLED: u8 = 0x80;

/// Description of a property of an interface object
///
/// Encoded as 7 octets: object index, property id, property index,
/// write flag and datatype, maximum element count (2 octets), access levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescription {
    pub object_index: u8,
    pub pid: u8,
    pub property_index: u8,
    pub write_enabled: bool,
    pub pdt: u8,
    pub max_elements: u16,
    pub read_level: u8,
    pub write_level: u8,
}

impl PropertyDescription {
    /// Parse a property description from its 7-octet encoding
    pub fn from_bytes(data: &[u8]) -> KnxResult<Self> {
        if data.len() < DESCRIPTION_LENGTH {
            return Err(KnxError::InvalidData(format!(
                "Property description too short: expected {}, got {}",
                DESCRIPTION_LENGTH,
                data.len()
            )));
        }

        Ok(Self {
            object_index: data[0],
            pid: data[1],
            property_index: data[2],
            write_enabled: data[3] & WRITE_ENABLED != 0,
            pdt: data[3] & 0x3f,
            max_elements: u16::from_be_bytes([data[4], data[5]]) & 0x0fff,
            read_level: data[6] >> 4,
            write_level: data[6] & 0x0f,
        })
    }

    /// Encode the description to its 7-octet form
    pub fn to_bytes(&self) -> [u8; DESCRIPTION_LENGTH] {
        let flag = if self.write_enabled { WRITE_ENABLED } else { 0 };
        let elements = (self.max_elements & 0x0fff).to_be_bytes();
        [
            self.object_index,
            self.pid,
            self.property_index,
            flag | (self.pdt & 0x3f),
            elements[0],
            elements[1],
            (self.read_level << 4) | (self.write_level & 0x0f),
        ]
    }
}
