//! cEMI device management message codes

use knx_core::{KnxError, KnxResult};
use std::fmt;

/// Message code of a cEMI device management frame
///
/// Only the local device management services are listed; all device
/// management message codes lie in the range `0xF0..=0xFC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageCode {
    /// M_PropRead.req
    PropReadReq,
    /// M_PropRead.con
    PropReadCon,
    /// M_PropWrite.req
    PropWriteReq,
    /// M_PropWrite.con
    PropWriteCon,
    /// M_PropInfo.ind
    PropInfoInd,
    /// M_Reset.req
    ResetReq,
    /// M_Reset.ind
    ResetInd,
}

impl MessageCode {
    /// Get the encoded message code
    pub fn as_u8(self) -> u8 {
        match self {
            MessageCode::PropReadReq => 0xfc,
            MessageCode::PropReadCon => 0xfb,
            MessageCode::PropWriteReq => 0xf6,
            MessageCode::PropWriteCon => 0xf5,
            MessageCode::PropInfoInd => 0xf7,
            MessageCode::ResetReq => 0xf1,
            MessageCode::ResetInd => 0xf0,
        }
    }

    /// Check if the frame is a confirmation of a request
    pub fn is_confirmation(self) -> bool {
        matches!(self, MessageCode::PropReadCon | MessageCode::PropWriteCon)
    }

    /// Check if the frame carries a property access header
    ///
    /// Reset services consist of the message code only.
    pub fn has_property_header(self) -> bool {
        !matches!(self, MessageCode::ResetReq | MessageCode::ResetInd)
    }
}

impl TryFrom<u8> for MessageCode {
    type Error = KnxError;

    fn try_from(value: u8) -> KnxResult<Self> {
        match value {
            0xfc => Ok(MessageCode::PropReadReq),
            0xfb => Ok(MessageCode::PropReadCon),
            0xf6 => Ok(MessageCode::PropWriteReq),
            0xf5 => Ok(MessageCode::PropWriteCon),
            0xf7 => Ok(MessageCode::PropInfoInd),
            0xf1 => Ok(MessageCode::ResetReq),
            0xf0 => Ok(MessageCode::ResetInd),
            _ => Err(KnxError::InvalidData(format!(
                "Unsupported device management message code 0x{:02X}",
                value
            ))),
        }
    }
}

impl fmt::Display for MessageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageCode::PropReadReq => "M_PropRead.req",
            MessageCode::PropReadCon => "M_PropRead.con",
            MessageCode::PropWriteReq => "M_PropWrite.req",
            MessageCode::PropWriteCon => "M_PropWrite.con",
            MessageCode::PropInfoInd => "M_PropInfo.ind",
            MessageCode::ResetReq => "M_Reset.req",
            MessageCode::ResetInd => "M_Reset.ind",
        };
        f.write_str(name)
    }
}

/// Check if a raw message code belongs to the device management family
pub fn is_device_management(code: u8) -> bool {
    (0xf0..=0xfc).contains(&code)
}
