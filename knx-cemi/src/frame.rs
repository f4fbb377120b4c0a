//! cEMI device management frame
//!
//! # Frame Format
//!
//! ```text
//! +----+-----+----+-----+-----+------+------+
//! | mc | iot | oi | pid | noe | six  | data |
//! | 1  |  2  | 1  |  1  | 4 bit | 12 bit | n |
//! +----+-----+----+-----+-----+------+------+
//! ```
//!
//! Reset services consist of the message code only. A confirmation with an
//! element count of zero is a negative response; its data holds a single
//! error code octet.

use crate::message_code::MessageCode;
use bytes::{BufMut, Bytes, BytesMut};
use knx_core::{KnxError, KnxResult};
use std::fmt;

/// Length of the property access header including the message code
pub const HEADER_LENGTH: usize = 7;

/// Maximum number of elements in a single frame (4-bit field)
pub const MAX_ELEMENTS: u8 = 0x0f;

/// Maximum start index (12-bit field)
pub const MAX_START_INDEX: u16 = 0x0fff;

/// Get the description of a cEMI negative response error code
pub fn error_text(code: u8) -> &'static str {
    match code {
        0 => "unspecified error",
        1 => "out of range",
        2 => "out of maxrange",
        3 => "out of minrange",
        4 => "memory error",
        5 => "read only",
        6 => "illegal command",
        7 => "void DP",
        8 => "type conflict",
        9 => "prop. index range error",
        10 => "value temporarily not writeable",
        _ => "unknown error code",
    }
}

/// cEMI device management frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MgmtFrame {
    message_code: MessageCode,
    object_type: u16,
    object_instance: u8,
    pid: u8,
    start: u16,
    elements: u8,
    data: Bytes,
}

impl MgmtFrame {
    /// Create a new property access frame
    pub fn new(
        message_code: MessageCode,
        object_type: u16,
        object_instance: u8,
        pid: u8,
        start: u16,
        elements: u8,
        data: Bytes,
    ) -> Self {
        Self {
            message_code,
            object_type,
            object_instance,
            pid,
            start,
            elements,
            data,
        }
    }

    /// Create an M_PropRead.req frame
    pub fn read_request(object_type: u16, object_instance: u8, pid: u8, start: u16, elements: u8) -> Self {
        Self::new(
            MessageCode::PropReadReq,
            object_type,
            object_instance,
            pid,
            start,
            elements,
            Bytes::new(),
        )
    }

    /// Create an M_PropWrite.req frame
    pub fn write_request(
        object_type: u16,
        object_instance: u8,
        pid: u8,
        start: u16,
        elements: u8,
        data: &[u8],
    ) -> Self {
        Self::new(
            MessageCode::PropWriteReq,
            object_type,
            object_instance,
            pid,
            start,
            elements,
            Bytes::copy_from_slice(data),
        )
    }

    /// Create a reset service frame (M_Reset.req or M_Reset.ind)
    pub fn reset(message_code: MessageCode) -> Self {
        Self::new(message_code, 0, 0, 0, 0, 0, Bytes::new())
    }

    /// Create a negative confirmation for a request
    ///
    /// # Arguments
    /// * `request` - The request being answered
    /// * `error_code` - cEMI error code, see [`error_text`]
    pub fn negative_confirmation(request: &MgmtFrame, error_code: u8) -> Self {
        let message_code = match request.message_code {
            MessageCode::PropWriteReq => MessageCode::PropWriteCon,
            _ => MessageCode::PropReadCon,
        };
        Self::new(
            message_code,
            request.object_type,
            request.object_instance,
            request.pid,
            request.start,
            0,
            Bytes::copy_from_slice(&[error_code]),
        )
    }

    pub fn message_code(&self) -> MessageCode {
        self.message_code
    }

    pub fn object_type(&self) -> u16 {
        self.object_type
    }

    pub fn object_instance(&self) -> u8 {
        self.object_instance
    }

    pub fn pid(&self) -> u8 {
        self.pid
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn elements(&self) -> u8 {
        self.elements
    }

    /// Get the payload
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Check if the frame is a negative confirmation
    pub fn is_negative(&self) -> bool {
        self.message_code.is_confirmation() && self.elements == 0
    }

    /// Get the error code of a negative confirmation
    pub fn error_code(&self) -> Option<u8> {
        if self.is_negative() {
            Some(self.data.first().copied().unwrap_or(0))
        } else {
            None
        }
    }

    /// Get the error text of a negative confirmation
    pub fn error_text(&self) -> Option<&'static str> {
        self.error_code().map(error_text)
    }

    /// Encode the frame to bytes
    ///
    /// # Errors
    /// Returns `InvalidData` if the element count or start index exceed
    /// their field widths
    pub fn encode(&self) -> KnxResult<Bytes> {
        if !self.message_code.has_property_header() {
            return Ok(Bytes::copy_from_slice(&[self.message_code.as_u8()]));
        }
        if self.elements > MAX_ELEMENTS {
            return Err(KnxError::InvalidData(format!(
                "Element count {} exceeds maximum of {}",
                self.elements, MAX_ELEMENTS
            )));
        }
        if self.start > MAX_START_INDEX {
            return Err(KnxError::InvalidData(format!(
                "Start index {} exceeds maximum of {}",
                self.start, MAX_START_INDEX
            )));
        }

        let mut buf = BytesMut::with_capacity(HEADER_LENGTH + self.data.len());
        buf.put_u8(self.message_code.as_u8());
        buf.put_u16(self.object_type);
        buf.put_u8(self.object_instance);
        buf.put_u8(self.pid);
        buf.put_u16(((self.elements as u16) << 12) | self.start);
        buf.extend_from_slice(&self.data);
        Ok(buf.freeze())
    }

    /// Decode a frame from bytes
    pub fn decode(data: &[u8]) -> KnxResult<Self> {
        let Some(&code) = data.first() else {
            return Err(KnxError::InvalidData("Empty cEMI frame".to_string()));
        };
        let message_code = MessageCode::try_from(code)?;
        if !message_code.has_property_header() {
            return Ok(Self::reset(message_code));
        }
        if data.len() < HEADER_LENGTH {
            return Err(KnxError::InvalidData(format!(
                "{} frame too short: expected at least {}, got {}",
                message_code,
                HEADER_LENGTH,
                data.len()
            )));
        }

        let noe_six = u16::from_be_bytes([data[5], data[6]]);
        Ok(Self {
            message_code,
            object_type: u16::from_be_bytes([data[1], data[2]]),
            object_instance: data[3],
            pid: data[4],
            start: noe_six & MAX_START_INDEX,
            elements: (noe_six >> 12) as u8,
            data: Bytes::copy_from_slice(&data[HEADER_LENGTH..]),
        })
    }
}

impl fmt::Display for MgmtFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message_code.has_property_header() {
            return write!(f, "{}", self.message_code);
        }
        write!(
            f,
            "{} OT {} OI {} PID {} start {} elements {}",
            self.message_code,
            self.object_type,
            self.object_instance,
            self.pid,
            self.start,
            self.elements
        )?;
        if let Some(text) = self.error_text() {
            write!(f, " ({})", text)?;
        }
        Ok(())
    }
}
