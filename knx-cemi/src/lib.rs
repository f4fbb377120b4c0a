//! cEMI device management frames
//!
//! This crate provides the message codes and the encoding/decoding of the
//! cEMI local device management services (property read/write, property
//! info and reset).

pub mod frame;
pub mod message_code;

pub use frame::{error_text, MgmtFrame, MAX_ELEMENTS, MAX_START_INDEX};
pub use message_code::{is_device_management, MessageCode};
