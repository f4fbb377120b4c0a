//! Transport boundary for KNX device management
//!
//! This crate defines how the device management layer talks to the
//! connection carrying its frames: the [`DeviceLink`] trait, the listener
//! interface for asynchronously delivered frames and the close events.

pub mod event;
pub mod link;

pub use event::{CloseEvent, CloseInitiator, CloseListener};
pub use knx_core::{KnxError, KnxResult};
pub use link::{BlockingMode, DeviceLink, LinkListener};
