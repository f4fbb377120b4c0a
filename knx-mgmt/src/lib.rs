//! KNX local device management
//!
//! This crate provides property access to the interface objects of a KNX
//! device using the cEMI local device management services.
//!
//! # Architecture
//!
//! - `link`: management links adapting a `DeviceLink` (local bus, KNXnet/IP)
//! - `inbox`: FIFO of frames delivered by the link
//! - `session`: request/response correlation over the inbox
//! - `directory`: interface object discovery and instance resolution
//! - `cursor`: progress of the property description emulation
//! - `lifecycle`: open/closed state and server reset handling
//! - `device_mgmt`: the [`DeviceManagement`] adapter tying it together

pub mod adapter;
pub mod cursor;
pub mod device_mgmt;
pub mod directory;
pub mod inbox;
pub mod lifecycle;
pub mod link;

mod listener;
mod session;

#[cfg(test)]
mod fake;

pub use adapter::PropertyAdapter;
pub use cursor::DescriptionCursor;
pub use device_mgmt::{DeviceManagement, DeviceMgmtConfig};
pub use directory::{Directory, InterfaceObject};
pub use inbox::{FrameInbox, InboxSender};
pub use knx_core::{KnxError, KnxResult};
pub use lifecycle::{AdapterState, Lifecycle, SERVER_RESET_REASON};
pub use link::{LocalBusLink, ManagementLink, NetworkLink};
