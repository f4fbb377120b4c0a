//! KNX device management
//!
//! Property access to the interface objects of KNX devices over the cEMI
//! local device management services.
//!
//! # Architecture
//!
//! This library is organized as a workspace with multiple crates:
//!
//! - `knx-core`: Error handling, object types, property ids and descriptions
//! - `knx-cemi`: cEMI device management frames
//! - `knx-transport`: Device link boundary (links, listeners, close events)
//! - `knx-mgmt`: Device management adapter
//!
//! # Usage
//!
//! ```rust,ignore
//! use knx::mgmt::{DeviceManagement, DeviceMgmtConfig, PropertyAdapter};
//!
//! let mgmt = DeviceManagement::network(link, DeviceMgmtConfig::default()).await?;
//! for object in mgmt.interface_objects() {
//!     println!("{}: {:?}", object.index(), knx::object_type::name(object.object_type()));
//! }
//! let description = mgmt.get_description(1, 0, 0).await?;
//! mgmt.close().await;
//! ```

// Re-export core types
pub use knx_core::{object_type, pid, KnxError, KnxResult, PropertyDescription};

// Re-export cEMI frames
pub mod cemi {
    pub use knx_cemi::*;
}

// Re-export transport boundary
pub mod transport {
    pub use knx_transport::*;
}

// Re-export device management
pub mod mgmt {
    pub use knx_mgmt::*;
}
