//! Management links
//!
//! A management link adapts a [`DeviceLink`] to the needs of the device
//! management engine: it encodes frames and chooses the blocking mode
//! fitting the kind of connection.
//!
//! # Variants
//!
//! - [`LocalBusLink`]: device attached locally (USB, serial). Requests not
//!   waiting for a confirmation return immediately.
//! - [`NetworkLink`]: KNXnet/IP device management connection. Every frame is
//!   acknowledged by the server, so requests not waiting for a confirmation
//!   still wait for the acknowledgement.

use async_trait::async_trait;
use knx_cemi::MgmtFrame;
use knx_core::KnxResult;
use knx_transport::{BlockingMode, DeviceLink, LinkListener};
use std::sync::Arc;

/// Send primitive used by the device management engine
#[async_trait]
pub trait ManagementLink: Send + Sync {
    /// Get the adapter name
    fn name(&self) -> String;

    /// Send a device management frame
    ///
    /// # Arguments
    /// * `frame` - The frame to send
    /// * `wait_for_con` - Block until the confirmation has been delivered
    async fn send(&self, frame: &MgmtFrame, wait_for_con: bool) -> KnxResult<()>;

    /// Register the listener receiving frames and close events
    fn set_listener(&self, listener: Arc<dyn LinkListener>);

    /// Release the underlying link
    async fn release(&self) -> KnxResult<()>;
}

/// Management link for a locally attached device
#[derive(Debug)]
pub struct LocalBusLink<L: DeviceLink> {
    link: L,
}

impl<L: DeviceLink> LocalBusLink<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }
}

#[async_trait]
impl<L: DeviceLink> ManagementLink for LocalBusLink<L> {
    fn name(&self) -> String {
        format!("local device management {}", self.link.name())
    }

    async fn send(&self, frame: &MgmtFrame, wait_for_con: bool) -> KnxResult<()> {
        let mode = if wait_for_con {
            BlockingMode::WaitForCon
        } else {
            BlockingMode::NonBlocking
        };
        self.link.send(&frame.encode()?, mode).await
    }

    fn set_listener(&self, listener: Arc<dyn LinkListener>) {
        self.link.set_listener(listener);
    }

    async fn release(&self) -> KnxResult<()> {
        self.link.close().await
    }
}

/// Management link for a KNXnet/IP device management connection
#[derive(Debug)]
pub struct NetworkLink<L: DeviceLink> {
    link: L,
}

impl<L: DeviceLink> NetworkLink<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }
}

#[async_trait]
impl<L: DeviceLink> ManagementLink for NetworkLink<L> {
    fn name(&self) -> String {
        format!("KNXnet/IP DM {}", self.link.name())
    }

    async fn send(&self, frame: &MgmtFrame, wait_for_con: bool) -> KnxResult<()> {
        let mode = if wait_for_con {
            BlockingMode::WaitForCon
        } else {
            BlockingMode::WaitForAck
        };
        self.link.send(&frame.encode()?, mode).await
    }

    fn set_listener(&self, listener: Arc<dyn LinkListener>) {
        self.link.set_listener(listener);
    }

    async fn release(&self) -> KnxResult<()> {
        self.link.close().await
    }
}
