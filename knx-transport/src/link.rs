//! Device link trait
//!
//! A device link is the connection to a KNX device over which cEMI device
//! management frames are exchanged, e.g. a USB/serial interface or a
//! KNXnet/IP device management connection. Establishing the connection,
//! retransmission and link-layer timing are the responsibility of the link.

use crate::event::CloseEvent;
use async_trait::async_trait;
use knx_core::KnxResult;
use std::sync::Arc;

/// Blocking behaviour of a send operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockingMode {
    /// Return as soon as the frame was handed to the link
    NonBlocking,
    /// Wait for the link-level acknowledgement
    WaitForAck,
    /// Wait until the confirmation of the request has been delivered
    WaitForCon,
}

/// Receiver of frames and events delivered by a device link
///
/// Links call the listener from their own receiving context, usually a
/// different thread or task than the one sending requests.
pub trait LinkListener: Send + Sync {
    /// Called for every cEMI frame received from the device
    fn frame_received(&self, frame: &[u8]);

    /// Called once the link was closed
    fn connection_closed(&self, event: CloseEvent);
}

/// Connection to a KNX device carrying cEMI frames
#[async_trait]
pub trait DeviceLink: Send + Sync {
    /// Get a name describing the link
    fn name(&self) -> String;

    /// Send a cEMI frame
    ///
    /// With [`BlockingMode::WaitForCon`] the call returns after the matching
    /// confirmation was delivered to the listener. There is no timeout at
    /// this level; a link which stops waiting because it is closed returns
    /// [`knx_core::KnxError::Cancelled`].
    async fn send(&self, frame: &[u8], mode: BlockingMode) -> KnxResult<()>;

    /// Register the listener receiving frames and close events
    fn set_listener(&self, listener: Arc<dyn LinkListener>);

    /// Close the link
    async fn close(&self) -> KnxResult<()>;
}

#[async_trait]
impl<T: DeviceLink + ?Sized> DeviceLink for Arc<T> {
    fn name(&self) -> String {
        (**self).name()
    }

    async fn send(&self, frame: &[u8], mode: BlockingMode) -> KnxResult<()> {
        (**self).send(frame, mode).await
    }

    fn set_listener(&self, listener: Arc<dyn LinkListener>) {
        (**self).set_listener(listener)
    }

    async fn close(&self) -> KnxResult<()> {
        (**self).close().await
    }
}
