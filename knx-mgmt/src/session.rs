//! Request/response correlation
//!
//! A request is sent in wait-for-confirmation mode. When the link returns,
//! the confirmation has been delivered to the inbox, which is then scanned
//! from its head:
//!
//! 1. An empty inbox fails with `InvalidResponse`.
//! 2. A reset indication closes the adapter and fails with `ConnectionReset`.
//! 3. A frame of the awaited kind ends the scan with its payload, or with a
//!    `Remote` error for a negative confirmation.
//! 4. Any other frame is discarded.
//!
//! At most one request is in flight per adapter.

use crate::inbox::FrameInbox;
use crate::lifecycle::Lifecycle;
use crate::link::ManagementLink;
use bytes::Bytes;
use knx_cemi::{MessageCode, MgmtFrame};
use knx_core::{KnxError, KnxResult};
use std::sync::Arc;

pub(crate) struct MgmtSession<L: ManagementLink> {
    link: L,
    inbox: Arc<FrameInbox>,
    lifecycle: Arc<Lifecycle>,
}

impl<L: ManagementLink> MgmtSession<L> {
    pub(crate) fn new(link: L, inbox: Arc<FrameInbox>, lifecycle: Arc<Lifecycle>) -> Self {
        Self {
            link,
            inbox,
            lifecycle,
        }
    }

    pub(crate) fn link(&self) -> &L {
        &self.link
    }

    pub(crate) fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Fail with `IllegalState` unless the adapter is open
    pub(crate) fn ensure_open(&self) -> KnxResult<()> {
        if self.lifecycle.is_open() {
            Ok(())
        } else {
            Err(KnxError::IllegalState(format!("{} closed", self.link.name())))
        }
    }

    /// Read property elements of an object
    pub(crate) async fn read(
        &self,
        object_type: u16,
        instance: u8,
        pid: u8,
        start: u16,
        elements: u8,
    ) -> KnxResult<Bytes> {
        let frame = MgmtFrame::read_request(object_type, instance, pid, start, elements);
        self.request(frame, MessageCode::PropReadCon).await
    }

    /// Write property elements of an object
    pub(crate) async fn write(
        &self,
        object_type: u16,
        instance: u8,
        pid: u8,
        start: u16,
        elements: u8,
        data: &[u8],
    ) -> KnxResult<()> {
        let frame = MgmtFrame::write_request(object_type, instance, pid, start, elements, data);
        self.request(frame, MessageCode::PropWriteCon).await?;
        Ok(())
    }

    /// Send a reset request to the device without waiting for an answer
    pub(crate) async fn reset_device(&self) -> KnxResult<()> {
        self.ensure_open()?;
        self.link
            .send(&MgmtFrame::reset(MessageCode::ResetReq), false)
            .await
    }

    async fn request(&self, frame: MgmtFrame, awaited: MessageCode) -> KnxResult<Bytes> {
        self.ensure_open()?;
        log::trace!("{}: send {}", self.link.name(), frame);
        self.link.send(&frame, true).await?;
        self.find_confirmation(awaited).await
    }

    async fn find_confirmation(&self, awaited: MessageCode) -> KnxResult<Bytes> {
        while let Some(frame) = self.inbox.pop() {
            if frame.message_code() == MessageCode::ResetInd {
                log::warn!("{}: reset indication from server", self.link.name());
                if self.lifecycle.server_reset() {
                    self.release().await;
                }
                return Err(KnxError::ConnectionReset("reset by server".to_string()));
            }
            if frame.message_code() == awaited {
                if let Some(text) = frame.error_text() {
                    return Err(KnxError::Remote(text.to_string()));
                }
                return Ok(frame.data().clone());
            }
            log::trace!("{}: discarding {}", self.link.name(), frame);
        }
        Err(KnxError::InvalidResponse("confirmation expected".to_string()))
    }

    /// Close the adapter and release the link
    ///
    /// # Returns
    /// `true` if this call closed the adapter
    pub(crate) async fn close(&self) -> bool {
        if !self.lifecycle.close() {
            return false;
        }
        self.release().await;
        true
    }

    async fn release(&self) {
        let dropped = self.inbox.clear();
        if dropped > 0 {
            log::debug!("{}: dropped {} pending frames", self.link.name(), dropped);
        }
        if let Err(e) = self.link.release().await {
            log::debug!("{}: error releasing link: {}", self.link.name(), e);
        }
    }
}
