//! Link listener feeding the frame inbox

use crate::inbox::{FrameInbox, InboxSender};
use crate::lifecycle::Lifecycle;
use knx_cemi::{is_device_management, MgmtFrame};
use knx_transport::{CloseEvent, CloseListener, LinkListener};
use std::sync::Arc;

/// Listener registered with the device link of an adapter
///
/// Device management frames are appended to the inbox, all other frames
/// are ignored. Close events empty the inbox and are forwarded to the
/// adapter's close listener after being rewritten by the lifecycle.
pub(crate) struct MgmtListener {
    inbox: InboxSender,
    pending: Arc<FrameInbox>,
    lifecycle: Arc<Lifecycle>,
    close_listener: Option<Arc<dyn CloseListener>>,
}

impl MgmtListener {
    pub(crate) fn new(
        inbox: InboxSender,
        pending: Arc<FrameInbox>,
        lifecycle: Arc<Lifecycle>,
        close_listener: Option<Arc<dyn CloseListener>>,
    ) -> Self {
        Self {
            inbox,
            pending,
            lifecycle,
            close_listener,
        }
    }
}

impl LinkListener for MgmtListener {
    fn frame_received(&self, frame: &[u8]) {
        match frame.first() {
            Some(&code) if is_device_management(code) => {}
            _ => {
                log::trace!("ignoring non device management frame {:02X?}", frame);
                return;
            }
        }

        match MgmtFrame::decode(frame) {
            Ok(frame) => {
                log::trace!("received {}", frame);
                if !self.inbox.push(frame) {
                    log::debug!("inbox closed, dropping frame");
                }
            }
            Err(e) => log::debug!("dropping device management frame: {}", e),
        }
    }

    fn connection_closed(&self, event: CloseEvent) {
        self.lifecycle.close();
        let dropped = self.pending.clear();
        if dropped > 0 {
            log::debug!("dropped {} pending frames", dropped);
        }
        let event = self.lifecycle.close_event(event);
        log::debug!("link {}", event);
        if let Some(listener) = &self.close_listener {
            listener.closed(event);
        }
    }
}
