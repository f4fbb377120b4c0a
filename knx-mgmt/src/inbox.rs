//! Inbox for received device management frames
//!
//! The inbox is fed by the link listener from the link's receiving context
//! and drained by the request path. Frames are kept in arrival order.

use knx_cemi::MgmtFrame;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc;

/// Create a new inbox together with its feeding handle
pub fn channel() -> (InboxSender, FrameInbox) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (
        InboxSender { sender },
        FrameInbox {
            receiver: Mutex::new(receiver),
        },
    )
}

/// Handle appending frames to a [`FrameInbox`]
///
/// Appending never blocks and may happen from any thread.
#[derive(Debug, Clone)]
pub struct InboxSender {
    sender: mpsc::UnboundedSender<MgmtFrame>,
}

impl InboxSender {
    /// Append a frame to the inbox
    ///
    /// # Returns
    /// `false` if the inbox no longer exists and the frame was dropped
    pub fn push(&self, frame: MgmtFrame) -> bool {
        self.sender.send(frame).is_ok()
    }
}

/// FIFO of received device management frames
pub struct FrameInbox {
    receiver: Mutex<mpsc::UnboundedReceiver<MgmtFrame>>,
}

impl FrameInbox {
    /// Remove and return the frame at the head of the inbox
    pub fn pop(&self) -> Option<MgmtFrame> {
        self.receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .try_recv()
            .ok()
    }

    /// Remove all pending frames
    ///
    /// # Returns
    /// Number of frames removed
    pub fn clear(&self) -> usize {
        let mut receiver = self.receiver.lock().unwrap_or_else(PoisonError::into_inner);
        let mut removed = 0;
        while receiver.try_recv().is_ok() {
            removed += 1;
        }
        removed
    }
}

impl fmt::Debug for FrameInbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameInbox").finish()
    }
}
