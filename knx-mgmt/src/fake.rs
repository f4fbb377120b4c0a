//! Test doubles for device links

use async_trait::async_trait;
use bytes::Bytes;
use knx_cemi::{MessageCode, MgmtFrame};
use knx_core::{object_type, pid, KnxError, KnxResult};
use knx_transport::{BlockingMode, CloseEvent, CloseInitiator, CloseListener, DeviceLink, LinkListener};
use mockall::mock;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

mock! {
    pub Link {}

    #[async_trait]
    impl DeviceLink for Link {
        fn name(&self) -> String;
        async fn send(&self, frame: &[u8], mode: BlockingMode) -> KnxResult<()>;
        fn set_listener(&self, listener: Arc<dyn LinkListener>);
        async fn close(&self) -> KnxResult<()>;
    }
}

/// Close listener recording all events
#[derive(Default)]
pub(crate) struct RecordingCloseListener {
    events: Mutex<Vec<CloseEvent>>,
}

impl RecordingCloseListener {
    pub(crate) fn events(&self) -> Vec<CloseEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl CloseListener for RecordingCloseListener {
    fn closed(&self, event: CloseEvent) {
        self.events.lock().unwrap().push(event);
    }
}

struct Property {
    value: Vec<u8>,
    writable: bool,
}

#[derive(Default)]
struct FakeState {
    io_list: Option<Vec<u16>>,
    properties: HashMap<(u16, u8, u8), Property>,
    listener: Option<Arc<dyn LinkListener>>,
    sent: Vec<(MgmtFrame, BlockingMode)>,
    injected: VecDeque<Vec<u8>>,
    silent: bool,
    hang: bool,
    reset_on_next: bool,
    fail_close: bool,
    close_count: usize,
}

/// Scripted KNX device answering property services
///
/// Confirmations are delivered to the listener before `send` returns, the
/// way a link in wait-for-confirmation mode does.
pub(crate) struct FakeDevice {
    state: Mutex<FakeState>,
    closed: Notify,
}

impl FakeDevice {
    /// Create a device with the given object index list
    ///
    /// `None` creates a device answering the object index list with a
    /// negative response.
    pub(crate) fn new(io_list: Option<Vec<u16>>) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(FakeState {
                io_list,
                ..FakeState::default()
            }),
            closed: Notify::new(),
        })
    }

    pub(crate) fn add_property(&self, object_type: u16, instance: u8, pid: u8, value: &[u8], writable: bool) {
        self.state.lock().unwrap().properties.insert(
            (object_type, instance, pid),
            Property {
                value: value.to_vec(),
                writable,
            },
        );
    }

    pub(crate) fn property(&self, object_type: u16, instance: u8, pid: u8) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .properties
            .get(&(object_type, instance, pid))
            .map(|p| p.value.clone())
    }

    /// Deliver a raw frame before the answer to the next request
    pub(crate) fn inject(&self, frame: &[u8]) {
        self.state.lock().unwrap().injected.push_back(frame.to_vec());
    }

    /// Deliver a reset indication instead of the answer to the next request
    pub(crate) fn reset_on_next_request(&self) {
        self.state.lock().unwrap().reset_on_next = true;
    }

    /// Stop answering requests
    pub(crate) fn set_silent(&self, silent: bool) {
        self.state.lock().unwrap().silent = silent;
    }

    /// Keep requests waiting until the link is closed
    pub(crate) fn set_hang(&self, hang: bool) {
        self.state.lock().unwrap().hang = hang;
    }

    pub(crate) fn set_fail_close(&self, fail: bool) {
        self.state.lock().unwrap().fail_close = fail;
    }

    pub(crate) fn sent(&self) -> Vec<MgmtFrame> {
        self.state.lock().unwrap().sent.iter().map(|(f, _)| f.clone()).collect()
    }

    pub(crate) fn sent_modes(&self) -> Vec<BlockingMode> {
        self.state.lock().unwrap().sent.iter().map(|(_, m)| *m).collect()
    }

    /// Property ids of all read requests sent to an object
    pub(crate) fn read_pids(&self, object_type: u16, instance: u8) -> Vec<u8> {
        self.sent()
            .iter()
            .filter(|f| {
                f.message_code() == MessageCode::PropReadReq
                    && f.object_type() == object_type
                    && f.object_instance() == instance
            })
            .map(|f| f.pid())
            .collect()
    }

    pub(crate) fn clear_sent(&self) {
        self.state.lock().unwrap().sent.clear();
    }

    pub(crate) fn close_count(&self) -> usize {
        self.state.lock().unwrap().close_count
    }

    /// Deliver a close event as the link would on a connection loss
    pub(crate) fn drop_connection(&self, reason: &str) {
        let listener = self.state.lock().unwrap().listener.clone();
        if let Some(listener) = listener {
            listener.connection_closed(CloseEvent::new(CloseInitiator::Internal, reason));
        }
    }

    fn confirm(request: &MgmtFrame, code: MessageCode, data: Vec<u8>) -> MgmtFrame {
        MgmtFrame::new(
            code,
            request.object_type(),
            request.object_instance(),
            request.pid(),
            request.start(),
            request.elements(),
            Bytes::from(data),
        )
    }

    fn answer(state: &mut FakeState, request: &MgmtFrame) -> Option<MgmtFrame> {
        let key = (request.object_type(), request.object_instance(), request.pid());
        match request.message_code() {
            MessageCode::PropReadReq if key == (object_type::DEVICE, 1, pid::IO_LIST) => {
                let Some(io_list) = &state.io_list else {
                    return Some(MgmtFrame::negative_confirmation(request, 7));
                };
                let start = request.start() as usize;
                let elements = request.elements() as usize;
                if start == 0 {
                    let count = io_list.len() as u16;
                    return Some(Self::confirm(request, MessageCode::PropReadCon, count.to_be_bytes().to_vec()));
                }
                if start - 1 + elements > io_list.len() {
                    return Some(MgmtFrame::negative_confirmation(request, 9));
                }
                let data = io_list[start - 1..start - 1 + elements]
                    .iter()
                    .flat_map(|t| t.to_be_bytes())
                    .collect();
                Some(Self::confirm(request, MessageCode::PropReadCon, data))
            }
            MessageCode::PropReadReq => match state.properties.get(&key) {
                Some(property) => Some(Self::confirm(
                    request,
                    MessageCode::PropReadCon,
                    property.value.clone(),
                )),
                None => Some(MgmtFrame::negative_confirmation(request, 7)),
            },
            MessageCode::PropWriteReq => match state.properties.get_mut(&key) {
                Some(property) if property.writable => {
                    property.value = request.data().to_vec();
                    Some(Self::confirm(request, MessageCode::PropWriteCon, Vec::new()))
                }
                Some(_) => Some(MgmtFrame::negative_confirmation(request, 5)),
                None => Some(MgmtFrame::negative_confirmation(request, 7)),
            },
            _ => None,
        }
    }
}

#[async_trait]
impl DeviceLink for FakeDevice {
    fn name(&self) -> String {
        "fake device".to_string()
    }

    async fn send(&self, frame: &[u8], mode: BlockingMode) -> KnxResult<()> {
        let request = MgmtFrame::decode(frame)?;
        let (listener, deliveries, hang) = {
            let mut state = self.state.lock().unwrap();
            state.sent.push((request.clone(), mode));
            let mut deliveries: Vec<Vec<u8>> = state.injected.drain(..).collect();
            if state.reset_on_next {
                state.reset_on_next = false;
                deliveries.push(MgmtFrame::reset(MessageCode::ResetInd).encode()?.to_vec());
            } else if !state.silent && !state.hang {
                if let Some(answer) = Self::answer(&mut state, &request) {
                    deliveries.push(answer.encode()?.to_vec());
                }
            }
            (state.listener.clone(), deliveries, state.hang)
        };

        if let Some(listener) = listener {
            for delivery in &deliveries {
                listener.frame_received(delivery);
            }
        }
        if hang {
            self.closed.notified().await;
            return Err(KnxError::Cancelled);
        }
        Ok(())
    }

    fn set_listener(&self, listener: Arc<dyn LinkListener>) {
        self.state.lock().unwrap().listener = Some(listener);
    }

    async fn close(&self) -> KnxResult<()> {
        let (listener, fail) = {
            let mut state = self.state.lock().unwrap();
            state.close_count += 1;
            (state.listener.clone(), state.fail_close)
        };
        self.closed.notify_one();
        if let Some(listener) = listener {
            listener.connection_closed(CloseEvent::new(CloseInitiator::ClientRequest, "client request"));
        }
        if fail {
            return Err(KnxError::Connection(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "link already gone",
            )));
        }
        Ok(())
    }
}
