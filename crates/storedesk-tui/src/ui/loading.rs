use std::sync::mpsc::{self, Receiver, TryRecvError};

use ratatui::text::{Line, Span};
use storedesk_app::{App, PendingRequest, RequestOutcome};
use storedesk_core::api::ApiError;

use crate::theme;

const FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

#[derive(Debug, Clone, Default)]
pub(crate) struct LoadingState {
    frame_index: usize,
}

impl LoadingState {
    pub(crate) fn next_frame(&mut self) {
        self.frame_index = (self.frame_index + 1) % FRAMES.len();
    }

    pub(crate) fn current_frame(&self) -> &'static str {
        FRAMES[self.frame_index]
    }

    pub(crate) fn line(&self, message: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled(self.current_frame().to_string(), theme::focus_prompt()),
            Span::raw(format!(" {message}")),
        ])
    }
}

#[derive(Debug)]
pub(crate) struct RequestEvent {
    pub(crate) token: u64,
    pub(crate) outcome: RequestOutcome,
}

/// Runs a committed request off the UI thread.
pub(crate) trait RequestWorker: Send + Sync {
    fn spawn(&self, request: PendingRequest, token: u64) -> Receiver<RequestEvent>;
}

pub(crate) struct ThreadWorker {
    app: App,
}

impl ThreadWorker {
    pub(crate) fn new(app: App) -> Self {
        Self { app }
    }
}

impl RequestWorker for ThreadWorker {
    fn spawn(&self, request: PendingRequest, token: u64) -> Receiver<RequestEvent> {
        let (sender, receiver) = mpsc::channel();
        let app = self.app.clone();
        std::thread::spawn(move || {
            let outcome = app.execute(&request);
            let _ = sender.send(RequestEvent { token, outcome });
        });
        receiver
    }
}

/// One dispatched request owned by a screen. Each request gets its own
/// channel, so replacing or dropping the `InFlight` drops the receiver and a
/// late completion has nowhere to land. The token only guards workers that
/// hand the same channel to more than one request.
#[derive(Debug)]
pub(crate) struct InFlight {
    token: u64,
    request: PendingRequest,
    receiver: Receiver<RequestEvent>,
    pub(crate) loading: LoadingState,
}

impl InFlight {
    pub(crate) fn start(worker: &dyn RequestWorker, request: PendingRequest, token: u64) -> Self {
        let receiver = worker.spawn(request.clone(), token);
        Self {
            token,
            request,
            receiver,
            loading: LoadingState::default(),
        }
    }

    /// Advances the spinner and returns the outcome once the worker reports.
    /// A worker that hangs up without reporting settles as a transport
    /// failure so the in-flight flag is always cleared. Events carrying
    /// another token are dropped.
    pub(crate) fn poll(&mut self) -> Option<RequestOutcome> {
        self.loading.next_frame();
        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.token == self.token => return Some(event.outcome),
                Ok(_) => continue,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => return Some(self.worker_gone()),
            }
        }
    }

    fn worker_gone(&self) -> RequestOutcome {
        let (method, path) = match &self.request {
            PendingRequest::Create(_) => ("POST", "/api/stores".to_string()),
            PendingRequest::Update(request) => {
                ("PATCH", format!("/api/stores/{}", request.store_id))
            }
            PendingRequest::Delete(request) => {
                ("DELETE", format!("/api/stores/{}", request.store_id))
            }
        };
        let error = ApiError::Transport {
            method,
            url: path,
            message: "request worker stopped before reporting".to_string(),
        };
        match &self.request {
            PendingRequest::Create(_) => RequestOutcome::Created(Err(error)),
            PendingRequest::Update(_) => RequestOutcome::Updated(Err(error)),
            PendingRequest::Delete(_) => RequestOutcome::Deleted(Err(error)),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::Mutex;

    use storedesk_app::PendingRequest;

    use super::{RequestEvent, RequestWorker};

    /// Hands every spawned request's sender to the test so it can settle the
    /// request whenever it likes.
    #[derive(Default)]
    pub(crate) struct ScriptedWorker {
        calls: Mutex<Vec<(PendingRequest, u64)>>,
        senders: Mutex<Vec<Sender<RequestEvent>>>,
    }

    impl ScriptedWorker {
        pub(crate) fn calls(&self) -> Vec<(PendingRequest, u64)> {
            self.calls.lock().expect("calls lock").clone()
        }

        pub(crate) fn send(&self, event: RequestEvent) {
            let senders = self.senders.lock().expect("senders lock");
            let sender = senders.last().expect("a spawned request");
            sender.send(event).expect("receiver alive");
        }

        /// Sends on the channel of the `index`-th spawn; false when that
        /// receiver is gone.
        pub(crate) fn send_to(&self, index: usize, event: RequestEvent) -> bool {
            let senders = self.senders.lock().expect("senders lock");
            senders
                .get(index)
                .is_some_and(|sender| sender.send(event).is_ok())
        }

        pub(crate) fn hang_up(&self) {
            let _ = self.senders.lock().expect("senders lock").pop();
        }
    }

    impl RequestWorker for ScriptedWorker {
        fn spawn(&self, request: PendingRequest, token: u64) -> Receiver<RequestEvent> {
            self.calls
                .lock()
                .expect("calls lock")
                .push((request, token));
            let (sender, receiver) = mpsc::channel();
            self.senders.lock().expect("senders lock").push(sender);
            receiver
        }
    }
}
