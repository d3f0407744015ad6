use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use storedesk_app::{App, RequestLog};
use storedesk_core::api::{ApiError, StoreApi};
use storedesk_core::messages::{Locale, Messages};
use storedesk_core::store::{Store, StoreId, StorePayload};

#[allow(dead_code)]
pub enum Reply {
    Stores(Vec<Store>),
    Store(Store),
    Created(StoreId),
    Empty,
    Fail(ApiError),
}

/// One FIFO of replies shared by every endpoint; calls are recorded as
/// `"METHOD path [name]"`.
#[derive(Default)]
pub struct QueueApi {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<String>>,
}

impl QueueApi {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn next(&self, call: String) -> Reply {
        self.calls.lock().expect("calls lock").push(call);
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| {
                Reply::Fail(ApiError::Transport {
                    method: "GET",
                    url: "queue://".to_string(),
                    message: "missing scripted reply".to_string(),
                })
            })
    }
}

fn unexpected(reply: Reply) -> ApiError {
    match reply {
        Reply::Fail(error) => error,
        _ => ApiError::Decode {
            method: "GET",
            url: "queue://".to_string(),
            message: "reply shape does not match call".to_string(),
        },
    }
}

impl StoreApi for QueueApi {
    fn list_stores(&self) -> Result<Vec<Store>, ApiError> {
        match self.next("GET /api/stores".to_string()) {
            Reply::Stores(stores) => Ok(stores),
            other => Err(unexpected(other)),
        }
    }

    fn get_store(&self, id: &StoreId) -> Result<Store, ApiError> {
        match self.next(format!("GET /api/stores/{id}")) {
            Reply::Store(store) => Ok(store),
            other => Err(unexpected(other)),
        }
    }

    fn create_store(&self, payload: &StorePayload) -> Result<StoreId, ApiError> {
        match self.next(format!("POST /api/stores {}", payload.name)) {
            Reply::Created(id) => Ok(id),
            other => Err(unexpected(other)),
        }
    }

    fn update_store(&self, id: &StoreId, payload: &StorePayload) -> Result<(), ApiError> {
        match self.next(format!("PATCH /api/stores/{id} {}", payload.name)) {
            Reply::Empty => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    fn delete_store(&self, id: &StoreId) -> Result<(), ApiError> {
        match self.next(format!("DELETE /api/stores/{id}")) {
            Reply::Empty => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

#[derive(Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<String>>,
}

impl MemoryLog {
    #[allow(dead_code)]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().expect("log lock").clone()
    }
}

impl RequestLog for MemoryLog {
    fn record(&self, entry: &str) {
        self.entries.lock().expect("log lock").push(entry.to_string());
    }
}

pub fn store(id: &str, name: &str) -> Store {
    Store {
        id: StoreId::new(id),
        name: name.to_string(),
        created_at: Some("2024-03-01T09:30:00.000Z".to_string()),
        updated_at: None,
    }
}

#[allow(dead_code)]
pub fn status(method: &'static str, path: &str, status: u16, body: &str) -> ApiError {
    ApiError::Status {
        method,
        url: format!("http://localhost:3000{path}"),
        status,
        body: body.to_string(),
    }
}

pub fn app(api: &Arc<QueueApi>, log: &Arc<MemoryLog>) -> App {
    App::new(api.clone(), Messages::new(Locale::En), "http://localhost:3000").with_log(log.clone())
}
