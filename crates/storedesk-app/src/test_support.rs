use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use storedesk_core::api::{ApiError, StoreApi};
use storedesk_core::messages::{Locale, Messages};
use storedesk_core::store::{Store, StoreId, StorePayload};

use crate::App;

#[derive(Default)]
struct Script {
    list: VecDeque<Result<Vec<Store>, ApiError>>,
    get: VecDeque<Result<Store, ApiError>>,
    create: VecDeque<Result<StoreId, ApiError>>,
    update: VecDeque<Result<(), ApiError>>,
    delete: VecDeque<Result<(), ApiError>>,
    calls: Vec<String>,
}

/// Scripted [`StoreApi`]; clones share one script so tests can inspect calls
/// after handing a clone to [`App`].
#[derive(Clone, Default)]
pub(crate) struct FakeApi {
    script: Arc<Mutex<Script>>,
}

impl FakeApi {
    pub(crate) fn conflict() -> ApiError {
        ApiError::Status {
            method: "POST",
            url: "http://localhost:3000/api/stores".to_string(),
            status: 409,
            body: "Store name already exists".to_string(),
        }
    }

    pub(crate) fn has_products() -> ApiError {
        ApiError::Status {
            method: "DELETE",
            url: "http://localhost:3000/api/stores/s1".to_string(),
            status: 400,
            body: "Store has products".to_string(),
        }
    }

    pub(crate) fn push_list(&self, result: Result<Vec<Store>, ApiError>) {
        self.script
            .lock()
            .expect("script lock")
            .list
            .push_back(result);
    }

    pub(crate) fn push_get(&self, result: Result<Store, ApiError>) {
        self.script.lock().expect("script lock").get.push_back(result);
    }

    pub(crate) fn push_create(&self, result: Result<StoreId, ApiError>) {
        self.script
            .lock()
            .expect("script lock")
            .create
            .push_back(result);
    }

    pub(crate) fn push_update(&self, result: Result<(), ApiError>) {
        self.script
            .lock()
            .expect("script lock")
            .update
            .push_back(result);
    }

    pub(crate) fn push_delete(&self, result: Result<(), ApiError>) {
        self.script
            .lock()
            .expect("script lock")
            .delete
            .push_back(result);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.script.lock().expect("script lock").calls.clone()
    }

    fn missing(method: &'static str) -> ApiError {
        ApiError::Transport {
            method,
            url: "fake://".to_string(),
            message: "missing scripted response".to_string(),
        }
    }
}

impl StoreApi for FakeApi {
    fn list_stores(&self) -> Result<Vec<Store>, ApiError> {
        let mut script = self.script.lock().expect("script lock");
        script.calls.push("list".to_string());
        script
            .list
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("GET")))
    }

    fn get_store(&self, id: &StoreId) -> Result<Store, ApiError> {
        let mut script = self.script.lock().expect("script lock");
        script.calls.push(format!("get {id}"));
        script
            .get
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("GET")))
    }

    fn create_store(&self, payload: &StorePayload) -> Result<StoreId, ApiError> {
        let mut script = self.script.lock().expect("script lock");
        script.calls.push(format!("create {}", payload.name));
        script
            .create
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("POST")))
    }

    fn update_store(&self, id: &StoreId, payload: &StorePayload) -> Result<(), ApiError> {
        let mut script = self.script.lock().expect("script lock");
        script.calls.push(format!("update {id} {}", payload.name));
        script
            .update
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("PATCH")))
    }

    fn delete_store(&self, id: &StoreId) -> Result<(), ApiError> {
        let mut script = self.script.lock().expect("script lock");
        script.calls.push(format!("delete {id}"));
        script
            .delete
            .pop_front()
            .unwrap_or_else(|| Err(Self::missing("DELETE")))
    }
}

pub(crate) fn store(id: &str, name: &str) -> Store {
    Store {
        id: StoreId::new(id),
        name: name.to_string(),
        created_at: None,
        updated_at: None,
    }
}

pub(crate) fn app_with(api: &FakeApi) -> App {
    App::new(
        Arc::new(api.clone()),
        Messages::new(Locale::En),
        "http://localhost:3000",
    )
}
