use storedesk_core::api::ApiError;
use storedesk_core::store::{StoreId, StorePayload};

use crate::App;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub payload: StorePayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRequest {
    pub store_id: StoreId,
    pub payload: StorePayload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub store_id: StoreId,
}

/// A backend call a flow has committed to. Produced by a flow's `begin_*`
/// step after its in-flight flag is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    Create(CreateRequest),
    Update(UpdateRequest),
    Delete(DeleteRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Created(Result<StoreId, ApiError>),
    Updated(Result<(), ApiError>),
    Deleted(Result<(), ApiError>),
}

impl PendingRequest {
    pub fn describe(&self) -> String {
        match self {
            Self::Create(_) => "method=POST path=/api/stores".to_string(),
            Self::Update(request) => {
                format!("method=PATCH path=/api/stores/{}", request.store_id)
            }
            Self::Delete(request) => {
                format!("method=DELETE path=/api/stores/{}", request.store_id)
            }
        }
    }
}

impl App {
    /// Runs a committed request against the backend. Blocking; the terminal
    /// front end calls this from a worker thread.
    pub fn execute(&self, request: &PendingRequest) -> RequestOutcome {
        match request {
            PendingRequest::Create(request) => {
                RequestOutcome::Created(self.execute_create(request))
            }
            PendingRequest::Update(request) => {
                RequestOutcome::Updated(self.execute_update(request))
            }
            PendingRequest::Delete(request) => {
                RequestOutcome::Deleted(self.execute_delete(request))
            }
        }
    }

    pub(crate) fn execute_create(&self, request: &CreateRequest) -> Result<StoreId, ApiError> {
        self.logged(PendingRequest::Create(request.clone()).describe(), || {
            self.api.create_store(&request.payload)
        })
    }

    pub(crate) fn execute_update(&self, request: &UpdateRequest) -> Result<(), ApiError> {
        self.logged(PendingRequest::Update(request.clone()).describe(), || {
            self.api.update_store(&request.store_id, &request.payload)
        })
    }

    pub(crate) fn execute_delete(&self, request: &DeleteRequest) -> Result<(), ApiError> {
        self.logged(PendingRequest::Delete(request.clone()).describe(), || {
            self.api.delete_store(&request.store_id)
        })
    }

    fn logged<T>(
        &self,
        description: String,
        call: impl FnOnce() -> Result<T, ApiError>,
    ) -> Result<T, ApiError> {
        self.record(format!("request dispatched {description}"));
        let result = call();
        self.record(format!(
            "request settled {description} {}",
            settle_summary(result.as_ref().err())
        ));
        result
    }
}

fn settle_summary(error: Option<&ApiError>) -> String {
    match error {
        None => "outcome=ok".to_string(),
        Some(error) => format!("outcome=error error={error}"),
    }
}
