use thiserror::Error;

use crate::store::{Store, StoreId, StorePayload};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },
    #[error("{method} {url} returned status {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response from {method} {url}: {message}")]
    Decode {
        method: &'static str,
        url: String,
        message: String,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// The store resource of the backend. Every call either fully succeeds or
/// fails with an [`ApiError`]. Writes only promise what the flows read back:
/// the new id from a create, nothing from an update or delete.
pub trait StoreApi: Send + Sync {
    fn list_stores(&self) -> Result<Vec<Store>, ApiError>;
    fn get_store(&self, id: &StoreId) -> Result<Store, ApiError>;
    fn create_store(&self, payload: &StorePayload) -> Result<StoreId, ApiError>;
    fn update_store(&self, id: &StoreId, payload: &StorePayload) -> Result<(), ApiError>;
    fn delete_store(&self, id: &StoreId) -> Result<(), ApiError>;
}
