use anyhow::{Context, Result};
use storedesk_core::store::{Store, StoreId};
use thiserror::Error;

use crate::App;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreLoadError {
    #[error("store {id} was not found")]
    NotFound { id: StoreId },
}

impl App {
    pub fn list_stores(&self) -> Result<Vec<Store>> {
        self.record("request dispatched method=GET path=/api/stores");
        let stores = self
            .api
            .list_stores()
            .context("failed to list stores")?;
        self.record(format!(
            "request settled method=GET path=/api/stores outcome=ok count={}",
            stores.len()
        ));
        Ok(stores)
    }

    /// Reads one store. A 404 surfaces as [`StoreLoadError::NotFound`] so the
    /// caller can fall back to the root route.
    pub fn load_store(&self, store_id: &StoreId) -> Result<Store> {
        let description = format!("method=GET path=/api/stores/{store_id}");
        self.record(format!("request dispatched {description}"));

        match self.api.get_store(store_id) {
            Ok(store) => {
                self.record(format!("request settled {description} outcome=ok"));
                Ok(store)
            }
            Err(error) if error.is_not_found() => {
                self.record(format!("request settled {description} outcome=not_found"));
                Err(StoreLoadError::NotFound {
                    id: store_id.clone(),
                }
                .into())
            }
            Err(error) => {
                self.record(format!(
                    "request settled {description} outcome=error error={error}"
                ));
                Err(error).with_context(|| format!("failed to load store {store_id}"))
            }
        }
    }
}
