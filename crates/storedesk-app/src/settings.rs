use storedesk_core::api::ApiError;
use storedesk_core::messages::Messages;
use storedesk_core::names::{ValidationError, validate_store_name};
use storedesk_core::route::Route;
use storedesk_core::store::{Store, StoreId, StorePayload};

use crate::App;
use crate::confirm::{ConfirmGuard, GuardState};
use crate::effects::{Navigation, Navigator, Notice, Notifier};
use crate::request::{DeleteRequest, UpdateRequest};

/// Edit session for one store: the name form plus the guarded delete.
///
/// The store id used for requests is passed in by the caller (it comes from
/// the active route), not read from the held store copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFlow {
    store: Store,
    name: String,
    error: Option<ValidationError>,
    submitting: bool,
    guard: ConfirmGuard,
    messages: Messages,
}

impl SettingsFlow {
    pub fn new(store: Store, messages: Messages) -> Self {
        let name = store.name.clone();
        Self {
            store,
            name,
            error: None,
            submitting: false,
            guard: ConfirmGuard::new(),
            messages,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn error(&self) -> Option<ValidationError> {
        self.error
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(|error| error.localized(self.messages))
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn guard(&self) -> GuardState {
        self.guard.state()
    }

    pub fn confirm_open(&self) -> bool {
        self.guard.is_open()
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        if self.submitting {
            return;
        }
        self.name = value.into();
        self.error = validate_store_name(&self.name).err();
    }

    /// Swaps in freshly read server data. The form value is left alone.
    pub fn replace_store(&mut self, store: Store) {
        self.store = store;
    }

    pub fn begin_update(
        &mut self,
        store_id: &StoreId,
    ) -> Result<Option<UpdateRequest>, ValidationError> {
        if self.submitting {
            return Ok(None);
        }

        if let Err(error) = validate_store_name(&self.name) {
            self.error = Some(error);
            return Err(error);
        }

        self.error = None;
        self.submitting = true;
        Ok(Some(UpdateRequest {
            store_id: store_id.clone(),
            payload: StorePayload::new(self.name.clone()),
        }))
    }

    pub fn settle_update(
        &mut self,
        result: Result<(), ApiError>,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) -> bool {
        if !self.submitting || self.guard.is_loading() {
            return false;
        }
        self.submitting = false;

        match result {
            Ok(()) => {
                navigator.navigate(Navigation::Refresh);
                notifier.notify(Notice::success(self.messages.store_updated()));
            }
            Err(_) => notifier.notify(Notice::error(self.messages.generic_failure())),
        }
        true
    }

    /// Opens the confirmation modal; never touches the backend.
    pub fn request_delete(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.guard.request()
    }

    pub fn cancel_delete(&mut self) -> bool {
        self.guard.cancel()
    }

    pub fn begin_delete(&mut self, store_id: &StoreId) -> Option<DeleteRequest> {
        if self.submitting || !self.guard.begin_confirm() {
            return None;
        }

        self.submitting = true;
        Some(DeleteRequest {
            store_id: store_id.clone(),
        })
    }

    /// The modal closes whatever the outcome; only the notice differs.
    pub fn settle_delete(
        &mut self,
        result: Result<(), ApiError>,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) -> bool {
        if !self.submitting || !self.guard.resolve() {
            return false;
        }
        self.submitting = false;

        match result {
            Ok(()) => {
                navigator.navigate(Navigation::Refresh);
                navigator.navigate(Navigation::Push(Route::Root));
                notifier.notify(Notice::success(self.messages.store_deleted()));
            }
            Err(_) => notifier.notify(Notice::error(self.messages.delete_blocked())),
        }
        true
    }
}

impl App {
    pub fn submit_update(
        &self,
        flow: &mut SettingsFlow,
        store_id: &StoreId,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) -> Result<(), ValidationError> {
        let Some(request) = flow.begin_update(store_id)? else {
            return Ok(());
        };

        let result = self.execute_update(&request);
        flow.settle_update(result, navigator, notifier);
        Ok(())
    }

    /// Runs the delete only when the confirmation modal is open.
    pub fn confirm_delete(
        &self,
        flow: &mut SettingsFlow,
        store_id: &StoreId,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) {
        let Some(request) = flow.begin_delete(store_id) else {
            return;
        };

        let result = self.execute_delete(&request);
        flow.settle_delete(result, navigator, notifier);
    }
}
