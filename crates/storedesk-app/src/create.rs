use storedesk_core::api::ApiError;
use storedesk_core::messages::Messages;
use storedesk_core::names::{ValidationError, validate_store_name};
use storedesk_core::route::Route;
use storedesk_core::store::{StoreId, StorePayload};

use crate::App;
use crate::effects::{Navigation, Navigator, Notice, Notifier};
use crate::request::CreateRequest;

/// Form state behind the "create store" modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStoreFlow {
    name: String,
    error: Option<ValidationError>,
    submitting: bool,
    messages: Messages,
}

impl CreateStoreFlow {
    pub fn new(messages: Messages) -> Self {
        Self {
            name: String::new(),
            error: None,
            submitting: false,
            messages,
        }
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

    /// Ignored while a request is in flight; controls are disabled then.
    pub fn set_name(&mut self, value: impl Into<String>) {
        if self.submitting {
            return;
        }
        self.name = value.into();
        self.error = validate_store_name(&self.name).err();
    }

    /// Validates and commits to a create call. `Ok(None)` means a request is
    /// already in flight.
    pub fn begin_submit(&mut self) -> Result<Option<CreateRequest>, ValidationError> {
        if self.submitting {
            return Ok(None);
        }

        if let Err(error) = validate_store_name(&self.name) {
            self.error = Some(error);
            return Err(error);
        }

        self.error = None;
        self.submitting = true;
        Ok(Some(CreateRequest {
            payload: StorePayload::new(self.name.clone()),
        }))
    }

    /// Returns false when no request was in flight.
    pub fn settle(
        &mut self,
        result: Result<StoreId, ApiError>,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) -> bool {
        if !self.submitting {
            return false;
        }
        self.submitting = false;

        match result {
            Ok(id) => navigator.navigate(Navigation::Assign(Route::Store(id))),
            Err(_) => notifier.notify(Notice::error(self.messages.generic_failure())),
        }
        true
    }
}

/// The single, application-wide creation modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreModal {
    open: bool,
    flow: CreateStoreFlow,
}

impl StoreModal {
    pub fn new(messages: Messages) -> Self {
        Self {
            open: false,
            flow: CreateStoreFlow::new(messages),
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Refused while the create call is in flight.
    pub fn close(&mut self) -> bool {
        if self.flow.is_submitting() {
            return false;
        }
        self.open = false;
        true
    }

    pub fn flow(&self) -> &CreateStoreFlow {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut CreateStoreFlow {
        &mut self.flow
    }
}

impl App {
    /// Blocking create: validate, call the backend, settle.
    pub fn submit_create(
        &self,
        flow: &mut CreateStoreFlow,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) -> Result<(), ValidationError> {
        let Some(request) = flow.begin_submit()? else {
            return Ok(());
        };

        let result = self.execute_create(&request);
        flow.settle(result, navigator, notifier);
        Ok(())
    }
}
