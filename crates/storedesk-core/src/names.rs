use thiserror::Error;

use crate::messages::Messages;

pub const MIN_STORE_NAME_CHARS: usize = 4;

/// Field-level rejection of a store name. Never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("store name must be at least {min} characters (got {actual})")]
    NameTooShort { min: usize, actual: usize },
}

impl ValidationError {
    pub fn localized(&self, messages: Messages) -> &'static str {
        match self {
            Self::NameTooShort { .. } => messages.name_too_short(),
        }
    }
}

/// Length is counted in characters, and the value is checked as typed.
pub fn validate_store_name(name: &str) -> Result<(), ValidationError> {
    let actual = name.chars().count();
    if actual < MIN_STORE_NAME_CHARS {
        return Err(ValidationError::NameTooShort {
            min: MIN_STORE_NAME_CHARS,
            actual,
        });
    }

    Ok(())
}
