use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::store::StoreId;

/// Location inside the console: the store switcher at `/`, or a store's
/// workspace at `/{storeId}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Store(StoreId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route must start with '/': {path}")]
    MissingLeadingSlash { path: String },
    #[error("route has unsupported nested segments: {path}")]
    Nested { path: String },
    #[error("store id may only contain letters, digits, '-', '_', '.' or '~': {id}")]
    InvalidStoreId { id: String },
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let Some(rest) = path.trim().strip_prefix('/') else {
            return Err(RouteError::MissingLeadingSlash {
                path: path.to_string(),
            });
        };

        let rest = rest.trim_end_matches('/');
        if rest.is_empty() {
            return Ok(Self::Root);
        }

        if rest.contains('/') {
            return Err(RouteError::Nested {
                path: path.to_string(),
            });
        }

        // The id is spliced into API paths as-is.
        if !rest.chars().all(is_unreserved) {
            return Err(RouteError::InvalidStoreId {
                id: rest.to_string(),
            });
        }

        Ok(Self::Store(StoreId::new(rest)))
    }

    pub fn store_id(&self) -> Option<&StoreId> {
        match self {
            Self::Root => None,
            Self::Store(id) => Some(id),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

fn is_unreserved(character: char) -> bool {
    character.is_ascii_alphanumeric() || matches!(character, '-' | '_' | '.' | '~')
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("/"),
            Self::Store(id) => write!(f, "/{id}"),
        }
    }
}
