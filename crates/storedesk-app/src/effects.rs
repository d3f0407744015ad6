use std::fmt;

use storedesk_core::route::Route;

/// What a settled request asks of the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Full navigation: every screen is dropped and rebuilt from the route.
    Assign(Route),
    /// Soft navigation to another route.
    Push(Route),
    /// Re-run the read that populated the current view.
    Refresh,
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assign(route) => write!(f, "kind=assign route={route}"),
            Self::Push(route) => write!(f, "kind=push route={route}"),
            Self::Refresh => f.write_str("kind=refresh"),
        }
    }
}

pub trait Navigator {
    fn navigate(&mut self, navigation: Navigation);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

impl Navigator for Vec<Navigation> {
    fn navigate(&mut self, navigation: Navigation) {
        self.push(navigation);
    }
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use storedesk_core::route::Route;
    use storedesk_core::store::StoreId;

    use super::Navigation;

    #[test]
    fn navigation_display_is_log_friendly() {
        assert_eq!(
            Navigation::Assign(Route::Store(StoreId::new("abc123"))).to_string(),
            "kind=assign route=/abc123"
        );
        assert_eq!(
            Navigation::Push(Route::Root).to_string(),
            "kind=push route=/"
        );
        assert_eq!(Navigation::Refresh.to_string(), "kind=refresh");
    }
}
