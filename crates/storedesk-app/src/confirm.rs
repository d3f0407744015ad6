/// Guard in front of a destructive action.
///
/// `Closed -> Open` on request, `Open -> Closed` on cancel,
/// `Open -> Confirming` when the action is dispatched, and
/// `Confirming -> Closed` once it resolves, whatever the outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuardState {
    #[default]
    Closed,
    Open,
    Confirming,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfirmGuard {
    state: GuardState,
}

impl ConfirmGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, GuardState::Closed)
    }

    /// Close and confirm controls are disabled while loading.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, GuardState::Confirming)
    }

    pub fn request(&mut self) -> bool {
        if self.state != GuardState::Closed {
            return false;
        }
        self.state = GuardState::Open;
        true
    }

    pub fn cancel(&mut self) -> bool {
        if self.state != GuardState::Open {
            return false;
        }
        self.state = GuardState::Closed;
        true
    }

    pub fn begin_confirm(&mut self) -> bool {
        if self.state != GuardState::Open {
            return false;
        }
        self.state = GuardState::Confirming;
        true
    }

    pub fn resolve(&mut self) -> bool {
        if self.state != GuardState::Confirming {
            return false;
        }
        self.state = GuardState::Closed;
        true
    }
}
