use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::text::{Line, Text};
use storedesk_core::messages::Messages;

use crate::keymap;
use crate::theme;
use crate::ui::loading::LoadingState;
use crate::ui::modal::{ModalSpec, render_modal};
use crate::ui::text::button_row;

/// Generic "are you sure" modal. Knows nothing about what is being
/// confirmed; the owner decides what `Confirm` and `Close` mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ConfirmModal {
    pub(crate) confirm_selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfirmEvent {
    Continue,
    Close,
    Confirm,
}

impl ConfirmModal {
    pub(crate) fn new() -> Self {
        Self {
            confirm_selected: false,
        }
    }

    /// While `loading`, every key is swallowed so neither button can fire.
    pub(crate) fn on_key(&mut self, key: KeyEvent, loading: bool) -> ConfirmEvent {
        if loading {
            return ConfirmEvent::Continue;
        }

        if keymap::is_back(key) {
            return ConfirmEvent::Close;
        }

        if keymap::is_toggle(key) {
            self.confirm_selected = !self.confirm_selected;
            return ConfirmEvent::Continue;
        }

        if keymap::is_confirm(key) {
            if self.confirm_selected {
                ConfirmEvent::Confirm
            } else {
                ConfirmEvent::Close
            }
        } else {
            ConfirmEvent::Continue
        }
    }

    pub(crate) fn render(
        &self,
        frame: &mut Frame<'_>,
        messages: Messages,
        loading: Option<&LoadingState>,
    ) {
        let mut lines = vec![
            Line::from(messages.confirm_description()),
            Line::from(""),
        ];
        let (cancel, proceed) = if self.confirm_selected {
            (messages.cancel().to_string(), format!("> {}", messages.proceed()))
        } else {
            (format!("> {}", messages.cancel()), messages.proceed().to_string())
        };
        lines.push(button_row(&[&cancel, &proceed], loading.is_some()));
        if let Some(loading) = loading {
            lines.push(Line::from(""));
            lines.push(loading.line(messages.please_wait()));
        }

        let key_hint = if loading.is_some() {
            ""
        } else {
            "Tab/Space: switch    Enter: choose    Esc: cancel"
        };
        render_modal(
            frame,
            ModalSpec {
                title: messages.confirm_title(),
                title_style: Some(theme::error_prompt()),
                body: Text::from(lines),
                key_hint: (!key_hint.is_empty()).then_some(key_hint),
                width_pct: 64,
                height_pct: 36,
            },
        );
    }
}
