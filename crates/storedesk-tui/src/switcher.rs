use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::style::Color;
use ratatui::text::{Line, Text};
use ratatui::widgets::{
    Paragraph, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, Table, TableState,
};
use storedesk_app::{App, Navigation, Navigator};
use storedesk_core::messages::Messages;
use storedesk_core::route::Route;
use storedesk_core::store::Store;
use storedesk_core::time::display_timestamp;

use crate::keymap;
use crate::theme;
use crate::ui::text::{
    compact_hint, focus_line, key_hint_height, key_hint_paragraph, secondary_line,
    wrapped_paragraph,
};

pub(crate) trait StoreListOps {
    fn list_stores(&self) -> Result<Vec<Store>>;
}

impl StoreListOps for App {
    fn list_stores(&self) -> Result<Vec<Store>> {
        App::list_stores(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SwitcherSignal {
    Continue,
    OpenCreate,
    Quit,
}

/// The `/` route: every store the backend returns, newest data on refresh.
#[derive(Debug)]
pub(crate) struct StoreSwitcher {
    stores: Vec<Store>,
    selected: usize,
    messages: Messages,
}

impl StoreSwitcher {
    pub(crate) fn new(ops: &dyn StoreListOps, messages: Messages) -> Result<Self> {
        let stores = ops.list_stores()?;
        Ok(Self {
            stores,
            selected: 0,
            messages,
        })
    }

    /// Placeholder shown when the list itself could not be read.
    pub(crate) fn empty(messages: Messages) -> Self {
        Self {
            stores: Vec::new(),
            selected: 0,
            messages,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub(crate) fn refresh(&mut self, ops: &dyn StoreListOps) -> Result<()> {
        let selected_id = self.selected_store().map(|store| store.id.clone());
        self.stores = ops.list_stores()?;
        self.selected = selected_id
            .and_then(|id| self.stores.iter().position(|store| store.id == id))
            .unwrap_or(0)
            .min(self.stores.len().saturating_sub(1));
        Ok(())
    }

    fn selected_store(&self) -> Option<&Store> {
        self.stores.get(self.selected)
    }

    pub(crate) fn on_key(
        &mut self,
        key: KeyEvent,
        navigator: &mut dyn Navigator,
    ) -> SwitcherSignal {
        if keymap::is_back(key) || keymap::is_quit(key) {
            return SwitcherSignal::Quit;
        }

        if keymap::is_new_store(key) {
            return SwitcherSignal::OpenCreate;
        }

        if keymap::is_refresh(key) {
            navigator.navigate(Navigation::Refresh);
            return SwitcherSignal::Continue;
        }

        if keymap::is_up(key) {
            self.selected = self.selected.saturating_sub(1);
            return SwitcherSignal::Continue;
        }

        if keymap::is_down(key) {
            if self.selected + 1 < self.stores.len() {
                self.selected += 1;
            }
            return SwitcherSignal::Continue;
        }

        if keymap::is_confirm(key)
            && let Some(store) = self.selected_store()
        {
            navigator.navigate(Navigation::Push(Route::Store(store.id.clone())));
        }

        SwitcherSignal::Continue
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let key_text = compact_hint(
            area.width,
            "Enter: open settings    n: new store    r: refresh    Up/Down or j/k: move    Esc/q: quit",
            "Enter: open    n: new    r: refresh    j/k: move    q: quit",
            "Enter open | n new | q quit",
        );
        let footer_height = key_hint_height(area.width, key_text);
        let [header, body, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(6),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        let header_text = Text::from(vec![
            Line::from("storedesk"),
            focus_line(self.messages.stores_title()),
        ]);
        frame.render_widget(
            wrapped_paragraph(header_text).block(theme::chrome(Route::Root.to_string())),
            header,
        );

        if self.stores.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(self.messages.no_stores()),
                secondary_line("n: new store"),
            ])
            .block(theme::chrome(self.messages.stores_title()));
            frame.render_widget(empty, body);
        } else {
            let header_row =
                Row::new(["Name", "Id", "Updated"]).style(theme::table_header(Color::Cyan));
            let rows = self.stores.iter().map(|store| {
                let updated = store
                    .updated_at
                    .as_deref()
                    .map(display_timestamp)
                    .unwrap_or_else(|| "-".to_string());
                Row::new(vec![store.name.clone(), store.id.to_string(), updated])
            });
            let table = Table::new(
                rows,
                [
                    Constraint::Percentage(40),
                    Constraint::Percentage(35),
                    Constraint::Percentage(25),
                ],
            )
            .header(header_row)
            .block(theme::chrome(focus_line(self.messages.stores_title())))
            .row_highlight_style(theme::table_highlight(Color::Cyan))
            .highlight_symbol(">> ");

            let mut state = TableState::new();
            state.select(Some(self.selected));
            frame.render_stateful_widget(table, body, &mut state);

            let viewport = body.height.saturating_sub(3) as usize;
            let mut scrollbar_state = ScrollbarState::new(self.stores.len())
                .position(self.selected)
                .viewport_content_length(viewport);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(None)
                    .end_symbol(None),
                body.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        frame.render_widget(key_hint_paragraph(key_text).block(theme::key_block()), footer);
    }
}
