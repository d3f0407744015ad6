use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Paragraph;
use storedesk_app::{
    App, Navigation, Navigator, Notifier, PendingRequest, RequestOutcome, SettingsFlow,
};
use storedesk_core::messages::Messages;
use storedesk_core::route::Route;
use storedesk_core::store::{Store, StoreId};
use storedesk_core::time::display_timestamp;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::keymap;
use crate::theme;
use crate::ui::confirm::{ConfirmEvent, ConfirmModal};
use crate::ui::loading::{InFlight, RequestWorker};
use crate::ui::text::{
    button_row, compact_hint, error_line, key_hint_height, key_hint_paragraph, label_value_line,
    secondary_line, wrapped_paragraph,
};

pub(crate) const API_URL_LABEL: &str = "NEXT_PUBLIC_API_URL";

pub(crate) trait SettingsOps {
    fn load_store(&self, store_id: &StoreId) -> Result<Store>;
    fn api_url(&self, store_id: &StoreId) -> String;
}

impl SettingsOps for App {
    fn load_store(&self, store_id: &StoreId) -> Result<Store> {
        App::load_store(self, store_id)
    }

    fn api_url(&self, store_id: &StoreId) -> String {
        App::api_url(self, store_id)
    }
}

/// Settings for the store named by the active route. Requests are scoped by
/// `store_id`, the route parameter, not by the loaded copy.
pub(crate) struct SettingsScreen {
    store_id: StoreId,
    flow: SettingsFlow,
    messages: Messages,
    input: Input,
    confirm: ConfirmModal,
    api_url: String,
    in_flight: Option<InFlight>,
    next_token: u64,
}

impl SettingsScreen {
    pub(crate) fn new(
        ops: &dyn SettingsOps,
        store_id: StoreId,
        messages: Messages,
    ) -> Result<Self> {
        let store = ops.load_store(&store_id)?;
        let input = Input::new(store.name.clone());
        Ok(Self {
            api_url: ops.api_url(&store_id),
            store_id,
            flow: SettingsFlow::new(store, messages),
            messages,
            input,
            confirm: ConfirmModal::new(),
            in_flight: None,
            next_token: 1,
        })
    }

    pub(crate) fn store_id(&self) -> &StoreId {
        &self.store_id
    }

    /// Re-reads the store and swaps in the server copy. The form keeps what
    /// the user typed.
    pub(crate) fn refresh(&mut self, ops: &dyn SettingsOps) -> Result<()> {
        let store = ops.load_store(&self.store_id)?;
        self.flow.replace_store(store);
        Ok(())
    }

    pub(crate) fn on_key(
        &mut self,
        key: KeyEvent,
        worker: &dyn RequestWorker,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) {
        if self.flow.confirm_open() {
            match self.confirm.on_key(key, self.flow.is_submitting()) {
                ConfirmEvent::Continue => {}
                ConfirmEvent::Close => {
                    self.flow.cancel_delete();
                }
                ConfirmEvent::Confirm => {
                    if let Some(request) = self.flow.begin_delete(&self.store_id) {
                        let request = PendingRequest::Delete(request);
                        self.dispatch(worker, request, navigator, notifier);
                    }
                }
            }
            return;
        }

        if self.flow.is_submitting() {
            return;
        }

        if keymap::is_back(key) {
            navigator.navigate(Navigation::Push(Route::Root));
            return;
        }

        if keymap::is_delete(key) {
            if self.flow.request_delete() {
                self.confirm = ConfirmModal::new();
            }
            return;
        }

        if keymap::is_confirm(key) {
            if let Ok(Some(request)) = self.flow.begin_update(&self.store_id) {
                self.dispatch(worker, PendingRequest::Update(request), navigator, notifier);
            }
            return;
        }

        if self.input.handle_event(&Event::Key(key)).is_some() {
            self.flow.set_name(self.input.value());
        }
    }

    fn dispatch(
        &mut self,
        worker: &dyn RequestWorker,
        request: PendingRequest,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) {
        let token = self.next_token;
        self.next_token = self.next_token.saturating_add(1);
        self.in_flight = Some(InFlight::start(worker, request, token));
        self.on_tick(navigator, notifier);
    }

    pub(crate) fn on_tick(&mut self, navigator: &mut dyn Navigator, notifier: &mut dyn Notifier) {
        let Some(in_flight) = &mut self.in_flight else {
            return;
        };
        let Some(outcome) = in_flight.poll() else {
            return;
        };
        self.in_flight = None;

        match outcome {
            RequestOutcome::Updated(result) => {
                self.flow.settle_update(result, navigator, notifier);
            }
            RequestOutcome::Deleted(result) => {
                self.flow.settle_delete(result, navigator, notifier);
            }
            RequestOutcome::Created(_) => {}
        }
    }

    pub(crate) fn should_drain_after_input(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let messages = self.messages;
        let key_text = compact_hint(
            area.width,
            "Type: edit name    Enter: save changes    Ctrl+D: delete store    Ctrl+N: new store    Esc: stores",
            "Enter: save    Ctrl+D: delete    Ctrl+N: new    Esc: stores",
            "Enter save | ^D delete | Esc back",
        );
        let footer_height = key_hint_height(area.width, key_text);
        let [header, form, api_panel, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(8),
                Constraint::Length(4),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        let store = self.flow.store();
        let mut header_lines = vec![
            Line::from(Span::styled(
                messages.settings_title().to_string(),
                theme::focus_prompt(),
            )),
            secondary_line(messages.settings_description()),
        ];
        let updated = store
            .updated_at
            .as_deref()
            .or(store.created_at.as_deref())
            .map(display_timestamp)
            .unwrap_or_else(|| "-".to_string());
        header_lines.push(label_value_line("Updated", updated));
        frame.render_widget(
            wrapped_paragraph(Text::from(header_lines)).block(theme::chrome(format!(
                "{}  {}",
                store.name,
                Route::Store(self.store_id.clone())
            ))),
            header,
        );

        self.render_form(frame, form);
        self.render_api_panel(frame, api_panel);

        frame.render_widget(key_hint_paragraph(key_text).block(theme::key_block()), footer);

        if self.flow.confirm_open() {
            let loading = self.in_flight.as_ref().map(|in_flight| &in_flight.loading);
            self.confirm.render(frame, messages, loading);
        }
    }

    fn render_form(&self, frame: &mut Frame<'_>, area: Rect) {
        let messages = self.messages;
        let submitting = self.flow.is_submitting();
        let block = theme::chrome(messages.name_label());
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let input_area = Rect::new(inner.x, inner.y, inner.width, 1);
        let width = input_area.width as usize;
        let scroll = self.input.visual_scroll(width);
        let input_style = if submitting {
            theme::disabled_text()
        } else {
            ratatui::style::Style::default()
        };
        frame.render_widget(
            Paragraph::new(self.input.value())
                .style(input_style)
                .scroll((0, scroll as u16)),
            input_area,
        );

        let mut lines = Vec::new();
        match self.flow.error_message() {
            Some(message) => lines.push(error_line(message)),
            None => lines.push(Line::from("")),
        }
        lines.push(Line::from(""));
        lines.push(button_row(
            &[messages.save_changes(), messages.delete_store()],
            submitting,
        ));
        if let (Some(in_flight), false) = (&self.in_flight, self.flow.confirm_open()) {
            lines.push(in_flight.loading.line(messages.please_wait()));
        }
        if inner.height > 1 {
            let rest = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
            frame.render_widget(wrapped_paragraph(Text::from(lines)), rest);
        }

        if !submitting && !self.flow.confirm_open() && width > 0 {
            let visual = self.input.visual_cursor();
            let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
            frame.set_cursor_position((input_area.x + relative as u16, input_area.y));
        }
    }

    fn render_api_panel(&self, frame: &mut Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(format!("{API_URL_LABEL} "), theme::focus_prompt()),
                theme::badge(self.messages.public_badge()),
            ]),
            Line::from(self.api_url.clone()),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(theme::chrome("API")),
            area,
        );
    }
}
