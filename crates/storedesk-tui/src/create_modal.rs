use crossterm::event::{Event, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::text::{Line, Text};
use ratatui::widgets::Paragraph;
use storedesk_app::{Navigator, Notifier, PendingRequest, RequestOutcome, StoreModal};
use storedesk_core::messages::Messages;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

use crate::keymap;
use crate::theme;
use crate::ui::loading::{InFlight, RequestWorker};
use crate::ui::modal::{ModalSpec, render_modal};
use crate::ui::text::{button_row, compact_hint, error_line, secondary_line};

/// Overlay around the app-wide [`StoreModal`]. Owned by the root loop so any
/// screen can open it.
pub(crate) struct CreateModal {
    modal: StoreModal,
    messages: Messages,
    input: Input,
    in_flight: Option<InFlight>,
    next_token: u64,
}

impl CreateModal {
    pub(crate) fn new(messages: Messages) -> Self {
        Self {
            modal: StoreModal::new(messages),
            messages,
            input: Input::default(),
            in_flight: None,
            next_token: 1,
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.modal.is_open()
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.modal.flow().is_submitting()
    }

    pub(crate) fn open(&mut self) {
        self.modal.open();
    }

    pub(crate) fn on_key(
        &mut self,
        key: KeyEvent,
        worker: &dyn RequestWorker,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) {
        if self.is_submitting() {
            return;
        }

        if keymap::is_back(key) {
            self.modal.close();
            return;
        }

        if keymap::is_confirm(key) {
            self.submit(worker, navigator, notifier);
            return;
        }

        if self.input.handle_event(&Event::Key(key)).is_some() {
            self.modal.flow_mut().set_name(self.input.value());
        }
    }

    fn submit(
        &mut self,
        worker: &dyn RequestWorker,
        navigator: &mut dyn Navigator,
        notifier: &mut dyn Notifier,
    ) {
        // The input may not have produced a change event yet (e.g. Enter on
        // an untouched field), so sync before validating.
        self.modal.flow_mut().set_name(self.input.value());
        let request = match self.modal.flow_mut().begin_submit() {
            Ok(Some(request)) => request,
            Ok(None) | Err(_) => return,
        };

        let token = self.next_token;
        self.next_token = self.next_token.saturating_add(1);
        self.in_flight = Some(InFlight::start(
            worker,
            PendingRequest::Create(request),
            token,
        ));
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

        if let RequestOutcome::Created(result) = outcome {
            self.modal.flow_mut().settle(result, navigator, notifier);
        }
    }

    pub(crate) fn should_drain_after_input(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        if !self.is_open() {
            return;
        }

        let messages = self.messages;
        let submitting = self.is_submitting();
        let mut lines = vec![
            secondary_line(messages.create_description()),
            Line::from(""),
            Line::from(format!("{}:", messages.name_label())),
            Line::from(""),
        ];
        match self.modal.flow().error_message() {
            Some(message) => lines.push(error_line(message)),
            None => lines.push(Line::from("")),
        }
        lines.push(Line::from(""));
        lines.push(button_row(
            &[messages.cancel(), messages.proceed()],
            submitting,
        ));
        if let Some(in_flight) = &self.in_flight {
            lines.push(in_flight.loading.line(messages.please_wait()));
        }

        let key_text = compact_hint(
            frame.area().width,
            "Type: store name    Enter: continue    Esc: cancel",
            "Enter: continue    Esc: cancel",
            "Enter ok | Esc cancel",
        );
        let rendered = render_modal(
            frame,
            ModalSpec {
                title: messages.create_title(),
                title_style: Some(theme::focus_prompt()),
                body: Text::from(lines),
                key_hint: (!submitting).then_some(key_text),
                width_pct: 64,
                height_pct: 44,
            },
        );

        let inner = rendered.body_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        if inner.width == 0 || inner.height < 4 {
            return;
        }
        let input_area = Rect::new(inner.x, inner.y + 3, inner.width, 1);
        self.render_input(frame, input_area, submitting);
    }

    fn render_input(&self, frame: &mut Frame<'_>, area: Rect, submitting: bool) {
        let width = area.width as usize;
        if self.input.value().is_empty() {
            frame.render_widget(
                Paragraph::new(self.messages.name_placeholder()).style(theme::disabled_text()),
                area,
            );
        } else {
            let scroll = self.input.visual_scroll(width);
            let style = if submitting {
                theme::disabled_text()
            } else {
                ratatui::style::Style::default()
            };
            frame.render_widget(
                Paragraph::new(self.input.value())
                    .style(style)
                    .scroll((0, scroll as u16)),
                area,
            );
        }

        if !submitting && width > 0 {
            let scroll = self.input.visual_scroll(width);
            let visual = self.input.visual_cursor();
            let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
            frame.set_cursor_position((area.x + relative as u16, area.y));
        }
    }
}
