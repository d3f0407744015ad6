use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use storedesk_app::{Notice, NoticeKind, Notifier};

use crate::theme;

/// 25 ticks at the root loop's 120ms poll is roughly three seconds.
pub(crate) const TOAST_TICKS: u16 = 25;
pub(crate) const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Toast {
    notice: Notice,
    ticks_left: u16,
}

#[derive(Debug, Default)]
pub(crate) struct ToastTray {
    toasts: VecDeque<Toast>,
}

impl ToastTray {
    pub(crate) fn on_tick(&mut self) {
        for toast in &mut self.toasts {
            toast.ticks_left = toast.ticks_left.saturating_sub(1);
        }
        self.toasts.retain(|toast| toast.ticks_left > 0);
    }

    /// Newest last.
    pub(crate) fn visible(&self) -> impl Iterator<Item = &Notice> {
        let skip = self.toasts.len().saturating_sub(MAX_VISIBLE);
        self.toasts.iter().skip(skip).map(|toast| &toast.notice)
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        let notices: Vec<&Notice> = self.visible().collect();
        if notices.is_empty() {
            return;
        }

        let area = frame.area();
        let height = (notices.len() as u16).saturating_add(2).min(area.height);
        let width = area.width.saturating_mul(3) / 5;
        let toast_area = Rect::new(
            area.x + area.width.saturating_sub(width).saturating_sub(1),
            area.y + area.height.saturating_sub(height),
            width,
            height,
        );

        let lines: Vec<Line<'static>> = notices
            .into_iter()
            .map(|notice| {
                let marker = match notice.kind {
                    NoticeKind::Success => "✓",
                    NoticeKind::Error => "✗",
                };
                Line::from(vec![
                    Span::styled(format!("{marker} "), theme::notice_style(notice.kind)),
                    Span::raw(notice.message.clone()),
                ])
            })
            .collect();

        frame.render_widget(Clear, toast_area);
        frame.render_widget(
            Paragraph::new(lines).block(theme::chrome("Notifications")),
            toast_area,
        );
    }
}

impl Notifier for ToastTray {
    fn notify(&mut self, notice: Notice) {
        self.toasts.push_back(Toast {
            notice,
            ticks_left: TOAST_TICKS,
        });
    }
}
