mod create_modal;
mod keymap;
mod router;
mod settings_screen;
mod switcher;
mod theme;
mod ui;

use std::io::{Stdout, stdout};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use create_modal::CreateModal;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use router::RouteChange;
use settings_screen::{SettingsOps, SettingsScreen};
use storedesk_app::{App, Navigation, Notice, Notifier, StoreLoadError};
use storedesk_core::messages::Messages;
use storedesk_core::route::Route;
use switcher::{StoreListOps, StoreSwitcher, SwitcherSignal};

use crate::ui::loading::{RequestWorker, ThreadWorker};
use crate::ui::modal::render_error_modal;
use crate::ui::toast::ToastTray;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiExit {
    Completed,
    Canceled,
}

pub(crate) struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    pub(crate) fn enter() -> Result<Self> {
        let terminal = enter_with_ops(
            || enable_raw_mode().context("failed to enable raw mode"),
            || {
                let mut out = stdout();
                execute!(out, EnterAlternateScreen, Hide)
                    .context("failed to enter alternate screen")
            },
            || {
                let backend = CrosstermBackend::new(stdout());
                Terminal::new(backend).context("failed to create terminal backend")
            },
            || {
                let mut out = stdout();
                execute!(out, Show, LeaveAlternateScreen)
                    .context("failed to restore terminal screen during rollback")
            },
            || disable_raw_mode().context("failed to disable raw mode during rollback"),
        )?;
        Ok(Self { terminal })
    }

    pub(crate) fn draw<F>(&mut self, draw_fn: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame<'_>),
    {
        self.terminal
            .draw(draw_fn)
            .context("failed to render terminal")?;
        Ok(())
    }

    pub(crate) fn autoresize(&mut self) -> Result<()> {
        self.terminal
            .autoresize()
            .context("failed to autoresize terminal")?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(self.terminal.backend_mut(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn enter_with_ops<T, EnableRawMode, EnterAltScreen, CreateTerminal, LeaveAltScreen, DisableRawMode>(
    mut enable_raw_mode_op: EnableRawMode,
    mut enter_alt_screen_op: EnterAltScreen,
    mut create_terminal_op: CreateTerminal,
    mut leave_alt_screen_op: LeaveAltScreen,
    mut disable_raw_mode_op: DisableRawMode,
) -> Result<T>
where
    EnableRawMode: FnMut() -> Result<()>,
    EnterAltScreen: FnMut() -> Result<()>,
    CreateTerminal: FnMut() -> Result<T>,
    LeaveAltScreen: FnMut() -> Result<()>,
    DisableRawMode: FnMut() -> Result<()>,
{
    enable_raw_mode_op()?;

    if let Err(error) = enter_alt_screen_op() {
        return Err(failure_with_rollback(
            error,
            false,
            &mut leave_alt_screen_op,
            &mut disable_raw_mode_op,
        ));
    }

    match create_terminal_op() {
        Ok(terminal) => Ok(terminal),
        Err(error) => Err(failure_with_rollback(
            error,
            true,
            &mut leave_alt_screen_op,
            &mut disable_raw_mode_op,
        )),
    }
}

/// Raw mode is always on by the time a later step fails, so only the
/// alternate screen is conditional.
fn failure_with_rollback<LeaveAltScreen, DisableRawMode>(
    setup_error: anyhow::Error,
    alt_screen_entered: bool,
    leave_alt_screen_op: &mut LeaveAltScreen,
    disable_raw_mode_op: &mut DisableRawMode,
) -> anyhow::Error
where
    LeaveAltScreen: FnMut() -> Result<()>,
    DisableRawMode: FnMut() -> Result<()>,
{
    let mut cleanup_failures = Vec::<String>::new();

    if alt_screen_entered && let Err(error) = leave_alt_screen_op() {
        cleanup_failures.push(format!(
            "failed to restore alternate screen during rollback: {error:#}"
        ));
    }

    if let Err(error) = disable_raw_mode_op() {
        cleanup_failures.push(format!(
            "failed to disable raw mode during rollback: {error:#}"
        ));
    }

    if cleanup_failures.is_empty() {
        setup_error
    } else {
        anyhow!(
            "{setup_error:#}\nterminal rollback cleanup failed: {}",
            cleanup_failures.join("\n")
        )
    }
}

pub(crate) fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Everything the root loop reads from the backend.
pub(crate) trait RootOps: StoreListOps + SettingsOps {
    fn record_navigation(&self, navigation: &Navigation);
}

impl RootOps for App {
    fn record_navigation(&self, navigation: &Navigation) {
        App::record_navigation(self, navigation);
    }
}

enum ActiveScreen {
    Switcher(Box<StoreSwitcher>),
    Settings(Box<SettingsScreen>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrainReason {
    Timeout,
    AfterInput,
}

struct RootState {
    route: Route,
    active: ActiveScreen,
    create: CreateModal,
    toasts: ToastTray,
    global_error: Option<String>,
    messages: Messages,
}

impl RootState {
    fn new<O: RootOps>(ops: &O, messages: Messages, start: Route) -> Self {
        let mut state = Self {
            route: Route::Root,
            active: ActiveScreen::Switcher(Box::new(StoreSwitcher::empty(messages))),
            create: CreateModal::new(messages),
            toasts: ToastTray::default(),
            global_error: None,
            messages,
        };
        state.open_route(ops, start);
        state
    }

    fn open_route<O: RootOps>(&mut self, ops: &O, route: Route) {
        let Route::Store(store_id) = route else {
            self.open_root(ops);
            return;
        };

        match SettingsScreen::new(ops, store_id.clone(), self.messages) {
            Ok(screen) => {
                self.active = ActiveScreen::Settings(Box::new(screen));
                self.route = Route::Store(store_id);
            }
            Err(error) => {
                self.report_load_error(error);
                self.open_root(ops);
            }
        }
    }

    fn open_root<O: RootOps>(&mut self, ops: &O) {
        self.route = Route::Root;
        match StoreSwitcher::new(ops, self.messages) {
            Ok(switcher) => {
                // First run: nothing to switch to, so go straight to creation.
                if switcher.is_empty() {
                    self.create.open();
                }
                self.active = ActiveScreen::Switcher(Box::new(switcher));
            }
            Err(error) => {
                self.global_error = Some(format!("{error:#}"));
                let switcher = StoreSwitcher::empty(self.messages);
                self.active = ActiveScreen::Switcher(Box::new(switcher));
            }
        }
    }

    /// A missing store is a routine outcome and becomes a toast; anything
    /// else is shown in the error modal.
    fn report_load_error(&mut self, error: anyhow::Error) {
        if matches!(
            error.downcast_ref::<StoreLoadError>(),
            Some(StoreLoadError::NotFound { .. })
        ) {
            self.toasts
                .notify(Notice::error(self.messages.store_not_found()));
        } else {
            self.global_error = Some(format!("{error:#}"));
        }
    }

    fn reload<O: RootOps>(&mut self, ops: &O) {
        let result = match &mut self.active {
            ActiveScreen::Switcher(switcher) => {
                switcher.refresh(ops).map(|()| switcher.is_empty())
            }
            ActiveScreen::Settings(screen) => screen.refresh(ops).map(|()| false),
        };

        match result {
            Ok(true) => self.create.open(),
            Ok(false) => {}
            Err(error) => {
                let on_store = matches!(self.active, ActiveScreen::Settings(_));
                self.report_load_error(error);
                if on_store {
                    self.open_root(ops);
                }
            }
        }
    }

    fn apply<O: RootOps>(&mut self, ops: &O, navigations: Vec<Navigation>) {
        for navigation in &navigations {
            ops.record_navigation(navigation);
        }

        match router::plan(&self.route, &navigations) {
            RouteChange::Stay => {}
            RouteChange::Reload => self.reload(ops),
            RouteChange::Switch(route) => self.open_route(ops, route),
            RouteChange::Rebuild(route) => {
                self.create = CreateModal::new(self.messages);
                self.open_route(ops, route);
            }
        }
    }

    fn on_key<O: RootOps>(
        &mut self,
        key: KeyEvent,
        ops: &O,
        worker: &dyn RequestWorker,
    ) -> Option<UiExit> {
        if is_ctrl_c(key) {
            return Some(UiExit::Canceled);
        }

        if self.global_error.is_some() {
            if keymap::is_confirm(key) || keymap::is_back(key) {
                self.global_error = None;
            }
            return None;
        }

        let mut navigations: Vec<Navigation> = Vec::new();
        if self.create.is_open() {
            self.create
                .on_key(key, worker, &mut navigations, &mut self.toasts);
            self.apply(ops, navigations);
            return None;
        }

        if keymap::is_new_store_anywhere(key) {
            self.create.open();
            return None;
        }

        match &mut self.active {
            ActiveScreen::Switcher(switcher) => match switcher.on_key(key, &mut navigations) {
                SwitcherSignal::Continue => {}
                SwitcherSignal::OpenCreate => self.create.open(),
                SwitcherSignal::Quit => return Some(UiExit::Completed),
            },
            ActiveScreen::Settings(screen) => {
                screen.on_key(key, worker, &mut navigations, &mut self.toasts);
            }
        }

        self.apply(ops, navigations);
        None
    }

    fn should_drain_after_input(&self) -> bool {
        let settings_pending = match &self.active {
            ActiveScreen::Settings(screen) => screen.should_drain_after_input(),
            ActiveScreen::Switcher(_) => false,
        };
        self.create.should_drain_after_input() || settings_pending
    }

    /// Settles finished requests. Toasts only age on timeouts so typing does
    /// not hurry them away.
    fn drain<O: RootOps>(&mut self, ops: &O, reason: DrainReason) -> bool {
        if reason == DrainReason::AfterInput && !self.should_drain_after_input() {
            return false;
        }
        if reason == DrainReason::Timeout {
            self.toasts.on_tick();
        }

        let mut navigations: Vec<Navigation> = Vec::new();
        self.create.on_tick(&mut navigations, &mut self.toasts);
        if let ActiveScreen::Settings(screen) = &mut self.active {
            screen.on_tick(&mut navigations, &mut self.toasts);
        }
        self.apply(ops, navigations);
        true
    }

    fn render(&self, frame: &mut ratatui::Frame<'_>) {
        match &self.active {
            ActiveScreen::Switcher(switcher) => switcher.render(frame),
            ActiveScreen::Settings(screen) => screen.render(frame),
        }
        self.create.render(frame);
        self.toasts.render(frame);

        if let Some(message) = self.global_error.as_deref() {
            render_global_error(frame, message);
        }
    }
}

pub fn run_root(app: &App, start: Route) -> Result<UiExit> {
    let worker = ThreadWorker::new(app.clone());
    let mut root = RootState::new(app, app.messages(), start);
    let mut session = TerminalSession::enter()?;
    const TICK_RATE: Duration = Duration::from_millis(120);

    loop {
        session.draw(|frame| root.render(frame))?;

        let has_event = event::poll(TICK_RATE).context("failed to poll terminal event")?;
        if !has_event {
            root.drain(app, DrainReason::Timeout);
            continue;
        }

        let event = event::read().context("failed to read terminal event")?;
        let key = match event {
            Event::Resize(_, _) => {
                session.autoresize()?;
                continue;
            }
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press) => key,
            _ => continue,
        };

        if let Some(exit) = root.on_key(key, app, &worker) {
            return Ok(exit);
        }
        root.drain(app, DrainReason::AfterInput);
    }
}

fn render_global_error(frame: &mut ratatui::Frame<'_>, message: &str) {
    let text = format!("Operation failed.\n\n{message}");
    render_error_modal(frame, &text, 80, 56, "Enter/Esc: continue");
}

pub(crate) fn centered_rect(
    percent_x: u16,
    percent_y: u16,
    area: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let pct_x = percent_x.min(100);
    let pct_y = percent_y.min(100);

    let [_, vertical, _] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - pct_y) / 2),
            Constraint::Percentage(pct_y),
            Constraint::Percentage((100 - pct_y) / 2),
        ])
        .areas(area);
    let [_, horizontal, _] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - pct_x) / 2),
            Constraint::Percentage(pct_x),
            Constraint::Percentage((100 - pct_x) / 2),
        ])
        .areas(vertical);
    horizontal
}
