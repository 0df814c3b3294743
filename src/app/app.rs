//! Main application controller
//!
//! Owns the entries screen, drives the one-time load and routes terminal
//! input to the screen according to the current input mode.

use crate::{
    app::{
        screens::{EntriesScreen, Notice},
        state::{AppState, NavigationAction, StateManager},
        tui::{InputEvent, Tui},
    },
    config::AppConfig,
    data::{DataProvider, Loader},
    Result, ScreenTimeError,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use std::sync::Arc;
use tracing::info;

/// TUI application controller
pub struct App {
    config: AppConfig,
    provider: Arc<dyn DataProvider>,
    state_manager: StateManager,
    entries_screen: EntriesScreen,
    notice: Option<Notice>,
    loader: Option<Loader>,
    activated: bool,
}

impl App {
    /// Create an application reading from `provider`
    pub fn new(config: AppConfig, provider: Arc<dyn DataProvider>) -> Self {
        Self {
            entries_screen: EntriesScreen::new(config.date_delimiter),
            config,
            provider,
            state_manager: StateManager::new(),
            notice: None,
            loader: None,
            activated: false,
        }
    }

    /// Start the initial load; later calls do nothing.
    ///
    /// Must be called from within a tokio runtime.
    pub fn activate(&mut self) {
        if self.activated {
            return;
        }
        self.activated = true;
        self.spawn_loader();
    }

    /// Fetch the list again, replacing it wholesale once it arrives
    pub fn reload(&mut self) {
        info!("reload requested");
        self.entries_screen.begin_reload();
        // Dropping the previous loader aborts it
        self.spawn_loader();
    }

    fn spawn_loader(&mut self) {
        self.loader = Some(Loader::spawn(
            Arc::clone(&self.provider),
            self.config.retry_config(),
        ));
    }

    /// Apply the load result if it has arrived
    pub fn poll_loader(&mut self) {
        if let Some(result) = self.loader.as_mut().and_then(Loader::poll) {
            self.loader = None;
            self.entries_screen.apply_load(result);
        }
    }

    /// True while a load is outstanding
    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    /// Run the main application loop
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        self.activate();

        while !self.state_manager.should_quit() {
            self.poll_loader();
            tui.draw(|f| self.render(f))
                .map_err(|e| ScreenTimeError::TuiError(format!("draw failed: {}", e)))?;
            if let Some(event) = tui.next_event()? {
                self.handle_event(event);
            }
            // Let the load task make progress on single-threaded runtimes
            tokio::task::yield_now().await;
        }

        info!("quitting");
        Ok(())
    }

    /// Draw the current frame
    pub fn render(&mut self, f: &mut Frame) {
        let area = f.size();
        let search_focused = *self.state_manager.current_state() == AppState::Search;
        self.entries_screen.render(f, area, search_focused);

        if let Some(notice) = &self.notice {
            notice.render(f, area);
        }
    }

    /// Route one input event
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.state_manager.current_state().clone() {
            AppState::Search => self.handle_search_key(key),
            AppState::Notice => self.handle_notice_key(key),
            AppState::Browse => {
                let action = StateManager::key_to_navigation(key);
                self.handle_navigation(action);
            }
        }
    }

    /// Any key closes the notice; only Ctrl+C still quits
    fn handle_notice_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.state_manager.quit();
            return;
        }
        self.state_manager.go_back();
        self.sync_notice();
    }

    fn handle_navigation(&mut self, action: NavigationAction) {
        if *self.state_manager.current_state() == AppState::Browse {
            match action {
                NavigationAction::Up => self.entries_screen.highlight_previous(),
                NavigationAction::Down => self.entries_screen.highlight_next(),
                NavigationAction::First => self.entries_screen.highlight_first(),
                NavigationAction::Last => self.entries_screen.highlight_last(),
                NavigationAction::Select => {
                    self.entries_screen.select_highlighted();
                }
                NavigationAction::Reload => self.reload(),
                _ => {}
            }
        }

        self.state_manager.handle_navigation(&action);
        self.sync_notice();
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.state_manager.quit(),
            KeyCode::Char('u') if ctrl => self.entries_screen.clear_query(),
            KeyCode::Char(c) if !ctrl => self.entries_screen.push_char(c),
            KeyCode::Backspace => self.entries_screen.pop_char(),
            KeyCode::Up => self.entries_screen.highlight_previous(),
            KeyCode::Down => self.entries_screen.highlight_next(),
            KeyCode::Enter => self.confirm_search(),
            KeyCode::Esc => self.state_manager.go_back(),
            _ => {}
        }
    }

    /// Search-confirm control: show the query once, if there is one
    pub fn confirm_search(&mut self) {
        if let Some(notice) = self.entries_screen.submit_search() {
            self.notice = Some(notice);
            self.state_manager.transition_to(AppState::Notice);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match self.state_manager.current_state().clone() {
            AppState::Notice => {
                if matches!(mouse.kind, MouseEventKind::Down(_)) {
                    self.state_manager.go_back();
                    self.sync_notice();
                }
            }
            AppState::Browse | AppState::Search => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    self.entries_screen.click(mouse.column, mouse.row);
                }
                MouseEventKind::ScrollDown => self.entries_screen.highlight_next(),
                MouseEventKind::ScrollUp => self.entries_screen.highlight_previous(),
                _ => {}
            },
        }
    }

    fn sync_notice(&mut self) {
        if *self.state_manager.current_state() != AppState::Notice {
            self.notice = None;
        }
    }

    pub fn screen(&self) -> &EntriesScreen {
        &self.entries_screen
    }

    pub fn screen_mut(&mut self) -> &mut EntriesScreen {
        &mut self.entries_screen
    }

    pub fn state(&self) -> &AppState {
        self.state_manager.current_state()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.state_manager.should_quit()
    }
}
