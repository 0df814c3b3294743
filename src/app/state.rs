//! Application state management
//!
//! Handles input-mode transitions, navigation logic, and keyboard event
//! processing for the TUI application.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input modes of the entries screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppState {
    /// Moving through the weekly table
    #[default]
    Browse,
    /// Typing into the search box
    Search,
    /// Search-confirm notice is shown over the screen
    Notice,
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Move highlight up (arrow up, k)
    Up,
    /// Move highlight down (arrow down, j)
    Down,
    /// Jump to the first row (Home, g)
    First,
    /// Jump to the last row (End, G)
    Last,
    /// Select the highlighted row (Enter, Space)
    Select,
    /// Focus the search box (/)
    Search,
    /// Fetch the entry list again (r)
    Reload,
    /// Go back/cancel (Esc)
    Back,
    /// Quit application (q, Q, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug)]
pub struct StateManager {
    current_state: AppState,
    previous_state: Option<AppState>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager in browse mode
    pub fn new() -> Self {
        Self {
            current_state: AppState::Browse,
            previous_state: None,
            should_quit: false,
        }
    }

    /// Get the current application state
    pub fn current_state(&self) -> &AppState {
        &self.current_state
    }

    /// Get the previous state if available
    pub fn previous_state(&self) -> Option<&AppState> {
        self.previous_state.as_ref()
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: AppState) {
        if new_state != self.current_state {
            self.previous_state = Some(self.current_state.clone());
            self.current_state = new_state;
        }
    }

    /// Go back to the previous state if available, otherwise browse
    pub fn go_back(&mut self) {
        self.current_state = self.previous_state.take().unwrap_or_default();
    }

    /// Apply mode changes implied by a navigation action
    pub fn handle_navigation(&mut self, action: &NavigationAction) {
        match (&self.current_state, action) {
            (_, NavigationAction::Quit) => self.should_quit = true,
            (AppState::Notice, _) => self.go_back(),
            (AppState::Browse, NavigationAction::Search) => self.transition_to(AppState::Search),
            (AppState::Search, NavigationAction::Back) => self.go_back(),
            // Row movement and selection are handled by the entries screen
            _ => {}
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        match key.code {
            // Quit keys
            KeyCode::Char('q') | KeyCode::Char('Q') => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            KeyCode::Up | KeyCode::Char('k') => NavigationAction::Up,
            KeyCode::Down | KeyCode::Char('j') => NavigationAction::Down,
            KeyCode::Home | KeyCode::Char('g') => NavigationAction::First,
            KeyCode::End | KeyCode::Char('G') => NavigationAction::Last,

            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,
            KeyCode::Char('/') => NavigationAction::Search,
            KeyCode::Char('r') | KeyCode::Char('R') => NavigationAction::Reload,
            KeyCode::Esc => NavigationAction::Back,

            _ => NavigationAction::None,
        }
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
