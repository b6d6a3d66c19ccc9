//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::presentation::ui::Tab;

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Keep running.
    Continue,
    /// Leave the event loop.
    Exit,
}

/// Events produced inside the app rather than by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The home banner should advance one slide.
    CarouselTick,
}

/// Key classification shared by every screen.
pub struct EventHandler;

impl EventHandler {
    /// Ctrl+C or Ctrl+Q. Plain letters are left to text fields.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c' | 'q'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Ctrl+L signs out from any shop screen.
    #[must_use]
    pub fn is_logout_event(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Tab selected by a function key, if any.
    #[must_use]
    pub fn tab_switch(key: &KeyEvent) -> Option<Tab> {
        match key.code {
            KeyCode::F(n) => Tab::from_function_key(n),
            _ => None,
        }
    }
}
