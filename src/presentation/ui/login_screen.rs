//! Login screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::domain::entities::Credentials;
use crate::presentation::widgets::TextInput;

/// Phase of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    /// Waiting for input.
    Input,
    /// Request in flight; keys are ignored.
    Validating,
    /// Last attempt failed.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Email,
    Password,
}

/// Login screen UI.
pub struct LoginScreen {
    email_input: TextInput,
    password_input: TextInput,
    field: LoginField,
    state: LoginState,
    error_message: Option<String>,
}

/// What the app should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAction {
    /// Nothing.
    None,
    /// Send the entered credentials.
    Submit,
}

impl LoginScreen {
    /// Empty form with the email field focused.
    #[must_use]
    pub fn new() -> Self {
        let mut email_input = TextInput::new(" Email ").placeholder("Enter your email");
        email_input.set_focused(true);
        let password_input = TextInput::new(" Password ")
            .password()
            .placeholder("Enter your password");

        Self {
            email_input,
            password_input,
            field: LoginField::Email,
            state: LoginState::Input,
            error_message: None,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn state(&self) -> LoginState {
        self.state
    }

    /// Entered credentials, when both fields are filled.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials> {
        let email = self.email_input.value().trim();
        let password = self.password_input.value();
        if email.is_empty() || password.is_empty() {
            None
        } else {
            Some(Credentials::new(email, password))
        }
    }

    /// Marks a login or session check in flight.
    pub fn set_validating(&mut self) {
        self.state = LoginState::Validating;
        self.error_message = None;
    }

    /// Shows `message` under the form.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = LoginState::Error;
        self.error_message = Some(message.into());
    }

    /// Back to input, keeping the email and clearing the password.
    pub fn reset(&mut self) {
        self.state = LoginState::Input;
        self.error_message = None;
        self.password_input.clear();
    }

    fn toggle_field(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
        self.email_input.set_focused(self.field == LoginField::Email);
        self.password_input.set_focused(self.field == LoginField::Password);
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        match self.state {
            LoginState::Validating => return LoginAction::None,
            LoginState::Error => self.reset(),
            LoginState::Input => {}
        }

        match key.code {
            KeyCode::Enter => {
                if self.credentials().is_some() {
                    return LoginAction::Submit;
                }
                if self.field == LoginField::Email {
                    self.toggle_field();
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => self.toggle_field(),
            _ => {
                let input = match self.field {
                    LoginField::Email => &mut self.email_input,
                    LoginField::Password => &mut self.password_input,
                };
                input.handle_key(key);
            }
        }

        LoginAction::None
    }

    fn render_inner(&self, area: Rect, buf: &mut Buffer) {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(13),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ]);
        let [_, content_area, _] = horizontal.areas(center);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Handy Helpers ");

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let inner_layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ]);
        let areas = inner_layout.areas::<6>(inner);

        Paragraph::new("Sign in to your account")
            .style(Style::default().fg(Color::White))
            .render(areas[0], buf);

        (&self.email_input).render(areas[2], buf);
        (&self.password_input).render(areas[3], buf);

        let status = match self.state {
            LoginState::Input => Line::from(vec![
                Span::styled("Enter: Login", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Tab: Next field", Style::default().fg(Color::DarkGray)),
                Span::raw(" | "),
                Span::styled("Ctrl+C: Quit", Style::default().fg(Color::DarkGray)),
            ]),
            LoginState::Validating => Line::from(Span::styled(
                "Signing in...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            LoginState::Error => {
                let msg = self.error_message.as_deref().unwrap_or("Unknown error");
                Line::from(Span::styled(
                    format!("Error: {msg}"),
                    Style::default().fg(Color::Red),
                ))
            }
        };
        Paragraph::new(status).render(areas[5], buf);
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::ui::test_support::key;

    fn type_str(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_initial_state() {
        let screen = LoginScreen::new();
        assert_eq!(screen.state(), LoginState::Input);
        assert!(screen.credentials().is_none());
    }

    #[test]
    fn test_enter_moves_to_password_then_submits() {
        let mut screen = LoginScreen::new();
        type_str(&mut screen, "ana@example.com");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::None);

        type_str(&mut screen, "hunter2");
        assert_eq!(screen.handle_key(key(KeyCode::Enter)), LoginAction::Submit);
        assert_eq!(
            screen.credentials(),
            Some(Credentials::new("ana@example.com", "hunter2"))
        );
    }

    #[test]
    fn test_tab_switches_field() {
        let mut screen = LoginScreen::new();
        screen.handle_key(key(KeyCode::Tab));
        type_str(&mut screen, "secret");
        screen.handle_key(key(KeyCode::Tab));
        type_str(&mut screen, "a@b.c");

        assert_eq!(screen.credentials(), Some(Credentials::new("a@b.c", "secret")));
    }

    #[test]
    fn test_validating_ignores_keys() {
        let mut screen = LoginScreen::new();
        screen.set_validating();
        type_str(&mut screen, "abc");
        assert!(screen.credentials().is_none());
    }

    #[test]
    fn test_error_resets_password_on_next_key() {
        let mut screen = LoginScreen::new();
        type_str(&mut screen, "a@b.c");
        screen.handle_key(key(KeyCode::Tab));
        type_str(&mut screen, "wrong");
        screen.set_error("Incorrect password! Please try again");

        screen.handle_key(key(KeyCode::Char('x')));

        assert_eq!(screen.state(), LoginState::Input);
        assert_eq!(screen.credentials(), Some(Credentials::new("a@b.c", "x")));
    }
}
