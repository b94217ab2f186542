// Contact form overlay state
//
// Four text fields and a send control. The overlay absorbs all key input
// while open; Enter advances through the single-line fields, inserts a
// newline in the message, and submits from the send control.

use crate::behavior::contact::ContactForm;
use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    Send,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
            Field::Send => "Send",
        }
    }

    fn next(&self) -> Self {
        match self {
            Field::Name => Field::Email,
            Field::Email => Field::Subject,
            Field::Subject => Field::Message,
            Field::Message => Field::Send,
            Field::Send => Field::Name,
        }
    }

    fn prev(&self) -> Self {
        match self {
            Field::Name => Field::Send,
            Field::Email => Field::Name,
            Field::Subject => Field::Email,
            Field::Message => Field::Subject,
            Field::Send => Field::Message,
        }
    }
}

impl Default for Field {
    fn default() -> Self {
        Field::Name
    }
}

/// What the form wants the app to do after a key
#[derive(Debug, PartialEq, Eq)]
pub enum FormAction {
    None,
    /// Compose the mailto URI and hand off to the mail client
    Submit,
    Close,
}

#[derive(Debug, Default)]
pub struct FormState {
    pub form: ContactForm,
    pub focus: Field,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> FormAction {
        match key {
            KeyCode::Esc => FormAction::Close,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                FormAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                FormAction::None
            }
            KeyCode::Enter => match self.focus {
                Field::Message => {
                    self.form.message.push('\n');
                    FormAction::None
                }
                Field::Send => FormAction::Submit,
                _ => {
                    self.focus = self.focus.next();
                    FormAction::None
                }
            },
            KeyCode::Backspace => {
                if let Some(field) = self.field_mut() {
                    field.pop();
                }
                FormAction::None
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.field_mut() {
                    field.push(c);
                }
                FormAction::None
            }
            _ => FormAction::None,
        }
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Name => Some(&mut self.form.name),
            Field::Email => Some(&mut self.form.email),
            Field::Subject => Some(&mut self.form.subject),
            Field::Message => Some(&mut self.form.message),
            Field::Send => None,
        }
    }

    /// Field value for rendering
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.form.name,
            Field::Email => &self.form.email,
            Field::Subject => &self.form.subject,
            Field::Message => &self.form.message,
            Field::Send => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(state: &mut FormState, text: &str) {
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut state = FormState::new();
        type_str(&mut state, "Ada");
        state.handle_key(KeyCode::Tab);
        type_str(&mut state, "ada@example.com");

        assert_eq!(state.form.name, "Ada");
        assert_eq!(state.form.email, "ada@example.com");
        assert_eq!(state.form.subject, "");
    }

    #[test]
    fn test_enter_advances_then_submits_from_send() {
        let mut state = FormState::new();
        assert_eq!(state.handle_key(KeyCode::Enter), FormAction::None);
        assert_eq!(state.focus, Field::Email);
        state.handle_key(KeyCode::Enter);
        state.handle_key(KeyCode::Enter);
        assert_eq!(state.focus, Field::Message);

        // Enter is a newline inside the message
        type_str(&mut state, "hi");
        state.handle_key(KeyCode::Enter);
        type_str(&mut state, "there");
        assert_eq!(state.form.message, "hi\nthere");

        state.handle_key(KeyCode::Tab);
        assert_eq!(state.focus, Field::Send);
        assert_eq!(state.handle_key(KeyCode::Enter), FormAction::Submit);
    }

    #[test]
    fn test_backspace_edits_focused_field_only() {
        let mut state = FormState::new();
        type_str(&mut state, "Adaa");
        state.handle_key(KeyCode::Backspace);
        assert_eq!(state.form.name, "Ada");

        // On the send control there is nothing to edit
        state.focus = Field::Send;
        state.handle_key(KeyCode::Backspace);
        assert_eq!(state.form.name, "Ada");
    }

    #[test]
    fn test_focus_wraps_both_directions() {
        let mut state = FormState::new();
        state.handle_key(KeyCode::BackTab);
        assert_eq!(state.focus, Field::Send);
        state.handle_key(KeyCode::Tab);
        assert_eq!(state.focus, Field::Name);
    }

    #[test]
    fn test_esc_closes_without_clearing() {
        let mut state = FormState::new();
        type_str(&mut state, "Ada");
        assert_eq!(state.handle_key(KeyCode::Esc), FormAction::Close);
        assert_eq!(state.form.name, "Ada");
    }
}
