//! Form bodies posted by the rendered pages.

use std::fmt;

use api::{Note, NoteInput};
use serde::Deserialize;
use ui::NoteDraft;

/// Shown when a posted body is missing or cannot be decoded.
pub const UNREADABLE_FORM: &str = "The form could not be read. Please try again.";

/// Body of `POST /login`.
#[derive(Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "_intent")]
    pub intent: String,
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("intent", &self.intent)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginIntent {
    Login,
    Register,
}

impl LoginForm {
    /// Anything but `register` signs in.
    pub fn intent(&self) -> LoginIntent {
        match self.intent.as_str() {
            "register" => LoginIntent::Register,
            _ => LoginIntent::Login,
        }
    }
}

/// Body of the create, quick-create and edit forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: String,
    #[serde(default, rename = "_intent")]
    pub intent: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteIntent {
    Save,
    Delete,
}

impl NoteForm {
    /// Anything but `delete` saves.
    pub fn intent(&self) -> NoteIntent {
        match self.intent.as_str() {
            "delete" => NoteIntent::Delete,
            _ => NoteIntent::Save,
        }
    }

    /// Normalized note to send to the service.
    pub fn to_input(&self) -> NoteInput {
        NoteInput {
            title: normalize_title(&self.title),
            content: self.content.clone(),
            tags: parse_tags(&self.tags),
        }
    }

    /// The values as submitted, to re-fill the form after a failure.
    pub fn draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Trimmed title, `"Untitled"` when blank.
pub fn normalize_title(raw: &str) -> String {
    match raw.trim() {
        "" => Note::UNTITLED.to_string(),
        title => title.to_string(),
    }
}

/// Comma-separated tags, trimmed, empties dropped, order and duplicates kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("work, personal ,, "), vec!["work", "personal"]);
        assert_eq!(parse_tags("b,a,b"), vec!["b", "a", "b"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("   "), "Untitled");
        assert_eq!(normalize_title("  Plans "), "Plans");
    }

    #[test]
    fn test_note_form_keeps_content_verbatim() {
        let form = NoteForm {
            title: "".into(),
            content: "  indented\n".into(),
            tags: "x, y".into(),
            intent: String::new(),
        };
        let input = form.to_input();
        assert_eq!(input.title, "Untitled");
        assert_eq!(input.content, "  indented\n");
        assert_eq!(input.tags, vec!["x", "y"]);
        assert_eq!(form.intent(), NoteIntent::Save);
        assert_eq!(form.draft().title, "");
    }

    #[test]
    fn test_intents() {
        let form = LoginForm {
            intent: "register".into(),
            ..LoginForm::default()
        };
        assert_eq!(form.intent(), LoginIntent::Register);
        assert_eq!(LoginForm::default().intent(), LoginIntent::Login);

        let form = NoteForm {
            intent: "delete".into(),
            ..NoteForm::default()
        };
        assert_eq!(form.intent(), NoteIntent::Delete);
    }

    #[test]
    fn test_login_form_debug_hides_password() {
        let form = LoginForm {
            email: "ada@example.com".into(),
            password: "hunter2".into(),
            intent: "login".into(),
        };
        assert!(!format!("{form:?}").contains("hunter2"));
    }
}
