//! # Page models
//!
//! Everything a page shows is decided by a request handler before rendering
//! starts. Handlers build one of these values and [`crate::render_page`] turns
//! it into a document; components never fetch anything on their own.

use api::{AuthUser, Note, NoteQuery};

/// A fully resolved page, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Landing,
    Login(LoginView),
    NoteList(NoteListView),
    NewNote(NewNoteView),
    NoteDetail(NoteDetailView),
    Error(ErrorView),
}

impl Page {
    /// Document title.
    pub fn title(&self) -> String {
        match self {
            Self::Landing => "Simple Notes".to_string(),
            Self::Login(_) => "Sign in · Simple Notes".to_string(),
            Self::NoteList(_) => "Notes · Simple Notes".to_string(),
            Self::NewNote(_) => "New note · Simple Notes".to_string(),
            Self::NoteDetail(view) => format!("{} · Simple Notes", view.heading),
            Self::Error(view) => format!("{} · Simple Notes", view.title),
        }
    }

    /// The signed-in user the navigation bar greets, if any.
    pub fn user(&self) -> Option<&AuthUser> {
        match self {
            Self::Landing | Self::Login(_) => None,
            Self::NoteList(view) => Some(&view.user),
            Self::NewNote(view) => Some(&view.user),
            Self::NoteDetail(view) => Some(&view.user),
            Self::Error(view) => view.user.as_ref(),
        }
    }
}

/// Login / registration form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginView {
    /// Email to pre-fill after a failed attempt. The password is never echoed.
    pub email: String,
    pub error: Option<String>,
    /// Informational banner, e.g. when the notes service is down.
    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteListView {
    pub user: AuthUser,
    pub notes: Vec<Note>,
    pub filter: NoteQuery,
    pub error: Option<String>,
}

/// Raw form values for a note, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    /// Comma-separated.
    pub tags: String,
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.join(", "),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewNoteView {
    pub user: AuthUser,
    pub draft: NoteDraft,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteDetailView {
    pub user: AuthUser,
    pub id: String,
    /// Title of the note as last loaded or saved.
    pub heading: String,
    pub draft: NoteDraft,
    /// Listing filter to restore when navigating back.
    pub filter: NoteQuery,
    pub error: Option<String>,
    pub saved: bool,
}

impl NoteDetailView {
    pub fn new(user: AuthUser, note: &Note, filter: NoteQuery) -> Self {
        Self {
            user,
            id: note.id.clone(),
            heading: note.display_title().to_string(),
            draft: NoteDraft::from(note),
            filter,
            error: None,
            saved: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorView {
    pub user: Option<AuthUser>,
    pub title: String,
    pub message: String,
}
