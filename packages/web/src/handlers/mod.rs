//! # Route handlers
//!
//! Each handler is an async function of the request's [`Session`], its route
//! and form inputs, and a [`NotesApi`] backend. It returns an [`Outcome`]
//! describing what to send back; turning that into an HTTP response (status,
//! HTML, `Location`, `Set-Cookie`) happens in [`crate::server`]. Handlers
//! never fail: every API error is folded into the page they render.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /` | [`auth::landing`] |
//! | `GET /login` | [`auth::login_page`] |
//! | `POST /login` | [`auth::login_submit`] |
//! | `POST /logout` | [`auth::logout`] |
//! | `GET /notes` | [`notes::list`] |
//! | `POST /notes` | [`notes::quick_create`] |
//! | `GET /notes/new` | [`notes::new_form`] |
//! | `POST /notes/new` | [`notes::create`] |
//! | `GET /notes/{id}` | [`notes::detail`] |
//! | `POST /notes/{id}` | [`notes::update_or_delete`] |
//!
//! [`Session`]: crate::session::Session
//! [`NotesApi`]: api::NotesApi

use axum::http::StatusCode;
use ui::Page;

pub mod auth;
pub mod forms;
pub mod notes;

pub use forms::{LoginForm, NoteForm};

/// What a handler wants sent back.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Page { status: StatusCode, page: Page },
    Redirect { to: String, session: SessionChange },
}

/// Effect a redirect has on the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Keep,
    /// Store this token.
    Start(String),
    /// Drop whatever session the browser holds.
    End,
}

impl Outcome {
    pub fn page(page: Page) -> Self {
        Self::Page {
            status: StatusCode::OK,
            page,
        }
    }

    pub fn page_with_status(status: StatusCode, page: Page) -> Self {
        Self::Page { status, page }
    }

    pub fn redirect(to: impl Into<String>) -> Self {
        Self::Redirect {
            to: to.into(),
            session: SessionChange::Keep,
        }
    }

    /// Where every protected route sends a visitor without a valid session.
    pub fn login_required() -> Self {
        Self::redirect(ui::routes::LOGIN)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Page { status, .. } => *status,
            Self::Redirect { .. } => StatusCode::SEE_OTHER,
        }
    }
}

/// Status for a page reporting a failed API call: the remote's own status
/// when it answered with an error, 502 when it could not be reached.
pub(crate) fn error_status(err: &api::ApiError) -> StatusCode {
    err.status()
        .and_then(|status| StatusCode::from_u16(status).ok())
        .filter(|status| status.is_client_error() || status.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}
