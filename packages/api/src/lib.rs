//! # API crate — typed client for the remote notes service
//!
//! Every piece of state this application shows lives behind a remote REST API.
//! This crate is the only place that talks to it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: the `reqwest` wrapper that injects the bearer token, applies the request deadline and normalises responses |
//! | [`error`] | [`ApiError`] and its [`ErrorKind`] (`Validation`, `RemoteRejected`, `Transport`) |
//! | [`models`] | Wire types: [`Note`], [`AuthUser`], [`AuthResponse`], request payloads and [`NoteQuery`] |
//! | `memory` | `MemoryApi`, an in-process stand-in for the remote service, behind the `memory` feature |
//!
//! ## Endpoints
//!
//! | Method | Path | Trait method |
//! |--------|------|--------------|
//! | POST   | `/auth/login` | [`NotesApi::login`] |
//! | POST   | `/auth/register` | [`NotesApi::register`] |
//! | GET    | `/auth/me` | [`NotesApi::me`] |
//! | GET    | `/notes?q=&tag=` | [`NotesApi::list_notes`] |
//! | GET    | `/notes/:id` | [`NotesApi::get_note`] |
//! | POST   | `/notes` | [`NotesApi::create_note`] |
//! | PUT    | `/notes/:id` | [`NotesApi::update_note`] |
//! | DELETE | `/notes/:id` | [`NotesApi::delete_note`] |

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod models;

#[cfg(any(test, feature = "memory"))]
mod memory;
#[cfg(any(test, feature = "memory"))]
pub use memory::MemoryApi;

pub use client::ApiClient;
pub use error::{ApiError, ErrorKind};
pub use models::{AuthResponse, AuthUser, Credentials, Note, NoteInput, NotePatch, NoteQuery};

/// The operations the remote notes service offers.
///
/// Implemented by [`ApiClient`] for the real service and by `MemoryApi`
/// for tests, so request handlers never depend on a live backend.
#[async_trait]
pub trait NotesApi: Send + Sync {
    /// Exchange credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    /// Create an account and receive a session token for it.
    async fn register(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    /// Resolve a token to the user it belongs to.
    async fn me(&self, token: &str) -> Result<AuthUser, ApiError>;

    async fn list_notes(&self, token: &str, query: &NoteQuery) -> Result<Vec<Note>, ApiError>;

    async fn get_note(&self, token: &str, id: &str) -> Result<Note, ApiError>;

    async fn create_note(&self, token: &str, note: &NoteInput) -> Result<Note, ApiError>;

    async fn update_note(&self, token: &str, id: &str, patch: &NotePatch) -> Result<Note, ApiError>;

    async fn delete_note(&self, token: &str, id: &str) -> Result<(), ApiError>;
}
