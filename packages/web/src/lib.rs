//! Server-rendered web front end for the notes service.
//!
//! The browser only ever talks to this server. Pages are rendered from
//! [`ui`] components, and every piece of data comes from the notes REST API
//! through the [`api`] crate, authenticated with the token kept in the
//! signed session cookie.

pub mod gate;
pub mod handlers;
pub mod server;
pub mod session;
pub mod settings;

pub use server::{launch, router, AppState, ServerError};
pub use session::{Session, SessionStore};
pub use settings::Settings;
