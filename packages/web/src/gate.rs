//! Resolves the session token to a user before protected pages run.

use api::{AuthUser, ErrorKind, NotesApi};

use crate::session::Session;

/// A validated session: the token plus the user the notes service says it
/// belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub token: String,
    pub user: AuthUser,
}

/// Outcome of checking a request's session.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    Authenticated(Identity),
    /// No session cookie.
    Anonymous,
    /// The notes service refused the token.
    Rejected,
    /// The notes service could not be asked.
    Unreachable,
}

impl Gate {
    pub fn identity(self) -> Option<Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous | Self::Rejected | Self::Unreachable => None,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable)
    }
}

/// Check the session against `GET /auth/me`. Runs on every request; nothing
/// is cached. Never fails: every problem maps to a non-authenticated [`Gate`].
pub async fn resolve_identity<A>(api: &A, session: &Session) -> Gate
where
    A: NotesApi + ?Sized,
{
    let Some(token) = session.token() else {
        return Gate::Anonymous;
    };

    match api.me(token).await {
        Ok(user) => Gate::Authenticated(Identity {
            token: token.to_string(),
            user,
        }),
        Err(err) if err.kind() == ErrorKind::Transport => {
            tracing::warn!(error = %err, "notes service unreachable while checking session");
            Gate::Unreachable
        }
        Err(err) => {
            tracing::debug!(error = %err, status = ?err.status(), "session token rejected");
            Gate::Rejected
        }
    }
}
