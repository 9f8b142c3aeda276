//! # Session cookie
//!
//! The only thing this server remembers about a browser is the notes
//! service's token, kept in a signed `auth_token` cookie. [`SessionStore`]
//! reads, writes and clears it; it never checks the token itself, that is the
//! job of [`crate::gate`].
//!
//! The cookie value is HMAC-signed with a server key so it cannot be forged
//! or altered. It is not encrypted.

use std::convert::Infallible;
use std::fmt;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::{InvalidHeaderValue, COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use cookie::{Cookie, CookieJar, Key, SameSite};
use time::{Duration, OffsetDateTime};

use crate::settings;

pub const SESSION_COOKIE: &str = "auth_token";

/// Lifetime of a fresh session unless configured otherwise.
pub const DEFAULT_MAX_AGE: Duration = Duration::days(7);

/// Browsers cap cookie lifetimes at 400 days.
pub const MAX_AGE_DAYS_LIMIT: i64 = 400;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session secret must be at least 64 bytes, got {0}")]
    SecretTooShort(usize),

    #[error("no randomness available to generate a session key")]
    KeyGeneration,

    #[error("session max age must be between 1 and 400 days, got {0}")]
    InvalidMaxAge(i64),

    #[error("session cookie is not a valid header value: {0}")]
    Header(#[from] InvalidHeaderValue),
}

/// Signs and verifies the session cookie.
#[derive(Clone)]
pub struct SessionStore {
    key: Key,
    secure: bool,
    max_age: Duration,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("key", &"[REDACTED]")
            .field("secure", &self.secure)
            .field("max_age", &self.max_age)
            .finish()
    }
}

impl SessionStore {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            secure: false,
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// A store with a freshly generated key.
    pub fn generate() -> Result<Self, SessionError> {
        Key::try_generate()
            .map(Self::new)
            .ok_or(SessionError::KeyGeneration)
    }

    pub fn from_settings(settings: &settings::Session) -> Result<Self, SessionError> {
        if !(1..=MAX_AGE_DAYS_LIMIT).contains(&settings.max_age_days) {
            return Err(SessionError::InvalidMaxAge(settings.max_age_days));
        }

        let store = if settings.secret.is_empty() {
            tracing::warn!("no session secret configured; sessions will not survive a restart");
            Self::generate()?
        } else {
            let secret = settings.secret.as_bytes();
            let key =
                Key::try_from(secret).map_err(|_| SessionError::SecretTooShort(secret.len()))?;
            Self::new(key)
        };

        Ok(store
            .with_secure(settings.secure)
            .with_max_age(Duration::days(settings.max_age_days)))
    }

    /// Mark the cookie `Secure` (HTTPS only).
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Token carried by the request, if its cookie is present and correctly
    /// signed. Anything else reads as no token.
    pub fn read(&self, headers: &HeaderMap) -> Session {
        let mut jar = CookieJar::new();
        for header in headers.get_all(COOKIE) {
            let Ok(header) = header.to_str() else {
                continue;
            };
            for cookie in Cookie::split_parse_encoded(header.to_owned()).flatten() {
                jar.add_original(cookie.into_owned());
            }
        }

        let token = jar
            .signed(&self.key)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty());
        Session { token }
    }

    /// `Set-Cookie` value starting a session for `token`, valid for `ttl`.
    pub fn write(&self, token: &str, ttl: Duration) -> Result<HeaderValue, SessionError> {
        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key)
            .add(self.cookie(token.to_string()).max_age(ttl));

        let value = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.encoded().to_string())
            .unwrap_or_default();
        Ok(HeaderValue::from_str(&value)?)
    }

    /// `Set-Cookie` value that makes the browser drop the session.
    pub fn clear(&self) -> Result<HeaderValue, SessionError> {
        let cookie = self
            .cookie(String::new())
            .max_age(Duration::ZERO)
            .expires(OffsetDateTime::UNIX_EPOCH)
            .build();
        Ok(HeaderValue::from_str(&cookie.to_string())?)
    }

    fn cookie(&self, value: String) -> cookie::CookieBuilder<'static> {
        Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
    }
}

/// The session a request arrived with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

impl<S> FromRequestParts<S> for Session
where
    SessionStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionStore::from_ref(state).read(&parts.headers))
    }
}
