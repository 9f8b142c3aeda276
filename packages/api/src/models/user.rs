//! # Authenticated user and credentials
//!
//! ## [`AuthUser`]
//!
//! The profile returned by `GET /auth/me` and embedded in every
//! [`AuthResponse`]. The id is kept as a string whatever the remote sends.
//!
//! ## [`AuthResponse`]
//!
//! Body of a successful `POST /auth/login` or `POST /auth/register`: the opaque
//! session token plus the user it belongs to.
//!
//! ## [`Credentials`]
//!
//! Email and password as submitted by the login form. [`Credentials::new`]
//! trims both and refuses empty values, so a request is never sent for a
//! form that is missing a field. `Debug` redacts the password.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// User information returned by the notes service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    #[serde(deserialize_with = "super::id_string")]
    pub id: String,
    pub email: String,
}

impl AuthUser {
    /// Get display name. The service only knows users by email.
    pub fn display_name(&self) -> &str {
        &self.email
    }
}

/// Token and user returned by login and registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

/// Login or registration payload.
#[derive(Clone, Serialize, PartialEq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub const REQUIRED_MESSAGE: &'static str = "Email and password are required.";

    pub fn new(email: &str, password: &str) -> Result<Self, ApiError> {
        let email = email.trim();
        let password = password.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ApiError::Validation(Self::REQUIRED_MESSAGE.to_string()));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
