//! Errors produced by the notes API client.

/// Coarse classification of an [`ApiError`].
///
/// Callers use this to decide how a failure is presented: a validation or
/// rejection message is shown to the user as-is, a transport failure gets a
/// generic message because the remote never answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    RemoteRejected,
    Transport,
}

/// Errors from notes API calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input was refused before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The remote service answered with a non-2xx status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A 2xx response body did not have the expected shape.
    #[error("invalid response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The remote service could not be reached or did not answer in time.
    #[error("request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },
}

impl ApiError {
    pub(crate) fn transport(endpoint: &str, err: &reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "deadline exceeded".to_string()
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };
        Self::Transport {
            endpoint: endpoint.to_string(),
            reason,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Rejected { .. } | Self::Decode { .. } => ErrorKind::RemoteRejected,
            Self::Transport { .. } => ErrorKind::Transport,
        }
    }

    /// HTTP status returned by the remote, `None` when it never answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } | Self::Decode { status, .. } => Some(*status),
            Self::Validation(_) | Self::Transport { .. } => None,
        }
    }

    /// Text safe to show on a page. Messages the remote (or local validation)
    /// wrote for humans are passed through; anything else becomes `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(message) | Self::Rejected { message, .. } => message.clone(),
            Self::Decode { .. } | Self::Transport { .. } => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_error() -> ApiError {
        let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        ApiError::Decode {
            endpoint: "GET /notes".into(),
            status: 200,
            source,
        }
    }

    #[test]
    fn test_kind_and_status() {
        let rejected = ApiError::Rejected {
            status: 401,
            message: "Invalid token".into(),
        };
        assert_eq!(rejected.kind(), ErrorKind::RemoteRejected);
        assert_eq!(rejected.status(), Some(401));

        let transport = ApiError::Transport {
            endpoint: "GET /auth/me".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(transport.kind(), ErrorKind::Transport);
        assert_eq!(transport.status(), None);

        let validation = ApiError::Validation("Email and password are required.".into());
        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(validation.status(), None);

        assert_eq!(decode_error().kind(), ErrorKind::RemoteRejected);
        assert_eq!(decode_error().status(), Some(200));
    }

    #[test]
    fn test_user_message() {
        let rejected = ApiError::Rejected {
            status: 400,
            message: "Email already registered".into(),
        };
        assert_eq!(
            rejected.user_message("Authentication failed."),
            "Email already registered"
        );

        let transport = ApiError::Transport {
            endpoint: "POST /auth/login".into(),
            reason: "deadline exceeded".into(),
        };
        assert_eq!(
            transport.user_message("Authentication failed."),
            "Authentication failed."
        );
        assert_eq!(decode_error().user_message("Failed to load notes."), "Failed to load notes.");
    }
}
