use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub address: String,
    pub request_timeout_secs: u64,
}

impl Server {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    /// Empty means the notes service shares this server's origin.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Api {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Base URL to call, given the address this server is listening on.
    pub fn resolve_base_url(&self, local_addr: SocketAddr) -> String {
        let configured = self.base_url.trim().trim_end_matches('/');
        if !configured.is_empty() {
            return configured.to_string();
        }

        let mut addr = local_addr;
        if addr.ip().is_unspecified() {
            match addr {
                SocketAddr::V4(_) => addr.set_ip(Ipv4Addr::LOCALHOST.into()),
                SocketAddr::V6(_) => addr.set_ip(Ipv6Addr::LOCALHOST.into()),
            }
        }
        format!("http://{addr}")
    }
}

#[derive(Clone, Deserialize)]
pub struct Session {
    /// Cookie signing key, at least 64 bytes. Empty generates one per process.
    pub secret: String,
    pub secure: bool,
    pub max_age_days: i64,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("secret", &"[REDACTED]")
            .field("secure", &self.secure)
            .field("max_age_days", &self.max_age_days)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub api: Api,
    pub session: Session,
}

impl Settings {
    /// Defaults, then `notes.toml` if present, then `NOTES_*` environment
    /// variables (`NOTES_API__BASE_URL` sets `api.base_url`).
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_environment(
            Environment::with_prefix("NOTES")
                .prefix_separator("_")
                .separator("__"),
        )
    }

    pub(crate) fn with_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server.address", "127.0.0.1:8080")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("api.base_url", "")?
            .set_default("api.timeout_secs", 10)?
            .set_default("session.secret", "")?
            .set_default("session.secure", false)?
            .set_default("session.max_age_days", 7)?
            .add_source(
                File::with_name("notes.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment)
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Settings {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::with_environment(
            Environment::with_prefix("NOTES")
                .prefix_separator("_")
                .separator("__")
                .source(Some(source)),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = settings_from(&[]);
        assert_eq!(settings.server.address, "127.0.0.1:8080");
        assert_eq!(settings.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.api.base_url, "");
        assert_eq!(settings.api.timeout(), Duration::from_secs(10));
        assert!(!settings.session.secure);
        assert_eq!(settings.session.max_age_days, 7);
    }

    #[test]
    fn test_environment_overrides() {
        let settings = settings_from(&[
            ("NOTES_API__BASE_URL", "https://notes.example.com/"),
            ("NOTES_API__TIMEOUT_SECS", "3"),
            ("NOTES_SESSION__SECURE", "true"),
            ("NOTES_SERVER__ADDRESS", "0.0.0.0:3000"),
        ]);
        assert_eq!(settings.api.timeout(), Duration::from_secs(3));
        assert!(settings.session.secure);
        assert_eq!(settings.server.address, "0.0.0.0:3000");

        let local: SocketAddr = "0.0.0.0:3000".parse().unwrap();
        assert_eq!(
            settings.api.resolve_base_url(local),
            "https://notes.example.com"
        );
    }

    #[test]
    fn test_empty_base_url_is_same_origin() {
        let settings = settings_from(&[]);
        let any: SocketAddr = "0.0.0.0:8080".parse().unwrap();
        assert_eq!(settings.api.resolve_base_url(any), "http://127.0.0.1:8080");

        let local: SocketAddr = "[::]:9000".parse().unwrap();
        assert_eq!(settings.api.resolve_base_url(local), "http://[::1]:9000");
    }

    #[test]
    fn test_secret_is_redacted() {
        let settings = settings_from(&[("NOTES_SESSION__SECRET", "hunter2")]);
        assert_eq!(settings.session.secret, "hunter2");
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
