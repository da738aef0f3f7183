use std::time::Duration;

use figbridge_core::error::CoreError;
use figbridge_design::api::DEFAULT_API_BASE;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running next to a local design
/// tool. The relay has no authentication, so it binds to loopback unless
/// told otherwise.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `3456`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    ///
    /// Must exceed the command timeout, otherwise submits are cut off
    /// before the relay can report a remote timeout. Checked at startup.
    pub request_timeout_secs: u64,
    /// Default time a submit waits for its host, in ms (default: `30000`).
    pub command_timeout_ms: u64,
    /// Largest accepted request body (default: 50 MiB).
    pub max_body_bytes: usize,
    /// Personal access token for the design-data API. Read tools are
    /// unavailable without it.
    pub figma_access_token: Option<String>,
    /// Design-data API base URL.
    pub figma_api_base: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `127.0.0.1`                |
    /// | `PORT`                 | `3456`                     |
    /// | `CORS_ORIGINS`         | `*`                        |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                       |
    /// | `COMMAND_TIMEOUT_MS`   | `30000`                    |
    /// | `MAX_BODY_BYTES`       | `52428800`                 |
    /// | `FIGMA_ACCESS_TOKEN`   | unset                      |
    /// | `FIGMA_API_BASE`       | `https://api.figma.com/v1` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3456".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let command_timeout_ms: u64 = std::env::var("COMMAND_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .expect("COMMAND_TIMEOUT_MS must be a valid u64");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .unwrap_or_else(|_| "52428800".into())
            .parse()
            .expect("MAX_BODY_BYTES must be a valid usize");

        let figma_access_token = std::env::var("FIGMA_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let figma_api_base =
            std::env::var("FIGMA_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        let config = Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            command_timeout_ms,
            max_body_bytes,
            figma_access_token,
            figma_api_base,
        };
        config
            .validate_timeouts()
            .expect("COMMAND_TIMEOUT_MS must be below REQUEST_TIMEOUT_SECS");
        config
    }

    /// Check that a default submit can time out before the HTTP layer
    /// cuts the request off.
    pub fn validate_timeouts(&self) -> Result<(), CoreError> {
        if self.command_timeout_ms == 0 {
            return Err(CoreError::Validation(
                "command timeout must be greater than zero".into(),
            ));
        }
        if self.command_timeout_ms >= self.request_timeout_ms() {
            return Err(CoreError::Validation(format!(
                "command timeout {}ms must be below request timeout {}ms",
                self.command_timeout_ms,
                self.request_timeout_ms()
            )));
        }
        Ok(())
    }

    /// HTTP request timeout in milliseconds.
    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_secs.saturating_mul(1000)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms)
    }

    /// URL hosts should use to reach this relay.
    pub fn relay_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config(request_timeout_secs: u64, command_timeout_ms: u64) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec!["*".into()],
            request_timeout_secs,
            command_timeout_ms,
            max_body_bytes: 1024,
            figma_access_token: None,
            figma_api_base: DEFAULT_API_BASE.into(),
        }
    }

    #[test]
    fn defaults_leave_room_for_remote_timeout() {
        assert!(config(60, 30_000).validate_timeouts().is_ok());
        assert!(config(1, 999).validate_timeouts().is_ok());
    }

    #[test]
    fn command_timeout_must_be_below_request_timeout() {
        assert_matches!(
            config(30, 30_000).validate_timeouts(),
            Err(CoreError::Validation(msg)) if msg.contains("30000ms")
        );
        assert_matches!(
            config(1, 60_000).validate_timeouts(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn zero_command_timeout_is_rejected() {
        assert_matches!(config(60, 0).validate_timeouts(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn huge_request_timeout_does_not_overflow() {
        assert_eq!(config(u64::MAX, 1).request_timeout_ms(), u64::MAX);
    }
}
