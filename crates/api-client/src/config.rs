//! Client configuration and base URL resolution

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Local endpoint used in development mode when no override is set
const DEV_BASE_URL: &str = "http://localhost:8000/api";

/// Execution mode of the calling application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Local development against a backend on localhost
    Development,
    /// Deployed environment
    #[default]
    Production,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            _ => Err(Error::Configuration(format!("unknown mode: {}", s))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

/// Configuration for [`ApiClient`](crate::ApiClient)
///
/// Injected at construction instead of read from process environment at call
/// time, so the client can be tested without mutating the environment. Use
/// [`ClientConfig::from_env`] to overlay values from the environment.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// Explicit base URL override, used verbatim when non-empty
    pub override_url: Option<String>,
    /// Execution mode, selects the fallback when no override is set
    pub mode: Mode,
    /// Bare domain name used to derive `https://api.<domain>/api` in
    /// production when no override is set
    pub domain: Option<String>,
}

impl ClientConfig {
    /// Create a configuration for the given mode with no override or domain
    pub fn new(mode: Mode) -> Self {
        Self {
            override_url: None,
            mode,
            domain: None,
        }
    }

    /// Resolve the API base URL
    ///
    /// Resolution order:
    /// 1. a non-empty override is returned verbatim, regardless of mode;
    /// 2. development mode falls back to the local endpoint;
    /// 3. production mode derives `https://api.<domain>/api` from the
    ///    configured domain.
    ///
    /// Fails with [`Error::Configuration`] when none of the sources apply.
    pub fn base_url(&self) -> Result<String, Error> {
        if let Some(url) = &self.override_url {
            if !url.is_empty() {
                return Ok(url.clone());
            }
        }

        match self.mode {
            Mode::Development => Ok(DEV_BASE_URL.to_string()),
            Mode::Production => match &self.domain {
                Some(domain) if !domain.is_empty() => Ok(format!("https://api.{}/api", domain)),
                _ => Err(Error::Configuration(
                    "set API_URL or API_DOMAIN for production use".to_string(),
                )),
            },
        }
    }
}
