//! Environment variable overlay for [`ClientConfig`]

use std::env;

use url::Url;

use crate::config::ClientConfig;

/// Explicit base URL override, used verbatim when set
pub const ENV_API_URL: &str = "API_URL";
/// Execution mode, `development` or `production`
pub const ENV_API_MODE: &str = "API_MODE";
/// Bare domain for the production fallback URL
pub const ENV_API_DOMAIN: &str = "API_DOMAIN";

impl ClientConfig {
    /// Overlay values from the environment onto this configuration
    ///
    /// Only variables that are present are applied; everything else keeps
    /// its current value. A non-absolute `API_URL` is applied verbatim but
    /// logged. An unparsable `API_MODE` is ignored.
    pub fn from_env(mut self) -> Self {
        if let Ok(url) = env::var(ENV_API_URL) {
            if Url::parse(&url).is_err() {
                tracing::warn!("{} is not an absolute URL: {}", ENV_API_URL, url);
            }
            self.override_url = Some(url);
        }

        if let Ok(mode_str) = env::var(ENV_API_MODE) {
            match mode_str.parse() {
                Ok(mode) => self.mode = mode,
                Err(_) => {
                    tracing::warn!("ignoring unknown {}: {}", ENV_API_MODE, mode_str);
                }
            }
        }

        if let Ok(domain) = env::var(ENV_API_DOMAIN) {
            self.domain = Some(domain);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;

    // Environment mutation is process-wide, so every case lives in this one
    // test and cleans up the variables it sets.
    #[test]
    fn test_from_env_overlay() {
        env::set_var(ENV_API_URL, "https://api.example.com/v2");
        env::set_var(ENV_API_MODE, "development");
        env::set_var(ENV_API_DOMAIN, "example.com");

        let config = ClientConfig::default().from_env();
        assert_eq!(
            config.override_url.as_deref(),
            Some("https://api.example.com/v2")
        );
        assert_eq!(config.mode, Mode::Development);
        assert_eq!(config.domain.as_deref(), Some("example.com"));

        // An unknown mode leaves the current mode in place
        env::set_var(ENV_API_MODE, "staging");
        let config = ClientConfig::new(Mode::Development).from_env();
        assert_eq!(config.mode, Mode::Development);

        // A non-absolute override still overlays verbatim
        env::set_var(ENV_API_URL, "not-a-url");
        let config = ClientConfig::default().from_env();
        assert_eq!(config.override_url.as_deref(), Some("not-a-url"));

        env::remove_var(ENV_API_URL);
        env::remove_var(ENV_API_MODE);
        env::remove_var(ENV_API_DOMAIN);

        // Absent variables keep prior values
        let config = ClientConfig {
            override_url: Some("http://localhost/api".to_string()),
            mode: Mode::Development,
            domain: None,
        }
        .from_env();
        assert_eq!(config.override_url.as_deref(), Some("http://localhost/api"));
        assert_eq!(config.mode, Mode::Development);
        assert_eq!(config.domain, None);
    }
}
