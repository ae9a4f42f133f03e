use crate::ConfigError;
use std::fmt;

/// Environment variable holding the LINE channel access token
pub const ACCESS_TOKEN_VAR: &str = "LINE_CHANNEL_ACCESS_TOKEN";

/// Environment variable holding the LINE channel secret
pub const CHANNEL_SECRET_VAR: &str = "LINE_CHANNEL_SECRET";

/// Secrets for the LINE Messaging API
///
/// Kept out of the TOML file; `Debug` output never shows the values.
#[derive(Clone)]
pub struct LineCredentials {
    pub channel_access_token: String,
    pub channel_secret: String,
}

impl LineCredentials {
    /// Reads both credentials from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads both credentials through `lookup`, treating blank values as missing
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingCredential(name))
        };

        Ok(Self {
            channel_access_token: read(ACCESS_TOKEN_VAR)?,
            channel_secret: read(CHANNEL_SECRET_VAR)?,
        })
    }
}

impl fmt::Debug for LineCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineCredentials")
            .field("channel_access_token", &"<redacted>")
            .field("channel_secret", &"<redacted>")
            .finish()
    }
}
