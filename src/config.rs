//! Credentials and client configuration.

use crate::signature;
use crate::{LastFmError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Root URL of the Last.fm 2.0 web services.
pub const API_ROOT: &str = "http://ws.audioscrobbler.com/2.0/";

/// Account and application credentials for one Last.fm session.
///
/// The API key is sent with every call. The shared secret is needed only for
/// signed calls. Username and auth token are needed only to authenticate, which
/// fills in the session key.
///
/// # Examples
///
/// ```rust
/// use lastfm_ws::Credentials;
///
/// let mut credentials = Credentials::new("my_api_key")
///     .with_secret("my_secret")
///     .with_username("rj");
/// credentials.generate_auth_token("hunter2").unwrap();
///
/// assert!(credentials.auth_token.is_some());
/// assert!(credentials.session_key.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Application API key
    pub api_key: String,
    /// Shared secret used to sign requests
    pub api_secret: Option<String>,
    /// Last.fm account name
    pub username: Option<String>,
    /// `md5(username + md5(password))`
    pub auth_token: Option<String>,
    /// Session key obtained by authenticating
    pub session_key: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = Some(session_key.into());
        self
    }

    /// Read credentials from the environment.
    ///
    /// `LASTFM_API_KEY` is required. `LASTFM_API_SECRET`, `LASTFM_USERNAME`,
    /// `LASTFM_AUTH_TOKEN` and `LASTFM_SESSION_KEY` are optional. When no auth
    /// token is given but `LASTFM_PASSWORD` and a username are, the token is
    /// derived from the password.
    pub fn from_env() -> Result<Self> {
        let api_key = non_empty_var("LASTFM_API_KEY").ok_or(LastFmError::MissingCredential("api_key"))?;

        let mut credentials = Self {
            api_key,
            api_secret: non_empty_var("LASTFM_API_SECRET"),
            username: non_empty_var("LASTFM_USERNAME"),
            auth_token: non_empty_var("LASTFM_AUTH_TOKEN"),
            session_key: non_empty_var("LASTFM_SESSION_KEY"),
        };

        if credentials.auth_token.is_none() && credentials.username.is_some() {
            if let Some(password) = non_empty_var("LASTFM_PASSWORD") {
                credentials.generate_auth_token(&password)?;
            }
        }

        Ok(credentials)
    }

    /// Derive and store the mobile-session auth token from a password.
    pub fn generate_auth_token(&mut self, password: &str) -> Result<String> {
        let username = self
            .username
            .as_deref()
            .ok_or(LastFmError::MissingCredential("username"))?;
        let token = signature::auth_token(username, password);
        self.auth_token = Some(token.clone());
        Ok(token)
    }

    /// Username and auth token, after checking that every credential needed to
    /// authenticate is present.
    ///
    /// Checks `api_key`, `api_secret`, `username`, `auth_token` in that order and
    /// names the first one missing.
    pub fn login_credentials(&self) -> Result<(&str, &str)> {
        if self.api_key.is_empty() {
            return Err(LastFmError::MissingCredential("api_key"));
        }
        if present(&self.api_secret).is_none() {
            return Err(LastFmError::MissingCredential("api_secret"));
        }
        let username = present(&self.username).ok_or(LastFmError::MissingCredential("username"))?;
        let auth_token =
            present(&self.auth_token).ok_or(LastFmError::MissingCredential("auth_token"))?;
        Ok((username, auth_token))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Web service root that every GET and POST is sent to
    pub api_root: String,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: API_ROOT.to_string(),
            user_agent: format!("lastfm-ws/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at a different web service root
    pub fn with_api_root(mut self, api_root: impl Into<String>) -> Self {
        self.api_root = api_root.into();
        self
    }

    /// Set a custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
