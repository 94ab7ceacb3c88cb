use crate::api::LastFmApi;
use crate::mapping::{flag, text, FieldRule, Record};
use crate::params::Params;
use crate::{LastFmError, Result};
use serde::{Deserialize, Serialize};

/// A web service session as returned by the `auth.*` methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: Option<String>,
    pub key: Option<String>,
    pub subscriber: bool,
}

impl Record for Session {
    const ELEMENT: &'static str = "session";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("name", |r, n| r.name = Some(text(n))),
        ("key", |r, n| r.key = Some(text(n))),
        ("subscriber", |r, n| r.subscriber = flag(n)),
    ];
}

/// `auth.*` methods. All of them are signed; none of them send a session key.
pub struct AuthApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> AuthApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Create a session from a username and `md5(username + md5(password))`.
    pub async fn get_mobile_session(&self, username: &str, auth_token: &str) -> Result<Session> {
        let params = Params::new()
            .with("username", username)
            .with("auth_token", auth_token);
        self.api
            .get("auth.getMobileSession", params, true)
            .await?
            .record()
    }

    /// Exchange a request token the user has authorized for a session.
    pub async fn get_session(&self, token: &str) -> Result<Session> {
        let params = Params::new().with("token", token);
        self.api.get("auth.getSession", params, true).await?.record()
    }

    /// Fetch an unauthorized request token.
    pub async fn get_token(&self) -> Result<String> {
        let envelope = self.api.get("auth.getToken", Params::new(), true).await?;
        envelope
            .find_first("token")
            .map(text)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| LastFmError::Parse("Response has no <token> element".to_string()))
    }
}
