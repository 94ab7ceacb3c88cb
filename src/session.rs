use serde::{Deserialize, Serialize};

/// Serializable session state that can be persisted and restored.
///
/// Holds what a client needs to make session-bound calls again without
/// re-authenticating: the account name and the session key issued for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSession {
    /// The authenticated username
    pub username: String,
    /// Session key returned by `auth.getMobileSession`
    pub session_key: String,
}

impl ClientSession {
    pub fn new(username: impl Into<String>, session_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            session_key: session_key.into(),
        }
    }

    /// Check if this session appears to be usable.
    ///
    /// Session keys are 32 hex characters. This doesn't guarantee the key is
    /// still accepted by the server.
    pub fn is_valid(&self) -> bool {
        !self.username.is_empty()
            && self.session_key.len() == 32
            && self.session_key.bytes().all(|b| b.is_ascii_hexdigit())
    }

    /// Serialize session to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize session from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
