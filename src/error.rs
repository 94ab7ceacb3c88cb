use thiserror::Error;

/// Error types for Last.fm web service operations.
///
/// Every failure of the request pipeline surfaces as one of these variants and is
/// returned to the immediate caller; nothing inside the crate retries or swallows
/// them. The one deliberate exception is field-level conversion while mapping XML
/// into records, where a malformed number or date simply leaves the field unset.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use lastfm_ws::{Credentials, LastFmClient, LastFmError, Params};
///
/// #[tokio::main]
/// async fn main() {
///     let client = LastFmClient::new(
///         Box::new(http_client::native::NativeClient::new()),
///         Credentials::new("api_key"),
///     );
///
///     match client.album().get_info(Params::new().with("album", "Believe")).await {
///         Ok(album) => println!("Found {:?}", album.name),
///         Err(LastFmError::Api { code, message }) => eprintln!("Last.fm said {code}: {message}"),
///         Err(LastFmError::Http(msg)) => eprintln!("Network error: {msg}"),
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum LastFmError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors, and other
    /// low-level networking issues. These are never retried.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse Last.fm's response.
    ///
    /// The body was not well-formed XML, or it did not have the expected
    /// `<lfm status="...">` envelope shape.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Last.fm answered with `status="failed"`.
    ///
    /// `message` is the text of the `<error>` element, verbatim. `code` is the
    /// numeric `code` attribute, or 0 when the server omitted it.
    #[error("Last.fm error {code}: {message}")]
    Api {
        /// Numeric error code reported by the service
        code: u32,
        /// Human readable message reported by the service
        message: String,
    },

    /// A credential required for the operation has not been configured.
    ///
    /// Carries the name of the first missing credential (`api_key`,
    /// `api_secret`, `username` or `auth_token`).
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// The operation acts on behalf of a user but no session key is set.
    ///
    /// Call [`LastFmClient::authenticate`](crate::LastFmClient::authenticate)
    /// first; the client never logs in implicitly.
    #[error("Last.fm authentication required")]
    AuthRequired,

    /// File system I/O errors.
    ///
    /// This can occur when persisting or restoring a session key.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LastFmError {
    /// The server-supplied message, if this error came from a failure envelope.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            LastFmError::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}
