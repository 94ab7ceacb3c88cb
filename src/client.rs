use crate::album::AlbumApi;
use crate::api::LastFmApi;
use crate::artist::ArtistApi;
use crate::auth::AuthApi;
use crate::chart::ChartApi;
use crate::config::{ClientConfig, Credentials};
use crate::envelope::Envelope;
use crate::event::EventApi;
use crate::geo::GeoApi;
use crate::group::GroupApi;
use crate::headers;
use crate::library::LibraryApi;
use crate::params::Params;
use crate::playlist::PlaylistApi;
use crate::radio::RadioApi;
use crate::session::ClientSession;
use crate::signature::{self, SIGNATURE_PARAM};
use crate::tag::TagApi;
use crate::tasteometer::TasteometerApi;
use crate::track::TrackApi;
use crate::user::UserApi;
use crate::venue::VenueApi;
use crate::{LastFmError, Result};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::collections::BTreeMap;

const SESSION_PARAM: &str = "sk";

/// Client for the Last.fm 2.0 web services.
///
/// Owns the credentials and the session key. Every call goes through
/// [`LastFmApi::get`] or [`LastFmApi::post`], which normalize and sign the
/// parameters, send one request, and validate the `<lfm>` envelope before
/// anything is mapped.
///
/// # Examples
///
/// ```rust,no_run
/// use lastfm_ws::{Credentials, LastFmApi, LastFmClient, Params, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let http_client = http_client::native::NativeClient::new();
///     let credentials = Credentials::from_env()?;
///     let mut client = LastFmClient::new(Box::new(http_client), credentials);
///
///     // Exchange username + auth token for a session key
///     client.authenticate().await?;
///     assert!(client.is_authenticated());
///
///     client
///         .track()
///         .love(Params::new().with("artist", "Cher").with("track", "Believe"))
///         .await?;
///
///     Ok(())
/// }
/// ```
pub struct LastFmClient {
    client: Box<dyn HttpClient>,
    credentials: Credentials,
    config: ClientConfig,
}

impl LastFmClient {
    /// Create a client against the public web services.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    /// * `credentials` - API key and, for signed calls, the shared secret
    pub fn new(client: Box<dyn HttpClient>, credentials: Credentials) -> Self {
        Self::with_config(client, credentials, ClientConfig::default())
    }

    /// Create a client with a custom [`ClientConfig`], e.g. a different API root.
    pub fn with_config(
        client: Box<dyn HttpClient>,
        credentials: Credentials,
        config: ClientConfig,
    ) -> Self {
        Self {
            client,
            credentials,
            config,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session_key(&self) -> Option<&str> {
        self.credentials
            .session_key
            .as_deref()
            .filter(|key| !key.is_empty())
    }

    /// Replace the session key, e.g. with one restored from disk.
    pub fn set_session_key(&mut self, session_key: Option<String>) {
        self.credentials.session_key = session_key;
    }

    /// Adopt a previously persisted session.
    pub fn restore_session(&mut self, session: &ClientSession) {
        log::debug!("Restoring session for {}", session.username);
        self.credentials.username = Some(session.username.clone());
        self.credentials.session_key = Some(session.session_key.clone());
    }

    /// Current session in persistable form, if authenticated with a known username.
    pub fn session(&self) -> Option<ClientSession> {
        let username = self.credentials.username.as_deref()?;
        let session_key = self.session_key()?;
        Some(ClientSession::new(username, session_key))
    }

    /// Obtain a session key with `auth.getMobileSession` and store it.
    ///
    /// Requires api key, shared secret, username and auth token; the first one
    /// missing is reported as [`LastFmError::MissingCredential`] before any
    /// request is made. Returns the new session key.
    ///
    /// ```rust,no_run
    /// # use lastfm_ws::{Credentials, LastFmClient, SessionPersistence};
    /// # tokio_test::block_on(async {
    /// let mut credentials = Credentials::new("api-key")
    ///     .with_secret("shared-secret")
    ///     .with_username("rj");
    /// credentials.generate_auth_token("password")?;
    /// let mut client = LastFmClient::new(
    ///     Box::new(http_client::native::NativeClient::new()),
    ///     credentials,
    /// );
    ///
    /// client.authenticate().await?;
    /// if let Some(session) = client.session() {
    ///     SessionPersistence::new()?.save_session(&session)?;
    /// }
    /// # Ok::<(), lastfm_ws::LastFmError>(())
    /// # });
    /// ```
    pub async fn authenticate(&mut self) -> Result<String> {
        let session = {
            let (username, auth_token) = self.credentials.login_credentials()?;
            log::debug!("Requesting mobile session for {username}");
            self.auth().get_mobile_session(username, auth_token).await?
        };

        let key = session
            .key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| LastFmError::Parse("Session response has no <key>".to_string()))?;

        log::info!(
            "Authenticated as {}",
            session
                .name
                .as_deref()
                .or(self.credentials.username.as_deref())
                .unwrap_or("<unknown>")
        );
        self.credentials.session_key = Some(key.clone());
        Ok(key)
    }

    /// Build the final wire parameters for one call.
    ///
    /// Normalizes `params`, adds `method` and `api_key`, adds `sk` when the call
    /// is secure and a session exists (never for `auth.*` methods), then signs
    /// secure calls as the last step.
    pub fn construct_params(
        &self,
        method: &str,
        params: &Params,
        secure: bool,
    ) -> Result<BTreeMap<String, String>> {
        if self.credentials.api_key.is_empty() {
            return Err(LastFmError::MissingCredential("api_key"));
        }

        let mut wire = params.normalize();
        wire.insert("method".to_string(), method.to_string());
        wire.insert("api_key".to_string(), self.credentials.api_key.clone());

        if secure {
            if let Some(session_key) = self.session_key() {
                if !method.starts_with("auth.") {
                    wire.insert(SESSION_PARAM.to_string(), session_key.to_string());
                }
            }

            let secret = self
                .credentials
                .api_secret
                .as_deref()
                .filter(|secret| !secret.is_empty())
                .ok_or(LastFmError::MissingCredential("api_secret"))?;
            let api_sig = signature::sign(&wire, secret);
            wire.insert(SIGNATURE_PARAM.to_string(), api_sig);
        }

        Ok(wire)
    }

    fn api_url(&self) -> Result<Url> {
        self.config
            .api_root
            .parse::<Url>()
            .map_err(|e| LastFmError::Http(format!("Invalid API root '{}': {e}", self.config.api_root)))
    }

    async fn send(&self, method: &str, request: Request) -> Result<Envelope> {
        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;

        let status = response.status();
        log::debug!("{method} response status: {status}");

        let body = response
            .body_string()
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;

        match Envelope::parse(&body) {
            Ok(envelope) => envelope.validate(),
            Err(_) if !status.is_success() => Err(LastFmError::Http(format!(
                "{method} failed with HTTP {status}"
            ))),
            Err(e) => Err(e),
        }
    }
}

/// Parameters as they may appear in logs.
fn redacted(wire: &BTreeMap<String, String>) -> String {
    wire.iter()
        .map(|(k, v)| match k.as_str() {
            SESSION_PARAM | SIGNATURE_PARAM => format!("{k}=<redacted>"),
            _ => format!("{k}={v}"),
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait(?Send)]
impl LastFmApi for LastFmClient {
    async fn get(&self, method: &str, params: Params, secure: bool) -> Result<Envelope> {
        let wire = self.construct_params(method, &params, secure)?;
        log::debug!("GET {} {}", self.config.api_root, redacted(&wire));

        let mut url = self.api_url()?;
        url.set_query(Some(&headers::form_encode(&wire)));

        let mut request = Request::new(Method::Get, url);
        headers::add_common_headers(&mut request, &self.config.user_agent);

        self.send(method, request).await
    }

    async fn post(&self, method: &str, params: Params) -> Result<Envelope> {
        let wire = self.construct_params(method, &params, true)?;
        log::debug!("POST {} {}", self.config.api_root, redacted(&wire));

        let mut request = Request::new(Method::Post, self.api_url()?);
        headers::add_form_headers(&mut request, &self.config.user_agent);
        request.set_body(headers::form_encode(&wire));

        self.send(method, request).await
    }

    fn is_authenticated(&self) -> bool {
        self.session_key().is_some()
    }

    fn requires_authentication(&self) -> Result<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(LastFmError::AuthRequired)
        }
    }
}

impl LastFmClient {
    pub fn album(&self) -> AlbumApi<'_> {
        AlbumApi::new(self)
    }

    pub fn artist(&self) -> ArtistApi<'_> {
        ArtistApi::new(self)
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn chart(&self) -> ChartApi<'_> {
        ChartApi::new(self)
    }

    pub fn event(&self) -> EventApi<'_> {
        EventApi::new(self)
    }

    pub fn geo(&self) -> GeoApi<'_> {
        GeoApi::new(self)
    }

    pub fn group(&self) -> GroupApi<'_> {
        GroupApi::new(self)
    }

    pub fn library(&self) -> LibraryApi<'_> {
        LibraryApi::new(self)
    }

    pub fn playlist(&self) -> PlaylistApi<'_> {
        PlaylistApi::new(self)
    }

    pub fn radio(&self) -> RadioApi<'_> {
        RadioApi::new(self)
    }

    pub fn tag(&self) -> TagApi<'_> {
        TagApi::new(self)
    }

    pub fn tasteometer(&self) -> TasteometerApi<'_> {
        TasteometerApi::new(self)
    }

    pub fn track(&self) -> TrackApi<'_> {
        TrackApi::new(self)
    }

    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    pub fn venue(&self) -> VenueApi<'_> {
        VenueApi::new(self)
    }
}
