use crate::envelope::Envelope;
use crate::mapping::Record;
use crate::params::Params;
use crate::Result;
use async_trait::async_trait;

/// Transport-level operations that resource modules are written against.
///
/// [`crate::LastFmClient`] is the real implementation. Resource handles such as
/// [`crate::AlbumApi`] only ever see a `&dyn LastFmApi`, so they can be driven
/// by a mock in tests.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockLastFmApi`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait LastFmApi {
    /// Issue a GET for `method`. Secure calls are signed and carry the session
    /// key when one is set.
    async fn get(&self, method: &str, params: Params, secure: bool) -> Result<Envelope>;

    /// Issue a signed, form-encoded POST for `method`.
    async fn post(&self, method: &str, params: Params) -> Result<Envelope>;

    /// Whether a session key is held.
    fn is_authenticated(&self) -> bool;

    /// Fail with [`crate::LastFmError::AuthRequired`] unless a session key is held.
    fn requires_authentication(&self) -> Result<()>;
}

/// GET `method` and map the envelope's payload element into `R`.
pub(crate) async fn fetch_record<R: Record>(
    api: &dyn LastFmApi,
    method: &str,
    params: Params,
) -> Result<R> {
    api.get(method, params, false).await?.record()
}

/// GET `method` and map every element at `path` into `R`.
pub(crate) async fn fetch_records<R: Record>(
    api: &dyn LastFmApi,
    method: &str,
    params: Params,
    path: &str,
) -> Result<Vec<R>> {
    Ok(api.get(method, params, false).await?.records(path))
}

/// Session-bound write: check for a session, then POST.
pub(crate) async fn post_authenticated(
    api: &dyn LastFmApi,
    method: &str,
    params: Params,
) -> Result<Envelope> {
    api.requires_authentication()?;
    api.post(method, params).await
}

/// GET for the `*.getTags` family.
///
/// Without a `user` parameter these return the authenticated user's tags, so
/// the call is signed and needs a session. With one it is a plain public read.
pub(crate) async fn get_user_tags<R: Record>(
    api: &dyn LastFmApi,
    method: &str,
    params: Params,
) -> Result<Vec<R>> {
    let secure = !params.contains("user");
    if secure {
        api.requires_authentication()?;
    }
    Ok(api.get(method, params, secure).await?.records("tags/tag"))
}

/// Signed GET on behalf of the session user; maps every element at `path`.
pub(crate) async fn fetch_authenticated<R: Record>(
    api: &dyn LastFmApi,
    method: &str,
    params: Params,
    path: &str,
) -> Result<Vec<R>> {
    api.requires_authentication()?;
    Ok(api.get(method, params, true).await?.records(path))
}
