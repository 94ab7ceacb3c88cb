use crate::album::Album;
use crate::api::{fetch_records, post_authenticated, LastFmApi};
use crate::artist::Artist;
use crate::params::Params;
use crate::track::Track;
use crate::Result;

/// Move the list under `plural` to indexed `singular[i]` entries.
fn spread(mut params: Params, plural: &str, singular: &str) -> Params {
    match params.take(plural) {
        Some(values) => params.with_indexed(singular, values.into_elements()),
        None => params,
    }
}

/// `library.*` methods on the authenticated user's library.
pub struct LibraryApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> LibraryApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    async fn write(&self, method: &str, params: Params) -> Result<()> {
        post_authenticated(self.api, method, params).await?;
        Ok(())
    }

    /// Add albums. `artists` and `albums` are parallel lists.
    pub async fn add_album(&self, params: Params) -> Result<()> {
        let params = spread(spread(params, "artists", "artist"), "albums", "album");
        self.write("library.addAlbum", params).await
    }

    /// Add the artists listed in `artists`.
    pub async fn add_artist(&self, params: Params) -> Result<()> {
        self.write("library.addArtist", spread(params, "artists", "artist"))
            .await
    }

    /// Add tracks. `artists` and `tracks` are parallel lists.
    pub async fn add_track(&self, params: Params) -> Result<()> {
        let params = spread(spread(params, "artists", "artist"), "tracks", "track");
        self.write("library.addTrack", params).await
    }

    /// Albums in `user`'s library, optionally filtered by `artist`.
    pub async fn get_albums(&self, params: Params) -> Result<Vec<Album>> {
        fetch_records(self.api, "library.getAlbums", params, "albums/album").await
    }

    pub async fn get_artists(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(self.api, "library.getArtists", params, "artists/artist").await
    }

    /// Tracks in `user`'s library, optionally filtered by `artist` and `album`.
    pub async fn get_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "library.getTracks", params, "tracks/track").await
    }

    pub async fn remove_album(&self, params: Params) -> Result<()> {
        self.write("library.removeAlbum", params).await
    }

    pub async fn remove_artist(&self, params: Params) -> Result<()> {
        self.write("library.removeArtist", params).await
    }

    /// Remove the scrobble of `artist`/`track` made at `timestamp`.
    pub async fn remove_scrobble(&self, params: Params) -> Result<()> {
        self.write("library.removeScrobble", params).await
    }

    pub async fn remove_track(&self, params: Params) -> Result<()> {
        self.write("library.removeTrack", params).await
    }
}
