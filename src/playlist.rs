use crate::api::{fetch_record, post_authenticated, LastFmApi};
use crate::mapping::{collect, flag, insert_image, number, text, timestamp, FieldRule, Record};
use crate::params::Params;
use crate::{LastFmError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A user playlist, or an XSPF playlist returned by `playlist.fetch` and
/// `radio.getPlaylist`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: Option<u64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub size: Option<u32>,
    /// Total length in seconds
    pub duration: Option<u64>,
    pub streamable: bool,
    pub creator: Option<String>,
    pub url: Option<String>,
    pub images: BTreeMap<String, String>,
    pub tracks: Vec<PlaylistEntry>,
}

impl Record for Playlist {
    const ELEMENT: &'static str = "playlist";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("id", |r, n| r.id = number(n)),
        ("title", |r, n| r.title = Some(text(n))),
        ("description", |r, n| r.description = Some(text(n))),
        ("annotation", |r, n| r.description = Some(text(n))),
        ("date", |r, n| r.date = timestamp(n)),
        ("size", |r, n| r.size = number(n)),
        ("duration", |r, n| r.duration = number(n)),
        ("streamable", |r, n| r.streamable = flag(n)),
        ("creator", |r, n| r.creator = Some(text(n))),
        ("url", |r, n| r.url = Some(text(n))),
        ("image", |r, n| insert_image(&mut r.images, n)),
        ("trackList", |r, n| r.tracks = collect(n, PlaylistEntry::ELEMENT)),
    ];
}

/// A `<track>` inside an XSPF `<trackList>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub title: Option<String>,
    /// Artist name
    pub creator: Option<String>,
    pub album: Option<String>,
    /// Stream or preview URL
    pub location: Option<String>,
    pub identifier: Option<String>,
    /// Length in milliseconds
    pub duration: Option<u64>,
    pub image: Option<String>,
    /// Last.fm page for the track
    pub info: Option<String>,
}

impl Record for PlaylistEntry {
    const ELEMENT: &'static str = "track";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("title", |r, n| r.title = Some(text(n))),
        ("creator", |r, n| r.creator = Some(text(n))),
        ("album", |r, n| r.album = Some(text(n))),
        ("location", |r, n| r.location = Some(text(n))),
        ("identifier", |r, n| r.identifier = Some(text(n))),
        ("duration", |r, n| r.duration = number(n)),
        ("image", |r, n| r.image = Some(text(n))),
        ("info", |r, n| r.info = Some(text(n))),
    ];
}

/// `playlist.*` methods.
pub struct PlaylistApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> PlaylistApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Append `artist`/`track` to the session user's playlist `playlist_id`.
    pub async fn add_track(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "playlist.addTrack", params).await?;
        Ok(())
    }

    /// Create a playlist with optional `title` and `description`.
    pub async fn create(&self, params: Params) -> Result<Playlist> {
        let envelope = post_authenticated(self.api, "playlist.create", params).await?;
        envelope
            .records("playlists/playlist")
            .into_iter()
            .next()
            .ok_or_else(|| LastFmError::Parse("Response has no <playlist> element".to_string()))
    }

    /// Fetch the XSPF playlist at `playlist_url` (a `lastfm://playlist/...` URL).
    pub async fn fetch(&self, params: Params) -> Result<Playlist> {
        fetch_record(self.api, "playlist.fetch", params).await
    }
}
