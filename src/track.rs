use crate::album::{buylinks, Album};
use crate::api::{fetch_record, fetch_records, get_user_tags, post_authenticated, LastFmApi};
use crate::artist::Artist;
use crate::buylink::Buylink;
use crate::mapping::{
    attribute, collect, dated, flag, insert_image, number, scalar_or_nested, text, FieldRule,
    MaybeNested, Record,
};
use crate::params::Params;
use crate::shout::Shout;
use crate::tag::Tag;
use crate::user::User;
use crate::wiki::Wiki;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use xmltree::Element;

/// A track as returned by `track.*` methods, charts and album listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: Option<String>,
    pub artist: Option<MaybeNested<Artist>>,
    pub album: Option<MaybeNested<Album>>,
    pub id: Option<u64>,
    pub mbid: Option<String>,
    pub url: Option<String>,
    pub duration: Option<u64>,
    pub listeners: Option<u64>,
    pub playcount: Option<u64>,
    /// Position on the album, or rank in a chart
    pub position: Option<u32>,
    pub streamable: bool,
    pub streamable_fulltrack: bool,
    pub loved: bool,
    /// Similarity score in `track.getSimilar` results
    pub match_score: Option<f64>,
    pub images: BTreeMap<String, String>,
    pub tags: Vec<Tag>,
    pub wiki: Option<Wiki>,
    /// When the track was scrobbled, in `user.getRecentTracks` and similar lists
    pub played_at: Option<DateTime<Utc>>,
    /// Set on the entry a user is listening to right now
    pub now_playing: bool,
}

impl Track {
    /// Seed for a track listed inside an album.
    pub fn on_album(album: Option<String>, position: Option<u32>) -> Self {
        Self {
            album: album.map(MaybeNested::Scalar),
            position,
            ..Default::default()
        }
    }

    pub fn artist_name(&self) -> Option<&str> {
        match self.artist.as_ref()? {
            MaybeNested::Scalar(name) => Some(name),
            MaybeNested::Nested(artist) => artist.name.as_deref(),
        }
    }

    pub fn album_name(&self) -> Option<&str> {
        match self.album.as_ref()? {
            MaybeNested::Scalar(name) => Some(name),
            MaybeNested::Nested(album) => album.name.as_deref(),
        }
    }

    fn set_album(&mut self, node: &Element) {
        self.album = Some(scalar_or_nested(node));
        if let Some(position) = attribute(node, "position") {
            self.position = Some(position);
        }
    }

    fn set_now_playing(&mut self, node: &Element) {
        self.now_playing = node.attributes.get("nowplaying").map(String::as_str) == Some("true");
    }

    fn set_streamable(&mut self, node: &Element) {
        self.streamable = flag(node);
        self.streamable_fulltrack = node.attributes.get("fulltrack").map(String::as_str) == Some("1");
    }
}

impl Record for Track {
    const ELEMENT: &'static str = "track";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("name", |r, n| r.name = Some(text(n))),
        ("artist", |r, n| r.artist = Some(scalar_or_nested(n))),
        ("album", |r, n| r.set_album(n)),
        ("id", |r, n| r.id = number(n)),
        ("mbid", |r, n| r.mbid = Some(text(n))),
        ("url", |r, n| r.url = Some(text(n))),
        ("duration", |r, n| r.duration = number(n)),
        ("listeners", |r, n| r.listeners = number(n)),
        ("playcount", |r, n| r.playcount = number(n)),
        ("streamable", |r, n| r.set_streamable(n)),
        ("userloved", |r, n| r.loved = flag(n)),
        ("match", |r, n| r.match_score = number(n)),
        ("image", |r, n| insert_image(&mut r.images, n)),
        ("toptags", |r, n| r.tags = collect(n, "tag")),
        ("tags", |r, n| r.tags = collect(n, "tag")),
        ("wiki", |r, n| r.wiki = Some(Wiki::from_element(n, Wiki::default()))),
        ("date", |r, n| r.played_at = dated(n)),
    ];

    fn from_element(node: &Element, seed: Self) -> Self {
        let mut record = seed;
        record.set_now_playing(node);
        record.apply_children(node);
        record
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("<unknown track>");
        match self.artist_name() {
            Some(artist) => write!(f, "{artist} - {name}"),
            None => write!(f, "{name}"),
        }
    }
}

/// Outcome of a `track.scrobble` batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrobbleSummary {
    pub accepted: u32,
    pub ignored: u32,
}

/// `track.*` methods.
pub struct TrackApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> TrackApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    async fn write(&self, method: &str, params: Params) -> Result<()> {
        post_authenticated(self.api, method, params).await?;
        Ok(())
    }

    /// Tag a track with up to 10 `tags`.
    pub async fn add_tags(&self, params: Params) -> Result<()> {
        self.write("track.addTags", params).await
    }

    pub async fn ban(&self, params: Params) -> Result<()> {
        self.write("track.ban", params).await
    }

    pub async fn unban(&self, params: Params) -> Result<()> {
        self.write("track.unban", params).await
    }

    pub async fn love(&self, params: Params) -> Result<()> {
        self.write("track.love", params).await
    }

    pub async fn unlove(&self, params: Params) -> Result<()> {
        self.write("track.unlove", params).await
    }

    pub async fn get_buylinks(&self, params: Params) -> Result<Vec<Buylink>> {
        let envelope = self.api.get("track.getBuylinks", params, false).await?;
        Ok(buylinks(&envelope))
    }

    /// Metadata for a track. With `username`, includes that user's playcount
    /// and loved flag.
    /// Canonical `artist`/`track` spelling, if Last.fm knows a better one.
    pub async fn get_correction(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(
            self.api,
            "track.getCorrection",
            params,
            "corrections/correction/track",
        )
        .await
    }

    /// Tracks matching a fingerprint id, sent as `fingerprintid`.
    pub async fn get_fingerprint_metadata(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "track.getFingerprintMetadata", params, "tracks/track").await
    }

    pub async fn get_info(&self, params: Params) -> Result<Track> {
        fetch_record(self.api, "track.getInfo", params).await
    }

    pub async fn get_shouts(&self, params: Params) -> Result<Vec<Shout>> {
        fetch_records(self.api, "track.getShouts", params, "shouts/shout").await
    }

    pub async fn get_similar(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "track.getSimilar", params, "similartracks/track").await
    }

    /// Tags a user applied to a track. Needs a session unless `user` is given.
    pub async fn get_tags(&self, params: Params) -> Result<Vec<Tag>> {
        get_user_tags(self.api, "track.getTags", params).await
    }

    /// Heaviest listeners of a track.
    pub async fn get_top_fans(&self, params: Params) -> Result<Vec<User>> {
        fetch_records(self.api, "track.getTopFans", params, "topfans/user").await
    }

    pub async fn get_top_tags(&self, params: Params) -> Result<Vec<Tag>> {
        fetch_records(self.api, "track.getTopTags", params, "toptags/tag").await
    }

    pub async fn remove_tag(&self, params: Params) -> Result<()> {
        self.write("track.removeTag", params).await
    }

    pub async fn search(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "track.search", params, "results/trackmatches/track").await
    }

    /// Share a track with up to 10 `recipient`s.
    pub async fn share(&self, params: Params) -> Result<()> {
        self.write("track.share", params).await
    }

    /// Scrobble one track or a batch.
    ///
    /// Each parameter is either a single value or a list with one entry per
    /// track; list indices of optional fields must line up with the tracks.
    /// Every parameter is sent in `name[i]` form. The service accepts at most
    /// 50 tracks per call.
    pub async fn scrobble(&self, params: Params) -> Result<ScrobbleSummary> {
        let envelope =
            post_authenticated(self.api, "track.scrobble", params.into_indexed()).await?;
        let summary = match envelope.find_first("scrobbles") {
            Some(node) => ScrobbleSummary {
                accepted: attribute(node, "accepted").unwrap_or(0),
                ignored: attribute(node, "ignored").unwrap_or(0),
            },
            None => ScrobbleSummary::default(),
        };
        log::debug!(
            "Scrobbled {} track(s), {} ignored",
            summary.accepted,
            summary.ignored
        );
        Ok(summary)
    }

    /// Tell Last.fm the user started listening to a track.
    pub async fn update_now_playing(&self, params: Params) -> Result<()> {
        self.write("track.updateNowPlaying", params).await
    }
}
