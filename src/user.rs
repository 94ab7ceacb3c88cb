use crate::album::Album;
use crate::api::{fetch_authenticated, fetch_record, fetch_records, post_authenticated, LastFmApi};
use crate::artist::Artist;
use crate::chart::{chart_ranges, ChartRange};
use crate::event::Event;
use crate::mapping::{collect, dated, flag, insert_image, number, text, FieldRule, Record};
use crate::params::Params;
use crate::playlist::Playlist;
use crate::radio::Station;
use crate::shout::Shout;
use crate::tag::Tag;
use crate::track::Track;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A Last.fm account, as returned by `user.getInfo` and in friend, neighbour,
/// fan and attendee lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub real_name: Option<String>,
    pub url: Option<String>,
    pub images: BTreeMap<String, String>,
    pub country: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub subscriber: bool,
    pub playcount: Option<u64>,
    pub playlists: Option<u32>,
    pub registered: Option<DateTime<Utc>>,
    /// Account type, e.g. `user`, `subscriber`, `staff`
    pub account_type: Option<String>,
    /// Similarity score in `user.getNeighbours` results
    pub match_score: Option<f64>,
    /// Fan weight in `*.getTopFans` results
    pub weight: Option<u64>,
}

impl Record for User {
    const ELEMENT: &'static str = "user";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("id", |r, n| r.id = number(n)),
        ("name", |r, n| r.name = Some(text(n))),
        ("realname", |r, n| r.real_name = Some(text(n))),
        ("url", |r, n| r.url = Some(text(n))),
        ("image", |r, n| insert_image(&mut r.images, n)),
        ("country", |r, n| r.country = Some(text(n))),
        ("age", |r, n| r.age = number(n)),
        ("gender", |r, n| r.gender = Some(text(n))),
        ("subscriber", |r, n| r.subscriber = flag(n)),
        ("playcount", |r, n| r.playcount = number(n)),
        ("playlists", |r, n| r.playlists = number(n)),
        ("registered", |r, n| r.registered = dated(n)),
        ("type", |r, n| r.account_type = Some(text(n))),
        ("match", |r, n| r.match_score = number(n)),
        ("weight", |r, n| r.weight = number(n)),
    ];
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_deref().unwrap_or("<unknown user>"))
    }
}

/// Items a user tagged with one tag, from `user.getPersonalTags`.
///
/// Only the list matching the requested `taggingtype` is filled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Taggings {
    pub artists: Vec<Artist>,
    pub albums: Vec<Album>,
    pub tracks: Vec<Track>,
}

impl Record for Taggings {
    const ELEMENT: &'static str = "taggings";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("artists", |r, n| r.artists = collect(n, "artist")),
        ("albums", |r, n| r.albums = collect(n, "album")),
        ("tracks", |r, n| r.tracks = collect(n, "track")),
    ];
}

/// `user.*` methods.
///
/// Everything here is a public read keyed by `user`, except the
/// recommendation and station lists, which are signed and belong to the
/// session user, and [`UserApi::shout`].
pub struct UserApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> UserApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Scrobbles of one `artist` by `user`.
    pub async fn get_artist_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "user.getArtistTracks", params, "artisttracks/track").await
    }

    pub async fn get_banned_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "user.getBannedTracks", params, "bannedtracks/track").await
    }

    /// Upcoming events `user` is attending.
    pub async fn get_events(&self, params: Params) -> Result<Vec<Event>> {
        fetch_records(self.api, "user.getEvents", params, "events/event").await
    }

    pub async fn get_friends(&self, params: Params) -> Result<Vec<User>> {
        fetch_records(self.api, "user.getFriends", params, "friends/user").await
    }

    /// Profile of `user`, or of the session user when the call carries no `user`.
    pub async fn get_info(&self, params: Params) -> Result<User> {
        fetch_record(self.api, "user.getInfo", params).await
    }

    pub async fn get_loved_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "user.getLovedTracks", params, "lovedtracks/track").await
    }

    /// Users with similar taste.
    pub async fn get_neighbours(&self, params: Params) -> Result<Vec<User>> {
        fetch_records(self.api, "user.getNeighbours", params, "neighbours/user").await
    }

    /// Releases by artists `user` listens to, or by recommended artists when
    /// `userecs` is set.
    pub async fn get_new_releases(&self, params: Params) -> Result<Vec<Album>> {
        fetch_records(self.api, "user.getNewReleases", params, "albums/album").await
    }

    pub async fn get_past_events(&self, params: Params) -> Result<Vec<Event>> {
        fetch_records(self.api, "user.getPastEvents", params, "events/event").await
    }

    /// Items `user` tagged with `tag`; `taggingtype` is `artist`, `album` or `track`.
    pub async fn get_personal_tags(&self, params: Params) -> Result<Taggings> {
        fetch_record(self.api, "user.getPersonalTags", params).await
    }

    pub async fn get_playlists(&self, params: Params) -> Result<Vec<Playlist>> {
        fetch_records(self.api, "user.getPlaylists", params, "playlists/playlist").await
    }

    /// Stations the session user listened to recently.
    pub async fn get_recent_stations(&self, params: Params) -> Result<Vec<Station>> {
        fetch_authenticated(
            self.api,
            "user.getRecentStations",
            params,
            "recentstations/station",
        )
        .await
    }

    /// Recent scrobbles of `user`, newest first. Each track carries its play date.
    pub async fn get_recent_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "user.getRecentTracks", params, "recenttracks/track").await
    }

    pub async fn get_recommended_artists(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_authenticated(
            self.api,
            "user.getRecommendedArtists",
            params,
            "recommendations/artist",
        )
        .await
    }

    pub async fn get_recommended_events(&self, params: Params) -> Result<Vec<Event>> {
        fetch_authenticated(self.api, "user.getRecommendedEvents", params, "events/event").await
    }

    pub async fn get_shouts(&self, params: Params) -> Result<Vec<Shout>> {
        fetch_records(self.api, "user.getShouts", params, "shouts/shout").await
    }

    /// Most played albums; `period` is `overall`, `7day`, `3month`, `6month` or `12month`.
    pub async fn get_top_albums(&self, params: Params) -> Result<Vec<Album>> {
        fetch_records(self.api, "user.getTopAlbums", params, "topalbums/album").await
    }

    pub async fn get_top_artists(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(self.api, "user.getTopArtists", params, "topartists/artist").await
    }

    pub async fn get_top_tags(&self, params: Params) -> Result<Vec<Tag>> {
        fetch_records(self.api, "user.getTopTags", params, "toptags/tag").await
    }

    pub async fn get_top_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "user.getTopTracks", params, "toptracks/track").await
    }

    /// Album chart for one week; omit `from`/`to` for the latest.
    pub async fn get_weekly_album_chart(&self, params: Params) -> Result<Vec<Album>> {
        fetch_records(
            self.api,
            "user.getWeeklyAlbumChart",
            params,
            "weeklyalbumchart/album",
        )
        .await
    }

    pub async fn get_weekly_artist_chart(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(
            self.api,
            "user.getWeeklyArtistChart",
            params,
            "weeklyartistchart/artist",
        )
        .await
    }

    /// Date ranges usable as `from`/`to` in the weekly chart calls.
    pub async fn get_weekly_chart_list(&self, params: Params) -> Result<Vec<ChartRange>> {
        let envelope = self.api.get("user.getWeeklyChartList", params, false).await?;
        Ok(chart_ranges(&envelope))
    }

    pub async fn get_weekly_track_chart(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(
            self.api,
            "user.getWeeklyTrackChart",
            params,
            "weeklytrackchart/track",
        )
        .await
    }

    /// Post `message` to `user`'s shoutbox.
    pub async fn shout(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "user.shout", params).await?;
        Ok(())
    }
}
