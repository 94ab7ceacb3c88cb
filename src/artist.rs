use crate::album::Album;
use crate::api::{fetch_record, fetch_records, get_user_tags, post_authenticated, LastFmApi};
use crate::event::Event;
use crate::mapping::{collect, dated, flag, insert_image, number, text, FieldRule, Record};
use crate::params::Params;
use crate::shout::Shout;
use crate::tag::Tag;
use crate::track::Track;
use crate::user::User;
use crate::wiki::Wiki;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// An artist as returned by `artist.*` methods and nested in other records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub name: Option<String>,
    pub mbid: Option<String>,
    pub url: Option<String>,
    /// Image URLs keyed by size (`small`, `medium`, `large`, ...)
    pub images: BTreeMap<String, String>,
    pub listeners: Option<u64>,
    pub playcount: Option<u64>,
    /// Similarity score in `artist.getSimilar` results
    pub match_score: Option<f64>,
    pub streamable: bool,
    pub on_tour: bool,
    pub similar: Vec<Artist>,
    pub tags: Vec<Tag>,
    pub wiki: Option<Wiki>,
}

impl Record for Artist {
    const ELEMENT: &'static str = "artist";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("name", |r, n| r.name = Some(text(n))),
        ("mbid", |r, n| r.mbid = Some(text(n))),
        ("url", |r, n| r.url = Some(text(n))),
        ("image", |r, n| insert_image(&mut r.images, n)),
        ("listeners", |r, n| r.listeners = number(n)),
        ("playcount", |r, n| r.playcount = number(n)),
        ("match", |r, n| r.match_score = number(n)),
        ("streamable", |r, n| r.streamable = flag(n)),
        ("ontour", |r, n| r.on_tour = flag(n)),
        ("stats", |r, n| r.apply_children(n)),
        ("similar", |r, n| r.similar = collect(n, "artist")),
        ("tags", |r, n| r.tags = collect(n, "tag")),
        ("bio", |r, n| r.wiki = Some(Wiki::from_element(n, Wiki::default()))),
        ("wiki", |r, n| r.wiki = Some(Wiki::from_element(n, Wiki::default()))),
    ];
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_deref().unwrap_or("<unknown artist>"))
    }
}

/// A user-contributed photo from `artist.getImages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistImage {
    pub title: Option<String>,
    /// Last.fm page for the image
    pub url: Option<String>,
    pub date_added: Option<DateTime<Utc>>,
    pub format: Option<String>,
    /// Rendition URLs keyed by size (`original`, `large`, ...)
    pub sizes: BTreeMap<String, String>,
    pub owner: Option<String>,
    pub thumbs_up: Option<u64>,
    pub thumbs_down: Option<u64>,
}

impl Record for ArtistImage {
    const ELEMENT: &'static str = "image";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("title", |r, n| r.title = Some(text(n))),
        ("url", |r, n| r.url = Some(text(n))),
        ("dateadded", |r, n| r.date_added = dated(n)),
        ("format", |r, n| r.format = Some(text(n))),
        ("sizes", |r, n| r.apply_children(n)),
        ("size", |r, n| {
            if let Some(name) = n.attributes.get("name") {
                r.sizes.insert(name.clone(), text(n));
            }
        }),
        ("owner", |r, n| r.apply_children(n)),
        ("name", |r, n| r.owner = Some(text(n))),
        ("votes", |r, n| r.apply_children(n)),
        ("thumbsup", |r, n| r.thumbs_up = number(n)),
        ("thumbsdown", |r, n| r.thumbs_down = number(n)),
    ];
}

/// `artist.*` methods.
pub struct ArtistApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> ArtistApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Tag an artist with up to 10 `tags`.
    pub async fn add_tags(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "artist.addTags", params).await?;
        Ok(())
    }

    /// Canonical spellings for `artist`, most similar first.
    pub async fn get_correction(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(
            self.api,
            "artist.getCorrection",
            params,
            "corrections/correction/artist",
        )
        .await
    }

    /// Upcoming events for an artist.
    pub async fn get_events(&self, params: Params) -> Result<Vec<Event>> {
        fetch_records(self.api, "artist.getEvents", params, "events/event").await
    }

    /// Photos of an artist; `order` is `popularity` or `dateadded`.
    pub async fn get_images(&self, params: Params) -> Result<Vec<ArtistImage>> {
        fetch_records(self.api, "artist.getImages", params, "images/image").await
    }

    /// Metadata for an artist, including the biography.
    pub async fn get_info(&self, params: Params) -> Result<Artist> {
        fetch_record(self.api, "artist.getInfo", params).await
    }

    pub async fn get_past_events(&self, params: Params) -> Result<Vec<Event>> {
        fetch_records(self.api, "artist.getPastEvents", params, "events/event").await
    }

    pub async fn get_shouts(&self, params: Params) -> Result<Vec<Shout>> {
        fetch_records(self.api, "artist.getShouts", params, "shouts/shout").await
    }

    pub async fn get_similar(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(self.api, "artist.getSimilar", params, "similarartists/artist").await
    }

    /// Tags a user applied to an artist. Needs a session unless `user` is given.
    pub async fn get_tags(&self, params: Params) -> Result<Vec<Tag>> {
        get_user_tags(self.api, "artist.getTags", params).await
    }

    pub async fn get_top_albums(&self, params: Params) -> Result<Vec<Album>> {
        fetch_records(self.api, "artist.getTopAlbums", params, "topalbums/album").await
    }

    pub async fn get_top_fans(&self, params: Params) -> Result<Vec<User>> {
        fetch_records(self.api, "artist.getTopFans", params, "topfans/user").await
    }

    pub async fn get_top_tags(&self, params: Params) -> Result<Vec<Tag>> {
        fetch_records(self.api, "artist.getTopTags", params, "toptags/tag").await
    }

    pub async fn get_top_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "artist.getTopTracks", params, "toptracks/track").await
    }

    /// Remove one of the user's `tag`s from an artist.
    pub async fn remove_tag(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "artist.removeTag", params).await?;
        Ok(())
    }

    pub async fn search(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(self.api, "artist.search", params, "results/artistmatches/artist").await
    }

    /// Share an artist with up to 10 `recipient`s.
    pub async fn share(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "artist.share", params).await?;
        Ok(())
    }

    /// Post `message` to an artist's shoutbox.
    pub async fn shout(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "artist.shout", params).await?;
        Ok(())
    }
}
