use crate::api::{fetch_record, fetch_records, get_user_tags, post_authenticated, LastFmApi};
use crate::artist::Artist;
use crate::buylink::{Buylink, BuylinkKind};
use crate::envelope::{child_elements, Envelope};
use crate::mapping::{
    attribute, collect, flag, insert_image, number, scalar_or_nested, text, timestamp, FieldRule,
    MaybeNested, Record,
};
use crate::params::Params;
use crate::shout::Shout;
use crate::tag::Tag;
use crate::track::Track;
use crate::wiki::Wiki;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use xmltree::Element;

/// An album as returned by `album.*` methods and in album lists.
///
/// `artist` is plain text in most responses and a nested element in a few
/// (see [`MaybeNested`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub name: Option<String>,
    pub artist: Option<MaybeNested<Artist>>,
    pub id: Option<u64>,
    pub mbid: Option<String>,
    pub url: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    /// Image URLs keyed by size (`small`, `medium`, `large`, ...)
    pub images: BTreeMap<String, String>,
    pub listeners: Option<u64>,
    pub playcount: Option<u64>,
    pub streamable: bool,
    pub tags: Vec<Tag>,
    /// Track listing in album order
    pub tracks: Vec<Track>,
    pub wiki: Option<Wiki>,
}

impl Album {
    /// Artist name, whichever form the response used.
    pub fn artist_name(&self) -> Option<&str> {
        match self.artist.as_ref()? {
            MaybeNested::Scalar(name) => Some(name),
            MaybeNested::Nested(artist) => artist.name.as_deref(),
        }
    }

    fn set_tracks(&mut self, node: &Element) {
        let album = self.name.clone();
        self.tracks = child_elements(node)
            .filter(|child| child.name == Track::ELEMENT)
            .map(|child| {
                let seed = Track::on_album(album.clone(), attribute(child, "rank"));
                Track::from_element(child, seed)
            })
            .collect();
    }
}

impl Record for Album {
    const ELEMENT: &'static str = "album";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("name", |r, n| r.name = Some(text(n))),
        ("title", |r, n| r.name = Some(text(n))),
        ("artist", |r, n| r.artist = Some(scalar_or_nested(n))),
        ("id", |r, n| r.id = number(n)),
        ("mbid", |r, n| r.mbid = Some(text(n))),
        ("url", |r, n| r.url = Some(text(n))),
        ("releasedate", |r, n| r.release_date = timestamp(n)),
        ("image", |r, n| insert_image(&mut r.images, n)),
        ("listeners", |r, n| r.listeners = number(n)),
        ("playcount", |r, n| r.playcount = number(n)),
        ("streamable", |r, n| r.streamable = flag(n)),
        ("tags", |r, n| r.tags = collect(n, "tag")),
        ("toptags", |r, n| r.tags = collect(n, "tag")),
        ("tracks", |r, n| r.set_tracks(n)),
        ("wiki", |r, n| r.wiki = Some(Wiki::from_element(n, Wiki::default()))),
    ];
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("<unknown album>");
        match self.artist_name() {
            Some(artist) => write!(f, "{artist} - {name}"),
            None => write!(f, "{name}"),
        }
    }
}

/// `album.*` methods.
pub struct AlbumApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> AlbumApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Tag an album with up to 10 `tags`.
    pub async fn add_tags(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "album.addTags", params).await?;
        Ok(())
    }

    /// Places to buy or download an album in `country`; physical links first.
    pub async fn get_buylinks(&self, params: Params) -> Result<Vec<Buylink>> {
        let envelope = self.api.get("album.getBuylinks", params, false).await?;
        Ok(buylinks(&envelope))
    }

    /// Metadata for an album, including its track listing.
    pub async fn get_info(&self, params: Params) -> Result<Album> {
        fetch_record(self.api, "album.getInfo", params).await
    }

    pub async fn get_shouts(&self, params: Params) -> Result<Vec<Shout>> {
        fetch_records(self.api, "album.getShouts", params, "shouts/shout").await
    }

    /// Tags a user applied to an album. Needs a session unless `user` is given.
    pub async fn get_tags(&self, params: Params) -> Result<Vec<Tag>> {
        get_user_tags(self.api, "album.getTags", params).await
    }

    pub async fn get_top_tags(&self, params: Params) -> Result<Vec<Tag>> {
        fetch_records(self.api, "album.getTopTags", params, "toptags/tag").await
    }

    /// Remove one of the user's `tag`s from an album.
    pub async fn remove_tag(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "album.removeTag", params).await?;
        Ok(())
    }

    /// Albums matching `album`, by relevance.
    pub async fn search(&self, params: Params) -> Result<Vec<Album>> {
        fetch_records(self.api, "album.search", params, "results/albummatches/album").await
    }

    /// Share an album with up to 10 `recipient`s.
    pub async fn share(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "album.share", params).await?;
        Ok(())
    }
}

/// Every `<affiliation>` in a buylinks response, tagged with its section.
pub(crate) fn buylinks(envelope: &Envelope) -> Vec<Buylink> {
    [BuylinkKind::Physical, BuylinkKind::Download]
        .into_iter()
        .flat_map(|kind| {
            envelope
                .find(&format!("affiliations/{}/affiliation", kind.section()))
                .into_iter()
                .map(move |node| Buylink::from_element(node, Buylink::new(kind)))
        })
        .collect()
}
