use crate::album::Album;
use crate::api::{fetch_record, fetch_records, LastFmApi};
use crate::artist::Artist;
use crate::chart::{chart_ranges, ChartRange};
use crate::mapping::{flag, number, text, FieldRule, Record};
use crate::params::Params;
use crate::track::Track;
use crate::wiki::Wiki;
use crate::Result;
use serde::{Deserialize, Serialize};

/// A tag, either global or applied by a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: Option<String>,
    /// Times applied; only present in per-item tag lists
    pub count: Option<u64>,
    pub url: Option<String>,
    pub reach: Option<u64>,
    pub taggings: Option<u64>,
    pub streamable: bool,
    pub wiki: Option<Wiki>,
}

impl Record for Tag {
    const ELEMENT: &'static str = "tag";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("name", |r, n| r.name = Some(text(n))),
        ("count", |r, n| r.count = number(n)),
        ("url", |r, n| r.url = Some(text(n))),
        ("reach", |r, n| r.reach = number(n)),
        ("taggings", |r, n| r.taggings = number(n)),
        ("streamable", |r, n| r.streamable = flag(n)),
        ("wiki", |r, n| r.wiki = Some(Wiki::from_element(n, Wiki::default()))),
    ];
}

/// `tag.*` methods.
pub struct TagApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> TagApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Metadata for a tag. Takes `tag` and optionally `lang`.
    pub async fn get_info(&self, params: Params) -> Result<Tag> {
        fetch_record(self.api, "tag.getInfo", params).await
    }

    /// Tags similar to `tag`, ranked by similarity.
    pub async fn get_similar(&self, params: Params) -> Result<Vec<Tag>> {
        fetch_records(self.api, "tag.getSimilar", params, "similartags/tag").await
    }

    /// Albums most tagged with `tag`.
    pub async fn get_top_albums(&self, params: Params) -> Result<Vec<Album>> {
        fetch_records(self.api, "tag.getTopAlbums", params, "topalbums/album").await
    }

    pub async fn get_top_artists(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(self.api, "tag.getTopArtists", params, "topartists/artist").await
    }

    /// Top global tags by use.
    pub async fn get_top_tags(&self) -> Result<Vec<Tag>> {
        fetch_records(self.api, "tag.getTopTags", Params::new(), "toptags/tag").await
    }

    pub async fn get_top_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "tag.getTopTracks", params, "toptracks/track").await
    }

    /// Artist chart for `tag` over one week; omit `from`/`to` for the latest.
    pub async fn get_weekly_artist_chart(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(
            self.api,
            "tag.getWeeklyArtistChart",
            params,
            "weeklyartistchart/artist",
        )
        .await
    }

    pub async fn get_weekly_chart_list(&self, params: Params) -> Result<Vec<ChartRange>> {
        let envelope = self.api.get("tag.getWeeklyChartList", params, false).await?;
        Ok(chart_ranges(&envelope))
    }

    /// Tags matching `tag`, by relevance.
    pub async fn search(&self, params: Params) -> Result<Vec<Tag>> {
        fetch_records(self.api, "tag.search", params, "results/tagmatches/tag").await
    }
}
