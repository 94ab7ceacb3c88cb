use crate::api::{fetch_records, LastFmApi};
use crate::artist::Artist;
use crate::envelope::Envelope;
use crate::mapping::attribute;
use crate::params::Params;
use crate::tag::Tag;
use crate::track::Track;
use crate::Result;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use xmltree::Element;

/// One week of a weekly chart, as listed by the `*.getWeeklyChartList` methods.
///
/// Pass the raw bounds back as `from`/`to` to fetch that week's chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ChartRange {
    fn from_node(node: &Element) -> Self {
        let at = |name| {
            attribute::<i64>(node, name).and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        };
        Self {
            from: at("from"),
            to: at("to"),
        }
    }
}

/// Every `<chart from=".." to=".."/>` in a weekly chart list response.
pub(crate) fn chart_ranges(envelope: &Envelope) -> Vec<ChartRange> {
    envelope
        .find("weeklychartlist/chart")
        .into_iter()
        .map(ChartRange::from_node)
        .collect()
}

/// `chart.*` methods: site-wide charts. All take optional `page` and `limit`.
pub struct ChartApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> ChartApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    pub async fn get_hyped_artists(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(self.api, "chart.getHypedArtists", params, "artists/artist").await
    }

    pub async fn get_hyped_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "chart.getHypedTracks", params, "tracks/track").await
    }

    pub async fn get_loved_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "chart.getLovedTracks", params, "tracks/track").await
    }

    pub async fn get_top_artists(&self, params: Params) -> Result<Vec<Artist>> {
        fetch_records(self.api, "chart.getTopArtists", params, "artists/artist").await
    }

    pub async fn get_top_tags(&self, params: Params) -> Result<Vec<Tag>> {
        fetch_records(self.api, "chart.getTopTags", params, "tags/tag").await
    }

    pub async fn get_top_tracks(&self, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, "chart.getTopTracks", params, "tracks/track").await
    }
}
