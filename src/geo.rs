use crate::api::{fetch_records, LastFmApi};
use crate::artist::Artist;
use crate::chart::{chart_ranges, ChartRange};
use crate::event::Event;
use crate::mapping::{text, FieldRule, Record};
use crate::params::Params;
use crate::track::Track;
use crate::Result;
use serde::{Deserialize, Serialize};

/// A metro area usable as `metro` in the `geo.getMetro*` charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metro {
    pub name: Option<String>,
    pub country: Option<String>,
}

impl Record for Metro {
    const ELEMENT: &'static str = "metro";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("name", |r, n| r.name = Some(text(n))),
        ("country", |r, n| r.country = Some(text(n))),
    ];
}

/// `geo.*` methods.
///
/// Metro charts take `country` and `metro`, plus optional `start`/`end`
/// bounds taken from [`GeoApi::get_metro_weekly_chartlist`].
pub struct GeoApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> GeoApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    async fn artist_chart(&self, method: &str, params: Params) -> Result<Vec<Artist>> {
        fetch_records(self.api, method, params, "topartists/artist").await
    }

    async fn track_chart(&self, method: &str, params: Params) -> Result<Vec<Track>> {
        fetch_records(self.api, method, params, "toptracks/track").await
    }

    /// Events near `location`, or near `lat`/`long` within `distance` km.
    pub async fn get_events(&self, params: Params) -> Result<Vec<Event>> {
        fetch_records(self.api, "geo.getEvents", params, "events/event").await
    }

    pub async fn get_metro_artist_chart(&self, params: Params) -> Result<Vec<Artist>> {
        self.artist_chart("geo.getMetroArtistChart", params).await
    }

    pub async fn get_metro_hype_artist_chart(&self, params: Params) -> Result<Vec<Artist>> {
        self.artist_chart("geo.getMetroHypeArtistChart", params).await
    }

    pub async fn get_metro_hype_track_chart(&self, params: Params) -> Result<Vec<Track>> {
        self.track_chart("geo.getMetroHypeTrackChart", params).await
    }

    pub async fn get_metro_track_chart(&self, params: Params) -> Result<Vec<Track>> {
        self.track_chart("geo.getMetroTrackChart", params).await
    }

    /// Artists that set a metro apart from the rest of its country.
    pub async fn get_metro_unique_artist_chart(&self, params: Params) -> Result<Vec<Artist>> {
        self.artist_chart("geo.getMetroUniqueArtistChart", params).await
    }

    pub async fn get_metro_unique_track_chart(&self, params: Params) -> Result<Vec<Track>> {
        self.track_chart("geo.getMetroUniqueTrackChart", params).await
    }

    pub async fn get_metro_weekly_chartlist(&self, params: Params) -> Result<Vec<ChartRange>> {
        let envelope = self
            .api
            .get("geo.getMetroWeeklyChartlist", params, false)
            .await?;
        Ok(chart_ranges(&envelope))
    }

    /// Known metros, optionally restricted to one `country`.
    pub async fn get_metros(&self, params: Params) -> Result<Vec<Metro>> {
        fetch_records(self.api, "geo.getMetros", params, "metros/metro").await
    }

    pub async fn get_top_artists(&self, params: Params) -> Result<Vec<Artist>> {
        self.artist_chart("geo.getTopArtists", params).await
    }

    pub async fn get_top_tracks(&self, params: Params) -> Result<Vec<Track>> {
        self.track_chart("geo.getTopTracks", params).await
    }
}
