use crate::api::{fetch_records, post_authenticated, LastFmApi};
use crate::mapping::{flag, text, FieldRule, Record};
use crate::params::Params;
use crate::playlist::Playlist;
use crate::Result;
use serde::{Deserialize, Serialize};

/// A radio station, as returned by `radio.tune` and `radio.search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station kind, e.g. `artist`, `tag`, `user`
    pub station_type: Option<String>,
    pub name: Option<String>,
    /// `lastfm://` URL to pass back as `station`
    pub url: Option<String>,
    pub supports_discovery: bool,
}

impl Record for Station {
    const ELEMENT: &'static str = "station";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("type", |r, n| r.station_type = Some(text(n))),
        ("name", |r, n| r.name = Some(text(n))),
        ("url", |r, n| r.url = Some(text(n))),
        ("supportsdiscovery", |r, n| r.supports_discovery = flag(n)),
    ];
}

/// `radio.*` methods.
pub struct RadioApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> RadioApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Next tracks of the tuned station for the session user.
    ///
    /// Takes optional `discovery`, `rtp`, `bitrate`, `buylinks` and
    /// `speed_multiplier` (sent under that exact name).
    pub async fn get_playlist(&self, params: Params) -> Result<Playlist> {
        self.api.requires_authentication()?;
        self.api
            .get("radio.getPlaylist", params, true)
            .await?
            .record()
    }

    /// Stations matching `name`.
    pub async fn search(&self, params: Params) -> Result<Vec<Station>> {
        fetch_records(self.api, "radio.search", params, "stations/station").await
    }

    /// Tune the session user's radio to `station`.
    pub async fn tune(&self, params: Params) -> Result<Station> {
        post_authenticated(self.api, "radio.tune", params)
            .await?
            .record()
    }
}
