use crate::api::{fetch_record, LastFmApi};
use crate::artist::Artist;
use crate::mapping::{attribute, collect, number, FieldRule, Record};
use crate::params::Params;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Result of `tasteometer.compare`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Between 0 (no overlap) and 1
    pub score: Option<f64>,
    /// Number of shared artists, which can exceed the ones listed
    pub matches: Option<u32>,
    pub artists: Vec<Artist>,
}

impl Record for Comparison {
    const ELEMENT: &'static str = "comparison";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("result", |r, n| r.apply_children(n)),
        ("score", |r, n| r.score = number(n)),
        ("artists", |r, n| {
            r.matches = attribute(n, "matches");
            r.artists = collect(n, "artist");
        }),
    ];
}

/// `tasteometer.*` methods.
pub struct TasteometerApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> TasteometerApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Compare two inputs. Each side is a `type1`/`value1` pair, where the type is
    /// `user`, `artists` or `myspace` and a list of artists is comma separated.
    pub async fn compare(&self, params: Params) -> Result<Comparison> {
        fetch_record(self.api, "tasteometer.compare", params).await
    }
}
