use crate::api::{fetch_records, LastFmApi};
use crate::event::Event;
use crate::mapping::{insert_image, number, text, FieldRule, Record};
use crate::params::Params;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Street address and coordinates of a venue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: Option<String>,
    pub country: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Record for Location {
    const ELEMENT: &'static str = "location";
    // `<geo:point>` children arrive under their local names.
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("city", |r, n| r.city = Some(text(n))),
        ("country", |r, n| r.country = Some(text(n))),
        ("street", |r, n| r.street = Some(text(n))),
        ("postalcode", |r, n| r.postal_code = Some(text(n))),
        ("point", |r, n| r.apply_children(n)),
        ("lat", |r, n| r.latitude = number(n)),
        ("long", |r, n| r.longitude = number(n)),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub location: Option<Location>,
    pub url: Option<String>,
    pub website: Option<String>,
    pub phone_number: Option<String>,
    pub images: BTreeMap<String, String>,
}

impl Record for Venue {
    const ELEMENT: &'static str = "venue";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("id", |r, n| r.id = number(n)),
        ("name", |r, n| r.name = Some(text(n))),
        ("location", |r, n| {
            r.location = Some(Location::from_element(n, Location::default()))
        }),
        ("url", |r, n| r.url = Some(text(n))),
        ("website", |r, n| r.website = Some(text(n))),
        ("phonenumber", |r, n| r.phone_number = Some(text(n))),
        ("image", |r, n| insert_image(&mut r.images, n)),
    ];
}

/// `venue.*` methods.
pub struct VenueApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> VenueApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Upcoming events at `venue` (a venue id).
    pub async fn get_events(&self, params: Params) -> Result<Vec<Event>> {
        fetch_records(self.api, "venue.getEvents", params, "events/event").await
    }

    pub async fn get_past_events(&self, params: Params) -> Result<Vec<Event>> {
        fetch_records(self.api, "venue.getPastEvents", params, "events/event").await
    }

    /// Venues whose name matches `venue`, optionally within `country`.
    pub async fn search(&self, params: Params) -> Result<Vec<Venue>> {
        fetch_records(self.api, "venue.search", params, "results/venuematches/venue").await
    }
}
