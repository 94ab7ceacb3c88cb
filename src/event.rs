use crate::api::{fetch_record, fetch_records, post_authenticated, LastFmApi};
use crate::mapping::{collect_text, flag, insert_image, number, text, timestamp, FieldRule, Record};
use crate::params::Params;
use crate::shout::Shout;
use crate::user::User;
use crate::venue::Venue;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A concert or festival.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<u64>,
    pub title: Option<String>,
    /// Every performing artist, headliner included
    pub artists: Vec<String>,
    pub headliner: Option<String>,
    pub venue: Option<Venue>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    pub images: BTreeMap<String, String>,
    pub attendance: Option<u64>,
    pub reviews: Option<u64>,
    /// Last.fm's machine tag for the event, e.g. `lastfm:event=328799`
    pub tag: Option<String>,
    pub url: Option<String>,
    pub website: Option<String>,
    pub cancelled: bool,
    pub tags: Vec<String>,
}

impl Record for Event {
    const ELEMENT: &'static str = "event";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("id", |r, n| r.id = number(n)),
        ("title", |r, n| r.title = Some(text(n))),
        ("artists", |r, n| r.apply_children(n)),
        ("artist", |r, n| r.artists.push(text(n))),
        ("headliner", |r, n| r.headliner = Some(text(n))),
        ("venue", |r, n| r.venue = Some(Venue::from_element(n, Venue::default()))),
        ("startDate", |r, n| r.start_date = timestamp(n)),
        ("endDate", |r, n| r.end_date = timestamp(n)),
        ("description", |r, n| r.description = Some(text(n))),
        ("image", |r, n| insert_image(&mut r.images, n)),
        ("attendance", |r, n| r.attendance = number(n)),
        ("reviews", |r, n| r.reviews = number(n)),
        ("tag", |r, n| r.tag = Some(text(n))),
        ("url", |r, n| r.url = Some(text(n))),
        ("website", |r, n| r.website = Some(text(n))),
        ("cancelled", |r, n| r.cancelled = flag(n)),
        ("tags", |r, n| r.tags = collect_text(n, "tag")),
    ];
}

/// A user's answer to an event invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Attending,
    MaybeAttending,
    NotAttending,
}

impl AttendanceStatus {
    /// Numeric code used by `event.attend`.
    pub fn code(self) -> u32 {
        match self {
            AttendanceStatus::Attending => 0,
            AttendanceStatus::MaybeAttending => 1,
            AttendanceStatus::NotAttending => 2,
        }
    }
}

/// `event.*` methods.
pub struct EventApi<'a> {
    api: &'a dyn LastFmApi,
}

impl<'a> EventApi<'a> {
    pub fn new(api: &'a dyn LastFmApi) -> Self {
        Self { api }
    }

    /// Set the user's attendance for `event`.
    pub async fn attend(&self, params: Params, status: AttendanceStatus) -> Result<()> {
        let params = params.with("status", status.code());
        post_authenticated(self.api, "event.attend", params).await?;
        Ok(())
    }

    /// Users attending `event`.
    pub async fn get_attendees(&self, params: Params) -> Result<Vec<User>> {
        fetch_records(self.api, "event.getAttendees", params, "attendees/user").await
    }

    /// Metadata for `event`, with lineup and venue.
    pub async fn get_info(&self, params: Params) -> Result<Event> {
        fetch_record(self.api, "event.getInfo", params).await
    }

    pub async fn get_shouts(&self, params: Params) -> Result<Vec<Shout>> {
        fetch_records(self.api, "event.getShouts", params, "shouts/shout").await
    }

    /// Share an event with up to 10 `recipient`s.
    pub async fn share(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "event.share", params).await?;
        Ok(())
    }

    /// Post `message` to an event's shoutbox.
    pub async fn shout(&self, params: Params) -> Result<()> {
        post_authenticated(self.api, "event.shout", params).await?;
        Ok(())
    }
}
