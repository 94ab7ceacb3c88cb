use crate::mapping::{text, timestamp, FieldRule, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A shoutbox message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shout {
    pub author: Option<String>,
    pub body: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

impl Record for Shout {
    const ELEMENT: &'static str = "shout";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("author", |r, n| r.author = Some(text(n))),
        ("body", |r, n| r.body = Some(text(n))),
        ("date", |r, n| r.date = timestamp(n)),
    ];
}
