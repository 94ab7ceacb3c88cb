//! Call parameters and their normalization into wire form.
//!
//! Resource operations take a [`Params`] bag built from loosely typed values.
//! Before a request is sent the bag is normalized: absent values are dropped,
//! booleans become `"1"`/`"0"`, lists are comma-joined, timestamps become Unix
//! seconds, and snake_case names are renamed to the camelCase names the web
//! service expects.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Parameter names whose wire name does not follow the camelCase rule.
const KEY_EXCEPTIONS: &[(&str, &str)] = &[
    ("playlist_id", "playlistID"),
    ("playlist_url", "playlistURL"),
    ("speed_multiplier", "speed_multiplier"),
    ("fingerprint_id", "fingerprintid"),
];

/// A single call argument before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
    List(Vec<String>),
}

impl ParamValue {
    /// Canonical wire form of the value, or `None` when it must be omitted.
    fn to_wire(&self) -> Option<String> {
        match self {
            ParamValue::Str(s) => Some(s.clone()),
            ParamValue::Int(i) => Some(i.to_string()),
            ParamValue::UInt(u) => Some(u.to_string()),
            ParamValue::Float(f) => Some(f.to_string()),
            ParamValue::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            ParamValue::Timestamp(t) => Some(t.timestamp().to_string()),
            ParamValue::List(items) if items.is_empty() => None,
            ParamValue::List(items) => Some(items.join(",")),
        }
    }

    /// Elements used when the value is spread over indexed `name[i]` keys.
    pub(crate) fn into_elements(self) -> Vec<ParamValue> {
        match self {
            ParamValue::List(items) => items.into_iter().map(ParamValue::Str).collect(),
            other => vec![other],
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::UInt(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        ParamValue::Timestamp(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ParamValue {
    fn from(value: &[&str]) -> Self {
        ParamValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Loosely typed call arguments for a web service method.
///
/// Insertion order is irrelevant to the wire format. Setting the same name twice
/// keeps the last value.
///
/// # Examples
///
/// ```rust
/// use lastfm_ws::Params;
///
/// let params = Params::new()
///     .with("autocorrect", true)
///     .with_opt("limit", None::<u32>)
///     .with("tags", vec!["rock", "pop"]);
///
/// let wire = params.normalize();
/// assert_eq!(wire.get("autocorrect").map(String::as_str), Some("1"));
/// assert_eq!(wire.get("tags").map(String::as_str), Some("rock,pop"));
/// assert!(!wire.contains_key("limit"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Option<ParamValue>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value under `name`.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.set(name, Some(value.into()));
        self
    }

    /// Add an optional value; `None` is recorded as absent and never transmitted.
    pub fn with_opt<V: Into<ParamValue>>(mut self, name: &str, value: Option<V>) -> Self {
        self.set(name, value.map(Into::into));
        self
    }

    /// Spread `values` over indexed names `name[0]`, `name[1]`, ...
    ///
    /// Only the batch endpoints (scrobbling and library additions) accept this form.
    pub fn with_indexed<V: Into<ParamValue>>(
        mut self,
        name: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        for (index, value) in values.into_iter().enumerate() {
            self.set(&format!("{name}[{index}]"), Some(value.into()));
        }
        self
    }

    /// Rewrite every entry into the array-indexed batch form.
    ///
    /// A list value contributes one indexed entry per element; any other value
    /// becomes entry `[0]`. Names that are already indexed are kept as they
    /// are. Absent values stay absent.
    pub fn into_indexed(self) -> Self {
        let mut indexed = Params::new();
        for (name, value) in self.entries {
            match value {
                Some(value) if name.ends_with(']') => indexed.set(&name, Some(value)),
                Some(value) => indexed = indexed.with_indexed(&name, value.into_elements()),
                None => {}
            }
        }
        indexed
    }

    /// Remove and return the value stored under `name`.
    pub fn take(&mut self, name: &str) -> Option<ParamValue> {
        let position = self.entries.iter().position(|(key, _)| key == name)?;
        self.entries.remove(position).1
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Whether a non-absent value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn set(&mut self, name: &str, value: Option<ParamValue>) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Produce the canonical wire mapping: renamed keys and string values.
    pub fn normalize(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .filter_map(|(name, value)| {
                let wire = value.as_ref()?.to_wire()?;
                Some((camel_case(name), wire))
            })
            .collect()
    }
}

/// Convert a snake_case parameter name to the service's wire name.
///
/// The exception table wins over the generic rule. Otherwise every
/// `_`-separated word is capitalized (first letter upper, rest lower) and the
/// first letter of the result is lower-cased.
pub fn camel_case(key: &str) -> String {
    if let Some((_, wire)) = KEY_EXCEPTIONS.iter().find(|(name, _)| *name == key) {
        return (*wire).to_string();
    }

    let joined: String = key.split('_').map(capitalize).collect();
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
