//! Generic XML-to-record mapping.
//!
//! Each record type declares a table of `(tag, rule)` pairs. A single walker,
//! [`Record::from_element`], visits the immediate children of the selected
//! element and hands each one to the rule registered for its tag. Rules coerce
//! scalars, recurse into nested records, accumulate repeated children, or
//! re-dispatch the children of a wrapper element through the same table.
//!
//! Conversion is lenient: a number or date that does not parse leaves its
//! field unset instead of failing the whole record, and unknown tags are
//! ignored.

use crate::envelope::{child_elements, ENVELOPE_ROOT};
use crate::{LastFmError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use xmltree::Element;

/// Conversion rule for one child tag of a record.
pub type FieldRule<R> = (&'static str, fn(&mut R, &Element));

/// A value object that can be populated from an XML element.
pub trait Record: Default + Sized + 'static {
    /// Name of the element holding this record inside a response envelope.
    const ELEMENT: &'static str;

    /// Tag-to-rule table consulted for every child element.
    const FIELDS: &'static [FieldRule<Self>];

    /// Populate `seed` from the children of `node`.
    fn from_element(node: &Element, seed: Self) -> Self {
        let mut record = seed;
        record.apply_children(node);
        record
    }

    /// Dispatch one child element through the field table.
    fn apply(&mut self, child: &Element) {
        match Self::FIELDS.iter().find(|(tag, _)| *tag == child.name) {
            Some((_, rule)) => rule(self, child),
            None => log::trace!("<{}>: ignoring <{}>", Self::ELEMENT, child.name),
        }
    }

    /// Re-dispatch every child of `wrapper` as if it were a child of the record.
    fn apply_children(&mut self, wrapper: &Element) {
        for child in child_elements(wrapper) {
            self.apply(child);
        }
    }
}

/// Map `node` into a record of type `R`, starting from `seed`.
///
/// When `node` is the envelope root, the child element named
/// [`Record::ELEMENT`] is selected first and its absence is a parse error.
/// Any other element is taken to be the record itself.
///
/// # Examples
///
/// ```rust
/// use lastfm_ws::mapping::map_from_xml;
/// use lastfm_ws::{Album, MaybeNested};
///
/// let xml = "<album><name>Believe</name><artist>Cher</artist><listeners>1000</listeners></album>";
/// let node = xmltree::Element::parse(xml.as_bytes()).unwrap();
/// let album: Album = map_from_xml(&node, Album::default()).unwrap();
///
/// assert_eq!(album.name.as_deref(), Some("Believe"));
/// assert_eq!(album.artist, Some(MaybeNested::Scalar("Cher".to_string())));
/// assert_eq!(album.listeners, Some(1000));
/// ```
pub fn map_from_xml<R: Record>(node: &Element, seed: R) -> Result<R> {
    let selected = if node.name == ENVELOPE_ROOT {
        child_elements(node)
            .find(|child| child.name == R::ELEMENT)
            .ok_or_else(|| {
                LastFmError::Parse(format!("Response has no <{}> element", R::ELEMENT))
            })?
    } else {
        node
    };
    Ok(R::from_element(selected, seed))
}

/// A field the service sends either as plain text or as a nested element.
///
/// `<artist>Cher</artist>` is [`MaybeNested::Scalar`];
/// `<artist><name>Cher</name><mbid>...</mbid></artist>` is
/// [`MaybeNested::Nested`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MaybeNested<T> {
    Scalar(String),
    Nested(Box<T>),
}

impl<T> MaybeNested<T> {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            MaybeNested::Scalar(s) => Some(s),
            MaybeNested::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&T> {
        match self {
            MaybeNested::Scalar(_) => None,
            MaybeNested::Nested(record) => Some(record),
        }
    }
}

/// Whether `node` has at least one child element (text does not count).
pub fn has_child_elements(node: &Element) -> bool {
    child_elements(node).next().is_some()
}

/// Resolve a scalar-or-nested field: text-only elements are scalars, anything
/// with child elements is mapped as `T`.
pub fn scalar_or_nested<T: Record>(node: &Element) -> MaybeNested<T> {
    if has_child_elements(node) {
        MaybeNested::Nested(Box::new(T::from_element(node, T::default())))
    } else {
        MaybeNested::Scalar(text(node))
    }
}

/// Trimmed text content, empty when the element has none.
pub fn text(node: &Element) -> String {
    node.get_text()
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// Numeric content, or `None` when it does not parse.
pub fn number<T: FromStr>(node: &Element) -> Option<T> {
    let raw = text(node);
    let parsed = raw.parse().ok();
    if parsed.is_none() && !raw.is_empty() {
        log::debug!("<{}>: dropping unparsable number '{raw}'", node.name);
    }
    parsed
}

/// `"1"` is true, anything else is false.
pub fn flag(node: &Element) -> bool {
    text(node) == "1"
}

/// Date content, or `None` when it matches none of the formats the service uses.
pub fn timestamp(node: &Element) -> Option<DateTime<Utc>> {
    let raw = text(node);
    let parsed = parse_timestamp(&raw);
    if parsed.is_none() && !raw.is_empty() {
        log::debug!("<{}>: dropping unparsable date '{raw}'", node.name);
    }
    parsed
}

/// Date from a `uts` or `unixtime` attribute, falling back to the element text.
///
/// Play dates look like `<date uts="1287140447">15 Oct 2010, 11:00</date>`,
/// registration dates like `<registered unixtime="1037793040">2002-11-20 11:50</registered>`.
pub fn dated(node: &Element) -> Option<DateTime<Utc>> {
    ["uts", "unixtime"]
        .iter()
        .find_map(|name| attribute::<i64>(node, name))
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .or_else(|| timestamp(node))
}

const DATETIME_FORMATS: &[&str] = &[
    "%a, %d %b %Y %H:%M:%S",
    "%d %b %Y, %H:%M",
    "%d %b %Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%d %b %Y", "%Y-%m-%d"];

/// Parse the date shapes found across web service responses.
///
/// Accepts Unix seconds, RFC 2822 (`Sun, 27 Jul 2008 15:44:58 +0000`), RFC
/// 3339, zone-less variants such as `Thu, 31 Mar 2011 20:00:00` or
/// `6 Apr 1999, 00:00` (read as UTC), and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<i64>()
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(raw, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

/// Record an `<image size="...">url</image>` element. Images without a size are skipped.
pub fn insert_image(images: &mut BTreeMap<String, String>, node: &Element) {
    match node.attributes.get("size") {
        Some(size) => {
            images.insert(size.clone(), text(node));
        }
        None => log::debug!("Skipping <{}> without a size attribute", node.name),
    }
}

/// Map every child of `node` named `tag` into a record.
pub fn collect<T: Record>(node: &Element, tag: &str) -> Vec<T> {
    child_elements(node)
        .filter(|child| child.name == tag)
        .map(|child| T::from_element(child, T::default()))
        .collect()
}

/// Text of every child of `node` named `tag`.
pub fn collect_text(node: &Element, tag: &str) -> Vec<String> {
    child_elements(node)
        .filter(|child| child.name == tag)
        .map(text)
        .collect()
}

/// Attribute value parsed as a number.
pub fn attribute<T: FromStr>(node: &Element, name: &str) -> Option<T> {
    node.attributes.get(name).and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[derive(Debug, Default, PartialEq)]
    struct Pair {
        name: Option<String>,
        count: Option<u32>,
        on: bool,
        when: Option<DateTime<Utc>>,
        inner: Option<MaybeNested<Pair>>,
    }

    impl Record for Pair {
        const ELEMENT: &'static str = "pair";
        const FIELDS: &'static [FieldRule<Self>] = &[
            ("name", |r, n| r.name = Some(text(n))),
            ("count", |r, n| r.count = number(n)),
            ("on", |r, n| r.on = flag(n)),
            ("when", |r, n| r.when = timestamp(n)),
            ("inner", |r, n| r.inner = Some(scalar_or_nested(n))),
            ("stats", |r, n| r.apply_children(n)),
        ];
    }

    fn parse(xml: &str) -> Element {
        Element::parse(xml.as_bytes()).unwrap()
    }

    #[test]
    fn test_descends_from_envelope_root() {
        let doc = parse(r#"<lfm status="ok"><pair><name>x</name></pair></lfm>"#);
        let pair: Pair = map_from_xml(&doc, Pair::default()).unwrap();
        assert_eq!(pair.name.as_deref(), Some("x"));
    }

    #[test]
    fn test_envelope_without_record_element_is_error() {
        let doc = parse(r#"<lfm status="ok"><other/></lfm>"#);
        assert!(matches!(
            map_from_xml::<Pair>(&doc, Pair::default()),
            Err(LastFmError::Parse(_))
        ));
    }

    #[test]
    fn test_fragment_is_used_directly() {
        let fragment = parse("<similar><name>y</name></similar>");
        let pair: Pair = map_from_xml(&fragment, Pair::default()).unwrap();
        assert_eq!(pair.name.as_deref(), Some("y"));
    }

    #[test]
    fn test_seed_fields_survive_and_unknown_tags_are_ignored() {
        let seed = Pair {
            count: Some(7),
            ..Default::default()
        };
        let pair = Pair::from_element(&parse("<pair><name>z</name><new_field>?</new_field></pair>"), seed);
        assert_eq!(pair.count, Some(7));
        assert_eq!(pair.name.as_deref(), Some("z"));
    }

    #[test]
    fn test_ambiguity_law() {
        let scalar = Pair::from_element(&parse("<pair><inner>Cher</inner></pair>"), Pair::default());
        assert_eq!(scalar.inner, Some(MaybeNested::Scalar("Cher".to_string())));

        let nested = Pair::from_element(
            &parse("<pair><inner><name>Cher</name></inner></pair>"),
            Pair::default(),
        );
        let inner = nested.inner.as_ref().and_then(MaybeNested::as_nested).unwrap();
        assert_eq!(inner.name.as_deref(), Some("Cher"));
    }

    #[test]
    fn test_wrapper_children_redispatch() {
        let pair = Pair::from_element(
            &parse("<pair><stats><count>12</count><on>1</on></stats></pair>"),
            Pair::default(),
        );
        assert_eq!(pair.count, Some(12));
        assert!(pair.on);
    }

    #[test]
    fn test_malformed_values_are_left_unset() {
        let pair = Pair::from_element(
            &parse("<pair><count>lots</count><when>sometime soon</when><name>ok</name></pair>"),
            Pair::default(),
        );
        assert_eq!(pair.count, None);
        assert_eq!(pair.when, None);
        assert_eq!(pair.name.as_deref(), Some("ok"));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("Sun, 27 Jul 2008 15:44:58 +0000").unwrap();
        assert_eq!((rfc.year(), rfc.month(), rfc.day()), (2008, 7, 27));

        let release = parse_timestamp("    6 Apr 1999, 00:00").unwrap();
        assert_eq!((release.year(), release.month(), release.day()), (1999, 4, 6));

        let event = parse_timestamp("Thu, 31 Mar 2011 20:00:00").unwrap();
        assert_eq!(event.timestamp(), 1301601600);

        assert_eq!(parse_timestamp("1301601600"), Some(event));
        assert!(parse_timestamp("2011-03-31").is_some());
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("not a date"), None);
    }

    #[test]
    fn test_images_keyed_by_size() {
        let node = parse(
            r#"<album><image size="small">s.png</image><image size="large">l.png</image><image>none.png</image></album>"#,
        );
        let mut images = BTreeMap::new();
        for child in child_elements(&node) {
            insert_image(&mut images, child);
        }
        assert_eq!(images.len(), 2);
        assert_eq!(images["small"], "s.png");
        assert_eq!(images["large"], "l.png");
    }

    #[test]
    fn test_dated_prefers_unix_attribute() {
        let played = dated(&parse(r#"<date uts="1287140447">15 Oct 2010, 11:00</date>"#));
        assert_eq!(played.map(|d| d.timestamp()), Some(1287140447));

        let registered = dated(&parse("<registered>2002-11-20 11:50</registered>"));
        assert_eq!(registered.map(|d| d.year()), Some(2002));

        assert_eq!(dated(&parse(r#"<date uts="soon">never</date>"#)), None);
    }
}
