//! The `<lfm>` response envelope and its validation.
//!
//! Every web service response is wrapped in
//! `<lfm status="ok">payload</lfm>` or
//! `<lfm status="failed"><error code="N">message</error></lfm>`.

use crate::mapping::{map_from_xml, Record};
use crate::{LastFmError, Result};
use xmltree::{Element, XMLNode};

/// Name of the envelope's root element.
pub const ENVELOPE_ROOT: &str = "lfm";

/// A parsed response document.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    root: Element,
}

impl Envelope {
    /// Parse a raw response body.
    ///
    /// Only checks well-formedness; call [`Envelope::validate`] before reading
    /// the payload.
    pub fn parse(body: &str) -> Result<Self> {
        let root = Element::parse(body.as_bytes())
            .map_err(|e| LastFmError::Parse(format!("Invalid XML response: {e}")))?;
        Ok(Self { root })
    }

    /// Parse and validate in one step.
    pub fn from_body(body: &str) -> Result<Self> {
        Self::parse(body)?.validate()
    }

    /// Return the envelope unchanged if its status is `ok`.
    ///
    /// A `failed` status becomes [`LastFmError::Api`] carrying the text of the
    /// `<error>` element verbatim. A root without a status attribute, or a failure
    /// without an `<error>` child, is reported as [`LastFmError::Parse`].
    pub fn validate(self) -> Result<Self> {
        match self.status() {
            Some("ok") => Ok(self),
            Some("failed") => {
                let error = self.root.get_child("error").ok_or_else(|| {
                    LastFmError::Parse("Failed response without an <error> element".to_string())
                })?;
                let message = error.get_text().map(|t| t.into_owned()).unwrap_or_default();
                let code = error
                    .attributes
                    .get("code")
                    .and_then(|c| c.trim().parse().ok())
                    .unwrap_or(0);
                log::debug!("Last.fm returned error {code}: {message}");
                Err(LastFmError::Api { code, message })
            }
            Some(other) => Err(LastFmError::Parse(format!(
                "Unexpected response status '{other}'"
            ))),
            None => Err(LastFmError::Parse(format!(
                "Response root <{}> has no status attribute",
                self.root.name
            ))),
        }
    }

    /// The root `status` attribute.
    pub fn status(&self) -> Option<&str> {
        self.root.attributes.get("status").map(String::as_str)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// All elements reached by a `/`-separated path of child names, relative to
    /// the root, in document order.
    ///
    /// `find("results/albummatches/album")` yields every `<album>` under every
    /// `<albummatches>` under every `<results>`.
    pub fn find(&self, path: &str) -> Vec<&Element> {
        find_path(&self.root, path)
    }

    /// First element matching [`Envelope::find`].
    pub fn find_first(&self, path: &str) -> Option<&Element> {
        self.find(path).into_iter().next()
    }

    /// Map the payload element named after `R` into a record.
    pub fn record<R: Record>(&self) -> Result<R> {
        map_from_xml(&self.root, R::default())
    }

    /// Map every element at `path` into a record.
    pub fn records<R: Record>(&self, path: &str) -> Vec<R> {
        self.find(path)
            .into_iter()
            .map(|node| R::from_element(node, R::default()))
            .collect()
    }
}

/// Walk `path` from `root`; see [`Envelope::find`].
pub fn find_path<'a>(root: &'a Element, path: &str) -> Vec<&'a Element> {
    let mut current = vec![root];
    for step in path.split('/').filter(|s| !s.is_empty()) {
        current = current
            .into_iter()
            .flat_map(|parent| child_elements(parent).filter(move |child| child.name == step))
            .collect();
    }
    current
}

/// Immediate child elements, skipping text and comments.
pub fn child_elements(parent: &Element) -> impl Iterator<Item = &Element> {
    parent.children.iter().filter_map(XMLNode::as_element)
}
