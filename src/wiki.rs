use crate::mapping::{text, timestamp, FieldRule, Record};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wiki entry attached to an album, artist, track or tag.
///
/// Artist responses call this element `<bio>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wiki {
    pub published: Option<DateTime<Utc>>,
    pub summary: Option<String>,
    pub content: Option<String>,
}

impl Record for Wiki {
    const ELEMENT: &'static str = "wiki";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("published", |r, n| r.published = timestamp(n)),
        ("summary", |r, n| r.summary = Some(text(n))),
        ("content", |r, n| r.content = Some(text(n))),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use xmltree::Element;

    #[test]
    fn test_wiki_from_bio() {
        let xml = r#"<bio>
            <published>Sun, 27 Jul 2008 15:44:58 +0000</published>
            <summary><![CDATA[Cher is an <a href="x">American</a> singer]]></summary>
            <content>Full text</content>
        </bio>"#;
        let node = Element::parse(xml.as_bytes()).unwrap();
        let wiki = Wiki::from_element(&node, Wiki::default());

        assert_eq!(wiki.published.map(|p| p.year()), Some(2008));
        assert_eq!(
            wiki.summary.as_deref(),
            Some(r#"Cher is an <a href="x">American</a> singer"#)
        );
        assert_eq!(wiki.content.as_deref(), Some("Full text"));
    }
}
