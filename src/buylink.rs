use crate::mapping::{flag, number, text, FieldRule, Record};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a link is for a physical purchase or a download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuylinkKind {
    #[default]
    Physical,
    Download,
}

impl BuylinkKind {
    /// Element wrapping links of this kind inside `<affiliations>`.
    pub fn section(self) -> &'static str {
        match self {
            BuylinkKind::Physical => "physicals",
            BuylinkKind::Download => "downloads",
        }
    }
}

impl fmt::Display for BuylinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuylinkKind::Physical => write!(f, "physical"),
            BuylinkKind::Download => write!(f, "download"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: Option<f64>,
    pub currency: Option<String>,
}

/// A place to buy or download an album or track.
///
/// The kind is not part of the `<affiliation>` element; callers seed it from
/// the section the element was found in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Buylink {
    pub kind: BuylinkKind,
    pub supplier: Option<Supplier>,
    pub price: Option<Price>,
    pub link: Option<String>,
    pub is_search: bool,
}

impl Buylink {
    pub fn new(kind: BuylinkKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    fn supplier_mut(&mut self) -> &mut Supplier {
        self.supplier.get_or_insert_with(Supplier::default)
    }

    fn price_mut(&mut self) -> &mut Price {
        self.price.get_or_insert_with(Price::default)
    }
}

impl Record for Buylink {
    const ELEMENT: &'static str = "affiliation";
    const FIELDS: &'static [FieldRule<Self>] = &[
        ("supplierName", |r, n| r.supplier_mut().name = Some(text(n))),
        ("supplierIcon", |r, n| r.supplier_mut().icon = Some(text(n))),
        ("price", |r, n| r.apply_children(n)),
        ("amount", |r, n| r.price_mut().amount = number(n)),
        ("currency", |r, n| r.price_mut().currency = Some(text(n))),
        ("buyLink", |r, n| r.link = Some(text(n))),
        ("isSearch", |r, n| r.is_search = flag(n)),
    ];
}
