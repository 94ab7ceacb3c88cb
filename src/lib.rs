//! Client for the Last.fm 2.0 web services.
//!
//! [`LastFmClient`] normalizes and signs call parameters, sends GET and POST
//! requests, validates the `<lfm>` response envelope and maps the payload into
//! typed records. Resource handles ([`AlbumApi`], [`ArtistApi`], [`UserApi`],
//! [`RadioApi`], ...) are thin wrappers over the client's [`LastFmApi`] implementation.

pub mod album;
pub mod api;
pub mod artist;
pub mod auth;
pub mod buylink;
pub mod chart;
pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod event;
pub mod geo;
pub mod group;
pub mod headers;
pub mod library;
pub mod mapping;
pub mod params;
pub mod playlist;
pub mod radio;
pub mod session;
pub mod session_persistence;
pub mod shout;
pub mod signature;
pub mod tag;
pub mod tasteometer;
pub mod track;
pub mod user;
pub mod venue;
pub mod wiki;

pub use album::{Album, AlbumApi};
pub use api::LastFmApi;
pub use artist::{Artist, ArtistApi, ArtistImage};
pub use auth::{AuthApi, Session};
pub use buylink::{Buylink, BuylinkKind, Price, Supplier};
pub use chart::{ChartApi, ChartRange};
pub use client::LastFmClient;
pub use config::{ClientConfig, Credentials, API_ROOT};
pub use envelope::Envelope;
pub use error::LastFmError;
pub use event::{AttendanceStatus, Event, EventApi};
pub use geo::{GeoApi, Metro};
pub use group::GroupApi;
pub use library::LibraryApi;
pub use mapping::{map_from_xml, MaybeNested, Record};
pub use params::{ParamValue, Params};
pub use playlist::{Playlist, PlaylistApi, PlaylistEntry};
pub use radio::{RadioApi, Station};
pub use session::ClientSession;
pub use session_persistence::SessionPersistence;
pub use shout::Shout;
pub use tag::{Tag, TagApi};
pub use tasteometer::{Comparison, TasteometerApi};
pub use track::{ScrobbleSummary, Track, TrackApi};
pub use user::{Taggings, User, UserApi};
pub use venue::{Location, Venue, VenueApi};
pub use wiki::Wiki;

#[cfg(feature = "mock")]
pub use api::MockLastFmApi;

pub type Result<T> = std::result::Result<T, LastFmError>;
