//! Typed client core for a hitobito-style JSON:API membership service.
//!
//! # Overview
//! Builds `HttpRequest` values for `{base_url}/api/...`, classifies
//! `HttpResponse` status codes into [`ApiError`], and decodes JSON:API
//! documents (primary data, relationships, side-loaded `included`) into
//! flattened, validated domain values such as [`Person`] and [`Event`].
//!
//! # Design
//! - `HitobitoClient` is stateless apart from its base URL and token. Each
//!   operation is split into `build_*` (produces a request) and `parse_*`
//!   (consumes a response), so the I/O boundary is explicit.
//! - `Hitobito<T>` pairs the client with a [`Transport`] and exposes one
//!   accessor per resource kind. `UreqTransport` is the blocking default.
//! - Decoding is two-stage per kind: structural validation into a typed
//!   `Attributes` intermediate, then a pure assembly into the domain type
//!   with relationships resolved against an index over `included`.
//! - Nothing is cached or retried; every call is one independent exchange.

pub mod api;
pub mod client;
pub mod coerce;
pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod normalize;
pub mod query;
pub mod relationships;
pub mod schema;
pub mod transport;

pub use api::Hitobito;
pub use client::HitobitoClient;
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::ListOptions;
pub use schema::{
    Event, EventDate, EventKind, EventKindCategory, EventUpdate, Gender, Group, GroupUpdate,
    Invoice, InvoiceState, InvoiceUpdate, MailingList, MailingListUpdate, NewRole, Person,
    PersonUpdate, Role, RoleUpdate,
};
pub use transport::{Transport, UreqTransport};
