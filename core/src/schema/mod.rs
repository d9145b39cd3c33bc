//! Per-kind decoding rules and domain types.
//!
//! # Design
//! Decoding a resource node is two separate steps:
//!
//! 1. [`Validated::from_value`] checks the node's structure, its `type` tag
//!    and its attributes against the kind's `Attributes` struct, producing a
//!    typed intermediate or a descriptive [`ApiError::Validation`].
//! 2. [`Resource::assemble`] maps that intermediate, plus the response's
//!    included index, onto the flattened domain value.
//!
//! Domain types are plain owned values with no link back to the response.

mod event;
mod event_kind;
mod group;
mod invoice;
mod mailing_list;
mod person;
mod role;

pub use event::{Event, EventAttributes, EventDate, EventDateAttributes, EventUpdate};
pub use event_kind::{
    EventKind, EventKindAttributes, EventKindCategory, EventKindCategoryAttributes,
};
pub use group::{Group, GroupAttributes, GroupUpdate};
pub use invoice::{Invoice, InvoiceAttributes, InvoiceState, InvoiceUpdate};
pub use mailing_list::{MailingList, MailingListAttributes, MailingListUpdate};
pub use person::{Gender, Person, PersonAttributes, PersonUpdate};
pub use role::{NewRole, Role, RoleAttributes, RoleUpdate};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::document::{Relationships, ResourceObject};
use crate::error::ApiError;
use crate::relationships::IncludedIndex;

/// A resource kind served under `/api/{PATH}`.
pub trait Resource: Sized {
    /// JSON:API `type` tag the primary node must carry.
    const TYPE: &'static str;
    /// URL segment below `/api`.
    const PATH: &'static str;
    /// Relationship to side-load on reads, if the kind expands one.
    const INCLUDE: Option<&'static str> = None;

    type Attributes: DeserializeOwned;

    fn assemble(
        node: Validated<Self::Attributes>,
        included: &IncludedIndex<'_>,
    ) -> Result<Self, ApiError>;
}

/// A kind that accepts partial-field updates.
pub trait Mutable: Resource {
    /// Partial attribute set; `None` fields are omitted from the body.
    type Update: Serialize;
}

/// A kind that can be created through the API.
pub trait Creatable: Resource {
    type New: Serialize;
}

/// Output of structural validation: the node's id, its typed attributes
/// and its raw relationships.
#[derive(Debug, Clone)]
pub struct Validated<A> {
    pub id: u64,
    pub attributes: A,
    pub relationships: Relationships,
}

impl<A: DeserializeOwned> Validated<A> {
    /// Validates an untyped node as a resource of type `kind`.
    pub fn from_value(kind: &'static str, node: Value) -> Result<Self, ApiError> {
        let object: ResourceObject = serde_json::from_value(node)
            .map_err(|e| ApiError::validation(kind, format!("malformed resource object: {e}")))?;
        Self::from_object(kind, object)
    }

    /// Validates an already-parsed node as a resource of type `kind`.
    pub fn from_object(kind: &'static str, object: ResourceObject) -> Result<Self, ApiError> {
        if object.kind != kind {
            return Err(ApiError::validation(
                kind,
                format!("expected type `{kind}`, found `{}`", object.kind),
            ));
        }
        let attributes = serde_json::from_value(Value::Object(object.attributes))
            .map_err(|e| ApiError::validation(&format!("{kind} {}", object.id), format!("attributes: {e}")))?;
        Ok(Self {
            id: object.id,
            attributes,
            relationships: object.relationships,
        })
    }
}

/// Validates and assembles one node as `R`.
pub fn decode<R: Resource>(node: Value, included: &IncludedIndex<'_>) -> Result<R, ApiError> {
    let validated = Validated::<R::Attributes>::from_value(R::TYPE, node)?;
    R::assemble(validated, included)
}
