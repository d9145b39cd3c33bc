//! Event kinds and the categories that group them. Read-only.

use serde::{Deserialize, Serialize};

use super::{Resource, Validated};
use crate::coerce;
use crate::error::ApiError;
use crate::relationships::IncludedIndex;

#[derive(Debug, Clone, Deserialize)]
pub struct EventKindAttributes {
    pub label: String,
    pub short_name: Option<String>,
    pub general_information: Option<String>,
    pub application_conditions: Option<String>,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub minimum_age: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A course type. `kind_category_id` comes from the `kind_category`
/// relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventKind {
    pub id: u64,
    pub label: String,
    pub short_name: Option<String>,
    pub general_information: Option<String>,
    pub application_conditions: Option<String>,
    pub minimum_age: Option<u64>,
    pub kind_category_id: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Resource for EventKind {
    const TYPE: &'static str = "event_kinds";
    const PATH: &'static str = "event_kinds";

    type Attributes = EventKindAttributes;

    fn assemble(node: Validated<EventKindAttributes>, _: &IncludedIndex<'_>) -> Result<Self, ApiError> {
        let a = node.attributes;
        Ok(EventKind {
            id: node.id,
            label: a.label,
            short_name: a.short_name,
            general_information: a.general_information,
            application_conditions: a.application_conditions,
            minimum_age: a.minimum_age,
            kind_category_id: node.relationships.id("kind_category"),
            created_at: a.created_at,
            updated_at: a.updated_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventKindCategoryAttributes {
    pub label: String,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub order: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventKindCategory {
    pub id: u64,
    pub label: String,
    pub order: Option<u64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Resource for EventKindCategory {
    const TYPE: &'static str = "event_kind_categories";
    const PATH: &'static str = "event_kind_categories";

    type Attributes = EventKindCategoryAttributes;

    fn assemble(
        node: Validated<EventKindCategoryAttributes>,
        _: &IncludedIndex<'_>,
    ) -> Result<Self, ApiError> {
        let a = node.attributes;
        Ok(EventKindCategory {
            id: node.id,
            label: a.label,
            order: a.order,
            created_at: a.created_at,
            updated_at: a.updated_at,
        })
    }
}
