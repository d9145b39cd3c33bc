//! Groups in the organisational tree. The wire attribute `type` becomes
//! `group_type`.

use serde::{Deserialize, Serialize};

use super::{Mutable, Resource, Validated};
use crate::coerce;
use crate::error::ApiError;
use crate::relationships::IncludedIndex;

#[derive(Debug, Clone, Deserialize)]
pub struct GroupAttributes {
    pub name: String,
    pub short_name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    /// Fully qualified group type, e.g. `Group::Region`.
    #[serde(rename = "type")]
    pub group_type: Option<String>,
    pub layer: Option<bool>,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub parent_id: Option<u64>,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub layer_group_id: Option<u64>,
    pub archived_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub short_name: Option<String>,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub group_type: Option<String>,
    pub layer: bool,
    pub parent_id: Option<u64>,
    pub layer_group_id: Option<u64>,
    pub archived_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Group {
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

impl Resource for Group {
    const TYPE: &'static str = "groups";
    const PATH: &'static str = "groups";

    type Attributes = GroupAttributes;

    fn assemble(node: Validated<GroupAttributes>, _: &IncludedIndex<'_>) -> Result<Self, ApiError> {
        let a = node.attributes;
        Ok(Group {
            id: node.id,
            name: a.name,
            short_name: a.short_name,
            display_name: a.display_name,
            description: a.description,
            email: a.email,
            group_type: a.group_type,
            layer: a.layer.unwrap_or(false),
            parent_id: a.parent_id,
            layer_group_id: a.layer_group_id,
            archived_at: a.archived_at,
            created_at: a.created_at,
            updated_at: a.updated_at,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Mutable for Group {
    type Update = GroupUpdate;
}
