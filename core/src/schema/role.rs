//! Roles link a person to a group.
//!
//! `person_id` and `group_id` are read from the `person` and `group`
//! relationships only, defaulting to `0` when a relationship is absent.
//! Attribute fields of the same name are ignored on read.

use serde::{Deserialize, Serialize};

use super::{Creatable, Mutable, Resource, Validated};
use crate::error::ApiError;
use crate::relationships::IncludedIndex;

#[derive(Debug, Clone, Deserialize)]
pub struct RoleAttributes {
    /// Fully qualified role type, e.g. `Group::Region::Leader`.
    #[serde(rename = "type")]
    pub role_type: String,
    pub label: Option<String>,
    pub start_on: Option<String>,
    pub end_on: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub person_id: u64,
    pub group_id: u64,
    pub role_type: String,
    pub label: Option<String>,
    pub start_on: Option<String>,
    pub end_on: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Resource for Role {
    const TYPE: &'static str = "roles";
    const PATH: &'static str = "roles";

    type Attributes = RoleAttributes;

    fn assemble(node: Validated<RoleAttributes>, _: &IncludedIndex<'_>) -> Result<Self, ApiError> {
        let a = node.attributes;
        Ok(Role {
            id: node.id,
            person_id: node.relationships.id("person").unwrap_or(0),
            group_id: node.relationships.id("group").unwrap_or(0),
            role_type: a.role_type,
            label: a.label,
            start_on: a.start_on,
            end_on: a.end_on,
            created_at: a.created_at,
            updated_at: a.updated_at,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_on: Option<String>,
}

/// Payload for creating a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRole {
    pub person_id: u64,
    pub group_id: u64,
    #[serde(rename = "type")]
    pub role_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_on: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_on: Option<String>,
}

impl Mutable for Role {
    type Update = RoleUpdate;
}

impl Creatable for Role {
    type New = NewRole;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::decode;
    use serde_json::json;

    fn role(value: serde_json::Value) -> Role {
        decode(value, &IncludedIndex::default()).unwrap()
    }

    #[test]
    fn linkage_comes_from_relationships() {
        let r = role(json!({
            "id": "4",
            "type": "roles",
            "attributes": {"type": "Group::Member", "person_id": 99, "group_id": 98},
            "relationships": {
                "person": {"data": {"id": "7", "type": "people"}},
                "group": {"data": {"id": "2", "type": "groups"}}
            }
        }));
        assert_eq!(r.person_id, 7);
        assert_eq!(r.group_id, 2);
        assert_eq!(r.role_type, "Group::Member");
    }

    #[test]
    fn missing_linkage_defaults_to_zero() {
        let r = role(json!({
            "id": "4",
            "type": "roles",
            "attributes": {"type": "Group::Member", "person_id": 99},
            "relationships": {"group": {"data": null}}
        }));
        assert_eq!(r.person_id, 0);
        assert_eq!(r.group_id, 0);
    }

    #[test]
    fn role_type_is_required() {
        let err = decode::<Role>(
            json!({"id": "4", "type": "roles", "attributes": {"label": "Chair"}}),
            &IncludedIndex::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref msg) if msg.contains("missing field `type`")));
    }

    #[test]
    fn new_role_serializes_type_tag() {
        let input = NewRole {
            person_id: 7,
            group_id: 2,
            role_type: "Group::Member".to_string(),
            label: None,
            start_on: Some("2024-01-01".to_string()),
            end_on: None,
        };
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"person_id": 7, "group_id": 2, "type": "Group::Member", "start_on": "2024-01-01"})
        );
    }
}
