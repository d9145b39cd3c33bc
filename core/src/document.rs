//! Raw JSON:API document model.
//!
//! These types capture only the structural envelope shared by every
//! resource kind: `data`, `included`, and the `{id, type, attributes,
//! relationships}` shape of a resource object. Attribute contents stay
//! untyped here; each kind's schema decodes them in `crate::schema`.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::coerce;

/// A response document. `data` is kept untyped so single and list
/// envelopes can be told apart and validated per entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub included: Vec<ResourceObject>,
}

/// One resource node, either primary or side-loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceObject {
    #[serde(deserialize_with = "coerce::integer")]
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub relationships: Relationships,
}

/// Pointer to another resource. `type` is optional on the wire; when it is
/// missing the relationship's expected type is assumed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResourceRef {
    #[serde(deserialize_with = "coerce::integer")]
    pub id: u64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Resource linkage of a relationship: to-one or to-many.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    Many(Vec<ResourceRef>),
    One(ResourceRef),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    /// Absent when the server sent only `links`/`meta`, `None` for `null`.
    #[serde(default)]
    pub data: Option<Linkage>,
}

/// Relationship name to linkage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Relationships(HashMap<String, Relationship>);

impl Relationships {
    /// References listed under `name`, in wire order. A missing relationship
    /// and a `null` linkage both yield an empty slice.
    pub fn refs(&self, name: &str) -> &[ResourceRef] {
        match self.0.get(name).and_then(|r| r.data.as_ref()) {
            Some(Linkage::Many(refs)) => refs,
            Some(Linkage::One(one)) => std::slice::from_ref(one),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn resource_object_parses_string_id() {
        let node: ResourceObject = serde_json::from_value(json!({
            "id": "42",
            "type": "people",
            "attributes": {"first_name": "Ada"}
        }))
        .unwrap();
        assert_eq!(node.id, 42);
        assert_eq!(node.kind, "people");
        assert_eq!(node.attributes["first_name"], "Ada");
        assert!(node.relationships.refs("roles").is_empty());
    }

    #[test]
    fn missing_type_is_rejected() {
        let result: Result<ResourceObject, _> = serde_json::from_value(json!({"id": "1"}));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("missing field `type`"), "{err}");
    }

    #[test]
    fn to_one_and_to_many_linkage() {
        let node: ResourceObject = serde_json::from_value(json!({
            "id": "1",
            "type": "roles",
            "relationships": {
                "person": {"data": {"id": "7", "type": "people"}},
                "dates": {"data": [{"id": "10"}, {"id": 11, "type": "event_dates"}]},
                "group": {"data": null},
                "links_only": {"links": {"related": "/api/x"}}
            }
        }))
        .unwrap();
        let rels = &node.relationships;
        assert_eq!(
            rels.refs("person"),
            &[ResourceRef { id: 7, kind: Some("people".to_string()) }]
        );
        assert_eq!(rels.refs("dates").len(), 2);
        assert_eq!(rels.refs("dates")[0].kind, None);
        assert!(rels.refs("group").is_empty());
        assert!(rels.refs("links_only").is_empty());
        assert!(rels.refs("absent").is_empty());
    }

    #[test]
    fn document_without_included_defaults_to_empty() {
        let doc: Document = serde_json::from_value(json!({"data": []})).unwrap();
        assert!(doc.included.is_empty());
        assert!(doc.data.is_some());
    }
}
