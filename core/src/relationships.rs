//! Resolution of relationship references against the `included` table.
//!
//! # Design
//! The side-loaded table is indexed once per response into a
//! `type -> id -> node` map; every relationship of every primary entry then
//! resolves with two hash lookups. Output order always follows the
//! relationship's reference list, duplicates included. References that do
//! not resolve, whether absent from `included` or naming another type, are
//! dropped with a warning rather than failing the document.

use std::collections::HashMap;

use tracing::warn;

use crate::document::{Relationships, ResourceObject};
use crate::error::ApiError;
use crate::schema::{Resource, Validated};

/// Lookup table over a response's `included` resources, keyed by
/// `(type, id)`. When the same key appears twice the first node wins.
#[derive(Debug, Default)]
pub struct IncludedIndex<'a> {
    nodes: HashMap<&'a str, HashMap<u64, &'a ResourceObject>>,
}

impl<'a> IncludedIndex<'a> {
    pub fn new(included: &'a [ResourceObject]) -> Self {
        let mut nodes: HashMap<&'a str, HashMap<u64, &'a ResourceObject>> = HashMap::new();
        for node in included {
            nodes
                .entry(node.kind.as_str())
                .or_default()
                .entry(node.id)
                .or_insert(node);
        }
        Self { nodes }
    }

    pub fn get(&self, kind: &str, id: u64) -> Option<&'a ResourceObject> {
        self.nodes.get(kind)?.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Relationships {
    /// Ids of a to-many relationship, taken straight from the references.
    pub fn ids(&self, name: &str) -> Vec<u64> {
        self.refs(name).iter().map(|r| r.id).collect()
    }

    /// Id of a to-one relationship, or `None` when absent or `null`.
    pub fn id(&self, name: &str) -> Option<u64> {
        self.refs(name).first().map(|r| r.id)
    }
}

/// Decodes the side-loaded records referenced by relationship `name` as `R`.
///
/// References without a `type` are looked up as `R::TYPE`. A reference that
/// names a different type, or that is missing from `included`, does not
/// resolve and is skipped. Only an invalid side-loaded record fails.
pub fn expand<R: Resource>(
    relationships: &Relationships,
    name: &str,
    included: &IncludedIndex<'_>,
) -> Result<Vec<R>, ApiError> {
    let refs = relationships.refs(name);
    let mut records = Vec::with_capacity(refs.len());
    for reference in refs {
        let kind = reference.kind.as_deref().unwrap_or(R::TYPE);
        if kind != R::TYPE {
            warn!(
                relationship = name,
                kind,
                id = reference.id,
                expected = R::TYPE,
                "dropping reference of unexpected type"
            );
            continue;
        }
        let Some(node) = included.get(kind, reference.id) else {
            warn!(
                relationship = name,
                kind,
                id = reference.id,
                "dropping reference missing from included"
            );
            continue;
        };
        let validated = Validated::<R::Attributes>::from_object(R::TYPE, node.clone())?;
        records.push(R::assemble(validated, included)?);
    }
    Ok(records)
}
