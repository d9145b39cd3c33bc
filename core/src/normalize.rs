//! Uniform decoding of single-resource and list envelopes.
//!
//! Both forms share the same `included` table, indexed once per document.
//! List decoding is fail-fast: the first entry that does not validate fails
//! the whole call, with its position prefixed to the message.

use serde_json::Value;
use tracing::debug;

use crate::document::{Document, ResourceObject};
use crate::error::ApiError;
use crate::relationships::IncludedIndex;
use crate::schema::{decode, Resource};

/// Decodes `{data: {...}, included?}` as one `R`.
pub fn single<R: Resource>(document: Value) -> Result<R, ApiError> {
    let Document { data, included } = parse_envelope::<R>(document)?;
    let node = match data {
        Some(node @ Value::Object(_)) => node,
        Some(Value::Array(_)) => {
            return Err(ApiError::validation(R::TYPE, "expected a single resource, found a list"))
        }
        Some(_) | None => return Err(ApiError::validation(R::TYPE, "document has no primary data")),
    };
    let index = index_included(&included);
    decode(node, &index)
}

/// Decodes `{data: [...], included?}` as a list of `R`, preserving order.
pub fn list<R: Resource>(document: Value) -> Result<Vec<R>, ApiError> {
    let Document { data, included } = parse_envelope::<R>(document)?;
    let nodes = match data {
        Some(Value::Array(nodes)) => nodes,
        Some(Value::Object(_)) => {
            return Err(ApiError::validation(R::TYPE, "expected a list, found a single resource"))
        }
        Some(_) | None => return Err(ApiError::validation(R::TYPE, "document has no primary data")),
    };
    let index = index_included(&included);
    nodes
        .into_iter()
        .enumerate()
        .map(|(position, node)| decode(node, &index).map_err(|e| at_position(position, e)))
        .collect()
}

fn index_included(included: &[ResourceObject]) -> IncludedIndex<'_> {
    let index = IncludedIndex::new(included);
    if !index.is_empty() {
        debug!(entries = index.len(), "indexed included resources");
    }
    index
}

fn parse_envelope<R: Resource>(document: Value) -> Result<Document, ApiError> {
    serde_json::from_value(document)
        .map_err(|e| ApiError::validation(R::TYPE, format!("malformed document: {e}")))
}

fn at_position(position: usize, error: ApiError) -> ApiError {
    match error {
        ApiError::Validation(msg) => ApiError::Validation(format!("data[{position}]: {msg}")),
        other => other,
    }
}
