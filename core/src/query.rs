//! List options and their query-string encoding.
//!
//! Parameters are emitted in a fixed order: `include`, every `filter[...]`
//! in insertion order, `sort`, `page[number]`, `page[size]`. Keys and values
//! are form-urlencoded, so `filter[x]` goes on the wire as `filter%5Bx%5D`.

use std::fmt::Display;

use url::form_urlencoded;

/// Filtering, sorting and pagination for list requests.
///
/// ```
/// use hitobito_core::ListOptions;
///
/// let options = ListOptions::new()
///     .filter("primary_group_id", 5)
///     .sort("last_name")
///     .page(2)
///     .per_page(25);
/// assert_eq!(options.filters.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `filter[field]=value`. Repeated calls add independent filters.
    pub fn filter(mut self, field: impl Into<String>, value: impl Display) -> Self {
        self.filters.push((field.into(), value.to_string()));
        self
    }

    pub fn sort(mut self, key: impl Into<String>) -> Self {
        self.sort = Some(key.into());
        self
    }

    pub fn page(mut self, number: u32) -> Self {
        self.page = Some(number);
        self
    }

    pub fn per_page(mut self, size: u32) -> Self {
        self.per_page = Some(size);
        self
    }
}

/// Encodes the query string, or `None` when there is nothing to send.
pub(crate) fn encode(include: Option<&str>, options: Option<&ListOptions>) -> Option<String> {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut empty = true;
    let mut push = |key: &str, value: &str| {
        query.append_pair(key, value);
        empty = false;
    };

    if let Some(include) = include {
        push("include", include);
    }
    if let Some(options) = options {
        for (field, value) in &options.filters {
            push(&format!("filter[{field}]"), value);
        }
        if let Some(sort) = &options.sort {
            push("sort", sort);
        }
        if let Some(page) = options.page {
            push("page[number]", &page.to_string());
        }
        if let Some(size) = options.per_page {
            push("page[size]", &size.to_string());
        }
    }

    if empty {
        None
    } else {
        Some(query.finish())
    }
}
