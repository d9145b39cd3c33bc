//! People: contact data, gender code and linked role ids.

use serde::{Deserialize, Serialize};

use super::{Mutable, Resource, Validated};
use crate::coerce;
use crate::error::ApiError;
use crate::relationships::IncludedIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m")]
    Male,
    #[serde(rename = "w")]
    Female,
}

/// Attribute shape of a `people` node. Every field is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonAttributes {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub company_name: Option<String>,
    pub company: Option<bool>,
    pub email: Option<String>,
    pub street: Option<String>,
    pub housenumber: Option<String>,
    pub zip_code: Option<String>,
    pub town: Option<String>,
    pub country: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<String>,
    pub language: Option<String>,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub primary_group_id: Option<u64>,
    pub updated_at: Option<String>,
}

/// A member of the organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub company_name: Option<String>,
    pub company: bool,
    pub email: Option<String>,
    pub street: Option<String>,
    pub housenumber: Option<String>,
    pub zip_code: Option<String>,
    pub town: Option<String>,
    pub country: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<String>,
    pub language: Option<String>,
    pub primary_group_id: Option<u64>,
    pub role_ids: Vec<u64>,
    pub updated_at: Option<String>,
}

impl Person {
    /// "First Last", falling back to the nickname and then the company name.
    pub fn display_name(&self) -> Option<String> {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return Some(full);
        }
        self.nickname.clone().or_else(|| self.company_name.clone())
    }
}

impl Resource for Person {
    const TYPE: &'static str = "people";
    const PATH: &'static str = "people";

    type Attributes = PersonAttributes;

    fn assemble(node: Validated<PersonAttributes>, _: &IncludedIndex<'_>) -> Result<Self, ApiError> {
        let a = node.attributes;
        Ok(Person {
            id: node.id,
            first_name: a.first_name,
            last_name: a.last_name,
            nickname: a.nickname,
            company_name: a.company_name,
            company: a.company.unwrap_or(false),
            email: a.email,
            street: a.street,
            housenumber: a.housenumber,
            zip_code: a.zip_code,
            town: a.town,
            country: a.country,
            gender: a.gender,
            birthday: a.birthday,
            language: a.language,
            primary_group_id: a.primary_group_id,
            role_ids: node.relationships.ids("roles"),
            updated_at: a.updated_at,
        })
    }
}

/// Partial update of a person. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housenumber: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_group_id: Option<u64>,
}

impl Mutable for Person {
    type Update = PersonUpdate;
}
