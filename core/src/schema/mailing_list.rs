//! Mailing lists and their subscription settings.

use serde::{Deserialize, Serialize};

use super::{Mutable, Resource, Validated};
use crate::coerce;
use crate::error::ApiError;
use crate::relationships::IncludedIndex;

#[derive(Debug, Clone, Deserialize)]
pub struct MailingListAttributes {
    pub name: String,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub group_id: Option<u64>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub mail_name: Option<String>,
    pub main_email: Option<String>,
    pub additional_sender: Option<String>,
    pub subscribable_for: Option<String>,
    pub subscribable_mode: Option<String>,
    pub subscribers_may_post: Option<bool>,
    pub anyone_may_post: Option<bool>,
    pub preferred_labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingList {
    pub id: u64,
    pub name: String,
    pub group_id: Option<u64>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub mail_name: Option<String>,
    pub main_email: Option<String>,
    pub additional_sender: Option<String>,
    pub subscribable_for: Option<String>,
    pub subscribable_mode: Option<String>,
    pub subscribers_may_post: bool,
    pub anyone_may_post: bool,
    pub preferred_labels: Vec<String>,
}

impl Resource for MailingList {
    const TYPE: &'static str = "mailing_lists";
    const PATH: &'static str = "mailing_lists";

    type Attributes = MailingListAttributes;

    fn assemble(node: Validated<MailingListAttributes>, _: &IncludedIndex<'_>) -> Result<Self, ApiError> {
        let a = node.attributes;
        Ok(MailingList {
            id: node.id,
            name: a.name,
            group_id: a.group_id,
            description: a.description,
            publisher: a.publisher,
            mail_name: a.mail_name,
            main_email: a.main_email,
            additional_sender: a.additional_sender,
            subscribable_for: a.subscribable_for,
            subscribable_mode: a.subscribable_mode,
            subscribers_may_post: a.subscribers_may_post.unwrap_or(false),
            anyone_may_post: a.anyone_may_post.unwrap_or(false),
            preferred_labels: a.preferred_labels.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MailingListUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribable_for: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribers_may_post: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anyone_may_post: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_labels: Option<Vec<String>>,
}

impl Mutable for MailingList {
    type Update = MailingListUpdate;
}
