//! Events and their dates.
//!
//! Dates are side-loaded through `include=dates` and expanded from
//! `included`; group links stay plain ids.

use serde::{Deserialize, Serialize};

use super::{Mutable, Resource, Validated};
use crate::coerce;
use crate::error::ApiError;
use crate::relationships::{expand, IncludedIndex};

#[derive(Debug, Clone, Deserialize)]
pub struct EventAttributes {
    pub name: String,
    pub description: Option<String>,
    pub motto: Option<String>,
    pub cost: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub kind_id: Option<u64>,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub maximum_participants: Option<u64>,
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub participant_count: Option<u64>,
    pub external_applications: Option<bool>,
    pub application_opening_at: Option<String>,
    pub application_closing_at: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// An event with its owning group ids and its side-loaded dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub motto: Option<String>,
    pub cost: Option<String>,
    pub location: Option<String>,
    pub state: Option<String>,
    pub kind_id: Option<u64>,
    pub maximum_participants: Option<u64>,
    pub participant_count: u64,
    pub external_applications: bool,
    pub application_opening_at: Option<String>,
    pub application_closing_at: Option<String>,
    pub group_ids: Vec<u64>,
    pub dates: Vec<EventDate>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Event {
    /// Whether the participant limit is reached. Unlimited events are never full.
    pub fn is_full(&self) -> bool {
        self.maximum_participants
            .is_some_and(|max| self.participant_count >= max)
    }
}

impl Resource for Event {
    const TYPE: &'static str = "events";
    const PATH: &'static str = "events";
    const INCLUDE: Option<&'static str> = Some("dates");

    type Attributes = EventAttributes;

    fn assemble(node: Validated<EventAttributes>, included: &IncludedIndex<'_>) -> Result<Self, ApiError> {
        let dates = expand::<EventDate>(&node.relationships, "dates", included)?;
        let a = node.attributes;
        Ok(Event {
            id: node.id,
            name: a.name,
            description: a.description,
            motto: a.motto,
            cost: a.cost,
            location: a.location,
            state: a.state,
            kind_id: a.kind_id,
            maximum_participants: a.maximum_participants,
            participant_count: a.participant_count.unwrap_or(0),
            external_applications: a.external_applications.unwrap_or(false),
            application_opening_at: a.application_opening_at,
            application_closing_at: a.application_closing_at,
            group_ids: node.relationships.ids("groups"),
            dates,
            created_at: a.created_at,
            updated_at: a.updated_at,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDateAttributes {
    #[serde(default, deserialize_with = "coerce::option_integer")]
    pub event_id: Option<u64>,
    pub label: Option<String>,
    pub start_at: String,
    pub finish_at: Option<String>,
    pub location: Option<String>,
}

/// One date range of an event. Only reachable through [`Event::dates`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    pub id: u64,
    pub event_id: Option<u64>,
    pub label: Option<String>,
    pub start_at: String,
    pub finish_at: Option<String>,
    pub location: Option<String>,
}

impl Resource for EventDate {
    const TYPE: &'static str = "event_dates";
    const PATH: &'static str = "event_dates";

    type Attributes = EventDateAttributes;

    fn assemble(node: Validated<EventDateAttributes>, _: &IncludedIndex<'_>) -> Result<Self, ApiError> {
        let a = node.attributes;
        Ok(EventDate {
            id: node.id,
            event_id: a.event_id,
            label: a.label,
            start_at: a.start_at,
            finish_at: a.finish_at,
            location: a.location,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motto: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_participants: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_applications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_opening_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_closing_at: Option<String>,
}

impl Mutable for Event {
    type Update = EventUpdate;
}
