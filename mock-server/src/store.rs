use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub town: Option<String>,
    pub gender: Option<String>,
    pub primary_group_id: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    pub group_type: String,
    pub layer: bool,
    pub parent_id: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventDate {
    pub id: u64,
    pub label: Option<String>,
    pub start_at: String,
    pub finish_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub name: String,
    pub participant_count: u64,
    pub group_ids: Vec<u64>,
    pub dates: Vec<EventDate>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub person_id: u64,
    pub group_id: u64,
    pub role_type: String,
    pub label: Option<String>,
}

/// In-memory data behind the mock API, seeded with a small federation.
#[derive(Debug, Default)]
pub struct Store {
    pub people: BTreeMap<u64, Person>,
    pub groups: BTreeMap<u64, Group>,
    pub events: BTreeMap<u64, Event>,
    pub roles: BTreeMap<u64, Role>,
    next_role_id: u64,
}

impl Store {
    pub fn seeded() -> Self {
        let mut store = Store {
            next_role_id: 1,
            ..Default::default()
        };

        for (id, name, group_type, layer, parent_id) in [
            (1, "Federation", "Group::Federation", true, None),
            (2, "Bern", "Group::Region", true, Some(1)),
            (3, "Leaders", "Group::RegionBoard", false, Some(2)),
        ] {
            store.groups.insert(
                id,
                Group {
                    id,
                    name: name.to_string(),
                    group_type: group_type.to_string(),
                    layer,
                    parent_id,
                },
            );
        }

        for (id, first, last, nickname, gender, group) in [
            (1, "Ada", "Lovelace", None, "w", 2),
            (2, "Charles", "Babbage", None, "m", 2),
            (3, "Grace", "Hopper", Some("Amazing Grace"), "w", 3),
        ] {
            store.people.insert(
                id,
                Person {
                    id,
                    first_name: first.to_string(),
                    last_name: last.to_string(),
                    nickname: nickname.map(str::to_string),
                    email: Some(format!("{}@example.com", first.to_lowercase())),
                    town: Some("Bern".to_string()),
                    gender: Some(gender.to_string()),
                    primary_group_id: group,
                },
            );
        }

        store.insert_role(1, 2, "Group::Region::Leader", None);
        store.insert_role(2, 2, "Group::Region::Member", None);
        store.insert_role(3, 3, "Group::RegionBoard::Member", Some("Secretary"));

        store.events.insert(
            1,
            Event {
                id: 1,
                name: "Summer Camp".to_string(),
                participant_count: 12,
                group_ids: vec![2],
                dates: vec![
                    EventDate {
                        id: 10,
                        label: None,
                        start_at: "2024-07-01T00:00:00Z".to_string(),
                        finish_at: Some("2024-07-14T12:00:00Z".to_string()),
                    },
                    EventDate {
                        id: 11,
                        label: Some("Reunion".to_string()),
                        start_at: "2024-09-01T18:00:00Z".to_string(),
                        finish_at: None,
                    },
                ],
            },
        );
        store.events.insert(
            2,
            Event {
                id: 2,
                name: "Leader Training".to_string(),
                participant_count: 0,
                group_ids: vec![1, 2],
                dates: vec![EventDate {
                    id: 12,
                    label: None,
                    start_at: "2024-10-05T09:00:00Z".to_string(),
                    finish_at: None,
                }],
            },
        );

        store
    }

    pub fn insert_role(
        &mut self,
        person_id: u64,
        group_id: u64,
        role_type: &str,
        label: Option<&str>,
    ) -> Role {
        let role = Role {
            id: self.next_role_id,
            person_id,
            group_id,
            role_type: role_type.to_string(),
            label: label.map(str::to_string),
        };
        self.next_role_id += 1;
        self.roles.insert(role.id, role.clone());
        role
    }

    pub fn person_resource(&self, person: &Person) -> Value {
        let roles: Vec<Value> = self
            .roles
            .values()
            .filter(|role| role.person_id == person.id)
            .map(|role| reference("roles", role.id))
            .collect();
        json!({
            "id": person.id.to_string(),
            "type": "people",
            "attributes": {
                "first_name": person.first_name,
                "last_name": person.last_name,
                "nickname": person.nickname,
                "email": person.email,
                "town": person.town,
                "gender": person.gender,
                // the real service is inconsistent here; keep clients honest
                "primary_group_id": person.primary_group_id.to_string(),
            },
            "relationships": {"roles": {"data": roles}}
        })
    }
}

impl Group {
    pub fn resource(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "type": "groups",
            "attributes": {
                "name": self.name,
                "type": self.group_type,
                "layer": self.layer,
                "parent_id": self.parent_id,
            }
        })
    }
}

impl Event {
    pub fn resource(&self) -> Value {
        let dates: Vec<Value> = self
            .dates
            .iter()
            .map(|date| json!({"id": date.id.to_string()}))
            .collect();
        let groups: Vec<Value> = self
            .group_ids
            .iter()
            .map(|id| reference("groups", *id))
            .collect();
        json!({
            "id": self.id.to_string(),
            "type": "events",
            "attributes": {
                "name": self.name,
                "participant_count": self.participant_count.to_string(),
            },
            "relationships": {
                "dates": {"data": dates},
                "groups": {"data": groups},
            }
        })
    }

    pub fn date_resources(&self) -> impl Iterator<Item = Value> + '_ {
        self.dates.iter().map(move |date| {
            json!({
                "id": date.id.to_string(),
                "type": "event_dates",
                "attributes": {
                    "event_id": self.id,
                    "label": date.label,
                    "start_at": date.start_at,
                    "finish_at": date.finish_at,
                }
            })
        })
    }
}

impl Role {
    pub fn resource(&self) -> Value {
        json!({
            "id": self.id.to_string(),
            "type": "roles",
            "attributes": {
                "type": self.role_type,
                "label": self.label,
            },
            "relationships": {
                "person": {"data": reference("people", self.person_id)},
                "group": {"data": reference("groups", self.group_id)},
            }
        })
    }
}

fn reference(kind: &str, id: u64) -> Value {
    json!({"id": id.to_string(), "type": kind})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_store_links_roles_to_people() {
        let store = Store::seeded();
        let ada = &store.people[&1];
        let resource = store.person_resource(ada);
        assert_eq!(resource["id"], "1");
        assert_eq!(resource["attributes"]["primary_group_id"], "2");
        assert_eq!(resource["relationships"]["roles"]["data"][0]["id"], "1");
    }

    #[test]
    fn event_dates_reference_without_type() {
        let store = Store::seeded();
        let camp = store.events[&1].resource();
        assert_eq!(camp["relationships"]["dates"]["data"][0], json!({"id": "10"}));
        let dates: Vec<Value> = store.events[&1].date_resources().collect();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[1]["attributes"]["label"], "Reunion");
    }

    #[test]
    fn role_ids_are_sequential() {
        let mut store = Store::seeded();
        let role = store.insert_role(1, 3, "Group::RegionBoard::Member", None);
        assert_eq!(role.id, 4);
        assert_eq!(store.roles.len(), 4);
    }
}
