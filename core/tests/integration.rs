//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `Hitobito` with the
//! default `UreqTransport` over real HTTP. Validates that request building,
//! status classification and JSON:API decoding agree with an actual server,
//! including string-encoded ids and side-loaded event dates.

use std::net::SocketAddr;

use hitobito_core::{
    ApiError, ClientConfig, Gender, Hitobito, ListOptions, NewRole, PersonUpdate, RoleUpdate,
};

/// Start the mock server on a random port in a background thread.
fn spawn_server(token: &'static str) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, token).await
        })
        .unwrap();
    });

    addr
}

fn connect(addr: SocketAddr, token: &str) -> Hitobito {
    let config = ClientConfig::new(format!("http://{addr}/"), token).unwrap();
    Hitobito::new(&config)
}

#[test]
fn membership_lifecycle() {
    let api = connect(spawn_server("secret"), "secret");

    // Step 1: filtered list; the server sends primary_group_id as a string.
    let people = api
        .get_people(&ListOptions::new().filter("primary_group_id", 2))
        .unwrap();
    let ids: Vec<u64> = people.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(people.iter().all(|p| p.primary_group_id == Some(2)));

    // Step 2: pagination.
    let page = api.get_people(&ListOptions::new().page(2).per_page(2)).unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, 3);

    // Step 3: single person with role linkage.
    let grace = api.get_person(3).unwrap();
    assert_eq!(grace.nickname.as_deref(), Some("Amazing Grace"));
    assert_eq!(grace.gender, Some(Gender::Female));
    assert_eq!(grace.role_ids, vec![3]);

    // Step 4: partial update leaves other attributes alone.
    let update = PersonUpdate {
        nickname: Some("Countess".to_string()),
        ..Default::default()
    };
    let ada = api.update_person(1, &update).unwrap();
    assert_eq!(ada.nickname.as_deref(), Some("Countess"));
    assert_eq!(ada.first_name.as_deref(), Some("Ada"));
    assert_eq!(api.get_person(1).unwrap(), ada);

    // Step 5: event with side-loaded dates.
    let camp = api.get_event(1).unwrap();
    assert_eq!(camp.name, "Summer Camp");
    assert_eq!(camp.participant_count, 12);
    assert_eq!(camp.group_ids, vec![2]);
    let date_ids: Vec<u64> = camp.dates.iter().map(|d| d.id).collect();
    assert_eq!(date_ids, vec![10, 11]);
    assert_eq!(camp.dates[1].label.as_deref(), Some("Reunion"));

    let events = api.get_events(&ListOptions::default()).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].dates.len(), 1);
    assert_eq!(events[1].group_ids, vec![1, 2]);

    // Step 6: group type attribute.
    let leaders = api.get_group(3).unwrap();
    assert_eq!(leaders.group_type.as_deref(), Some("Group::RegionBoard"));
    assert_eq!(leaders.parent_id, Some(2));
    assert!(!leaders.layer);

    // Step 7: create a role.
    let input = NewRole {
        person_id: 3,
        group_id: 2,
        role_type: "Group::Region::Member".to_string(),
        label: None,
        start_on: None,
        end_on: None,
    };
    let created = api.create_role(&input).unwrap();
    assert_eq!(created.id, 4);
    assert_eq!(created.person_id, 3);
    assert_eq!(created.group_id, 2);
    assert_eq!(created.role_type, "Group::Region::Member");

    // Step 8: update its label.
    let update = RoleUpdate {
        label: Some("Treasurer".to_string()),
        ..Default::default()
    };
    let updated = api.update_role(created.id, &update).unwrap();
    assert_eq!(updated.label.as_deref(), Some("Treasurer"));
    assert_eq!(api.get_person(3).unwrap().role_ids, vec![3, 4]);

    // Step 9: filtered role list.
    let board = api.get_roles(&ListOptions::new().filter("group_id", 3)).unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].label.as_deref(), Some("Secretary"));

    // Step 10: delete, then the role is gone.
    api.delete_role(created.id).unwrap();
    assert!(matches!(api.get_role(created.id), Err(ApiError::NotFound)));
    assert!(matches!(api.delete_role(created.id), Err(ApiError::NotFound)));

    // Step 11: the server rejects a role for an unknown person.
    let orphan = NewRole {
        person_id: 99,
        ..input
    };
    let err = api.create_role(&orphan).unwrap_err();
    assert!(matches!(err, ApiError::Transport { status: Some(422), .. }), "{err:?}");

    // Step 12: unknown ids.
    assert!(matches!(api.get_person(999), Err(ApiError::NotFound)));
    assert!(matches!(api.get_event(999), Err(ApiError::NotFound)));
}

#[test]
fn wrong_token_is_forbidden() {
    let api = connect(spawn_server("secret"), "guess");

    let err = api.get_groups(&ListOptions::default()).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { status: 403 }), "{err:?}");
    assert!(err.is_forbidden());
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = connect(addr, "secret").get_person(1).unwrap_err();
    assert!(matches!(err, ApiError::Transport { status: None, .. }), "{err:?}");
}
