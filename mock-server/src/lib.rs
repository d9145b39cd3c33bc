//! In-process stand-in for a hitobito JSON:API endpoint.
//!
//! Serves seeded people, groups, events (with side-loadable dates) and
//! roles under `/api`, guarded by an `X-Token` header check.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

mod store;

pub use store::{Event, EventDate, Group, Person, Role, Store};

pub const DEFAULT_TOKEN: &str = "secret";

type Params = HashMap<String, String>;

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    store: Arc<RwLock<Store>>,
}

/// JSON:API write document: `{"data": {"type": ..., "attributes": {...}}}`.
#[derive(Deserialize)]
pub struct WriteDocument<A> {
    pub data: WriteData<A>,
}

#[derive(Deserialize)]
pub struct WriteData<A> {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: A,
}

#[derive(Deserialize)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<String>,
    pub email: Option<String>,
    pub town: Option<String>,
    pub gender: Option<String>,
    pub primary_group_id: Option<u64>,
}

#[derive(Deserialize)]
pub struct CreateRole {
    pub person_id: u64,
    pub group_id: u64,
    #[serde(rename = "type")]
    pub role_type: String,
    pub label: Option<String>,
}

#[derive(Deserialize)]
pub struct RolePatch {
    pub label: Option<String>,
}

pub fn app() -> Router {
    app_with_token(DEFAULT_TOKEN)
}

pub fn app_with_token(token: &str) -> Router {
    let state = AppState {
        token: Arc::from(token),
        store: Arc::new(RwLock::new(Store::seeded())),
    };
    Router::new()
        .route("/api/people", get(list_people))
        .route("/api/people/{id}", get(get_person).patch(update_person))
        .route("/api/groups", get(list_groups))
        .route("/api/groups/{id}", get(get_group))
        .route("/api/events", get(list_events))
        .route("/api/events/{id}", get(get_event))
        .route("/api/roles", get(list_roles).post(create_role))
        .route(
            "/api/roles/{id}",
            get(get_role).patch(update_role).delete(delete_role),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock hitobito api listening");
    }
    axum::serve(listener, app_with_token(token)).await
}

async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    match request.headers().get("x-token").and_then(|v| v.to_str().ok()) {
        None => Err(StatusCode::UNAUTHORIZED),
        Some(token) if token == &*state.token => Ok(next.run(request).await),
        Some(_) => Err(StatusCode::FORBIDDEN),
    }
}

fn document(data: Value) -> Json<Value> {
    Json(json!({ "data": data }))
}

fn expect_kind<A>(body: &WriteDocument<A>, kind: &str) -> Result<(), StatusCode> {
    if body.data.kind == kind {
        Ok(())
    } else {
        Err(StatusCode::CONFLICT)
    }
}

fn parse_param<T: std::str::FromStr>(params: &Params, key: &str) -> Result<Option<T>, StatusCode> {
    params
        .get(key)
        .map(|value| value.parse().map_err(|_| StatusCode::BAD_REQUEST))
        .transpose()
}

fn paginate<T>(items: Vec<T>, params: &Params) -> Result<Vec<T>, StatusCode> {
    let number: usize = parse_param(params, "page[number]")?.unwrap_or(1).max(1);
    match parse_param::<usize>(params, "page[size]")? {
        None => Ok(items),
        Some(size) => Ok(items.into_iter().skip((number - 1) * size).take(size).collect()),
    }
}

fn includes_dates(params: &Params) -> bool {
    params
        .get("include")
        .is_some_and(|include| include.split(',').any(|name| name == "dates"))
}

// --- people ---

async fn list_people(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, StatusCode> {
    let group: Option<u64> = parse_param(&params, "filter[primary_group_id]")?;
    let store = state.store.read().await;
    let people = store
        .people
        .values()
        .filter(|person| group.map_or(true, |id| person.primary_group_id == id))
        .map(|person| store.person_resource(person))
        .collect();
    Ok(document(Value::Array(paginate(people, &params)?)))
}

async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.store.read().await;
    let person = store.people.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(document(store.person_resource(person)))
}

async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<WriteDocument<PersonPatch>>,
) -> Result<Json<Value>, StatusCode> {
    expect_kind(&body, "people")?;
    let patch = body.data.attributes;
    let mut store = state.store.write().await;
    let person = store.people.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(first_name) = patch.first_name {
        person.first_name = first_name;
    }
    if let Some(last_name) = patch.last_name {
        person.last_name = last_name;
    }
    if patch.nickname.is_some() {
        person.nickname = patch.nickname;
    }
    if patch.email.is_some() {
        person.email = patch.email;
    }
    if patch.town.is_some() {
        person.town = patch.town;
    }
    if patch.gender.is_some() {
        person.gender = patch.gender;
    }
    if let Some(group) = patch.primary_group_id {
        person.primary_group_id = group;
    }
    debug!(id, "updated person");
    let person = person.clone();
    Ok(document(store.person_resource(&person)))
}

// --- groups ---

async fn list_groups(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.store.read().await;
    let groups = store.groups.values().map(Group::resource).collect();
    Ok(document(Value::Array(paginate(groups, &params)?)))
}

async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.store.read().await;
    let group = store.groups.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(document(group.resource()))
}

// --- events ---

async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.store.read().await;
    let page: Vec<&Event> = paginate(store.events.values().collect(), &params)?;
    let data: Vec<Value> = page.iter().map(|event| event.resource()).collect();
    let mut body = json!({ "data": data });
    if includes_dates(&params) {
        let included: Vec<Value> = page.iter().flat_map(|&event| event.date_resources()).collect();
        body["included"] = Value::Array(included);
    }
    Ok(Json(body))
}

async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.store.read().await;
    let event = store.events.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let mut body = json!({ "data": event.resource() });
    if includes_dates(&params) {
        body["included"] = Value::Array(event.date_resources().collect());
    }
    Ok(Json(body))
}

// --- roles ---

async fn list_roles(
    State(state): State<AppState>,
    Query(params): Query<Params>,
) -> Result<Json<Value>, StatusCode> {
    let group: Option<u64> = parse_param(&params, "filter[group_id]")?;
    let store = state.store.read().await;
    let roles = store
        .roles
        .values()
        .filter(|role| group.map_or(true, |id| role.group_id == id))
        .map(Role::resource)
        .collect();
    Ok(document(Value::Array(paginate(roles, &params)?)))
}

async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let store = state.store.read().await;
    let role = store.roles.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok(document(role.resource()))
}

async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<WriteDocument<CreateRole>>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    expect_kind(&body, "roles")?;
    let input = body.data.attributes;
    let mut store = state.store.write().await;
    if !store.people.contains_key(&input.person_id) || !store.groups.contains_key(&input.group_id) {
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }
    let role = store.insert_role(
        input.person_id,
        input.group_id,
        &input.role_type,
        input.label.as_deref(),
    );
    debug!(id = role.id, "created role");
    Ok((StatusCode::CREATED, document(role.resource())))
}

async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<WriteDocument<RolePatch>>,
) -> Result<Json<Value>, StatusCode> {
    expect_kind(&body, "roles")?;
    let mut store = state.store.write().await;
    let role = store.roles.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(label) = body.data.attributes.label {
        role.label = Some(label);
    }
    Ok(document(role.resource()))
}

async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = state.store.write().await;
    store
        .roles
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
