//! Stateless HTTP request builder and response parser for the membership API.
//!
//! # Design
//! `HitobitoClient` holds only the base URL and token and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Status classification runs before any body parsing, so a
//! non-2xx response never reaches the resource decoders.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::normalize;
use crate::query::{self, ListOptions};
use crate::schema::{Creatable, Mutable, Resource};

const ACCEPT: &str = "application/json";
const CONTENT_TYPE: &str = "application/vnd.api+json";

/// Synchronous, stateless client for the membership API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. See [`crate::Hitobito`] for the variant that also
/// performs the round-trip.
#[derive(Clone)]
pub struct HitobitoClient {
    base_url: String,
    token: String,
}

impl HitobitoClient {
    /// A single trailing `/` on `base_url` is dropped.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.strip_suffix('/').unwrap_or(base_url).to_string(),
            token: token.to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url, &config.token)
    }

    pub fn build_get<R: Resource>(&self, id: u64) -> HttpRequest {
        let url = self.url(&format!("{}/{id}", R::PATH), query::encode(R::INCLUDE, None));
        self.request(HttpMethod::Get, url, None)
    }

    pub fn build_list<R: Resource>(&self, options: &ListOptions) -> HttpRequest {
        let url = self.url(R::PATH, query::encode(R::INCLUDE, Some(options)));
        self.request(HttpMethod::Get, url, None)
    }

    pub fn build_update<R: Mutable>(&self, id: u64, update: &R::Update) -> Result<HttpRequest, ApiError> {
        let body = write_body(Some(id), R::TYPE, update)?;
        let url = self.url(&format!("{}/{id}", R::PATH), None);
        Ok(self.request(HttpMethod::Patch, url, Some(body)))
    }

    pub fn build_create<R: Creatable>(&self, input: &R::New) -> Result<HttpRequest, ApiError> {
        let body = write_body(None, R::TYPE, input)?;
        let url = self.url(R::PATH, None);
        Ok(self.request(HttpMethod::Post, url, Some(body)))
    }

    pub fn build_delete<R: Resource>(&self, id: u64) -> HttpRequest {
        let url = self.url(&format!("{}/{id}", R::PATH), None);
        self.request(HttpMethod::Delete, url, None)
    }

    pub fn parse_single<R: Resource>(&self, response: HttpResponse) -> Result<R, ApiError> {
        let document = parse_document(&response)?;
        normalize::single(document)
    }

    pub fn parse_list<R: Resource>(&self, response: HttpResponse) -> Result<Vec<R>, ApiError> {
        let document = parse_document(&response)?;
        normalize::list(document)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn url(&self, path: &str, query: Option<String>) -> String {
        match query {
            Some(query) => format!("{}/api/{path}?{query}", self.base_url),
            None => format!("{}/api/{path}", self.base_url),
        }
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        debug!(%method, %url, "built request");
        HttpRequest {
            method,
            path: url,
            headers: vec![
                ("x-token".to_string(), self.token.clone()),
                ("accept".to_string(), ACCEPT.to_string()),
                ("content-type".to_string(), CONTENT_TYPE.to_string()),
            ],
            body,
        }
    }
}

impl std::fmt::Debug for HitobitoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HitobitoClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct WriteDocument<'a, A> {
    data: WriteResource<'a, A>,
}

#[derive(Serialize)]
struct WriteResource<'a, A> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: &'a A,
}

/// `{data: {id?, type, attributes}}`; `id` is sent as a string, per JSON:API.
fn write_body<A: Serialize>(id: Option<u64>, kind: &'static str, attributes: &A) -> Result<String, ApiError> {
    let document = WriteDocument {
        data: WriteResource {
            id: id.map(|id| id.to_string()),
            kind,
            attributes,
        },
    };
    serde_json::to_string(&document).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    debug!(status = response.status, "received response");
    if response.is_success() {
        return Ok(());
    }
    Err(match response.status {
        401 | 403 => ApiError::Unauthorized {
            status: response.status,
        },
        404 => ApiError::NotFound,
        429 => ApiError::RateLimited {
            retry_after: response
                .header("retry-after")
                .and_then(|value| value.trim().parse().ok()),
        },
        status => ApiError::Transport {
            status: Some(status),
            message: format!("HTTP {status} {}", status_text(status)),
        },
    })
}

fn status_text(status: u16) -> &'static str {
    ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Status")
}

fn parse_document(response: &HttpResponse) -> Result<Value, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Transport {
        status: Some(response.status),
        message: format!("response body is not JSON: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Event, Group, NewRole, Person, PersonUpdate, Role};

    fn client() -> HitobitoClient {
        HitobitoClient::new("http://localhost:3000", "tok")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_produces_correct_request() {
        let req = client().build_get::<Person>(17);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/people/17");
        assert!(req.body.is_none());
        assert_eq!(
            req.headers,
            vec![
                ("x-token".to_string(), "tok".to_string()),
                ("accept".to_string(), "application/json".to_string()),
                ("content-type".to_string(), "application/vnd.api+json".to_string()),
            ]
        );
    }

    #[test]
    fn build_get_includes_side_loaded_relationship() {
        let req = client().build_get::<Event>(1);
        assert_eq!(req.path, "http://localhost:3000/api/events/1?include=dates");
    }

    #[test]
    fn build_list_encodes_filter_and_pagination() {
        let options = ListOptions::new()
            .filter("primary_group_id", 5)
            .page(2)
            .per_page(25);
        let req = client().build_list::<Person>(&options);
        assert_eq!(
            req.path,
            "http://localhost:3000/api/people?filter%5Bprimary_group_id%5D=5&page%5Bnumber%5D=2&page%5Bsize%5D=25"
        );
    }

    #[test]
    fn build_list_without_options_has_no_query() {
        let req = client().build_list::<Group>(&ListOptions::default());
        assert_eq!(req.path, "http://localhost:3000/api/groups");
    }

    #[test]
    fn build_update_produces_json_api_body() {
        let update = PersonUpdate {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        let req = client().build_update::<Person>(17, &update).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:3000/api/people/17");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "data": {"id": "17", "type": "people", "attributes": {"email": "new@example.com"}}
            })
        );
    }

    #[test]
    fn build_create_omits_id() {
        let input = NewRole {
            person_id: 7,
            group_id: 2,
            role_type: "Group::Member".to_string(),
            label: None,
            start_on: None,
            end_on: None,
        };
        let req = client().build_create::<Role>(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/roles");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert!(body["data"].get("id").is_none());
        assert_eq!(body["data"]["type"], "roles");
        assert_eq!(body["data"]["attributes"]["person_id"], 7);
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete::<Role>(4);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/roles/4");
        assert!(req.body.is_none());
    }

    #[test]
    fn exactly_one_trailing_slash_is_stripped() {
        let req = HitobitoClient::new("http://localhost:3000/", "tok").build_get::<Person>(1);
        assert_eq!(req.path, "http://localhost:3000/api/people/1");
        let req = HitobitoClient::new("http://localhost:3000//", "tok").build_get::<Person>(1);
        assert_eq!(req.path, "http://localhost:3000//api/people/1");
    }

    #[test]
    fn status_codes_map_to_error_kinds() {
        let c = client();
        let err = c.parse_single::<Person>(response(401, "")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { status: 401 }));
        let err = c.parse_single::<Person>(response(403, "")).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized { status: 403 }));
        let err = c.parse_single::<Person>(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        let err = c.parse_list::<Person>(response(429, "")).unwrap_err();
        assert!(matches!(err, ApiError::RateLimited { retry_after: None }));
    }

    #[test]
    fn server_error_carries_status_and_text() {
        let err = client().parse_single::<Person>(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::Transport { status: Some(500), .. }));
        let message = err.to_string();
        assert!(message.contains("500"), "{message}");
        assert!(message.contains("Internal Server Error"), "{message}");
    }

    #[test]
    fn rate_limit_reads_retry_after() {
        let mut resp = response(429, "");
        resp.headers.push(("Retry-After".to_string(), "30".to_string()));
        let err = client().parse_single::<Person>(resp).unwrap_err();
        assert!(matches!(err, ApiError::RateLimited { retry_after: Some(30) }));
    }

    #[test]
    fn error_status_is_checked_before_body() {
        let body = r#"{"data":{"id":"1","type":"people","attributes":{}}}"#;
        let err = client().parse_single::<Person>(response(404, body)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn non_json_body_is_a_transport_failure() {
        let err = client().parse_single::<Person>(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Transport { status: Some(200), .. }));
    }

    #[test]
    fn parse_single_success() {
        let body = r#"{"data":{"id":"17","type":"people","attributes":{"first_name":"Ada"}}}"#;
        let person = client().parse_single::<Person>(response(200, body)).unwrap();
        assert_eq!(person.id, 17);
        assert_eq!(person.first_name.as_deref(), Some("Ada"));
    }

    #[test]
    fn parse_single_wrong_type_is_validation() {
        let body = r#"{"data":{"id":"17","type":"groups","attributes":{"name":"x"}}}"#;
        let err = client().parse_single::<Person>(response(200, body)).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn parse_delete_accepts_no_content() {
        assert!(client().parse_delete(response(204, "")).is_ok());
        let err = client().parse_delete(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", client());
        assert!(!rendered.contains("tok\""));
        assert!(rendered.contains("localhost"));
    }
}
