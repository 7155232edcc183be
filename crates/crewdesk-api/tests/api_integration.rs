//! HTTP-level tests for the client adapter and resource gateways, against a
//! mock server.

use crewdesk_api::{
    ApiClient, AuthApi, DepartmentsApi, EmployeesApi, RolesApi, GENERIC_SERVER_ERROR,
    INVALID_LOGIN_RESPONSE,
};
use crewdesk_core::{Credentials, CrewdeskError, TokenSource};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fixed token source for tests; the session crate provides the real one.
struct TestTokens(Option<String>);

impl TokenSource for TestTokens {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

fn client_with_token(uri: &str, token: Option<&str>) -> ApiClient {
    ApiClient::new(uri, Arc::new(TestTokens(token.map(str::to_string))))
}

fn record(value: serde_json::Value) -> crewdesk_core::Record {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[tokio::test]
async fn test_bearer_header_attached_when_token_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .and(header("authorization", "Bearer T1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let employees = EmployeesApi::new(client_with_token(&server.uri(), Some("T1")));
    employees.list(&[]).await.unwrap();
}

#[tokio::test]
async fn test_no_authorization_header_when_anonymous() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let employees = EmployeesApi::new(client_with_token(&server.uri(), None));
    employees.list(&[]).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_list_with_absent_data_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let employees = EmployeesApi::new(client_with_token(&server.uri(), Some("T1")));
    assert!(employees.list(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_list_with_null_data_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/roles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .mount(&server)
        .await;

    let roles = RolesApi::new(client_with_token(&server.uri(), Some("T1")));
    assert!(roles.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_employee_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees/7"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": 7, "first_name": "Ali"}})),
        )
        .mount(&server)
        .await;

    let employees = EmployeesApi::new(client_with_token(&server.uri(), Some("T1")));
    let employee = employees.get(7).await.unwrap();
    assert_eq!(employee["id"], 7);
    assert_eq!(employee["first_name"], "Ali");
}

#[tokio::test]
async fn test_query_filters_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .and(query_param("first_name", "Ali"))
        .and(query_param("department_id", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let employees = EmployeesApi::new(client_with_token(&server.uri(), Some("T1")));
    employees
        .list(&[
            ("first_name".to_string(), "Ali".to_string()),
            ("department_id".to_string(), "2".to_string()),
        ])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_department_then_list_reflects_it() {
    let server = MockServer::start().await;
    let created = json!({"id": 5, "name": "Eng", "code": "ENG"});

    Mock::given(method("POST"))
        .and(path("/departments"))
        .and(body_json(json!({"name": "Eng", "code": "ENG"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": created})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/departments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [created]})))
        .mount(&server)
        .await;

    let departments = DepartmentsApi::new(client_with_token(&server.uri(), Some("T1")));

    let dept = departments
        .create(record(json!({"name": "Eng", "code": "ENG"})))
        .await
        .unwrap();
    assert_eq!(dept["id"], 5);

    let listed = departments.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], 5);
}

#[tokio::test]
async fn test_employee_payload_coerced_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/employees"))
        .and(body_json(json!({
            "first_name": "Sara",
            "last_name": "Moradi",
            "gender": "female",
            "work_email": "sara@example.com",
            "department_id": 2,
            "position_id": 3,
            "manager_id": null,
            "create_portal_account": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": {"id": 9}})))
        .expect(1)
        .mount(&server)
        .await;

    let employees = EmployeesApi::new(client_with_token(&server.uri(), Some("T1")));
    let created = employees
        .create(record(json!({
            "first_name": "Sara",
            "last_name": "Moradi",
            "gender": "female",
            "work_email": "sara@example.com",
            "department_id": "2",
            "position_id": "3",
            "manager_id": "",
            "create_portal_account": "true"
        })))
        .await
        .unwrap();
    assert_eq!(created["id"], 9);
}

#[tokio::test]
async fn test_delete_not_found_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/departments/9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;

    let departments = DepartmentsApi::new(client_with_token(&server.uri(), Some("T1")));
    let err = departments.delete(9).await.unwrap_err();
    assert_eq!(err.to_string(), "Not found");
    assert!(matches!(err, CrewdeskError::Server { status: 404, .. }));
}

#[tokio::test]
async fn test_failure_without_message_falls_back_to_generic() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/positions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_with_token(&server.uri(), Some("T1"));
    let err = crewdesk_api::PositionsApi::new(client)
        .list()
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), GENERIC_SERVER_ERROR);
}

#[tokio::test]
async fn test_transport_failure_is_network_error() {
    // Nothing listens here; the connection itself fails.
    let client = client_with_token("http://127.0.0.1:9", Some("T1"));
    let err = EmployeesApi::new(client).list(&[]).await.unwrap_err();
    assert!(matches!(err, CrewdeskError::Network(_)));
}

#[tokio::test]
async fn test_malformed_success_body_is_contract_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/employees"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let employees = EmployeesApi::new(client_with_token(&server.uri(), Some("T1")));
    let err = employees.list(&[]).await.unwrap_err();
    assert!(matches!(err, CrewdeskError::Contract(_)));
}

#[tokio::test]
async fn test_login_without_token_is_contract_violation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"user": {"id": 1}}})),
        )
        .mount(&server)
        .await;

    let auth = AuthApi::new(client_with_token(&server.uri(), None));
    let err = auth
        .login(&Credentials::new("a@b.com", "x"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), INVALID_LOGIN_RESPONSE);
    assert!(matches!(err, CrewdeskError::Contract(_)));
}

#[tokio::test]
async fn test_assign_role_posts_to_nested_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/employees/3/roles"))
        .and(body_json(json!({"role_id": 5})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let roles = RolesApi::new(client_with_token(&server.uri(), Some("T1")));
    roles.assign(3, 5).await.unwrap();
}

// Two overlapping updates both complete; whichever response lands last is
// what local state would reflect. That is the accepted re-fetch-after-mutate
// behavior, not a defect.
#[tokio::test]
async fn test_concurrent_updates_both_complete() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/employees/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": 1}})))
        .expect(2)
        .mount(&server)
        .await;

    let employees = EmployeesApi::new(client_with_token(&server.uri(), Some("T1")));
    let first = employees.update(1, record(json!({"phone": "111"})));
    let second = employees.update(1, record(json!({"phone": "222"})));
    let (first, second) = tokio::join!(first, second);
    assert_eq!(first.unwrap()["id"], 1);
    assert_eq!(second.unwrap()["id"], 1);
}
