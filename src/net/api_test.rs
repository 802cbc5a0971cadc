use super::*;

use std::sync::Arc;

use serde_json::json;

use crate::config::ClientConfig;
use crate::net::http::ApiRequest;
use crate::test_support::{RecordingBrowser, ScriptedTransport, admin_payload};

type TestClient = HttpClient<ScriptedTransport, RecordingBrowser>;

fn login_page_client(transport: ScriptedTransport) -> TestClient {
    let browser = RecordingBrowser::at("/user/login", "http://localhost:5173/user/login");
    HttpClient::new(Arc::new(ClientConfig::default()), transport, browser)
}

#[tokio::test]
async fn get_login_user_hits_identity_endpoint() {
    let transport = ScriptedTransport::default().reply(200, json!({ "code": 0, "data": admin_payload() }));
    let client = login_page_client(transport);
    let envelope = client.fetch_login_user().await.unwrap();
    assert!(envelope.is_success());
    let urls: Vec<String> = sent(&client).into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec!["http://localhost:8123/api/user/get/login".to_owned()]);
}

#[tokio::test]
async fn store_primed_through_http_client_reads_admin() {
    let transport = ScriptedTransport::default().reply(200, json!({ "code": 0, "data": admin_payload() }));
    let store = SessionStore::new(login_page_client(transport));
    store.prime().await;
    assert!(store.snapshot().is_admin());
}

#[tokio::test]
async fn login_stores_returned_identity() {
    let transport = ScriptedTransport::default().reply(200, json!({ "code": 0, "data": admin_payload() }));
    let store = SessionStore::new(login_page_client(transport));
    let user = store.login("root", "12345678").await.unwrap();
    assert_eq!(user.user_name, "Root");
    assert!(store.snapshot().is_admin());

    let requests = sent(store.source());
    assert_eq!(requests[0].url, "http://localhost:8123/api/user/login");
    assert_eq!(requests[0].body, Some(json!({ "userAccount": "root", "userPassword": "12345678" })));
}

#[tokio::test]
async fn rejected_login_keeps_snapshot_and_reports_message() {
    let transport =
        ScriptedTransport::default().reply(200, json!({ "code": 40000, "data": null, "message": "wrong password" }));
    let store = SessionStore::new(login_page_client(transport));
    let err = store.login("root", "nope").await.unwrap_err();
    assert_eq!(err, AuthError::Rejected { code: 40000, message: "wrong password".to_owned() });
    assert!(store.snapshot().is_anonymous());
}

#[tokio::test]
async fn login_without_user_is_missing_user() {
    let transport = ScriptedTransport::default().reply(200, json!({ "code": 0, "data": null }));
    let client = login_page_client(transport);
    let err = user_login(&client, "root", "pw").await.unwrap_err();
    assert_eq!(err, AuthError::MissingUser);
}

#[tokio::test]
async fn logout_resets_to_anonymous() {
    let transport = ScriptedTransport::default().reply(200, json!({ "code": 0, "data": true }));
    let store = SessionStore::new(login_page_client(transport));
    store.set_identity(serde_json::from_value(admin_payload()).unwrap());
    store.logout().await.unwrap();
    assert!(store.snapshot().is_anonymous());
}

#[tokio::test]
async fn failed_logout_keeps_identity() {
    let transport = ScriptedTransport::default().fail(HttpError::Network("offline".to_owned()));
    let store = SessionStore::new(login_page_client(transport));
    store.set_identity(serde_json::from_value(admin_payload()).unwrap());
    let err = store.logout().await.unwrap_err();
    assert_eq!(err, AuthError::Http(HttpError::Network("offline".to_owned())));
    assert!(store.snapshot().is_admin());
}

fn sent(client: &TestClient) -> Vec<ApiRequest> {
    client.transport().sent.lock().unwrap().clone()
}
