#![cfg(feature = "client")]

use std::time::Duration;

use backoffice_dashboard::domain::types::{PageLimit, SortDirection};
use backoffice_dashboard::fetch::{AuthenticatedFetchClient, ReqwestTransport};
use backoffice_dashboard::forms::auth::LoginForm;
use backoffice_dashboard::services::resources::{Alerts, CorporateClients, History};
use backoffice_dashboard::services::{alerts, auth};
use backoffice_dashboard::session::AuthSession;
use backoffice_dashboard::sync::{ControllerState, ListSync, ListSyncController, SyncOutcome};
use serde_json::{Value, json};

mod common;

use common::FakeBackend;

type SessionClient = AuthenticatedFetchClient<ReqwestTransport, AuthSession>;

fn client(backend: &FakeBackend, session: &AuthSession) -> SessionClient {
    let transport = ReqwestTransport::new(&backend.base_url, Duration::from_secs(5)).unwrap();
    AuthenticatedFetchClient::new(transport, session.clone())
}

fn corporate_row(i: u32) -> Value {
    json!({
        "ref_personne": format!("M-{i}"),
        "name": format!("Company {i}"),
        "score": 90 - i
    })
}

#[actix_web::test]
async fn corporate_clients_load_then_fail_on_refetch() {
    let backend = FakeBackend::start().await;
    let rows: Vec<Value> = (0..10).map(corporate_row).collect();
    let page = json!({ "items": rows, "has_more": true }).to_string();
    backend.reply("/clients/morale", 200, page);
    backend.reply("/clients/morale", 500, r#"{"detail":"db down"}"#);
    let session = AuthSession::new();
    let list = ListSync::new(
        ListSyncController::<CorporateClients>::new(PageLimit::new(10).unwrap()),
        client(&backend, &session),
    );

    assert_eq!(list.refetch().await, SyncOutcome::Applied);

    assert_eq!(
        backend.last_request().query,
        "limit=10&offset=0&include_total=false&sort_by=score&sort_dir=desc"
    );
    assert_eq!(list.visible_items("").len(), 10);
    assert!(list.has_more());

    assert_eq!(list.refetch().await, SyncOutcome::Applied);

    let state = list.state();
    let ControllerState::Errored { query, message } = &state else {
        panic!("expected Errored, got {state:?}");
    };
    assert_eq!(message, "db down");
    assert_eq!(query.offset, 0);
    assert_eq!(query.limit.get(), 10);
    assert_eq!(query.sort_by.as_deref(), Some("score"));
    assert_eq!(query.sort_dir, Some(SortDirection::Desc));

    backend.stop().await;
}

#[actix_web::test]
async fn login_then_alerts_are_fetched_with_the_token() {
    let backend = FakeBackend::start().await;
    let token = r#"{"access_token":"tok-7","token_type":"bearer"}"#;
    backend.reply("/auth/login", 200, token);
    backend.reply(
        "/alerts",
        200,
        r#"{"items":[{"REF_PERSONNE":"P-1","alert_type":"Expiry","alert_message":"Policy ends"},{"ref_personne":"P-2","alert_severity":"Low"}]}"#,
    );
    let session = AuthSession::new();
    let client = client(&backend, &session);

    auth::login(
        &client,
        &session,
        LoginForm {
            email: "ops@example.com".to_string(),
            password: "secret".to_string(),
        },
    )
    .await
    .unwrap();

    let controller = ListSyncController::<Alerts>::new(PageLimit::default());
    let list = ListSync::new(controller, client);
    list.refetch().await;

    assert_eq!(
        backend.last_request().authorization.as_deref(),
        Some("Bearer tok-7")
    );
    assert!(!list.has_more());
    assert!(alerts::dismiss(&list, "P-2"));
    let visible = list.visible_items("");
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].ref_personne.as_str(), "P-1");

    auth::logout(&session);
    assert!(!session.is_authenticated());

    backend.stop().await;
}

#[actix_web::test]
async fn history_is_a_bare_array() {
    let backend = FakeBackend::start().await;
    backend.reply(
        "/history/",
        200,
        r#"[{"id":1,"timestamp":"2024-05-02T09:15:00","action":"Client updated","user":"jdoe","client_ref":"M-3"}]"#,
    );
    let session = AuthSession::new();
    let list = ListSync::new(
        ListSyncController::<History>::new(PageLimit::default()),
        client(&backend, &session),
    );

    list.refetch().await;

    assert_eq!(backend.last_request().query, "");
    let rows = list.visible_items("m-3");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].action, "Client updated");

    backend.stop().await;
}
