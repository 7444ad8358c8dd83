// ABOUTME: End-to-end smoke test for both front ends sharing one database file.
// ABOUTME: Writes through gRPC and reads through JSON (and the reverse), checking identical fields.

use std::sync::Arc;

use axum::body::Body;
use http::Request;
use maillist_rpc::{MailingListServiceClient, pb};
use maillist_server::{AppState, create_router};
use maillist_store::EmailStore;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tonic::transport::Channel;
use tower::ServiceExt;

struct Harness {
    app: axum::Router,
    grpc: MailingListServiceClient<Channel>,
    _stop: oneshot::Sender<()>,
    _dir: tempfile::TempDir,
}

/// Open a fresh database file, start the gRPC server on it, and build a JSON
/// router over the same store handle.
async fn harness() -> Harness {
    let dir = tempfile::TempDir::new().unwrap();
    let store = EmailStore::open(&dir.path().join("list.db")).unwrap();
    store.init_schema().await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();
    let grpc_store = store.clone();
    tokio::spawn(async move {
        maillist_rpc::serve(grpc_store, listener, async {
            rx.await.ok();
        })
        .await
        .unwrap();
    });

    let grpc = MailingListServiceClient::connect(format!("http://{addr}"))
        .await
        .unwrap();

    Harness {
        app: create_router(Arc::new(AppState::new(store))),
        grpc,
        _stop: tx,
        _dir: dir,
    }
}

/// Send one JSON request through the router and decode the reply.
async fn json_call(app: &axum::Router, method: &str, uri: &str, body: &str) -> (u16, serde_json::Value) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status().as_u16();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn grpc_writes_are_visible_over_json() {
    let mut h = harness().await;

    let created = h
        .grpc
        .create_email(pb::CreateEmailRequest {
            email_addr: "a@x.com".to_string(),
        })
        .await
        .unwrap()
        .into_inner()
        .email_entry
        .unwrap();
    h.grpc
        .update_email(pb::UpdateEmailRequest {
            email_entry: Some(pb::EmailEntry {
                confirmed_at: 10_000,
                ..created.clone()
            }),
        })
        .await
        .unwrap();

    let (status, json) = json_call(&h.app, "GET", "/email/get", r#"{"Email":"a@x.com"}"#).await;
    assert_eq!(status, 200);
    assert_eq!(json["ID"], created.id);
    assert_eq!(json["Email"], "a@x.com");
    assert_eq!(json["ConfirmedAt"], "1970-01-01T02:46:40Z");
    assert_eq!(json["OptOut"], false);
}

#[tokio::test]
async fn json_writes_are_visible_over_grpc() {
    let mut h = harness().await;

    let (status, created) =
        json_call(&h.app, "POST", "/email/create", r#"{"Email":"b@x.com"}"#).await;
    assert_eq!(status, 200);
    let (status, _) = json_call(
        &h.app,
        "PUT",
        "/email/update",
        r#"{"Email":"b@x.com","ConfirmedAt":"1970-01-01T02:46:40Z","OptOut":false}"#,
    )
    .await;
    assert_eq!(status, 200);

    let entry = h
        .grpc
        .get_email(pb::GetEmailRequest {
            email_addr: "b@x.com".to_string(),
        })
        .await
        .unwrap()
        .into_inner()
        .email_entry
        .unwrap();
    assert_eq!(entry.id, created["ID"].as_i64().unwrap());
    assert_eq!(entry.email, "b@x.com");
    assert_eq!(entry.confirmed_at, 10_000);
    assert!(!entry.opt_out);
}

#[tokio::test]
async fn subscriber_lifecycle_across_protocols() {
    let mut h = harness().await;

    json_call(&h.app, "POST", "/email/create", r#"{"Email":"a@x.com"}"#).await;
    h.grpc
        .create_email(pb::CreateEmailRequest {
            email_addr: "c@x.com".to_string(),
        })
        .await
        .unwrap();

    // Duplicate create is rejected on both sides.
    let (status, json) =
        json_call(&h.app, "POST", "/email/create", r#"{"Email":"c@x.com"}"#).await;
    assert_eq!(status, 400);
    assert_eq!(json["Err"], "email already subscribed: c@x.com");
    let status = h
        .grpc
        .create_email(pb::CreateEmailRequest {
            email_addr: "a@x.com".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::AlreadyExists);

    // Soft delete over gRPC hides the address from JSON listings only.
    h.grpc
        .delete_email(pb::DeleteEmailRequest {
            email_addr: "a@x.com".to_string(),
        })
        .await
        .unwrap();

    let (_, page) = json_call(&h.app, "GET", "/email/get_batch", r#"{"Page":1,"Count":10}"#).await;
    let emails: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["Email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["c@x.com"]);

    let (_, row) = json_call(&h.app, "GET", "/email/get", r#"{"Email":"a@x.com"}"#).await;
    assert_eq!(row["OptOut"], true);

    // Unknown addresses are empty successes on both sides.
    let (status, json) = json_call(&h.app, "GET", "/email/get", r#"{"Email":"zz@x.com"}"#).await;
    assert_eq!(status, 200);
    assert!(json.is_null());
    let missing = h
        .grpc
        .get_email(pb::GetEmailRequest {
            email_addr: "zz@x.com".to_string(),
        })
        .await
        .unwrap()
        .into_inner();
    assert!(missing.email_entry.is_none());
}
