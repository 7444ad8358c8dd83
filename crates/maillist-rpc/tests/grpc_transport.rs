// ABOUTME: Exercises the gRPC front end over a real TCP connection with the generated client.
// ABOUTME: Covers the create/update/delete scenario, not-found responses, and batch validation.

use maillist_rpc::{MailingListServiceClient, pb};
use maillist_store::EmailStore;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tonic::Code;
use tonic::transport::Channel;

/// Start a server on an ephemeral port and return a connected client plus
/// the sender that shuts it down.
async fn start() -> (MailingListServiceClient<Channel>, oneshot::Sender<()>) {
    let store = EmailStore::open_in_memory().unwrap();
    store.init_schema().await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        maillist_rpc::serve(store, listener, async {
            rx.await.ok();
        })
        .await
        .unwrap();
    });

    let client = MailingListServiceClient::connect(format!("http://{addr}"))
        .await
        .unwrap();
    (client, tx)
}

#[tokio::test]
async fn crud_scenario_over_the_wire() {
    let (mut client, shutdown) = start().await;

    let created = client
        .create_email(pb::CreateEmailRequest {
            email_addr: "a@x.com".to_string(),
        })
        .await
        .unwrap()
        .into_inner()
        .email_entry
        .unwrap();
    assert_eq!(created.email, "a@x.com");
    assert_eq!(created.confirmed_at, 0);
    assert!(!created.opt_out);

    let updated = client
        .update_email(pb::UpdateEmailRequest {
            email_entry: Some(pb::EmailEntry {
                confirmed_at: 10_000,
                ..created.clone()
            }),
        })
        .await
        .unwrap()
        .into_inner()
        .email_entry
        .unwrap();
    assert_eq!(updated.confirmed_at, 10_000);

    client
        .delete_email(pb::DeleteEmailRequest {
            email_addr: "a@x.com".to_string(),
        })
        .await
        .unwrap();

    let page = client
        .get_email_batch(pb::GetEmailBatchRequest { count: 10, page: 1 })
        .await
        .unwrap()
        .into_inner();
    assert!(page.email_entries.is_empty());

    let fetched = client
        .get_email(pb::GetEmailRequest {
            email_addr: "a@x.com".to_string(),
        })
        .await
        .unwrap()
        .into_inner()
        .email_entry
        .unwrap();
    assert!(fetched.opt_out);
    assert_eq!(fetched.id, created.id);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn unknown_email_is_not_an_error() {
    let (mut client, shutdown) = start().await;

    let resp = client
        .get_email(pb::GetEmailRequest {
            email_addr: "nobody@x.com".to_string(),
        })
        .await
        .unwrap();
    assert!(resp.into_inner().email_entry.is_none());

    shutdown.send(()).ok();
}

#[tokio::test]
async fn invalid_batch_is_rejected_with_message() {
    let (mut client, shutdown) = start().await;

    let status = client
        .get_email_batch(pb::GetEmailBatchRequest { count: 0, page: 1 })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);
    assert!(status.message().contains("Page and Count"));

    shutdown.send(()).ok();
}
