// ABOUTME: Demo gRPC client that runs one mailing-list operation and logs the result.
// ABOUTME: Every call is bounded by a one-second deadline.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use maillist_rpc::{MailingListServiceClient, pb};
use tracing::info;

use crate::cli::ClientAction;

const CALL_TIMEOUT: Duration = Duration::from_secs(1);

pub async fn run(addr: String, action: ClientAction) -> Result<()> {
    let mut client = MailingListServiceClient::connect(addr.clone())
        .await
        .with_context(|| format!("failed to connect to {addr}"))?;

    match action {
        ClientAction::Create { email } => {
            info!("create email");
            let resp = call(client.create_email(pb::CreateEmailRequest { email_addr: email })).await?;
            log_entry(resp);
        }
        ClientAction::Get { email } => {
            info!("get email");
            let resp = call(client.get_email(pb::GetEmailRequest { email_addr: email })).await?;
            log_entry(resp);
        }
        ClientAction::Batch { page, count } => {
            info!("get email batch");
            let resp =
                call(client.get_email_batch(pb::GetEmailBatchRequest { count, page })).await?;
            let total = resp.email_entries.len();
            for (i, entry) in resp.email_entries.iter().enumerate() {
                info!(" item [{} of {}]: {:?}", i + 1, total, entry);
            }
        }
        ClientAction::Update {
            email,
            confirmed_at,
            opt_out,
        } => {
            info!("update email");
            let resp = call(client.update_email(pb::UpdateEmailRequest {
                email_entry: Some(pb::EmailEntry {
                    id: 0,
                    email,
                    confirmed_at,
                    opt_out,
                }),
            }))
            .await?;
            log_entry(resp);
        }
        ClientAction::Delete { email } => {
            info!("delete email");
            let resp = call(client.delete_email(pb::DeleteEmailRequest { email_addr: email })).await?;
            log_entry(resp);
        }
    }

    Ok(())
}

/// Await one RPC under the call deadline and unwrap its message.
async fn call<T, F>(rpc: F) -> Result<T>
where
    F: Future<Output = Result<tonic::Response<T>, tonic::Status>>,
{
    let resp = tokio::time::timeout(CALL_TIMEOUT, rpc)
        .await
        .context("request timed out")?
        .map_err(|status| anyhow::anyhow!("{}: {}", status.code(), status.message()))?;
    Ok(resp.into_inner())
}

fn log_entry(resp: pb::EmailResponse) {
    match resp.email_entry {
        Some(entry) => info!(" response {:?}", entry),
        None => info!(" email not found"),
    }
}
