// ABOUTME: Email API handlers for create, get, paged listing, update, and soft delete.
// ABOUTME: Each handler decodes its own body shape, calls one store operation, and echoes the entry.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maillist_core::BatchQuery;
use tracing::info;

use crate::api::body::{BatchBody, EmailEntryBody, json_response};
use crate::app_state::SharedState;
use crate::error::ApiError;

/// Answer with the stored entry for `email`, or JSON `null` when absent.
async fn entry_response(state: &SharedState, email: &str) -> Result<Response, ApiError> {
    let entry = state.store.get_email(email).await?;
    Ok(json_response(
        StatusCode::OK,
        &entry.map(EmailEntryBody::from),
    ))
}

/// POST /email/create - Subscribe a new address.
pub async fn create_email(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req = EmailEntryBody::decode(&body)?;
    info!(email = %req.email, "JSON CreateEmail");

    state.store.create_email(&req.email).await?;
    entry_response(&state, &req.email).await
}

/// GET /email/get - Look up one address.
pub async fn get_email(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req = EmailEntryBody::decode(&body)?;
    info!(email = %req.email, "JSON GetEmail");

    entry_response(&state, &req.email).await
}

/// GET /email/get_batch - One page of subscribed addresses in id order.
pub async fn get_email_batch(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req = BatchBody::decode(&body)?;
    info!(page = ?req.page, count = ?req.count, "JSON GetEmailBatch");

    let query = BatchQuery::new(req.page.unwrap_or(0), req.count.unwrap_or(0))?;
    let entries: Vec<EmailEntryBody> = state
        .store
        .get_email_batch(query)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(json_response(StatusCode::OK, &entries))
}

/// PUT /email/update - Insert or overwrite the entry for an address.
pub async fn update_email(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let entry = EmailEntryBody::decode(&body)?.into_entry();
    info!(
        email = %entry.email,
        confirmed_at = entry.confirmed_at_unix(),
        opt_out = entry.opt_out,
        "JSON UpdateEmail"
    );

    state.store.update_email(&entry).await?;
    entry_response(&state, &entry.email).await
}

/// POST /email/delete - Opt an address out. The row stays in the table.
pub async fn delete_email(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req = EmailEntryBody::decode(&body)?;
    info!(email = %req.email, "JSON DeleteEmail");

    state.store.delete_email(&req.email).await?;
    entry_response(&state, &req.email).await
}

/// Requests with the wrong method get an empty 200 and touch nothing.
pub async fn ignore_method() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::AppState;
    use maillist_store::EmailStore;
    use serde_json::Value;
    use std::sync::Arc;

    async fn test_state() -> SharedState {
        let store = EmailStore::open_in_memory().unwrap();
        store.init_schema().await.unwrap();
        Arc::new(AppState::new(store))
    }

    async fn json_of(resp: Response) -> (StatusCode, Value) {
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn email_body(email: &str) -> Bytes {
        Bytes::from(format!(r#"{{"Email":"{email}"}}"#))
    }

    #[tokio::test]
    async fn create_echoes_new_entry() {
        let state = test_state().await;

        let resp = create_email(State(state), email_body("a@x.com"))
            .await
            .unwrap();
        let (status, json) = json_of(resp).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["Email"], "a@x.com");
        assert_eq!(json["ConfirmedAt"], "1970-01-01T00:00:00Z");
        assert_eq!(json["OptOut"], false);
        assert!(json["ID"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn duplicate_create_is_conflict() {
        let state = test_state().await;
        create_email(State(state.clone()), email_body("a@x.com"))
            .await
            .unwrap();

        let err = create_email(State(state), email_body("a@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_missing_email_is_null() {
        let state = test_state().await;

        let resp = get_email(State(state), email_body("nobody@x.com"))
            .await
            .unwrap();
        let (status, json) = json_of(resp).await;

        assert_eq!(status, StatusCode::OK);
        assert!(json.is_null());
    }

    #[tokio::test]
    async fn batch_requires_positive_page_and_count() {
        let state = test_state().await;

        for body in [r#"{"Page":0,"Count":5}"#, r#"{"Page":1}"#, ""] {
            let err = get_email_batch(State(state.clone()), Bytes::from(body))
                .await
                .unwrap_err();
            assert!(
                matches!(err, ApiError::Validation(_)),
                "body {body:?} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn update_accepts_epoch_seconds_and_ignores_id() {
        let state = test_state().await;
        create_email(State(state.clone()), email_body("a@x.com"))
            .await
            .unwrap();

        let resp = update_email(
            State(state),
            Bytes::from(r#"{"ID":999,"Email":"a@x.com","ConfirmedAt":10000,"OptOut":false}"#),
        )
        .await
        .unwrap();
        let (_, json) = json_of(resp).await;

        assert_eq!(json["ConfirmedAt"], "1970-01-01T02:46:40Z");
        assert_ne!(json["ID"], 999);
    }

    #[tokio::test]
    async fn delete_then_batch_skips_opted_out() {
        let state = test_state().await;
        for email in ["a@x.com", "b@x.com"] {
            create_email(State(state.clone()), email_body(email))
                .await
                .unwrap();
        }

        let resp = delete_email(State(state.clone()), email_body("a@x.com"))
            .await
            .unwrap();
        let (_, deleted) = json_of(resp).await;
        assert_eq!(deleted["OptOut"], true);

        let resp = get_email_batch(State(state), Bytes::from(r#"{"Page":1,"Count":10}"#))
            .await
            .unwrap();
        let (_, page) = json_of(resp).await;
        let emails: Vec<&str> = page
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["Email"].as_str().unwrap())
            .collect();
        assert_eq!(emails, vec!["b@x.com"]);
    }
}
