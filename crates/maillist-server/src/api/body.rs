// ABOUTME: JSON body shapes for the email endpoints and their per-type decode functions.
// ABOUTME: Field names follow the public contract: ID, Email, ConfirmedAt, OptOut, Page, Count, Err.

use axum::body::Bytes;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use maillist_core::{EmailEntry, unix_to_datetime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// The entry as it travels over the JSON API. Every field is optional on
/// input; a missing `ConfirmedAt` means the epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailEntryBody {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "ConfirmedAt", deserialize_with = "confirmed_at_from_json")]
    pub confirmed_at: DateTime<Utc>,
    #[serde(rename = "OptOut")]
    pub opt_out: bool,
}

impl Default for EmailEntryBody {
    fn default() -> Self {
        EmailEntry::new(String::new()).into()
    }
}

impl EmailEntryBody {
    pub fn decode(bytes: &Bytes) -> Result<Self, ApiError> {
        decode_or_default(bytes)
    }

    pub fn into_entry(self) -> EmailEntry {
        EmailEntry {
            id: self.id,
            email: self.email,
            confirmed_at: self.confirmed_at,
            opt_out: self.opt_out,
        }
    }
}

impl From<EmailEntry> for EmailEntryBody {
    fn from(entry: EmailEntry) -> Self {
        Self {
            id: entry.id,
            email: entry.email,
            confirmed_at: entry.confirmed_at,
            opt_out: entry.opt_out,
        }
    }
}

/// Paging request for `/email/get_batch`. Absent fields stay `None` so the
/// handler can report them alongside non-positive values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BatchBody {
    #[serde(rename = "Page")]
    pub page: Option<i64>,
    #[serde(rename = "Count")]
    pub count: Option<i64>,
}

impl BatchBody {
    pub fn decode(bytes: &Bytes) -> Result<Self, ApiError> {
        decode_or_default(bytes)
    }
}

/// Failure envelope: `{"Err": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(rename = "Err")]
    pub err: String,
}

/// Serialize `value` with the JSON content type the API always answers with.
pub fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode response body: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn decode_or_default<T: DeserializeOwned + Default>(bytes: &Bytes) -> Result<T, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))
}

/// `ConfirmedAt` may arrive as an RFC 3339 string or as whole epoch seconds.
fn confirmed_at_from_json<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Seconds(secs) => unix_to_datetime(secs).map_err(serde::de::Error::custom),
        Raw::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|at| at.with_timezone(&Utc))
            .map_err(|e| serde::de::Error::custom(format!("invalid ConfirmedAt {text:?}: {e}"))),
    }
}
