// ABOUTME: Conversions between protobuf messages and maillist domain types.
// ABOUTME: Timestamps cross the wire as seconds since the epoch; errors map onto gRPC status codes.

use maillist_core::{EmailEntry, ValidationError, datetime_to_unix, unix_to_datetime};
use maillist_store::StoreError;
use tonic::Status;

use crate::pb;

impl From<EmailEntry> for pb::EmailEntry {
    fn from(entry: EmailEntry) -> Self {
        Self {
            id: entry.id,
            email: entry.email,
            confirmed_at: datetime_to_unix(&entry.confirmed_at),
            opt_out: entry.opt_out,
        }
    }
}

impl TryFrom<pb::EmailEntry> for EmailEntry {
    type Error = ValidationError;

    fn try_from(entry: pb::EmailEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            id: entry.id,
            email: entry.email,
            confirmed_at: unix_to_datetime(entry.confirmed_at)?,
            opt_out: entry.opt_out,
        })
    }
}

/// Wrap a lookup result; a missing entry leaves the field unset.
pub fn email_response(entry: Option<EmailEntry>) -> pb::EmailResponse {
    pb::EmailResponse {
        email_entry: entry.map(Into::into),
    }
}

pub fn validation_status(err: ValidationError) -> Status {
    Status::invalid_argument(err.to_string())
}

pub fn store_status(err: StoreError) -> Status {
    match err {
        StoreError::Conflict { .. } => Status::already_exists(err.to_string()),
        other => {
            tracing::error!("store failure: {}", other);
            Status::internal(other.to_string())
        }
    }
}
