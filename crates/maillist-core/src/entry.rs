// ABOUTME: Defines the EmailEntry struct representing one mailing-list subscriber.
// ABOUTME: Also owns the seconds-since-epoch timestamp convention shared by every protocol.

use chrono::{DateTime, Utc};

use crate::query::ValidationError;

/// A single subscriber record. The email address is the natural key; `id`
/// is assigned by the store and never changes once the row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailEntry {
    pub id: i64,
    pub email: String,
    pub confirmed_at: DateTime<Utc>,
    pub opt_out: bool,
}

impl EmailEntry {
    /// Create an unsaved entry for the given address. The id is 0 until the
    /// store assigns one, the confirmation time is the epoch, and the
    /// address is subscribed.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: 0,
            email: email.into(),
            confirmed_at: DateTime::<Utc>::UNIX_EPOCH,
            opt_out: false,
        }
    }

    /// Confirmation time as whole seconds since the Unix epoch.
    pub fn confirmed_at_unix(&self) -> i64 {
        datetime_to_unix(&self.confirmed_at)
    }

    /// True while the address has not opted out.
    pub fn is_subscribed(&self) -> bool {
        !self.opt_out
    }
}

/// Convert stored or wire seconds into a UTC timestamp.
pub fn unix_to_datetime(secs: i64) -> Result<DateTime<Utc>, ValidationError> {
    DateTime::from_timestamp(secs, 0).ok_or(ValidationError::TimestampOutOfRange(secs))
}

/// Convert a timestamp into whole seconds since the epoch, dropping any
/// sub-second part.
pub fn datetime_to_unix(at: &DateTime<Utc>) -> i64 {
    at.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_is_subscribed_and_unconfirmed() {
        let entry = EmailEntry::new("a@x.com");

        assert_eq!(entry.id, 0);
        assert_eq!(entry.email, "a@x.com");
        assert_eq!(entry.confirmed_at_unix(), 0);
        assert!(!entry.opt_out);
        assert!(entry.is_subscribed());
    }

    #[test]
    fn unix_seconds_round_trip() {
        let at = unix_to_datetime(10_000).unwrap();
        assert_eq!(at.to_rfc3339(), "1970-01-01T02:46:40+00:00");
        assert_eq!(datetime_to_unix(&at), 10_000);
    }

    #[test]
    fn sub_second_precision_is_dropped() {
        let at = DateTime::from_timestamp(42, 999_000_000).unwrap();
        assert_eq!(datetime_to_unix(&at), 42);
    }

    #[test]
    fn out_of_range_seconds_are_rejected() {
        let err = unix_to_datetime(i64::MAX).unwrap_err();
        assert!(matches!(err, ValidationError::TimestampOutOfRange(i64::MAX)));
    }
}
