// ABOUTME: Core library for maillist, containing the subscriber entry and pagination types.
// ABOUTME: Both front ends and the store share these so every protocol maps entries the same way.

pub mod entry;
pub mod query;

pub use entry::{EmailEntry, datetime_to_unix, unix_to_datetime};
pub use query::{BatchQuery, ValidationError};
