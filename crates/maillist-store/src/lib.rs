// ABOUTME: Persistence layer for maillist, the only component that touches the database.
// ABOUTME: Provides schema creation and the five subscriber operations over one SQLite file.

pub mod sqlite;

pub use sqlite::{EmailStore, StoreError};
