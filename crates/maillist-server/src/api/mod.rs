// ABOUTME: API module containing the HTTP handlers and JSON body types for subscriber operations.
// ABOUTME: Bodies are decoded per concrete type; handlers live in emails.

pub mod body;
pub mod emails;
