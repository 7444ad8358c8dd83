// ABOUTME: SQLite-backed subscriber store with create, get, paginated batch, upsert, and soft delete.
// ABOUTME: One shared connection serves every front end; each call is a single statement off the async runtime.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use maillist_core::{BatchQuery, EmailEntry, datetime_to_unix, unix_to_datetime};
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, Row, params};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The address is already registered (uniqueness constraint).
    #[error("email already subscribed: {email}")]
    Conflict { email: String },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("background task failed: {0}")]
    TaskJoin(String),

    /// A previous operation panicked while holding the connection.
    #[error("connection lock poisoned: {0}")]
    Poisoned(String),
}

impl StoreError {
    /// True for uniqueness conflicts; everything else is a storage failure.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskJoin(err.to_string())
    }
}

const SELECT_COLUMNS: &str = "SELECT id, email, confirmed_at, opt_out FROM emails";

/// Handle to the subscriber table. Clones share one connection, so the
/// same handle can be given to the RPC and JSON front ends.
#[derive(Clone)]
pub struct EmailStore {
    conn: Arc<Mutex<Connection>>,
}

impl EmailStore {
    /// Open or create the database file at the given path.
    /// The schema is not touched until `init_schema` is called.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        tracing::info!(path = %path.display(), "opening subscriber database");
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Create the `emails` table. An existing table is left as it is.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        self.execute(|conn| {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS emails (
                    id INTEGER PRIMARY KEY,
                    email TEXT UNIQUE,
                    confirmed_at INTEGER,
                    opt_out INTEGER
                );",
            )?;
            Ok(())
        })
        .await
    }

    /// Insert a new, unconfirmed, subscribed entry.
    pub async fn create_email(&self, email: &str) -> Result<(), StoreError> {
        let email = email.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO emails (email, confirmed_at, opt_out) VALUES (?1, 0, 0)",
                params![email],
            )
            .map_err(|e| classify_insert_error(e, &email))?;
            Ok(())
        })
        .await
    }

    /// Look up one entry by exact address. `Ok(None)` means not registered.
    pub async fn get_email(&self, email: &str) -> Result<Option<EmailEntry>, StoreError> {
        let email = email.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE email = ?1"))?;
            let mut rows = stmt.query_map(params![email], entry_from_row)?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// One page of subscribed entries in ascending id order. Opted-out rows
    /// are skipped; a page past the end is empty. Any bad row fails the
    /// whole page.
    pub async fn get_email_batch(&self, query: BatchQuery) -> Result<Vec<EmailEntry>, StoreError> {
        let limit = i64::from(query.count());
        let offset = i64::try_from(query.offset()).unwrap_or(i64::MAX);
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} WHERE opt_out = 0 ORDER BY id ASC LIMIT ?1 OFFSET ?2"
            ))?;
            let rows = stmt.query_map(params![limit, offset], entry_from_row)?;
            let entries = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(entries)
        })
        .await
    }

    /// Insert the entry, or overwrite `confirmed_at` and `opt_out` of the
    /// row with the same address. The entry's `id` is ignored.
    pub async fn update_email(&self, entry: &EmailEntry) -> Result<(), StoreError> {
        let email = entry.email.clone();
        let confirmed_at = datetime_to_unix(&entry.confirmed_at);
        let opt_out = entry.opt_out;
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO emails (email, confirmed_at, opt_out) VALUES (?1, ?2, ?3)
                 ON CONFLICT(email) DO UPDATE SET
                    confirmed_at = excluded.confirmed_at,
                    opt_out = excluded.opt_out",
                params![email, confirmed_at, opt_out],
            )?;
            Ok(())
        })
        .await
    }

    /// Opt the address out. Unknown addresses are a no-op; rows are never
    /// physically removed.
    pub async fn delete_email(&self, email: &str) -> Result<(), StoreError> {
        let email = email.to_string();
        self.execute(move |conn| {
            let changed = conn.execute(
                "UPDATE emails SET opt_out = 1 WHERE email = ?1",
                params![email],
            )?;
            if changed == 0 {
                tracing::debug!(email = %email, "delete matched no subscriber");
            }
            Ok(())
        })
        .await
    }

    /// Run a closure against the connection on the blocking pool.
    async fn execute<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::Poisoned(e.to_string()))?;
            f(&conn)
        })
        .await?
    }
}

fn classify_insert_error(err: rusqlite::Error, email: &str) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            StoreError::Conflict {
                email: email.to_string(),
            }
        }
        other => StoreError::Sqlite(other),
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<EmailEntry> {
    let confirmed_secs: i64 = row.get(2)?;
    let confirmed_at = unix_to_datetime(confirmed_secs)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Integer, Box::new(e)))?;
    Ok(EmailEntry {
        id: row.get(0)?,
        email: row.get(1)?,
        confirmed_at,
        opt_out: row.get(3)?,
    })
}
