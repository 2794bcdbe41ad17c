//! Connection lifecycle and row decoding for SQLite.
//!
//! # Responsibility
//! - Establish file or in-memory SQLite connections on demand.
//! - Configure connection pragmas required by core behavior.
//! - Decode result rows as name-to-value mappings with scalar coercion.
//!
//! # Invariants
//! - A context starts unconnected; execution before `connect` fails with
//!   `StoreError::NotConnected`.
//! - Returned connections have `foreign_keys=ON` and a busy timeout applied.

use crate::db::executor::{prepare_value, QueryExecutor, RowMap};
use crate::db::{StoreError, StoreResult};
use crate::model::value::AttrValue;
use log::{error, info};
use rusqlite::types::ValueRef;
use rusqlite::{params_from_iter, Connection};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Shared handle to the backing store.
///
/// One context serves every model type in a process scope; callers pass it
/// explicitly into each repository rather than resolving it through ambient
/// state. The context is single-threaded by construction; concurrent workers
/// each open their own.
pub struct ConnectionContext {
    conn: Option<Connection>,
    location: Option<PathBuf>,
}

impl ConnectionContext {
    /// Creates an unconnected context.
    pub fn new() -> Self {
        Self {
            conn: None,
            location: None,
        }
    }

    /// Opens or creates the SQLite database at `location`.
    ///
    /// # Side effects
    /// - Applies bootstrap pragmas to the new connection.
    /// - Emits `db_connect` logging events with duration and status.
    pub fn connect(&mut self, location: impl AsRef<Path>) -> StoreResult<()> {
        let started_at = Instant::now();
        info!("event=db_connect module=db status=start mode=file");

        let conn = match Connection::open(&location) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_connect module=db status=error mode=file duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        bootstrap_connection(&conn)?;
        self.conn = Some(conn);
        self.location = Some(location.as_ref().to_path_buf());

        info!(
            "event=db_connect module=db status=ok mode=file duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    /// Opens an in-memory SQLite database.
    ///
    /// # Side effects
    /// - Applies bootstrap pragmas to the new connection.
    /// - Emits `db_connect` logging events with status.
    pub fn connect_in_memory(&mut self) -> StoreResult<()> {
        info!("event=db_connect module=db status=start mode=memory");

        let conn = match Connection::open_in_memory() {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_connect module=db status=error mode=memory error={}",
                    err
                );
                return Err(err.into());
            }
        };

        bootstrap_connection(&conn)?;
        self.conn = Some(conn);
        self.location = None;

        info!("event=db_connect module=db status=ok mode=memory");
        Ok(())
    }

    /// Returns whether a connection has been established.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Returns the configured store location.
    ///
    /// `None` before `connect` and for in-memory databases.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Returns the underlying connection handle, when established.
    pub fn connection(&self) -> Option<&Connection> {
        self.conn.as_ref()
    }

    /// Executes a raw SQL batch, for out-of-band setup such as table
    /// creation by external collaborators.
    pub fn batch(&self, sql: &str) -> StoreResult<()> {
        self.require_connection()?.execute_batch(sql)?;
        Ok(())
    }

    fn require_connection(&self) -> StoreResult<&Connection> {
        self.conn.as_ref().ok_or(StoreError::NotConnected)
    }
}

impl Default for ConnectionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryExecutor for ConnectionContext {
    fn execute(&self, sql: &str, args: &[AttrValue]) -> StoreResult<usize> {
        let conn = self.require_connection()?;
        let bound = args.iter().map(prepare_value).collect::<Vec<_>>();
        let changed = conn.execute(sql, params_from_iter(bound))?;
        Ok(changed)
    }

    fn query(&self, sql: &str, args: &[AttrValue]) -> StoreResult<Vec<RowMap>> {
        let conn = self.require_connection()?;
        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let bound = args.iter().map(prepare_value).collect::<Vec<_>>();
        let mut rows = stmt.query(params_from_iter(bound))?;
        let mut decoded = Vec::new();

        while let Some(row) = rows.next()? {
            let mut map = RowMap::new();
            for (index, name) in columns.iter().enumerate() {
                map.insert(name.clone(), decode_value(row.get_ref(index)?));
            }
            decoded.push(map);
        }

        Ok(decoded)
    }

    fn last_insert_id(&self) -> StoreResult<i64> {
        Ok(self.require_connection()?.last_insert_rowid())
    }
}

fn bootstrap_connection(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    Ok(())
}

/// Coerces one SQLite scalar into its natural in-memory kind.
fn decode_value(value: ValueRef<'_>) -> AttrValue {
    match value {
        ValueRef::Null => AttrValue::Null,
        ValueRef::Integer(n) => AttrValue::Integer(n),
        ValueRef::Real(r) => AttrValue::Real(r),
        ValueRef::Text(bytes) => AttrValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => AttrValue::Blob(bytes.to_vec()),
    }
}
