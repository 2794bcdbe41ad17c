//! Minimal persistence core mapping attribute-bag records to SQLite rows.
//!
//! Each concrete record type registers a [`ModelType`] (diagnostic name,
//! table name, declared attribute set) once at setup time and a
//! [`ConnectionContext`] is connected once per process scope. A
//! [`RecordRepository`] then provides CRUD over [`Record`] instances:
//! construction validated against the declared set, finders that rehydrate
//! rows, and a `save` that routes to INSERT or UPDATE based on record state
//! while updates always target the baseline identity.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use db::context::ConnectionContext;
pub use db::executor::{prepare_value, QueryExecutor, RowMap};
pub use db::{StoreError, StoreResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::Record;
pub use model::schema::{AttributeSchema, ModelType, CREATED_AT, ID, UPDATED_AT};
pub use model::value::AttrValue;
pub use repo::record_repo::RecordRepository;
