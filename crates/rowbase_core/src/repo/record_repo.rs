//! Record repository: save/insert/update plus finder queries.
//!
//! # Responsibility
//! - Provide CRUD entry points for one model type over a query executor.
//! - Keep SQL assembly inside the persistence boundary.
//!
//! # Invariants
//! - Insert and update bind one value per declared attribute, in
//!   declaration order.
//! - Update's `WHERE id = ?` binds the baseline id, so a save stays
//!   consistent with the row the record was loaded against even when the
//!   caller mutated `id` in memory.
//! - Store failures propagate unmodified; no retry, no in-memory rollback.

use crate::db::executor::{QueryExecutor, RowMap};
use crate::db::StoreResult;
use crate::model::record::Record;
use crate::model::schema::{ModelType, CREATED_AT, ID, UPDATED_AT};
use crate::model::value::AttrValue;
use chrono::Utc;
use log::debug;
use std::sync::Arc;

/// CRUD operations for one model type against a shared executor.
pub struct RecordRepository<'exec, E: QueryExecutor> {
    executor: &'exec E,
    model: Arc<ModelType>,
}

impl<'exec, E: QueryExecutor> RecordRepository<'exec, E> {
    /// Creates a repository bound to an executor and a registered model
    /// type.
    pub fn new(executor: &'exec E, model: Arc<ModelType>) -> Self {
        Self { executor, model }
    }

    /// Returns the model type this repository serves.
    pub fn model(&self) -> &ModelType {
        &self.model
    }

    /// Constructs a record with no attributes set.
    pub fn build(&self) -> StoreResult<Record> {
        Record::new(Arc::clone(&self.model), RowMap::new())
    }

    /// Constructs a record from `attributes`.
    ///
    /// # Errors
    /// - `InvalidAttributes` naming every key outside the declared set.
    pub fn build_from(&self, attributes: RowMap) -> StoreResult<Record> {
        Record::new(Arc::clone(&self.model), attributes)
    }

    /// Returns every row of the model's table as a record.
    pub fn all(&self) -> StoreResult<Vec<Record>> {
        let sql = format!("SELECT * FROM {}", self.model.table_name());
        self.hydrate(self.executor.query(&sql, &[])?)
    }

    /// Returns the rows matching a caller-authored predicate fragment, with
    /// `args` bound positionally.
    ///
    /// # Trust boundary
    /// `predicate` is interpolated into the statement verbatim; it is not
    /// parsed, sanitized or validated here. Never build it from untrusted
    /// input. Only values passed through `args` are safe against injection.
    pub fn find_where(&self, predicate: &str, args: &[AttrValue]) -> StoreResult<Vec<Record>> {
        let sql = format!(
            "SELECT * FROM {} WHERE {}",
            self.model.table_name(),
            predicate
        );
        self.hydrate(self.executor.query(&sql, args)?)
    }

    /// Returns the record with the given id, or `None`.
    ///
    /// "Not found" is never an error.
    pub fn find(&self, id: i64) -> StoreResult<Option<Record>> {
        let mut matches = self.find_where("id = ?", &[AttrValue::Integer(id)])?;
        Ok(if matches.is_empty() {
            None
        } else {
            Some(matches.swap_remove(0))
        })
    }

    /// Constructs a record from `attributes` and saves it.
    ///
    /// Construction and store failures propagate; a record is returned only
    /// when the save succeeded. Callers needing the unsaved instance on
    /// failure construct via [`build_from`](Self::build_from) and save in
    /// two steps.
    pub fn create(&self, attributes: RowMap) -> StoreResult<Record> {
        let mut record = self.build_from(attributes)?;
        self.save(&mut record)?;
        Ok(record)
    }

    /// Saves a record: insert when it is new, update otherwise.
    ///
    /// After either path succeeds the baseline snapshot is reset to a copy
    /// of the current attributes. Returns the store's affected-row count;
    /// callers needing the new identity read `id` off the record.
    pub fn save(&self, record: &mut Record) -> StoreResult<usize> {
        let changed = if record.is_new() {
            self.insert(record)?
        } else {
            self.update(record)?
        };

        record.commit_baseline();
        Ok(changed)
    }

    fn insert(&self, record: &mut Record) -> StoreResult<usize> {
        let now = Utc::now();
        record.set(CREATED_AT, now)?;
        record.set(UPDATED_AT, now)?;

        let columns = self.model.schema().attribute_names();
        let marks = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.model.table_name(),
            columns.join(", "),
            marks
        );

        let changed = self.executor.execute(&sql, &self.bind_values(record)?)?;

        let id = self.executor.last_insert_id()?;
        record.set(ID, id)?;

        debug!(
            "event=record_save module=repo status=ok kind=insert table={} id={id}",
            self.model.table_name()
        );
        Ok(changed)
    }

    fn update(&self, record: &mut Record) -> StoreResult<usize> {
        record.set(UPDATED_AT, Utc::now())?;

        let columns = self.model.schema().attribute_names();
        let assignments = columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?",
            self.model.table_name(),
            assignments
        );

        let mut values = self.bind_values(record)?;
        // The row is addressed by the identity it was loaded under, not by
        // whatever the caller may have set `id` to since.
        values.push(record.baseline(ID)?.clone());

        let changed = self.executor.execute(&sql, &values)?;

        debug!(
            "event=record_save module=repo status=ok kind=update table={} rows={changed}",
            self.model.table_name()
        );
        Ok(changed)
    }

    /// Current attribute values in declaration order.
    fn bind_values(&self, record: &Record) -> StoreResult<Vec<AttrValue>> {
        self.model
            .schema()
            .attribute_names()
            .iter()
            .map(|name| record.get(name).map(AttrValue::clone))
            .collect()
    }

    fn hydrate(&self, rows: Vec<RowMap>) -> StoreResult<Vec<Record>> {
        rows.into_iter()
            .map(|row| Record::new(Arc::clone(&self.model), row))
            .collect()
    }
}
