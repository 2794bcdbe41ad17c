//! Attribute-bag record instances with baseline snapshots.
//!
//! # Responsibility
//! - Hold the current attribute map of one row-shaped instance.
//! - Track the baseline snapshot taken at construction and after each
//!   successful save.
//!
//! # Invariants
//! - The current map always contains every declared attribute; missing
//!   constructor inputs default to `Null`.
//! - Baseline carries the identity under which the row is known to the
//!   store; `set` never touches it.

use crate::db::executor::RowMap;
use crate::db::StoreResult;
use crate::model::schema::{ModelType, ID};
use crate::model::value::AttrValue;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// One in-memory instance bound to a model type's declared attribute set.
///
/// A record is `New` until its first successful insert assigns the
/// store-generated id; afterwards it is `Persisted`. No further state
/// transitions exist.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    model: Arc<ModelType>,
    attributes: RowMap,
    baseline: RowMap,
}

impl Record {
    /// Constructs a record from the supplied attributes.
    ///
    /// Every declared attribute is present in the result; names absent from
    /// `attributes` default to `Null`. The baseline snapshot starts as a
    /// copy of the current map.
    ///
    /// # Errors
    /// - `InvalidAttributes` naming every supplied key outside the declared
    ///   set; no record is produced.
    pub fn new(model: Arc<ModelType>, attributes: RowMap) -> StoreResult<Self> {
        model.validate(attributes.keys().map(String::as_str))?;

        let mut current = RowMap::new();
        for name in model.schema().attribute_names() {
            let value = attributes.get(name).cloned().unwrap_or(AttrValue::Null);
            current.insert(name.clone(), value);
        }

        let baseline = current.clone();
        Ok(Self {
            model,
            attributes: current,
            baseline,
        })
    }

    /// Returns the model type this record is bound to.
    pub fn model(&self) -> &ModelType {
        &self.model
    }

    /// Reads a current attribute value.
    ///
    /// # Errors
    /// - `InvalidAttributes` when `name` is not declared.
    pub fn get(&self, name: &str) -> StoreResult<&AttrValue> {
        self.model.validate([name])?;
        Ok(&self.attributes[name])
    }

    /// Writes a current attribute value. Baseline is unaffected.
    ///
    /// # Errors
    /// - `InvalidAttributes` when `name` is not declared.
    pub fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> StoreResult<()> {
        self.model.validate([name])?;
        self.attributes.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Reads a baseline attribute value, the identity as of the last load
    /// or successful save.
    ///
    /// # Errors
    /// - `InvalidAttributes` when `name` is not declared.
    pub fn baseline(&self, name: &str) -> StoreResult<&AttrValue> {
        self.model.validate([name])?;
        Ok(&self.baseline[name])
    }

    /// Returns whether this record has never been inserted.
    ///
    /// True iff the current `id` is `Null`.
    pub fn is_new(&self) -> bool {
        self.attributes[ID].is_null()
    }

    /// Returns the current attribute map.
    pub fn attributes(&self) -> &RowMap {
        &self.attributes
    }

    /// Replaces the baseline with a copy of the current attributes.
    ///
    /// Called by the persistence layer after each successful save.
    pub(crate) fn commit_baseline(&mut self) {
        self.baseline = self.attributes.clone();
    }
}

/// Diagnostic rendering: type name plus every current attribute/value pair
/// in declaration order. Not a stable wire format.
impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#<{}", self.model.name())?;
        for (index, name) in self.model.schema().attribute_names().iter().enumerate() {
            let separator = if index == 0 { "" } else { "," };
            write!(f, "{separator} {name}: {}", self.attributes[name])?;
        }
        write!(f, ">")
    }
}
