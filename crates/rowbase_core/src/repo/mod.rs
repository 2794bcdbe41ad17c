//! Repository layer: persistence and finder operations over records.
//!
//! # Responsibility
//! - Assemble INSERT/UPDATE/SELECT statements from declared attribute sets.
//! - Route saves to insert or update based on record state.
//!
//! # Invariants
//! - Updates target the baseline identity, never the mutated current `id`.
//! - SQL column order always follows attribute declaration order.

pub mod record_repo;
