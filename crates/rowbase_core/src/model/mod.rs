//! In-memory data model: attribute values, schemas, records.
//!
//! # Responsibility
//! - Define the scalar value kinds an attribute can hold.
//! - Declare and validate per-type attribute sets.
//! - Track current and baseline attribute snapshots per record.
//!
//! # Invariants
//! - Every attribute reference is validated against the declared set;
//!   violations fail loudly, never silently.

pub mod record;
pub mod schema;
pub mod value;
