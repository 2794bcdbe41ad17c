//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rowbase_core` wiring.
//! - Keep output deterministic for quick local sanity checks.

use rowbase_core::{AttrValue, ConnectionContext, ModelType, RecordRepository, RowMap};
use std::error::Error;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn Error>> {
    let mut ctx = ConnectionContext::new();
    ctx.connect_in_memory()?;
    ctx.batch(
        "CREATE TABLE posts (
            id INTEGER PRIMARY KEY,
            title TEXT,
            body TEXT,
            created_at TEXT,
            updated_at TEXT
        );",
    )?;

    let model = Arc::new(ModelType::new(
        "Post",
        "posts",
        ["id", "title", "body", "created_at", "updated_at"],
    )?);
    let repo = RecordRepository::new(&ctx, model);

    let mut attributes = RowMap::new();
    attributes.insert("title".to_string(), AttrValue::from("hello"));
    let mut record = repo.create(attributes)?;

    record.set("body", "updated through save")?;
    repo.save(&mut record)?;

    let id = record
        .get("id")?
        .as_integer()
        .expect("insert assigns an integer id");
    let reloaded = repo.find(id)?.expect("created row should be findable");

    println!("rowbase_core saved {record}");
    println!("rowbase_core found {reloaded}");
    Ok(())
}
