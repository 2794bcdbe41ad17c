//! Statement-shape assertions through a capturing executor double.

use rowbase_core::{
    AttrValue, ModelType, QueryExecutor, RecordRepository, RowMap, StoreResult,
};
use std::cell::RefCell;
use std::sync::Arc;

/// Records every DML call instead of touching a store.
struct CapturingExecutor {
    calls: RefCell<Vec<(String, Vec<AttrValue>)>>,
    next_insert_id: i64,
}

impl CapturingExecutor {
    fn new(next_insert_id: i64) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_insert_id,
        }
    }

    fn last_call(&self) -> (String, Vec<AttrValue>) {
        self.calls.borrow().last().cloned().expect("no call captured")
    }
}

impl QueryExecutor for CapturingExecutor {
    fn execute(&self, sql: &str, args: &[AttrValue]) -> StoreResult<usize> {
        self.calls.borrow_mut().push((sql.to_string(), args.to_vec()));
        Ok(1)
    }

    fn query(&self, _sql: &str, _args: &[AttrValue]) -> StoreResult<Vec<RowMap>> {
        Ok(Vec::new())
    }

    fn last_insert_id(&self) -> StoreResult<i64> {
        Ok(self.next_insert_id)
    }
}

fn post_model() -> Arc<ModelType> {
    Arc::new(
        ModelType::new(
            "Post",
            "posts",
            ["id", "title", "body", "created_at", "updated_at"],
        )
        .unwrap(),
    )
}

fn attributes(pairs: Vec<(&str, AttrValue)>) -> RowMap {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

#[test]
fn insert_names_every_declared_column_in_declaration_order() {
    let executor = CapturingExecutor::new(1);
    let repo = RecordRepository::new(&executor, post_model());

    repo.create(attributes(vec![("title", AttrValue::from("a"))]))
        .unwrap();

    let (sql, args) = executor.last_call();
    assert_eq!(
        sql,
        "INSERT INTO posts (id, title, body, created_at, updated_at) VALUES (?, ?, ?, ?, ?)"
    );
    assert_eq!(args.len(), 5);
    assert_eq!(args[0], AttrValue::Null);
    assert_eq!(args[1], AttrValue::from("a"));
    assert_eq!(args[2], AttrValue::Null);
    assert!(matches!(args[3], AttrValue::Timestamp(_)));
    assert!(matches!(args[4], AttrValue::Timestamp(_)));
}

#[test]
fn insert_assigns_the_generated_identifier() {
    let executor = CapturingExecutor::new(7);
    let repo = RecordRepository::new(&executor, post_model());

    let record = repo.create(RowMap::new()).unwrap();

    assert!(!record.is_new());
    assert_eq!(record.get("id").unwrap(), &AttrValue::Integer(7));
    assert_eq!(record.baseline("id").unwrap(), &AttrValue::Integer(7));
}

#[test]
fn update_sets_every_declared_column_and_targets_id() {
    let executor = CapturingExecutor::new(1);
    let repo = RecordRepository::new(&executor, post_model());

    let mut record = repo
        .build_from(attributes(vec![
            ("id", AttrValue::Integer(5)),
            ("title", AttrValue::from("loaded")),
        ]))
        .unwrap();
    repo.save(&mut record).unwrap();

    let (sql, args) = executor.last_call();
    assert_eq!(
        sql,
        "UPDATE posts SET id = ?, title = ?, body = ?, created_at = ?, updated_at = ? WHERE id = ?"
    );
    assert_eq!(args.len(), 6);
}

#[test]
fn update_where_clause_binds_the_baseline_id_not_the_current_one() {
    let executor = CapturingExecutor::new(1);
    let repo = RecordRepository::new(&executor, post_model());

    let mut record = repo
        .build_from(attributes(vec![("id", AttrValue::Integer(5))]))
        .unwrap();
    record.set("id", 99_i64).unwrap();
    repo.save(&mut record).unwrap();

    let (_, args) = executor.last_call();
    // SET binds current id (99); WHERE binds the identity the record was
    // loaded under (5).
    assert_eq!(args[0], AttrValue::Integer(99));
    assert_eq!(args.last().unwrap(), &AttrValue::Integer(5));

    // After the save the mutated id is the baseline for the next one.
    assert_eq!(record.baseline("id").unwrap(), &AttrValue::Integer(99));
}

#[test]
fn insert_stamps_both_timestamps_update_stamps_only_updated_at() {
    let executor = CapturingExecutor::new(1);
    let repo = RecordRepository::new(&executor, post_model());

    let mut record = repo.create(RowMap::new()).unwrap();
    let created = record.get("created_at").unwrap().clone();
    assert!(matches!(created, AttrValue::Timestamp(_)));

    record.set("title", "later").unwrap();
    repo.save(&mut record).unwrap();

    assert_eq!(record.get("created_at").unwrap(), &created);
    assert!(matches!(
        record.get("updated_at").unwrap(),
        AttrValue::Timestamp(_)
    ));
}
