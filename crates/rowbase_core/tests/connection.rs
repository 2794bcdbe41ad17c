use rowbase_core::{AttrValue, ConnectionContext, QueryExecutor, StoreError};

#[test]
fn every_operation_fails_before_connect() {
    let ctx = ConnectionContext::new();
    assert!(!ctx.is_connected());
    assert!(ctx.location().is_none());

    assert!(matches!(
        ctx.execute("INSERT INTO posts (title) VALUES (?)", &[AttrValue::from("x")]),
        Err(StoreError::NotConnected)
    ));
    assert!(matches!(
        ctx.query("SELECT 1", &[]),
        Err(StoreError::NotConnected)
    ));
    assert!(matches!(ctx.last_insert_id(), Err(StoreError::NotConnected)));
    assert!(matches!(
        ctx.batch("CREATE TABLE t (x);"),
        Err(StoreError::NotConnected)
    ));
}

#[test]
fn connect_in_memory_establishes_a_connection_without_location() {
    let mut ctx = ConnectionContext::new();
    ctx.connect_in_memory().unwrap();

    assert!(ctx.is_connected());
    assert!(ctx.location().is_none());
    ctx.query("SELECT 1", &[]).unwrap();
}

#[test]
fn connect_creates_the_file_and_reports_its_location() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rowbase.db");

    let mut ctx = ConnectionContext::new();
    ctx.connect(&path).unwrap();

    assert!(ctx.is_connected());
    assert_eq!(ctx.location(), Some(path.as_path()));
    assert!(path.exists());
}

#[test]
fn rows_decode_as_name_value_maps_with_scalar_coercion() {
    let mut ctx = ConnectionContext::new();
    ctx.connect_in_memory().unwrap();

    let rows = ctx
        .query(
            "SELECT 1 AS n, 1.5 AS r, 'x' AS t, NULL AS z, X'4142' AS b",
            &[],
        )
        .unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row["n"], AttrValue::Integer(1));
    assert_eq!(row["r"], AttrValue::Real(1.5));
    assert_eq!(row["t"], AttrValue::from("x"));
    assert_eq!(row["z"], AttrValue::Null);
    assert_eq!(row["b"], AttrValue::Blob(vec![0x41, 0x42]));
}

#[test]
fn execute_returns_the_affected_row_count() {
    let mut ctx = ConnectionContext::new();
    ctx.connect_in_memory().unwrap();
    ctx.batch("CREATE TABLE items (id INTEGER PRIMARY KEY, label TEXT);")
        .unwrap();

    let inserted = ctx
        .execute(
            "INSERT INTO items (label) VALUES (?)",
            &[AttrValue::from("one")],
        )
        .unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(ctx.last_insert_id().unwrap(), 1);

    let updated = ctx
        .execute("UPDATE items SET label = ?", &[AttrValue::from("renamed")])
        .unwrap();
    assert_eq!(updated, 1);
}

#[test]
fn sqlite_failures_pass_through_unchanged() {
    let mut ctx = ConnectionContext::new();
    ctx.connect_in_memory().unwrap();

    let err = ctx.query("SELECT * FROM missing_table", &[]).unwrap_err();
    match err {
        StoreError::Sqlite(inner) => {
            assert!(inner.to_string().contains("missing_table"));
        }
        other => panic!("unexpected error: {other}"),
    }
}
