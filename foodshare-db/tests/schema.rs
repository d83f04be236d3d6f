use foodshare_db::schema::{recreate_table, table_exists};
use foodshare_db::{ensure_schema, open_database, open_memory};
use foodshare_model::Table;

fn schema_snapshot(conn: &rusqlite::Connection) -> Vec<(String, String)> {
    let mut stmt = conn
        .prepare("SELECT name, sql FROM sqlite_master WHERE sql IS NOT NULL ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    for table in Table::ALL {
        assert!(
            table_exists(&conn, table).unwrap(),
            "table '{}' should exist",
            table
        );
    }
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    let before = schema_snapshot(&conn);
    ensure_schema(&conn).unwrap();
    ensure_schema(&conn).unwrap();
    assert_eq!(schema_snapshot(&conn), before);
}

#[test]
fn ensure_schema_keeps_existing_rows() {
    let conn = open_memory().unwrap();
    conn.execute(
        "INSERT INTO receivers VALUES (1, 'Helping Hands', 'NGO', 'Springfield', '555-0201')",
        [],
    )
    .unwrap();
    ensure_schema(&conn).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM receivers", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn foreign_keys_not_enforced() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 0);

    // A claim pointing at listings and receivers that don't exist is accepted.
    conn.execute(
        "INSERT INTO claims VALUES (1, 999, 999, 'Pending', '2025-03-05 05:26:00')",
        [],
    )
    .unwrap();
}

#[test]
fn ensure_schema_disables_foreign_keys_on_any_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys=ON;").unwrap();
    ensure_schema(&conn).unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 0);
}

#[test]
fn referenced_tables_can_be_recreated() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO providers VALUES (1, 'Fresh Bites', 'Restaurant', '1 Main St', 'Springfield', '555-0101');
         INSERT INTO food_listings VALUES (1, 'Bread', 10, '2025-03-10', 1, 'Restaurant', 'Springfield', 'Vegetarian', 'Breakfast');
         INSERT INTO receivers VALUES (1, 'Helping Hands', 'NGO', 'Springfield', '555-0201');
         INSERT INTO claims VALUES (1, 1, 1, 'Completed', '2025-03-01 09:00:00');",
    )
    .unwrap();

    recreate_table(&conn, Table::Providers).unwrap();
    recreate_table(&conn, Table::Receivers).unwrap();
    recreate_table(&conn, Table::FoodListings).unwrap();
    let claims: i64 = conn
        .query_row("SELECT COUNT(*) FROM claims", [], |row| row.get(0))
        .unwrap();
    assert_eq!(claims, 1);
}

#[test]
fn recreate_table_empties_it() {
    let conn = open_memory().unwrap();
    conn.execute(
        "INSERT INTO receivers VALUES (1, 'Helping Hands', 'NGO', 'Springfield', '555-0201')",
        [],
    )
    .unwrap();
    recreate_table(&conn, Table::Receivers).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM receivers", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn open_database_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("foodshare.db");
    let conn = open_database(&path).unwrap();
    assert!(path.exists());
    assert!(table_exists(&conn, Table::Claims).unwrap());
    drop(conn);

    // Reopening an existing file is fine.
    let conn = open_database(&path).unwrap();
    assert!(table_exists(&conn, Table::Providers).unwrap());
}

#[test]
fn open_database_on_unwritable_path_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"plain file").unwrap();
    assert!(open_database(&blocker.join("foodshare.db")).is_err());
}
