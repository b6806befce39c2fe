#![cfg(feature = "sqlite-backend")]

use rusqlite::Connection;
use objectgraph::schema::ensure_schema;

#[test]
fn test_schema_creates_quad_table_and_indexes() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    assert!(object_exists(&conn, "graph_triples"));
    assert!(object_exists(&conn, "idx_triples_subject"));
    assert!(object_exists(&conn, "idx_triples_object_int"));
}

#[test]
fn test_schema_is_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    conn.execute(
        "INSERT INTO graph_triples(subject, predicate, object, object_kind) VALUES('s', 'p', 'o', 'iri')",
        [],
    )
    .unwrap();
    ensure_schema(&conn).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM graph_triples", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn test_unnamed_graph_rows_are_unique() {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();
    let insert = "INSERT OR IGNORE INTO graph_triples(subject, predicate, object, object_kind) \
                  VALUES('s', 'p', 'o', 'iri')";
    assert_eq!(conn.execute(insert, []).unwrap(), 1);
    assert_eq!(conn.execute(insert, []).unwrap(), 0);
}

fn object_exists(conn: &Connection, name: &str) -> bool {
    conn.prepare("SELECT name FROM sqlite_master WHERE name=?1")
        .unwrap()
        .exists([name])
        .unwrap()
}
