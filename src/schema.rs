use rusqlite::Connection;

use crate::errors::ObjectGraphError;

/// Creates the quad table and its lookup indexes if missing.
///
/// `context` is `''` for the unnamed graph. Terms are stored JSON-encoded;
/// the object is also split into kind plus an integer or text column so range
/// constraints can be evaluated in SQL.
pub fn ensure_schema(conn: &Connection) -> Result<(), ObjectGraphError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS graph_triples (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            context     TEXT NOT NULL DEFAULT '',
            subject     TEXT NOT NULL,
            predicate   TEXT NOT NULL,
            object      TEXT NOT NULL,
            object_kind TEXT NOT NULL,
            object_int  INTEGER,
            object_text TEXT,
            UNIQUE(context, subject, predicate, object)
        );
        CREATE INDEX IF NOT EXISTS idx_triples_subject ON graph_triples(subject);
        CREATE INDEX IF NOT EXISTS idx_triples_predicate ON graph_triples(predicate);
        CREATE INDEX IF NOT EXISTS idx_triples_object ON graph_triples(object);
        CREATE INDEX IF NOT EXISTS idx_triples_object_int ON graph_triples(object_kind, object_int);
        CREATE INDEX IF NOT EXISTS idx_triples_object_text ON graph_triples(object_kind, object_text);
        "#,
    )
    .map_err(|e| ObjectGraphError::schema(e.to_string()))?;
    Ok(())
}
