pub const SCHEMA: &str = r#"
-- One row per scalar leaf of the tree. Objects are implied by their leaves,
-- so an empty object is never stored.
CREATE TABLE IF NOT EXISTS nodes (
    path TEXT PRIMARY KEY,       -- slash-joined keys, '' for a scalar root
    value TEXT NOT NULL,         -- JSON-encoded scalar
    updated_at TEXT DEFAULT (datetime('now'))
);
"#;
