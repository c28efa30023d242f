use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{Connection, params};
use serde_json::Value;

use super::listeners::Listeners;
use super::path::{join_path, parse_path};
use super::schema::SCHEMA;
use super::tree::{flatten, normalize, set_in};
use super::{PushIdGenerator, RemoteStore, Subscription};
use crate::error::{Error, Result};

/// Persistent store backed by a single SQLite file.
///
/// Listeners are process-local: writes made by another process sharing the
/// file are not delivered until this process writes to an overlapping path.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    ids: PushIdGenerator,
    listeners: Listeners,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
            ids: PushIdGenerator::new(),
            listeners: Listeners::default(),
        })
    }

    pub fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

fn read_subtree(conn: &Connection, segments: &[String]) -> Result<Value> {
    let base = join_path(segments);
    let mut stmt = conn.prepare(
        "SELECT path, value FROM nodes
         WHERE ?1 = '' OR path = ?1 OR substr(path, 1, length(?1) + 1) = ?1 || '/'
         ORDER BY path",
    )?;

    let rows = stmt
        .query_map(params![base], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut tree = Value::Null;
    for (path, raw) in rows {
        let relative = if base.is_empty() {
            path.as_str()
        } else {
            path[base.len()..].trim_start_matches('/')
        };
        let keys: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        let value: Value = serde_json::from_str(&raw)?;
        set_in(&mut tree, &keys, value);
    }
    Ok(tree)
}

fn write_subtree(conn: &mut Connection, segments: &[String], value: &Value) -> Result<()> {
    let base = join_path(segments);
    let now = Utc::now().to_rfc3339();
    let tx = conn.transaction()?;

    if base.is_empty() {
        tx.execute("DELETE FROM nodes", [])?;
    } else {
        tx.execute(
            "DELETE FROM nodes
             WHERE path = ?1 OR substr(path, 1, length(?1) + 1) = ?1 || '/'",
            params![base],
        )?;
        // A scalar stored at an ancestor is replaced by the new object.
        for depth in 0..segments.len() {
            tx.execute(
                "DELETE FROM nodes WHERE path = ?1",
                params![join_path(&segments[..depth])],
            )?;
        }
    }

    let mut leaves = Vec::new();
    flatten(segments, value, &mut leaves);
    {
        let mut stmt =
            tx.prepare("INSERT INTO nodes (path, value, updated_at) VALUES (?1, ?2, ?3)")?;
        for (path, leaf) in &leaves {
            stmt.execute(params![path, serde_json::to_string(leaf)?, now])?;
        }
    }

    tx.commit().map_err(Error::from)
}

impl RemoteStore for SqliteStore {
    fn push(&self, path: &str, value: Value) -> Result<String> {
        let mut segments = parse_path(path)?;
        let id = self.ids.generate();
        segments.push(id.clone());
        self.set(&join_path(&segments), value)?;
        Ok(id)
    }

    fn set(&self, path: &str, value: Value) -> Result<()> {
        let segments = parse_path(path)?;
        let value = normalize(value);

        let mut conn = self.conn();
        write_subtree(&mut conn, &segments, &value)?;
        tracing::debug!(path = %join_path(&segments), "sqlite store write");
        self.listeners
            .notify(&segments, |p| read_subtree(&conn, p));
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Value> {
        let segments = parse_path(path)?;
        read_subtree(&self.conn(), &segments)
    }

    fn subscribe(&self, path: &str) -> Result<Subscription> {
        let segments = parse_path(path)?;
        let conn = self.conn();
        let initial = read_subtree(&conn, &segments);
        Ok(self.listeners.register(segments, initial))
    }
}
