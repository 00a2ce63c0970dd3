// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use rusqlite::Connection;
use rusqlite::Transaction;

use crate::error::Fallible;

/// Storage key for the review-state map.
pub const REVIEW_STATES_KEY: &str = "review_states";

/// Storage key for the learner's running stats.
pub const USER_STATS_KEY: &str = "user_stats";

/// Storage key for per-day study records.
pub const DAILY_STATS_KEY: &str = "daily_stats";

/// Storage key for the achievement set.
pub const ACHIEVEMENTS_KEY: &str = "achievements";

/// Key-value string storage. Values are JSON documents written under fixed
/// keys; there is no schema versioning.
pub trait Storage {
    fn get(&self, key: &str) -> Fallible<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Fallible<()>;
}

/// Ephemeral storage for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Fallible<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable storage backed by a single-table SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }
}

impl Storage for SqliteStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        let conn = self.acquire();
        let mut stmt = conn.prepare("select value from kv where key = ?;")?;
        let mut rows = stmt.query([key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Fallible<()> {
        log::debug!("Writing {key} ({} bytes).", value.len());
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let sql = "insert into kv (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";
        tx.execute(sql, (key, value))?;
        tx.commit()?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["kv"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() -> Fallible<()> {
        let mut store = MemoryStore::new();
        assert!(store.get("missing")?.is_none());
        store.put("a", "1")?;
        store.put("a", "2")?;
        assert_eq!(store.get("a")?, Some("2".to_string()));
        Ok(())
    }

    #[test]
    fn test_sqlite_store() -> Fallible<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        let path = path.to_str().unwrap();
        let mut store = SqliteStore::new(path)?;
        assert!(store.get("missing")?.is_none());
        store.put(REVIEW_STATES_KEY, "{}")?;
        store.put(REVIEW_STATES_KEY, "{\"1\":{}}")?;
        assert_eq!(
            store.get(REVIEW_STATES_KEY)?,
            Some("{\"1\":{}}".to_string())
        );
        Ok(())
    }

    #[test]
    fn test_sqlite_store_survives_reopen() -> Fallible<()> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        let path = path.to_str().unwrap();
        {
            let mut store = SqliteStore::new(path)?;
            store.put(USER_STATS_KEY, "{\"total_points\":42}")?;
        }
        let store = SqliteStore::new(path)?;
        assert_eq!(
            store.get(USER_STATS_KEY)?,
            Some("{\"total_points\":42}".to_string())
        );
        Ok(())
    }
}
