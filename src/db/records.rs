//! User-namespaced record store over a single SQLite key-value table.
//!
//! Each collection (`tasks`, `sessions`, `artifacts`) is one JSON blob keyed
//! by `<collection>-<user>`; per-user settings live under `settings-<user>`
//! as a single object. Every write replaces the whole blob in one statement,
//! so a failed write never leaves a collection half-updated.
//!
//! Reads are fail-open: a missing blob auto-initializes to an empty
//! collection and a corrupted blob is treated as empty (logged, never fatal).
//! Malformed persisted state must not take the application down.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::db::Db;
use crate::libs::error::CoreError;
use crate::libs::settings::{Settings, SettingsPatch};

const SCHEMA_RECORDS: &str = "CREATE TABLE IF NOT EXISTS records (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL
);";
const SELECT_VALUE: &str = "SELECT value FROM records WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO records (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value";

const SETTINGS_KEY: &str = "settings";

/// A persistable record addressed by a string identifier.
pub trait Record {
    fn id(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Tasks,
    Sessions,
    Artifacts,
}

impl Collection {
    fn key(&self) -> &'static str {
        match self {
            Collection::Tasks => "tasks",
            Collection::Sessions => "sessions",
            Collection::Artifacts => "artifacts",
        }
    }
}

pub struct RecordStore {
    conn: Connection,
    active_user: Option<String>,
}

impl RecordStore {
    pub fn new() -> Result<Self, CoreError> {
        let db = Db::new().map_err(|e| CoreError::DataStorage(e.to_string()))?;
        db.conn.execute(SCHEMA_RECORDS, [])?;

        Ok(RecordStore {
            conn: db.conn,
            active_user: None,
        })
    }

    /// Opens the store already pointed at a user namespace.
    pub fn for_user(user_id: &str) -> Result<Self, CoreError> {
        let mut store = Self::new()?;
        store.set_active_user(user_id);
        Ok(store)
    }

    /// Redirects all subsequent reads and writes to this user's namespace.
    /// Switching users does not migrate or merge data.
    pub fn set_active_user(&mut self, user_id: &str) {
        self.active_user = Some(user_id.to_string());
    }

    pub fn active_user(&self) -> Option<&str> {
        self.active_user.as_deref()
    }

    fn namespaced_key(&self, base: &str) -> Result<String, CoreError> {
        match &self.active_user {
            Some(user) => Ok(format!("{}-{}", base, user)),
            None => Err(CoreError::NoActiveUser),
        }
    }

    fn read_blob(&self, key: &str) -> Result<Option<String>, CoreError> {
        let value = self
            .conn
            .query_row(SELECT_VALUE, params![key], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(value)
    }

    fn write_blob(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.conn.execute(UPSERT_VALUE, params![key, value])?;
        Ok(())
    }

    /// Raw collection contents. Missing blobs are initialized to `[]`;
    /// unreadable blobs are recovered as empty collections.
    fn read_collection(&self, collection: Collection) -> Result<Vec<Value>, CoreError> {
        let key = self.namespaced_key(collection.key())?;
        match self.read_blob(&key)? {
            Some(blob) => match serde_json::from_str::<Vec<Value>>(&blob) {
                Ok(records) => Ok(records),
                Err(e) => {
                    tracing::warn!("corrupted {} blob for key '{}', recovering as empty: {}", collection.key(), key, e);
                    Ok(Vec::new())
                }
            },
            None => {
                self.write_blob(&key, "[]")?;
                Ok(Vec::new())
            }
        }
    }

    fn write_collection(&self, collection: Collection, records: &[Value]) -> Result<(), CoreError> {
        let key = self.namespaced_key(collection.key())?;
        let blob = serde_json::to_string(records).map_err(|e| CoreError::Validation(e.to_string()))?;
        self.write_blob(&key, &blob)
    }

    /// Returns all records of a collection in insertion order. Records that
    /// no longer match the expected shape are skipped, not fatal.
    pub fn list<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, CoreError> {
        let raw = self.read_collection(collection)?;
        let mut records = Vec::with_capacity(raw.len());
        for value in raw {
            match serde_json::from_value::<T>(value) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("skipping malformed {} record: {}", collection.key(), e),
            }
        }
        Ok(records)
    }

    /// Inserts the record if its id is absent, replaces it otherwise.
    pub fn upsert<T: Serialize + Record>(&self, collection: Collection, record: &T) -> Result<(), CoreError> {
        let mut records = self.read_collection(collection)?;
        let value = serde_json::to_value(record).map_err(|e| CoreError::Validation(e.to_string()))?;

        match records.iter_mut().find(|v| v.get("id").and_then(Value::as_str) == Some(record.id())) {
            Some(existing) => *existing = value,
            None => records.push(value),
        }
        self.write_collection(collection, &records)
    }

    /// Removes a record by id; a missing id is a no-op.
    pub fn remove(&self, collection: Collection, id: &str) -> Result<(), CoreError> {
        let mut records = self.read_collection(collection)?;
        let before = records.len();
        records.retain(|v| v.get("id").and_then(Value::as_str) != Some(id));
        if records.len() != before {
            self.write_collection(collection, &records)?;
        }
        Ok(())
    }

    /// Appends a record without an id lookup, preserving insertion order.
    pub fn append<T: Serialize>(&self, collection: Collection, record: &T) -> Result<(), CoreError> {
        let mut records = self.read_collection(collection)?;
        records.push(serde_json::to_value(record).map_err(|e| CoreError::Validation(e.to_string()))?);
        self.write_collection(collection, &records)
    }

    /// The active user's settings; defaults when missing or unreadable.
    pub fn settings(&self) -> Result<Settings, CoreError> {
        let key = self.namespaced_key(SETTINGS_KEY)?;
        let settings = match self.read_blob(&key)? {
            Some(blob) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                tracing::warn!("corrupted settings blob for key '{}', using defaults: {}", key, e);
                Settings::default()
            }),
            None => Settings::default(),
        };
        Ok(settings)
    }

    /// Shallow-merges the patch into stored settings and persists the result.
    pub fn update_settings(&self, patch: SettingsPatch) -> Result<Settings, CoreError> {
        let mut settings = self.settings()?;
        settings.merge(patch);
        let key = self.namespaced_key(SETTINGS_KEY)?;
        let blob = serde_json::to_string(&settings).map_err(|e| CoreError::Validation(e.to_string()))?;
        self.write_blob(&key, &blob)?;
        Ok(settings)
    }
}
