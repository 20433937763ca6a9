//! Durable notification queue.
//!
//! Each pending [`ScheduledNotification`] is one row in the records table,
//! keyed `notification-<id>`. Removal is a single SQL `DELETE`, so when two
//! timer callbacks race on the queue neither can resurrect a row the other
//! already consumed, and exactly one caller observes the delete of a given
//! id. Reads stay fail-open: an unreadable row is skipped, never fatal.

use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;

use super::db::Db;
use crate::libs::error::CoreError;
use crate::libs::notification::ScheduledNotification;

const SCHEMA_RECORDS: &str = "CREATE TABLE IF NOT EXISTS records (
    key TEXT NOT NULL PRIMARY KEY,
    value TEXT NOT NULL
);";
const SELECT_ITEMS: &str = "SELECT value FROM records WHERE key LIKE 'notification-%' ORDER BY rowid";
const SELECT_ITEM: &str = "SELECT value FROM records WHERE key = ?1";
const UPSERT_ITEM: &str = "INSERT INTO records (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const DELETE_ITEM: &str = "DELETE FROM records WHERE key = ?1";

const QUEUE_KEY_PREFIX: &str = "notification-";

fn item_key(id: &str) -> String {
    format!("{}{}", QUEUE_KEY_PREFIX, id)
}

pub struct Queue {
    conn: Connection,
}

impl Queue {
    pub fn new() -> Result<Self, CoreError> {
        let db = Db::new().map_err(|e| CoreError::DataStorage(e.to_string()))?;
        db.conn.execute(SCHEMA_RECORDS, [])?;

        Ok(Queue { conn: db.conn })
    }

    /// Every pending item in insertion order.
    pub fn all(&self) -> Result<Vec<ScheduledNotification>, CoreError> {
        let mut stmt = self.conn.prepare(SELECT_ITEMS)?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut items = Vec::new();
        for blob in rows {
            match serde_json::from_str(&blob?) {
                Ok(item) => items.push(item),
                Err(e) => tracing::warn!("skipping corrupted notification row: {}", e),
            }
        }
        Ok(items)
    }

    pub fn push(&self, notification: &ScheduledNotification) -> Result<(), CoreError> {
        let blob = serde_json::to_string(notification).map_err(|e| CoreError::Validation(e.to_string()))?;
        self.conn.execute(UPSERT_ITEM, params![item_key(&notification.id), blob])?;
        Ok(())
    }

    pub fn find(&self, id: &str) -> Result<Option<ScheduledNotification>, CoreError> {
        let blob = self
            .conn
            .query_row(SELECT_ITEM, params![item_key(id)], |row| row.get::<_, String>(0))
            .optional()?;

        match blob {
            Some(blob) => match serde_json::from_str(&blob) {
                Ok(item) => Ok(Some(item)),
                Err(e) => {
                    tracing::warn!("corrupted notification row '{}': {}", id, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Claims an item for delivery: returns it only when this call's delete
    /// removed the row. Concurrent callers racing on the same id get the item
    /// at most once between them.
    pub fn take(&self, id: &str) -> Result<Option<ScheduledNotification>, CoreError> {
        let item = self.find(id)?;
        let deleted = self.conn.execute(DELETE_ITEM, params![item_key(id)])?;
        if deleted == 1 {
            Ok(item)
        } else {
            Ok(None)
        }
    }

    /// Removes an item by id; removing an absent id is a no-op, so a fired or
    /// cancelled identifier can never be consumed twice.
    pub fn remove(&self, id: &str) -> Result<(), CoreError> {
        self.conn.execute(DELETE_ITEM, params![item_key(id)])?;
        Ok(())
    }

    /// Pending items visible to a user: their own plus broadcasts.
    pub fn for_user(&self, user_id: &str) -> Result<Vec<ScheduledNotification>, CoreError> {
        Ok(self.all()?.into_iter().filter(|n| n.user_id == user_id || n.is_broadcast()).collect())
    }

    /// Count of pending items per notification type for a user.
    pub fn stats_for_user(&self, user_id: &str) -> Result<HashMap<&'static str, usize>, CoreError> {
        let mut stats = HashMap::new();
        for item in self.for_user(user_id)? {
            *stats.entry(item.kind.label()).or_insert(0) += 1;
        }
        Ok(stats)
    }
}
