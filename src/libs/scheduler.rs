//! Deferred notification scheduling and delivery.
//!
//! The scheduler pairs the durable queue with an in-memory map of armed tokio
//! timers. On startup [`NotificationScheduler::init`] replays anything
//! already overdue, then arms a timer per remaining item, so scheduled
//! deliveries survive process restarts.
//!
//! Delivery is at-most-once: an item is removed from the queue before its
//! delivery is attempted, and a fired or cancelled identifier can never fire
//! again. A delivery declined by preferences or missing permission is still
//! consumed and never retried.

use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::db::queue::Queue;
use crate::db::records::RecordStore;
use crate::libs::error::CoreError;
use crate::libs::messages::Message;
use crate::libs::notification::{NotificationType, ScheduledNotification};
use crate::msg_print;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    Unsupported,
}

#[derive(Debug, Clone)]
pub struct DeliveryOptions {
    pub kind: NotificationType,
    pub sound: bool,
    pub payload: serde_json::Value,
}

/// The permission-gated surface notifications are handed to. Delivery is
/// fire-and-forget; the surface owns whatever happens after `deliver`.
pub trait DeliverySurface: Send + Sync {
    fn request_permission(&self) -> Permission;
    fn has_permission(&self) -> bool;
    fn deliver(&self, title: &str, body: &str, options: &DeliveryOptions);
}

/// Terminal delivery surface used by the CLI. Always permitted.
pub struct ConsoleDelivery;

impl DeliverySurface for ConsoleDelivery {
    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn has_permission(&self) -> bool {
        true
    }

    fn deliver(&self, title: &str, body: &str, options: &DeliveryOptions) {
        msg_print!(Message::NotificationDelivered(title.to_string(), body.to_string()), true);
        if options.sound {
            // Terminal bell is the closest thing to a notification sound.
            print!("\x07");
        }
    }
}

type HandleMap = Arc<Mutex<HashMap<String, JoinHandle<()>>>>;

pub struct NotificationScheduler {
    surface: Arc<dyn DeliverySurface>,
    handles: HandleMap,
}

impl NotificationScheduler {
    pub fn new(surface: Arc<dyn DeliverySurface>) -> Self {
        NotificationScheduler {
            surface,
            handles: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Rebuilds timers from the durable queue: overdue items fire right away,
    /// the rest get a deferred callback. Ids that already hold a timer are
    /// left alone, so replaying after `schedule` does not double-arm them.
    pub fn init(&self) -> Result<(), CoreError> {
        let now = Local::now().naive_local();
        for item in Queue::new()?.all()? {
            if item.scheduled_for <= now {
                Self::fire(&self.surface, &self.handles, &item.id)?;
            } else if !self.armed(&item.id) {
                self.arm(&item, now);
            }
        }
        Ok(())
    }

    /// Whether an in-memory timer currently exists for this id.
    pub fn armed(&self, id: &str) -> bool {
        self.handles.lock().contains_key(id)
    }

    /// Enqueues a notification and arms its timer when the fire time is still
    /// ahead. An already-overdue item stays queued for the next `init` replay.
    pub fn schedule(&self, notification: ScheduledNotification) -> Result<String, CoreError> {
        Queue::new()?.push(&notification)?;

        let now = Local::now().naive_local();
        if notification.scheduled_for > now {
            self.arm(&notification, now);
        }
        tracing::debug!("scheduled {} '{}' for {}", notification.kind.label(), notification.id, notification.scheduled_for);
        Ok(notification.id)
    }

    /// Disarms and removes a queued item. Cancelling an unknown or already
    /// consumed id is a no-op.
    pub fn cancel(&self, id: &str) -> Result<(), CoreError> {
        if let Some(handle) = self.handles.lock().remove(id) {
            handle.abort();
        }
        Queue::new()?.remove(id)
    }

    /// Cancels every queued item owned by the user. Broadcast items are not
    /// owned by any single user and stay queued.
    pub fn cancel_all_for_user(&self, user_id: &str) -> Result<(), CoreError> {
        let queue = Queue::new()?;
        for item in queue.all()? {
            if item.user_id == user_id {
                self.cancel(&item.id)?;
            }
        }
        Ok(())
    }

    /// Requests delivery permission when not already granted. "Unsupported"
    /// is treated the same as a denial.
    pub fn ensure_permission(&self) -> bool {
        self.surface.has_permission() || self.surface.request_permission() == Permission::Granted
    }

    /// Immediate test delivery, bypassing the queue.
    pub fn deliver_test(&self) -> bool {
        if !self.ensure_permission() {
            return false;
        }
        self.surface.deliver(
            "🧪 Test Notification",
            "Notifications are working correctly!",
            &DeliveryOptions {
                kind: NotificationType::MotivationalTip,
                sound: false,
                payload: serde_json::Value::Null,
            },
        );
        true
    }

    fn arm(&self, notification: &ScheduledNotification, now: NaiveDateTime) {
        let delay = (notification.scheduled_for - now).to_std().unwrap_or_default();
        let surface = Arc::clone(&self.surface);
        let handles = Arc::clone(&self.handles);
        let id = notification.id.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = Self::fire(&surface, &handles, &id) {
                tracing::warn!("notification '{}' failed to fire: {}", id, e);
            }
        });
        self.handles.lock().insert(notification.id.clone(), handle);
    }

    /// Consumes one queued item and attempts its delivery. Claiming the row
    /// happens before any gating check and is the at-most-once decision
    /// point: only the caller whose delete landed proceeds, and a declined
    /// delivery is spent, not retried.
    fn fire(surface: &Arc<dyn DeliverySurface>, handles: &HandleMap, id: &str) -> Result<(), CoreError> {
        let item = match Queue::new()?.take(id)? {
            Some(item) => item,
            // Already fired or cancelled, possibly by a racing callback.
            None => return Ok(()),
        };
        handles.lock().remove(id);

        // Broadcast items skip per-user preference gating but not the
        // global permission check.
        let mut sound = true;
        if !item.is_broadcast() {
            let prefs = RecordStore::for_user(&item.user_id)?.settings()?.notifications;
            if !prefs.allows(item.kind) {
                tracing::debug!("notification '{}' suppressed by user preferences", id);
                return Ok(());
            }
            sound = prefs.sound;
        }

        if !surface.has_permission() {
            tracing::debug!("notification '{}' dropped: no delivery permission", id);
            return Ok(());
        }

        surface.deliver(
            &item.title,
            &item.body,
            &DeliveryOptions {
                kind: item.kind,
                sound,
                payload: item.payload.clone(),
            },
        );
        Ok(())
    }
}
