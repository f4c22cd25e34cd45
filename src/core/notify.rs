use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const DEFAULT_TTL_MS: u64 = 6000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Toast queue shared between the booking form and whatever displays it.
///
/// Entries dismiss themselves once their TTL passes; callers pass `now`
/// explicitly so expiry can be checked without a clock.
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    ttl: Duration,
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_MS)
    }
}

impl NotificationCenter {
    pub fn new(ttl_ms: u64) -> Self {
        Self {
            ttl: Duration::milliseconds(i64::try_from(ttl_ms).unwrap_or(i64::MAX)),
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn publish(&self, kind: NotificationKind, message: impl Into<String>) -> Notification {
        self.publish_at(Utc::now(), kind, message)
    }

    pub fn publish_at(
        &self,
        now: DateTime<Utc>,
        kind: NotificationKind,
        message: impl Into<String>,
    ) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            created_at: now,
            expires_at: now.checked_add_signed(self.ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        match kind {
            NotificationKind::Success => tracing::info!("🔔 {}", notification.message),
            NotificationKind::Error => tracing::warn!("🔔 {}", notification.message),
        }

        if let Ok(mut entries) = self.entries.lock() {
            entries.retain(|n| n.is_visible_at(now));
            entries.push(notification.clone());
        }
        notification
    }

    pub fn visible(&self) -> Vec<Notification> {
        self.visible_at(Utc::now())
    }

    /// Expired entries are dropped as a side effect.
    pub fn visible_at(&self, now: DateTime<Utc>) -> Vec<Notification> {
        self.entries
            .lock()
            .map(|mut entries| {
                entries.retain(|n| n.is_visible_at(now));
                entries.clone()
            })
            .unwrap_or_default()
    }

    /// Entries still held, expired or not.
    pub fn stored(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Drops expired entries and returns how many were removed.
    pub fn prune_at(&self, now: DateTime<Utc>) -> usize {
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };
        let before = entries.len();
        entries.retain(|n| n.is_visible_at(now));
        before - entries.len()
    }

    pub fn dismiss(&self, id: Uuid) -> bool {
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        let before = entries.len();
        entries.retain(|n| n.id != id);
        before != entries.len()
    }
}
