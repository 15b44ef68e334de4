//! Per-user "awaiting image" flags. In process memory only; lost on restart.

use std::collections::HashMap;
use tokio::sync::RwLock;

/// Maps user id → awaiting-image flag. Last write wins per user; entries never expire.
#[derive(Debug, Default)]
pub struct SessionStore {
    awaiting: RwLock<HashMap<i64, bool>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the user as about to send a screenshot.
    pub async fn mark_awaiting(&self, user_id: i64) {
        self.awaiting.write().await.insert(user_id, true);
    }

    /// Returns whether the user was awaiting an image and drops the entry in the same step,
    /// so one `/name` lets through exactly one photo. Users who never sent `/name` leave no entry.
    pub async fn take_awaiting(&self, user_id: i64) -> bool {
        self.awaiting
            .write()
            .await
            .remove(&user_id)
            .unwrap_or(false)
    }

    pub async fn is_awaiting(&self, user_id: i64) -> bool {
        self.awaiting
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or(false)
    }
}
