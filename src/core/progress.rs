//! Lifetime progress store
//!
//! In-memory, keyed by user id. The session never depends on it; callers log
//! failures and carry on.

use std::collections::HashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use crate::types::ProgressError;

/// User seeded into every fresh store
pub const DEMO_USER_ID: &str = "senior-001";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub user_id: String,
    pub total_flowers: u64,
    pub unlocked_modules: Vec<String>,
    pub last_active: DateTime<Utc>,
}

impl UserProgress {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            total_flowers: 0,
            unlocked_modules: Vec::new(),
            last_active: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProgressStore {
    users: HashMap<String, UserProgress>,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ProgressStore {
    /// Store with no users
    pub fn empty() -> Self {
        Self { users: HashMap::new() }
    }

    /// Store holding the demo user
    pub fn seeded() -> Self {
        let mut store = Self::empty();
        store.insert(UserProgress {
            total_flowers: 42,
            unlocked_modules: vec!["module-1".to_string()],
            ..UserProgress::new(DEMO_USER_ID)
        });
        store
    }

    pub fn insert(&mut self, user: UserProgress) {
        self.users.insert(user.user_id.clone(), user);
    }

    /// Add `count` blooms to the user's lifetime total
    pub fn submit_progress(&mut self, user_id: &str, count: u64) -> Result<UserProgress, ProgressError> {
        let user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| ProgressError::NotFound(user_id.to_string()))?;
        user.total_flowers = user.total_flowers.saturating_add(count);
        user.last_active = Utc::now();
        info!(user_id, count, total = user.total_flowers, "progress saved");
        Ok(user.clone())
    }

    pub fn get_progress(&self, user_id: &str) -> Result<UserProgress, ProgressError> {
        self.users
            .get(user_id)
            .cloned()
            .ok_or_else(|| ProgressError::NotFound(user_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
