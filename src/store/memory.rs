//! In-memory store.
//!
//! Selected with `DATABASE_URL=memory://`, and the backend the HTTP tests run
//! against. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ExerciseStore, StoreError};
use crate::models::{Exercise, ExerciseLog, User};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    /// Keyed by owning user id.
    logs: HashMap<Uuid, ExerciseLog>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

#[async_trait]
impl ExerciseStore for MemoryStore {
    async fn create_user(&self, username: &str) -> Result<User, StoreError> {
        self.ensure_open()?;

        let user = User {
            username: username.to_string(),
            id: Uuid::new_v4(),
        };

        let mut inner = self.inner.write().await;
        inner.logs.insert(user.id, ExerciseLog::new(user.id));
        inner.users.push(user.clone());

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.ensure_open()?;
        Ok(self.inner.read().await.users.clone())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        self.ensure_open()?;
        let inner = self.inner.read().await;
        Ok(inner.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn append_exercise(
        &self,
        user_id: Uuid,
        exercise: &Exercise,
    ) -> Result<Option<i64>, StoreError> {
        self.ensure_open()?;
        let mut inner = self.inner.write().await;
        Ok(inner
            .logs
            .get_mut(&user_id)
            .map(|log| log.append(exercise.clone())))
    }

    async fn find_log(&self, user_id: Uuid) -> Result<Option<ExerciseLog>, StoreError> {
        self.ensure_open()?;
        Ok(self.inner.read().await.logs.get(&user_id).cloned())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}
