//! Persistence for users and their exercise logs.
//!
//! Handlers never talk to a database directly. They go through an
//! [`ExerciseStore`] handle that is opened once at startup and shared
//! behind an `Arc`.

mod error;
mod memory;
mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Exercise, ExerciseLog, User};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Storage backend for users and their logs.
///
/// Implementations must be thread-safe (`Send + Sync`) as every request
/// task holds a clone of the same handle.
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Insert a user together with its empty log, atomically.
    async fn create_user(&self, username: &str) -> Result<User, StoreError>;

    /// Every user in insertion order.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StoreError>;

    /// Append to the user's log and bump its counter.
    ///
    /// # Returns
    /// * `Ok(Some(count))` - the counter after the append
    /// * `Ok(None)` - no log exists for `user_id`
    async fn append_exercise(
        &self,
        user_id: Uuid,
        exercise: &Exercise,
    ) -> Result<Option<i64>, StoreError>;

    async fn find_log(&self, user_id: Uuid) -> Result<Option<ExerciseLog>, StoreError>;

    /// Cheap liveness probe used by the health check.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Release the backend's resources. Called once on shutdown.
    async fn close(&self);
}
