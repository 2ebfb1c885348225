use std::sync::Arc;

use crate::errors::ApiError;
use crate::models::{CreateUserForm, User};
use crate::store::ExerciseStore;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn ExerciseStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn ExerciseStore>) -> Self {
        Self { store }
    }

    /// Register a user. Blank and duplicate usernames are accepted.
    pub async fn create_user(&self, form: CreateUserForm) -> Result<User, ApiError> {
        let user = self.store.create_user(&form.username).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "created user");
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        Ok(self.store.list_users().await?)
    }
}
