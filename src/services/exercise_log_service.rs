use std::sync::Arc;

use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::{today, ExerciseForm, ExerciseResponse, LogFilter, LogQuery, LogResponse};
use crate::store::ExerciseStore;

#[derive(Clone)]
pub struct ExerciseLogService {
    store: Arc<dyn ExerciseStore>,
}

impl ExerciseLogService {
    pub fn new(store: Arc<dyn ExerciseStore>) -> Self {
        Self { store }
    }

    /// Look the user up, validate the form, then append it to the user's log.
    ///
    /// An unknown user is a soft [`ApiError::UserNotFound`] whatever the form
    /// holds. A user whose log has gone missing is an internal fault.
    pub async fn add_exercise(
        &self,
        user_id: &str,
        form: ExerciseForm,
    ) -> Result<ExerciseResponse, ApiError> {
        let user_id = Uuid::parse_str(user_id).map_err(|_| ApiError::UserNotFound)?;
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let exercise = form.into_exercise(today())?;

        let count = self
            .store
            .append_exercise(user.id, &exercise)
            .await?
            .ok_or(ApiError::LogMissing(user.id))?;

        tracing::debug!(user_id = %user.id, count, "appended exercise");
        Ok(ExerciseResponse::new(user, exercise))
    }

    /// Filtered view of a user's log. `count` stays the stored running total.
    pub async fn get_log(&self, user_id: &str, query: LogQuery) -> Result<LogResponse, ApiError> {
        let user_id = Uuid::parse_str(user_id).map_err(|_| ApiError::LogsNotFound)?;
        let log = self
            .store
            .find_log(user_id)
            .await?
            .ok_or(ApiError::LogsNotFound)?;

        let filter = LogFilter::try_from(query)?;
        tracing::debug!(?filter, %user_id, "fetching log");

        Ok(log.view(&filter))
    }
}
