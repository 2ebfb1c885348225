use axum::{
    extract::{FromRef, Path, Query, State},
    response::Json,
    routing::{get, post},
    Form, Router,
};
use axum_extra::extract::WithRejection;

use crate::errors::ApiError;
use crate::models::{
    CreateUserForm, ExerciseForm, ExerciseResponse, LogQuery, LogResponse, User,
};
use crate::services::{ExerciseLogService, UserService};

#[derive(Clone)]
pub struct UsersAppState {
    pub user_service: UserService,
    pub exercise_log_service: ExerciseLogService,
}

impl FromRef<UsersAppState> for UserService {
    fn from_ref(state: &UsersAppState) -> Self {
        state.user_service.clone()
    }
}

impl FromRef<UsersAppState> for ExerciseLogService {
    fn from_ref(state: &UsersAppState) -> Self {
        state.exercise_log_service.clone()
    }
}

/// Routes mounted under `/api/users`
pub fn user_routes(state: UsersAppState) -> Router {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:user_id/exercises", post(add_exercise))
        .route("/:user_id/logs", get(get_logs))
        .with_state(state)
}

/// Register a new user
#[tracing::instrument(skip(user_service, form))]
async fn create_user(
    State(user_service): State<UserService>,
    WithRejection(Form(form), _): WithRejection<Form<CreateUserForm>, ApiError>,
) -> Result<Json<User>, ApiError> {
    let user = user_service.create_user(form).await?;
    Ok(Json(user))
}

/// List every registered user
#[tracing::instrument(skip(user_service))]
async fn list_users(
    State(user_service): State<UserService>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = user_service.list_users().await?;
    Ok(Json(users))
}

/// Log an exercise against a user
#[tracing::instrument(skip(service, form))]
async fn add_exercise(
    State(service): State<ExerciseLogService>,
    Path(user_id): Path<String>,
    WithRejection(Form(form), _): WithRejection<Form<ExerciseForm>, ApiError>,
) -> Result<Json<ExerciseResponse>, ApiError> {
    let response = service.add_exercise(&user_id, form).await?;
    Ok(Json(response))
}

/// Fetch a user's exercise log, optionally filtered by `from`, `to` and `limit`
#[tracing::instrument(skip(service))]
async fn get_logs(
    State(service): State<ExerciseLogService>,
    Path(user_id): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<LogQuery>, ApiError>,
) -> Result<Json<LogResponse>, ApiError> {
    let response = service.get_log(&user_id, query).await?;
    Ok(Json(response))
}
