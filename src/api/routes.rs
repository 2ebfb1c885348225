use std::sync::Arc;

use axum::Router;
use tower_http::{
    cors::CorsLayer,
    normalize_path::NormalizePath,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::health::health_routes;
use super::users::{user_routes, UsersAppState};
use crate::config::StaticAssets;
use crate::services::{ExerciseLogService, UserService};
use crate::store::ExerciseStore;

/// The served application: the router behind trailing-slash normalization.
pub type App = NormalizePath<Router>;

pub fn create_routes(store: Arc<dyn ExerciseStore>, assets: &StaticAssets) -> Router {
    let state = UsersAppState {
        user_service: UserService::new(store.clone()),
        exercise_log_service: ExerciseLogService::new(store.clone()),
    };

    Router::new()
        .route_service("/", ServeFile::new(assets.index_page()))
        .merge(health_routes(store))
        .nest("/api/users", user_routes(state))
        .fallback_service(ServeDir::new(&assets.public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// `/api/users/` and `/api/users` reach the same handler. The path is trimmed
/// before routing, so this wraps the router instead of layering inside it.
pub fn create_app(store: Arc<dyn ExerciseStore>, assets: &StaticAssets) -> App {
    NormalizePath::trim_trailing_slash(create_routes(store, assets))
}
