// Business logic services

pub mod exercise_log_service;
pub mod user_service;

pub use exercise_log_service::ExerciseLogService;
pub use user_service::UserService;
