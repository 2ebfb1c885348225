use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{ExerciseStore, StoreError};
use crate::models::{Exercise, ExerciseLog, Minutes, User};

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct LogRow {
    id: Uuid,
    user_id: Uuid,
    count: i64,
}

#[derive(Debug, FromRow)]
struct ExerciseRow {
    description: String,
    duration: f64,
    date: NaiveDate,
}

impl From<ExerciseRow> for Exercise {
    fn from(row: ExerciseRow) -> Self {
        Self {
            description: row.description,
            duration: Minutes(row.duration),
            date: row.date,
        }
    }
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl ExerciseStore for PgStore {
    async fn create_user(&self, username: &str) -> Result<User, StoreError> {
        let mut tx = self.db.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, username)
             VALUES ($1, $2)
             RETURNING id, username",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO logs (id, user_id, count) VALUES ($1, $2, 0)")
            .bind(Uuid::new_v4())
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>("SELECT id, username FROM users ORDER BY seq ASC")
            .fetch_all(&self.db)
            .await?;

        Ok(users)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn append_exercise(
        &self,
        user_id: Uuid,
        exercise: &Exercise,
    ) -> Result<Option<i64>, StoreError> {
        let mut tx = self.db.begin().await?;

        // The row lock taken here serializes concurrent appends to one log
        let log = sqlx::query_as::<_, LogRow>(
            "UPDATE logs SET count = count + 1
             WHERE user_id = $1
             RETURNING id, user_id, count",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(log) = log else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            "INSERT INTO exercises (log_id, position, description, duration, date)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(log.id)
        .bind(log.count - 1)
        .bind(&exercise.description)
        .bind(exercise.duration.0)
        .bind(exercise.date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(log.count))
    }

    async fn find_log(&self, user_id: Uuid) -> Result<Option<ExerciseLog>, StoreError> {
        let row = sqlx::query_as::<_, LogRow>(
            "SELECT id, user_id, count FROM logs WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let entries = sqlx::query_as::<_, ExerciseRow>(
            "SELECT description, duration, date FROM exercises
             WHERE log_id = $1
             ORDER BY position ASC",
        )
        .bind(row.id)
        .fetch_all(&self.db)
        .await?;

        Ok(Some(ExerciseLog {
            id: row.id,
            user_id: row.user_id,
            count: row.count,
            log: entries.into_iter().map(Exercise::from).collect(),
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
