use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use exercise_tracker::models::{Exercise, LogFilter, Minutes};
use exercise_tracker::store::{ExerciseStore, PgStore};

/// Connect to `TEST_DATABASE_URL`, or return `None` so the test can skip.
async fn test_store() -> Option<PgStore> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    let db = match PgPool::connect(&database_url).await {
        Ok(db) => db,
        Err(_) => {
            println!("Test database not available, skipping integration test");
            return None;
        }
    };

    let store = PgStore::new(db);
    store
        .run_migrations()
        .await
        .expect("Failed to run migrations");
    Some(store)
}

fn exercise(description: &str, date: &str) -> Exercise {
    Exercise {
        description: description.to_string(),
        duration: Minutes(25.0),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

#[tokio::test]
async fn test_postgres_user_and_log_round_trip() {
    let Some(store) = test_store().await else {
        return;
    };

    let user = store.create_user("pg_runner").await.unwrap();
    assert_eq!(store.find_user(user.id).await.unwrap(), Some(user.clone()));
    assert!(store.list_users().await.unwrap().contains(&user));

    let empty = store.find_log(user.id).await.unwrap().unwrap();
    assert_eq!(empty.count, 0);
    assert!(empty.log.is_empty());

    for (description, date) in [("jan", "2023-01-01"), ("feb", "2023-02-01"), ("mar", "2023-03-01")] {
        store
            .append_exercise(user.id, &exercise(description, date))
            .await
            .unwrap()
            .unwrap();
    }

    let log = store.find_log(user.id).await.unwrap().unwrap();
    assert_eq!(log.count, 3);
    assert_eq!(
        log.log,
        vec![
            exercise("jan", "2023-01-01"),
            exercise("feb", "2023-02-01"),
            exercise("mar", "2023-03-01"),
        ]
    );

    let view = log.view(&LogFilter {
        limit: Some(1),
        ..Default::default()
    });
    assert_eq!(view.count, 3);
    assert_eq!(view.log.len(), 1);
}

#[tokio::test]
async fn test_postgres_unknown_user() {
    let Some(store) = test_store().await else {
        return;
    };

    let missing = Uuid::new_v4();
    assert_eq!(store.find_user(missing).await.unwrap(), None);
    assert!(store.find_log(missing).await.unwrap().is_none());
    assert_eq!(
        store
            .append_exercise(missing, &exercise("ghost", "2023-01-01"))
            .await
            .unwrap(),
        None
    );

    store.ping().await.unwrap();
    store.close().await;
}
