use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use dinnerplan::family;
use dinnerplan::meals::{self, dto::CreateMealRequest};

/// Fresh in-memory database with the full schema applied. A single
/// connection keeps every query on the same in-memory instance.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("parse sqlite url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("open in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

pub async fn seed_member(pool: &SqlitePool, name: &str) -> i64 {
    family::repo::create(pool, name, "👤", "", "", "")
        .await
        .expect("seed member")
}

pub async fn seed_meal(pool: &SqlitePool, name: &str, ingredients: &str) -> i64 {
    let req = CreateMealRequest {
        name: name.into(),
        description: None,
        ingredients: Some(ingredients.into()),
        instructions: None,
        category: None,
        prep_time: None,
        cook_time: None,
        servings: None,
        added_by: None,
        is_family_favourite: false,
    };
    meals::repo::create(pool, &req).await.expect("seed meal")
}
