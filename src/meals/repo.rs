use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::error::ApiResult;
use crate::meals::dto::{CreateMealRequest, UpdateMealRequest};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub category: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub servings: Option<String>,
    pub added_by: Option<String>,
    pub is_family_favourite: bool,
    pub created_at: String,
}

const MEAL_COLUMNS: &str = r#"
    id, name, description, ingredients, instructions, category,
    prep_time, cook_time, servings, added_by, is_family_favourite, created_at
"#;

pub async fn list(db: &SqlitePool) -> ApiResult<Vec<Meal>> {
    let meals = sqlx::query_as::<_, Meal>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals ORDER BY name"
    ))
    .fetch_all(db)
    .await?;
    Ok(meals)
}

pub async fn get(db: &SqlitePool, id: i64) -> ApiResult<Option<Meal>> {
    let meal = sqlx::query_as::<_, Meal>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(meal)
}

pub async fn exists(db: &SqlitePool, id: i64) -> ApiResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM meals WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.is_some())
}

pub async fn create(db: &SqlitePool, req: &CreateMealRequest) -> ApiResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO meals (name, description, ingredients, instructions, category,
                           prep_time, cook_time, servings, added_by, is_family_favourite)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(req.name.trim())
    .bind(req.description.as_deref().unwrap_or(""))
    .bind(req.ingredients.as_deref().unwrap_or(""))
    .bind(req.instructions.as_deref().unwrap_or(""))
    .bind(req.category.as_deref().unwrap_or(""))
    .bind(req.prep_time.as_deref().unwrap_or(""))
    .bind(req.cook_time.as_deref().unwrap_or(""))
    .bind(req.servings.as_deref().unwrap_or(""))
    .bind(req.added_by.as_deref().unwrap_or(""))
    .bind(req.is_family_favourite)
    .execute(db)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update(db: &SqlitePool, id: i64, req: &UpdateMealRequest) -> ApiResult<()> {
    sqlx::query(
        r#"
        UPDATE meals
        SET name = COALESCE(?, name),
            description = COALESCE(?, description),
            ingredients = COALESCE(?, ingredients),
            instructions = COALESCE(?, instructions),
            category = COALESCE(?, category),
            prep_time = COALESCE(?, prep_time),
            cook_time = COALESCE(?, cook_time),
            servings = COALESCE(?, servings),
            is_family_favourite = COALESCE(?, is_family_favourite)
        WHERE id = ?
        "#,
    )
    .bind(req.name.as_deref().map(str::trim))
    .bind(req.description.as_deref())
    .bind(req.ingredients.as_deref())
    .bind(req.instructions.as_deref())
    .bind(req.category.as_deref())
    .bind(req.prep_time.as_deref())
    .bind(req.cook_time.as_deref())
    .bind(req.servings.as_deref())
    .bind(req.is_family_favourite)
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

/// Picks cascade; day assignments pointing at the meal revert to NULL via
/// the ON DELETE SET NULL foreign key.
pub async fn delete(db: &SqlitePool, id: i64) -> ApiResult<()> {
    sqlx::query("DELETE FROM meals WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}
