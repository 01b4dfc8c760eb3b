use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::error::ApiResult;
use crate::family::dto::UpdateMemberRequest;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FamilyMember {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
    pub likes: Option<String>,
    pub dislikes: Option<String>,
    pub dietary: Option<String>,
    pub created_at: String,
}

pub async fn list(db: &SqlitePool) -> ApiResult<Vec<FamilyMember>> {
    let members = sqlx::query_as::<_, FamilyMember>(
        r#"
        SELECT id, name, avatar, likes, dislikes, dietary, created_at
        FROM family_members
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(members)
}

pub async fn get(db: &SqlitePool, id: i64) -> ApiResult<Option<FamilyMember>> {
    let member = sqlx::query_as::<_, FamilyMember>(
        r#"
        SELECT id, name, avatar, likes, dislikes, dietary, created_at
        FROM family_members
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(member)
}

pub async fn exists(db: &SqlitePool, id: i64) -> ApiResult<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM family_members WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(row.is_some())
}

pub async fn create(
    db: &SqlitePool,
    name: &str,
    avatar: &str,
    likes: &str,
    dislikes: &str,
    dietary: &str,
) -> ApiResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO family_members (name, avatar, likes, dislikes, dietary)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(name)
    .bind(avatar)
    .bind(likes)
    .bind(dislikes)
    .bind(dietary)
    .execute(db)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update(db: &SqlitePool, id: i64, req: &UpdateMemberRequest) -> ApiResult<()> {
    sqlx::query(
        r#"
        UPDATE family_members
        SET name = COALESCE(?, name),
            avatar = COALESCE(?, avatar),
            likes = COALESCE(?, likes),
            dislikes = COALESCE(?, dislikes),
            dietary = COALESCE(?, dietary)
        WHERE id = ?
        "#,
    )
    .bind(req.name.as_deref().map(str::trim))
    .bind(req.avatar.as_deref())
    .bind(req.likes.as_deref())
    .bind(req.dislikes.as_deref())
    .bind(req.dietary.as_deref())
    .bind(id)
    .execute(db)
    .await?;
    Ok(())
}

/// Deletes a member. Picks cascade via foreign keys; the member is also
/// scrubbed from every day's diners list in the same transaction, since
/// diners are stored inline rather than as a join table.
pub async fn delete(db: &SqlitePool, id: i64) -> ApiResult<()> {
    let mut tx = db.begin().await?;

    let days: Vec<(i64, String)> = sqlx::query_as("SELECT id, diners FROM weekly_days")
        .fetch_all(&mut *tx)
        .await?;
    for (day_id, diners) in days {
        let ids: Vec<i64> = serde_json::from_str(&diners).unwrap_or_default();
        if ids.contains(&id) {
            let remaining: Vec<i64> = ids.into_iter().filter(|d| *d != id).collect();
            sqlx::query("UPDATE weekly_days SET diners = ? WHERE id = ?")
                .bind(serde_json::to_string(&remaining).unwrap_or_else(|_| "[]".into()))
                .bind(day_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    sqlx::query("DELETE FROM family_members WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}
