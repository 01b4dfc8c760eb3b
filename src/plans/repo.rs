use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::error::{ApiError, ApiResult};

/// Plan lifecycle: planning (setup) -> voting (picks) -> locked (done).
/// Transitions are operator-triggered and unconstrained in direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum PlanStatus {
    Planning,
    Voting,
    Locked,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlanStatus::Planning => "planning",
            PlanStatus::Voting => "voting",
            PlanStatus::Locked => "locked",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanStatus {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planning" => Ok(PlanStatus::Planning),
            "voting" => Ok(PlanStatus::Voting),
            "locked" => Ok(PlanStatus::Locked),
            _ => Err(ApiError::InvalidArgument(
                "Status must be: planning, voting, or locked".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeeklyPlan {
    pub id: i64,
    pub week_start: String,
    pub status: PlanStatus,
    pub created_at: String,
}

/// One weekday slot of a plan, joined with its assigned meal's details.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyDay {
    pub id: i64,
    pub plan_id: i64,
    pub day_of_week: i64,
    pub meal_id: Option<i64>,
    pub diners: Vec<i64>,
    pub meal_name: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub category: Option<String>,
    pub prep_time: Option<String>,
}

#[derive(Debug, FromRow)]
struct DayRow {
    id: i64,
    plan_id: i64,
    day_of_week: i64,
    meal_id: Option<i64>,
    diners: String,
    meal_name: Option<String>,
    ingredients: Option<String>,
    instructions: Option<String>,
    category: Option<String>,
    prep_time: Option<String>,
}

impl From<DayRow> for WeeklyDay {
    fn from(row: DayRow) -> Self {
        let diners = serde_json::from_str(&row.diners).unwrap_or_default();
        WeeklyDay {
            id: row.id,
            plan_id: row.plan_id,
            day_of_week: row.day_of_week,
            meal_id: row.meal_id,
            diners,
            meal_name: row.meal_name,
            ingredients: row.ingredients,
            instructions: row.instructions,
            category: row.category,
            prep_time: row.prep_time,
        }
    }
}

pub async fn get_plan(db: &SqlitePool, id: i64) -> ApiResult<Option<WeeklyPlan>> {
    let plan = sqlx::query_as::<_, WeeklyPlan>(
        "SELECT id, week_start, status, created_at FROM weekly_plans WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(plan)
}

pub async fn plan_by_week(db: &SqlitePool, week_start: &str) -> ApiResult<Option<WeeklyPlan>> {
    let plan = sqlx::query_as::<_, WeeklyPlan>(
        "SELECT id, week_start, status, created_at FROM weekly_plans WHERE week_start = ?",
    )
    .bind(week_start)
    .fetch_optional(db)
    .await?;
    Ok(plan)
}

pub async fn plan_exists(db: &SqlitePool, id: i64) -> ApiResult<bool> {
    Ok(get_plan(db, id).await?.is_some())
}

/// Creates the plan row and its seven day rows in one transaction.
/// Fails with the existing plan's id if the week is already taken.
pub async fn create_plan(db: &SqlitePool, week_start: &str) -> ApiResult<i64> {
    if let Some(existing) = plan_by_week(db, week_start).await? {
        return Err(ApiError::WeekTaken {
            plan_id: existing.id,
        });
    }

    let mut tx = db.begin().await?;

    let result = sqlx::query("INSERT INTO weekly_plans (week_start) VALUES (?)")
        .bind(week_start)
        .execute(&mut *tx)
        .await?;
    let plan_id = result.last_insert_rowid();

    for day in 0..7i64 {
        sqlx::query("INSERT INTO weekly_days (plan_id, day_of_week, diners) VALUES (?, ?, '[]')")
            .bind(plan_id)
            .bind(day)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(plan_id)
}

pub async fn set_status(db: &SqlitePool, id: i64, status: PlanStatus) -> ApiResult<()> {
    sqlx::query("UPDATE weekly_plans SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Day rows and picks cascade with the plan.
pub async fn delete_plan(db: &SqlitePool, id: i64) -> ApiResult<()> {
    sqlx::query("DELETE FROM weekly_plans WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

pub async fn plan_days(db: &SqlitePool, plan_id: i64) -> ApiResult<Vec<WeeklyDay>> {
    let rows = sqlx::query_as::<_, DayRow>(
        r#"
        SELECT wd.id, wd.plan_id, wd.day_of_week, wd.meal_id, wd.diners,
               m.name AS meal_name, m.ingredients, m.instructions, m.category, m.prep_time
        FROM weekly_days wd
        LEFT JOIN meals m ON wd.meal_id = m.id
        WHERE wd.plan_id = ?
        ORDER BY wd.day_of_week
        "#,
    )
    .bind(plan_id)
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(WeeklyDay::from).collect())
}

/// Replaces the full diner set for one day. Callers validate the member ids.
pub async fn set_diners(
    db: &SqlitePool,
    plan_id: i64,
    day_of_week: i64,
    diners: &[i64],
) -> ApiResult<()> {
    let encoded = serde_json::to_string(diners).unwrap_or_else(|_| "[]".into());
    sqlx::query("UPDATE weekly_days SET diners = ? WHERE plan_id = ? AND day_of_week = ?")
        .bind(encoded)
        .bind(plan_id)
        .bind(day_of_week)
        .execute(db)
        .await?;
    Ok(())
}

/// Sets or clears the day's assigned meal. Not gated by plan status.
pub async fn assign_meal(
    db: &SqlitePool,
    plan_id: i64,
    day_of_week: i64,
    meal_id: Option<i64>,
) -> ApiResult<()> {
    sqlx::query("UPDATE weekly_days SET meal_id = ? WHERE plan_id = ? AND day_of_week = ?")
        .bind(meal_id)
        .bind(plan_id)
        .bind(day_of_week)
        .execute(db)
        .await?;
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct Picker {
    pub id: i64,
    pub name: String,
    pub avatar: Option<String>,
}

/// One meal's vote tally within a plan. Every meal in the system appears,
/// voted or not.
#[derive(Debug, Clone, Serialize)]
pub struct MealPicks {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub prep_time: Option<String>,
    pub pick_count: i64,
    pub pickers: Vec<Picker>,
}

pub async fn picks_overview(db: &SqlitePool, plan_id: i64) -> ApiResult<Vec<MealPicks>> {
    let counts: Vec<(i64, String, Option<String>, Option<String>, i64)> = sqlx::query_as(
        r#"
        SELECT m.id, m.name, m.category, m.prep_time, COUNT(wp.id) AS pick_count
        FROM meals m
        LEFT JOIN weekly_picks wp ON m.id = wp.meal_id AND wp.plan_id = ?
        GROUP BY m.id
        ORDER BY pick_count DESC, m.name
        "#,
    )
    .bind(plan_id)
    .fetch_all(db)
    .await?;

    let picker_rows: Vec<(i64, i64, String, Option<String>)> = sqlx::query_as(
        r#"
        SELECT wp.meal_id, fm.id, fm.name, fm.avatar
        FROM weekly_picks wp
        JOIN family_members fm ON wp.member_id = fm.id
        WHERE wp.plan_id = ?
        ORDER BY fm.id
        "#,
    )
    .bind(plan_id)
    .fetch_all(db)
    .await?;

    let mut pickers_by_meal: HashMap<i64, Vec<Picker>> = HashMap::new();
    for (meal_id, id, name, avatar) in picker_rows {
        pickers_by_meal
            .entry(meal_id)
            .or_default()
            .push(Picker { id, name, avatar });
    }

    Ok(counts
        .into_iter()
        .map(|(id, name, category, prep_time, pick_count)| MealPicks {
            id,
            name,
            category,
            prep_time,
            pick_count,
            pickers: pickers_by_meal.remove(&id).unwrap_or_default(),
        })
        .collect())
}

pub async fn member_picks(db: &SqlitePool, plan_id: i64, member_id: i64) -> ApiResult<Vec<i64>> {
    let rows: Vec<(i64,)> =
        sqlx::query_as("SELECT meal_id FROM weekly_picks WHERE plan_id = ? AND member_id = ?")
            .bind(plan_id)
            .bind(member_id)
            .fetch_all(db)
            .await?;
    Ok(rows.into_iter().map(|(meal_id,)| meal_id).collect())
}

/// Records a member's vote. Only allowed while the plan is in `voting`;
/// idempotent, so recording an existing (plan, member, meal) triple is a
/// no-op.
pub async fn record_pick(
    db: &SqlitePool,
    plan_id: i64,
    member_id: i64,
    meal_id: i64,
) -> ApiResult<()> {
    let plan = get_plan(db, plan_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Plan not found".into()))?;
    if !crate::family::repo::exists(db, member_id).await? {
        return Err(ApiError::NotFound("Member not found".into()));
    }
    if !crate::meals::repo::exists(db, meal_id).await? {
        return Err(ApiError::NotFound("Meal not found".into()));
    }
    if plan.status != PlanStatus::Voting {
        return Err(ApiError::InvalidState("Plan is not in voting phase".into()));
    }

    sqlx::query(
        "INSERT OR IGNORE INTO weekly_picks (plan_id, member_id, meal_id) VALUES (?, ?, ?)",
    )
    .bind(plan_id)
    .bind(member_id)
    .bind(meal_id)
    .execute(db)
    .await?;
    Ok(())
}

/// Idempotent: removing an absent pick is not an error.
pub async fn remove_pick(
    db: &SqlitePool,
    plan_id: i64,
    member_id: i64,
    meal_id: i64,
) -> ApiResult<()> {
    sqlx::query("DELETE FROM weekly_picks WHERE plan_id = ? AND member_id = ? AND meal_id = ?")
        .bind(plan_id)
        .bind(member_id)
        .bind(meal_id)
        .execute(db)
        .await?;
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoppingListMeal {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoppingListItem {
    pub ingredient: String,
    pub from_meal: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoppingList {
    pub meals: Vec<ShoppingListMeal>,
    pub ingredients: Vec<ShoppingListItem>,
}

/// Walks the plan's days in weekday order, takes each assigned meal once,
/// and flattens its ingredient lines (trimmed, blanks dropped).
pub async fn shopping_list(db: &SqlitePool, plan_id: i64) -> ApiResult<ShoppingList> {
    let rows: Vec<(i64, String, Option<String>)> = sqlx::query_as(
        r#"
        SELECT m.id, m.name, m.ingredients
        FROM weekly_days wd
        JOIN meals m ON wd.meal_id = m.id
        WHERE wd.plan_id = ?
        ORDER BY wd.day_of_week
        "#,
    )
    .bind(plan_id)
    .fetch_all(db)
    .await?;

    let mut seen = HashSet::new();
    let mut meals = Vec::new();
    let mut ingredients = Vec::new();
    for (id, name, ingredient_text) in rows {
        if !seen.insert(id) {
            continue;
        }
        if let Some(text) = &ingredient_text {
            for line in text.lines() {
                let line = line.trim();
                if !line.is_empty() {
                    ingredients.push(ShoppingListItem {
                        ingredient: line.to_string(),
                        from_meal: name.clone(),
                    });
                }
            }
        }
        meals.push(ShoppingListMeal { id, name });
    }

    Ok(ShoppingList { meals, ingredients })
}
