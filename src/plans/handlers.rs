use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::error::{check_id, ApiError, ApiResult};
use crate::state::AppState;
use crate::{family, meals};

use super::dto::{
    AssignMealRequest, CreatePlanRequest, PickRequest, SetDinersRequest, SetStatusRequest,
};
use super::repo::{self, MealPicks, PlanStatus, ShoppingList, WeeklyPlan};
use super::week;

async fn require_plan(state: &AppState, id: i64) -> ApiResult<WeeklyPlan> {
    repo::get_plan(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Plan not found".into()))
}

#[instrument(skip(state))]
pub async fn current_plan(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let week_start = week::current_week_start();
    let Some(plan) = repo::plan_by_week(&state.db, &week_start).await? else {
        return Ok(Json(json!({ "plan": null })));
    };
    let days = repo::plan_days(&state.db, plan.id).await?;
    Ok(Json(json!({ "plan": plan, "days": days })))
}

#[instrument(skip(state))]
pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    check_id(id, "plan")?;
    let plan = require_plan(&state, id).await?;
    let days = repo::plan_days(&state.db, plan.id).await?;
    Ok(Json(json!({ "plan": plan, "days": days })))
}

#[instrument(skip(state, body))]
pub async fn create_plan(
    State(state): State<AppState>,
    Json(body): Json<CreatePlanRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let week_start = match &body.week_start {
        Some(raw) => week::normalize_week_start(raw)?,
        None => week::current_week_start(),
    };

    let id = repo::create_plan(&state.db, &week_start).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "week_start": week_start,
            "message": "Plan created with 7 days",
        })),
    ))
}

#[instrument(skip(state, body))]
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<SetStatusRequest>,
) -> ApiResult<Json<Value>> {
    check_id(id, "plan")?;
    let status: PlanStatus = body.status.parse()?;
    if !repo::plan_exists(&state.db, id).await? {
        return Err(ApiError::NotFound("Plan not found".into()));
    }

    repo::set_status(&state.db, id, status).await?;
    Ok(Json(
        json!({ "message": format!("Plan status updated to {status}") }),
    ))
}

#[instrument(skip(state))]
pub async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    check_id(id, "plan")?;
    if !repo::plan_exists(&state.db, id).await? {
        return Err(ApiError::NotFound("Plan not found".into()));
    }

    repo::delete_plan(&state.db, id).await?;
    Ok(Json(json!({ "message": "Plan deleted" })))
}

#[instrument(skip(state, body))]
pub async fn set_diners(
    State(state): State<AppState>,
    Path((plan_id, day_of_week)): Path<(i64, i64)>,
    Json(body): Json<SetDinersRequest>,
) -> ApiResult<Json<Value>> {
    check_id(plan_id, "plan")?;
    week::check_day_of_week(day_of_week)?;
    for diner in &body.diners {
        check_id(*diner, "member")?;
    }
    if !repo::plan_exists(&state.db, plan_id).await? {
        return Err(ApiError::NotFound("Plan not found".into()));
    }
    for diner in &body.diners {
        if !family::repo::exists(&state.db, *diner).await? {
            return Err(ApiError::InvalidArgument(format!(
                "Member ID {diner} not found"
            )));
        }
    }

    repo::set_diners(&state.db, plan_id, day_of_week, &body.diners).await?;
    Ok(Json(json!({ "message": "Diners updated" })))
}

#[instrument(skip(state, body))]
pub async fn assign_meal(
    State(state): State<AppState>,
    Path((plan_id, day_of_week)): Path<(i64, i64)>,
    Json(body): Json<AssignMealRequest>,
) -> ApiResult<Json<Value>> {
    check_id(plan_id, "plan")?;
    week::check_day_of_week(day_of_week)?;
    if let Some(meal_id) = body.meal_id {
        check_id(meal_id, "meal")?;
        if !meals::repo::exists(&state.db, meal_id).await? {
            return Err(ApiError::NotFound("Meal not found".into()));
        }
    }
    if !repo::plan_exists(&state.db, plan_id).await? {
        return Err(ApiError::NotFound("Plan not found".into()));
    }

    repo::assign_meal(&state.db, plan_id, day_of_week, body.meal_id).await?;
    let message = if body.meal_id.is_some() {
        "Meal assigned"
    } else {
        "Meal unassigned"
    };
    Ok(Json(json!({ "message": message })))
}

#[instrument(skip(state))]
pub async fn list_picks(
    State(state): State<AppState>,
    Path(plan_id): Path<i64>,
) -> ApiResult<Json<Vec<MealPicks>>> {
    check_id(plan_id, "plan")?;
    if !repo::plan_exists(&state.db, plan_id).await? {
        return Err(ApiError::NotFound("Plan not found".into()));
    }

    let picks = repo::picks_overview(&state.db, plan_id).await?;
    Ok(Json(picks))
}

#[instrument(skip(state))]
pub async fn member_picks(
    State(state): State<AppState>,
    Path((plan_id, member_id)): Path<(i64, i64)>,
) -> ApiResult<Json<Value>> {
    check_id(plan_id, "plan")?;
    check_id(member_id, "member")?;
    if !repo::plan_exists(&state.db, plan_id).await? {
        return Err(ApiError::NotFound("Plan not found".into()));
    }
    if !family::repo::exists(&state.db, member_id).await? {
        return Err(ApiError::NotFound("Member not found".into()));
    }

    let picks = repo::member_picks(&state.db, plan_id, member_id).await?;
    Ok(Json(json!({ "picks": picks })))
}

#[instrument(skip(state, body))]
pub async fn record_pick(
    State(state): State<AppState>,
    Path(plan_id): Path<i64>,
    Json(body): Json<PickRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    check_id(plan_id, "plan")?;
    check_id(body.member_id, "member")?;
    check_id(body.meal_id, "meal")?;

    repo::record_pick(&state.db, plan_id, body.member_id, body.meal_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Pick recorded" })),
    ))
}

#[instrument(skip(state, body))]
pub async fn remove_pick(
    State(state): State<AppState>,
    Path(plan_id): Path<i64>,
    Json(body): Json<PickRequest>,
) -> ApiResult<Json<Value>> {
    check_id(plan_id, "plan")?;
    check_id(body.member_id, "member")?;
    check_id(body.meal_id, "meal")?;

    repo::remove_pick(&state.db, plan_id, body.member_id, body.meal_id).await?;
    Ok(Json(json!({ "message": "Pick removed" })))
}

#[instrument(skip(state))]
pub async fn shopping_list(
    State(state): State<AppState>,
    Path(plan_id): Path<i64>,
) -> ApiResult<Json<ShoppingList>> {
    check_id(plan_id, "plan")?;
    if !repo::plan_exists(&state.db, plan_id).await? {
        return Err(ApiError::NotFound("Plan not found".into()));
    }

    let list = repo::shopping_list(&state.db, plan_id).await?;
    Ok(Json(list))
}
