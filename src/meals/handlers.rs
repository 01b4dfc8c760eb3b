use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::error::{check_id, ApiError, ApiResult};
use crate::state::AppState;

use super::dto::{CreateMealRequest, UpdateMealRequest};
use super::repo::{self, Meal};

#[instrument(skip(state))]
pub async fn list_meals(State(state): State<AppState>) -> ApiResult<Json<Vec<Meal>>> {
    let meals = repo::list(&state.db).await?;
    Ok(Json(meals))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Meal>> {
    check_id(id, "meal")?;
    let meal = repo::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meal not found".into()))?;
    Ok(Json(meal))
}

#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    Json(body): Json<CreateMealRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    if body.name.trim().is_empty() {
        return Err(ApiError::InvalidArgument("Meal name is required".into()));
    }

    let id = repo::create(&state.db, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "message": "Meal created" })),
    ))
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMealRequest>,
) -> ApiResult<Json<Value>> {
    check_id(id, "meal")?;
    if !repo::exists(&state.db, id).await? {
        return Err(ApiError::NotFound("Meal not found".into()));
    }
    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidArgument("Meal name cannot be empty".into()));
        }
    }

    repo::update(&state.db, id, &body).await?;
    Ok(Json(json!({ "message": "Meal updated" })))
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    check_id(id, "meal")?;
    if !repo::exists(&state.db, id).await? {
        return Err(ApiError::NotFound("Meal not found".into()));
    }

    repo::delete(&state.db, id).await?;
    Ok(Json(json!({ "message": "Meal deleted" })))
}
