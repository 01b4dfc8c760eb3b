use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::instrument;

use crate::error::{check_id, ApiError, ApiResult};
use crate::state::AppState;

use super::dto::{CreateMemberRequest, UpdateMemberRequest};
use super::repo::{self, FamilyMember};

#[instrument(skip(state))]
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Json<Vec<FamilyMember>>> {
    let members = repo::list(&state.db).await?;
    Ok(Json(members))
}

#[instrument(skip(state))]
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<FamilyMember>> {
    check_id(id, "member")?;
    let member = repo::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Member not found".into()))?;
    Ok(Json(member))
}

#[instrument(skip(state, body))]
pub async fn create_member(
    State(state): State<AppState>,
    Json(body): Json<CreateMemberRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidArgument(
            "Name is required and cannot be empty".into(),
        ));
    }

    let id = repo::create(
        &state.db,
        name,
        body.avatar.as_deref().unwrap_or("👤"),
        body.likes.as_deref().unwrap_or(""),
        body.dislikes.as_deref().unwrap_or(""),
        body.dietary.as_deref().unwrap_or(""),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "id": id, "message": "Member created" })),
    ))
}

#[instrument(skip(state, body))]
pub async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateMemberRequest>,
) -> ApiResult<Json<Value>> {
    check_id(id, "member")?;
    if !repo::exists(&state.db, id).await? {
        return Err(ApiError::NotFound("Member not found".into()));
    }
    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidArgument("Name cannot be empty".into()));
        }
    }

    repo::update(&state.db, id, &body).await?;
    Ok(Json(json!({ "message": "Member updated" })))
}

#[instrument(skip(state))]
pub async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Value>> {
    check_id(id, "member")?;
    if !repo::exists(&state.db, id).await? {
        return Err(ApiError::NotFound("Member not found".into()));
    }

    repo::delete(&state.db, id).await?;
    Ok(Json(json!({ "message": "Member deleted" })))
}
