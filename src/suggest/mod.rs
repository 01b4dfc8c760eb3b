mod scorer;

use axum::{extract::State, routing::post, Json, Router};
use rand::thread_rng;
use serde::Deserialize;
use serde_json::{json, Value};
use time::OffsetDateTime;
use tracing::instrument;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::{family, meals};

pub fn router() -> Router<AppState> {
    Router::new().route("/suggest", post(suggest_dinner))
}

#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    #[serde(default)]
    pub eating_tonight: Vec<i64>,
}

#[instrument(skip(state, body))]
pub async fn suggest_dinner(
    State(state): State<AppState>,
    Json(body): Json<SuggestRequest>,
) -> ApiResult<Json<Value>> {
    let all_members = family::repo::list(&state.db).await?;
    let all_meals = meals::repo::list(&state.db).await?;

    let eating: Vec<_> = if body.eating_tonight.is_empty() {
        all_members
    } else {
        all_members
            .into_iter()
            .filter(|m| body.eating_tonight.contains(&m.id))
            .collect()
    };

    let today = OffsetDateTime::now_utc().date().weekday();
    let best = scorer::pick_best(&all_meals, &eating, today, &mut thread_rng()).ok_or_else(
        || ApiError::InvalidArgument("No meals saved yet! Add some meals first.".into()),
    )?;

    let eating_names = eating
        .iter()
        .map(|m| m.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let reason = if best.reasons.is_empty() {
        "Looks like a good option!".to_string()
    } else {
        format!("{}.", best.reasons[..best.reasons.len().min(3)].join(". "))
    };
    let tips = if best.meal.prep_time.as_deref() == Some("1+ hours") {
        "This takes a while - start early!"
    } else {
        ""
    };
    let eating_label = if eating_names.is_empty() {
        "Everyone".to_string()
    } else {
        eating_names
    };

    Ok(Json(json!({
        "meal": best.meal.name,
        "meal_data": best.meal,
        "eating_tonight": eating_label,
        "reason": reason,
        "warnings": best.warnings,
        "tips": tips,
    })))
}
