mod dto;
mod handlers;
pub mod repo;
pub mod week;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/plans", post(handlers::create_plan))
        .route("/plans/current", get(handlers::current_plan))
        .route(
            "/plans/:id",
            get(handlers::get_plan).delete(handlers::delete_plan),
        )
        .route("/plans/:id/status", put(handlers::set_status))
        .route(
            "/plans/:id/days/:day_of_week/diners",
            put(handlers::set_diners),
        )
        .route(
            "/plans/:id/days/:day_of_week/meal",
            put(handlers::assign_meal),
        )
        .route(
            "/plans/:id/picks",
            get(handlers::list_picks)
                .post(handlers::record_pick)
                .delete(handlers::remove_pick),
        )
        .route(
            "/plans/:id/picks/:member_id",
            get(handlers::member_picks),
        )
        .route(
            "/plans/:id/shopping-list",
            get(handlers::shopping_list),
        )
}
