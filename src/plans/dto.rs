use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreatePlanRequest {
    pub week_start: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct SetDinersRequest {
    pub diners: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AssignMealRequest {
    pub meal_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct PickRequest {
    pub member_id: i64,
    pub meal_id: i64,
}
