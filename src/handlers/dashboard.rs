use axum::extract::State;
use axum::response::Response;
use chrono::Utc;

use crate::services::dashboard;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn overview(State(state): State<AppState>) -> Result<Response, AppError> {
    let overview = dashboard::overview(state.store(), Utc::now()).await?;
    Ok(success(overview, "Dashboard overview fetched"))
}
