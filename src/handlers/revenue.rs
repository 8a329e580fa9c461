use axum::extract::State;
use axum::response::Response;
use chrono::Utc;

use crate::services::reporting;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::response::success;

pub async fn revenue_stats(State(state): State<AppState>) -> Result<Response, AppError> {
    let stats = reporting::revenue_stats(state.store(), Utc::now()).await?;
    Ok(success(stats, "Revenue stats fetched"))
}

pub async fn revenue_by_event(State(state): State<AppState>) -> Result<Response, AppError> {
    let revenue = reporting::event_revenue(state.store()).await?;
    Ok(success(revenue, "Revenue by event fetched"))
}

pub async fn recent_transactions(State(state): State<AppState>) -> Result<Response, AppError> {
    let transactions = reporting::recent_transactions(state.store()).await?;
    Ok(success(transactions, "Recent transactions fetched"))
}
