use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;

use crate::models::checkin::{CheckinOutcome, CheckinRequest};
use crate::services::checkin;
use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::extract::ApiJson;
use crate::utils::response::{error as error_response, success};

/// Scans a ticket. Unknown and already-used tickets are distinct responses
/// so the desk can show different messages; the latter carries the existing
/// record in `details`.
pub async fn check_in(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CheckinRequest>,
) -> Result<Response, AppError> {
    let outcome = checkin::check_in(state.store(), &request.ticket_code, Utc::now()).await?;

    let response = match outcome {
        CheckinOutcome::Success(record) => success(record, "Check-in successful"),
        CheckinOutcome::AlreadyCheckedIn(record) => error_response(
            "ALREADY_CHECKED_IN",
            "Already checked in",
            serde_json::to_value(record).ok(),
            StatusCode::CONFLICT,
        ),
        CheckinOutcome::NotFound => error_response(
            "TICKET_NOT_FOUND",
            "Ticket not found",
            None,
            StatusCode::NOT_FOUND,
        ),
    };
    Ok(response)
}

pub async fn checkin_stats(State(state): State<AppState>) -> Result<Response, AppError> {
    let stats = checkin::checkin_stats(state.store(), Utc::now()).await?;
    Ok(success(stats, "Check-in stats fetched"))
}
