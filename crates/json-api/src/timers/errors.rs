//! Timer Errors

use salvo::http::StatusCode;
use tracing::error;

use countdown_app::domain::timers::TimersServiceError;

use crate::errors::ApiError;

pub(crate) const TIMER_NOT_FOUND: &str = "Timer not found";

pub(crate) const FETCH_TIMERS_FAILED: &str = "Failed to fetch timers";
pub(crate) const FETCH_TIMER_FAILED: &str = "Failed to fetch timer";
pub(crate) const CREATE_TIMER_FAILED: &str = "Failed to create timer";
pub(crate) const UPDATE_TIMER_FAILED: &str = "Failed to update timer";
pub(crate) const DELETE_TIMER_FAILED: &str = "Failed to delete timer";
pub(crate) const TOGGLE_TIMER_FAILED: &str = "Failed to toggle timer status";
pub(crate) const FETCH_STATS_FAILED: &str = "Failed to fetch timer statistics";

/// Map a service error to its envelope. `failure` is the `error` reported for
/// storage failures, which are logged and otherwise hidden.
pub(crate) fn into_api_error(error: TimersServiceError, failure: &str) -> ApiError {
    match error {
        TimersServiceError::Validation(errors) => ApiError::validation(&errors),
        TimersServiceError::NotFound => ApiError::not_found(TIMER_NOT_FOUND),
        TimersServiceError::AlreadyExists => {
            ApiError::new(StatusCode::CONFLICT, "Timer already exists")
        }
        TimersServiceError::InvalidReference
        | TimersServiceError::MissingRequiredData
        | TimersServiceError::InvalidData => ApiError::bad_request("Invalid timer payload"),
        TimersServiceError::Sql(source) => {
            error!("{failure}: {source}");

            ApiError::internal(failure)
        }
        TimersServiceError::InvalidCount(source) => {
            error!("{failure}: {source}");

            ApiError::internal(failure)
        }
    }
}
