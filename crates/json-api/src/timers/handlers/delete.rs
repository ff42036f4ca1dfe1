//! Delete Timer Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use countdown_app::domain::timers::records::TimerUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    timers::{
        errors::{DELETE_TIMER_FAILED, into_api_error},
        responses::{TimerDeletedResponse, TimerResponse},
    },
};

pub(crate) const TIMER_DELETED: &str = "Timer deleted successfully";

/// Delete Timer Handler
///
/// Responds with the timer as it was before deletion.
#[endpoint(
    tags("timers"),
    summary = "Delete Timer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Timer deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Timer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "timers.delete",
    skip(id, depot),
    fields(shop = tracing::field::Empty, timer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TimerDeletedResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;
    let timer = TimerUuid::from_uuid(id.into_inner());

    let span = tracing::Span::current();

    span.record("shop", tracing::field::display(&shop));
    span.record("timer_uuid", tracing::field::display(timer));

    let deleted = state
        .app
        .timers
        .delete_timer(shop, timer)
        .await
        .map_err(|error| into_api_error(error, DELETE_TIMER_FAILED))?;

    tracing::info!(timer_uuid = %timer, "deleted timer");

    Ok(Json(TimerDeletedResponse {
        success: true,
        message: TIMER_DELETED.to_string(),
        deleted_timer: TimerResponse::from_record(deleted, Timestamp::now()),
    }))
}
