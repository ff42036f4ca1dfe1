//! Update Timer Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use countdown_app::domain::timers::records::TimerUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    timers::{
        errors::{UPDATE_TIMER_FAILED, into_api_error},
        requests::UpdateTimerRequest,
        responses::{TimerEnvelope, TimerResponse},
    },
};

pub(crate) const TIMER_UPDATED: &str = "Timer updated successfully";

/// Update Timer Handler
///
/// Partial update; served for both `PATCH` and `PUT`. Date ordering is only
/// checked when both dates are supplied.
#[endpoint(
    tags("timers"),
    summary = "Update Timer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Timer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Timer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "timers.update",
    skip(id, json, depot),
    fields(shop = tracing::field::Empty, timer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    json: JsonBody<UpdateTimerRequest>,
    depot: &mut Depot,
) -> Result<Json<TimerEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;
    let timer = TimerUuid::from_uuid(id.into_inner());

    let span = tracing::Span::current();

    span.record("shop", tracing::field::display(&shop));
    span.record("timer_uuid", tracing::field::display(timer));

    let update = json
        .into_inner()
        .into_timer_update()
        .map_err(|errors| ApiError::validation(&errors))?;

    let record = state
        .app
        .timers
        .update_timer(shop, timer, update)
        .await
        .map_err(|error| into_api_error(error, UPDATE_TIMER_FAILED))?;

    tracing::info!(timer_uuid = %timer, "updated timer");

    Ok(Json(TimerEnvelope::with_message(
        TimerResponse::from_record(record, Timestamp::now()),
        TIMER_UPDATED,
    )))
}
