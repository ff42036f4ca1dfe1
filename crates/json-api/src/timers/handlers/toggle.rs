//! Toggle Timer Handler

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
        errors::{TOGGLE_TIMER_FAILED, into_api_error},
        responses::{TimerEnvelope, TimerResponse},
    },
};

pub(crate) const TIMER_ACTIVATED: &str = "Timer activated successfully";
pub(crate) const TIMER_DEACTIVATED: &str = "Timer deactivated successfully";

/// Toggle Timer Handler
///
/// Flips the timer's active flag.
#[endpoint(
    tags("timers"),
    summary = "Toggle Timer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Timer toggled"),
        (status_code = StatusCode::NOT_FOUND, description = "Timer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "timers.toggle",
    skip(id, depot),
    fields(
        shop = tracing::field::Empty,
        timer_uuid = tracing::field::Empty,
        is_active = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<TimerEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;
    let timer = TimerUuid::from_uuid(id.into_inner());

    let span = tracing::Span::current();

    span.record("shop", tracing::field::display(&shop));
    span.record("timer_uuid", tracing::field::display(timer));

    let toggled = state
        .app
        .timers
        .toggle_timer(shop, timer)
        .await
        .map_err(|error| into_api_error(error, TOGGLE_TIMER_FAILED))?;

    span.record("is_active", toggled.is_active);

    let message = if toggled.is_active {
        TIMER_ACTIVATED
    } else {
        TIMER_DEACTIVATED
    };

    Ok(Json(TimerEnvelope::with_message(
        TimerResponse::from_record(toggled, Timestamp::now()),
        message,
    )))
}
