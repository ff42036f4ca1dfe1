//! Get Timer Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use uuid::Uuid;

use countdown_app::domain::timers::records::TimerUuid;

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    timers::{
        errors::{FETCH_TIMER_FAILED, into_api_error},
        responses::{TimerEnvelope, TimerResponse},
    },
};

/// Get Timer Handler
#[endpoint(
    tags("timers"),
    summary = "Get Timer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Timer found"),
        (status_code = StatusCode::NOT_FOUND, description = "Timer not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    id: PathParam<Uuid>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TimerEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let timer = state
        .app
        .timers
        .get_timer(shop, TimerUuid::from_uuid(id.into_inner()))
        .await
        .map_err(|error| into_api_error(error, FETCH_TIMER_FAILED))?;

    Ok(Json(TimerEnvelope::new(TimerResponse::from_record(
        timer,
        point_in_time,
    ))))
}
