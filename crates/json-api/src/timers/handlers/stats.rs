//! Timer Stats Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    timers::{
        errors::{FETCH_STATS_FAILED, into_api_error},
        responses::TimerStatsResponse,
    },
};

/// Timer Stats Handler
///
/// Counts the shop's timers by status. Every timer lands in exactly one bucket.
#[endpoint(
    tags("timers"),
    summary = "Timer Statistics",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TimerStatsResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let stats = state
        .app
        .timers
        .timer_stats(shop, point_in_time)
        .await
        .map_err(|error| into_api_error(error, FETCH_STATS_FAILED))?;

    Ok(Json(TimerStatsResponse {
        success: true,
        stats: stats.into(),
    }))
}
