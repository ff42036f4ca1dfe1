//! Widget Feed Handler
//!
//! Public, unauthenticated feed of the timers the storefront should render
//! right now.

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use countdown_app::domain::{
    shops::{ShopDomain, ShopDomainError},
    timers::widget::WidgetTimer,
};

use crate::{
    errors::ApiError,
    extensions::*,
    observability,
    state::State,
    timers::{
        errors::{FETCH_TIMERS_FAILED, into_api_error},
        models::{DisplayOptionsBody, UrgencySettingsBody},
    },
};

pub(crate) const SHOP_REQUIRED: &str = "Shop parameter is required";
pub(crate) const SHOP_INVALID: &str = "Invalid shop parameter";

/// Widget Timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WidgetTimerResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// RFC 3339 timestamp
    pub end_date: String,
    pub display_options: DisplayOptionsBody,
    pub urgency_settings: UrgencySettingsBody,
    pub status: String,
    pub is_in_urgency_mode: bool,
}

impl From<WidgetTimer> for WidgetTimerResponse {
    fn from(timer: WidgetTimer) -> Self {
        Self {
            id: timer.id.into_uuid(),
            title: timer.title,
            description: timer.description,
            end_date: timer.ends_at.to_string(),
            display_options: timer.display_options.into(),
            urgency_settings: timer.urgency_settings.into(),
            status: timer.status.as_str().to_string(),
            is_in_urgency_mode: timer.is_in_urgency_mode,
        }
    }
}

/// Widget Feed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WidgetResponse {
    pub success: bool,
    pub timers: Vec<WidgetTimerResponse>,
    pub count: usize,
}

fn parse_shop(raw: &str) -> Result<ShopDomain, ApiError> {
    ShopDomain::parse(raw).map_err(|error| match error {
        ShopDomainError::Blank => ApiError::bad_request(SHOP_REQUIRED),
        other => ApiError::bad_request(SHOP_INVALID).with_message(other.to_string()),
    })
}

/// Widget Feed Handler
#[endpoint(
    tags("widget"),
    summary = "Live Timers For Storefront",
    responses(
        (status_code = StatusCode::OK, description = "Live timers"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing or invalid shop"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    shop: PathParam<String>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<WidgetResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let shop = parse_shop(&shop.into_inner())?;

    let timers: Vec<WidgetTimerResponse> = state
        .app
        .timers
        .list_live_timers(shop, point_in_time)
        .await
        .map_err(|error| into_api_error(error, FETCH_TIMERS_FAILED))?
        .into_iter()
        .map(|record| WidgetTimer::project(record, point_in_time).into())
        .collect();

    observability::observe_widget_timers(timers.len());

    Ok(Json(WidgetResponse {
        success: true,
        count: timers.len(),
        timers,
    }))
}
