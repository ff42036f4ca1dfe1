//! Create Timer Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    timers::{
        errors::{CREATE_TIMER_FAILED, into_api_error},
        requests::CreateTimerRequest,
        responses::{TimerEnvelope, TimerResponse},
    },
};

pub(crate) const TIMER_CREATED: &str = "Timer created successfully";

/// Create Timer Handler
///
/// The end date must lie after the start date and in the future.
#[endpoint(
    tags("timers"),
    summary = "Create Timer",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Timer created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Validation failed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "timers.create",
    skip(json, depot, res),
    fields(shop = tracing::field::Empty, timer_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<CreateTimerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<TimerEnvelope>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;

    let span = tracing::Span::current();

    span.record("shop", tracing::field::display(&shop));

    let new_timer = json
        .into_inner()
        .into_new_timer()
        .map_err(|errors| ApiError::validation(&errors))?;

    let now = Timestamp::now();

    let timer = state
        .app
        .timers
        .create_timer(shop, new_timer, now)
        .await
        .map_err(|error| into_api_error(error, CREATE_TIMER_FAILED))?;

    span.record("timer_uuid", tracing::field::display(timer.uuid));

    res.add_header(LOCATION, format!("/api/counter/timers/{}", timer.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(timer_uuid = %timer.uuid, "created timer");

    Ok(Json(TimerEnvelope::with_message(
        TimerResponse::from_record(timer, now),
        TIMER_CREATED,
    )))
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use countdown_app::domain::timers::{
        MockTimersService, TimersServiceError,
        data::{END_DATE_REQUIRED, END_IN_PAST, TITLE_REQUIRED},
        records::TimerUuid,
        validation::ValidationErrors,
    };

    use crate::{
        errors::{ErrorResponse, VALIDATION_FAILED},
        test_helpers::{TEST_SHOP, make_timer, timers_service},
    };

    use super::*;

    fn make_service(timers: MockTimersService) -> Service {
        timers_service(timers, Router::with_path("timers").post(handler))
    }

    #[tokio::test]
    async fn test_create_timer_returns_201_and_active_status() -> TestResult {
        let uuid = TimerUuid::new();
        let now = Timestamp::now();
        let starts_at = now.checked_sub(SignedDuration::from_hours(1))?;
        let ends_at = now.checked_add(SignedDuration::from_hours(1))?;

        let record = make_timer(uuid, starts_at, ends_at)?;

        let mut timers = MockTimersService::new();

        timers
            .expect_create_timer()
            .once()
            .withf(move |shop, new_timer, _| {
                shop.as_str() == TEST_SHOP
                    && new_timer.title == "Sale"
                    && new_timer.description == "d"
                    && new_timer.starts_at == starts_at
                    && new_timer.ends_at == ends_at
                    && new_timer.is_active
            })
            .return_once(move |_, _, _| Ok(record));

        let mut res = TestClient::post("http://example.com/timers")
            .json(&json!({
                "title": "Sale",
                "description": "d",
                "startDate": starts_at.to_string(),
                "endDate": ends_at.to_string(),
            }))
            .send(&make_service(timers))
            .await;

        let location = res
            .headers()
            .get("location")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        let response: TimerEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/api/counter/timers/{uuid}")));
        assert_eq!(response.timer.status, "active");
        assert_eq!(response.message.as_deref(), Some(TIMER_CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_timer_missing_fields_returns_400() -> TestResult {
        let mut timers = MockTimersService::new();

        timers.expect_create_timer().never();

        let mut res = TestClient::post("http://example.com/timers")
            .json(&json!({
                "description": "d",
                "startDate": "2026-03-01T00:00:00Z",
            }))
            .send(&make_service(timers))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.error, VALIDATION_FAILED);
        assert_eq!(body.message.as_deref(), Some(TITLE_REQUIRED));
        assert_eq!(body.validation_errors, vec![TITLE_REQUIRED, END_DATE_REQUIRED]);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_timer_end_in_past_returns_400() -> TestResult {
        let now = Timestamp::now();

        let mut timers = MockTimersService::new();

        timers
            .expect_create_timer()
            .once()
            .return_once(|_, _, _| {
                Err(TimersServiceError::Validation(ValidationErrors::single(
                    "endDate",
                    END_IN_PAST,
                )))
            });

        let mut res = TestClient::post("http://example.com/timers")
            .json(&json!({
                "title": "Sale",
                "description": "d",
                "startDate": now.checked_sub(SignedDuration::from_hours(2))?.to_string(),
                "endDate": now.checked_sub(SignedDuration::from_hours(1))?.to_string(),
            }))
            .send(&make_service(timers))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message.as_deref(), Some(END_IN_PAST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_timer_malformed_json_returns_400() -> TestResult {
        let mut timers = MockTimersService::new();

        timers.expect_create_timer().never();

        let mut res = TestClient::post("http://example.com/timers")
            .raw_json("{\"title\": ")
            .send(&make_service(timers))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(!body.success, "envelope should not report success");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_timer_storage_error_hides_details() -> TestResult {
        let now = Timestamp::now();

        let mut timers = MockTimersService::new();

        timers
            .expect_create_timer()
            .once()
            .return_once(|_, _, _| Err(TimersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let mut res = TestClient::post("http://example.com/timers")
            .json(&json!({
                "title": "Sale",
                "description": "d",
                "startDate": now.to_string(),
                "endDate": now.checked_add(SignedDuration::from_hours(1))?.to_string(),
            }))
            .send(&make_service(timers))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error, CREATE_TIMER_FAILED);
        assert_eq!(body.message, None);

        Ok(())
    }
}
