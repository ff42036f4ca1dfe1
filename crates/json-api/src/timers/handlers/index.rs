//! Timer Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    errors::ApiError,
    extensions::*,
    state::State,
    timers::{
        errors::{FETCH_TIMERS_FAILED, into_api_error},
        responses::{TimerResponse, TimersResponse},
    },
};

/// Timer Index Handler
///
/// Returns every timer of the session's shop, newest first.
#[endpoint(
    tags("timers"),
    summary = "List Timers",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TimersResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let shop = depot.shop_or_401()?;
    let point_in_time = at.into_point_in_time()?;

    let timers = state
        .app
        .timers
        .list_timers(shop)
        .await
        .map_err(|error| into_api_error(error, FETCH_TIMERS_FAILED))?;

    Ok(Json(TimersResponse::new(
        timers
            .into_iter()
            .map(|record| TimerResponse::from_record(record, point_in_time))
            .collect(),
    )))
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use countdown_app::domain::timers::{
        MockTimersService, TimersServiceError, records::TimerUuid,
    };

    use crate::{
        errors::ErrorResponse,
        test_helpers::{TEST_SHOP, make_timer, timers_service},
    };

    use super::*;

    fn make_service(timers: MockTimersService) -> Service {
        timers_service(timers, Router::with_path("timers").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_empty_list() -> TestResult {
        let mut timers = MockTimersService::new();

        timers
            .expect_list_timers()
            .once()
            .withf(|shop| shop.as_str() == TEST_SHOP)
            .return_once(|_| Ok(vec![]));

        let mut res = TestClient::get("http://example.com/timers")
            .send(&make_service(timers))
            .await;

        let response: TimersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(response.success, "list should report success");
        assert!(response.timers.is_empty(), "expected no timers");
        assert_eq!(response.count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_derives_status_at_point_in_time() -> TestResult {
        let at: Timestamp = "2026-02-21T12:00:00Z".parse()?;
        let first = TimerUuid::new();
        let second = TimerUuid::new();

        let running = make_timer(
            first,
            at.checked_sub(SignedDuration::from_hours(1))?,
            at.checked_add(SignedDuration::from_hours(1))?,
        )?;

        let upcoming = make_timer(
            second,
            at.checked_add(SignedDuration::from_hours(1))?,
            at.checked_add(SignedDuration::from_hours(2))?,
        )?;

        let mut timers = MockTimersService::new();

        timers
            .expect_list_timers()
            .once()
            .withf(|shop| shop.as_str() == TEST_SHOP)
            .return_once(move |_| Ok(vec![running, upcoming]));

        let response: TimersResponse =
            TestClient::get("http://example.com/timers?at=2026-02-21T12:00:00Z")
                .send(&make_service(timers))
                .await
                .take_json()
                .await?;

        let summary: Vec<_> = response
            .timers
            .iter()
            .map(|timer| (timer.id, timer.status.as_str()))
            .collect();

        assert_eq!(response.count, 2);
        assert_eq!(
            summary,
            vec![
                (first.into_uuid(), "active"),
                (second.into_uuid(), "scheduled")
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_invalid_point_in_time_returns_400() -> TestResult {
        let mut timers = MockTimersService::new();

        timers.expect_list_timers().never();

        let res = TestClient::get("http://example.com/timers?at=yesterday")
            .send(&make_service(timers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_index_storage_error_returns_500() -> TestResult {
        let mut timers = MockTimersService::new();

        timers
            .expect_list_timers()
            .once()
            .return_once(|_| Err(TimersServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let mut res = TestClient::get("http://example.com/timers")
            .send(&make_service(timers))
            .await;

        let body: ErrorResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(body.error, FETCH_TIMERS_FAILED);
        assert_eq!(body.message, None);

        Ok(())
    }
}
