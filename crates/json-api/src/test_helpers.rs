//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};

use countdown_app::{
    context::AppContext,
    domain::{
        shops::{ShopDomain, ShopDomainError},
        timers::{
            MockTimersService,
            display::{DisplayOptions, UrgencySettings},
            records::{TimerRecord, TimerUuid},
        },
    },
    sessions::MockSessionsService,
};

use crate::{errors, extensions::*, state::State};

pub(crate) const TEST_SHOP: &str = "test-shop.myshopify.com";

pub(crate) fn test_shop() -> Result<ShopDomain, ShopDomainError> {
    ShopDomain::parse(TEST_SHOP)
}

#[salvo::handler]
pub(crate) async fn inject_shop(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Ok(shop) = test_shop() {
        depot.insert_shop(shop);
    }

    ctrl.call_next(req, depot, res).await;
}

fn strict_sessions_mock() -> MockSessionsService {
    let mut sessions = MockSessionsService::new();

    sessions.expect_authenticate_bearer().never();

    sessions
}

fn strict_timers_mock() -> MockTimersService {
    let mut timers = MockTimersService::new();

    timers.expect_list_timers().never();
    timers.expect_get_timer().never();
    timers.expect_create_timer().never();
    timers.expect_update_timer().never();
    timers.expect_delete_timer().never();
    timers.expect_toggle_timer().never();
    timers.expect_list_live_timers().never();
    timers.expect_timer_stats().never();

    timers
}

pub(crate) fn state_with_timers(timers: MockTimersService) -> Arc<State> {
    State::from_app_context(AppContext {
        timers: Arc::new(timers),
        sessions: Arc::new(strict_sessions_mock()),
    })
}

pub(crate) fn state_with_sessions(sessions: MockSessionsService) -> Arc<State> {
    State::from_app_context(AppContext {
        timers: Arc::new(strict_timers_mock()),
        sessions: Arc::new(sessions),
    })
}

/// Service with the test shop already resolved, as the session middleware
/// would.
pub(crate) fn timers_service(timers: MockTimersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_timers(timers)))
            .hoop(inject_shop)
            .push(route),
    )
    .catcher(errors::catcher())
}

/// Service without a resolved shop, for public routes.
pub(crate) fn public_service(timers: MockTimersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_timers(timers)))
            .push(route),
    )
    .catcher(errors::catcher())
}

pub(crate) fn make_timer(
    uuid: TimerUuid,
    starts_at: Timestamp,
    ends_at: Timestamp,
) -> Result<TimerRecord, ShopDomainError> {
    Ok(TimerRecord {
        uuid,
        shop: test_shop()?,
        title: "Sale".to_string(),
        description: "d".to_string(),
        starts_at,
        ends_at,
        is_active: true,
        display_options: DisplayOptions::default(),
        urgency_settings: UrgencySettings::default(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    })
}
