//! Timers Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        shops::ShopDomain,
        timers::{
            TimersServiceError,
            data::{NewTimer, TimerUpdate},
            records::{TimerRecord, TimerUuid},
            repository::PgTimersRepository,
            stats::TimerStats,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgTimersService {
    db: Db,
    repository: PgTimersRepository,
}

impl PgTimersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTimersRepository::new(),
        }
    }
}

#[async_trait]
impl TimersService for PgTimersService {
    async fn list_timers(&self, shop: ShopDomain) -> Result<Vec<TimerRecord>, TimersServiceError> {
        let mut tx = self.db.begin_shop_transaction(&shop).await?;

        let timers = self.repository.list_timers(&mut tx, &shop).await?;

        tx.commit().await?;

        Ok(timers)
    }

    async fn get_timer(
        &self,
        shop: ShopDomain,
        timer: TimerUuid,
    ) -> Result<TimerRecord, TimersServiceError> {
        let mut tx = self.db.begin_shop_transaction(&shop).await?;

        let timer = self.repository.get_timer(&mut tx, &shop, timer).await?;

        tx.commit().await?;

        Ok(timer)
    }

    #[tracing::instrument(
        name = "timers.service.create_timer",
        skip(self, shop, new_timer, now),
        fields(shop = %shop, timer_uuid = tracing::field::Empty),
        err
    )]
    async fn create_timer(
        &self,
        shop: ShopDomain,
        new_timer: NewTimer,
        now: Timestamp,
    ) -> Result<TimerRecord, TimersServiceError> {
        let new_timer = new_timer.validate(now)?;
        let timer = TimerUuid::new();

        Span::current().record("timer_uuid", tracing::field::display(timer));

        let mut tx = self.db.begin_shop_transaction(&shop).await?;

        let record = self
            .repository
            .create_timer(&mut tx, &shop, timer, new_timer)
            .await?;

        tx.commit().await?;

        info!(timer_uuid = %record.uuid, "created timer");

        Ok(record)
    }

    #[tracing::instrument(
        name = "timers.service.update_timer",
        skip(self, shop, timer, update),
        fields(shop = %shop, timer_uuid = %timer),
        err
    )]
    async fn update_timer(
        &self,
        shop: ShopDomain,
        timer: TimerUuid,
        update: TimerUpdate,
    ) -> Result<TimerRecord, TimersServiceError> {
        let update = update.validate()?;

        let mut tx = self.db.begin_shop_transaction(&shop).await?;

        let record = self
            .repository
            .update_timer(&mut tx, &shop, timer, update)
            .await?;

        tx.commit().await?;

        info!("updated timer");

        Ok(record)
    }

    #[tracing::instrument(
        name = "timers.service.delete_timer",
        skip(self, shop, timer),
        fields(shop = %shop, timer_uuid = %timer),
        err
    )]
    async fn delete_timer(
        &self,
        shop: ShopDomain,
        timer: TimerUuid,
    ) -> Result<TimerRecord, TimersServiceError> {
        let mut tx = self.db.begin_shop_transaction(&shop).await?;

        let deleted = self
            .repository
            .delete_timer(&mut tx, &shop, timer)
            .await?
            .ok_or(TimersServiceError::NotFound)?;

        tx.commit().await?;

        info!("deleted timer");

        Ok(deleted)
    }

    #[tracing::instrument(
        name = "timers.service.toggle_timer",
        skip(self, shop, timer),
        fields(shop = %shop, timer_uuid = %timer, is_active = tracing::field::Empty),
        err
    )]
    async fn toggle_timer(
        &self,
        shop: ShopDomain,
        timer: TimerUuid,
    ) -> Result<TimerRecord, TimersServiceError> {
        let mut tx = self.db.begin_shop_transaction(&shop).await?;

        // Plain read, no row lock: two concurrent toggles can both flip from the
        // same value and one of them is lost.
        let current = self.repository.get_timer(&mut tx, &shop, timer).await?;

        let toggled = self
            .repository
            .set_timer_active(&mut tx, &shop, timer, !current.is_active)
            .await?;

        tx.commit().await?;

        Span::current().record("is_active", toggled.is_active);

        info!("toggled timer");

        Ok(toggled)
    }

    async fn list_live_timers(
        &self,
        shop: ShopDomain,
        now: Timestamp,
    ) -> Result<Vec<TimerRecord>, TimersServiceError> {
        let mut tx = self.db.begin_shop_transaction(&shop).await?;

        let timers = self.repository.list_live_timers(&mut tx, &shop, now).await?;

        tx.commit().await?;

        Ok(timers)
    }

    async fn timer_stats(
        &self,
        shop: ShopDomain,
        now: Timestamp,
    ) -> Result<TimerStats, TimersServiceError> {
        let mut tx = self.db.begin_shop_transaction(&shop).await?;

        let counts = self.repository.timer_counts(&mut tx, &shop, now).await?;

        tx.commit().await?;

        Ok(TimerStats {
            total: u64::try_from(counts.total)?,
            active: u64::try_from(counts.active)?,
            scheduled: u64::try_from(counts.scheduled)?,
            expired: u64::try_from(counts.expired)?,
            inactive: u64::try_from(counts.inactive)?,
        })
    }
}

#[automock]
#[async_trait]
pub trait TimersService: Send + Sync {
    /// Retrieve every timer of a shop, newest first.
    async fn list_timers(&self, shop: ShopDomain) -> Result<Vec<TimerRecord>, TimersServiceError>;

    /// Retrieve a single timer of a shop.
    async fn get_timer(
        &self,
        shop: ShopDomain,
        timer: TimerUuid,
    ) -> Result<TimerRecord, TimersServiceError>;

    /// Validate and store a new timer. `now` is the reference for the
    /// end-in-the-future check.
    async fn create_timer(
        &self,
        shop: ShopDomain,
        new_timer: NewTimer,
        now: Timestamp,
    ) -> Result<TimerRecord, TimersServiceError>;

    /// Validate and apply a partial update.
    async fn update_timer(
        &self,
        shop: ShopDomain,
        timer: TimerUuid,
        update: TimerUpdate,
    ) -> Result<TimerRecord, TimersServiceError>;

    /// Delete a timer, returning the removed record.
    async fn delete_timer(
        &self,
        shop: ShopDomain,
        timer: TimerUuid,
    ) -> Result<TimerRecord, TimersServiceError>;

    /// Flip the activity flag of a timer.
    async fn toggle_timer(
        &self,
        shop: ShopDomain,
        timer: TimerUuid,
    ) -> Result<TimerRecord, TimersServiceError>;

    /// Retrieve the enabled timers whose window contains `now`, newest first.
    async fn list_live_timers(
        &self,
        shop: ShopDomain,
        now: Timestamp,
    ) -> Result<Vec<TimerRecord>, TimersServiceError>;

    /// Count a shop's timers per status at `now`.
    async fn timer_stats(
        &self,
        shop: ShopDomain,
        now: Timestamp,
    ) -> Result<TimerStats, TimersServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::{
        domain::timers::{
            data::{END_BEFORE_START, END_IN_PAST},
            status::TimerStatus,
        },
        test::{TestContext, helpers::new_timer},
    };

    use super::*;

    fn hours(hours: i64) -> SignedDuration {
        SignedDuration::from_hours(hours)
    }

    #[tokio::test]
    async fn create_timer_returns_active_timer() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let timer = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now - hours(1), now + hours(1)), now)
            .await?;

        assert_eq!(timer.shop, ctx.shop);
        assert_eq!(timer.title, "Sale");
        assert!(timer.is_active);
        assert_eq!(timer.status(now), TimerStatus::Active);

        Ok(())
    }

    #[tokio::test]
    async fn create_timer_rejects_end_in_the_past() {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let result = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now - hours(2), now - hours(1)), now)
            .await;

        match result {
            Err(TimersServiceError::Validation(errors)) => {
                assert_eq!(errors.first_message(), Some(END_IN_PAST));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_timer_is_scoped_to_shop() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let other_shop = ctx.other_shop();

        let timer = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(1)), now)
            .await?;

        let found = ctx.timers.get_timer(ctx.shop.clone(), timer.uuid).await?;

        assert_eq!(found.uuid, timer.uuid);

        let result = ctx.timers.get_timer(other_shop, timer.uuid).await;

        assert!(
            matches!(result, Err(TimersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_timer_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .timers
            .get_timer(ctx.shop.clone(), TimerUuid::new())
            .await;

        assert!(
            matches!(result, Err(TimersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_timers_returns_newest_first_for_shop_only() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let other_shop = ctx.other_shop();

        let first = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(1)), now)
            .await?;

        let second = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(2)), now)
            .await?;

        ctx.timers
            .create_timer(other_shop, new_timer(now, now + hours(1)), now)
            .await?;

        let timers = ctx.timers.list_timers(ctx.shop.clone()).await?;
        let uuids: Vec<TimerUuid> = timers.iter().map(|t| t.uuid).collect();

        assert_eq!(uuids, vec![second.uuid, first.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn update_timer_merges_supplied_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let created = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(1)), now)
            .await?;

        let updated = ctx
            .timers
            .update_timer(
                ctx.shop.clone(),
                created.uuid,
                TimerUpdate {
                    title: Some("  Summer sale ".to_string()),
                    ..TimerUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.title, "Summer sale");
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.ends_at, created.ends_at);
        assert!(updated.updated_at >= created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_timer_accepts_lone_start_date_past_end() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let created = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(1)), now)
            .await?;

        let updated = ctx
            .timers
            .update_timer(
                ctx.shop.clone(),
                created.uuid,
                TimerUpdate {
                    starts_at: Some(now + hours(3)),
                    ..TimerUpdate::default()
                },
            )
            .await?;

        assert!(updated.starts_at > updated.ends_at);
        assert_eq!(updated.status(now + hours(2)), TimerStatus::Scheduled);

        Ok(())
    }

    #[tokio::test]
    async fn update_timer_rejects_inverted_dates_supplied_together() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let created = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(1)), now)
            .await?;

        let result = ctx
            .timers
            .update_timer(
                ctx.shop.clone(),
                created.uuid,
                TimerUpdate {
                    starts_at: Some(now + hours(3)),
                    ends_at: Some(now + hours(2)),
                    ..TimerUpdate::default()
                },
            )
            .await;

        match result {
            Err(TimersServiceError::Validation(errors)) => {
                assert_eq!(errors.first_message(), Some(END_BEFORE_START));
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn update_timer_other_shop_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let created = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(1)), now)
            .await?;

        let result = ctx
            .timers
            .update_timer(
                ctx.other_shop(),
                created.uuid,
                TimerUpdate {
                    is_active: Some(false),
                    ..TimerUpdate::default()
                },
            )
            .await;

        assert!(
            matches!(result, Err(TimersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let unchanged = ctx.timers.get_timer(ctx.shop.clone(), created.uuid).await?;

        assert!(unchanged.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn delete_timer_returns_snapshot_and_removes_it() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let created = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(1)), now)
            .await?;

        let deleted = ctx.timers.delete_timer(ctx.shop.clone(), created.uuid).await?;

        assert_eq!(deleted, created);

        let result = ctx.timers.delete_timer(ctx.shop.clone(), created.uuid).await;

        assert!(
            matches!(result, Err(TimersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn toggle_timer_flips_activity_flag() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let created = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(1)), now)
            .await?;

        let toggled = ctx.timers.toggle_timer(ctx.shop.clone(), created.uuid).await?;

        assert!(!toggled.is_active);
        assert_eq!(toggled.status(now), TimerStatus::Inactive);

        let toggled = ctx.timers.toggle_timer(ctx.shop.clone(), created.uuid).await?;

        assert!(toggled.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn list_live_timers_filters_by_window_and_flag() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();
        let earlier = now - hours(3);

        let live = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now - hours(1), now + hours(1)), now)
            .await?;

        ctx.timers
            .create_timer(ctx.shop.clone(), new_timer(now + hours(1), now + hours(2)), now)
            .await?;

        ctx.timers
            .create_timer(
                ctx.shop.clone(),
                new_timer(now - hours(2), now - hours(1)),
                earlier,
            )
            .await?;

        let disabled = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now - hours(1), now + hours(1)), now)
            .await?;

        ctx.timers
            .toggle_timer(ctx.shop.clone(), disabled.uuid)
            .await?;

        ctx.timers
            .create_timer(ctx.other_shop(), new_timer(now - hours(1), now + hours(1)), now)
            .await?;

        let timers = ctx.timers.list_live_timers(ctx.shop.clone(), now).await?;
        let uuids: Vec<TimerUuid> = timers.iter().map(|t| t.uuid).collect();

        assert_eq!(uuids, vec![live.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_live_timers_includes_window_boundaries() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let timer = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now, now + hours(1)), now)
            .await?;

        let at_start = ctx
            .timers
            .list_live_timers(ctx.shop.clone(), timer.starts_at)
            .await?;

        let at_end = ctx
            .timers
            .list_live_timers(ctx.shop.clone(), timer.ends_at)
            .await?;

        assert_eq!(at_start.len(), 1);
        assert_eq!(at_end.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn timer_stats_counts_each_status_once() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        ctx.timers
            .create_timer(ctx.shop.clone(), new_timer(now - hours(1), now + hours(1)), now)
            .await?;

        ctx.timers
            .create_timer(ctx.shop.clone(), new_timer(now + hours(1), now + hours(2)), now)
            .await?;

        ctx.timers
            .create_timer(
                ctx.shop.clone(),
                new_timer(now - hours(2), now - hours(1)),
                now - hours(3),
            )
            .await?;

        let inactive = ctx
            .timers
            .create_timer(ctx.shop.clone(), new_timer(now - hours(1), now + hours(1)), now)
            .await?;

        ctx.timers
            .toggle_timer(ctx.shop.clone(), inactive.uuid)
            .await?;

        ctx.timers
            .create_timer(ctx.other_shop(), new_timer(now - hours(1), now + hours(1)), now)
            .await?;

        let stats = ctx.timers.timer_stats(ctx.shop.clone(), now).await?;

        assert_eq!(
            stats,
            TimerStats {
                total: 4,
                active: 1,
                scheduled: 1,
                expired: 1,
                inactive: 1,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn timer_stats_empty_shop_is_all_zero() -> TestResult {
        let ctx = TestContext::new().await;

        let stats = ctx
            .timers
            .timer_stats(ctx.shop.clone(), Timestamp::now())
            .await?;

        assert_eq!(stats, TimerStats::default());

        Ok(())
    }
}
