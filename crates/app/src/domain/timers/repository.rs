//! Timers Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    shops::ShopDomain,
    timers::{
        data::{NewTimer, TimerUpdate},
        display::{DisplayOptions, HexColor, TimerPosition, TimerSize, UrgencySettings},
        records::{TimerRecord, TimerUuid},
    },
};

const LIST_TIMERS_SQL: &str = include_str!("sql/list_timers.sql");
const GET_TIMER_SQL: &str = include_str!("sql/get_timer.sql");
const CREATE_TIMER_SQL: &str = include_str!("sql/create_timer.sql");
const UPDATE_TIMER_SQL: &str = include_str!("sql/update_timer.sql");
const SET_TIMER_ACTIVE_SQL: &str = include_str!("sql/set_timer_active.sql");
const DELETE_TIMER_SQL: &str = include_str!("sql/delete_timer.sql");
const LIST_LIVE_TIMERS_SQL: &str = include_str!("sql/list_live_timers.sql");
const TIMER_STATS_SQL: &str = include_str!("sql/timer_stats.sql");

/// Raw per-status counts as returned by the stats query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub(crate) struct TimerCounts {
    pub total: i64,
    pub active: i64,
    pub scheduled: i64,
    pub expired: i64,
    pub inactive: i64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTimersRepository;

impl PgTimersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_timers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
    ) -> Result<Vec<TimerRecord>, sqlx::Error> {
        query_as::<Postgres, TimerRecord>(LIST_TIMERS_SQL)
            .bind(shop.as_str())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_timer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        timer: TimerUuid,
    ) -> Result<TimerRecord, sqlx::Error> {
        query_as::<Postgres, TimerRecord>(GET_TIMER_SQL)
            .bind(shop.as_str())
            .bind(timer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_timer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        timer: TimerUuid,
        new_timer: NewTimer,
    ) -> Result<TimerRecord, sqlx::Error> {
        let NewTimer {
            title,
            description,
            starts_at,
            ends_at,
            is_active,
            display_options,
            urgency_settings,
        } = new_timer;

        query_as::<Postgres, TimerRecord>(CREATE_TIMER_SQL)
            .bind(timer.into_uuid())
            .bind(shop.as_str())
            .bind(title)
            .bind(description)
            .bind(SqlxTimestamp::from(starts_at))
            .bind(SqlxTimestamp::from(ends_at))
            .bind(is_active)
            .bind(display_options.color.as_str())
            .bind(display_options.background_color.as_str())
            .bind(display_options.text_color.as_str())
            .bind(display_options.size.as_str())
            .bind(display_options.position.as_str())
            .bind(urgency_settings.enabled)
            .bind(i16::from(urgency_settings.threshold_minutes))
            .bind(urgency_settings.pulse_color.as_str())
            .bind(urgency_settings.show_banner)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_timer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        timer: TimerUuid,
        update: TimerUpdate,
    ) -> Result<TimerRecord, sqlx::Error> {
        let TimerUpdate {
            title,
            description,
            starts_at,
            ends_at,
            is_active,
            display_options,
            urgency_settings,
        } = update;

        let display_options = display_options.as_ref();
        let urgency_settings = urgency_settings.as_ref();

        query_as::<Postgres, TimerRecord>(UPDATE_TIMER_SQL)
            .bind(shop.as_str())
            .bind(timer.into_uuid())
            .bind(title)
            .bind(description)
            .bind(starts_at.map(SqlxTimestamp::from))
            .bind(ends_at.map(SqlxTimestamp::from))
            .bind(is_active)
            .bind(display_options.map(|d| d.color.as_str()))
            .bind(display_options.map(|d| d.background_color.as_str()))
            .bind(display_options.map(|d| d.text_color.as_str()))
            .bind(display_options.map(|d| d.size.as_str()))
            .bind(display_options.map(|d| d.position.as_str()))
            .bind(urgency_settings.map(|u| u.enabled))
            .bind(urgency_settings.map(|u| i16::from(u.threshold_minutes)))
            .bind(urgency_settings.map(|u| u.pulse_color.as_str()))
            .bind(urgency_settings.map(|u| u.show_banner))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_timer_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        timer: TimerUuid,
        is_active: bool,
    ) -> Result<TimerRecord, sqlx::Error> {
        query_as::<Postgres, TimerRecord>(SET_TIMER_ACTIVE_SQL)
            .bind(shop.as_str())
            .bind(timer.into_uuid())
            .bind(is_active)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_timer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        timer: TimerUuid,
    ) -> Result<Option<TimerRecord>, sqlx::Error> {
        query_as::<Postgres, TimerRecord>(DELETE_TIMER_SQL)
            .bind(shop.as_str())
            .bind(timer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_live_timers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        point_in_time: Timestamp,
    ) -> Result<Vec<TimerRecord>, sqlx::Error> {
        query_as::<Postgres, TimerRecord>(LIST_LIVE_TIMERS_SQL)
            .bind(shop.as_str())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn timer_counts(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        shop: &ShopDomain,
        point_in_time: Timestamp,
    ) -> Result<TimerCounts, sqlx::Error> {
        query_as::<Postgres, TimerCounts>(TIMER_STATS_SQL)
            .bind(shop.as_str())
            .bind(SqlxTimestamp::from(point_in_time))
            .fetch_one(&mut **tx)
            .await
    }
}

fn decode_error<E>(column: &str, source: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

impl<'r> FromRow<'r, PgRow> for TimerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let shop: String = row.try_get("shop")?;
        let shop = ShopDomain::parse(&shop).map_err(|e| decode_error("shop", e))?;

        let size: String = row.try_get("display_size")?;
        let size: TimerSize = size.parse().map_err(|e| decode_error("display_size", e))?;

        let position: String = row.try_get("display_position")?;
        let position: TimerPosition = position
            .parse()
            .map_err(|e| decode_error("display_position", e))?;

        let threshold: i16 = row.try_get("urgency_threshold_minutes")?;
        let threshold_minutes = u8::try_from(threshold)
            .map_err(|e| decode_error("urgency_threshold_minutes", e))?;

        Ok(Self {
            uuid: TimerUuid::from_uuid(row.try_get("uuid")?),
            shop,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
            is_active: row.try_get("is_active")?,
            display_options: DisplayOptions {
                color: HexColor::new(row.try_get::<String, _>("display_color")?),
                background_color: HexColor::new(
                    row.try_get::<String, _>("display_background_color")?,
                ),
                text_color: HexColor::new(row.try_get::<String, _>("display_text_color")?),
                size,
                position,
            },
            urgency_settings: UrgencySettings {
                enabled: row.try_get("urgency_enabled")?,
                threshold_minutes,
                pulse_color: HexColor::new(row.try_get::<String, _>("urgency_pulse_color")?),
                show_banner: row.try_get("urgency_show_banner")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
