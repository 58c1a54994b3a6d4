//! Request-scoped view of "who" and "when".
//!
//! Every data-loading path receives a [`RequestContext`] built from the
//! authenticated identity, the current instant and the caller's UTC offset.
//! Calendar days are derived from it with date-only keys, never by comparing
//! formatted strings.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Offsets in the tz database run from -12:00 to +14:00.
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Default, Deserialize)]
pub struct ClockQuery {
    /// Minutes east of UTC, e.g. 120 for UTC+02:00. Default 0.
    pub tz_offset_minutes: Option<i32>,
}

impl ClockQuery {
    pub fn offset(&self) -> AppResult<FixedOffset> {
        let minutes = self.tz_offset_minutes.unwrap_or(0);
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(AppError::Validation(
                "tz_offset_minutes must be between -840 and 840".into(),
            ));
        }
        FixedOffset::east_opt(minutes * 60)
            .ok_or_else(|| AppError::Validation("Invalid timezone offset".into()))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl RequestContext {
    pub fn new(user_id: Uuid, now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            user_id,
            now,
            offset,
        }
    }

    pub fn from_query(user_id: Uuid, clock: &ClockQuery) -> AppResult<Self> {
        Ok(Self::new(user_id, Utc::now(), clock.offset()?))
    }

    pub fn today(&self) -> NaiveDate {
        day_key(self.now, self.offset)
    }

    pub fn day_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        day_key(ts, self.offset)
    }
}

/// The calendar day `ts` falls on for an observer at `offset`.
pub fn day_key(ts: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    ts.with_timezone(&offset).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_key_crosses_midnight_east() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 9, 23, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(day_key(ts, plus_two), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(
            day_key(ts, FixedOffset::east_opt(0).unwrap()),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );
    }

    #[test]
    fn test_day_key_crosses_midnight_west() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 10, 3, 0, 0).unwrap();
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(day_key(ts, minus_five), NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
    }

    #[test]
    fn test_clock_query_bounds() {
        let ok = ClockQuery {
            tz_offset_minutes: Some(-300),
        };
        assert_eq!(ok.offset().unwrap().local_minus_utc(), -300 * 60);

        let default = ClockQuery::default();
        assert_eq!(default.offset().unwrap().local_minus_utc(), 0);

        let bad = ClockQuery {
            tz_offset_minutes: Some(900),
        };
        assert!(matches!(bad.offset(), Err(AppError::Validation(_))));
    }
}
