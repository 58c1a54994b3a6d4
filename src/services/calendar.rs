//! Calendar and heatmap grids over mood entries.

use std::collections::HashMap;

use chrono::{Datelike, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::context::day_key;
use crate::models::mood::{Mood, MoodEntry};

pub const HEATMAP_WEEKS: usize = 12;
const DAYS_PER_WEEK: usize = 7;
const MONTH_GRID_DAYS: i64 = 42;
const ROLLING_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CalendarPeriod {
    /// Sunday through Saturday of the current week.
    #[default]
    Week,
    /// Six full weeks covering the current month.
    Month,
    /// The 30 days ending today.
    All,
    /// Twelve week-columns ending today.
    Heatmap,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CellEntry {
    pub id: Uuid,
    pub mood: Mood,
    pub label: &'static str,
    pub color: &'static str,
    pub emoji: &'static str,
    pub productivity: i32,
    pub task: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_future: bool,
    pub in_current_month: bool,
    pub entry: Option<CellEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarView {
    pub period: CalendarPeriod,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub cells: Vec<CalendarCell>,
    /// Heatmap only: one inner vec per week, seven cells each.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Vec<CalendarCell>>>,
}

fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

fn span(start: NaiveDate, days: i64) -> Vec<NaiveDate> {
    (0..days).map(|i| start + Duration::days(i)).collect()
}

/// Dates shown for `period`, oldest first.
pub fn calendar_dates(period: CalendarPeriod, today: NaiveDate) -> Vec<NaiveDate> {
    match period {
        CalendarPeriod::Week => span(sunday_on_or_before(today), DAYS_PER_WEEK as i64),
        CalendarPeriod::Month => {
            let first = today - Duration::days(i64::from(today.day0()));
            span(sunday_on_or_before(first), MONTH_GRID_DAYS)
        }
        CalendarPeriod::All => span(today - Duration::days(ROLLING_DAYS - 1), ROLLING_DAYS),
        CalendarPeriod::Heatmap => {
            let days = (HEATMAP_WEEKS * DAYS_PER_WEEK) as i64;
            span(today - Duration::days(days - 1), days)
        }
    }
}

/// First entry per local day in list order. Lists arrive newest first, so a
/// stray duplicate day resolves to the most recent entry.
pub fn index_by_day(entries: &[MoodEntry], offset: FixedOffset) -> HashMap<NaiveDate, &MoodEntry> {
    let mut by_day = HashMap::with_capacity(entries.len());
    for entry in entries {
        by_day.entry(day_key(entry.created_at, offset)).or_insert(entry);
    }
    by_day
}

pub fn build_calendar(
    period: CalendarPeriod,
    today: NaiveDate,
    entries: &[MoodEntry],
    offset: FixedOffset,
) -> CalendarView {
    let dates = calendar_dates(period, today);
    let by_day = index_by_day(entries, offset);

    let cells: Vec<CalendarCell> = dates
        .iter()
        .map(|&date| CalendarCell {
            date,
            is_today: date == today,
            is_future: date > today,
            in_current_month: date.month() == today.month() && date.year() == today.year(),
            entry: by_day.get(&date).map(|e| {
                let d = e.mood.descriptor();
                CellEntry {
                    id: e.id,
                    mood: e.mood,
                    label: d.label,
                    color: d.color,
                    emoji: d.emoji,
                    productivity: e.productivity,
                    task: e.task.clone(),
                }
            }),
        })
        .collect();

    let columns = (period == CalendarPeriod::Heatmap).then(|| {
        cells
            .chunks(DAYS_PER_WEEK)
            .map(|week| week.to_vec())
            .collect()
    });

    CalendarView {
        period,
        start: dates.first().copied().unwrap_or(today),
        end: dates.last().copied().unwrap_or(today),
        cells,
        columns,
    }
}
