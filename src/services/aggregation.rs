//! Statistics derived from a user's entry lists.
//!
//! All functions here are pure: they take the loaded entries plus the
//! reference day/instant and are recomputed on every request.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::context::day_key;
use crate::models::financial::{Category, EntryType, FinancialEntry, EXPENSE_CATEGORIES};
use crate::models::mood::{Mood, MoodEntry};

/// Longest run the streak scan looks back over, today included.
pub const STREAK_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FinancialTotals {
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub net_balance: Decimal,
    pub avg_income: Decimal,
    pub avg_expense: Decimal,
    pub this_month: usize,
    /// Percent widths of the income-vs-expenses bars.
    pub income_share: f64,
    pub expense_share: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryShare {
    pub category: Category,
    pub label: &'static str,
    pub color: &'static str,
    pub total: Decimal,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodSummary {
    pub total_entries: usize,
    pub avg_productivity: f64,
    pub this_week: usize,
    pub current_streak: u32,
}

pub fn sum_by_type(entries: &[FinancialEntry], entry_type: EntryType) -> Decimal {
    entries
        .iter()
        .filter(|e| e.entry_type == entry_type)
        .map(|e| e.amount)
        .sum()
}

fn average_by_type(entries: &[FinancialEntry], entry_type: EntryType) -> Decimal {
    let count = entries.iter().filter(|e| e.entry_type == entry_type).count();
    if count == 0 {
        return Decimal::ZERO;
    }
    (sum_by_type(entries, entry_type) / Decimal::from(count)).round_dp(2)
}

fn share(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    (part / whole * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
}

/// Entries whose effective date is in the same month and year as `today`.
pub fn count_in_month(entries: &[FinancialEntry], today: NaiveDate) -> usize {
    entries
        .iter()
        .filter(|e| e.date.month() == today.month() && e.date.year() == today.year())
        .count()
}

pub fn financial_totals(entries: &[FinancialEntry], today: NaiveDate) -> FinancialTotals {
    let total_income = sum_by_type(entries, EntryType::Income);
    let total_expenses = sum_by_type(entries, EntryType::Expense);
    let bar_whole = (total_income + total_expenses).max(Decimal::ONE);

    FinancialTotals {
        total_income,
        total_expenses,
        net_balance: total_income - total_expenses,
        avg_income: average_by_type(entries, EntryType::Income),
        avg_expense: average_by_type(entries, EntryType::Expense),
        this_month: count_in_month(entries, today),
        income_share: share(total_income, bar_whole),
        expense_share: share(total_expenses, bar_whole),
    }
}

/// Expense totals per category, largest first, empty categories dropped.
pub fn category_breakdown(entries: &[FinancialEntry]) -> Vec<CategoryShare> {
    let total_expenses = sum_by_type(entries, EntryType::Expense);

    let mut shares: Vec<CategoryShare> = EXPENSE_CATEGORIES
        .iter()
        .map(|cat| {
            let (total, count) = entries
                .iter()
                .filter(|e| e.entry_type == EntryType::Expense && e.category == cat.value)
                .fold((Decimal::ZERO, 0usize), |(sum, n), e| (sum + e.amount, n + 1));
            CategoryShare {
                category: cat.value,
                label: cat.label,
                color: cat.color,
                total,
                count,
                percentage: share(total, total_expenses),
            }
        })
        .filter(|s| s.total > Decimal::ZERO)
        .collect();

    // stable: equal totals keep taxonomy order
    shares.sort_by(|a, b| b.total.cmp(&a.total));
    shares
}

pub fn average_productivity(entries: &[MoodEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let sum: i64 = entries.iter().map(|e| i64::from(e.productivity)).sum();
    let avg = sum as f64 / entries.len() as f64;
    (avg * 10.0).round() / 10.0
}

/// Entries recorded within the last seven days (rolling, not calendar week).
pub fn count_recent(entries: &[MoodEntry], now: DateTime<Utc>) -> usize {
    let cutoff = now - Duration::days(7);
    entries.iter().filter(|e| e.created_at >= cutoff).count()
}

/// Consecutive days with at least one entry, counting back from today.
/// A day without an entry ends the run, so a missing today yields 0.
pub fn current_streak(entries: &[MoodEntry], today: NaiveDate, offset: FixedOffset) -> u32 {
    let days: HashSet<NaiveDate> = entries
        .iter()
        .map(|e| day_key(e.created_at, offset))
        .collect();

    let mut streak = 0;
    for i in 0..STREAK_WINDOW_DAYS {
        if days.contains(&(today - Duration::days(i))) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

pub fn mood_summary(
    entries: &[MoodEntry],
    now: DateTime<Utc>,
    offset: FixedOffset,
) -> MoodSummary {
    MoodSummary {
        total_entries: entries.len(),
        avg_productivity: average_productivity(entries),
        this_week: count_recent(entries, now),
        current_streak: current_streak(entries, day_key(now, offset), offset),
    }
}

/// Moods of the `len` most recent entries, padded with `None`.
pub fn recent_moods(entries: &[MoodEntry], len: usize) -> Vec<Option<Mood>> {
    let mut trend: Vec<Option<Mood>> = entries.iter().take(len).map(|e| Some(e.mood)).collect();
    trend.resize(len, None);
    trend
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn money(entry_type: EntryType, amount: Decimal, category: Category, date: &str) -> FinancialEntry {
        FinancialEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            entry_type,
            amount,
            description: "entry".into(),
            category,
            date: date.parse().unwrap(),
            created_at: Utc::now(),
        }
    }

    fn mood_at(ts: DateTime<Utc>, productivity: i32) -> MoodEntry {
        MoodEntry {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            mood: Mood::Happy,
            productivity,
            task: "work".into(),
            notes: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_totals_for_simple_ledger() {
        let entries = vec![
            money(EntryType::Income, dec!(100), Category::Salary, "2025-01-01"),
            money(EntryType::Expense, dec!(40), Category::Food, "2025-01-01"),
        ];
        let totals = financial_totals(&entries, "2025-01-15".parse().unwrap());
        assert_eq!(totals.total_income, dec!(100));
        assert_eq!(totals.total_expenses, dec!(40));
        assert_eq!(totals.net_balance, dec!(60));
        assert_eq!(totals.this_month, 2);
    }

    #[test]
    fn test_net_is_exact_difference() {
        let entries = vec![
            money(EntryType::Income, dec!(0.1), Category::Gift, "2025-01-01"),
            money(EntryType::Income, dec!(0.2), Category::Gift, "2025-01-02"),
            money(EntryType::Expense, dec!(0.3), Category::Food, "2025-01-03"),
            money(EntryType::Expense, dec!(19.99), Category::Bills, "2025-01-04"),
            money(EntryType::Income, dec!(1234.56), Category::Salary, "2025-01-05"),
        ];
        let totals = financial_totals(&entries, "2025-01-31".parse().unwrap());
        assert_eq!(totals.total_income - totals.total_expenses, totals.net_balance);
        assert_eq!(totals.net_balance, dec!(1214.57));
    }

    #[test]
    fn test_averages_and_bar_shares() {
        let entries = vec![
            money(EntryType::Income, dec!(300), Category::Salary, "2025-01-01"),
            money(EntryType::Expense, dec!(50), Category::Food, "2025-01-01"),
            money(EntryType::Expense, dec!(50), Category::Transport, "2025-01-01"),
        ];
        let totals = financial_totals(&entries, "2025-01-01".parse().unwrap());
        assert_eq!(totals.avg_income, dec!(300));
        assert_eq!(totals.avg_expense, dec!(50));
        assert!((totals.income_share - 75.0).abs() < 1e-9);
        assert!((totals.expense_share - 25.0).abs() < 1e-9);

        let empty = financial_totals(&[], "2025-01-01".parse().unwrap());
        assert_eq!(empty.avg_income, Decimal::ZERO);
        assert_eq!(empty.income_share, 0.0);
        assert_eq!(empty.expense_share, 0.0);
    }

    #[test]
    fn test_this_month_matches_month_and_year() {
        let entries = vec![
            money(EntryType::Expense, dec!(1), Category::Food, "2025-03-01"),
            money(EntryType::Expense, dec!(1), Category::Food, "2025-03-31"),
            money(EntryType::Expense, dec!(1), Category::Food, "2024-03-15"),
            money(EntryType::Expense, dec!(1), Category::Food, "2025-02-28"),
        ];
        assert_eq!(count_in_month(&entries, "2025-03-10".parse().unwrap()), 2);
    }

    #[test]
    fn test_breakdown_percentages_sum_to_hundred() {
        let entries = vec![
            money(EntryType::Expense, dec!(10), Category::Food, "2025-01-01"),
            money(EntryType::Expense, dec!(20), Category::Bills, "2025-01-01"),
            money(EntryType::Expense, dec!(5), Category::Food, "2025-01-02"),
            money(EntryType::Expense, dec!(3.33), Category::Health, "2025-01-02"),
            money(EntryType::Income, dec!(999), Category::Salary, "2025-01-02"),
        ];
        let breakdown = category_breakdown(&entries);
        assert_eq!(breakdown.len(), 3);
        assert_eq!(breakdown[0].category, Category::Bills);
        assert_eq!(breakdown[1].category, Category::Food);
        assert_eq!(breakdown[1].total, dec!(15));
        assert_eq!(breakdown[1].count, 2);
        assert_eq!(breakdown[2].category, Category::Health);

        let sum: f64 = breakdown.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 0.01, "percentages summed to {}", sum);
    }

    #[test]
    fn test_breakdown_empty_without_expenses() {
        let entries = vec![money(EntryType::Income, dec!(50), Category::Gift, "2025-01-01")];
        assert!(category_breakdown(&entries).is_empty());
        assert!(category_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_breakdown_ties_keep_taxonomy_order() {
        let entries = vec![
            money(EntryType::Expense, dec!(10), Category::Education, "2025-01-01"),
            money(EntryType::Expense, dec!(10), Category::Food, "2025-01-01"),
        ];
        let breakdown = category_breakdown(&entries);
        assert_eq!(breakdown[0].category, Category::Food);
        assert_eq!(breakdown[1].category, Category::Education);
        assert!((breakdown[0].percentage - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_streak_stops_at_first_gap() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let entries = vec![
            mood_at(now, 5),
            mood_at(now - Duration::days(1), 5),
            mood_at(now - Duration::days(2), 5),
            mood_at(now - Duration::days(4), 5),
        ];
        assert_eq!(current_streak(&entries, now.date_naive(), utc()), 3);
    }

    #[test]
    fn test_streak_requires_today() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let entries = vec![mood_at(now - Duration::days(1), 5)];
        assert_eq!(current_streak(&entries, now.date_naive(), utc()), 0);
        assert_eq!(current_streak(&[], now.date_naive(), utc()), 0);
    }

    #[test]
    fn test_streak_capped_at_window() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let entries: Vec<MoodEntry> = (0..45)
            .map(|i| mood_at(now - Duration::days(i), 5))
            .collect();
        assert_eq!(current_streak(&entries, now.date_naive(), utc()), 30);
    }

    #[test]
    fn test_streak_uses_local_day() {
        // 23:30Z on the 9th is already the 10th at +02:00
        let late = Utc.with_ymd_and_hms(2025, 6, 9, 23, 30, 0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let entries = vec![mood_at(late, 5)];
        let local_today = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        assert_eq!(current_streak(&entries, local_today, plus_two), 1);
        assert_eq!(current_streak(&entries, local_today, utc()), 0);
    }

    #[test]
    fn test_mood_summary() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 12, 0, 0).unwrap();
        let entries = vec![
            mood_at(now, 8),
            mood_at(now - Duration::days(1), 7),
            mood_at(now - Duration::days(10), 4),
        ];
        let summary = mood_summary(&entries, now, utc());
        assert_eq!(summary.total_entries, 3);
        assert_eq!(summary.avg_productivity, 6.3);
        assert_eq!(summary.this_week, 2);
        assert_eq!(summary.current_streak, 2);

        let empty = mood_summary(&[], now, utc());
        assert_eq!(empty.avg_productivity, 0.0);
    }

    #[test]
    fn test_recent_moods_pads_to_length() {
        let now = Utc::now();
        let entries = vec![mood_at(now, 5), mood_at(now, 6)];
        let trend = recent_moods(&entries, 7);
        assert_eq!(trend.len(), 7);
        assert_eq!(trend.iter().filter(|m| m.is_some()).count(), 2);
        assert_eq!(trend[0], Some(Mood::Happy));
        assert_eq!(trend[6], None);
    }
}
