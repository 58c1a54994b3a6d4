//! Daily mood check-in: one entry per local day, resubmits overwrite it.
//!
//! The lookup and the write are separate store calls with no transaction
//! around them. Two submissions racing on the same day can both insert.

use serde::Serialize;
use validator::Validate;

use crate::context::RequestContext;
use crate::error::{AppError, AppResult};
use crate::models::mood::{CheckInRequest, MoodEntry, MoodFields, MoodTaxonomy, NewMoodEntry};
use crate::repo::EntryStore;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckInAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckInOutcome {
    pub action: CheckInAction,
    pub entry: MoodEntry,
}

pub fn validate_check_in(req: CheckInRequest, taxonomy: MoodTaxonomy) -> AppResult<MoodFields> {
    req.validate()?;

    if !taxonomy.contains(req.mood) {
        return Err(AppError::Validation(format!(
            "Mood '{}' is not one of: {}",
            req.mood,
            taxonomy
                .moods()
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let task = req.task.trim().to_string();
    if task.is_empty() {
        return Err(AppError::Validation("Task is required".into()));
    }

    let notes = req
        .notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok(MoodFields {
        mood: req.mood,
        productivity: req.productivity,
        task,
        notes,
    })
}

/// The entry recorded on the caller's local today, if any. First match wins.
pub fn todays_entry<'a>(entries: &'a [MoodEntry], ctx: &RequestContext) -> Option<&'a MoodEntry> {
    let today = ctx.today();
    entries.iter().find(|e| ctx.day_of(e.created_at) == today)
}

pub async fn submit_check_in(
    store: &dyn EntryStore,
    ctx: &RequestContext,
    taxonomy: MoodTaxonomy,
    req: CheckInRequest,
) -> AppResult<CheckInOutcome> {
    let fields = validate_check_in(req, taxonomy)?;

    let existing = store.select_mood_entries(ctx.user_id).await?;

    let outcome = match todays_entry(&existing, ctx) {
        Some(entry) => {
            let entry = store
                .update_mood_entry(ctx.user_id, entry.id, fields)
                .await?;
            CheckInOutcome {
                action: CheckInAction::Updated,
                entry,
            }
        }
        None => {
            let entry = store
                .insert_mood_entry(NewMoodEntry {
                    user_id: ctx.user_id,
                    fields,
                })
                .await?;
            CheckInOutcome {
                action: CheckInAction::Created,
                entry,
            }
        }
    };

    tracing::info!(
        user_id = %ctx.user_id,
        entry_id = %outcome.entry.id,
        action = ?outcome.action,
        "Mood check-in saved"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::mood::Mood;
    use crate::repo::memory::MemoryEntryStore;
    use chrono::{Duration, FixedOffset, TimeZone, Utc};
    use uuid::Uuid;

    fn request(mood: Mood, productivity: i32, task: &str) -> CheckInRequest {
        CheckInRequest {
            mood,
            productivity,
            task: task.into(),
            notes: None,
        }
    }

    fn ctx_at(now: chrono::DateTime<Utc>) -> RequestContext {
        RequestContext::new(Uuid::new_v4(), now, FixedOffset::east_opt(0).unwrap())
    }

    #[tokio::test]
    async fn test_first_check_in_creates_entry() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap();
        let store = MemoryEntryStore::with_clock(now);
        let ctx = ctx_at(now);

        let outcome = submit_check_in(&store, &ctx, MoodTaxonomy::Classic, request(Mood::Happy, 7, "Gym"))
            .await
            .unwrap();

        assert_eq!(outcome.action, CheckInAction::Created);
        assert_eq!(outcome.entry.user_id, ctx.user_id);
        assert_eq!(store.select_mood_entries(ctx.user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_second_check_in_same_day_updates_in_place() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap();
        let store = MemoryEntryStore::with_clock(now);
        let ctx = ctx_at(now);

        let first = submit_check_in(&store, &ctx, MoodTaxonomy::Classic, request(Mood::Happy, 7, "Gym"))
            .await
            .unwrap();

        let mut again = request(Mood::Stressed, 3, "Deadline");
        again.notes = Some("long day".into());
        let ctx_later = RequestContext::new(ctx.user_id, now + Duration::hours(8), ctx.offset);
        let second = submit_check_in(&store, &ctx_later, MoodTaxonomy::Classic, again)
            .await
            .unwrap();

        assert_eq!(second.action, CheckInAction::Updated);
        assert_eq!(second.entry.id, first.entry.id);
        assert_eq!(second.entry.mood, Mood::Stressed);
        assert_eq!(second.entry.productivity, 3);
        assert_eq!(second.entry.task, "Deadline");
        assert_eq!(second.entry.notes.as_deref(), Some("long day"));

        let entries = store.select_mood_entries(ctx.user_id).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_check_in_next_day_creates_new_entry() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap();
        let store = MemoryEntryStore::with_clock(now);
        let ctx = ctx_at(now);
        submit_check_in(&store, &ctx, MoodTaxonomy::Classic, request(Mood::Happy, 7, "Gym"))
            .await
            .unwrap();

        let tomorrow = now + Duration::days(1);
        let store_entries = store.select_mood_entries(ctx.user_id).await.unwrap();
        let ctx_tomorrow = RequestContext::new(ctx.user_id, tomorrow, ctx.offset);
        assert!(todays_entry(&store_entries, &ctx_tomorrow).is_none());

        let outcome = submit_check_in(&store, &ctx_tomorrow, MoodTaxonomy::Classic, request(Mood::Sad, 4, "Rest"))
            .await
            .unwrap();
        assert_eq!(outcome.action, CheckInAction::Created);
        assert_eq!(store.select_mood_entries(ctx.user_id).await.unwrap().len(), 2);
    }

    #[test]
    fn test_validation_rules() {
        assert!(validate_check_in(request(Mood::Happy, 0, "x"), MoodTaxonomy::Classic).is_err());
        assert!(validate_check_in(request(Mood::Happy, 11, "x"), MoodTaxonomy::Classic).is_err());
        assert!(validate_check_in(request(Mood::Happy, 5, ""), MoodTaxonomy::Classic).is_err());
        assert!(validate_check_in(request(Mood::Happy, 5, "   "), MoodTaxonomy::Classic).is_err());
        assert!(validate_check_in(request(Mood::Great, 5, "x"), MoodTaxonomy::Classic).is_err());
        assert!(validate_check_in(request(Mood::Great, 5, "x"), MoodTaxonomy::Extended).is_ok());

        let mut with_blank_notes = request(Mood::Neutral, 1, " Read ");
        with_blank_notes.notes = Some("   ".into());
        let fields = validate_check_in(with_blank_notes, MoodTaxonomy::Classic).unwrap();
        assert_eq!(fields.task, "Read");
        assert_eq!(fields.notes, None);
    }

    #[tokio::test]
    async fn test_read_failure_is_reported_not_duplicated() {
        let now = Utc.with_ymd_and_hms(2025, 6, 10, 9, 0, 0).unwrap();
        let store = MemoryEntryStore::with_clock(now);
        let ctx = ctx_at(now);
        store.fail_reads(true);

        let result = submit_check_in(&store, &ctx, MoodTaxonomy::Classic, request(Mood::Happy, 7, "Gym")).await;
        assert!(result.is_err());

        store.fail_reads(false);
        assert!(store.select_mood_entries(ctx.user_id).await.unwrap().is_empty());
    }
}
