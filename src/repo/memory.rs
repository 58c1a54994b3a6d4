use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use axum::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::EntryStore;
use crate::error::{AppError, AppResult};
use crate::models::financial::{FinancialEntry, NewFinancialEntry};
use crate::models::mood::{MoodEntry, MoodFields, NewMoodEntry};

/// Vec-backed store for tests. Optionally pins the insertion clock and can be
/// switched to fail every read.
#[derive(Default)]
pub struct MemoryEntryStore {
    mood: Mutex<Vec<MoodEntry>>,
    financial: Mutex<Vec<FinancialEntry>>,
    clock: Option<DateTime<Utc>>,
    failing_reads: AtomicBool,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(now: DateTime<Utc>) -> Self {
        Self {
            clock: Some(now),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.failing_reads.store(fail, Ordering::SeqCst);
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.unwrap_or_else(Utc::now)
    }

    fn check_reads(&self) -> AppResult<()> {
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(AppError::Internal(anyhow::anyhow!("store unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn select_mood_entries(&self, user_id: Uuid) -> AppResult<Vec<MoodEntry>> {
        self.check_reads()?;
        let mut rows: Vec<MoodEntry> = self
            .mood
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn select_financial_entries(&self, user_id: Uuid) -> AppResult<Vec<FinancialEntry>> {
        self.check_reads()?;
        let mut rows: Vec<FinancialEntry> = self
            .financial
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(rows)
    }

    async fn insert_mood_entry(&self, entry: NewMoodEntry) -> AppResult<MoodEntry> {
        let now = self.now();
        let row = MoodEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            mood: entry.fields.mood,
            productivity: entry.fields.productivity,
            task: entry.fields.task,
            notes: entry.fields.notes,
            created_at: now,
            updated_at: now,
        };
        self.mood.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update_mood_entry(
        &self,
        user_id: Uuid,
        id: Uuid,
        fields: MoodFields,
    ) -> AppResult<MoodEntry> {
        let now = self.now();
        let mut rows = self.mood.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|e| e.id == id && e.user_id == user_id)
            .ok_or(AppError::NotFound("Mood entry not found".into()))?;
        row.mood = fields.mood;
        row.productivity = fields.productivity;
        row.task = fields.task;
        row.notes = fields.notes;
        row.updated_at = now;
        Ok(row.clone())
    }

    async fn insert_financial_entry(&self, entry: NewFinancialEntry) -> AppResult<FinancialEntry> {
        let row = FinancialEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            entry_type: entry.entry_type,
            amount: entry.amount,
            description: entry.description,
            category: entry.category,
            date: entry.date,
            created_at: self.now(),
        };
        self.financial.lock().unwrap().push(row.clone());
        Ok(row)
    }
}
