use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::EntryStore;
use crate::error::{AppError, AppResult};
use crate::models::financial::{FinancialEntry, NewFinancialEntry};
use crate::models::mood::{MoodEntry, MoodFields, NewMoodEntry};

#[derive(Clone)]
pub struct PgEntryStore {
    db: PgPool,
}

impl PgEntryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EntryStore for PgEntryStore {
    async fn select_mood_entries(&self, user_id: Uuid) -> AppResult<Vec<MoodEntry>> {
        let entries = sqlx::query_as::<_, MoodEntry>(
            r#"
            SELECT id, user_id, mood, productivity, task, notes, created_at, updated_at
            FROM mood_entries
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn select_financial_entries(&self, user_id: Uuid) -> AppResult<Vec<FinancialEntry>> {
        let entries = sqlx::query_as::<_, FinancialEntry>(
            r#"
            SELECT id, user_id, entry_type, amount, description, category, date, created_at
            FROM financial_entries
            WHERE user_id = $1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn insert_mood_entry(&self, entry: NewMoodEntry) -> AppResult<MoodEntry> {
        let row = sqlx::query_as::<_, MoodEntry>(
            r#"
            INSERT INTO mood_entries (id, user_id, mood, productivity, task, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, mood, productivity, task, notes, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(entry.fields.mood)
        .bind(entry.fields.productivity)
        .bind(&entry.fields.task)
        .bind(&entry.fields.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }

    async fn update_mood_entry(
        &self,
        user_id: Uuid,
        id: Uuid,
        fields: MoodFields,
    ) -> AppResult<MoodEntry> {
        sqlx::query_as::<_, MoodEntry>(
            r#"
            UPDATE mood_entries SET
                mood = $3,
                productivity = $4,
                task = $5,
                notes = $6,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, mood, productivity, task, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(fields.mood)
        .bind(fields.productivity)
        .bind(&fields.task)
        .bind(&fields.notes)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound("Mood entry not found".into()))
    }

    async fn insert_financial_entry(&self, entry: NewFinancialEntry) -> AppResult<FinancialEntry> {
        let row = sqlx::query_as::<_, FinancialEntry>(
            r#"
            INSERT INTO financial_entries (id, user_id, entry_type, amount, description, category, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, entry_type, amount, description, category, date, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(entry.entry_type)
        .bind(entry.amount)
        .bind(&entry.description)
        .bind(entry.category)
        .bind(entry.date)
        .fetch_one(&self.db)
        .await?;

        Ok(row)
    }
}
