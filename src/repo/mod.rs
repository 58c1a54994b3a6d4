//! Owner-scoped persistence for mood and financial entries.
//!
//! Reads go through [`load_mood_entries`] / [`load_financial_entries`], which
//! never fail: a store error is logged and the caller sees an empty list.
//! Writes propagate their error so the handler can report it.

use axum::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::financial::{FinancialEntry, NewFinancialEntry};
use crate::models::mood::{MoodEntry, MoodFields, NewMoodEntry};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgEntryStore;

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Newest first by `created_at`.
    async fn select_mood_entries(&self, user_id: Uuid) -> AppResult<Vec<MoodEntry>>;

    /// Newest first by `date`, then `created_at`.
    async fn select_financial_entries(&self, user_id: Uuid) -> AppResult<Vec<FinancialEntry>>;

    async fn insert_mood_entry(&self, entry: NewMoodEntry) -> AppResult<MoodEntry>;

    /// Overwrites the editable fields of an entry the user owns.
    async fn update_mood_entry(
        &self,
        user_id: Uuid,
        id: Uuid,
        fields: MoodFields,
    ) -> AppResult<MoodEntry>;

    async fn insert_financial_entry(&self, entry: NewFinancialEntry) -> AppResult<FinancialEntry>;
}

pub async fn load_mood_entries(store: &dyn EntryStore, user_id: Uuid) -> Vec<MoodEntry> {
    match store.select_mood_entries(user_id).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Error loading mood entries");
            Vec::new()
        }
    }
}

pub async fn load_financial_entries(store: &dyn EntryStore, user_id: Uuid) -> Vec<FinancialEntry> {
    match store.select_financial_entries(user_id).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Error loading financial entries");
            Vec::new()
        }
    }
}
