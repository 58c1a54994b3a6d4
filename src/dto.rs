//! # Salud API: Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Field rules are expressed with `validator` derives; cross-field rules
//!   live in `validate_*` helpers

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::auth::jwt::TokenPair;
use crate::auth::session::RouteDecision;
use crate::models::financial::{Category, CategoryDescriptor, EntryType, FinancialEntry};
use crate::models::mood::{Mood, MoodDescriptor, MoodEntry, MoodTaxonomy};
use crate::models::user::UserProfile;
use crate::services::aggregation::{CategoryShare, FinancialTotals, MoodSummary};
use crate::services::calendar::CalendarPeriod;
use crate::services::checkin::CheckInAction;

// ============================================================================
// Common
// ============================================================================

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Auth
// ============================================================================

/// POST /api/auth/signup
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Enter a valid email"))]
    #[validate(length(max = 254, message = "Email too long"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Only checked when non-empty.
    pub confirm_password: Option<String>,

    #[validate(length(max = 100, message = "Name must be under 100 characters"))]
    pub full_name: Option<String>,
}

/// POST /api/auth/login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// POST /api/auth/refresh
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response for signup and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: UserProfile,
}

/// GET /api/session
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    /// Client route being visited. Default "/".
    pub route: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    pub route: &'static str,
    #[serde(flatten)]
    pub decision: RouteDecision,
}

impl SignupRequest {
    pub fn validate_passwords_match(&self) -> Result<(), String> {
        match self.confirm_password.as_deref() {
            Some(confirm) if !confirm.is_empty() && confirm != self.password => {
                Err("Passwords don't match".into())
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Mood
// ============================================================================

/// A stored mood entry with its display mapping attached.
#[derive(Debug, Serialize)]
pub struct MoodEntryView {
    #[serde(flatten)]
    pub entry: MoodEntry,
    pub display: MoodDescriptor,
    /// Calendar day in the caller's offset.
    pub day: NaiveDate,
}

/// POST /api/mood/check-in
#[derive(Debug, Serialize)]
pub struct CheckInResponse {
    pub action: CheckInAction,
    pub entry: MoodEntryView,
    pub summary: MoodSummary,
}

/// GET /api/mood/today
#[derive(Debug, Serialize)]
pub struct TodayResponse {
    pub date: NaiveDate,
    pub entry: Option<MoodEntryView>,
}

/// GET /api/mood/calendar query params
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    #[serde(default)]
    pub period: CalendarPeriod,
}

#[derive(Debug, Serialize)]
pub struct MoodOption {
    pub value: Mood,
    #[serde(flatten)]
    pub display: MoodDescriptor,
}

/// GET /api/mood/taxonomy
#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub taxonomy: MoodTaxonomy,
    pub moods: Vec<MoodOption>,
}

impl TaxonomyResponse {
    pub fn for_taxonomy(taxonomy: MoodTaxonomy) -> Self {
        Self {
            taxonomy,
            moods: taxonomy
                .moods()
                .iter()
                .map(|&m| MoodOption {
                    value: m,
                    display: m.descriptor(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Financial
// ============================================================================

/// GET /api/financial/summary
#[derive(Debug, Serialize)]
pub struct FinancialSummaryResponse {
    pub totals: FinancialTotals,
    pub breakdown: Vec<CategoryShare>,
}

/// GET /api/financial/categories
#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub categories: &'static [CategoryDescriptor],
}

/// A transaction as listed on the dashboard.
#[derive(Debug, Serialize)]
pub struct TransactionView {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub amount: rust_decimal::Decimal,
    pub description: String,
    pub category: Category,
    pub category_label: Option<&'static str>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<&FinancialEntry> for TransactionView {
    fn from(e: &FinancialEntry) -> Self {
        Self {
            id: e.id,
            entry_type: e.entry_type,
            amount: e.amount,
            description: e.description.clone(),
            category: e.category,
            category_label: e.category.descriptor(e.entry_type).map(|d| d.label),
            date: e.date,
            created_at: e.created_at,
        }
    }
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/dashboard
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub mood: MoodSummary,
    pub financial: FinancialTotals,
    /// Last seven moods, newest first, `null` for empty slots.
    pub mood_trend: Vec<Option<MoodOption>>,
    pub recent_moods: Vec<MoodEntryView>,
    pub recent_transactions: Vec<TransactionView>,
}

// ============================================================================
// System
// ============================================================================

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirm: Option<&str>) -> SignupRequest {
        SignupRequest {
            email: "ana@example.com".into(),
            password: password.into(),
            confirm_password: confirm.map(String::from),
            full_name: None,
        }
    }

    #[test]
    fn test_confirm_password_only_checked_when_present() {
        assert!(signup("password123", None).validate_passwords_match().is_ok());
        assert!(signup("password123", Some("")).validate_passwords_match().is_ok());
        assert!(signup("password123", Some("password123")).validate_passwords_match().is_ok());
        assert!(signup("password123", Some("password124")).validate_passwords_match().is_err());
    }

    #[test]
    fn test_signup_field_rules() {
        assert!(signup("password123", None).validate().is_ok());
        assert!(signup("short", None).validate().is_err());

        let mut bad_email = signup("password123", None);
        bad_email.email = "not-an-email".into();
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_calendar_query_defaults_to_week() {
        let q: CalendarQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.period, CalendarPeriod::Week);
        let q: CalendarQuery = serde_json::from_str(r#"{"period":"heatmap"}"#).unwrap();
        assert_eq!(q.period, CalendarPeriod::Heatmap);
    }

    #[test]
    fn test_taxonomy_response_lists_active_set() {
        let resp = TaxonomyResponse::for_taxonomy(MoodTaxonomy::Extended);
        assert_eq!(resp.moods.len(), 7);
        assert_eq!(resp.moods[0].value, Mood::Amazing);

        let json = serde_json::to_value(TaxonomyResponse::for_taxonomy(MoodTaxonomy::Classic)).unwrap();
        assert_eq!(json["moods"][0]["value"], "excited");
        assert_eq!(json["moods"][0]["label"], "Excited");
    }
}
