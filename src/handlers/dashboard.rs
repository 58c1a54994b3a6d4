use axum::{
    extract::State,
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::context::{ClockQuery, RequestContext};
use crate::dto::{DashboardResponse, MoodOption, TransactionView};
use crate::error::AppResult;
use crate::extract::AppQuery;
use crate::handlers::mood::entry_view;
use crate::repo::{load_financial_entries, load_mood_entries};
use crate::services::aggregation::{financial_totals, mood_summary, recent_moods};
use crate::AppState;

const TREND_LEN: usize = 7;
const RECENT_LEN: usize = 5;

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(clock): AppQuery<ClockQuery>,
) -> AppResult<Json<DashboardResponse>> {
    let ctx = RequestContext::from_query(auth_user.id, &clock)?;
    let store = state.entries.as_ref();

    let moods = load_mood_entries(store, ctx.user_id).await;
    let transactions = load_financial_entries(store, ctx.user_id).await;

    let mood_trend = recent_moods(&moods, TREND_LEN)
        .into_iter()
        .map(|slot| {
            slot.map(|m| MoodOption {
                value: m,
                display: m.descriptor(),
            })
        })
        .collect();

    Ok(Json(DashboardResponse {
        mood: mood_summary(&moods, ctx.now, ctx.offset),
        financial: financial_totals(&transactions, ctx.today()),
        mood_trend,
        recent_transactions: transactions.iter().take(RECENT_LEN).map(TransactionView::from).collect(),
        recent_moods: moods
            .into_iter()
            .take(RECENT_LEN)
            .map(|e| entry_view(e, &ctx))
            .collect(),
    }))
}
