use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::context::{ClockQuery, RequestContext};
use crate::dto::{CategoryListResponse, FinancialSummaryResponse};
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::models::financial::{CategoriesQuery, CreateFinancialEntryRequest, EntryType, FinancialEntry};
use crate::repo::load_financial_entries;
use crate::services::aggregation::{category_breakdown, financial_totals};
use crate::services::transactions::record_transaction;
use crate::AppState;

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Json<Vec<FinancialEntry>> {
    Json(load_financial_entries(state.entries.as_ref(), auth_user.id).await)
}

pub async fn create_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(clock): AppQuery<ClockQuery>,
    AppJson(body): AppJson<CreateFinancialEntryRequest>,
) -> AppResult<(StatusCode, Json<FinancialEntry>)> {
    let ctx = RequestContext::from_query(auth_user.id, &clock)?;
    let entry = record_transaction(state.entries.as_ref(), &ctx, body).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(clock): AppQuery<ClockQuery>,
) -> AppResult<Json<FinancialSummaryResponse>> {
    let ctx = RequestContext::from_query(auth_user.id, &clock)?;
    let entries = load_financial_entries(state.entries.as_ref(), ctx.user_id).await;

    Ok(Json(FinancialSummaryResponse {
        totals: financial_totals(&entries, ctx.today()),
        breakdown: category_breakdown(&entries),
    }))
}

pub async fn list_categories(AppQuery(query): AppQuery<CategoriesQuery>) -> Json<CategoryListResponse> {
    let entry_type = query.entry_type.unwrap_or(EntryType::Expense);
    Json(CategoryListResponse {
        entry_type,
        categories: entry_type.categories(),
    })
}
