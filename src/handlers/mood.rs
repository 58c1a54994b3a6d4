use axum::{
    extract::State,
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::context::{ClockQuery, RequestContext};
use crate::dto::{CalendarQuery, CheckInResponse, MoodEntryView, TaxonomyResponse, TodayResponse};
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::models::mood::{CheckInRequest, MoodEntry};
use crate::repo::load_mood_entries;
use crate::services::aggregation::{mood_summary, MoodSummary};
use crate::services::calendar::{build_calendar, CalendarView};
use crate::services::checkin::{submit_check_in, todays_entry};
use crate::AppState;

pub(crate) fn entry_view(entry: MoodEntry, ctx: &RequestContext) -> MoodEntryView {
    MoodEntryView {
        display: entry.mood.descriptor(),
        day: ctx.day_of(entry.created_at),
        entry,
    }
}

pub async fn list_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(clock): AppQuery<ClockQuery>,
) -> AppResult<Json<Vec<MoodEntryView>>> {
    let ctx = RequestContext::from_query(auth_user.id, &clock)?;
    let entries = load_mood_entries(state.entries.as_ref(), ctx.user_id).await;

    Ok(Json(
        entries.into_iter().map(|e| entry_view(e, &ctx)).collect(),
    ))
}

/// Today's entry, so the check-in form can prefill.
pub async fn get_today(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(clock): AppQuery<ClockQuery>,
) -> AppResult<Json<TodayResponse>> {
    let ctx = RequestContext::from_query(auth_user.id, &clock)?;
    let entries = load_mood_entries(state.entries.as_ref(), ctx.user_id).await;

    Ok(Json(TodayResponse {
        date: ctx.today(),
        entry: todays_entry(&entries, &ctx).cloned().map(|e| entry_view(e, &ctx)),
    }))
}

pub async fn check_in(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(clock): AppQuery<ClockQuery>,
    AppJson(body): AppJson<CheckInRequest>,
) -> AppResult<Json<CheckInResponse>> {
    let ctx = RequestContext::from_query(auth_user.id, &clock)?;
    let outcome = submit_check_in(
        state.entries.as_ref(),
        &ctx,
        state.config.mood_taxonomy,
        body,
    )
    .await?;

    // reload so the summary reflects the write
    let entries = load_mood_entries(state.entries.as_ref(), ctx.user_id).await;

    Ok(Json(CheckInResponse {
        action: outcome.action,
        entry: entry_view(outcome.entry, &ctx),
        summary: mood_summary(&entries, ctx.now, ctx.offset),
    }))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(clock): AppQuery<ClockQuery>,
    AppQuery(query): AppQuery<CalendarQuery>,
) -> AppResult<Json<CalendarView>> {
    let ctx = RequestContext::from_query(auth_user.id, &clock)?;
    let entries = load_mood_entries(state.entries.as_ref(), ctx.user_id).await;

    Ok(Json(build_calendar(
        query.period,
        ctx.today(),
        &entries,
        ctx.offset,
    )))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    AppQuery(clock): AppQuery<ClockQuery>,
) -> AppResult<Json<MoodSummary>> {
    let ctx = RequestContext::from_query(auth_user.id, &clock)?;
    let entries = load_mood_entries(state.entries.as_ref(), ctx.user_id).await;
    Ok(Json(mood_summary(&entries, ctx.now, ctx.offset)))
}

pub async fn get_taxonomy(State(state): State<AppState>) -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse::for_taxonomy(state.config.mood_taxonomy))
}
