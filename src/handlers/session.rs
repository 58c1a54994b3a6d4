use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};

use crate::auth::session::{guard_route, resolve_identity, Route};
use crate::dto::{SessionQuery, SessionResponse};
use crate::extract::AppQuery;
use crate::AppState;

pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    AppQuery(query): AppQuery<SessionQuery>,
) -> Json<SessionResponse> {
    let route = Route::parse(query.route.as_deref().unwrap_or(Route::LANDING));
    let identity = resolve_identity(&headers, &state.config);

    Json(SessionResponse {
        authenticated: identity.is_some(),
        user_id: identity.as_ref().map(|u| u.id),
        route: route.path(),
        decision: guard_route(route, identity.is_some()),
    })
}
