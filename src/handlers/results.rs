// Yesterday's results handler

use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::cookies;
use crate::error::AppResult;
use crate::handlers::AppState;
use crate::models::VisitorProfile;
use crate::services::visitor_service::PROFILE_COOKIE;
use crate::views::render_results;

/// Handler for GET /results - Shows the visitor's stored amount
pub async fn get_results(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<Html<String>> {
    let profile_name = state.config.cookie_name(PROFILE_COOKIE);
    let profile = cookies::read_json::<VisitorProfile>(&jar, &profile_name).unwrap_or_else(|e| {
        tracing::warn!("Ignoring profile cookie: {}", e);
        None
    });

    let stored_amount = match profile {
        Some(profile) => state
            .repositories
            .profile
            .find(&profile.user_id)
            .await?
            .map(|record| record.amount),
        None => None,
    };

    Ok(Html(render_results(stored_amount)))
}
