// Landing page handler

use axum::{extract::State, response::Html};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::error::AppResult;
use crate::handlers::AppState;
use crate::services::{dates, submission_service, visitor_service};
use crate::views::{render_page, PageView};

/// Handler for GET / - Counts the visit and renders the game page
pub async fn get_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, visit) = visitor_service::track_visit(&state.config, jar, Utc::now())?;
    let amount = submission_service::submitted_amount(&state, &jar);

    let view = PageView {
        first_time: visit.first_time,
        amount,
        results_date: dates::tomorrow_pretty(),
        results_time: state.config.results_time.clone(),
    };

    Ok((jar, Html(render_page(&view))))
}
