// Amount submission handler

use axum::{extract::State, response::Html, Form};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::error::AppResult;
use crate::handlers::AppState;
use crate::models::SubmitAmountForm;
use crate::services::{dates, submission_service, visitor_service};
use crate::views::{render_page, PageView};

/// Handler for POST /submit - Stores the visitor's amount and shows the confirmation
pub async fn submit_amount(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<SubmitAmountForm>,
) -> AppResult<(CookieJar, Html<String>)> {
    let (jar, visit) = visitor_service::track_visit(&state.config, jar, Utc::now())?;
    let (jar, record) =
        submission_service::submit_amount(&state, jar, &visit.profile, &form.amount).await?;

    let view = PageView {
        first_time: visit.first_time,
        amount: Some(record.amount),
        results_date: dates::tomorrow_pretty(),
        results_time: state.config.results_time.clone(),
    };

    Ok((jar, Html(render_page(&view))))
}
