// Amount submission: cookie plus profile table upsert

use axum_extra::extract::cookie::CookieJar;

use crate::cookies;
use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::models::{ProfileRecord, VisitorProfile};

pub const AMOUNT_COOKIE: &str = "amount";

/// Amount previously submitted from this browser, if any
///
/// An unreadable cookie counts as no submission.
pub fn submitted_amount(state: &AppState, jar: &CookieJar) -> Option<f64> {
    let name = state.config.cookie_name(AMOUNT_COOKIE);
    cookies::read_json::<f64>(jar, &name).unwrap_or_else(|e| {
        tracing::warn!("Ignoring amount cookie: {}", e);
        None
    })
}

/// Parses a submitted dollar amount: a finite number, zero or more
pub fn parse_amount(raw: &str) -> AppResult<f64> {
    let amount = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::InvalidRequest(format!("'{}' is not a number", raw.trim())))?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(AppError::InvalidRequest(format!(
            "amount must be a finite number of at least 0, got {}",
            amount
        )));
    }

    Ok(amount)
}

/// Records the visitor's amount for today
///
/// Stores it in the amount cookie (valid for one day) and upserts the
/// visitor's row in the profiles table.
pub async fn submit_amount(
    state: &AppState,
    jar: CookieJar,
    profile: &VisitorProfile,
    raw_amount: &str,
) -> AppResult<(CookieJar, ProfileRecord)> {
    if let Some(previous) = submitted_amount(state, &jar) {
        return Err(AppError::AlreadySubmitted(format!(
            "an amount of {:.2} was already submitted today",
            previous
        )));
    }

    let amount = parse_amount(raw_amount)?;

    let name = state.config.cookie_name(AMOUNT_COOKIE);
    let jar = cookies::write_json(jar, &name, &amount, Some(time::Duration::days(1)))?;
    let record = state.repositories.profile.upsert(profile, amount).await?;

    tracing::info!("Recorded amount {:.2} for {}", amount, profile.user_id);
    Ok((jar, record))
}
