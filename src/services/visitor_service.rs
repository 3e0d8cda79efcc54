// Visitor tracking through the profile cookie

use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};

use crate::config::AppConfig;
use crate::cookies::{self, CookieError};
use crate::models::VisitorProfile;

pub const PROFILE_COOKIE: &str = "user_profile";
pub const VISIT_MARKER_COOKIE: &str = "visit_logged";

/// Profile of the current visitor after this request's visit is counted
#[derive(Debug, Clone)]
pub struct Visit {
    pub profile: VisitorProfile,
    pub first_time: bool,
}

/// Reads the visitor profile cookie, creating or updating it as needed
///
/// A missing or unreadable profile starts a new one. An existing profile has
/// its visit counted once per browser session, tracked by a session cookie.
pub fn track_visit(
    config: &AppConfig,
    jar: CookieJar,
    now: DateTime<Utc>,
) -> Result<(CookieJar, Visit), CookieError> {
    let profile_name = config.cookie_name(PROFILE_COOKIE);
    let marker_name = config.cookie_name(VISIT_MARKER_COOKIE);

    let existing = cookies::read_json::<VisitorProfile>(&jar, &profile_name).unwrap_or_else(|e| {
        tracing::warn!("Ignoring profile cookie: {}", e);
        None
    });

    match existing {
        None => {
            let profile = VisitorProfile::new(now);
            tracing::info!("New visitor {}", profile.user_id);
            let jar = cookies::write_json(jar, &profile_name, &profile, Some(time::Duration::days(365)))?;
            let jar = cookies::write_json(jar, &marker_name, &true, None)?;
            Ok((
                jar,
                Visit {
                    profile,
                    first_time: true,
                },
            ))
        }
        Some(mut profile) => {
            let mut jar = jar;
            if !cookies::has(&jar, &marker_name) {
                profile.record_visit(now);
                tracing::debug!("Visit {} for {}", profile.visits, profile.user_id);
                jar = cookies::write_json(jar, &profile_name, &profile, Some(time::Duration::days(365)))?;
                jar = cookies::write_json(jar, &marker_name, &true, None)?;
            }
            Ok((
                jar,
                Visit {
                    profile,
                    first_time: false,
                },
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Cookie;
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            profiles_csv_path: PathBuf::from("unused.csv"),
            cookie_prefix: "t_".to_string(),
            results_time: "12:00 EDT".to_string(),
        }
    }

    fn t(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_first_visit_creates_profile() {
        let (jar, visit) = track_visit(&config(), CookieJar::new(), t(19)).unwrap();

        assert!(visit.first_time);
        assert_eq!(visit.profile.visits, 1);
        assert_eq!(visit.profile.first_seen, t(19));
        let stored: VisitorProfile = cookies::read_json(&jar, "t_user_profile").unwrap().unwrap();
        assert_eq!(stored, visit.profile);
        assert!(cookies::has(&jar, "t_visit_logged"));
    }

    #[test]
    fn test_new_session_counts_one_visit() {
        let (jar, first) = track_visit(&config(), CookieJar::new(), t(19)).unwrap();
        let jar = jar.remove(Cookie::from("t_visit_logged"));

        let (jar, second) = track_visit(&config(), jar, t(20)).unwrap();
        assert!(!second.first_time);
        assert_eq!(second.profile.user_id, first.profile.user_id);
        assert_eq!(second.profile.visits, 2);
        assert_eq!(second.profile.first_seen, t(19));
        assert_eq!(second.profile.last_seen, t(20));

        // Same session: no further counting
        let (_, third) = track_visit(&config(), jar, t(21)).unwrap();
        assert_eq!(third.profile.visits, 2);
        assert_eq!(third.profile.last_seen, t(20));
    }

    #[test]
    fn test_malformed_profile_starts_over() {
        let jar = CookieJar::new().add(Cookie::new("t_user_profile", "garbage"));

        let (_, visit) = track_visit(&config(), jar, t(19)).unwrap();

        assert!(visit.first_time);
        assert_eq!(visit.profile.visits, 1);
    }
}
