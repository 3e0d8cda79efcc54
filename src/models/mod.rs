// Profile records, cookie payloads and request models
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Column order of the profiles table
pub const PROFILE_COLUMNS: [&str; 5] = ["user_id", "first_seen", "last_seen", "visits", "amount"];

/// Serde adapter writing timestamps as `2025-10-19T14:03:07+00:00`
pub mod iso_seconds {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, false))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

fn default_visits() -> u64 {
    1
}

/// Accepts a visit count written as an integer, a whole float or a numeric string
fn deserialize_visits<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Int(u64),
        Float(f64),
        Text(String),
    }

    let value = match Count::deserialize(deserializer)? {
        Count::Int(n) => return Ok(n),
        Count::Float(f) => f,
        Count::Text(s) => {
            let s = s.trim();
            match s.parse::<u64>() {
                Ok(n) => return Ok(n),
                Err(_) => s.parse::<f64>().map_err(serde::de::Error::custom)?,
            }
        }
    };

    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(serde::de::Error::custom(format!("invalid visit count {}", value)))
    }
}

/// Visitor identity and visit history, carried in the `user_profile` cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorProfile {
    pub user_id: String,
    #[serde(with = "iso_seconds")]
    pub first_seen: DateTime<Utc>,
    #[serde(with = "iso_seconds")]
    pub last_seen: DateTime<Utc>,
    #[serde(default = "default_visits", deserialize_with = "deserialize_visits")]
    pub visits: u64,
}

impl VisitorProfile {
    /// Creates a profile for a first-time visitor
    pub fn new(now: DateTime<Utc>) -> Self {
        let now = truncate_to_seconds(now);
        Self {
            user_id: Uuid::new_v4().to_string(),
            first_seen: now,
            last_seen: now,
            visits: 1,
        }
    }

    /// Records one more visit at `now`
    pub fn record_visit(&mut self, now: DateTime<Utc>) {
        self.visits = self.visits.saturating_add(1);
        self.last_seen = truncate_to_seconds(now);
    }
}

/// One row of the profiles table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: String,
    #[serde(with = "iso_seconds")]
    pub first_seen: DateTime<Utc>,
    #[serde(with = "iso_seconds")]
    pub last_seen: DateTime<Utc>,
    pub visits: u64,
    pub amount: f64,
}

impl ProfileRecord {
    /// Builds the row stored for a visitor's submitted amount
    pub fn from_profile(profile: &VisitorProfile, amount: f64) -> Self {
        Self {
            user_id: profile.user_id.clone(),
            first_seen: profile.first_seen,
            last_seen: profile.last_seen,
            visits: profile.visits,
            amount,
        }
    }
}

// Stored timestamps carry whole seconds only
fn truncate_to_seconds(now: DateTime<Utc>) -> DateTime<Utc> {
    now.with_nanosecond(0).unwrap_or(now)
}

/// Form body for POST /submit
#[derive(Debug, Deserialize)]
pub struct SubmitAmountForm {
    pub amount: String,
}
