// JSON cookie codec
//
// Parsing returns a Result; whether a bad payload falls back to a default is
// decided by the caller.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Malformed cookie {name}: {source}")]
    Malformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cookie {name} could not be encoded: {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Decodes a JSON cookie payload
pub fn parse_json<T: DeserializeOwned>(name: &str, raw: &str) -> Result<T, CookieError> {
    serde_json::from_str(raw).map_err(|source| CookieError::Malformed {
        name: name.to_string(),
        source,
    })
}

/// Reads a JSON cookie from the jar
///
/// Returns `Ok(None)` when the cookie is absent or empty.
pub fn read_json<T: DeserializeOwned>(jar: &CookieJar, name: &str) -> Result<Option<T>, CookieError> {
    match jar.get(name).map(|c| c.value()) {
        None | Some("") => Ok(None),
        Some(raw) => parse_json(name, raw).map(Some),
    }
}

/// Stores `value` as a JSON cookie, replacing any previous value
///
/// Without `max_age` the cookie lasts for the browser session.
pub fn write_json<T: Serialize>(
    jar: CookieJar,
    name: &str,
    value: &T,
    max_age: Option<time::Duration>,
) -> Result<CookieJar, CookieError> {
    let payload = serde_json::to_string(value).map_err(|source| CookieError::Encode {
        name: name.to_string(),
        source,
    })?;

    let mut builder = Cookie::build((name.to_string(), payload))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    if let Some(max_age) = max_age {
        builder = builder.max_age(max_age);
    }

    Ok(jar.add(builder))
}

/// Whether a plain marker cookie is present
pub fn has(jar: &CookieJar, name: &str) -> bool {
    jar.get(name).is_some()
}
