use http::HeaderMap;
use http::header::USER_AGENT;

/// Header carrying the place id of the reporting game server.
pub const ORIGIN_HEADER: &str = "Roblox-Id";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing {ORIGIN_HEADER} header, only requests from game servers are accepted")]
    MissingOriginHeader,
    #[error("user agent does not match the expected platform signature")]
    UntrustedOrigin,
    #[error("could not parse place id as a positive integer: {0:?}")]
    MalformedPlaceId(String),
    #[error("could not parse request body: {0}")]
    InvalidBody(String),
}

/// Checks that the request originates from a game server and extracts the
/// place id. Pure function of the request metadata.
pub fn validate(
    headers: &HeaderMap,
    expected_agent: Option<&str>,
) -> Result<u64, ValidationError> {
    let value = headers
        .get(ORIGIN_HEADER)
        .ok_or(ValidationError::MissingOriginHeader)?;
    let raw = value
        .to_str()
        .map_err(|_| ValidationError::MalformedPlaceId("<non-ascii>".into()))?;
    if raw.is_empty() {
        return Err(ValidationError::MissingOriginHeader);
    }

    if let Some(expected) = expected_agent {
        let agent = headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !agent.starts_with(expected) {
            return Err(ValidationError::UntrustedOrigin);
        }
    }

    match raw.parse::<u64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::MalformedPlaceId(raw.to_string())),
    }
}
