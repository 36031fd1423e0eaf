use crate::sink::PublishError;
use crate::store::StoreError;
use crate::validator::ValidationError;
use http::StatusCode;
use roblox::client::ClientError;
use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T, E = RelayError> = std::result::Result<T, E>;

/// Everything that can abort a startup-log request. Mapped to a response
/// status at the server edge; no component retries internally.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("dedup store error: {0}")]
    Store(#[from] StoreError),

    #[error("enrichment failed: {0}")]
    Lookup(#[from] ClientError),

    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
}

impl RelayError {
    /// Status the error surfaces as. Lookup failures are client errors only
    /// when the id itself was unknown.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Lookup(ClientError::NotFound { .. }) => StatusCode::BAD_REQUEST,
            RelayError::Lookup(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable kind tag for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "validation",
            RelayError::Store(_) => "store",
            RelayError::Lookup(_) => "lookup",
            RelayError::Publish(_) => "publish",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let validation = RelayError::Validation(ValidationError::MissingOriginHeader);
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let not_found = RelayError::Lookup(ClientError::NotFound {
            path: "universes/v1/places/1/universe".into(),
        });
        assert_eq!(not_found.status(), StatusCode::BAD_REQUEST);

        let unauthorized = RelayError::Lookup(ClientError::Unauthorized);
        assert_eq!(unauthorized.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let publish = RelayError::Publish(PublishError::Rejected {
            status: StatusCode::BAD_REQUEST,
            body: "rate limited".into(),
        });
        assert_eq!(publish.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
