use crate::types::{Universe, UniverseIdResponse, User};
use http::StatusCode;
use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://apis.roblox.com";

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("resource not found: {path}")]
    NotFound { path: String },
    #[error("request unauthorized, check the API key")]
    Unauthorized,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {path}: {body}")]
    Status {
        status: StatusCode,
        path: String,
        body: String,
    },
}

/// Authenticated read client for the Open Cloud API.
///
/// One attempt per call, no caching; every lookup revalidates against the
/// live upstream.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Points the client at a different API host, for tests and proxies.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Client {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Resolves the universe a place belongs to.
    pub async fn resolve_universe(&self, place_id: u64) -> Result<u64, ClientError> {
        let response: UniverseIdResponse = self
            .get_json(&format!("universes/v1/places/{place_id}/universe"))
            .await?;

        Ok(response.universe_id)
    }

    pub async fn get_universe(&self, universe_id: u64) -> Result<Universe, ClientError> {
        self.get_json(&format!("cloud/v2/universes/{universe_id}"))
            .await
    }

    pub async fn get_user(&self, user_id: u64) -> Result<User, ClientError> {
        self.get_json(&format!("cloud/v2/users/{user_id}")).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("x-api-key", &self.api_key)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response.json::<T>().await?),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound {
                path: path.to_string(),
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(%status, path, "lookup returned unexpected status");
                Err(ClientError::Status {
                    status,
                    path: path.to_string(),
                    body,
                })
            }
        }
    }
}
