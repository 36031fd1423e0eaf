use crate::counter;
use crate::errors::Result;
use crate::event::StartupEvent;
use crate::message::EnrichedMessage;
use crate::metrics_defs::{STARTUP_LOGS_DUPLICATE, STARTUP_LOGS_RECORDED};
use crate::sink::NotificationSink;
use crate::store::DedupStore;
use crate::validator::{self, ValidationError};
use async_trait::async_trait;
use http::HeaderMap;
use roblox::client::{Client, ClientError};
use roblox::types::{Universe, User};
use std::sync::Arc;
use std::time::Duration;

/// Dedup records outlive any realistic re-announce window.
pub const DEDUP_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

const KEY_NAMESPACE: &str = "xenpos:startuplogs";

/// Store key for a startup event. Deterministic over the place id so
/// platform-side redelivery reproduces the same key.
pub fn dedup_key(place_id: u64) -> String {
    format!("{KEY_NAMESPACE}:placeid:{place_id}")
}

/// Read access to the platform directory, behind a trait so tests can
/// substitute fakes.
#[async_trait]
pub trait GameDirectory: Send + Sync {
    async fn resolve_universe(&self, place_id: u64) -> Result<u64, ClientError>;
    async fn fetch_universe(&self, universe_id: u64) -> Result<Universe, ClientError>;
    async fn fetch_user(&self, user_id: u64) -> Result<User, ClientError>;
}

#[async_trait]
impl GameDirectory for roblox::client::Client {
    async fn resolve_universe(&self, place_id: u64) -> Result<u64, ClientError> {
        Client::resolve_universe(self, place_id).await
    }

    async fn fetch_universe(&self, universe_id: u64) -> Result<Universe, ClientError> {
        self.get_universe(universe_id).await
    }

    async fn fetch_user(&self, user_id: u64) -> Result<User, ClientError> {
        self.get_user(user_id).await
    }
}

/// Terminal outcomes surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// First sighting: the notification was published and recorded.
    Recorded,
    /// The key was already present; nothing was looked up or published.
    AlreadyRegistered,
}

/// Per-request dedup + enrichment pipeline.
///
/// Each request runs probe → enrich → format → publish → record
/// sequentially; the struct itself holds only shared client handles. The
/// probe/record pair is not atomic: two concurrent requests for the same key
/// can both observe a miss and publish twice (see DESIGN.md).
pub struct Pipeline {
    store: Arc<dyn DedupStore>,
    directory: Arc<dyn GameDirectory>,
    sink: Arc<dyn NotificationSink>,
    expected_user_agent: Option<String>,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn DedupStore>,
        directory: Arc<dyn GameDirectory>,
        sink: Arc<dyn NotificationSink>,
        expected_user_agent: Option<String>,
    ) -> Self {
        Pipeline {
            store,
            directory,
            sink,
            expected_user_agent,
        }
    }

    pub async fn handle(&self, headers: &HeaderMap, body: &[u8]) -> Result<Outcome> {
        let place_id = validator::validate(headers, self.expected_user_agent.as_deref())?;
        let key = dedup_key(place_id);

        // Fail closed: if the store cannot answer, do not publish.
        if self.store.exists(&key).await? {
            tracing::info!(place_id, "already registered before");
            counter!(STARTUP_LOGS_DUPLICATE).increment(1);
            return Ok(Outcome::AlreadyRegistered);
        }

        // The body is only read on the miss path; a duplicate short-circuits
        // without it.
        let event = StartupEvent::from_json(body)
            .map_err(|e| ValidationError::InvalidBody(e.to_string()))?;

        let message = self.enrich(place_id, &event).await?;
        self.sink.publish(&message).await?;

        tracing::info!(
            place_id,
            universe_id = message.universe_id,
            is_studio = message.is_studio,
            first_player_id = message.player_id,
            "recorded game"
        );

        // A failed write after a successful publish leaves the key unset, so
        // a redelivery announces again. Accepted, and surfaced as an error.
        self.store.set_with_ttl(&key, DEDUP_TTL).await?;
        counter!(STARTUP_LOGS_RECORDED).increment(1);

        Ok(Outcome::Recorded)
    }

    /// Runs the lookup chain. Any failure aborts the whole request; a
    /// malformed message is worse than a delayed one.
    async fn enrich(&self, place_id: u64, event: &StartupEvent) -> Result<EnrichedMessage> {
        let universe_id = match event.universe_id {
            Some(id) => id,
            None => self.directory.resolve_universe(place_id).await?,
        };
        let universe = self.directory.fetch_universe(universe_id).await?;
        let user = self.directory.fetch_user(event.first_player_id).await?;

        Ok(EnrichedMessage::compose(
            place_id,
            universe_id,
            event,
            &universe,
            &user,
        ))
    }
}
