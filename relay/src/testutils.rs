//! Fake collaborators for pipeline and server tests.

use crate::message::EnrichedMessage;
use crate::pipeline::GameDirectory;
use crate::sink::{NotificationSink, PublishError};
use crate::store::{DedupStore, StoreError};
use crate::validator::ORIGIN_HEADER;
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue, StatusCode};
use roblox::client::ClientError;
use roblox::types::{Universe, User};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn headers_for_place(place: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ORIGIN_HEADER, HeaderValue::from_str(place).unwrap());
    headers
}

fn store_offline() -> StoreError {
    StoreError::Unavailable(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "store offline",
    )))
}

#[derive(Default)]
pub struct FakeStore {
    pub keys: Mutex<HashSet<String>>,
    pub writes: Mutex<Vec<(String, Duration)>>,
    pub probe_calls: AtomicUsize,
    pub fail_probe: bool,
    pub fail_write: bool,
}

#[async_trait]
impl DedupStore for FakeStore {
    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.probe_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_probe {
            return Err(store_offline());
        }
        Ok(self.keys.lock().unwrap().contains(key))
    }

    async fn set_with_ttl(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        if self.fail_write {
            return Err(store_offline());
        }
        self.keys.lock().unwrap().insert(key.to_string());
        self.writes.lock().unwrap().push((key.to_string(), ttl));
        Ok(())
    }
}

pub struct FakeDirectory {
    pub universe_id: u64,
    pub resolve_calls: AtomicUsize,
    pub universe_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
    pub fail_resolve: bool,
    pub fail_universe: bool,
    pub fail_user: bool,
}

impl Default for FakeDirectory {
    fn default() -> Self {
        FakeDirectory {
            universe_id: 77,
            resolve_calls: AtomicUsize::new(0),
            universe_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
            fail_resolve: false,
            fail_universe: false,
            fail_user: false,
        }
    }
}

#[async_trait]
impl GameDirectory for FakeDirectory {
    async fn resolve_universe(&self, place_id: u64) -> Result<u64, ClientError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_resolve {
            return Err(ClientError::NotFound {
                path: format!("universes/v1/places/{place_id}/universe"),
            });
        }
        Ok(self.universe_id)
    }

    async fn fetch_universe(&self, universe_id: u64) -> Result<Universe, ClientError> {
        self.universe_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_universe {
            return Err(ClientError::Unauthorized);
        }
        Ok(Universe {
            path: format!("universes/{universe_id}"),
            display_name: "Obby Tower".into(),
            ..Default::default()
        })
    }

    async fn fetch_user(&self, user_id: u64) -> Result<User, ClientError> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_user {
            return Err(ClientError::NotFound {
                path: format!("cloud/v2/users/{user_id}"),
            });
        }
        Ok(User {
            id: user_id.to_string(),
            name: "builderman".into(),
            display_name: "Builderman".into(),
            ..Default::default()
        })
    }
}

#[derive(Default)]
pub struct FakeSink {
    pub published: Mutex<Vec<EnrichedMessage>>,
    pub fail: bool,
}

#[async_trait]
impl NotificationSink for FakeSink {
    async fn publish(&self, message: &EnrichedMessage) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::Rejected {
                status: StatusCode::BAD_GATEWAY,
                body: "sink offline".into(),
            });
        }
        self.published.lock().unwrap().push(message.clone());
        Ok(())
    }
}
