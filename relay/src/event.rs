use serde::Deserialize;

/// Startup notification posted by a game server.
///
/// Later protocol revisions attach universe/creator fields; servers on the
/// original protocol send only the two required ones. Unknown fields are
/// rejected rather than silently dropped.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartupEvent {
    pub is_studio: bool,
    pub first_player_id: u64,
    #[serde(default)]
    pub universe_id: Option<u64>,
    #[serde(default)]
    pub place_id: Option<u64>,
    #[serde(default)]
    pub creator_id: Option<u64>,
    #[serde(default)]
    pub creator_type: Option<u32>,
}

impl StartupEvent {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
