use crate::event::StartupEvent;
use roblox::types::{Universe, User};

/// Fully enriched notification, ready for a sink to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedMessage {
    pub place_id: u64,
    pub universe_id: u64,
    pub is_studio: bool,
    pub universe_name: String,
    pub player_id: u64,
    pub player_name: String,
}

impl EnrichedMessage {
    /// Pure combination of the event with its lookup results.
    pub fn compose(
        place_id: u64,
        universe_id: u64,
        event: &StartupEvent,
        universe: &Universe,
        user: &User,
    ) -> Self {
        let player_name = if user.display_name.is_empty() {
            user.name.clone()
        } else {
            user.display_name.clone()
        };

        EnrichedMessage {
            place_id,
            universe_id,
            is_studio: event.is_studio,
            universe_name: universe.display_name.clone(),
            player_id: event.first_player_id,
            player_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event() -> StartupEvent {
        StartupEvent::from_json(br#"{"is_studio": true, "first_player_id": 999}"#).unwrap()
    }

    #[test]
    fn composes_from_lookup_results() {
        let universe = Universe {
            display_name: "Obby Tower".into(),
            ..Default::default()
        };
        let user = User {
            name: "builderman".into(),
            display_name: "Builderman".into(),
            ..Default::default()
        };

        let message = EnrichedMessage::compose(123, 77, &event(), &universe, &user);
        assert_eq!(message.place_id, 123);
        assert_eq!(message.universe_id, 77);
        assert!(message.is_studio);
        assert_eq!(message.universe_name, "Obby Tower");
        assert_eq!(message.player_id, 999);
        assert_eq!(message.player_name, "Builderman");
    }

    #[test]
    fn falls_back_to_username_without_display_name() {
        let user = User {
            name: "builderman".into(),
            ..Default::default()
        };

        let message =
            EnrichedMessage::compose(123, 77, &event(), &Universe::default(), &user);
        assert_eq!(message.player_name, "builderman");
    }
}
