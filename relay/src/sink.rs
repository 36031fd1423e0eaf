use crate::message::EnrichedMessage;
use async_trait::async_trait;
use http::StatusCode;
use serde::Serialize;
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    #[error("webhook transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook rejected payload with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },
}

/// Delivery seam for the formatted notification. One attempt, no queuing.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn publish(&self, message: &EnrichedMessage) -> Result<(), PublishError>;
}

const EMBED_COLOR: u32 = 15_277_667;

#[derive(Serialize)]
struct WebhookPayload {
    content: &'static str,
    embeds: Vec<Embed>,
}

#[derive(Serialize)]
struct Embed {
    title: &'static str,
    color: u32,
    timestamp: String,
    fields: Vec<EmbedField>,
}

#[derive(Serialize)]
struct EmbedField {
    name: &'static str,
    value: String,
    inline: bool,
}

impl EmbedField {
    fn inline(name: &'static str, value: String) -> Self {
        EmbedField {
            name,
            value,
            inline: true,
        }
    }
}

/// Posts notifications to a Discord webhook. The URL carries the credential.
pub struct DiscordWebhook {
    http: reqwest::Client,
    webhook_url: Url,
}

impl DiscordWebhook {
    pub fn new(webhook_url: Url) -> Self {
        DiscordWebhook {
            http: reqwest::Client::new(),
            webhook_url,
        }
    }

    fn render(message: &EnrichedMessage) -> WebhookPayload {
        WebhookPayload {
            content: "@everyone",
            embeds: vec![Embed {
                title: "New game!",
                color: EMBED_COLOR,
                timestamp: chrono::Utc::now().to_rfc3339(),
                fields: vec![
                    EmbedField::inline("Is studio", message.is_studio.to_string()),
                    EmbedField::inline(
                        "First player",
                        format!("{} ({})", message.player_name, message.player_id),
                    ),
                    EmbedField::inline("Place id", message.place_id.to_string()),
                    EmbedField::inline(
                        "Universe",
                        format!("{} ({})", message.universe_name, message.universe_id),
                    ),
                ],
            }],
        }
    }
}

#[async_trait]
impl NotificationSink for DiscordWebhook {
    async fn publish(&self, message: &EnrichedMessage) -> Result<(), PublishError> {
        let payload = Self::render(message);
        let response = self
            .http
            .post(self.webhook_url.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected { status, body });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::routing::post;
    use tokio::net::TcpListener;

    fn message() -> EnrichedMessage {
        EnrichedMessage {
            place_id: 123,
            universe_id: 77,
            is_studio: false,
            universe_name: "Obby Tower".into(),
            player_id: 999,
            player_name: "Builderman".into(),
        }
    }

    #[test]
    fn renders_embed_fields() {
        let payload = DiscordWebhook::render(&message());
        let rendered = serde_json::to_value(&payload).unwrap();

        assert_eq!(rendered["content"], "@everyone");
        let embed = &rendered["embeds"][0];
        assert_eq!(embed["title"], "New game!");
        assert_eq!(embed["color"], 15_277_667);

        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0]["value"], "false");
        assert_eq!(fields[1]["value"], "Builderman (999)");
        assert_eq!(fields[2]["value"], "123");
        assert_eq!(fields[3]["value"], "Obby Tower (77)");
        assert!(fields.iter().all(|f| f["inline"] == true));
    }

    async fn spawn_webhook(app: Router) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Url::parse(&format!("http://{addr}/webhook")).unwrap()
    }

    #[tokio::test]
    async fn publish_succeeds_on_no_content() {
        let app = Router::new().route("/webhook", post(|| async { StatusCode::NO_CONTENT }));
        let sink = DiscordWebhook::new(spawn_webhook(app).await);

        sink.publish(&message()).await.unwrap();
    }

    #[tokio::test]
    async fn publish_surfaces_rejection_body() {
        let app = Router::new().route(
            "/webhook",
            post(|| async { (StatusCode::BAD_REQUEST, "invalid payload") }),
        );
        let sink = DiscordWebhook::new(spawn_webhook(app).await);

        let err = sink.publish(&message()).await.unwrap_err();
        match err {
            PublishError::Rejected { status, body } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body, "invalid payload");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
