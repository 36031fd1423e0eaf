use crate::errors::RelayError;
use crate::metrics_defs::{REQUEST_DURATION, STARTUP_LOGS_ABORTED};
use crate::pipeline::{Outcome, Pipeline};
use crate::{counter, histogram};
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::TcpListener;

#[derive(thiserror::Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn app(pipeline: Arc<Pipeline>) -> Router {
    Router::new()
        .route("/pos/startup-log", post(startup_log))
        .route("/health", get(health))
        .with_state(pipeline)
}

pub async fn serve(host: &str, port: u16, pipeline: Arc<Pipeline>) -> Result<(), ServeError> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app(pipeline)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok\n"
}

async fn startup_log(
    State(pipeline): State<Arc<Pipeline>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Outcome, RelayError> {
    let start = Instant::now();
    let result = pipeline.handle(&headers, &body).await;
    histogram!(REQUEST_DURATION).record(start.elapsed().as_secs_f64());

    result
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let body = match self {
            Outcome::Recorded => "Recorded",
            Outcome::AlreadyRegistered => "Already registered before",
        };

        (StatusCode::OK, body).into_response()
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(%status, kind = self.kind(), error = %self, "startup-log request aborted");
        counter!(STARTUP_LOGS_ABORTED).increment(1);

        (status, self.to_string()).into_response()
    }
}
