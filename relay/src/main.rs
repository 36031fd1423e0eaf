use clap::Parser;
use metrics_exporter_statsd::StatsdBuilder;
use relay::config::{Config, MetricsConfig};
use relay::pipeline::Pipeline;
use relay::server;
use relay::sink::DiscordWebhook;
use relay::store::RedisStore;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Relays game server startup notifications to a team webhook")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_file(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(path = %cli.config.display(), %err, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    if let Some(metrics_config) = &config.metrics {
        if let Err(err) = install_statsd_recorder(metrics_config) {
            tracing::error!(%err, "failed to install metrics recorder");
            return ExitCode::FAILURE;
        }
    }

    let webhook_url = match url::Url::parse(&config.discord.webhook_url) {
        Ok(url) => url,
        Err(err) => {
            tracing::error!(%err, "invalid webhook URL");
            return ExitCode::FAILURE;
        }
    };

    let store = match RedisStore::connect(&config.redis.addr).await {
        Ok(store) => store,
        Err(err) => {
            tracing::error!(%err, "could not reach the dedup store");
            return ExitCode::FAILURE;
        }
    };

    let directory = roblox::client::Client::with_base_url(
        config.roblox.api_key.clone(),
        config.roblox.base_url.clone(),
    );
    let sink = DiscordWebhook::new(webhook_url);

    let pipeline = Arc::new(Pipeline::new(
        Arc::new(store),
        Arc::new(directory),
        Arc::new(sink),
        config.validation.expected_user_agent.clone(),
    ));

    if let Err(err) = server::serve(&config.listener.host, config.listener.port, pipeline).await {
        tracing::error!(%err, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn install_statsd_recorder(config: &MetricsConfig) -> Result<(), String> {
    let recorder = StatsdBuilder::from(config.statsd_host.as_str(), config.statsd_port)
        .build(Some("startuplog_relay"))
        .map_err(|e| e.to_string())?;
    metrics::set_global_recorder(recorder).map_err(|e| e.to_string())?;

    Ok(())
}
