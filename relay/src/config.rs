use serde::Deserialize;
use std::fs::File;
use std::path::Path;

#[derive(Deserialize, Debug)]
pub struct Listener {
    pub host: String,
    pub port: u16,
}

impl Default for Listener {
    fn default() -> Self {
        Listener {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct RedisConfig {
    pub addr: String,
}

#[derive(Deserialize, Debug)]
pub struct DiscordConfig {
    pub webhook_url: String,
}

fn default_api_base_url() -> String {
    roblox::client::DEFAULT_BASE_URL.to_string()
}

#[derive(Deserialize, Debug)]
pub struct RobloxConfig {
    pub api_key: String,
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ValidationConfig {
    /// When set, the request's User-Agent must start with this signature.
    pub expected_user_agent: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct MetricsConfig {
    pub statsd_host: String,
    pub statsd_port: u16,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub listener: Listener,
    pub redis: RedisConfig,
    pub discord: DiscordConfig,
    pub roblox: RobloxConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
    pub metrics: Option<MetricsConfig>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let data = serde_yaml::from_reader(file)?;

        Ok(data)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not load config from file: {0}")]
    LoadError(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_tmp_file(s: &str) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().expect("create temp file");
        write!(tmp, "{}", s).expect("write yaml");

        tmp
    }

    #[test]
    fn full_config() {
        let yaml = r#"
            listener:
                host: 127.0.0.1
                port: 9090
            redis:
                addr: redis://127.0.0.1:6379
            discord:
                webhook_url: https://discord.com/api/webhooks/1/abc
            roblox:
                api_key: secret
            validation:
                expected_user_agent: Roblox/WinInet
            metrics:
                statsd_host: 127.0.0.1
                statsd_port: 8125
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.listener.port, 9090);
        assert_eq!(config.redis.addr, "redis://127.0.0.1:6379");
        assert_eq!(config.roblox.base_url, roblox::client::DEFAULT_BASE_URL);
        assert_eq!(
            config.validation.expected_user_agent.as_deref(),
            Some("Roblox/WinInet")
        );
        assert_eq!(config.metrics.unwrap().statsd_port, 8125);
    }

    #[test]
    fn listener_and_validation_default() {
        let yaml = r#"
            redis:
                addr: redis://db:6379
            discord:
                webhook_url: https://discord.com/api/webhooks/1/abc
            roblox:
                api_key: secret
            "#;
        let tmp = write_tmp_file(yaml);
        let config = Config::from_file(tmp.path()).expect("load config");

        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.listener.port, 8080);
        assert!(config.validation.expected_user_agent.is_none());
        assert!(config.metrics.is_none());
    }

    #[test]
    fn missing_required_section_fails() {
        let yaml = r#"
            redis:
                addr: redis://db:6379
            roblox:
                api_key: secret
            "#;
        let tmp = write_tmp_file(yaml);

        let err = Config::from_file(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
