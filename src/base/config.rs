//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default delay between two reads of the realtime feed, in milliseconds.
fn default_poll_interval_ms() -> u64 {
    1000
}

/// Configuration for the starter-bot application.
///
/// `ConfigInner` is what gets deserialized; this wrapper only shares it.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Slack bot token (`SLACK_BOT_TOKEN`).
    pub slack_bot_token: String,
    /// Slack app-level token used for the socket mode feed (`SLACK_APP_TOKEN`).
    pub slack_app_token: String,
    /// Delay between poll cycles (`POLL_INTERVAL_MS`).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().try_parsing(true));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    fn validate(&self) -> Res<()> {
        if self.slack_bot_token.is_empty() {
            return Err(anyhow::anyhow!("Slack bot token must be set."));
        }

        if self.slack_app_token.is_empty() {
            return Err(anyhow::anyhow!("Slack app token must be set."));
        }

        if self.poll_interval_ms < 1 || self.poll_interval_ms > 60000 {
            return Err(anyhow::anyhow!("Poll interval must be between 1 and 60000 milliseconds."));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(bot: &str, app: &str, poll_interval_ms: u64) -> Config {
        Config {
            inner: Arc::new(ConfigInner {
                slack_bot_token: bot.to_string(),
                slack_app_token: app.to_string(),
                poll_interval_ms,
            }),
        }
    }

    #[test]
    fn accepts_valid_config() {
        assert!(config("xoxb-test", "xapp-test", 1000).validate().is_ok());
    }

    #[test]
    fn rejects_missing_tokens() {
        assert!(config("", "xapp-test", 1000).validate().is_err());
        assert!(config("xoxb-test", "", 1000).validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_interval() {
        assert!(config("xoxb-test", "xapp-test", 0).validate().is_err());
        assert!(config("xoxb-test", "xapp-test", 60001).validate().is_err());
    }

    #[test]
    fn clones_share_the_loaded_values() {
        let original = config("xoxb-test", "xapp-test", 250);
        let cloned = original.clone();

        assert!(Arc::ptr_eq(&original.inner, &cloned.inner));
        assert_eq!(cloned.poll_interval_ms, 250);
    }

    #[test]
    fn loads_from_toml_file() {
        let path = std::env::temp_dir().join(format!("starter-bot-config-{}.toml", std::process::id()));
        std::fs::write(&path, "slack_bot_token = \"xoxb-file\"\nslack_app_token = \"xapp-file\"\n").unwrap();

        let loaded = Config::load(Some(&path));
        std::fs::remove_file(&path).unwrap();

        let loaded = loaded.unwrap();
        assert_eq!(loaded.poll_interval_ms, 1000);
    }
}
