//! Configuration management

use anyhow::{anyhow, Result};
use serde::Deserialize;
use url::Url;

/// Default player-protocol port when the configured URL omits one
const DEFAULT_MPD_PORT: u16 = 6600;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP listen port for the slash-command webhook
    #[serde(default = "default_port")]
    pub port: u16,

    /// Daemon address as a URL-shaped value (`scheme://host:port`)
    #[serde(default = "default_mpd_url")]
    pub mpd_url: String,
}

fn default_port() -> u16 {
    8044
}

fn default_mpd_url() -> String {
    "tcp://127.0.0.1:6600".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            mpd_url: default_mpd_url(),
        }
    }
}

impl Config {
    /// Resolve the daemon URL into a (host, port) pair.
    pub fn daemon_addr(&self) -> Result<(String, u16)> {
        let url = Url::parse(&self.mpd_url)
            .map_err(|e| anyhow!("invalid mpd_url `{}`: {}", self.mpd_url, e))?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("mpd_url `{}` has no host", self.mpd_url))?
            .to_string();
        Ok((host, url.port().unwrap_or(DEFAULT_MPD_PORT)))
    }
}

pub fn load_config() -> Result<Config> {
    let mut builder = ::config::Config::builder()
        // Start with defaults
        .set_default("port", default_port() as i64)?
        .set_default("mpd_url", default_mpd_url())?
        // Load from config file if it exists
        .add_source(::config::File::with_name("config").required(false))
        // Override with environment variables (MCB_PORT, MCB_MPD_URL)
        .add_source(::config::Environment::with_prefix("MCB").try_parsing(true));

    // Legacy env var from the Node.js bridge, kept so existing deployments
    // keep working without edits. MCB_MPD_URL wins when both are set.
    if std::env::var("MCB_MPD_URL").is_err() {
        if let Ok(url) = std::env::var("MM_MPD_URL") {
            builder = builder.set_override("mpd_url", url)?;
        }
    }

    let config = builder.build()?;
    Ok(config.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        env::remove_var("MCB_PORT");
        env::remove_var("MCB_MPD_URL");
        env::remove_var("MM_MPD_URL");
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = load_config().expect("config should load");
        assert_eq!(config.port, 8044);
        assert_eq!(config.mpd_url, "tcp://127.0.0.1:6600");
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("MCB_PORT", "9000");
        env::set_var("MCB_MPD_URL", "tcp://music.local:6601");

        let config = load_config().expect("config should load");

        clear_env();

        assert_eq!(config.port, 9000);
        assert_eq!(config.mpd_url, "tcp://music.local:6601");
    }

    #[test]
    #[serial]
    fn test_legacy_mm_mpd_url() {
        clear_env();
        env::set_var("MM_MPD_URL", "http://10.0.0.5:6600");

        let config = load_config().expect("config should load");

        clear_env();

        assert_eq!(config.mpd_url, "http://10.0.0.5:6600");
    }

    #[test]
    #[serial]
    fn test_mcb_url_beats_legacy() {
        clear_env();
        env::set_var("MM_MPD_URL", "tcp://legacy:6600");
        env::set_var("MCB_MPD_URL", "tcp://current:6600");

        let config = load_config().expect("config should load");

        clear_env();

        assert_eq!(config.mpd_url, "tcp://current:6600");
    }

    #[test]
    fn test_daemon_addr_with_explicit_port() {
        let config = Config {
            mpd_url: "tcp://music.local:6601".into(),
            ..Config::default()
        };
        let (host, port) = config.daemon_addr().expect("addr should parse");
        assert_eq!(host, "music.local");
        assert_eq!(port, 6601);
    }

    #[test]
    fn test_daemon_addr_defaults_port() {
        let config = Config {
            mpd_url: "tcp://127.0.0.1".into(),
            ..Config::default()
        };
        let (host, port) = config.daemon_addr().expect("addr should parse");
        assert_eq!(host, "127.0.0.1");
        assert_eq!(port, 6600);
    }

    #[test]
    fn test_daemon_addr_rejects_garbage() {
        let config = Config {
            mpd_url: "not a url".into(),
            ..Config::default()
        };
        assert!(config.daemon_addr().is_err());
    }
}
