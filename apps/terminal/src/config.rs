use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context};
use tickerbar_core::EngineConfig;
use tickerbar_market_data::YAHOO_BASE_URL;

/// Database path that keeps settings in memory only.
pub const IN_MEMORY_DB: &str = ":memory:";

const DEFAULT_DB_PATH: &str = "./db/tickerbar.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    Demo,
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yahoo" => Ok(Self::Yahoo),
            "demo" => Ok(Self::Demo),
            other => bail!("unknown quote provider '{}', expected 'yahoo' or 'demo'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub provider: ProviderKind,
    pub yahoo_base_url: String,
    pub request_timeout: Option<Duration>,
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            refresh_interval: parse_var(&lookup, "TICKERBAR_REFRESH_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_interval),
            rotate_interval: parse_var(&lookup, "TICKERBAR_ROTATE_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.rotate_interval),
            marquee_interval: parse_var(&lookup, "TICKERBAR_MARQUEE_MILLIS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.marquee_interval),
            marquee_width: parse_var(&lookup, "TICKERBAR_MARQUEE_WIDTH")?
                .unwrap_or(defaults.marquee_width),
        };
        if engine.refresh_interval.is_zero()
            || engine.rotate_interval.is_zero()
            || engine.marquee_interval.is_zero()
        {
            bail!("timer intervals must be greater than zero");
        }

        Ok(Self {
            db_path: lookup("TICKERBAR_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            provider: lookup("TICKERBAR_PROVIDER")
                .map(|p| p.parse::<ProviderKind>())
                .transpose()?
                .unwrap_or(ProviderKind::Yahoo),
            yahoo_base_url: lookup("TICKERBAR_YAHOO_BASE_URL")
                .unwrap_or_else(|| YAHOO_BASE_URL.to_string()),
            request_timeout: parse_var(&lookup, "TICKERBAR_REQUEST_TIMEOUT_MS")?
                .map(Duration::from_millis),
            engine,
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {}: '{}'", key, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.db_path, "./db/tickerbar.db");
        assert_eq!(config.provider, ProviderKind::Yahoo);
        assert_eq!(config.yahoo_base_url, YAHOO_BASE_URL);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("TICKERBAR_PROVIDER", "Demo"),
            ("TICKERBAR_REFRESH_SECS", "30"),
            ("TICKERBAR_MARQUEE_MILLIS", "100"),
            ("TICKERBAR_MARQUEE_WIDTH", "60"),
            ("TICKERBAR_REQUEST_TIMEOUT_MS", "2500"),
        ])
        .unwrap();
        assert_eq!(config.provider, ProviderKind::Demo);
        assert_eq!(config.engine.refresh_interval, Duration::from_secs(30));
        assert_eq!(config.engine.rotate_interval, Duration::from_secs(5));
        assert_eq!(config.engine.marquee_interval, Duration::from_millis(100));
        assert_eq!(config.engine.marquee_width, 60);
        assert_eq!(config.request_timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config_from(&[("TICKERBAR_PROVIDER", "bloomberg")]).is_err());
        assert!(config_from(&[("TICKERBAR_ROTATE_SECS", "soon")]).is_err());
        assert!(config_from(&[("TICKERBAR_ROTATE_SECS", "0")]).is_err());
    }
}
