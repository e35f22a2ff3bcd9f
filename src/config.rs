use crate::errors::ConfigError;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use std::{env, time::Duration};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_EVENT_DATE: &str = "2025-08-17T00:00:00";
const EVENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub csrf_token: String,
    pub event_date: DateTime<Local>,
    pub tick_period: Duration,
    pub stats_period: Duration,
    pub refresh_delay: Duration,
    pub intro_delay: Duration,
    pub request_timeout: Duration,
}

impl Config {
    pub fn new(base_url: impl Into<String>, event_date: DateTime<Local>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf_token: String::new(),
            event_date,
            tick_period: Duration::from_secs(1),
            stats_period: Duration::from_secs(20),
            refresh_delay: Duration::from_secs(2),
            intro_delay: Duration::from_millis(500),
            request_timeout: Duration::from_secs(15),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("LANDING_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let raw_date = lookup("LANDING_EVENT_DATE").unwrap_or_else(|| DEFAULT_EVENT_DATE.to_string());
        let event_date = parse_event_date(&raw_date)?;

        let mut config = Self::new(base_url, event_date);
        if let Some(token) = lookup("LANDING_CSRF_TOKEN") {
            config.csrf_token = token;
        }
        if let Some(value) = lookup("LANDING_STATS_INTERVAL_SECS") {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::invalid("LANDING_STATS_INTERVAL_SECS", &value))?;
            config.stats_period = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

pub fn parse_event_date(raw: &str) -> Result<DateTime<Local>, ConfigError> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), EVENT_DATE_FORMAT)
        .map_err(|_| ConfigError::invalid("LANDING_EVENT_DATE", raw))?;
    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ConfigError::invalid("LANDING_EVENT_DATE", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.csrf_token, "");
        assert_eq!(config.stats_period, Duration::from_secs(20));
        assert_eq!(config.tick_period, Duration::from_secs(1));
        assert_eq!(config.refresh_delay, Duration::from_secs(2));
        assert_eq!(config.event_date.year(), 2025);
        assert_eq!(config.event_date.month(), 8);
        assert_eq!(config.event_date.day(), 17);
        assert_eq!(config.event_date.hour(), 0);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("LANDING_BASE_URL", "https://camp.example/"),
            ("LANDING_CSRF_TOKEN", "tok"),
            ("LANDING_EVENT_DATE", "2026-01-02T03:04:05"),
            ("LANDING_STATS_INTERVAL_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://camp.example/");
        assert_eq!(config.csrf_token, "tok");
        assert_eq!(config.stats_period, Duration::from_secs(5));
        assert_eq!(config.event_date.minute(), 4);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::from_lookup(lookup_from(&[("LANDING_EVENT_DATE", "next week")])).is_err());
        assert!(
            Config::from_lookup(lookup_from(&[("LANDING_STATS_INTERVAL_SECS", "0")])).is_err()
        );
    }
}
