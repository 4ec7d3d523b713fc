use log::warn;
use std::env;
use std::str::FromStr;

use crate::blockchain::{DEFAULT_DIFFICULTY, SealLimits};

/// Process settings, read from the environment (and `.env` via dotenvy in `main`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub difficulty: u32,
    pub max_seal_attempts: Option<u64>,
    /// Append the two demo transactions and print the chain report at startup.
    pub seed_demo: bool,
    /// Start the HTTP API after the demo.
    pub serve: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            difficulty: DEFAULT_DIFFICULTY,
            max_seal_attempts: None,
            seed_demo: true,
            serve: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing keys keep their default;
    /// unparseable ones are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port),
            difficulty: parse_or(&lookup, "DIFFICULTY", defaults.difficulty),
            max_seal_attempts: lookup("MAX_SEAL_ATTEMPTS")
                .and_then(|v| parse_value("MAX_SEAL_ATTEMPTS", &v)),
            seed_demo: parse_or(&lookup, "SEED_DEMO", defaults.seed_demo),
            serve: parse_or(&lookup, "SERVE", defaults.serve),
        }
    }

    pub fn seal_limits(&self) -> SealLimits {
        match self.max_seal_attempts {
            Some(max) => SealLimits::unbounded().with_max_attempts(max),
            None => SealLimits::unbounded(),
        }
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!("ignoring invalid {key}={raw:?}");
    }
    parsed
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| parse_value(key, &v))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = Config::from_lookup(|_| None);
        assert_eq!(cfg, Config::default());
        assert!(cfg.seal_limits().max_attempts.is_none());
    }

    #[test]
    fn reads_all_keys() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("DIFFICULTY", "4"),
            ("MAX_SEAL_ATTEMPTS", "1000000"),
            ("SEED_DEMO", "false"),
            ("SERVE", "false"),
        ]));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.difficulty, 4);
        assert_eq!(cfg.max_seal_attempts, Some(1_000_000));
        assert_eq!(cfg.seal_limits().max_attempts, Some(1_000_000));
        assert!(!cfg.seed_demo);
        assert!(!cfg.serve);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("DIFFICULTY", "-1"),
            ("MAX_SEAL_ATTEMPTS", "lots"),
        ]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.difficulty, 3);
        assert_eq!(cfg.max_seal_attempts, None);
    }
}
