use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Server settings, read from `DEVCAMP_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_addr: String,
    pub request_timeout: Duration,
    /// JSON file loaded into the store at startup.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_addr = lookup("DEVCAMP_API_ADDR").unwrap_or_else(|| DEFAULT_API_ADDR.into());
        let timeout_ms = lookup("DEVCAMP_REQUEST_TIMEOUT_MS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        let seed_path = lookup("DEVCAMP_SEED_PATH")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            api_addr,
            request_timeout: Duration::from_millis(timeout_ms),
            seed_path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_addr, "0.0.0.0:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.seed_path, None);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DEVCAMP_API_ADDR", "127.0.0.1:8080"),
            ("DEVCAMP_REQUEST_TIMEOUT_MS", "250"),
            ("DEVCAMP_SEED_PATH", "/data/seed.json"),
        ]));
        assert_eq!(config.api_addr, "127.0.0.1:8080");
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.seed_path, Some(PathBuf::from("/data/seed.json")));
    }

    #[test]
    fn bad_timeout_falls_back() {
        let config = Config::from_lookup(lookup(&[("DEVCAMP_REQUEST_TIMEOUT_MS", "soon")]));
        assert_eq!(config.request_timeout, Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS));
    }
}
