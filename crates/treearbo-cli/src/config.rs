//! Environment configuration.

/// Settings read from the environment at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log filter directive used unless `--verbose` is given
    pub log_filter: String,
    /// URI reported for sources read from stdin
    pub stdin_uri: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            stdin_uri: "?".to_string(),
        }
    }
}

impl Config {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let log_filter = lookup("TREEARBO_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        let stdin_uri = lookup("TREEARBO_URI")
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.stdin_uri);

        Self {
            log_filter,
            stdin_uri,
        }
    }

    /// The filter to install, honouring the verbose flag.
    pub fn filter(&self, verbose: bool) -> &str {
        if verbose {
            "debug"
        } else {
            &self.log_filter
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(|_| None);

        assert_eq!(config, Config::default());
        assert_eq!(config.filter(false), "warn");
        assert_eq!(config.filter(true), "debug");
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(|key| match key {
            "TREEARBO_LOG" => Some("treearbo=trace".to_string()),
            "TREEARBO_URI" => Some("stdin.tree".to_string()),
            _ => None,
        });

        assert_eq!(config.filter(false), "treearbo=trace");
        assert_eq!(config.stdin_uri, "stdin.tree");
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = Config::from_lookup(|_| Some(String::new()));

        assert_eq!(config, Config::default());
    }
}
