use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub discovery: DiscoveryConfig,
    pub aggregator: AggregatorConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Field name of the term selector on the registration form.
    pub term_field: String,
    /// Primary domain of the institution; sub-college label rules only apply
    /// to terms discovered on this host.
    pub primary_host: String,
    /// Fixed fields posted alongside the term id when fetching subjects.
    pub subject_post_fields: Vec<PostField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Per-term subject fetch timeout, in seconds. 0 disables it.
    pub fetch_timeout_seconds: u64,
    /// Overall deadline for the fan-out, in seconds. 0 disables it.
    pub deadline_seconds: u64,
    /// Attach empty subject lists for failed fetches instead of failing the
    /// whole run.
    pub allow_partial: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Development mode only: memoize whole runs on disk.
    pub enabled: bool,
    pub dir: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            term_field: "p_term".to_string(),
            primary_host: "neu.edu".to_string(),
            subject_post_fields: vec![PostField {
                name: "p_calling_proc".to_string(),
                value: "bwckschd.p_disp_dyn_sched".to_string(),
            }],
        }
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: 30,
            deadline_seconds: 120,
            allow_partial: false,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: "cache".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            CatalogError::Config(format!("Failed to read config file '{config_path}': {e}"))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Loads `config.toml` when present, otherwise falls back to defaults.
    pub fn load_or_default() -> Result<Self> {
        if std::path::Path::new("config.toml").exists() {
            Self::load()
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.discovery.term_field, "p_term");
        assert_eq!(config.aggregator.fetch_timeout_seconds, 30);
        assert!(!config.cache.enabled);
    }

    #[test]
    fn partial_config_overrides_selected_fields() {
        let config: Config = toml::from_str(
            r#"
            [discovery]
            term_field = "term_in"
            primary_host = "example.edu"

            [aggregator]
            allow_partial = true
            "#,
        )
        .unwrap();
        assert_eq!(config.discovery.term_field, "term_in");
        assert_eq!(config.discovery.primary_host, "example.edu");
        assert!(config.aggregator.allow_partial);
        assert_eq!(config.aggregator.deadline_seconds, 120);
    }
}
