use std::path::PathBuf;

/// Process-level settings read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct WorkdeskConfig {
    /// Directory holding the `.workdesk` profile store
    pub data_dir: PathBuf,
    /// Default `tracing` filter; `RUST_LOG` takes precedence
    pub log_filter: String,
    /// JSON board catalog replacing the built-in one
    pub catalog_path: Option<PathBuf>,
}

impl WorkdeskConfig {
    const DATA_DIR_VAR: &'static str = "WORKDESK_DATA_DIR";
    const LOG_VAR: &'static str = "WORKDESK_LOG";
    const CATALOG_VAR: &'static str = "WORKDESK_CATALOG";

    /// Reads overrides from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            data_dir: lookup(Self::DATA_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            log_filter: lookup(Self::LOG_VAR).unwrap_or(defaults.log_filter),
            catalog_path: lookup(Self::CATALOG_VAR)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

impl Default for WorkdeskConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            log_filter: "info,workdesk_core=debug".into(),
            catalog_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_env() {
        let config = WorkdeskConfig::from_lookup(|_| None);
        assert_eq!(config, WorkdeskConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WORKDESK_DATA_DIR", "/tmp/desk"),
            ("WORKDESK_LOG", "warn"),
            ("WORKDESK_CATALOG", "/etc/workdesk/catalog.json"),
        ]
        .into_iter()
        .collect();

        let config = WorkdeskConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data_dir, PathBuf::from("/tmp/desk"));
        assert_eq!(config.log_filter, "warn");
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/etc/workdesk/catalog.json"))
        );
    }

    #[test]
    fn test_empty_catalog_var_means_builtin() {
        let config = WorkdeskConfig::from_lookup(|key| {
            (key == "WORKDESK_CATALOG").then(String::new)
        });
        assert!(config.catalog_path.is_none());
    }
}
