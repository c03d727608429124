use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset source configuration
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Workflow configuration
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: TICKETDESK_)
            .add_source(
                config::Environment::with_prefix("TICKETDESK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::default(),
            workflow: WorkflowConfig::default(),
        }
    }
}

/// Where ticket data comes from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Path to a JSON dataset bundle; the built-in sample data is used
    /// when unset
    pub path: Option<PathBuf>,
}

/// Workflow policy: which status labels count as terminal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Status labels (matched case-insensitively) whose tickets count as
    /// resolved when the dataset does not flag statuses itself
    #[serde(default = "default_terminal_statuses")]
    pub terminal_statuses: Vec<String>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            terminal_statuses: default_terminal_statuses(),
        }
    }
}

impl WorkflowConfig {
    /// Whether a status label is terminal under this policy
    pub fn is_terminal_label(&self, label: &str) -> bool {
        self.terminal_statuses
            .iter()
            .any(|s| s.eq_ignore_ascii_case(label))
    }
}

fn default_terminal_statuses() -> Vec<String> {
    vec!["Resolved".to_string(), "Closed".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_workflow() {
        let workflow = WorkflowConfig::default();
        assert!(workflow.is_terminal_label("Resolved"));
        assert!(workflow.is_terminal_label("resolved"));
        assert!(!workflow.is_terminal_label("In Progress"));
    }

    #[test]
    fn test_default_dataset_path() {
        let config = Config::default();
        assert!(config.dataset.path.is_none());
    }
}
