//! Configuration loading for the kill tracker.
//!
//! Tracked subjects and session behaviour are loaded from a TOML file.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Subject tracked when no configuration is given.
pub const DEFAULT_SUBJECT: &str = "Moss giant";

/// "1 in N" odds used for the default subject.
pub const DEFAULT_DROP_RATE: f64 = 128.0;

/// Complete tracker configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Session settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Tracked subjects keyed by the name the host reports
    #[serde(default = "default_subjects")]
    pub subjects: BTreeMap<String, SubjectConfig>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            subjects: default_subjects(),
        }
    }
}

impl TrackerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Adds or replaces a tracked subject.
    pub fn with_subject(mut self, name: impl Into<String>, subject: SubjectConfig) -> Self {
        self.subjects.insert(name.into(), subject);
        self
    }

    /// Returns a configuration with no subjects tracked.
    ///
    /// A tracker refuses to start from it until at least one subject is added.
    pub fn empty() -> Self {
        Self {
            session: SessionConfig::default(),
            subjects: BTreeMap::new(),
        }
    }
}

fn default_subjects() -> BTreeMap<String, SubjectConfig> {
    let mut subjects = BTreeMap::new();
    subjects.insert(
        DEFAULT_SUBJECT.to_string(),
        SubjectConfig::new(DEFAULT_DROP_RATE).with_label("Moss Giant"),
    );
    subjects
}

/// Drop odds and display settings for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectConfig {
    /// "1 in N" odds of the rare drop. Validated when the tracker is built.
    pub drop_rate: f64,
    /// Name shown in reports. Defaults to the configured subject name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SubjectConfig {
    pub fn new(drop_rate: f64) -> Self {
        Self {
            drop_rate,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Session behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Send a greeting to the sink when the client logs in
    pub announce_login: bool,
    /// Text of the login greeting
    pub login_message: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            announce_login: true,
            login_message: "Loot Probability plugin loaded!".to_string(),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Error parsing TOML config
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Error writing TOML config
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Kill Tracker Configuration

[session]
announce_login = true
login_message = "Loot Probability plugin loaded!"

# One table per tracked NPC, keyed by the name the game reports.
# drop_rate is the N in "1 in N".
[subjects."Moss giant"]
drop_rate = 128.0
label = "Moss Giant"
"#
    .to_string()
}
