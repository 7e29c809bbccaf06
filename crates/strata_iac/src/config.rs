//! Driver configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::IacResult;

/// Settings for the infrastructure driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Prefix of the stack names generated on create.
    pub stack_name_prefix: String,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            stack_name_prefix: "strata".to_string(),
        }
    }
}

impl DriverConfig {
    pub fn with_stack_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.stack_name_prefix = prefix.into();
        self
    }

    /// Generate a fresh stack name.
    pub fn stack_name(&self) -> String {
        format!("{}-{}", self.stack_name_prefix, uuid::Uuid::new_v4())
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> IacResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: DriverConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_file(&self, path: &Path) -> IacResult<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
