//! Workflow configuration
//!
//! The workflow never reads settings storage itself; it receives a
//! [`WorkflowConfig`] from a [`ConfigSource`] at click time.

use std::fmt;

use crate::shared::error::AppResult;

pub const DEFAULT_TARGET_LANG: &str = "FR";

/// Settings snapshot for one translate action.
#[derive(Clone, PartialEq, Eq)]
pub struct WorkflowConfig {
    pub credential: String,
    pub target_lang: String,
}

impl WorkflowConfig {
    pub fn new(credential: impl Into<String>, target_lang: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            target_lang: target_lang.into(),
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_TARGET_LANG)
    }
}

// Keep the API key out of logs.
impl fmt::Debug for WorkflowConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let credential = if self.has_credential() { "<redacted>" } else { "<empty>" };
        f.debug_struct("WorkflowConfig")
            .field("credential", &credential)
            .field("target_lang", &self.target_lang)
            .finish()
    }
}

/// Produces the configuration for the next workflow invocation.
pub trait ConfigSource: Send + Sync {
    fn workflow_config(&self) -> AppResult<WorkflowConfig>;
}

impl ConfigSource for WorkflowConfig {
    fn workflow_config(&self) -> AppResult<WorkflowConfig> {
        Ok(self.clone())
    }
}
