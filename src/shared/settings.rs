use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::fs;
use ts_rs::TS;

use crate::config::{ConfigSource, WorkflowConfig, DEFAULT_TARGET_LANG};
use crate::shared::error::{AppError, AppResult};

pub const SETTINGS_NAMESPACE: &str = "autotranslate-journal";
pub const CREDENTIAL_KEY: &str = "deeplApiKey";
pub const TARGET_LANG_KEY: &str = "targetLang";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
pub enum SettingScope {
    // shared by every user of the world
    World,
    Client,
}

/// A setting as registered with the host's settings mechanism.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
pub struct SettingDefinition {
    pub namespace: String,
    pub key: String,
    pub name: String,
    pub hint: String,
    pub scope: SettingScope,
    /// Shown in the host's configuration dialog.
    pub config: bool,
    #[ts(type = "string")]
    pub default: Value,
}

impl SettingDefinition {
    fn world_string(key: &str, name: &str, hint: &str, default: &str) -> Self {
        Self {
            namespace: SETTINGS_NAMESPACE.to_string(),
            key: key.to_string(),
            name: name.to_string(),
            hint: hint.to_string(),
            scope: SettingScope::World,
            config: true,
            default: Value::String(default.to_string()),
        }
    }

    pub fn qualified_key(&self) -> String {
        qualified_key(&self.namespace, &self.key)
    }
}

fn qualified_key(namespace: &str, key: &str) -> String {
    format!("{}.{}", namespace, key)
}

/// The two settings the translate action reads.
pub fn setting_definitions() -> Vec<SettingDefinition> {
    vec![
        SettingDefinition::world_string(
            CREDENTIAL_KEY,
            "DeepL API key",
            "Your DeepL API Free authentication key.",
            "",
        ),
        SettingDefinition::world_string(
            TARGET_LANG_KEY,
            "Target language",
            "DeepL language code for translated copies (EN, DE, ES, IT...).",
            DEFAULT_TARGET_LANG,
        ),
    ]
}

/// Host settings storage.
pub trait SettingsRegistry: Send + Sync {
    fn register(&self, definition: SettingDefinition) -> AppResult<()>;
    fn get(&self, namespace: &str, key: &str) -> AppResult<Value>;
    fn set(&self, namespace: &str, key: &str, value: Value) -> AppResult<()>;
}

pub fn register_settings(registry: &dyn SettingsRegistry) -> AppResult<()> {
    for definition in setting_definitions() {
        registry.register(definition)?;
    }
    Ok(())
}

/// Read the workflow configuration out of any registry.
pub fn load_workflow_config(registry: &dyn SettingsRegistry) -> AppResult<WorkflowConfig> {
    let credential = string_setting(registry, CREDENTIAL_KEY)?;
    let target_lang = string_setting(registry, TARGET_LANG_KEY)?;
    Ok(WorkflowConfig { credential, target_lang })
}

fn string_setting(registry: &dyn SettingsRegistry, key: &str) -> AppResult<String> {
    match registry.get(SETTINGS_NAMESPACE, key)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        other => Err(AppError::Settings(format!(
            "Setting '{}' must be a string, found {}",
            key, other
        ))),
    }
}

/// JSON-file settings registry keyed by `namespace.key`.
pub struct FileSettingsStore {
    path: PathBuf,
    values: RwLock<Map<String, Value>>,
    registered: RwLock<BTreeSet<String>>,
}

impl FileSettingsStore {
    pub fn default_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "autotranslate-journal")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Settings("Failed to determine config directory".to_string()))
    }

    /// Load the settings file, starting empty when it does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if fs::try_exists(&path).await? {
            let content = fs::read_to_string(&path).await?;
            serde_json::from_str(&content)
                .map_err(|e| AppError::Settings(format!("Failed to parse settings: {}", e)))?
        } else {
            Map::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
            registered: RwLock::new(BTreeSet::new()),
        })
    }

    pub async fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = {
            let values = self.values.read().map_err(|_| poisoned())?;
            serde_json::to_string_pretty(&*values)?
        };

        fs::write(&self.path, content).await?;
        tracing::debug!(path = %self.path.display(), "Saved settings");
        Ok(())
    }

    fn ensure_registered(&self, key: &str) -> AppResult<()> {
        let registered = self.registered.read().map_err(|_| poisoned())?;
        if registered.contains(key) {
            Ok(())
        } else {
            Err(AppError::Settings(format!("Setting '{}' is not registered", key)))
        }
    }
}

fn poisoned() -> AppError {
    AppError::Settings("settings lock poisoned".to_string())
}

impl SettingsRegistry for FileSettingsStore {
    fn register(&self, definition: SettingDefinition) -> AppResult<()> {
        let key = definition.qualified_key();
        self.values
            .write()
            .map_err(|_| poisoned())?
            .entry(key.clone())
            .or_insert(definition.default);
        self.registered.write().map_err(|_| poisoned())?.insert(key);
        Ok(())
    }

    fn get(&self, namespace: &str, key: &str) -> AppResult<Value> {
        let key = qualified_key(namespace, key);
        self.ensure_registered(&key)?;
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(&key).cloned().unwrap_or(Value::Null))
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> AppResult<()> {
        let key = qualified_key(namespace, key);
        self.ensure_registered(&key)?;
        self.values.write().map_err(|_| poisoned())?.insert(key, value);
        Ok(())
    }
}

impl ConfigSource for FileSettingsStore {
    fn workflow_config(&self) -> AppResult<WorkflowConfig> {
        load_workflow_config(self)
    }
}
