use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use serde_json::Value;

pub(crate) const SETTINGS_SECTION_KEY: &str = "angularjs-analyzer";
const MIN_DEBOUNCE_MS: u64 = 50;
const MAX_DEBOUNCE_MS: u64 = 5000;

/// Path fragments skipped when files are offered to the index.
pub(crate) const DEFAULT_EXCLUDE_PATHS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    "coverage",
    "test",
    "tests",
    "spec",
    "specs",
    "e2e",
    "mock",
    "mocks",
    "fixture",
    "fixtures",
    "stub",
    "stubs",
    "support",
    "vendor",
    "tmp",
    "temp",
    "lib",
];

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ServerSettings {
    pub(crate) indexing: IndexingSettings,
    pub(crate) definition: DefinitionSettings,
    pub(crate) logging: LoggingSettings,
}

impl ServerSettings {
    pub(crate) fn from_lsp_payload(payload: Option<&Value>) -> Self {
        match payload {
            Some(payload) => Self::default().merged_with_payload(payload),
            None => Self::default(),
        }
    }

    /// Overlay `payload` on `self`. The payload may be the settings object
    /// itself or wrap it under [`SETTINGS_SECTION_KEY`]; both are applied,
    /// the namespaced one last.
    pub(crate) fn merged_with_payload(
        &self,
        payload: &Value,
    ) -> Self {
        let mut merged = self.clone();
        let scoped = payload.get(SETTINGS_SECTION_KEY);
        for candidate in std::iter::once(payload).chain(scoped) {
            if let Ok(patch) = ServerSettingsPatch::deserialize(candidate) {
                merged.apply_patch(patch);
            }
        }
        merged.normalize();
        merged
    }

    fn apply_patch(
        &mut self,
        patch: ServerSettingsPatch,
    ) {
        if let Some(indexing) = patch.indexing {
            self.indexing.apply_patch(indexing);
        }
        if let Some(definition) = patch.definition {
            self.definition.apply_patch(definition);
        }
        if let Some(logging) = patch.logging {
            self.logging.apply_patch(logging);
        }
    }

    fn normalize(&mut self) {
        self.indexing.normalize();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct IndexingSettings {
    pub(crate) enable: bool,
    pub(crate) exclude_paths: Vec<String>,
    pub(crate) file_extensions: Vec<String>,
    pub(crate) full_rebuild_on_save: bool,
    pub(crate) debounce_ms: u64,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self {
            enable: true,
            exclude_paths: DEFAULT_EXCLUDE_PATHS.iter().map(|path| path.to_string()).collect(),
            file_extensions: vec![".js".to_string()],
            full_rebuild_on_save: false,
            debounce_ms: 300,
        }
    }
}

impl IndexingSettings {
    fn apply_patch(
        &mut self,
        patch: IndexingSettingsPatch,
    ) {
        if let Some(enable) = patch.enable {
            self.enable = enable;
        }
        if let Some(exclude_paths) = patch.exclude_paths {
            self.exclude_paths = exclude_paths;
        }
        if let Some(file_extensions) = patch.file_extensions {
            self.file_extensions = file_extensions;
        }
        if let Some(full_rebuild_on_save) = patch.full_rebuild_on_save {
            self.full_rebuild_on_save = full_rebuild_on_save;
        }
        if let Some(debounce_ms) = patch.debounce_ms {
            self.debounce_ms = debounce_ms;
        }
    }

    fn normalize(&mut self) {
        self.debounce_ms = self.debounce_ms.clamp(MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS);
        self.exclude_paths = trimmed_unique(&self.exclude_paths, |path| path.to_lowercase());
        self.file_extensions = trimmed_unique(&self.file_extensions, |ext| {
            let ext = ext.to_lowercase();
            if ext.starts_with('.') { ext } else { format!(".{ext}") }
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DefinitionSettings {
    pub(crate) rebuild_on_miss: bool,
}

impl Default for DefinitionSettings {
    fn default() -> Self {
        Self {
            rebuild_on_miss: true,
        }
    }
}

impl DefinitionSettings {
    fn apply_patch(
        &mut self,
        patch: DefinitionSettingsPatch,
    ) {
        if let Some(rebuild_on_miss) = patch.rebuild_on_miss {
            self.rebuild_on_miss = rebuild_on_miss;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct LoggingSettings {
    pub(crate) level: LoggingLevel,
}

impl LoggingSettings {
    fn apply_patch(
        &mut self,
        patch: LoggingSettingsPatch,
    ) {
        if let Some(level) = patch.level {
            self.level = level;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LoggingLevel {
    pub(crate) fn allows_info(self) -> bool {
        self >= LoggingLevel::Info
    }

    pub(crate) fn allows_warn(self) -> bool {
        self >= LoggingLevel::Warn
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct ServerSettingsPatch {
    indexing: Option<IndexingSettingsPatch>,
    definition: Option<DefinitionSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct IndexingSettingsPatch {
    #[serde(alias = "enabled")]
    enable: Option<bool>,
    exclude_paths: Option<Vec<String>>,
    file_extensions: Option<Vec<String>>,
    full_rebuild_on_save: Option<bool>,
    debounce_ms: Option<u64>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct DefinitionSettingsPatch {
    rebuild_on_miss: Option<bool>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LoggingSettingsPatch {
    level: Option<LoggingLevel>,
    #[serde(flatten)]
    _extra: HashMap<String, Value>,
}

fn trimmed_unique(
    values: &[String],
    shape: impl Fn(&str) -> String,
) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(shape)
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src/server/settings_tests.rs"]
mod tests;
