//! Run configuration loaded from `viewbinding.toml`.
//!
//! Each category lives in its own file as a public settings struct with
//! defaults plus a private `*Patch` struct for partial deserialization.
//! [`Settings`] aggregates the categories; patches are applied over the
//! defaults and the result is `normalize()`d.

pub(crate) mod formatting;
pub(crate) mod indexing;
pub(crate) mod logging;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

pub use formatting::{FormattingSettings, MAX_BLANK_LINES_LIMIT};
use formatting::FormattingSettingsPatch;
pub use indexing::{ALWAYS_EXCLUDED_DIRS, IndexingSettings, MAX_MAX_FILE_SIZE_KB, MIN_MAX_FILE_SIZE_KB};
use indexing::IndexingSettingsPatch;
pub use logging::{LogLevel, LoggingSettings};
use logging::LoggingSettingsPatch;
use serde::Deserialize;
use tracing::debug;

use crate::error::{RewriteError, RewriteResult};
use crate::variant::VariantSpec;
use crate::host::ModuleId;

pub const CONFIG_FILENAME: &str = "viewbinding.toml";
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "someExtinguishableTemporaryName_";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub default_app_prefix: Option<String>,
    pub placeholder_prefix: String,
    pub variants: Vec<String>,
    /// Module name (Gradle path or its last segment) to application package prefix.
    pub modules: BTreeMap<String, String>,
    pub custom_variants: Vec<VariantSpec>,
    pub indexing: IndexingSettings,
    pub formatting: FormattingSettings,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_app_prefix: None,
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
            variants: VariantSpec::builtins().into_iter().map(|v| v.name).collect(),
            modules: BTreeMap::new(),
            custom_variants: Vec::new(),
            indexing: IndexingSettings::default(),
            formatting: FormattingSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Parses a `viewbinding.toml` document; `path` is only used for error messages.
    pub fn from_toml_str(
        content: &str,
        path: &Path,
    ) -> RewriteResult<Self> {
        let patch: SettingsPatch = toml::from_str(content).map_err(|source| RewriteError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings = Self::default();
        settings.apply_patch(patch);
        settings.normalize();
        Ok(settings)
    }

    pub fn load(path: &Path) -> RewriteResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RewriteError::io(path, source))?;
        Self::from_toml_str(&content, path)
    }

    /// Loads `explicit` when given, else the nearest `viewbinding.toml` at or
    /// above `root`, else the defaults.
    pub fn discover(
        root: &Path,
        explicit: Option<&Path>,
    ) -> RewriteResult<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => find_config_file(root),
        };
        match path {
            Some(path) => {
                debug!("loading configuration from {}", path.display());
                Self::load(&path)
            },
            None => Ok(Self::default()),
        }
    }

    /// The application package prefix for a module, e.g. `com.example.app`.
    ///
    /// Looked up by full Gradle path (`feature:login`), then by last path
    /// segment (`login`), then `default_app_prefix`.
    pub fn app_prefix(
        &self,
        module: &ModuleId,
    ) -> Option<&str> {
        self.modules
            .get(module.gradle_path())
            .or_else(|| self.modules.get(module.short_name()))
            .map(String::as_str)
            .or(self.default_app_prefix.as_deref())
    }

    /// Resolves the enabled variant names against built-ins and custom variants.
    pub fn enabled_variants(&self) -> RewriteResult<Vec<VariantSpec>> {
        self.variants
            .iter()
            .map(|name| {
                self.custom_variants
                    .iter()
                    .find(|variant| &variant.name == name)
                    .cloned()
                    .or_else(|| VariantSpec::builtin(name))
                    .ok_or_else(|| RewriteError::UnknownVariant(name.clone()))
            })
            .collect()
    }

    fn apply_patch(
        &mut self,
        patch: SettingsPatch,
    ) {
        if let Some(v) = patch.default_app_prefix {
            self.default_app_prefix = Some(v);
        }
        if let Some(v) = patch.placeholder_prefix {
            self.placeholder_prefix = v;
        }
        if let Some(v) = patch.variants {
            self.variants = v;
        }
        if let Some(v) = patch.modules {
            self.modules = v;
        }
        if let Some(v) = patch.custom_variants {
            self.custom_variants = v;
        }
        if let Some(p) = patch.indexing {
            self.indexing.apply_patch(p);
        }
        if let Some(p) = patch.formatting {
            self.formatting.apply_patch(p);
        }
        if let Some(p) = patch.logging {
            self.logging.apply_patch(p);
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.default_app_prefix = self
            .default_app_prefix
            .take()
            .map(|prefix| prefix.trim().trim_end_matches('.').to_string())
            .filter(|prefix| !prefix.is_empty());

        self.placeholder_prefix = self.placeholder_prefix.trim().to_string();
        if self.placeholder_prefix.is_empty() {
            self.placeholder_prefix = DEFAULT_PLACEHOLDER_PREFIX.to_string();
        }

        let mut seen = HashSet::new();
        self.variants = self
            .variants
            .iter()
            .map(|name| name.trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .filter(|name| seen.insert(name.clone()))
            .collect();

        self.modules = std::mem::take(&mut self.modules)
            .into_iter()
            .map(|(module, prefix)| (module.trim().trim_start_matches(':').to_string(), prefix.trim().to_string()))
            .filter(|(_, prefix)| !prefix.is_empty())
            .collect();

        self.indexing.normalize();
        self.formatting.normalize();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct SettingsPatch {
    default_app_prefix: Option<String>,
    placeholder_prefix: Option<String>,
    variants: Option<Vec<String>>,
    modules: Option<BTreeMap<String, String>>,
    custom_variants: Option<Vec<VariantSpec>>,
    indexing: Option<IndexingSettingsPatch>,
    formatting: Option<FormattingSettingsPatch>,
    logging: Option<LoggingSettingsPatch>,
    #[serde(flatten)]
    _extra: HashMap<String, toml::Value>,
}

/// Walks parent directories from `start` looking for `viewbinding.toml`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = if start.is_file() {
        start.parent()?
    } else {
        start
    };
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

#[cfg(test)]
#[path = "../../tests/src/config/settings_tests.rs"]
mod tests;
