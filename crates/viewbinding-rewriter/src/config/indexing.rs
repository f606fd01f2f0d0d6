use std::collections::{HashMap, HashSet};

use serde::Deserialize;

pub const MIN_MAX_FILE_SIZE_KB: u64 = 16;
pub const MAX_MAX_FILE_SIZE_KB: u64 = 1024 * 64;

/// Directory names never scanned for modules or sources.
pub const ALWAYS_EXCLUDED_DIRS: &[&str] = &["build", ".gradle", ".git", ".idea"];

#[derive(Debug, Clone, PartialEq)]
pub struct IndexingSettings {
    pub max_file_size_kb: u64,
    pub exclude_paths: Vec<String>,
}

impl Default for IndexingSettings {
    fn default() -> Self {
        Self {
            max_file_size_kb: 512,
            exclude_paths: Vec::new(),
        }
    }
}

impl IndexingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: IndexingSettingsPatch,
    ) {
        if let Some(v) = patch.max_file_size_kb {
            self.max_file_size_kb = v;
        }
        if let Some(v) = patch.exclude_paths {
            self.exclude_paths = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.max_file_size_kb = self.max_file_size_kb.clamp(MIN_MAX_FILE_SIZE_KB, MAX_MAX_FILE_SIZE_KB);
        let mut seen = HashSet::new();
        self.exclude_paths = self
            .exclude_paths
            .iter()
            .map(|p| p.trim().trim_end_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .filter(|p| seen.insert(p.clone()))
            .collect();
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_kb.saturating_mul(1024)
    }

    /// Whether a directory (by name, or by path relative to the workspace root) is skipped.
    pub fn is_excluded(
        &self,
        dir_name: &str,
        relative_path: &str,
    ) -> bool {
        ALWAYS_EXCLUDED_DIRS.contains(&dir_name)
            || self.exclude_paths.iter().any(|p| p == dir_name || p == relative_path)
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct IndexingSettingsPatch {
    pub(crate) max_file_size_kb: Option<u64>,
    pub(crate) exclude_paths: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}
