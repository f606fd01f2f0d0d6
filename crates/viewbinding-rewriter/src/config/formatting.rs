use std::collections::HashMap;

use serde::Deserialize;

pub const MAX_BLANK_LINES_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct FormattingSettings {
    pub optimize_imports: bool,
    pub max_blank_lines: usize,
    pub enable_command: bool,
    pub command: String,
    pub args: Vec<String>,
}

impl Default for FormattingSettings {
    fn default() -> Self {
        Self {
            optimize_imports: true,
            max_blank_lines: 1,
            enable_command: false,
            command: "ktlint".to_string(),
            args: vec!["--format".to_string(), "--stdin".to_string()],
        }
    }
}

impl FormattingSettings {
    pub(crate) fn apply_patch(
        &mut self,
        patch: FormattingSettingsPatch,
    ) {
        if let Some(v) = patch.optimize_imports {
            self.optimize_imports = v;
        }
        if let Some(v) = patch.max_blank_lines {
            self.max_blank_lines = v;
        }
        if let Some(v) = patch.enable_command {
            self.enable_command = v;
        }
        if let Some(v) = patch.command {
            self.command = v;
        }
        if let Some(v) = patch.args {
            self.args = v;
        }
    }

    pub(crate) fn normalize(&mut self) {
        self.max_blank_lines = self.max_blank_lines.min(MAX_BLANK_LINES_LIMIT);
        self.command = self.command.trim().to_string();
        if self.command.is_empty() {
            self.command = "ktlint".to_string();
        }
        self.args = self.args.iter().map(|a| a.trim().to_string()).filter(|a| !a.is_empty()).collect();
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub(crate) struct FormattingSettingsPatch {
    pub(crate) optimize_imports: Option<bool>,
    pub(crate) max_blank_lines: Option<usize>,
    pub(crate) enable_command: Option<bool>,
    pub(crate) command: Option<String>,
    pub(crate) args: Option<Vec<String>>,
    #[serde(flatten)]
    pub(crate) _extra: HashMap<String, toml::Value>,
}
