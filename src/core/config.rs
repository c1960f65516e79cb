use crate::core::error::EditorError;
use crate::core::node::names;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Editor kind the panel registers under.
    pub name: String,
    /// Template resource path; `{{baseDir}}` expands to `base_dir`.
    pub template: String,
    pub base_dir: String,
    /// Manifest keys handled by the separate start/end widget.
    pub ignore_keys: Vec<String>,
    pub link_tooltip: TooltipConfig,
    pub resizable: ResizeConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            name: "popup".to_string(),
            template: "load!{{baseDir}}plugins/popup-editor.html".to_string(),
            base_dir: String::new(),
            ignore_keys: vec![names::START.to_string(), names::END.to_string()],
            link_tooltip: TooltipConfig::default(),
            resizable: ResizeConfig::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, EditorError> {
        serde_yaml::from_str(source).map_err(|err| EditorError::Config(err.to_string()))
    }

    pub fn from_json_str(source: &str) -> Result<Self, EditorError> {
        serde_json::from_str(source).map_err(|err| EditorError::Config(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn resolved_template(&self) -> String {
        self.template.replace("{{baseDir}}", &self.base_dir)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub name_prefix: String,
    pub message: String,
    pub top: String,
    pub left: String,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            name_prefix: "text-link-tooltip".to_string(),
            message: "Links will be clickable when shared.".to_string(),
            top: "105%".to_string(),
            left: "50%".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    pub handle_positions: String,
    pub min_width: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            handle_positions: "e".to_string(),
            min_width: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EditorConfig;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = EditorConfig::from_yaml_str("base_dir: /butter/\nresizable:\n  min_width: 24\n")
            .expect("config");
        assert_eq!(config.name, "popup");
        assert_eq!(config.resizable.min_width, 24);
        assert_eq!(config.resizable.handle_positions, "e");
        assert_eq!(
            config.resolved_template(),
            "load!/butter/plugins/popup-editor.html"
        );
        assert_eq!(config.ignore_keys, vec!["start", "end"]);
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let err = EditorConfig::from_json_str("{\"ignore_keys\": 5}").expect_err("must fail");
        assert!(matches!(err, crate::core::error::EditorError::Config(_)));
    }
}
