use crate::core::error::EditorError;
use crate::core::value::{OptionValues, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One editable option as declared by an overlay plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionSpec {
    /// Control element: `select`, `input` or `textarea`. Absent means `input`.
    pub elem: Option<String>,
    /// Input flavour for `elem: input` (`text`, `checkbox`, `color`, `url`, `number`).
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub label: Option<String>,
    pub default: Value,
    pub hidden: bool,
    /// Allowed values for `select` options. Empty means unrestricted.
    pub options: Vec<String>,
    /// `advanced` places the field in the advanced section.
    pub group: Option<String>,
}

impl OptionSpec {
    pub fn new(elem: impl Into<String>) -> Self {
        Self {
            elem: Some(elem.into()),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn is_advanced(&self) -> bool {
        self.group.as_deref() == Some("advanced")
    }
}

/// Ordered option schema of an overlay kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    options: IndexMap<String, OptionSpec>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, name: impl Into<String>, spec: OptionSpec) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: OptionSpec) {
        self.options.insert(name.into(), spec);
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, EditorError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Loads a manifest file, picking the format from its extension.
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let source = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&source),
            _ => Self::from_yaml_str(&source),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionSpec)> {
        self.options.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Sets the `hidden` flag of an option. Returns `false` when it is absent.
    pub fn set_hidden(&mut self, name: &str, hidden: bool) -> bool {
        match self.options.get_mut(name) {
            Some(spec) => {
                spec.hidden = hidden;
                true
            }
            None => false,
        }
    }

    /// Default value of every option that declares one.
    pub fn defaults(&self) -> OptionValues {
        self.options
            .iter()
            .filter(|(_, spec)| !matches!(spec.default, Value::None))
            .map(|(name, spec)| (name.clone(), spec.default.clone()))
            .collect()
    }
}
