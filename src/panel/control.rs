use crate::core::error::EditorError;
use crate::core::manifest::OptionSpec;
use crate::core::node::names;
use crate::core::value::Value;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    Select,
    TextInput,
    Checkbox,
    Color,
    Textarea,
    /// Icon chooser. Previews on hover as well as on commit.
    IconPicker,
}

impl ControlKind {
    /// Maps a manifest entry onto the control that edits it.
    pub fn resolve(name: &str, spec: &OptionSpec) -> Result<Self, EditorError> {
        let elem = spec.elem.as_deref().unwrap_or("input");
        match elem {
            "select" | "input" if name == names::ICON => Ok(Self::IconPicker),
            "select" => Ok(Self::Select),
            "textarea" => Ok(Self::Textarea),
            "input" => match spec.input_type.as_deref().unwrap_or("text") {
                "checkbox" => Ok(Self::Checkbox),
                "color" => Ok(Self::Color),
                "text" | "url" | "number" if name == names::FONT_COLOR => Ok(Self::Color),
                "text" | "url" | "number" => Ok(Self::TextInput),
                other => Err(EditorError::configuration(
                    name,
                    format!("unsupported input type '{other}'"),
                )),
            },
            other => Err(EditorError::configuration(
                name,
                format!("unsupported control element '{other}'"),
            )),
        }
    }
}

/// Raw interaction reported by a control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The value was committed (change event).
    Change(Value),
    /// The value settled after typing (keyup).
    Settle(Value),
    /// The pointer rests on a candidate value.
    Hover(Value),
}

impl ControlEvent {
    pub fn into_value(self) -> Value {
        match self {
            Self::Change(value) | Self::Settle(value) | Self::Hover(value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Basic,
    Advanced,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_kinds_from_elem_and_type() {
        let cases = [
            ("type", OptionSpec::new("select"), ControlKind::Select),
            ("icon", OptionSpec::new("select"), ControlKind::IconPicker),
            ("icon", OptionSpec::default(), ControlKind::IconPicker),
            ("text", OptionSpec::new("textarea"), ControlKind::Textarea),
            ("flip", OptionSpec::new("input").with_type("checkbox"), ControlKind::Checkbox),
            ("fontColor", OptionSpec::new("input").with_type("text"), ControlKind::Color),
            ("background", OptionSpec::new("input").with_type("color"), ControlKind::Color),
            ("linkUrl", OptionSpec::new("input").with_type("url"), ControlKind::TextInput),
            ("triangle", OptionSpec::default(), ControlKind::TextInput),
        ];
        for (name, spec, expected) in cases {
            assert_eq!(ControlKind::resolve(name, &spec).expect(name), expected, "{name}");
        }
    }

    #[test]
    fn unsupported_elements_are_configuration_errors() {
        let err = ControlKind::resolve("volume", &OptionSpec::new("slider")).expect_err("slider");
        assert!(matches!(err, EditorError::Configuration { ref field, .. } if field == "volume"));

        let err = ControlKind::resolve("when", &OptionSpec::new("input").with_type("date"))
            .expect_err("date");
        assert!(err.to_string().contains("unsupported input type 'date'"));
    }

    #[test]
    fn font_color_still_needs_a_supported_type() {
        let err = ControlKind::resolve("fontColor", &OptionSpec::new("input").with_type("date"))
            .expect_err("date");
        assert!(matches!(err, EditorError::Configuration { ref field, .. } if field == "fontColor"));
    }
}
