use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Option values of an overlay, keyed by option name in manifest order.
pub type OptionValues = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            Self::List(v) => v.is_empty(),
            _ => false,
        }
    }

    /// Script-style truthiness: `None`, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(v) => *v,
            Self::Number(v) => *v != 0.0 && !v.is_nan(),
            Self::Text(v) => !v.is_empty(),
            Self::List(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            Self::Text(v) => match v.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" | "" => Some(false),
                _ => None,
            },
            Self::Number(v) => Some(*v != 0.0),
            _ => None,
        }
    }

    /// Text form used when a value is shown in a text-like control.
    pub fn to_display_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::Bool(v) => v.to_string(),
            Self::Number(v) => v.to_string(),
            Self::Text(v) => v.clone(),
            Self::List(items) => items
                .iter()
                .map(Value::to_display_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn truthiness_follows_script_rules() {
        assert!(!Value::None.is_truthy());
        assert!(!Value::Text(String::new()).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Number(f64::NAN).is_truthy());
        assert!(Value::Number(12.0).is_truthy());
        assert!(Value::from("http://example.org").is_truthy());
    }

    #[test]
    fn deserializes_untagged_json() {
        let values: Vec<Value> =
            serde_json::from_str(r#"[null, true, 3.5, "popup", ["a"]]"#).expect("json");
        assert_eq!(
            values,
            vec![
                Value::None,
                Value::Bool(true),
                Value::Number(3.5),
                Value::from("popup"),
                Value::List(vec![Value::from("a")]),
            ]
        );
    }

    #[test]
    fn text_to_bool_accepts_checkbox_spellings() {
        assert_eq!(Value::from("on").to_bool(), Some(true));
        assert_eq!(Value::from("No").to_bool(), Some(false));
        assert_eq!(Value::from("maybe").to_bool(), None);
    }
}
