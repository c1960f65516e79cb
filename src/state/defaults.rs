use crate::core::error::EditorError;
use crate::core::value::OptionValues;
use crate::object::track_event::TrackEvent;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Option values saved with "set as default", per overlay kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultsStore {
    by_kind: IndexMap<String, OptionValues>,
}

impl DefaultsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(source: &str) -> Result<Self, EditorError> {
        serde_json::from_str(source).map_err(|err| EditorError::Config(err.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, EditorError> {
        serde_json::to_string_pretty(self).map_err(|err| EditorError::Config(err.to_string()))
    }

    /// Replaces the saved defaults of `kind`, leaving out `ignore` keys.
    pub fn record(&mut self, kind: &str, values: &OptionValues, ignore: &[String]) {
        let kept = values
            .iter()
            .filter(|(name, _)| !ignore.iter().any(|ignored| ignored == *name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        self.by_kind.insert(kind.to_string(), kept);
    }

    pub fn get(&self, kind: &str) -> Option<&OptionValues> {
        self.by_kind.get(kind)
    }

    /// Overlays the saved defaults of the object's kind onto its values.
    pub fn seed(&self, object: TrackEvent) -> TrackEvent {
        match self.get(object.kind()) {
            Some(saved) => {
                let saved = saved.clone();
                object.with_values(saved)
            }
            None => object,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::{Manifest, OptionSpec};
    use crate::core::value::Value;

    fn values() -> OptionValues {
        [
            ("start", Value::Number(1.0)),
            ("end", Value::Number(4.0)),
            ("type", Value::from("speech")),
            ("fontColor", Value::from("#000")),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
    }

    #[test]
    fn record_drops_ignored_keys() {
        let mut store = DefaultsStore::new();
        store.record("popup", &values(), &["start".to_string(), "end".to_string()]);
        let saved = store.get("popup").expect("saved");
        assert_eq!(saved.keys().collect::<Vec<_>>(), vec!["type", "fontColor"]);
    }

    #[test]
    fn seed_overrides_manifest_defaults() {
        let mut store = DefaultsStore::new();
        store.record("popup", &values(), &[]);
        let manifest = Manifest::new()
            .with_option("type", OptionSpec::new("select").with_default("popup"));
        let seeded = store.seed(TrackEvent::new("te-9", "popup", manifest));
        assert_eq!(seeded.value("type"), Some(&Value::from("speech")));
    }

    #[test]
    fn json_round_trip_keeps_kinds() {
        let mut store = DefaultsStore::new();
        store.record("popup", &values(), &[]);
        let json = store.to_json_string().expect("json");
        let restored = DefaultsStore::from_json_str(&json).expect("restore");
        assert_eq!(restored, store);
        assert!(restored.get("text").is_none());
    }
}
