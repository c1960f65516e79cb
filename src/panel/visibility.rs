//! Pure rules deciding which fields the panel shows.

use crate::core::manifest::Manifest;
use crate::core::node::names;
use crate::core::value::{OptionValues, Value};

/// Fields to show and hide. Names missing from the panel are skipped by the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityPatch {
    pub show: &'static [&'static str],
    pub hide: &'static [&'static str],
}

const POPUP_ONLY: &[&str] = &[names::TRIANGLE, names::FLIP];
const SPEECH_ONLY: &[&str] = &[names::SOUND, names::ICON];

/// `popup` shows the triangle and flip controls; every other type shows sound
/// and icon instead.
pub fn type_rule(overlay_type: Option<&Value>) -> VisibilityPatch {
    let is_popup = overlay_type.and_then(Value::as_text) == Some(names::POPUP);
    if is_popup {
        VisibilityPatch {
            show: POPUP_ONLY,
            hide: SPEECH_ONLY,
        }
    } else {
        VisibilityPatch {
            show: SPEECH_ONLY,
            hide: POPUP_ONLY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSizeMode {
    /// Absolute `fontSize` is user visible.
    Absolute,
    /// Relative `fontPercentage` is user visible.
    Percentage,
}

/// Marks exactly one of `fontSize`/`fontPercentage` as hidden in `manifest`.
/// Run once when a panel is built; the object may keep both keys.
pub fn font_size_rule(values: &OptionValues, manifest: &mut Manifest) -> FontSizeMode {
    let absolute = values.get(names::FONT_SIZE).is_some_and(Value::is_truthy);
    manifest.set_hidden(names::FONT_PERCENTAGE, absolute);
    manifest.set_hidden(names::FONT_SIZE, !absolute);
    if absolute {
        FontSizeMode::Absolute
    } else {
        FontSizeMode::Percentage
    }
}

/// The link target chooser only makes sense once a link is set.
pub fn link_target_enabled(values: &OptionValues) -> bool {
    values.get(names::LINK_URL).is_some_and(Value::is_truthy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::OptionSpec;

    fn values(pairs: &[(&str, Value)]) -> OptionValues {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn popup_and_speech_are_inverse() {
        let popup = type_rule(Some(&Value::from("popup")));
        let speech = type_rule(Some(&Value::from("speech")));
        assert_eq!(popup.show, speech.hide);
        assert_eq!(popup.hide, speech.show);
        assert_eq!(popup.show, &["triangle", "flip"]);
    }

    #[test]
    fn missing_type_counts_as_speech() {
        assert_eq!(type_rule(None), type_rule(Some(&Value::from("speech"))));
        assert_eq!(type_rule(Some(&Value::Bool(true))).show, &["sound", "icon"]);
    }

    #[test]
    fn font_size_hides_percentage() {
        let mut manifest = Manifest::new()
            .with_option("fontSize", OptionSpec::new("input"))
            .with_option("fontPercentage", OptionSpec::new("input"));

        let mode = font_size_rule(&values(&[("fontSize", Value::Number(18.0))]), &mut manifest);
        assert_eq!(mode, FontSizeMode::Absolute);
        assert!(manifest.get("fontPercentage").expect("pct").hidden);
        assert!(!manifest.get("fontSize").expect("size").hidden);

        let mode = font_size_rule(&values(&[("fontSize", Value::Number(0.0))]), &mut manifest);
        assert_eq!(mode, FontSizeMode::Percentage);
        assert!(!manifest.get("fontPercentage").expect("pct").hidden);
        assert!(manifest.get("fontSize").expect("size").hidden);
    }

    #[test]
    fn font_size_rule_tolerates_absent_options() {
        let mut manifest = Manifest::new().with_option("text", OptionSpec::new("textarea"));
        let mode = font_size_rule(&OptionValues::new(), &mut manifest);
        assert_eq!(mode, FontSizeMode::Percentage);
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn link_target_follows_url_truthiness() {
        assert!(!link_target_enabled(&OptionValues::new()));
        assert!(!link_target_enabled(&values(&[("linkUrl", Value::from(""))])));
        assert!(link_target_enabled(&values(&[("linkUrl", Value::from("http://x.org"))])));
    }
}
