use crate::core::error::EditorError;
use crate::core::manifest::Manifest;
use crate::core::node::FieldId;
use crate::core::value::Value;
use crate::panel::control::{ControlKind, Section};

/// Static description of one editable field, derived from the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: FieldId,
    pub control: ControlKind,
    pub label: String,
    /// Created but kept out of the visible panel.
    pub hidden: bool,
    pub default: Value,
    pub choices: Vec<String>,
    pub section: Section,
}

/// Lists the fields of `manifest` in declaration order, skipping `ignore`.
///
/// Fails on the first entry whose control cannot be built, so callers never
/// see a partial field list.
pub fn build_descriptors(
    manifest: &Manifest,
    ignore: &[String],
) -> Result<Vec<FieldDescriptor>, EditorError> {
    manifest
        .iter()
        .filter(|(name, _)| !ignore.iter().any(|ignored| ignored == name))
        .map(|(name, spec)| {
            let control = ControlKind::resolve(name, spec)?;
            Ok(FieldDescriptor {
                name: FieldId::new(name),
                control,
                label: spec.label.clone().unwrap_or_else(|| name.to_string()),
                hidden: spec.hidden,
                default: spec.default.clone(),
                choices: spec.options.clone(),
                section: if spec.is_advanced() {
                    Section::Advanced
                } else {
                    Section::Basic
                },
            })
        })
        .collect()
}
