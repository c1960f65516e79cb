use crate::core::error::EditorError;
use crate::core::node::{FieldId, names};
use crate::core::value::{OptionValues, Value};
use crate::host::PanelHost;
use crate::object::track_event::{TrackEvent, TrackEventHandle};
use crate::object::validators::check_color;
use crate::panel::control::{ControlEvent, ControlKind, Section};
use crate::panel::event::PanelEvent;
use crate::panel::registry::FieldDescriptor;
use crate::panel::visibility::{VisibilityPatch, link_target_enabled, type_rule};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Change handler installed for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Handler {
    /// Forwards the control value unchanged.
    Generic,
    /// Checkbox inputs: coerces the control value to a boolean.
    Boolean,
    /// Overlay type: re-runs the type rule and blinks the target.
    Type,
    /// Icon picker: also commits while hovering a candidate.
    Icon,
    /// Colour inputs other than `fontColor`; the object validates them.
    Color,
    /// Rejects malformed colours in the panel before touching the object.
    FontColor,
    /// Keeps `linkTarget` enabled only while a link is set.
    LinkUrl,
}

impl Handler {
    /// Well-known options keep their handler whatever control edits them.
    fn route(name: &FieldId, control: ControlKind) -> Self {
        match name.as_str() {
            names::TYPE => Self::Type,
            names::ICON => Self::Icon,
            names::FONT_COLOR => Self::FontColor,
            names::LINK_URL => Self::LinkUrl,
            _ => match control {
                ControlKind::Checkbox => Self::Boolean,
                ControlKind::Color => Self::Color,
                ControlKind::Select
                | ControlKind::IconPicker
                | ControlKind::TextInput
                | ControlKind::Textarea => Self::Generic,
            },
        }
    }

    fn accepts(self, event: &ControlEvent) -> bool {
        match self {
            Self::Icon => matches!(event, ControlEvent::Settle(_) | ControlEvent::Hover(_)),
            _ => matches!(event, ControlEvent::Change(_)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldBinding {
    pub name: FieldId,
    pub label: String,
    pub control: ControlKind,
    pub handler: Handler,
    pub section: Section,
    /// Entries offered by select controls, in manifest order.
    pub choices: Vec<String>,
    pub displayed: Value,
    /// `false` for fields the manifest marks hidden.
    pub attached: bool,
    /// Display toggle driven by the type rule.
    pub shown: bool,
    pub enabled: bool,
}

impl FieldBinding {
    fn new(descriptor: FieldDescriptor) -> Self {
        let handler = Handler::route(&descriptor.name, descriptor.control);
        Self {
            name: descriptor.name,
            label: descriptor.label,
            control: descriptor.control,
            handler,
            section: descriptor.section,
            choices: descriptor.choices,
            displayed: descriptor.default,
            attached: !descriptor.hidden,
            shown: true,
            enabled: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.attached && self.shown
    }
}

/// Live state of an open options panel: one binding per field plus the
/// error region.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Panel {
    bindings: IndexMap<FieldId, FieldBinding>,
    error: Option<String>,
}

impl Panel {
    pub fn build(descriptors: Vec<FieldDescriptor>) -> Self {
        let mut bindings = IndexMap::with_capacity(descriptors.len());
        for descriptor in descriptors {
            bindings
                .entry(descriptor.name.clone())
                .or_insert_with(|| FieldBinding::new(descriptor));
        }
        Self {
            bindings,
            error: None,
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldBinding> {
        self.bindings.get(name)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &FieldBinding> {
        self.bindings.values()
    }

    pub fn displayed(&self, name: &str) -> Option<&Value> {
        self.get(name).map(|binding| &binding.displayed)
    }

    pub fn visible_fields(&self) -> Vec<&str> {
        self.bindings()
            .filter(|binding| binding.is_visible())
            .map(|binding| binding.name.as_str())
            .collect()
    }

    pub fn hidden_fields(&self) -> Vec<&str> {
        self.bindings()
            .filter(|binding| !binding.is_visible())
            .map(|binding| binding.name.as_str())
            .collect()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) -> PanelEvent {
        let message = message.into();
        self.error = Some(message.clone());
        PanelEvent::ErrorShown { message }
    }

    pub fn clear_error(&mut self) -> Option<PanelEvent> {
        self.error.take().map(|_| PanelEvent::ErrorCleared)
    }

    /// Applies `patch` to the fields present in this panel. Reports only
    /// fields whose display actually changed.
    pub fn apply_visibility(&mut self, patch: &VisibilityPatch) -> Option<PanelEvent> {
        let mut shown = Vec::new();
        let mut hidden = Vec::new();
        for (fields, show, changed) in [(patch.show, true, &mut shown), (patch.hide, false, &mut hidden)] {
            for name in fields {
                if let Some(binding) = self.bindings.get_mut(*name)
                    && binding.shown != show
                {
                    binding.shown = show;
                    changed.push(binding.name.clone());
                }
            }
        }
        if shown.is_empty() && hidden.is_empty() {
            None
        } else {
            Some(PanelEvent::VisibilityChanged { shown, hidden })
        }
    }

    pub fn set_link_target_enabled(&mut self, enabled: bool) -> Option<PanelEvent> {
        let binding = self.bindings.get_mut(names::LINK_TARGET)?;
        if binding.enabled == enabled {
            return None;
        }
        binding.enabled = enabled;
        Some(PanelEvent::LinkTargetToggled { enabled })
    }

    /// Copies the object's values into the controls, falling back to the
    /// manifest default for options the object does not carry yet.
    pub fn refresh(&mut self, object: &TrackEvent) -> Vec<PanelEvent> {
        for binding in self.bindings.values_mut() {
            binding.displayed = object
                .value(binding.name.as_str())
                .or_else(|| object.manifest().get(binding.name.as_str()).map(|spec| &spec.default))
                .cloned()
                .unwrap_or_default();
        }

        let mut events = vec![PanelEvent::FieldsRefreshed];
        events.extend(self.apply_visibility(&type_rule(object.value(names::TYPE))));
        events.extend(self.set_link_target_enabled(link_target_enabled(object.option_values())));
        events
    }

    /// Routes a control interaction to the handler bound to `field`.
    ///
    /// Unknown fields, disabled controls and events the handler does not
    /// listen to are ignored.
    pub fn dispatch<H: PanelHost + ?Sized>(
        &mut self,
        object: &TrackEventHandle,
        host: &mut H,
        field: &str,
        event: ControlEvent,
    ) -> Vec<PanelEvent> {
        let Some(binding) = self.bindings.get(field) else {
            debug!(field, "event for unbound field ignored");
            return vec![];
        };
        if !binding.enabled || !binding.handler.accepts(&event) {
            return vec![];
        }

        let handler = binding.handler;
        let name = binding.name.clone();
        let value = event.into_value();
        let mut events = Vec::new();

        match handler {
            Handler::Generic | Handler::Icon | Handler::Color => {
                self.update_safe(object, single(&name, value), &mut events);
            }
            Handler::Boolean => {
                let flag = value.to_bool().unwrap_or_else(|| value.is_truthy());
                self.update_safe(object, single(&name, Value::Bool(flag)), &mut events);
            }
            Handler::Type => {
                self.update_safe(object, single(&name, value), &mut events);
                let current = object.borrow().value(names::TYPE).cloned();
                events.extend(self.apply_visibility(&type_rule(current.as_ref())));
                events.push(blink_target(object, host));
            }
            Handler::FontColor => match check_color(&value.to_display_text()) {
                Err(message) => events.push(self.set_error(message)),
                Ok(()) => {
                    self.update_safe(object, single(names::FONT_COLOR, value), &mut events);
                }
            },
            Handler::LinkUrl => {
                self.update_safe(object, single(&name, value), &mut events);
                let enabled = link_target_enabled(object.borrow().option_values());
                events.extend(self.set_link_target_enabled(enabled));
            }
        }
        events
    }

    /// The one place the panel writes to the object. A rejected update is
    /// shown in the error region and never propagated.
    pub fn update_safe(
        &mut self,
        object: &TrackEventHandle,
        changes: OptionValues,
        events: &mut Vec<PanelEvent>,
    ) -> bool {
        let committed: Vec<(FieldId, Value)> = changes
            .iter()
            .map(|(name, value)| (FieldId::new(name.as_str()), value.clone()))
            .collect();

        let result = object.borrow_mut().update(changes);
        match result {
            Ok(()) => {
                events.extend(self.clear_error());
                events.extend(
                    committed
                        .into_iter()
                        .map(|(field, value)| PanelEvent::ValueCommitted { field, value }),
                );
                true
            }
            Err(err) => {
                debug!(error = %err, "update rejected, showing inline");
                events.push(self.set_error(err.message));
                false
            }
        }
    }
}

fn single(name: impl AsRef<str>, value: Value) -> OptionValues {
    let mut changes = OptionValues::with_capacity(1);
    changes.insert(name.as_ref().to_string(), value);
    changes
}

/// Highlights the overlay's target, or the current media when the target id
/// does not resolve.
fn blink_target<H: PanelHost + ?Sized>(object: &TrackEventHandle, host: &mut H) -> PanelEvent {
    let target = object.borrow().target().map(str::to_string);
    let outcome = target.as_deref().map(|id| blink_by_id(host, id));
    match outcome {
        Some(Ok(())) => PanelEvent::TargetBlinked { target },
        Some(Err(err)) => {
            debug!(error = %err, "falling back to current media");
            host.current_media().blink();
            PanelEvent::TargetBlinked { target: None }
        }
        None => {
            host.current_media().blink();
            PanelEvent::TargetBlinked { target: None }
        }
    }
}

fn blink_by_id<H: PanelHost + ?Sized>(host: &mut H, id: &str) -> Result<(), EditorError> {
    let target = host
        .lookup_target(id)
        .ok_or_else(|| EditorError::TargetNotFound(id.to_string()))?;
    target.blink();
    Ok(())
}
