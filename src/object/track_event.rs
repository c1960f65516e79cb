use crate::core::error::ValidationError;
use crate::core::manifest::{Manifest, OptionSpec};
use crate::core::node::names;
use crate::core::value::{OptionValues, Value};
use crate::object::container::OverlayContainer;
use crate::object::validators::{self, Validator, run_validators};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

pub type TrackEventHandle = Rc<RefCell<TrackEvent>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectEventKind {
    Updated,
}

#[derive(Clone)]
pub enum ObjectEvent {
    /// The object changed. `replacement` carries the instance that now stands
    /// for the overlay when the host swapped it (undo/redo).
    Updated {
        replacement: Option<TrackEventHandle>,
    },
    /// An update initiated outside the panel was rejected.
    UpdateFailed { message: String },
}

impl fmt::Debug for ObjectEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated { replacement } => f
                .debug_struct("Updated")
                .field(
                    "replacement",
                    &replacement.as_ref().map(|handle| handle.borrow().id().to_string()),
                )
                .finish(),
            Self::UpdateFailed { message } => f
                .debug_struct("UpdateFailed")
                .field("message", message)
                .finish(),
        }
    }
}

/// A timed overlay on the timeline, as seen by its editor.
///
/// Notifications are not dispatched synchronously: they are queued per
/// listener and collected with [`TrackEvent::take_events`], so a listener is
/// never re-entered while the object is borrowed.
pub struct TrackEvent {
    id: String,
    kind: String,
    manifest: Manifest,
    values: OptionValues,
    container: OverlayContainer,
    validators: IndexMap<String, Vec<Validator>>,
    listeners: Vec<(ObjectEventKind, ListenerId)>,
    error_sink: Option<ListenerId>,
    mailbox: Vec<(ListenerId, ObjectEvent)>,
    revision: u64,
}

impl TrackEvent {
    /// Creates an overlay whose values start at the manifest defaults.
    pub fn new(id: impl Into<String>, kind: impl Into<String>, manifest: Manifest) -> Self {
        let values = manifest.defaults();
        Self {
            id: id.into(),
            kind: kind.into(),
            manifest,
            values,
            container: OverlayContainer::default(),
            validators: IndexMap::new(),
            listeners: Vec::new(),
            error_sink: None,
            mailbox: Vec::new(),
            revision: 0,
        }
    }

    /// Seeds values without validation, as the host does when it creates the object.
    pub fn with_values(mut self, values: OptionValues) -> Self {
        self.values.extend(values);
        self
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn with_container(mut self, container: OverlayContainer) -> Self {
        self.container = container;
        self
    }

    pub fn with_validator(mut self, name: impl Into<String>, validator: Validator) -> Self {
        self.validators.entry(name.into()).or_default().push(validator);
        self
    }

    pub fn into_handle(self) -> TrackEventHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn option_values(&self) -> &OptionValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Id of the screen target the overlay is displayed on.
    pub fn target(&self) -> Option<&str> {
        self.value(names::TARGET)
            .and_then(Value::as_text)
            .filter(|id| !id.is_empty())
    }

    pub fn container(&self) -> &OverlayContainer {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut OverlayContainer {
        &mut self.container
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Validates and applies `changes` as one unit. Nothing is written when
    /// any entry is rejected; the rejection is also reported to the error sink.
    pub fn update(&mut self, changes: OptionValues) -> Result<(), ValidationError> {
        let mut accepted = OptionValues::with_capacity(changes.len());
        for (name, value) in changes {
            match self.check_option(&name, value) {
                Ok(value) => {
                    accepted.insert(name, value);
                }
                Err(err) => {
                    debug!(track_event = %self.id, option = %name, error = %err, "update rejected");
                    if let Some(sink) = self.error_sink {
                        self.mailbox.push((
                            sink,
                            ObjectEvent::UpdateFailed {
                                message: err.message.clone(),
                            },
                        ));
                    }
                    return Err(err);
                }
            }
        }

        self.values.extend(accepted);
        self.revision += 1;
        self.notify(ObjectEvent::Updated { replacement: None });
        Ok(())
    }

    /// Announces that `next` replaces this instance, e.g. after undo.
    pub fn hand_over(&mut self, next: TrackEventHandle) {
        self.notify(ObjectEvent::Updated {
            replacement: Some(next),
        });
    }

    pub fn listen(&mut self, kind: ObjectEventKind, listener: ListenerId) {
        if !self.listeners.contains(&(kind, listener)) {
            self.listeners.push((kind, listener));
        }
    }

    pub fn unlisten(&mut self, kind: ObjectEventKind, listener: ListenerId) {
        self.listeners.retain(|entry| *entry != (kind, listener));
        self.mailbox.retain(|(id, _)| *id != listener);
    }

    pub fn is_listening(&self, listener: ListenerId) -> bool {
        self.listeners.iter().any(|(_, id)| *id == listener)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn set_update_error_sink(&mut self, sink: Option<ListenerId>) {
        self.error_sink = sink;
    }

    pub fn update_error_sink(&self) -> Option<ListenerId> {
        self.error_sink
    }

    /// Drains the notifications queued for `listener`.
    pub fn take_events(&mut self, listener: ListenerId) -> Vec<ObjectEvent> {
        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(self.mailbox.len());
        for (id, event) in self.mailbox.drain(..) {
            if id == listener {
                taken.push(event);
            } else {
                kept.push((id, event));
            }
        }
        self.mailbox = kept;
        taken
    }

    fn notify(&mut self, event: ObjectEvent) {
        let kind = match event {
            ObjectEvent::Updated { .. } => ObjectEventKind::Updated,
            ObjectEvent::UpdateFailed { .. } => return,
        };
        for (listened, id) in &self.listeners {
            if *listened == kind {
                self.mailbox.push((*id, event.clone()));
            }
        }
    }

    fn check_option(&self, name: &str, value: Value) -> Result<Value, ValidationError> {
        let Some(spec) = self.manifest.get(name) else {
            return Err(ValidationError::for_field(
                name,
                format!("'{name}' is not an option of {}", self.kind),
            ));
        };

        let value = normalize(name, spec, value)?;
        if let Some(custom) = self.validators.get(name) {
            run_validators(custom, &value.to_display_text())
                .map_err(|message| ValidationError::for_field(name, message))?;
        }
        Ok(value)
    }
}

fn normalize(name: &str, spec: &OptionSpec, value: Value) -> Result<Value, ValidationError> {
    let elem = spec.elem.as_deref().unwrap_or("input");
    let input_type = spec.input_type.as_deref().unwrap_or("text");

    if elem == "select" && !spec.options.is_empty() {
        let text = value.to_display_text();
        if !spec.options.iter().any(|option| *option == text) {
            return Err(ValidationError::for_field(
                name,
                format!("'{text}' is not a valid choice for {name}"),
            ));
        }
        return Ok(value);
    }

    if elem != "input" {
        return Ok(value);
    }

    match input_type {
        "checkbox" => value.to_bool().map(Value::Bool).ok_or_else(|| {
            ValidationError::for_field(name, format!("{name} must be true or false"))
        }),
        "number" => match &value {
            Value::Number(_) | Value::None => Ok(value),
            Value::Text(text) if text.trim().is_empty() => Ok(Value::None),
            Value::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Value::Number)
                .map_err(|_| ValidationError::for_field(name, format!("{name} must be a number"))),
            _ => Err(ValidationError::for_field(name, format!("{name} must be a number"))),
        },
        "color" => {
            validators::check_color(&value.to_display_text())
                .map_err(|message| ValidationError::for_field(name, message))?;
            Ok(value)
        }
        "url" => {
            validators::url()(&value.to_display_text())
                .map_err(|message| ValidationError::for_field(name, message))?;
            Ok(value)
        }
        _ => Ok(value),
    }
}

impl fmt::Debug for TrackEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackEvent")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("values", &self.values)
            .field("revision", &self.revision)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popup_manifest() -> Manifest {
        Manifest::new()
            .with_option(
                "type",
                OptionSpec::new("select").with_options(["popup", "speech"]).with_default("popup"),
            )
            .with_option("fontSize", OptionSpec::new("input").with_type("number"))
            .with_option("flip", OptionSpec::new("input").with_type("checkbox"))
            .with_option("fontColor", OptionSpec::new("input").with_type("color"))
            .with_option("text", OptionSpec::new("textarea"))
    }

    fn changes(pairs: &[(&str, Value)]) -> OptionValues {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn new_object_starts_from_manifest_defaults() {
        let event = TrackEvent::new("te-1", "popup", popup_manifest());
        assert_eq!(event.value("type"), Some(&Value::from("popup")));
        assert_eq!(event.revision(), 0);
    }

    #[test]
    fn update_normalizes_numbers_and_checkboxes() {
        let mut event = TrackEvent::new("te-1", "popup", popup_manifest());
        event
            .update(changes(&[("fontSize", Value::from("14")), ("flip", Value::from("true"))]))
            .expect("valid update");
        assert_eq!(event.value("fontSize"), Some(&Value::Number(14.0)));
        assert_eq!(event.value("flip"), Some(&Value::Bool(true)));
        assert_eq!(event.revision(), 1);
    }

    #[test]
    fn rejected_update_writes_nothing() {
        let mut event = TrackEvent::new("te-1", "popup", popup_manifest());
        let err = event
            .update(changes(&[("text", Value::from("Hi")), ("type", Value::from("tooltip"))]))
            .expect_err("bad choice");
        assert_eq!(err.field.as_ref().map(|f| f.as_str()), Some("type"));
        assert_eq!(event.value("text"), None);
        assert_eq!(event.revision(), 0);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut event = TrackEvent::new("te-1", "popup", popup_manifest());
        assert!(event.update(changes(&[("volume", Value::Number(1.0))])).is_err());
    }

    #[test]
    fn custom_validator_runs_on_display_text() {
        let mut event = TrackEvent::new("te-1", "popup", popup_manifest())
            .with_validator("text", validators::max_length(3));
        let err = event
            .update(changes(&[("text", Value::from("Hello"))]))
            .expect_err("too long");
        assert_eq!(err.message, "Maximum length is 3");
    }

    #[test]
    fn updates_are_queued_per_listener() {
        let mut event = TrackEvent::new("te-1", "popup", popup_manifest());
        let first = ListenerId::next();
        let second = ListenerId::next();
        event.listen(ObjectEventKind::Updated, first);
        event.listen(ObjectEventKind::Updated, first);
        event.listen(ObjectEventKind::Updated, second);
        assert_eq!(event.listener_count(), 2);

        event
            .update(changes(&[("text", Value::from("Hi"))]))
            .expect("valid update");
        assert_eq!(event.take_events(first).len(), 1);
        assert!(event.take_events(first).is_empty());
        assert_eq!(event.take_events(second).len(), 1);
    }

    #[test]
    fn unlisten_drops_pending_and_future_events() {
        let mut event = TrackEvent::new("te-1", "popup", popup_manifest());
        let listener = ListenerId::next();
        event.listen(ObjectEventKind::Updated, listener);
        event
            .update(changes(&[("text", Value::from("Hi"))]))
            .expect("valid update");
        event.unlisten(ObjectEventKind::Updated, listener);
        event
            .update(changes(&[("text", Value::from("Ho"))]))
            .expect("valid update");
        assert!(event.take_events(listener).is_empty());
        assert!(!event.is_listening(listener));
    }

    #[test]
    fn failures_reach_the_error_sink() {
        let mut event = TrackEvent::new("te-1", "popup", popup_manifest());
        let sink = ListenerId::next();
        event.set_update_error_sink(Some(sink));
        let _ = event.update(changes(&[("fontColor", Value::from("nope"))]));
        let events = event.take_events(sink);
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], ObjectEvent::UpdateFailed { message } if message.contains("nope")));
    }

    #[test]
    fn hand_over_carries_the_replacement() {
        let mut event = TrackEvent::new("te-1", "popup", popup_manifest());
        let listener = ListenerId::next();
        event.listen(ObjectEventKind::Updated, listener);
        let next = TrackEvent::new("te-2", "popup", popup_manifest()).into_handle();
        event.hand_over(next);

        let events = event.take_events(listener);
        let Some(ObjectEvent::Updated {
            replacement: Some(handle),
        }) = events.first()
        else {
            panic!("expected replacement");
        };
        assert_eq!(handle.borrow().id(), "te-2");
    }
}
