use crate::core::config::EditorConfig;
use crate::core::error::EditorError;
use crate::core::node::names;
use crate::host::{PanelHost, Tooltip};
use crate::object::container::prevent_anchor_navigation;
use crate::object::track_event::{ListenerId, ObjectEvent, ObjectEventKind, TrackEventHandle};
use crate::panel::binding::Panel;
use crate::panel::control::ControlEvent;
use crate::panel::event::PanelEvent;
use crate::panel::registry::build_descriptors;
use crate::panel::visibility::{FontSizeMode, font_size_rule};
use crate::state::defaults::DefaultsStore;
use std::rc::Rc;
use tracing::{debug, info, warn};

enum SessionState {
    Closed,
    Open(OpenPanel),
}

struct OpenPanel {
    object: TrackEventHandle,
    font_size: FontSizeMode,
    panel: Panel,
}

impl OpenPanel {
    fn replace_object(&mut self, next: TrackEventHandle, listener: ListenerId) {
        if Rc::ptr_eq(&self.object, &next) {
            return;
        }
        {
            let mut previous = self.object.borrow_mut();
            previous.unlisten(ObjectEventKind::Updated, listener);
            if previous.update_error_sink() == Some(listener) {
                previous.set_update_error_sink(None);
            }
        }
        {
            let mut current = next.borrow_mut();
            current.listen(ObjectEventKind::Updated, listener);
            current.set_update_error_sink(Some(listener));
        }
        self.object = next;
    }
}

/// Options panel for one overlay at a time.
///
/// `Closed → Open → Closed`. While open the session holds the edited object,
/// listens to its updates and routes control events through the panel's
/// bindings. Everything it is handed after closing is ignored.
pub struct EditorSession<H: PanelHost> {
    config: EditorConfig,
    host: H,
    listener: ListenerId,
    state: SessionState,
}

impl<H: PanelHost> EditorSession<H> {
    pub fn new(host: H, config: EditorConfig) -> Self {
        Self {
            config,
            host,
            listener: ListenerId::next(),
            state: SessionState::Closed,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, SessionState::Open(_))
    }

    pub fn panel(&self) -> Option<&Panel> {
        match &self.state {
            SessionState::Open(open) => Some(&open.panel),
            SessionState::Closed => None,
        }
    }

    pub fn object(&self) -> Option<&TrackEventHandle> {
        match &self.state {
            SessionState::Open(open) => Some(&open.object),
            SessionState::Closed => None,
        }
    }

    pub fn font_size_mode(&self) -> Option<FontSizeMode> {
        match &self.state {
            SessionState::Open(open) => Some(open.font_size),
            SessionState::Closed => None,
        }
    }

    /// Builds the panel for `object` and starts listening to it.
    ///
    /// Opening an already open session closes it first. A manifest the panel
    /// cannot build leaves the session as it was and the object untouched.
    pub fn open(&mut self, object: TrackEventHandle) -> Result<Vec<PanelEvent>, EditorError> {
        let (font_size, descriptors) = {
            let current = object.borrow();
            let mut manifest = current.manifest().clone();
            let font_size = font_size_rule(current.option_values(), &mut manifest);
            let descriptors = build_descriptors(&manifest, &self.config.ignore_keys)
                .inspect_err(|err| warn!(track_event = current.id(), error = %err, "panel build failed"))?;
            (font_size, descriptors)
        };

        let mut events = Vec::new();
        if self.is_open() {
            info!("panel opened while open, closing the previous object first");
            events.extend(self.close());
        }

        let object_id = {
            let mut current = object.borrow_mut();
            prevent_anchor_navigation(current.container_mut());
            current.id().to_string()
        };
        events.push(PanelEvent::Opened {
            object_id: object_id.clone(),
        });

        let mut panel = Panel::build(descriptors);
        if panel.get(names::LINK_URL).is_some() {
            let tooltip = self.link_tooltip(&object_id);
            events.push(PanelEvent::TooltipShown {
                name: tooltip.name.clone(),
            });
            self.host.create_tooltip(tooltip);
        }
        self.host.create_start_end_inputs(&object_id);
        self.host.create_defaults_affordance(&object_id);
        events.extend(panel.refresh(&object.borrow()));

        {
            let mut current = object.borrow_mut();
            current.set_update_error_sink(Some(self.listener));
            current.listen(ObjectEventKind::Updated, self.listener);
        }

        info!(track_event = %object_id, fields = panel.len(), "panel opened");
        self.state = SessionState::Open(OpenPanel {
            object,
            font_size,
            panel,
        });
        Ok(events)
    }

    pub fn close(&mut self) -> Vec<PanelEvent> {
        let SessionState::Open(open) = std::mem::replace(&mut self.state, SessionState::Closed)
        else {
            return vec![];
        };

        let mut object = open.object.borrow_mut();
        object.unlisten(ObjectEventKind::Updated, self.listener);
        if object.update_error_sink() == Some(self.listener) {
            object.set_update_error_sink(None);
        }
        let object_id = object.id().to_string();
        info!(track_event = %object_id, "panel closed");
        vec![PanelEvent::Closed { object_id }]
    }

    /// Feeds a control interaction to the bound field, then applies the
    /// object notifications it caused.
    pub fn handle_control_event(&mut self, field: &str, event: ControlEvent) -> Vec<PanelEvent> {
        let SessionState::Open(open) = &mut self.state else {
            debug!(field, "control event on closed panel ignored");
            return vec![];
        };
        let mut events = open.panel.dispatch(&open.object, &mut self.host, field, event);
        events.extend(self.pump());
        events
    }

    /// Applies notifications queued on the edited object for this panel.
    pub fn pump(&mut self) -> Vec<PanelEvent> {
        let listener = self.listener;
        let SessionState::Open(open) = &mut self.state else {
            return vec![];
        };

        let pending = open.object.borrow_mut().take_events(listener);
        let mut events = Vec::new();
        for event in pending {
            match event {
                ObjectEvent::Updated { replacement } => {
                    if let Some(next) = replacement {
                        open.replace_object(next, listener);
                        events.push(PanelEvent::ObjectReplaced {
                            object_id: open.object.borrow().id().to_string(),
                        });
                    }
                    prevent_anchor_navigation(open.object.borrow_mut().container_mut());
                    events.extend(open.panel.refresh(&open.object.borrow()));
                    events.extend(open.panel.clear_error());
                }
                ObjectEvent::UpdateFailed { message } => {
                    if open.panel.error() != Some(message.as_str()) {
                        events.push(open.panel.set_error(message));
                    }
                }
            }
        }
        events
    }

    /// Saves the edited object's values as defaults for its kind.
    pub fn set_as_defaults(&self, store: &mut DefaultsStore) -> bool {
        let SessionState::Open(open) = &self.state else {
            return false;
        };
        let object = open.object.borrow();
        store.record(object.kind(), object.option_values(), &self.config.ignore_keys);
        debug!(kind = object.kind(), "saved panel values as defaults");
        true
    }

    fn link_tooltip(&self, object_id: &str) -> Tooltip {
        let config = &self.config.link_tooltip;
        Tooltip {
            name: format!("{}-{object_id}", config.name_prefix),
            anchor: names::LINK_URL.to_string(),
            message: config.message.clone(),
            top: config.top.clone(),
            left: config.left.clone(),
            hidden: true,
            hover: false,
        }
    }
}
