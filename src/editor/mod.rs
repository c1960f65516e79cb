//! Registration of editor kinds with the host.

use crate::core::config::EditorConfig;
use crate::core::error::EditorError;
use crate::host::PanelHost;
use crate::object::container::OverlayContainer;
use crate::state::session::EditorSession;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Selectors of the editable text region, in lookup order.
pub const CONTENT_REGIONS: &[&str] = &[".popup-inner-div > div", ".speechBubble > div"];

/// Behaviour the host applies to an overlay's container on stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Affordance {
    ContentEditable { selectors: Vec<String> },
    Selectable,
    /// Dragging is constrained to the overlay's target.
    Draggable,
    Resizable {
        handle_positions: String,
        min_width: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorDescriptor {
    pub name: String,
    pub template: String,
    pub affordances: Vec<Affordance>,
}

impl EditorDescriptor {
    /// The popup/speech-bubble editor as configured by `config`.
    pub fn popup(config: &EditorConfig) -> Self {
        Self {
            name: config.name.clone(),
            template: config.resolved_template(),
            affordances: vec![
                Affordance::ContentEditable {
                    selectors: CONTENT_REGIONS.iter().map(|s| s.to_string()).collect(),
                },
                Affordance::Selectable,
                Affordance::Draggable,
                Affordance::Resizable {
                    handle_positions: config.resizable.handle_positions.clone(),
                    min_width: config.resizable.min_width,
                },
            ],
        }
    }

    /// Resolves the affordances against a rendered container. A content
    /// region absent from the container yields `None` for that affordance.
    pub fn resolve_affordances<'a>(
        &'a self,
        container: &OverlayContainer,
    ) -> Vec<(&'a Affordance, Option<&'a str>)> {
        self.affordances
            .iter()
            .map(|affordance| match affordance {
                Affordance::ContentEditable { selectors } => {
                    let candidates: Vec<&str> = selectors.iter().map(String::as_str).collect();
                    (affordance, container.find_region(&candidates))
                }
                _ => (affordance, None),
            })
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct EditorRegistry {
    editors: IndexMap<String, EditorDescriptor>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `descriptor`, returning the one it replaces.
    pub fn register(&mut self, descriptor: EditorDescriptor) -> Option<EditorDescriptor> {
        debug!(editor = %descriptor.name, template = %descriptor.template, "editor registered");
        self.editors.insert(descriptor.name.clone(), descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&EditorDescriptor> {
        self.editors.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.editors.keys().map(String::as_str)
    }

    /// Creates a closed session for a registered editor kind.
    pub fn create_session<H: PanelHost>(
        &self,
        name: &str,
        host: H,
        config: EditorConfig,
    ) -> Result<EditorSession<H>, EditorError> {
        if !self.editors.contains_key(name) {
            return Err(EditorError::UnknownEditor(name.to_string()));
        }
        Ok(EditorSession::new(host, config))
    }
}
