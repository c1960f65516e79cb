//! Capabilities the surrounding editor lends to a panel.

use serde::Serialize;

/// Something on the stage that can be highlighted.
pub trait ScreenTarget {
    fn id(&self) -> &str;
    fn blink(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub name: String,
    /// Field the tooltip is anchored to.
    pub anchor: String,
    pub message: String,
    pub top: String,
    pub left: String,
    pub hidden: bool,
    pub hover: bool,
}

pub trait PanelHost {
    fn lookup_target(&mut self, id: &str) -> Option<&mut dyn ScreenTarget>;

    /// The media surface currently playing, used when no target resolves.
    fn current_media(&mut self) -> &mut dyn ScreenTarget;

    fn create_tooltip(&mut self, tooltip: Tooltip);

    fn create_start_end_inputs(&mut self, _object_id: &str) {}

    fn create_defaults_affordance(&mut self, _object_id: &str) {}
}

/// In-memory stage that records what the panel asked of it.
#[derive(Debug, Default)]
pub struct Stage {
    targets: Vec<StageTarget>,
    media: StageTarget,
    tooltips: Vec<Tooltip>,
    start_end_inputs: Vec<String>,
    defaults_affordances: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct StageTarget {
    pub id: String,
    pub blinks: u32,
}

impl StageTarget {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            blinks: 0,
        }
    }
}

impl ScreenTarget for StageTarget {
    fn id(&self) -> &str {
        &self.id
    }

    fn blink(&mut self) {
        self.blinks += 1;
    }
}

impl Stage {
    pub fn new(media_id: impl Into<String>) -> Self {
        Self {
            targets: Vec::new(),
            media: StageTarget::new(media_id),
            tooltips: Vec::new(),
            start_end_inputs: Vec::new(),
            defaults_affordances: Vec::new(),
        }
    }

    pub fn with_target(mut self, id: impl Into<String>) -> Self {
        self.targets.push(StageTarget::new(id));
        self
    }

    pub fn targets(&self) -> &[StageTarget] {
        &self.targets
    }

    pub fn media(&self) -> &StageTarget {
        &self.media
    }

    pub fn tooltips(&self) -> &[Tooltip] {
        &self.tooltips
    }

    pub fn start_end_inputs(&self) -> &[String] {
        &self.start_end_inputs
    }

    pub fn defaults_affordances(&self) -> &[String] {
        &self.defaults_affordances
    }
}

impl PanelHost for Stage {
    fn lookup_target(&mut self, id: &str) -> Option<&mut dyn ScreenTarget> {
        self.targets
            .iter_mut()
            .find(|target| target.id == id)
            .map(|target| target as &mut dyn ScreenTarget)
    }

    fn current_media(&mut self) -> &mut dyn ScreenTarget {
        &mut self.media
    }

    fn create_tooltip(&mut self, tooltip: Tooltip) {
        self.tooltips.push(tooltip);
    }

    fn create_start_end_inputs(&mut self, object_id: &str) {
        self.start_end_inputs.push(object_id.to_string());
    }

    fn create_defaults_affordance(&mut self, object_id: &str) {
        self.defaults_affordances.push(object_id.to_string());
    }
}
