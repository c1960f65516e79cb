/// Hyperlink embedded in an overlay's rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    navigation_enabled: bool,
}

impl Anchor {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            navigation_enabled: true,
        }
    }

    /// Simulates a click. Returns whether the browser would navigate.
    pub fn click(&self) -> bool {
        self.navigation_enabled
    }

    pub fn prevent_navigation(&mut self) {
        self.navigation_enabled = false;
    }
}

/// The overlay's visual container on the stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayContainer {
    anchors: Vec<Anchor>,
    /// Selectors of the content regions present in the rendered markup.
    regions: Vec<String>,
}

impl OverlayContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchors.push(anchor);
        self
    }

    pub fn with_region(mut self, selector: impl Into<String>) -> Self {
        self.regions.push(selector.into());
        self
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    pub fn first_anchor_mut(&mut self) -> Option<&mut Anchor> {
        self.anchors.first_mut()
    }

    /// First of `selectors` present in the container.
    pub fn find_region<'a>(&self, selectors: &[&'a str]) -> Option<&'a str> {
        selectors
            .iter()
            .copied()
            .find(|selector| self.regions.iter().any(|region| region == selector))
    }
}

/// Stops the first embedded hyperlink from navigating away from the editor.
pub fn prevent_anchor_navigation(container: &mut OverlayContainer) -> bool {
    match container.first_anchor_mut() {
        Some(anchor) => {
            anchor.prevent_navigation();
            true
        }
        None => false,
    }
}
