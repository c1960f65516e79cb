pub mod core;
pub mod editor;
pub mod host;
pub mod object;
pub mod panel;
pub mod state;

pub use self::core::config;
pub use self::core::error;
pub use self::core::manifest;
pub use self::core::value;

pub use editor::{EditorDescriptor, EditorRegistry};
pub use host::{PanelHost, ScreenTarget, Stage};
pub use object::{TrackEvent, TrackEventHandle};
pub use panel::{ControlEvent, Panel, PanelEvent};
pub use state::{DefaultsStore, EditorSession};
