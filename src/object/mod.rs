pub mod container;
pub mod track_event;
pub mod validators;

pub use container::{Anchor, OverlayContainer, prevent_anchor_navigation};
pub use track_event::{ListenerId, ObjectEvent, ObjectEventKind, TrackEvent, TrackEventHandle};
