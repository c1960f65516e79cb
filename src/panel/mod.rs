pub mod binding;
pub mod control;
pub mod event;
pub mod registry;
pub mod visibility;

pub use binding::{FieldBinding, Handler, Panel};
pub use control::{ControlEvent, ControlKind, Section};
pub use event::PanelEvent;
pub use registry::{FieldDescriptor, build_descriptors};
pub use visibility::{FontSizeMode, VisibilityPatch};
