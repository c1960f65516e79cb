pub mod config;
pub mod error;
pub mod manifest;
pub mod node;
pub mod value;

pub use config::EditorConfig;
pub use error::{EditorError, ValidationError};
pub use manifest::{Manifest, OptionSpec};
pub use node::FieldId;
pub use value::{OptionValues, Value};
