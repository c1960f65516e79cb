pub mod defaults;
pub mod session;

pub use defaults::DefaultsStore;
pub use session::EditorSession;
