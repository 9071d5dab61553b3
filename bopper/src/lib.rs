pub use editor::BopperEditor;
pub use loader::{AnimationLoader, LoadResult, LoadTicket};
pub use parameters::{BopperParameter, BopperParameters};
pub use plugin::BopperPlugin;
pub use processor::BopperProcessor;
pub use settings::{Selection, Settings};
pub use state::BopperState;
pub use view::{Effect, RenderedFrame, View, ViewHandler};

// Re-exports
pub use bopper_core;
pub use bopper_plugin;

mod editor;
mod loader;
mod parameters;
mod plugin;
mod processor;
mod settings;
mod state;
mod view;
