pub use editor::{Editor, FRAME_RATE_HZ};
pub use error::Error;
pub use event::Event;
pub use host::Host;
pub use parameters::{Choice, ChoiceParameter, Parameters, ParameterId, ParameterValue};
pub use plugin::Plugin;
pub use processor::{Processor, ProcessorConfig, ProcessState};
pub use transport::{SharedTransport, Transport};

// Re-exports
pub use bopper_core;

mod editor;
mod error;
mod event;
mod host;
mod parameters;
mod plugin;
mod processor;
mod transport;
