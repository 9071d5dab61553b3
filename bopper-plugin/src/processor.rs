use crate::{event::Event, transport::Transport};

/// What the host tells a processor before the first block.
#[derive(Clone, Debug, Default)]
pub struct ProcessorConfig {
    pub sample_rate: f64,
    pub max_block_size: usize,
    /// Rendering to disk rather than playing live.
    pub offline: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// Keep sending blocks, even while the input is silent.
    Continue,
    Failed,
}

/// Audio-thread half of a plugin. Nothing here may block, allocate or log.
pub trait Processor: Send {
    /// The host stopped playback or reset the plugin.
    fn reset(&mut self);

    /// Handles one block in place. `channels` holds one slice per channel and
    /// `transport` is `None` when the host reports nothing.
    fn process(&mut self, channels: &mut [&mut [f32]], transport: Option<Transport>, events: impl Iterator<Item = Event>) -> ProcessState;

    /// Parameter events delivered while no audio is running.
    fn process_events(&mut self, events: impl Iterator<Item = Event>);
}
