use std::path::PathBuf;

use bopper_core::{playback::SpeedDivisor, Direction, EffectTransform, FilterSelection, Frame};

/// Everything a renderer needs to draw one UI frame.
#[derive(Clone, Copy, Debug)]
pub struct RenderedFrame<'a> {
    /// Filtered frame, or a 1x1 transparent image when nothing is loaded.
    pub image: &'a Frame,
    pub frame_index: Option<usize>,
    pub transform: EffectTransform,
    pub tempo_bpm: f64,
    pub ms_per_beat: f64,
    pub beat_phase: f64,
    pub width: u32,
    pub height: u32,
    pub is_loaded: bool,
    pub scale: f64,
}

pub trait View {
    fn present(&mut self, frame: &RenderedFrame<'_>);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Pulse,
    Shake,
}

/// Callbacks from the UI controls.
pub trait ViewHandler {
    fn on_preset_selected(&mut self, index: usize);
    fn on_upload_requested(&mut self, path: PathBuf);
    fn on_speed_selected(&mut self, speed: SpeedDivisor);
    fn on_direction_selected(&mut self, direction: Direction);
    fn on_reverse_toggled(&mut self, enabled: bool);
    fn on_ping_pong_toggled(&mut self, enabled: bool);
    fn on_filter_selected(&mut self, filter: FilterSelection);
    fn on_effect_toggled(&mut self, effect: Effect, enabled: bool);
}
