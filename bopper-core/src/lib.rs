pub use animation::{AnimationSet, AnimationState, CurrentFrame, Frame};
pub use effects::{EffectTransform, Effects};
pub use error::Error;
pub use filter::FilterSelection;
pub use playback::{Direction, PlaybackConfig, SpeedDivisor};
pub use presets::Preset;
pub use tempo::TransportSample;

// Re-exports
pub use image;

pub mod animation;
pub mod decode;
pub mod effects;
mod error;
pub mod filter;
pub mod playback;
pub mod presets;
pub mod tempo;
