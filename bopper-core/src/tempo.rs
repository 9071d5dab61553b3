pub const DEFAULT_TEMPO: f64 = 120.0;

const FALLBACK_MS_PER_BEAT: f64 = 500.0;
const FALLBACK_FRAME_INTERVAL_MS: f64 = 100.0;

/// One reading of the host transport, as seen by the UI tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransportSample {
    pub tempo_bpm: f64,
    pub position_beats: f64,
    pub is_playing: bool,
}

impl TransportSample {
    pub fn new(tempo_bpm: f64, position_beats: f64, is_playing: bool) -> Self {
        Self {
            tempo_bpm,
            position_beats,
            is_playing,
        }
    }

    pub fn tempo(&self) -> f64 {
        sanitize_tempo(self.tempo_bpm)
    }
}

impl Default for TransportSample {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPO, 0.0, false)
    }
}

pub fn sanitize_tempo(tempo_bpm: f64) -> f64 {
    if tempo_bpm.is_finite() && tempo_bpm > 0.0 {
        tempo_bpm
    } else {
        DEFAULT_TEMPO
    }
}

/// Fractional position within the current beat, always in `[0, 1)`.
///
/// Negative positions wrap the same way positive ones do, so `-0.25` is `0.75`.
pub fn beat_phase(position_beats: f64) -> f64 {
    if !position_beats.is_finite() {
        return 0.0;
    }

    let phase = position_beats - position_beats.floor();

    // Tiny negative positions round up to exactly 1.0
    if phase >= 1.0 {
        0.0
    } else {
        phase
    }
}

pub fn ms_per_beat(tempo_bpm: f64) -> f64 {
    if !tempo_bpm.is_finite() || tempo_bpm <= 0.0 {
        return FALLBACK_MS_PER_BEAT;
    }

    60_000.0 / tempo_bpm
}

/// How long a single frame stays on screen when the whole set plays over one beat.
pub fn frame_interval_ms(tempo_bpm: f64, total_frames: usize) -> f64 {
    if total_frames == 0 {
        return FALLBACK_FRAME_INTERVAL_MS;
    }

    ms_per_beat(tempo_bpm) / total_frames as f64
}
