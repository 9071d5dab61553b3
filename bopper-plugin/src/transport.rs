use std::sync::atomic::AtomicBool;

use bopper_core::{tempo::{sanitize_tempo, DEFAULT_TEMPO}, TransportSample};
use portable_atomic::{AtomicF64, Ordering};

/// What the host reported for one processing block. Hosts may leave out tempo or position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transport {
    pub(crate) playing: bool,
    pub(crate) tempo: Option<f64>,
    pub(crate) position_beats: Option<f64>,
}

impl Transport {
    pub fn new(playing: bool, tempo: Option<f64>, position_beats: Option<f64>) -> Self {
        Self {
            playing,
            tempo,
            position_beats,
        }
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn tempo(&self) -> Option<f64> {
        self.tempo
    }

    pub fn position_beats(&self) -> Option<f64> {
        self.position_beats
    }
}

/// Latest transport state, written by the audio thread and read by the UI tick.
///
/// Every field is its own atomic so publishing never blocks or allocates. A reader
/// can observe fields from two neighbouring blocks, which only costs a frame of lag.
pub struct SharedTransport {
    tempo: AtomicF64,
    position_beats: AtomicF64,
    playing: AtomicBool,
}

impl SharedTransport {
    pub fn new() -> Self {
        Self {
            tempo: AtomicF64::new(DEFAULT_TEMPO),
            position_beats: AtomicF64::new(0.0),
            playing: AtomicBool::new(false),
        }
    }

    pub fn publish(&self, transport: &Transport) {
        // Missing tempo keeps the last good value
        if let Some(tempo) = transport.tempo {
            self.tempo.store(sanitize_tempo(tempo), Ordering::Release);
        }

        let position_beats = transport.position_beats
            .filter(|position| position.is_finite())
            .unwrap_or(0.0);

        self.position_beats.store(position_beats, Ordering::Release);
        self.playing.store(transport.playing, Ordering::Release);
    }

    pub fn publish_stopped(&self) {
        self.playing.store(false, Ordering::Release);
    }

    pub fn sample(&self) -> TransportSample {
        TransportSample::new(
            self.tempo.load(Ordering::Acquire),
            self.position_beats.load(Ordering::Acquire),
            self.playing.load(Ordering::Acquire),
        )
    }
}

impl Default for SharedTransport {
    fn default() -> Self {
        Self::new()
    }
}
