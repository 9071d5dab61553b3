use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const PULSE_DEPTH: f64 = 0.03;
pub const SHAKE_AMPLITUDE: f64 = 3.0;

const SHAKES_PER_CYCLE: f64 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Effects {
    pub pulse: bool,
    pub shake: bool,
}

/// Placement tweak for the frame on screen: scale about the centre, then offset in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectTransform {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl EffectTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };
}

impl Default for EffectTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Effects {
    pub fn transform(&self, phase: f64) -> EffectTransform {
        let mut transform = EffectTransform::IDENTITY;

        if self.pulse {
            transform.scale = pulse_scale(phase);
        }

        if self.shake {
            (transform.offset_x, transform.offset_y) = shake_offset(phase);
        }

        transform
    }
}

/// Peaks on the beat and decays over the rest of it.
pub fn pulse_scale(phase: f64) -> f64 {
    1.0 + PULSE_DEPTH * decay(phase).powi(3)
}

pub fn shake_offset(phase: f64) -> (f64, f64) {
    if !phase.is_finite() {
        return (0.0, 0.0);
    }

    let angle = TAU * SHAKES_PER_CYCLE * phase;
    let amplitude = SHAKE_AMPLITUDE * decay(phase);

    (amplitude * angle.sin(), amplitude * angle.cos() * 0.5)
}

fn decay(phase: f64) -> f64 {
    if phase.is_finite() {
        1.0 - phase.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
