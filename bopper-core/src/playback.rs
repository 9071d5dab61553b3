use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::tempo::beat_phase;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
    PingPong,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Forward, Direction::Reverse, Direction::PingPong];

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Forward => "Forward",
            Direction::Reverse => "Reverse",
            Direction::PingPong => "Ping-Pong",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Stretches one animation cycle over `2^exponent` beats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct SpeedDivisor(u8);

impl SpeedDivisor {
    pub const MAX_EXPONENT: u8 = 4;
    pub const ALL: [SpeedDivisor; 5] = [Self(0), Self(1), Self(2), Self(3), Self(4)];

    pub fn new(exponent: u8) -> Option<Self> {
        (exponent <= Self::MAX_EXPONENT).then_some(Self(exponent))
    }

    pub fn exponent(&self) -> u8 {
        self.0
    }

    pub fn beats_per_cycle(&self) -> f64 {
        (1u32 << self.0) as f64
    }

    pub fn scale(&self) -> f64 {
        1.0 / self.beats_per_cycle()
    }

    pub fn scale_position(&self, position_beats: f64) -> f64 {
        position_beats / self.beats_per_cycle()
    }
}

impl Display for SpeedDivisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => f.write_str("1x"),
            exponent => write!(f, "1/{}", 1u32 << exponent),
        }
    }
}

impl TryFrom<u8> for SpeedDivisor {
    type Error = crate::Error;

    fn try_from(exponent: u8) -> Result<Self, Self::Error> {
        Self::new(exponent).ok_or(crate::Error::SpeedOutOfRange(exponent))
    }
}

impl From<SpeedDivisor> for u8 {
    fn from(speed: SpeedDivisor) -> Self {
        speed.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaybackConfig {
    pub speed: SpeedDivisor,
    pub direction: Direction,
}

impl PlaybackConfig {
    pub fn new(speed: SpeedDivisor, direction: Direction) -> Self {
        Self {
            speed,
            direction,
        }
    }

    pub fn with_speed(mut self, speed: SpeedDivisor) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Reverse toggle as presented to the user. Turning it on replaces ping-pong.
    pub fn set_reverse(&mut self, enabled: bool) {
        self.toggle(Direction::Reverse, enabled);
    }

    /// Ping-pong toggle as presented to the user. Turning it on replaces reverse.
    pub fn set_ping_pong(&mut self, enabled: bool) {
        self.toggle(Direction::PingPong, enabled);
    }

    pub fn phase_at(&self, position_beats: f64) -> f64 {
        beat_phase(self.speed.scale_position(position_beats))
    }

    pub fn frame_at(&self, position_beats: f64, total_frames: usize) -> usize {
        frame_index(self.phase_at(position_beats), total_frames, self.direction)
    }

    fn toggle(&mut self, direction: Direction, enabled: bool) {
        if enabled {
            self.direction = direction;
        } else if self.direction == direction {
            self.direction = Direction::Forward;
        }
    }
}

/// Maps a beat phase in `[0, 1)` to a frame in `[0, total_frames - 1]`.
///
/// The raw ping-pong value at the turnaround is `total_frames`, which lands on the
/// last frame through the same clamp every direction goes through. An empty set
/// always yields frame 0.
pub fn frame_index(phase: f64, total_frames: usize, direction: Direction) -> usize {
    let sweep = match direction {
        Direction::Forward => phase,
        Direction::Reverse => 1.0 - phase,
        Direction::PingPong if phase < 0.5 => phase * 2.0,
        Direction::PingPong => (1.0 - phase) * 2.0,
    };

    let raw = (sweep * total_frames as f64).floor();
    let last = total_frames.saturating_sub(1);

    // Float to int casts saturate and map NaN to 0
    usize::min(raw as usize, last)
}

#[cfg(test)]
mod tests {
    use approx::assert_ulps_eq;

    use super::*;

    #[test]
    fn forward_boundaries() {
        assert_eq!(frame_index(0.0, 8, Direction::Forward), 0);
        assert_eq!(frame_index(0.999, 8, Direction::Forward), 7);
        assert_eq!(frame_index(0.25, 8, Direction::Forward), 2);
    }

    #[test]
    fn reverse_mirrors_forward() {
        assert_eq!(frame_index(0.0, 8, Direction::Reverse), 7);
        assert_eq!(frame_index(0.999, 8, Direction::Reverse), 0);

        for step in 1..100 {
            let phase = step as f64 / 100.0 + 0.001;
            assert_eq!(
                frame_index(phase, 8, Direction::Reverse),
                frame_index(1.0 - phase, 8, Direction::Forward),
                "phase {phase}",
            );
        }
    }

    #[test]
    fn ping_pong_is_symmetric() {
        assert_eq!(frame_index(0.25, 8, Direction::PingPong), 4);
        assert_eq!(frame_index(0.75, 8, Direction::PingPong), 4);
        assert_eq!(frame_index(0.0, 8, Direction::PingPong), 0);
        assert_eq!(frame_index(0.999, 8, Direction::PingPong), 0);

        for step in 1..50 {
            let offset = step as f64 / 100.0;
            assert_eq!(
                frame_index(0.5 - offset, 8, Direction::PingPong),
                frame_index(0.5 + offset, 8, Direction::PingPong),
                "offset {offset}",
            );
        }
    }

    #[test]
    fn ping_pong_turnaround_clamps_to_last_frame() {
        assert_eq!(frame_index(0.5, 8, Direction::PingPong), 7);
        assert_eq!(frame_index(0.4999, 8, Direction::PingPong), 7);
    }

    #[test]
    fn index_never_leaves_range() {
        for direction in Direction::ALL {
            for total_frames in 1..20 {
                for step in 0..=1000 {
                    let phase = step as f64 / 1000.0;
                    let index = frame_index(phase, total_frames, direction);
                    assert!(index < total_frames);
                }

                assert!(frame_index(-0.5, total_frames, direction) < total_frames);
                assert!(frame_index(1.5, total_frames, direction) < total_frames);
                assert!(frame_index(f64::NAN, total_frames, direction) < total_frames);
            }
        }
    }

    #[test]
    fn empty_set_yields_first_frame() {
        for direction in Direction::ALL {
            assert_eq!(frame_index(0.7, 0, direction), 0);
        }
    }

    #[test]
    fn speed_divisor_stretches_cycle() {
        for exponent in 0..=SpeedDivisor::MAX_EXPONENT {
            let config = PlaybackConfig::default().with_speed(SpeedDivisor::new(exponent).unwrap());
            let beats = config.speed.beats_per_cycle();

            for step in 0..32 {
                let position = step as f64 * 0.375;
                assert_eq!(config.frame_at(position, 8), config.frame_at(position + beats, 8));
            }
        }
    }

    #[test]
    fn speed_divisor_matches_unscaled_cycle() {
        let full = PlaybackConfig::default();
        let quarter = PlaybackConfig::default().with_speed(SpeedDivisor::new(2).unwrap());

        // A quarter beat at full speed shows the same frame as a full beat at 1/4
        assert_eq!(full.frame_at(0.25, 8), quarter.frame_at(1.0, 8));
        assert_eq!(full.frame_at(0.5, 8), quarter.frame_at(2.0, 8));
    }

    #[test]
    fn end_to_end_positions() {
        let config = PlaybackConfig::default();
        assert_ulps_eq!(config.phase_at(2.25), 0.25);
        assert_eq!(config.frame_at(2.25, 8), 2);

        let config = config.with_direction(Direction::PingPong);
        assert_eq!(config.frame_at(2.25, 8), 4);

        let config = PlaybackConfig::default().with_speed(SpeedDivisor::new(1).unwrap());
        assert_ulps_eq!(config.phase_at(2.25), 0.125);
        assert_eq!(config.frame_at(2.25, 8), 1);
    }

    #[test]
    fn reverse_and_ping_pong_exclude_each_other() {
        let mut config = PlaybackConfig::default();

        config.set_reverse(true);
        assert_eq!(config.direction, Direction::Reverse);

        config.set_ping_pong(true);
        assert_eq!(config.direction, Direction::PingPong);

        // Clearing reverse while ping-pong is active changes nothing
        config.set_reverse(false);
        assert_eq!(config.direction, Direction::PingPong);

        config.set_ping_pong(false);
        assert_eq!(config.direction, Direction::Forward);
    }

    #[test]
    fn speed_divisor_range() {
        assert!(SpeedDivisor::new(4).is_some());
        assert!(SpeedDivisor::new(5).is_none());
        assert_ulps_eq!(SpeedDivisor::new(3).unwrap().scale(), 0.125);

        for (exponent, speed) in SpeedDivisor::ALL.iter().enumerate() {
            assert_eq!(speed.exponent() as usize, exponent);
        }
    }

    #[test]
    fn speed_divisor_labels() {
        let labels: Vec<_> = SpeedDivisor::ALL.iter().map(ToString::to_string).collect();

        assert_eq!(labels, ["1x", "1/2", "1/4", "1/8", "1/16"]);
    }
}
