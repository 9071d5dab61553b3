use std::sync::Arc;

use bopper_core::{playback::SpeedDivisor, Direction, Effects, FilterSelection, PlaybackConfig};
use bopper_plugin::{ChoiceParameter, ParameterId, Parameters};

/// Host-visible ids. The discriminants are saved with sessions, so never reorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BopperParameter {
    Speed,
    Direction,
    Filter,
    Pulse,
    Shake,
}

impl From<BopperParameter> for ParameterId {
    fn from(parameter: BopperParameter) -> Self {
        parameter as ParameterId
    }
}

/// Clones share the same atomics, so the processor and editor see one set of values.
#[derive(Clone)]
pub struct BopperParameters {
    parameters: Arc<[ChoiceParameter]>,
}

impl Default for BopperParameters {
    fn default() -> Self {
        Self {
            parameters: Arc::new([
                ChoiceParameter::new::<SpeedDivisor>(BopperParameter::Speed, "Speed"),
                ChoiceParameter::new::<Direction>(BopperParameter::Direction, "Direction"),
                ChoiceParameter::new::<FilterSelection>(BopperParameter::Filter, "Filter"),
                ChoiceParameter::new::<bool>(BopperParameter::Pulse, "Pulse"),
                ChoiceParameter::new::<bool>(BopperParameter::Shake, "Shake"),
            ]),
        }
    }
}

impl BopperParameters {
    pub fn speed(&self) -> SpeedDivisor {
        self.value(BopperParameter::Speed)
    }

    pub fn direction(&self) -> Direction {
        self.value(BopperParameter::Direction)
    }

    pub fn filter(&self) -> FilterSelection {
        self.value(BopperParameter::Filter)
    }

    pub fn effects(&self) -> Effects {
        Effects {
            pulse: self.value(BopperParameter::Pulse),
            shake: self.value(BopperParameter::Shake),
        }
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig::new(self.speed(), self.direction())
    }
}

impl Parameters for BopperParameters {
    fn all(&self) -> &[ChoiceParameter] {
        &self.parameters
    }
}
