use std::sync::atomic::{AtomicUsize, Ordering};

use bopper_core::{playback::SpeedDivisor, Direction, FilterSelection};

use crate::error::Error;

use super::{ParameterId, ParameterValue};

/// A value picked from a fixed, ordered list of options.
pub trait Choice: Copy + Default + PartialEq + Send + Sync + 'static {
    /// Every option, in the order the host lists them.
    const OPTIONS: &'static [Self];

    fn label(&self) -> String;

    fn option_index(&self) -> usize {
        Self::OPTIONS.iter().position(|option| option == self).unwrap_or_default()
    }
}

impl Choice for bool {
    const OPTIONS: &'static [Self] = &[false, true];

    fn label(&self) -> String {
        let label = if *self { "On" } else { "Off" };
        label.to_string()
    }
}

impl Choice for SpeedDivisor {
    const OPTIONS: &'static [Self] = &SpeedDivisor::ALL;

    fn label(&self) -> String {
        self.to_string()
    }
}

impl Choice for Direction {
    const OPTIONS: &'static [Self] = &Direction::ALL;

    fn label(&self) -> String {
        self.name().to_string()
    }
}

impl Choice for FilterSelection {
    const OPTIONS: &'static [Self] = &FilterSelection::ALL;

    fn label(&self) -> String {
        self.name().to_string()
    }
}

/// Parameter holding the index of one option of a [`Choice`].
///
/// The host sees `index / (options - 1)`, so a normalized value maps to the
/// nearest option. Sessions store the plain index.
pub struct ChoiceParameter {
    id: ParameterId,
    name: &'static str,
    labels: Vec<String>,
    default_index: usize,
    index: AtomicUsize,
}

impl ChoiceParameter {
    /// Starts on `T::default()`.
    pub fn new<T: Choice>(id: impl Into<ParameterId>, name: &'static str) -> Self {
        let default_index = T::default().option_index();

        Self {
            id: id.into(),
            name,
            labels: T::OPTIONS.iter().map(Choice::label).collect(),
            default_index,
            index: default_index.into(),
        }
    }

    pub fn id(&self) -> ParameterId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn option_count(&self) -> usize {
        self.labels.len()
    }

    pub fn index(&self) -> usize {
        self.index.load(Ordering::Acquire)
    }

    /// `T` must be the choice this parameter was created with.
    pub fn value<T: Choice>(&self) -> T {
        T::OPTIONS.get(self.index()).copied().unwrap_or_default()
    }

    pub fn set_value<T: Choice>(&self, value: T) {
        self.store(value.option_index());
    }

    pub fn reset(&self) {
        self.store(self.default_index);
    }

    pub fn label(&self) -> &str {
        self.label_at(self.index())
    }

    pub fn normalized(&self) -> ParameterValue {
        self.index_to_normalized(self.index())
    }

    pub fn set_normalized(&self, normalized: ParameterValue) -> Result<(), Error> {
        if normalized.is_nan() {
            return Err(Error::ParameterRange(self.id));
        }

        self.store(self.normalized_to_index(normalized));
        Ok(())
    }

    pub fn index_to_normalized(&self, index: usize) -> ParameterValue {
        match self.last_index() {
            0 => 0.0,
            last => index.min(last) as f64 / last as f64,
        }
    }

    pub fn normalized_to_index(&self, normalized: ParameterValue) -> usize {
        (normalized.clamp(0.0, 1.0) * self.last_index() as f64).round() as usize
    }

    /// Host display text for a normalized value.
    pub fn normalized_to_string(&self, normalized: ParameterValue) -> &str {
        self.label_at(self.normalized_to_index(normalized))
    }

    /// Parses text typed into the host, ignoring case.
    pub fn string_to_normalized(&self, text: &str) -> Option<ParameterValue> {
        let text = text.trim();

        self.labels.iter()
            .position(|label| label.eq_ignore_ascii_case(text))
            .map(|index| self.index_to_normalized(index))
    }

    pub fn saved_value(&self) -> ParameterValue {
        self.index() as ParameterValue
    }

    pub fn restore_saved_value(&self, value: ParameterValue) -> Result<(), Error> {
        let index = value.round();
        if !index.is_finite() || index < 0.0 || index >= self.option_count() as f64 {
            return Err(Error::ParameterRange(self.id));
        }

        self.store(index as usize);
        Ok(())
    }

    fn last_index(&self) -> usize {
        self.labels.len().saturating_sub(1)
    }

    fn label_at(&self, index: usize) -> &str {
        self.labels.get(index).map(String::as_str).unwrap_or_default()
    }

    fn store(&self, index: usize) {
        self.index.store(index.min(self.last_index()), Ordering::Release);
    }
}
