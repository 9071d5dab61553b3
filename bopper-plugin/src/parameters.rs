//! Host-automatable parameters.
//!
//! Every control Bopper exposes picks one entry from a short list, so a single
//! [`ChoiceParameter`] type covers them all.

mod choice;

pub use choice::{Choice, ChoiceParameter};

use crate::{Error, Event};

pub type ParameterId = u32;
pub type ParameterValue = f64;

pub trait Parameters {
    /// Every parameter, in the order the host lists them.
    fn all(&self) -> &[ChoiceParameter];

    fn get(&self, id: impl Into<ParameterId>) -> Option<&ChoiceParameter> {
        let id = id.into();
        self.all().iter().find(|parameter| parameter.id() == id)
    }

    /// Unknown ids read as `T::default()`.
    fn value<T: Choice>(&self, id: impl Into<ParameterId>) -> T {
        self.get(id)
            .map(|parameter| parameter.value::<T>())
            .unwrap_or_default()
    }

    fn process_event(&self, event: &Event) -> Result<(), Error> {
        let Event::ParameterValue { id, value } = event else {
            return Ok(());
        };

        self.get(*id)
            .ok_or(Error::UnknownParameter(*id))?
            .set_normalized(*value)
    }

    fn serialize(&self) -> impl Iterator<Item = (ParameterId, ParameterValue)> {
        self.all().iter().map(|parameter| (parameter.id(), parameter.saved_value()))
    }

    /// Parameters missing from `values` go back to their defaults.
    fn deserialize(&self, values: impl IntoIterator<Item = (ParameterId, ParameterValue)>) {
        self.all().iter().for_each(ChoiceParameter::reset);

        for (id, value) in values {
            let Some(parameter) = self.get(id) else {
                log::warn!("Skipping saved value for unknown parameter {id}");
                continue;
            };

            if let Err(error) = parameter.restore_saved_value(value) {
                log::warn!("Skipping saved value {value} for parameter \"{}\": {error}", parameter.name());
            }
        }
    }
}
