use crate::parameters::{ParameterId, ParameterValue};

/// Parameter traffic from the host, delivered with audio blocks or on the main thread.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub enum Event {
    /// The user grabbed a control in the host.
    BeginGesture {
        id: ParameterId,
    },

    EndGesture {
        id: ParameterId,
    },

    /// New normalized value in `0..=1`.
    ParameterValue {
        id: ParameterId,
        value: ParameterValue,
    },
}
