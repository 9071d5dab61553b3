use crate::parameters::{ParameterId, ParameterValue};

/// Calls from the plugin back into the host.
///
/// Hosts may take these calls on any thread, so implementations must be thread-safe.
pub trait Host: Send {
    fn begin_gesture(&self, id: ParameterId);
    fn set_parameter(&self, id: ParameterId, normalized: ParameterValue);
    fn end_gesture(&self, id: ParameterId);

    /// Session state outside the parameters changed, e.g. a new animation was picked.
    fn mark_state_dirty(&self);

    /// One complete edit, the way a single click in the editor reports it.
    fn automate(&self, id: ParameterId, normalized: ParameterValue) {
        self.begin_gesture(id);
        self.set_parameter(id, normalized);
        self.end_gesture(id);
    }
}
