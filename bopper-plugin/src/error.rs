use thiserror::Error;

use crate::ParameterId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no parameter with id {0}")]
    UnknownParameter(ParameterId),

    #[error("value out of range for parameter {0}")]
    ParameterRange(ParameterId),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
