use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("frame {index} is {actual_width}x{actual_height}, expected {width}x{height}")]
    FrameSizeMismatch {
        index: usize,
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("frames must be at least 1x1")]
    ZeroSizedFrame,

    #[error("speed divisor exponent {0} is out of range")]
    SpeedOutOfRange(u8),
}
