use std::{fs, io::Cursor, path::Path};

use image::{codecs::gif::GifDecoder, AnimationDecoder, ImageFormat};
use thiserror::Error;

use crate::{animation::AnimationSet, error::Error};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read animation: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to decode animation: {0}")]
    Image(#[from] image::ImageError),

    #[error("animation contains no frames")]
    NoFrames,

    #[error(transparent)]
    Frames(#[from] Error),
}

/// Decodes every frame of a GIF into RGBA. Any other supported image becomes a single frame.
pub fn decode(bytes: &[u8]) -> Result<AnimationSet, DecodeError> {
    let frames = match image::guess_format(bytes)? {
        ImageFormat::Gif => {
            let decoder = GifDecoder::new(Cursor::new(bytes))?;

            decoder.into_frames()
                .map(|frame| frame.map(image::Frame::into_buffer))
                .collect::<Result<Vec<_>, _>>()?
        }

        _ => vec![image::load_from_memory(bytes)?.to_rgba8()],
    };

    if frames.is_empty() {
        return Err(DecodeError::NoFrames);
    }

    Ok(AnimationSet::new(frames)?)
}

pub fn decode_file(path: impl AsRef<Path>) -> Result<AnimationSet, DecodeError> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}
