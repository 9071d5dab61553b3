use std::{borrow::Cow, fmt::Display};

use image::Rgba;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::animation::Frame;

/// Colour treatment applied to a frame right before it is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FilterSelection {
    #[default]
    None,
    Invert,
    Sepia,
    Cyberpunk,
    Vaporwave,
    Matrix,
}

impl FilterSelection {
    pub const ALL: [FilterSelection; 6] = [
        FilterSelection::None,
        FilterSelection::Invert,
        FilterSelection::Sepia,
        FilterSelection::Cyberpunk,
        FilterSelection::Vaporwave,
        FilterSelection::Matrix,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterSelection::None => "None",
            FilterSelection::Invert => "Invert",
            FilterSelection::Sepia => "Sepia",
            FilterSelection::Cyberpunk => "Cyberpunk",
            FilterSelection::Vaporwave => "Vaporwave",
            FilterSelection::Matrix => "Matrix",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn transform(&self, [r, g, b]: [f64; 3]) -> [f64; 3] {
        match self {
            FilterSelection::None => [r, g, b],
            FilterSelection::Invert => [255.0 - r, 255.0 - g, 255.0 - b],
            FilterSelection::Sepia => [
                0.393 * r + 0.769 * g + 0.189 * b,
                0.349 * r + 0.686 * g + 0.168 * b,
                0.272 * r + 0.534 * g + 0.131 * b,
            ],
            FilterSelection::Cyberpunk => [
                1.1 * r + 20.0,
                0.9 * g + 0.2 * b,
                1.2 * b + 30.0,
            ],
            FilterSelection::Vaporwave => [
                r + 0.3 * b + 20.0,
                0.6 * g,
                1.1 * b + 0.2 * r + 40.0,
            ],
            FilterSelection::Matrix => {
                let luma = 0.299 * r + 0.587 * g + 0.114 * b;
                [0.2 * luma, f64::min(255.0, 1.2 * luma), 0.3 * luma]
            }
        }
    }

    fn apply_pixel(&self, pixel: Rgba<u8>) -> Rgba<u8> {
        let [r, g, b, a] = pixel.0;

        // Fully transparent pixels keep their colour
        if a == 0 {
            return pixel;
        }

        let [r, g, b] = self.transform([r as f64, g as f64, b as f64]);
        Rgba([to_channel(r), to_channel(g), to_channel(b), a])
    }
}

impl Display for FilterSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the filtered frame. The input is never modified; `None` borrows it as is.
pub fn apply(frame: &Frame, filter: FilterSelection) -> Cow<'_, Frame> {
    if filter == FilterSelection::None {
        return Cow::Borrowed(frame);
    }

    let mut output = frame.clone();
    for pixel in output.pixels_mut() {
        *pixel = filter.apply_pixel(*pixel);
    }

    Cow::Owned(output)
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
