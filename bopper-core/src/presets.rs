use std::f64::consts::{PI, TAU};

use image::{Rgba, RgbaImage};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use vello_cpu::kurbo::{Affine, BezPath, Ellipse, Rect, Shape};
use vello_cpu::peniko::Color;
use vello_cpu::{Pixmap, RenderContext};

use crate::animation::AnimationSet;

pub const PRESET_FRAME_COUNT: usize = 8;
pub const PRESET_SIZE: u32 = 200;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const TOLERANCE: f64 = 0.1;

/// Built-in animations, drawn procedurally so the plugin has something to show
/// before a file is loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Preset {
    #[default]
    Cat,
    Ball,
    Disco,
    Wave,
    Heart,
    Notes,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::Cat,
        Preset::Ball,
        Preset::Disco,
        Preset::Wave,
        Preset::Heart,
        Preset::Notes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Cat => "Cat",
            Preset::Ball => "Ball",
            Preset::Disco => "Disco",
            Preset::Wave => "Wave",
            Preset::Heart => "Heart",
            Preset::Notes => "Notes",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn wrapping(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn color(&self) -> Rgba<u8> {
        match self {
            Preset::Cat | Preset::Heart => Rgba([0xFF, 0x6B, 0x6B, 0xFF]),
            Preset::Ball => Rgba([0x4E, 0xCD, 0xC4, 0xFF]),
            Preset::Disco => Rgba([0xFF, 0xE6, 0x6D, 0xFF]),
            Preset::Wave => Rgba([0x95, 0xE1, 0xD3, 0xFF]),
            Preset::Notes => Rgba([0x9B, 0x59, 0xB6, 0xFF]),
        }
    }

    pub fn render(&self) -> AnimationSet {
        let frames = (0..PRESET_FRAME_COUNT)
            .map(|frame| {
                let mut painter = Painter::new();
                self.draw(&mut painter, frame as f64 / PRESET_FRAME_COUNT as f64);
                painter.finish()
            })
            .collect();

        AnimationSet::from_uniform_frames(frames, PRESET_SIZE, PRESET_SIZE)
    }

    fn draw(&self, painter: &mut Painter, phase: f64) {
        let color = self.color();
        let center = PRESET_SIZE as f64 / 2.0;
        let bounce = (phase * TAU).sin();

        match self {
            Preset::Cat => {
                let y = center + bounce * 30.0;

                painter.fill_ellipse(center, y, 50.0, 50.0, (color, 1.0));
                painter.fill_ellipse(center - 40.0, y - 50.0, 15.0, 20.0, (color, 1.0));
                painter.fill_ellipse(center + 40.0, y - 50.0, 15.0, 20.0, (color, 1.0));

                for eye_x in [center - 15.0, center + 15.0] {
                    painter.fill_ellipse(eye_x, y - 7.5, 10.0, 12.5, (WHITE, 1.0));
                    painter.fill_ellipse(eye_x, y - 7.5, 5.0, 7.5, (BLACK, 1.0));
                }
            }

            Preset::Ball => {
                let y = center + bounce * 50.0;
                let squash = 1.0 - bounce.abs() * 0.2;

                painter.fill_ellipse(center, y, 40.0, 40.0 * squash, (color, 1.0));
                painter.fill_ellipse(center - 15.0, y - 35.0 * squash + 7.5, 10.0, 7.5, (WHITE, 0.5));
            }

            Preset::Disco => {
                painter.fill_ellipse(center, center, 30.0, 30.0, (color, 1.0));

                // Rays repeat every eighth of a turn, so one cycle turns by one ray
                let rotation = phase * PI / 4.0;
                for ray in 0..8 {
                    let angle = rotation + ray as f64 * PI / 4.0;
                    let tip = |angle: f64| (center + angle.cos() * 90.0, center + angle.sin() * 90.0);

                    painter.fill_triangle((center, center), tip(angle - 0.1), tip(angle + 0.1), (color, 0.6));
                }
            }

            Preset::Wave => {
                for dot in 0..5 {
                    let dot_phase = phase + dot as f64 * 0.2;
                    let x = 30.0 + dot as f64 * 35.0;
                    let y = center + (dot_phase * TAU).sin() * 40.0;

                    painter.fill_ellipse(x, y, 15.0, 15.0, (color, 0.3 + dot as f64 * 0.15));
                }
            }

            Preset::Heart => {
                let scale = 1.0 + bounce * 0.2;
                painter.fill_heart(center, center, 36.0 * scale, (color, 1.0));
            }

            Preset::Notes => {
                for note in 0..3 {
                    let rise = (phase + note as f64 * 0.33).fract();
                    let x = 50.0 + note as f64 * 50.0;
                    let y = PRESET_SIZE as f64 - 50.0 - rise * 120.0;
                    let note_color = (color, 1.0 - rise * 0.5);

                    painter.fill_ellipse(x, y, 10.0, 8.0, note_color);
                    painter.fill_rect(x + 8.0, y - 50.0, 3.0, 50.0, note_color);
                    painter.fill_rect(x + 8.0, y - 50.0, 15.0, 4.0, note_color);
                }
            }
        }
    }
}

/// Paint as a colour plus an opacity multiplier.
type Paint = (Rgba<u8>, f64);

/// Draws one preset frame into a transparent square pixmap.
struct Painter {
    context: RenderContext,
}

impl Painter {
    fn new() -> Self {
        let side = PRESET_SIZE as u16;
        let mut context = RenderContext::new(side, side);
        context.set_transform(Affine::IDENTITY);

        Self { context }
    }

    fn set_paint(&mut self, (color, opacity): Paint) {
        let alpha = (color[3] as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        self.context.set_paint(Color::from_rgba8(color[0], color[1], color[2], alpha));
    }

    fn fill_ellipse(&mut self, center_x: f64, center_y: f64, radius_x: f64, radius_y: f64, paint: Paint) {
        if radius_x <= 0.0 || radius_y <= 0.0 {
            return;
        }

        let path = Ellipse::new((center_x, center_y), (radius_x, radius_y), 0.0).to_path(TOLERANCE);
        self.set_paint(paint);
        self.context.fill_path(&path);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: Paint) {
        self.set_paint(paint);
        self.context.fill_rect(&Rect::new(x, y, x + width, y + height));
    }

    fn fill_triangle(&mut self, a: (f64, f64), b: (f64, f64), c: (f64, f64), paint: Paint) {
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        path.line_to(c);
        path.close_path();

        self.set_paint(paint);
        self.context.fill_path(&path);
    }

    /// Heart pointing down, roughly `2 * unit` across.
    fn fill_heart(&mut self, center_x: f64, center_y: f64, unit: f64, paint: Paint) {
        if unit <= 0.0 {
            return;
        }

        let at = |x: f64, y: f64| (center_x + x * unit, center_y + y * unit);

        let mut path = BezPath::new();
        path.move_to(at(0.0, 0.9));
        path.curve_to(at(-1.4, -0.1), at(-0.7, -1.2), at(0.0, -0.5));
        path.curve_to(at(0.7, -1.2), at(1.4, -0.1), at(0.0, 0.9));
        path.close_path();

        self.set_paint(paint);
        self.context.fill_path(&path);
    }

    fn finish(mut self) -> RgbaImage {
        let side = PRESET_SIZE as u16;
        let mut pixmap = Pixmap::new(side, side);

        self.context.flush();
        self.context.render_to_pixmap(&mut pixmap);

        let mut data = pixmap.data_as_u8_slice().to_vec();
        unpremultiply(&mut data);

        // Buffer length always matches the pixmap we just rendered
        RgbaImage::from_raw(PRESET_SIZE, PRESET_SIZE, data)
            .unwrap_or_else(|| RgbaImage::new(PRESET_SIZE, PRESET_SIZE))
    }
}

fn unpremultiply(data: &mut [u8]) {
    for pixel in data.chunks_exact_mut(4) {
        let alpha = pixel[3] as u16;
        if alpha == 0 {
            pixel[..3].fill(0);
            continue;
        }

        for channel in &mut pixel[..3] {
            *channel = ((*channel as u16 * 255 + alpha / 2) / alpha).min(255) as u8;
        }
    }
}
