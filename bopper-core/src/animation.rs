use std::{ops::Deref, sync::{atomic::{AtomicUsize, Ordering}, Arc}};

use arc_swap::ArcSwap;
use image::RgbaImage;
use portable_atomic::AtomicF64;

use crate::{error::Error, playback::{frame_index, PlaybackConfig}, tempo::TransportSample};

pub type Frame = RgbaImage;

/// An immutable, ordered set of equally sized frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationSet {
    frames: Vec<Frame>,
    width: u32,
    height: u32,
}

impl AnimationSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Takes the dimensions from the first frame.
    pub fn new(frames: Vec<Frame>) -> Result<Self, Error> {
        let (width, height) = frames.first()
            .map(Frame::dimensions)
            .unwrap_or_default();

        Self::with_dimensions(frames, width, height)
    }

    pub fn with_dimensions(frames: Vec<Frame>, width: u32, height: u32) -> Result<Self, Error> {
        if frames.is_empty() {
            return Ok(Self::empty());
        }

        if width == 0 || height == 0 {
            return Err(Error::ZeroSizedFrame);
        }

        for (index, frame) in frames.iter().enumerate() {
            let (actual_width, actual_height) = frame.dimensions();

            if actual_width != width || actual_height != height {
                return Err(Error::FrameSizeMismatch {
                    index,
                    width,
                    height,
                    actual_width,
                    actual_height,
                });
            }
        }

        Ok(Self {
            frames,
            width,
            height,
        })
    }

    pub(crate) fn from_uniform_frames(frames: Vec<Frame>, width: u32, height: u32) -> Self {
        debug_assert!(frames.iter().all(|frame| frame.dimensions() == (width, height)));

        Self {
            frames,
            width,
            height,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

/// The frame set currently on display plus the frame selected for it.
///
/// The set is only ever replaced as a whole, so a render on another thread sees
/// either the old set or the new one. Index and phase are written by `tick` on the
/// UI thread and may briefly refer to a previous set; readers clamp against the set
/// they actually hold.
pub struct AnimationState {
    set: ArcSwap<AnimationSet>,
    frame_index: AtomicUsize,
    beat_phase: AtomicF64,
    blank: Frame,
}

impl AnimationState {
    pub fn new() -> Self {
        Self {
            set: ArcSwap::from_pointee(AnimationSet::empty()),
            frame_index: AtomicUsize::new(0),
            beat_phase: AtomicF64::new(0.0),
            blank: Frame::new(1, 1),
        }
    }

    pub fn load(&self, set: AnimationSet) {
        log::debug!("Loading animation: {} frames, {}x{}", set.len(), set.width(), set.height());

        self.frame_index.store(0, Ordering::Release);
        self.set.store(Arc::new(set));
    }

    /// Loads frames supplied directly, leaving the current animation untouched on error.
    pub fn load_frames(&self, frames: Vec<Frame>, width: u32, height: u32) -> Result<(), Error> {
        let set = AnimationSet::with_dimensions(frames, width, height)?;
        self.load(set);
        Ok(())
    }

    /// Selects the frame for the given transport position.
    ///
    /// Does nothing while the transport is stopped or no frames are loaded, so a
    /// paused animation stays on the frame it was showing.
    pub fn tick(&self, sample: &TransportSample, config: &PlaybackConfig) {
        let set = self.set.load();
        if set.is_empty() || !sample.is_playing {
            return;
        }

        let phase = config.phase_at(sample.position_beats);
        let index = frame_index(phase, set.len(), config.direction);

        self.beat_phase.store(phase, Ordering::Release);
        self.frame_index.store(index, Ordering::Release);
    }

    pub fn current_frame(&self) -> CurrentFrame<'_> {
        let set = self.set.load_full();
        if set.is_empty() {
            return CurrentFrame {
                source: Source::Blank(&self.blank),
            };
        }

        let index = usize::min(self.frame_index.load(Ordering::Acquire), set.len() - 1);

        CurrentFrame {
            source: Source::Loaded { set, index },
        }
    }

    pub fn current_frame_index(&self) -> usize {
        let frame_count = self.frame_count();
        usize::min(self.frame_index.load(Ordering::Acquire), frame_count.saturating_sub(1))
    }

    /// Speed-scaled phase of the last tick that ran while playing.
    pub fn beat_phase(&self) -> f64 {
        self.beat_phase.load(Ordering::Acquire)
    }

    pub fn is_loaded(&self) -> bool {
        !self.set.load().is_empty()
    }

    pub fn frame_count(&self) -> usize {
        self.set.load().len()
    }

    pub fn width(&self) -> u32 {
        self.set.load().width()
    }

    pub fn height(&self) -> u32 {
        self.set.load().height()
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of the frame on display. Keeps its frame set alive while held.
pub struct CurrentFrame<'a> {
    source: Source<'a>,
}

enum Source<'a> {
    Loaded {
        set: Arc<AnimationSet>,
        index: usize,
    },
    Blank(&'a Frame),
}

impl CurrentFrame<'_> {
    pub fn index(&self) -> Option<usize> {
        match &self.source {
            Source::Loaded { index, .. } => Some(*index),
            Source::Blank(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.source, Source::Blank(_))
    }
}

impl Deref for CurrentFrame<'_> {
    type Target = Frame;

    fn deref(&self) -> &Frame {
        match &self.source {
            Source::Loaded { set, index } => &set.frames[*index],
            Source::Blank(frame) => frame,
        }
    }
}
