use std::{path::PathBuf, rc::Rc};

use bopper_core::{filter, playback::SpeedDivisor, tempo::ms_per_beat, Direction, EffectTransform, FilterSelection, Preset};
use bopper_plugin::{Choice, Editor, Host, Parameters};

use crate::{parameters::BopperParameter, state::BopperState, view::{Effect, RenderedFrame, View, ViewHandler}};

pub struct BopperEditor {
    host: Rc<dyn Host>,
    state: Rc<BopperState>,
    view: Option<Box<dyn View>>,
    scale: f64,
}

impl BopperEditor {
    pub fn new(host: Rc<dyn Host>, state: Rc<BopperState>) -> Self {
        Self {
            host,
            state,
            view: None,
            scale: 1.0,
        }
    }

    pub fn open(&mut self, view: Box<dyn View>) {
        log::trace!("Opening editor");
        self.view = Some(view);
    }

    pub fn close(&mut self) {
        log::trace!("Closing editor");
        self.view = None;
    }

    pub fn is_open(&self) -> bool {
        self.view.is_some()
    }

    fn present(&mut self, is_playing: bool, tempo_bpm: f64) {
        let Some(view) = self.view.as_mut() else {
            return;
        };

        let parameters = &self.state.parameters;
        let animation = &self.state.animation;

        let current_frame = animation.current_frame();
        let image = filter::apply(&current_frame, parameters.filter());
        let beat_phase = animation.beat_phase();

        let transform = if is_playing {
            parameters.effects().transform(beat_phase)
        } else {
            EffectTransform::IDENTITY
        };

        view.present(&RenderedFrame {
            image: &image,
            frame_index: current_frame.index(),
            transform,
            tempo_bpm,
            ms_per_beat: ms_per_beat(tempo_bpm),
            beat_phase,
            width: animation.width(),
            height: animation.height(),
            is_loaded: animation.is_loaded(),
            scale: self.scale,
        });
    }

    fn change_parameter<T: Choice>(&self, parameter: BopperParameter, value: T) {
        let Some(target) = self.state.parameters.get(parameter) else {
            return;
        };

        self.host.automate(target.id(), target.index_to_normalized(value.option_index()));
        target.set_value(value);
    }
}

impl Editor for BopperEditor {
    const SIZE: (f64, f64) = (500.0, 450.0);
    const IS_RESIZABLE: bool = false;

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    fn on_frame(&mut self) {
        if self.state.poll_loader() {
            self.host.mark_state_dirty();
        }

        let sample = self.state.transport.sample();
        let config = self.state.parameters.playback_config();
        self.state.animation.tick(&sample, &config);

        self.present(sample.is_playing, sample.tempo());
    }
}

impl ViewHandler for BopperEditor {
    fn on_preset_selected(&mut self, index: usize) {
        let preset = Preset::from_index(index).unwrap_or_default();
        log::trace!("Preset selected: {}", preset.name());

        self.state.select_preset(preset);
        self.host.mark_state_dirty();
    }

    fn on_upload_requested(&mut self, path: PathBuf) {
        log::trace!("Upload requested: {}", path.display());

        if !self.state.request_custom(path) {
            log::warn!("Couldn't queue animation upload");
        }
    }

    fn on_speed_selected(&mut self, speed: SpeedDivisor) {
        self.change_parameter(BopperParameter::Speed, speed);
    }

    fn on_direction_selected(&mut self, direction: Direction) {
        self.change_parameter(BopperParameter::Direction, direction);
    }

    fn on_reverse_toggled(&mut self, enabled: bool) {
        let mut config = self.state.parameters.playback_config();
        config.set_reverse(enabled);
        self.on_direction_selected(config.direction);
    }

    fn on_ping_pong_toggled(&mut self, enabled: bool) {
        let mut config = self.state.parameters.playback_config();
        config.set_ping_pong(enabled);
        self.on_direction_selected(config.direction);
    }

    fn on_filter_selected(&mut self, filter: FilterSelection) {
        self.change_parameter(BopperParameter::Filter, filter);
    }

    fn on_effect_toggled(&mut self, effect: Effect, enabled: bool) {
        let parameter = match effect {
            Effect::Pulse => BopperParameter::Pulse,
            Effect::Shake => BopperParameter::Shake,
        };

        self.change_parameter(parameter, enabled);
    }
}
