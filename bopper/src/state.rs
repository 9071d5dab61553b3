use std::{cell::{Cell, RefCell}, path::PathBuf, sync::Arc};

use bopper_core::{AnimationState, Preset};
use bopper_plugin::SharedTransport;

use crate::{loader::{AnimationLoader, LoadTicket}, parameters::BopperParameters, settings::Selection};

/// Plugin state shared between the plugin instance and its editor.
///
/// Everything here lives on the main thread except `transport` and `animation`,
/// which the processor and any renderer may read concurrently.
pub struct BopperState {
    pub parameters: BopperParameters,
    pub transport: Arc<SharedTransport>,
    pub animation: Arc<AnimationState>,

    selection: RefCell<Selection>,
    loader: RefCell<AnimationLoader>,
    // Only the newest custom request may change the selection
    pending_load: Cell<Option<LoadTicket>>,
}

impl BopperState {
    pub fn new() -> Self {
        let state = Self {
            parameters: Default::default(),
            transport: Default::default(),
            animation: Default::default(),
            selection: Default::default(),
            loader: Default::default(),
            pending_load: Default::default(),
        };

        state.select_preset(Preset::default());
        state
    }

    pub fn selection(&self) -> Selection {
        self.selection.borrow().clone()
    }

    pub fn select_preset(&self, preset: Preset) {
        self.pending_load.set(None);
        self.animation.load(preset.render());
        self.selection.replace(preset.into());
    }

    /// Queues a custom animation. The selection only changes once it has been decoded,
    /// and only if nothing else was selected in the meantime.
    pub fn request_custom(&self, path: impl Into<PathBuf>) -> bool {
        let Some(ticket) = self.loader.borrow_mut().request(path.into()) else {
            return false;
        };

        self.pending_load.set(Some(ticket));
        true
    }

    /// Applies finished loads. Returns true if the selection changed.
    pub fn poll_loader(&self) -> bool {
        let mut changed = false;

        while let Some(loaded) = self.loader.borrow_mut().poll() {
            if self.pending_load.get() != Some(loaded.ticket) {
                log::debug!("Discarding superseded load of {}", loaded.path.display());
                continue;
            }

            self.pending_load.set(None);

            match loaded.result {
                Ok(set) => {
                    self.animation.load(set);
                    self.selection.replace(Selection::Custom(loaded.path));
                    changed = true;
                },

                Err(error) => {
                    log::warn!("Couldn't load {}, keeping current animation: {error}", loaded.path.display());
                },
            }
        }

        changed
    }

    /// Restores a saved selection. A custom file is decoded in the background on top of the default preset.
    pub fn restore(&self, selection: Selection) {
        match selection {
            Selection::Preset(_) => {
                self.select_preset(selection.preset().unwrap_or_default());
            },

            Selection::Custom(path) => {
                self.animation.load(Preset::default().render());

                if !self.request_custom(path.clone()) {
                    log::warn!("Couldn't queue saved animation {}", path.display());
                }

                self.selection.replace(Selection::Custom(path));
            },
        }
    }
}

impl Default for BopperState {
    fn default() -> Self {
        Self::new()
    }
}
