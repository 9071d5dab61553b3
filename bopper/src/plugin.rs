use std::io::{Read, Result, Write};
use std::rc::Rc;

use bopper_plugin::{Host, Parameters, Plugin, ProcessorConfig};

use crate::{editor::BopperEditor, parameters::BopperParameters, processor::BopperProcessor, settings::Settings, state::BopperState};

#[derive(Default)]
pub struct BopperPlugin {
    state: Rc<BopperState>,
}

impl BopperPlugin {
    pub fn state(&self) -> &Rc<BopperState> {
        &self.state
    }
}

impl Plugin for BopperPlugin {
    const NAME: &'static str = "Bopper";
    const VENDOR: &'static str = "Viiri Audio";
    const VERSION: &'static str = "0.1";

    type Processor = BopperProcessor;
    type Editor = BopperEditor;
    type Parameters = BopperParameters;

    fn parameters(&self) -> &Self::Parameters {
        &self.state.parameters
    }

    fn create_processor(&mut self, config: &ProcessorConfig) -> Self::Processor {
        log::trace!("Creating processor at {} Hz", config.sample_rate);
        BopperProcessor::new(self.state.parameters.clone(), self.state.transport.clone())
    }

    fn create_editor(&mut self, host: Rc<dyn Host>) -> Self::Editor {
        BopperEditor::new(host, self.state.clone())
    }

    fn save_state(&self, writer: &mut dyn Write) -> Result<()> {
        let settings = Settings {
            selection: self.state.selection(),
            parameters: self.state.parameters.serialize().collect(),
        };

        settings.write(writer)
    }

    fn load_state(&mut self, reader: &mut dyn Read) -> Result<()> {
        let settings = Settings::read(reader)?;

        self.state.parameters.deserialize(settings.parameters);
        self.state.restore(settings.selection);

        Ok(())
    }
}
