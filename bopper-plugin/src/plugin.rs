use std::{io::{self, Read, Write}, rc::Rc};

use crate::{processor::ProcessorConfig, Editor, Error, Event, Host, Parameters, Processor};

/// Main-thread side of a plugin instance.
///
/// The instance hands out one processor for the audio thread and any number of
/// editors over its lifetime. State is saved as an opaque byte stream.
pub trait Plugin: Default {
    const NAME: &'static str;
    const VENDOR: &'static str;
    const VERSION: &'static str;

    type Processor: Processor;
    type Editor: Editor;
    type Parameters: Parameters;

    fn parameters(&self) -> &Self::Parameters;

    /// Parameter changes the host makes while no audio is running.
    fn process_event(&mut self, event: &Event) -> Result<(), Error> {
        self.parameters().process_event(event)
    }

    fn create_processor(&mut self, config: &ProcessorConfig) -> Self::Processor;
    fn create_editor(&mut self, host: Rc<dyn Host>) -> Self::Editor;

    fn save_state(&self, writer: &mut dyn Write) -> io::Result<()>;
    fn load_state(&mut self, reader: &mut dyn Read) -> io::Result<()>;
}
