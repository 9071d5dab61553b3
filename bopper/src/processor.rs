use std::sync::Arc;

use bopper_plugin::{Event, Parameters, ProcessState, Processor, SharedTransport, Transport};

use crate::parameters::BopperParameters;

/// Passes audio through untouched and forwards the host transport to the editor.
pub struct BopperProcessor {
    parameters: BopperParameters,
    transport: Arc<SharedTransport>,
}

impl BopperProcessor {
    pub fn new(parameters: BopperParameters, transport: Arc<SharedTransport>) -> Self {
        Self {
            parameters,
            transport,
        }
    }

    // Runs on the audio thread: bad events are dropped without logging or allocating
    fn handle_events(&self, events: impl Iterator<Item = Event>) {
        for event in events {
            let _ = self.parameters.process_event(&event);
        }
    }
}

impl Processor for BopperProcessor {
    fn reset(&mut self) {
        self.transport.publish_stopped();
    }

    fn process(&mut self, _channels: &mut [&mut [f32]], transport: Option<Transport>, events: impl Iterator<Item = Event>) -> ProcessState {
        self.handle_events(events);

        match transport {
            Some(transport) => self.transport.publish(&transport),
            None => self.transport.publish_stopped(),
        }

        ProcessState::Continue
    }

    fn process_events(&mut self, events: impl Iterator<Item = Event>) {
        self.handle_events(events);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use approx::assert_ulps_eq;
    use bopper_core::FilterSelection;

    use crate::parameters::BopperParameter;

    use super::*;

    fn processor() -> (BopperProcessor, Arc<SharedTransport>) {
        let transport = Arc::new(SharedTransport::new());
        (BopperProcessor::new(BopperParameters::default(), transport.clone()), transport)
    }

    #[test]
    fn audio_passes_through() {
        let (mut processor, _) = processor();
        let mut left = [0.25, -0.5, 1.0];
        let mut right = [0.0, 0.75, -1.0];

        {
            let mut buffer = [&mut left[..], &mut right[..]];
            let state = processor.process(&mut buffer, None, std::iter::empty());
            assert_eq!(state, ProcessState::Continue);
        }

        assert_eq!(left, [0.25, -0.5, 1.0]);
        assert_eq!(right, [0.0, 0.75, -1.0]);
    }

    #[test]
    fn publishes_transport() {
        let (mut processor, transport) = processor();

        processor.process(&mut [], Some(Transport::new(true, Some(128.0), Some(4.5))), std::iter::empty());
        let sample = transport.sample();
        assert!(sample.is_playing);
        assert_ulps_eq!(sample.tempo_bpm, 128.0);
        assert_ulps_eq!(sample.position_beats, 4.5);

        processor.process(&mut [], None, std::iter::empty());
        assert!(!transport.sample().is_playing);
        assert_ulps_eq!(transport.sample().position_beats, 4.5);
    }

    #[test]
    fn applies_parameter_events() {
        let (mut processor, _) = processor();
        let events = [
            Event::ParameterValue { id: BopperParameter::Filter.into(), value: 0.2 },
            Event::ParameterValue { id: 99, value: 1.0 },
        ];

        processor.process(&mut [], None, events.into_iter());
        assert_eq!(processor.parameters.filter(), FilterSelection::Invert);
    }

    struct CountingLogger;

    static PROCESSOR_LOG_RECORDS: AtomicUsize = AtomicUsize::new(0);

    impl log::Log for CountingLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if record.target() == "bopper::processor" {
                PROCESSOR_LOG_RECORDS.fetch_add(1, Ordering::Relaxed);
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn rejected_events_are_not_logged() {
        static LOGGER: CountingLogger = CountingLogger;
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);

        let (mut processor, _) = processor();
        let events = [
            Event::ParameterValue { id: 99, value: 1.0 },
            Event::ParameterValue { id: BopperParameter::Speed.into(), value: f64::NAN },
        ];

        processor.process(&mut [], None, events.into_iter());
        processor.process_events([Event::ParameterValue { id: 1234, value: 0.0 }].into_iter());

        assert_eq!(PROCESSOR_LOG_RECORDS.load(Ordering::Relaxed), 0);
        assert_eq!(processor.parameters.speed(), Default::default());
    }

    #[test]
    fn reset_stops_playback() {
        let (mut processor, transport) = processor();

        processor.process(&mut [], Some(Transport::new(true, None, Some(1.0))), std::iter::empty());
        processor.reset();
        assert!(!transport.sample().is_playing);
    }
}
