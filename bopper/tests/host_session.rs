use std::{cell::RefCell, fs, path::Path, rc::Rc, sync::{atomic::{AtomicBool, Ordering}, Arc}, thread, time::{Duration, Instant}};

use bopper::{BopperEditor, BopperPlugin, RenderedFrame, Selection, View, ViewHandler};
use bopper_core::{presets::{PRESET_FRAME_COUNT, PRESET_SIZE}, FilterSelection, PlaybackConfig};
use bopper_plugin::{Editor, Host, ParameterId, ParameterValue, Plugin, Processor, ProcessorConfig, Transport};
use image::{codecs::gif::GifEncoder, Delay, Frame, Rgba, RgbaImage};

#[derive(Default)]
struct TestHost {
    dirty: RefCell<usize>,
    changes: RefCell<Vec<(ParameterId, ParameterValue)>>,
}

impl Host for TestHost {
    fn begin_gesture(&self, _id: ParameterId) {}

    fn set_parameter(&self, id: ParameterId, normalized: ParameterValue) {
        self.changes.borrow_mut().push((id, normalized));
    }

    fn end_gesture(&self, _id: ParameterId) {}

    fn mark_state_dirty(&self) {
        *self.dirty.borrow_mut() += 1;
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Presented {
    frame_index: Option<usize>,
    width: u32,
    height: u32,
    image_size: (u32, u32),
    is_loaded: bool,
}

#[derive(Clone, Default)]
struct TestView {
    frames: Rc<RefCell<Vec<Presented>>>,
}

impl TestView {
    fn last(&self) -> Presented {
        self.frames.borrow().last().copied().unwrap_or_default()
    }
}

impl View for TestView {
    fn present(&mut self, frame: &RenderedFrame<'_>) {
        self.frames.borrow_mut().push(Presented {
            frame_index: frame.frame_index,
            width: frame.width,
            height: frame.height,
            image_size: frame.image.dimensions(),
            is_loaded: frame.is_loaded,
        });
    }
}

struct Session {
    plugin: BopperPlugin,
    editor: BopperEditor,
    host: Rc<TestHost>,
    view: TestView,
}

fn open_session(mut plugin: BopperPlugin) -> Session {
    let host = Rc::new(TestHost::default());
    let view = TestView::default();

    let mut editor = plugin.create_editor(host.clone());
    editor.open(Box::new(view.clone()));

    Session {
        plugin,
        editor,
        host,
        view,
    }
}

fn write_gif(path: &Path, frame_count: usize, width: u32, height: u32) {
    let mut bytes = Vec::new();

    {
        let mut encoder = GifEncoder::new(&mut bytes);
        let frames = (0..frame_count).map(|index| {
            let buffer = RgbaImage::from_pixel(width, height, Rgba([(index * 30) as u8, 80, 160, 255]));
            Frame::from_parts(buffer, 0, 0, Delay::from_numer_denom_ms(40, 1))
        });

        encoder.encode_frames(frames).unwrap();
    }

    fs::write(path, bytes).unwrap();
}

fn run_ui_until(session: &mut Session, mut done: impl FnMut(&Session) -> bool) -> bool {
    let start = Instant::now();

    while start.elapsed() < Duration::from_secs(5) {
        session.editor.on_frame();
        if done(session) {
            return true;
        }

        thread::sleep(Duration::from_millis(2));
    }

    false
}

fn saved_state(plugin: &BopperPlugin) -> String {
    let mut bytes = Vec::new();
    plugin.save_state(&mut bytes).unwrap();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn audio_and_ui_threads_run_together() {
    const BLOCKS: usize = 2000;
    const BEATS_PER_BLOCK: f64 = 0.01;

    let mut session = open_session(BopperPlugin::default());
    let mut processor = session.plugin.create_processor(&ProcessorConfig {
        sample_rate: 48000.0,
        max_block_size: 64,
        ..Default::default()
    });

    let audio_done = Arc::new(AtomicBool::new(false));
    let audio_thread = thread::spawn({
        let audio_done = audio_done.clone();

        move || {
            let mut left = vec![0.5f32; 64];
            let mut right = vec![-0.5f32; 64];

            for block in 0..BLOCKS {
                let transport = Transport::new(true, Some(120.0), Some(block as f64 * BEATS_PER_BLOCK));
                let mut buffer = [&mut left[..], &mut right[..]];
                processor.process(&mut buffer, Some(transport), std::iter::empty());
            }

            audio_done.store(true, Ordering::Release);
            (left, right)
        }
    });

    while !audio_done.load(Ordering::Acquire) {
        session.editor.on_frame();

        let presented = session.view.last();
        assert!(presented.is_loaded);
        assert!(presented.frame_index.is_some_and(|index| index < PRESET_FRAME_COUNT));
    }

    let (left, right) = audio_thread.join().unwrap();
    assert!(left.iter().all(|sample| *sample == 0.5));
    assert!(right.iter().all(|sample| *sample == -0.5));

    session.editor.on_frame();
    let last_position = (BLOCKS - 1) as f64 * BEATS_PER_BLOCK;
    let expected = PlaybackConfig::default().frame_at(last_position, PRESET_FRAME_COUNT);
    assert_eq!(session.view.last().frame_index, Some(expected));
}

#[test]
fn uploaded_gif_replaces_preset() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("dance.gif");
    write_gif(&path, 5, 32, 24);

    let mut session = open_session(BopperPlugin::default());
    session.editor.on_upload_requested(path.clone());

    assert!(run_ui_until(&mut session, |session| session.view.last().width == 32));

    let presented = session.view.last();
    assert_eq!((presented.width, presented.height), (32, 24));
    assert_eq!(presented.image_size, (32, 24));
    assert_eq!(session.plugin.state().animation.frame_count(), 5);
    assert_eq!(session.plugin.state().selection(), Selection::Custom(path));
    assert!(*session.host.dirty.borrow() > 0);
    assert!(saved_state(&session.plugin).contains("\"custom\""));
}

#[test]
fn failed_upload_keeps_current_animation() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("corrupt.gif");
    fs::write(&path, b"this is not a gif").unwrap();

    let mut session = open_session(BopperPlugin::default());
    session.editor.on_upload_requested(path);

    let changed = run_ui_until(&mut session, |session| session.view.last().width != PRESET_SIZE);
    assert!(!changed);

    assert_eq!(session.plugin.state().selection(), Selection::Preset(0));
    assert_eq!(session.plugin.state().animation.frame_count(), PRESET_FRAME_COUNT);
    assert_eq!(*session.host.dirty.borrow(), 0);
}

#[test]
fn saved_session_restores_custom_animation() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("saved.gif");
    write_gif(&path, 3, 16, 16);

    let mut first = open_session(BopperPlugin::default());
    first.editor.on_filter_selected(FilterSelection::Vaporwave);
    first.editor.on_upload_requested(path.clone());
    assert!(run_ui_until(&mut first, |session| session.view.last().width == 16));

    let state = saved_state(&first.plugin);

    let mut plugin = BopperPlugin::default();
    plugin.load_state(&mut state.as_bytes()).unwrap();
    assert_eq!(plugin.state().parameters.filter(), FilterSelection::Vaporwave);
    assert_eq!(plugin.state().selection(), Selection::Custom(path));

    let mut second = open_session(plugin);
    assert!(run_ui_until(&mut second, |session| session.view.last().width == 16));
    assert_eq!(second.plugin.state().animation.frame_count(), 3);
}

#[test]
fn editor_reports_fixed_size() {
    let session = open_session(BopperPlugin::default());

    assert_eq!(session.editor.window_size(), (500.0, 450.0));
    assert!(!BopperEditor::IS_RESIZABLE);
    assert!(session.host.changes.borrow().is_empty());
}
