use std::{path::{Path, PathBuf}, sync::{atomic::{AtomicBool, Ordering}, Arc}, thread::{self, JoinHandle}, time::Duration};

use bopper_core::{decode::{decode_file, DecodeError}, AnimationSet};

const QUEUE_LEN: usize = 4;
const RESULT_RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Identifies one call to [`AnimationLoader::request`]. Tickets increase monotonically.
pub type LoadTicket = u64;

struct LoadRequest {
    ticket: LoadTicket,
    path: PathBuf,
}

pub struct LoadResult {
    pub ticket: LoadTicket,
    pub path: PathBuf,
    pub result: Result<AnimationSet, DecodeError>,
}

/// Decodes animation files on a worker thread so the UI tick never waits on disk or codec work.
pub struct AnimationLoader {
    requests: rtrb::Producer<LoadRequest>,
    results: rtrb::Consumer<LoadResult>,
    next_ticket: LoadTicket,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl AnimationLoader {
    pub fn new() -> Self {
        let (requests, request_receiver) = rtrb::RingBuffer::new(QUEUE_LEN);
        let (result_sender, results) = rtrb::RingBuffer::new(QUEUE_LEN);
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker = thread::Builder::new()
            .name("bopper-loader".into())
            .spawn({
                let shutdown = shutdown.clone();
                move || run_worker(request_receiver, result_sender, shutdown)
            });

        let worker = match worker {
            Ok(worker) => Some(worker),
            Err(error) => {
                log::error!("Couldn't start animation loader: {error}");
                None
            }
        };

        Self {
            requests,
            results,
            next_ticket: 0,
            shutdown,
            worker,
        }
    }

    /// Queues a file for decoding. Returns `None` if the request couldn't be queued.
    pub fn request(&mut self, path: impl AsRef<Path>) -> Option<LoadTicket> {
        let worker = self.worker.as_ref()?;
        let ticket = self.next_ticket;

        match self.requests.push(LoadRequest { ticket, path: path.as_ref().to_path_buf() }) {
            Ok(_) => {
                self.next_ticket += 1;
                worker.thread().unpark();
                Some(ticket)
            },

            Err(rtrb::PushError::Full(request)) => {
                log::warn!("Animation loader is busy, dropping request for {}", request.path.display());
                None
            },
        }
    }

    /// Returns the next finished load, if any.
    pub fn poll(&mut self) -> Option<LoadResult> {
        let loaded = self.results.pop().ok()?;

        // The worker may be waiting for room to deliver its next result
        if let Some(worker) = self.worker.as_ref() {
            worker.thread().unpark();
        }

        Some(loaded)
    }

    #[cfg(test)]
    pub(crate) fn has_results(&self) -> bool {
        !self.results.is_empty()
    }
}

impl Default for AnimationLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AnimationLoader {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Release);

        if let Some(worker) = self.worker.take() {
            worker.thread().unpark();

            if worker.join().is_err() {
                log::error!("Animation loader thread panicked");
            }
        }
    }
}

fn run_worker(mut requests: rtrb::Consumer<LoadRequest>, mut results: rtrb::Producer<LoadResult>, shutdown: Arc<AtomicBool>) {
    while !shutdown.load(Ordering::Acquire) {
        let Ok(LoadRequest { ticket, path }) = requests.pop() else {
            thread::park();
            continue;
        };

        log::debug!("Decoding {}", path.display());
        let result = decode_file(&path);

        let mut loaded = LoadResult { ticket, path, result };
        loop {
            match results.push(loaded) {
                Ok(_) => break,

                Err(rtrb::PushError::Full(pending)) => {
                    if shutdown.load(Ordering::Acquire) {
                        return;
                    }

                    loaded = pending;
                    thread::park_timeout(RESULT_RETRY_INTERVAL);
                },
            }
        }
    }
}
