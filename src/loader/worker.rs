//! Off-thread execution of armed load jobs.
//!
//! The frame callback must never wait on the network, so each [`LoadJob`]
//! runs on its own short-lived thread. Results come back over a channel as
//! generation-tagged [`LoadEvent`]s; the UI thread drains them between
//! frames and commits them through [`AssetLoadController::apply`], which is
//! the only place state mutates. A thread that outlives its request keeps
//! sending events harmlessly until its tag is recognized as stale.

use std::sync::mpsc;
use std::thread;

use super::fetch::{AssetFetcher, HttpFetcher};
use super::parse::{parse_scene, SceneHandle};
use super::{LoadFailure, LoadJob};

/// One completion from a load thread, tagged with its job's generation.
#[derive(Debug)]
pub enum LoadEvent {
    Probe {
        generation: u64,
        outcome: Result<u16, String>,
    },
    Progress {
        generation: u64,
        progress: u8,
    },
    Finished {
        generation: u64,
        outcome: Result<SceneHandle, LoadFailure>,
    },
}

type FetcherFactory = Box<dyn Fn() -> Box<dyn AssetFetcher + Send>>;

/// Spawns a thread per job and funnels every thread's events into one
/// receiver. Owned by the UI thread; `poll` never blocks.
pub struct ThreadedLoader {
    sender: mpsc::Sender<LoadEvent>,
    receiver: mpsc::Receiver<LoadEvent>,
    make_fetcher: FetcherFactory,
}

impl ThreadedLoader {
    pub fn new() -> Self {
        Self::with_fetcher_factory(|| Box::new(HttpFetcher::new()))
    }

    /// Tests swap in scripted fetchers here.
    pub fn with_fetcher_factory<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn AssetFetcher + Send> + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            make_fetcher: Box::new(factory),
        }
    }

    pub fn spawn(&self, job: LoadJob) {
        let generation = job.generation;
        let fetcher = (self.make_fetcher)();
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("asset-load-{generation}"))
            .spawn(move || run_load(fetcher, job, &sender));
        if let Err(err) = spawned {
            // Resolve through the normal failure path rather than stalling
            // in Loading forever.
            let _ = self.sender.send(LoadEvent::Finished {
                generation,
                outcome: Err(LoadFailure::Fetch(format!(
                    "could not start load thread: {err}"
                ))),
            });
        }
    }

    /// Next ready event, if any. Never waits.
    pub fn poll(&self) -> Option<LoadEvent> {
        self.receiver.try_recv().ok()
    }

    #[cfg(test)]
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<LoadEvent> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

impl Default for ThreadedLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn run_load(
    mut fetcher: Box<dyn AssetFetcher + Send>,
    job: LoadJob,
    sender: &mpsc::Sender<LoadEvent>,
) {
    let LoadJob { url, generation } = job;
    let probe = fetcher.probe(&url);
    // The controller classifies the status; the thread only decides whether
    // downloading is worthwhile.
    let proceed = matches!(&probe, Ok(code) if (200..=299).contains(code));
    if sender
        .send(LoadEvent::Probe {
            generation,
            outcome: probe,
        })
        .is_err()
        || !proceed
    {
        return;
    }
    let _ = sender.send(LoadEvent::Progress {
        generation,
        progress: 25,
    });
    let body = match fetcher.fetch(&url) {
        Ok(bytes) => bytes,
        Err(message) => {
            let _ = sender.send(LoadEvent::Finished {
                generation,
                outcome: Err(LoadFailure::Fetch(message)),
            });
            return;
        }
    };
    let _ = sender.send(LoadEvent::Progress {
        generation,
        progress: 75,
    });
    let _ = sender.send(LoadEvent::Finished {
        generation,
        outcome: parse_scene(&body).map_err(LoadFailure::Parse),
    });
}
