//! Progressive exploration on a background worker.
//!
//! An [`IncrementalExploration`] owns a worker thread that sweeps an
//! evaluation over the current view at increasing resolution. Level `l`
//! covers a `2^l x 2^l` grid; each completed level is published as
//! [`Notification::Data`] and the next level starts right away until the
//! maximum level is reached.
//!
//! Every [`request`](IncrementalExploration::request) replaces the view,
//! cancels the run in flight and restarts at the minimum level once no
//! further request has arrived for the debounce interval.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use adexp_core::{Dimension, Range, WorkingParameters};
//! use adexp_explore::{
//!     evaluation::SingleGroupEvaluation,
//!     incremental::{Config, IncrementalExploration, Notification, Request},
//! };
//!
//! let evaluation = Arc::new(SingleGroupEvaluation::default());
//! let (exploration, notifications) =
//!     IncrementalExploration::spawn(evaluation, Config::default())?;
//!
//! exploration.request(Request {
//!     params: WorkingParameters::default(),
//!     x: (Dimension::LeakRate, Range::new(10.0, 100.0)),
//!     y: (Dimension::Weight, Range::new(10.0, 60.0)),
//! });
//!
//! for notification in notifications {
//!     match notification {
//!         Notification::Progress { progress, .. } => println!("{:.0}%", progress * 100.0),
//!         Notification::Data { level, memory } => {
//!             println!("level {level}: {:?}", memory.resolution());
//!         }
//!         Notification::Finished { .. } => break,
//!     }
//! }
//! ```

mod config;
mod worker;

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use adexp_core::{Dimension, Range, WorkingParameters};
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{evaluation::Evaluation, exploration::ExplorationMemory};

pub use config::{Config, ConfigError};

use worker::Worker;

/// The view to explore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Request {
    /// Parameters of every cell apart from the two axis dimensions.
    pub params: WorkingParameters,
    pub x: (Dimension, Range),
    pub y: (Dimension, Range),
}

/// Messages sent by the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Overall progress of the current run, in `[0, 1]`.
    Progress { level: u32, progress: f64 },
    /// The completed grid of a level.
    Data {
        level: u32,
        memory: ExplorationMemory,
    },
    /// The run ended; `ok` is `false` if it was cancelled.
    Finished { ok: bool },
}

/// Errors that can occur when starting an incremental exploration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to spawn the exploration worker")]
    Spawn(#[from] std::io::Error),
}

/// Progress over all levels from `min_level` to `max_level`, given the
/// progress `p` within `level`.
///
/// Level `l` is weighted by `2^l`.
#[must_use]
pub fn overall_progress(min_level: u32, max_level: u32, level: u32, p: f64) -> f64 {
    let weight = |l: u32| f64::from(1_u32 << l);
    let total: f64 = (min_level..=max_level).map(weight).sum();
    let done: f64 = (min_level..level).map(weight).sum();
    ((done + p * weight(level)) / total).clamp(0.0, 1.0)
}

/// State shared between the front end and the worker.
#[derive(Debug)]
struct Shared {
    /// Latest request not yet picked up by the worker.
    ///
    /// `cancel` is only set or cleared while this lock is held.
    pending: Mutex<Option<Request>>,
    config: Mutex<Config>,
    cancel: AtomicBool,
    active: AtomicBool,
}

/// Handle to a background worker running progressive explorations.
///
/// Dropping the handle cancels the current run and joins the worker.
#[derive(Debug)]
pub struct IncrementalExploration {
    shared: Arc<Shared>,
    wake: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl IncrementalExploration {
    /// Starts the worker thread.
    ///
    /// Returns the handle and the receiving end of the notification channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn<E>(
        evaluation: Arc<E>,
        config: Config,
    ) -> Result<(Self, Receiver<Notification>), Error>
    where
        E: Evaluation + Send + 'static,
    {
        let shared = Arc::new(Shared {
            pending: Mutex::new(None),
            config: Mutex::new(config),
            cancel: AtomicBool::new(false),
            active: AtomicBool::new(false),
        });
        let (wake_tx, wake_rx) = channel::bounded(1);
        let (notify_tx, notify_rx) = channel::unbounded();

        let worker = Worker::new(evaluation, Arc::clone(&shared), wake_rx, notify_tx);
        let handle = thread::Builder::new()
            .name("adexp-explore".to_string())
            .spawn(move || worker.run())?;
        debug!(?config, "exploration worker started");

        Ok((
            Self {
                shared,
                wake: Some(wake_tx),
                handle: Some(handle),
            },
            notify_rx,
        ))
    }

    /// Replaces the explored view.
    ///
    /// Cancels the run in flight. A new run starts at the minimum level once
    /// no other request has arrived for the debounce interval.
    pub fn request(&self, request: Request) {
        {
            // The worker takes requests under the same lock, so a cancel
            // never hits the run of the request it was meant to supersede.
            let mut pending = self.shared.pending.lock();
            *pending = Some(request);
            self.shared.cancel.store(true, Ordering::SeqCst);
        }
        if let Some(wake) = &self.wake {
            // A full channel already holds a wake-up.
            let _ = wake.try_send(());
        }
    }

    /// Changes the deepest level explored by subsequent levels.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is below the minimum level or above
    /// [`Config::LEVEL_LIMIT`].
    pub fn set_max_level(&self, max_level: u32) -> Result<(), ConfigError> {
        let mut config = self.shared.config.lock();
        *config = config.with_max_level(max_level)?;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> Config {
        *self.shared.config.lock()
    }

    /// Whether a run is in flight or about to start.
    #[must_use]
    pub fn is_active(&self) -> bool {
        let pending = self.shared.pending.lock();
        pending.is_some() || self.shared.active.load(Ordering::SeqCst)
    }
}

impl Drop for IncrementalExploration {
    fn drop(&mut self) {
        {
            let mut pending = self.shared.pending.lock();
            pending.take();
            self.shared.cancel.store(true, Ordering::SeqCst);
        }
        // Disconnecting the wake channel stops the worker.
        self.wake.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("exploration worker panicked");
            }
        }
    }
}
