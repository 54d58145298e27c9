use std::sync::{Arc, atomic::Ordering};

use adexp_core::DiscreteRange;
use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use tracing::{debug, info, trace};

use super::{Notification, Request, Shared, overall_progress};
use crate::{
    evaluation::Evaluation,
    exploration::{Action, Event, explore},
};

/// Background side of an [`IncrementalExploration`](super::IncrementalExploration).
pub(super) struct Worker<E> {
    evaluation: Arc<E>,
    shared: Arc<Shared>,
    wake: Receiver<()>,
    notifications: Sender<Notification>,
}

impl<E: Evaluation> Worker<E> {
    pub(super) fn new(
        evaluation: Arc<E>,
        shared: Arc<Shared>,
        wake: Receiver<()>,
        notifications: Sender<Notification>,
    ) -> Self {
        Self {
            evaluation,
            shared,
            wake,
            notifications,
        }
    }

    /// Serves requests until the front end disconnects.
    pub(super) fn run(self) {
        while self.wake.recv().is_ok() {
            if !self.debounce() {
                break;
            }

            let Some(request) = self.take_request() else {
                continue;
            };
            let ok = self.run_levels(&request);
            self.finish(ok);
        }
        debug!("exploration worker stopped");
    }

    /// Waits until no wake-up has arrived for the debounce interval.
    ///
    /// Returns `false` if the front end disconnected.
    fn debounce(&self) -> bool {
        let debounce = self.shared.config.lock().debounce();
        loop {
            match self.wake.recv_timeout(debounce) {
                Ok(()) => trace!("request coalesced"),
                Err(RecvTimeoutError::Timeout) => return true,
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
    }

    /// Sweeps the request level by level. Returns `false` if cancelled.
    fn run_levels(&self, request: &Request) -> bool {
        let min_level = self.shared.config.lock().min_level();
        info!(x = ?request.x.0, y = ?request.y.0, "exploring");

        let mut level = min_level;
        loop {
            // The maximum may change between levels.
            let max_level = self.shared.config.lock().max_level();
            if level > max_level {
                break;
            }

            let steps = 1_usize << level;
            let x = (request.x.0, DiscreteRange::from_range(request.x.1, steps));
            let y = (request.y.0, DiscreteRange::from_range(request.y.1, steps));
            let observer = |event: &Event| {
                if self.cancelled() {
                    return Some(Action::Cancel);
                }
                let progress = overall_progress(min_level, max_level, level, event.progress);
                self.notify(Notification::Progress { level, progress });
                None
            };

            match explore(self.evaluation.as_ref(), &request.params, x, y, observer) {
                Ok(memory) if !self.cancelled() => {
                    debug!(level, "level complete");
                    self.notify(Notification::Data { level, memory });
                }
                _ => {
                    debug!(level, "level cancelled");
                    return false;
                }
            }
            level += 1;
        }

        self.notify(Notification::Progress {
            level: level - 1,
            progress: 1.0,
        });
        true
    }

    /// Takes the pending request and clears the cancel flag atomically.
    ///
    /// Marks the worker idle if nothing is pending.
    fn take_request(&self) -> Option<Request> {
        let mut pending = self.shared.pending.lock();
        let request = pending.take();
        self.shared.cancel.store(false, Ordering::SeqCst);
        self.shared.active.store(request.is_some(), Ordering::SeqCst);
        request
    }

    /// Reports the end of a run, going idle unless a request is waiting.
    fn finish(&self, ok: bool) {
        {
            let pending = self.shared.pending.lock();
            if pending.is_none() {
                self.shared.active.store(false, Ordering::SeqCst);
            }
        }
        self.notify(Notification::Finished { ok });
    }

    fn cancelled(&self) -> bool {
        self.shared.cancel.load(Ordering::SeqCst)
    }

    fn notify(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            trace!("notification receiver dropped");
        }
    }
}
