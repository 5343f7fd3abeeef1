//!
//! Background release of contexts whose digests were dropped.
//!
//! Dropping a digest that still owns its context sends a `Release` request
//! to a single worker thread, which returns the handle to the store. The
//! worker is spawned on first use and is never joined, so it does not keep
//! the process alive. It exits once the store, and with it the sending side
//! of the queue, is gone.
//!

use std::io;
use std::sync::Arc;

use crossbeam_channel::{bounded, unbounded, SendError, Sender};
use once_cell::sync::OnceCell;
use tracing::{error, info, warn};

use crate::config::ReclaimerConfig;
use crate::store::{ContextHandle, ContextIndex};

enum ReclaimRequest {
    Release(ContextHandle),
    Wait { sender: Sender<()> },
}

pub(crate) struct Reclaimer {
    config: ReclaimerConfig,
    sender: OnceCell<Sender<ReclaimRequest>>,
}

impl Reclaimer {
    pub(crate) fn new(config: ReclaimerConfig) -> Self {
        Self {
            config,
            sender: OnceCell::new(),
        }
    }

    pub(crate) fn config(&self) -> &ReclaimerConfig {
        &self.config
    }

    pub(crate) fn is_started(&self) -> bool {
        self.sender.get().is_some()
    }

    /// Starts the worker unless it is already running.
    pub(crate) fn start(&self, index: &Arc<ContextIndex>) {
        let _ = self.sender(index);
    }

    fn sender(&self, index: &Arc<ContextIndex>) -> Option<&Sender<ReclaimRequest>> {
        if !self.config.enabled {
            return None;
        }
        self.sender
            .get_or_try_init(|| spawn_reclaimer_thread(&self.config.thread_name, index.clone()))
            .map_err(|err| {
                warn!(error = %err, "failed to spawn context reclaimer thread");
            })
            .ok()
    }

    pub(crate) fn reclaim(&self, index: &Arc<ContextIndex>, handle: ContextHandle) {
        let Some(sender) = self.sender(index) else {
            release_inline(index, handle);
            return;
        };
        if let Err(SendError(request)) = sender.send(ReclaimRequest::Release(handle)) {
            warn!("context reclaimer is gone, releasing on the dropping thread");
            if let ReclaimRequest::Release(handle) = request {
                release_inline(index, handle);
            }
        }
    }

    pub(crate) fn flush(&self) {
        let Some(sender) = self.sender.get() else {
            return;
        };
        let (done_sender, done_receiver) = bounded(1);
        if sender
            .send(ReclaimRequest::Wait {
                sender: done_sender,
            })
            .is_ok()
        {
            // Err: the worker has exited.
            let _ = done_receiver.recv();
        }
    }
}

fn release_inline(index: &ContextIndex, handle: ContextHandle) {
    if let Err(err) = index.release(handle) {
        error!(error = %err, "failed to release dropped digest context");
    }
}

fn spawn_reclaimer_thread(
    name: &str,
    index: Arc<ContextIndex>,
) -> io::Result<Sender<ReclaimRequest>> {
    // Bounded by the number of live digests, each of which sends at most once.
    let (sender, receiver) = unbounded::<ReclaimRequest>();
    std::thread::Builder::new()
        .name(name.to_string())
        .spawn(move || {
            info!("context reclaimer started");
            while let Ok(request) = receiver.recv() {
                match request {
                    ReclaimRequest::Release(handle) => {
                        let id = handle.id();
                        if let Err(err) = index.release(handle) {
                            error!(context = %id, error = %err, "failed to reclaim digest context");
                        }
                    }
                    ReclaimRequest::Wait { sender } => {
                        let _ = sender.send(());
                    }
                }
            }
            info!("context reclaimer queue closed, exiting");
        })?;
    Ok(sender)
}
