//! `notify`-backed change source.
//!
//! Raw events are coalesced: after the first relevant event, everything that
//! arrives within the debounce window joins the same batch.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use sitekit_core::{
    application::{
        ApplicationError,
        ports::{ChangeBatch, ChangeSource},
    },
    error::SiteKitResult,
};
use tracing::{debug, trace, warn};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

pub struct NotifyChangeSource {
    // Dropping the watcher stops event delivery.
    _watcher: Option<RecommendedWatcher>,
    events: Receiver<notify::Result<Event>>,
    debounce: Duration,
}

impl NotifyChangeSource {
    /// Watch `root` recursively.
    pub fn new(root: &Path, debounce: Duration) -> SiteKitResult<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx).map_err(watch_failed)?;
        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(watch_failed)?;
        debug!(root = %root.display(), debounce_ms = debounce.as_millis() as u64, "Watcher started");

        Ok(Self {
            _watcher: Some(watcher),
            events: rx,
            debounce,
        })
    }

    /// Batch events from an existing channel. The source closes when every
    /// sender is dropped.
    pub fn from_channel(events: Receiver<notify::Result<Event>>, debounce: Duration) -> Self {
        Self {
            _watcher: None,
            events,
            debounce,
        }
    }

    /// Watcher errors (a directory vanishing mid-scan, a queue overflow) are
    /// logged and skipped; they never end the batch or the source.
    fn collect(event: notify::Result<Event>, batch: &mut ChangeBatch) {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Watcher error");
                return;
            }
        };
        if matches!(event.kind, EventKind::Access(_)) {
            trace!(paths = ?event.paths, "Dropping access event");
            return;
        }
        for path in event.paths {
            if !batch.contains(&path) {
                batch.push(path);
            }
        }
    }
}

impl ChangeSource for NotifyChangeSource {
    fn next_batch(&mut self) -> SiteKitResult<Option<ChangeBatch>> {
        loop {
            let Ok(first) = self.events.recv() else {
                return Ok(None);
            };
            let mut batch: Vec<PathBuf> = Vec::new();
            Self::collect(first, &mut batch);
            if batch.is_empty() {
                continue;
            }

            let deadline = Instant::now() + self.debounce;
            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    break;
                }
                match self.events.recv_timeout(remaining) {
                    Ok(event) => Self::collect(event, &mut batch),
                    Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => break,
                }
            }

            debug!(paths = batch.len(), "Change batch ready");
            return Ok(Some(batch));
        }
    }
}

fn watch_failed(e: notify::Error) -> ApplicationError {
    ApplicationError::WatchFailed {
        reason: e.to_string(),
    }
}
