//! Rebuild-on-change driver.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::app::build::{Builder, Trigger};
use crate::infra::fs::DirectoryLister;

/// Runs the builder once, then again after every burst of filesystem changes.
///
/// Runs never overlap: events arriving during a run queue up and are folded
/// into the next one.
pub struct WatchSession<L> {
    builder: Builder<L>,
    debounce: Duration,
}

impl<L: DirectoryLister> WatchSession<L> {
    pub fn new(builder: Builder<L>, debounce: Duration) -> Self {
        Self { builder, debounce }
    }

    /// Block until the watcher shuts down.
    pub fn run(&self) -> Result<()> {
        let root = self.builder.options().root.clone();
        // The first pass belongs to the watch session, so it is logged as one.
        self.builder
            .run(Trigger::Watch)
            .context("initial build failed")?;

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })
        .context("failed to create file watcher")?;
        watcher
            .watch(&root, RecursiveMode::Recursive)
            .with_context(|| format!("failed to watch {}", root.display()))?;
        tracing::info!(root = %root.display(), "watching for changes");

        while let Ok(res) = rx.recv() {
            if !is_relevant(&res) {
                continue;
            }
            if !self.settle(&rx) {
                break;
            }
            if let Err(err) = self.builder.run(Trigger::Watch) {
                tracing::warn!(error = %err, "rebuild failed");
            }
        }
        Ok(())
    }

    /// Drain events until the debounce window passes quietly. Returns false
    /// once the event source is gone.
    fn settle(&self, rx: &mpsc::Receiver<notify::Result<Event>>) -> bool {
        let mut deadline = Instant::now() + self.debounce;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match rx.recv_timeout(remaining) {
                Ok(res) => {
                    if is_relevant(&res) {
                        deadline = Instant::now() + self.debounce;
                    }
                }
                Err(RecvTimeoutError::Timeout) => return true,
                Err(RecvTimeoutError::Disconnected) => return false,
            }
        }
    }
}

/// Access notifications never change file contents.
fn is_relevant(res: &notify::Result<Event>) -> bool {
    match res {
        Ok(event) => !matches!(event.kind, EventKind::Access(_)),
        Err(err) => {
            tracing::warn!(error = %err, "file watcher error");
            false
        }
    }
}
