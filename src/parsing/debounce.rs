//! Debounced parsing of live text input.
//!
//! Every submitted text restarts a quiet period. Only when the period passes
//! without new input is the latest text classified and published. At most
//! one parse is pending at a time.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::ParserConfig;
use crate::models::ParseOutcome;

use super::classifier::BatchClassifier;

/// Runs the classifier on a background task behind a quiet period.
///
/// Dropping the debouncer stops the task.
#[derive(Debug)]
pub struct ParseDebouncer {
    input: mpsc::UnboundedSender<String>,
    output: watch::Receiver<Option<ParseOutcome>>,
    task: JoinHandle<()>,
}

impl ParseDebouncer {
    /// Spawns the debounce task on the current tokio runtime.
    pub fn spawn(
        classifier: BatchClassifier,
        known_employee_names: Vec<String>,
        quiet_period: Duration,
    ) -> Self {
        let (input, rx) = mpsc::unbounded_channel();
        let (tx, output) = watch::channel(None);
        let task = tokio::spawn(run(rx, tx, classifier, known_employee_names, quiet_period));
        Self {
            input,
            output,
            task,
        }
    }

    /// Spawns with the quiet period from the parser settings.
    pub fn from_config(
        classifier: BatchClassifier,
        known_employee_names: Vec<String>,
        config: &ParserConfig,
    ) -> Self {
        Self::spawn(classifier, known_employee_names, config.debounce_period())
    }

    /// Submits new text, restarting the quiet period.
    ///
    /// Returns false if the background task is no longer running.
    pub fn submit(&self, text: impl Into<String>) -> bool {
        self.input.send(text.into()).is_ok()
    }

    /// Returns a receiver notified on every published outcome.
    pub fn subscribe(&self) -> watch::Receiver<Option<ParseOutcome>> {
        self.output.clone()
    }

    /// The most recently published outcome, if any parse has run.
    pub fn latest(&self) -> Option<ParseOutcome> {
        self.output.borrow().clone()
    }
}

impl Drop for ParseDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<String>,
    tx: watch::Sender<Option<ParseOutcome>>,
    classifier: BatchClassifier,
    known_employee_names: Vec<String>,
    quiet_period: Duration,
) {
    let mut pending: Option<String> = None;

    loop {
        let Some(text) = pending.take() else {
            match rx.recv().await {
                Some(text) => pending = Some(text),
                None => return,
            }
            continue;
        };

        tokio::select! {
            next = rx.recv() => match next {
                Some(newer) => pending = Some(newer),
                None => return,
            },
            _ = tokio::time::sleep(quiet_period) => {
                let outcome = classifier.parse(&text, &known_employee_names);
                debug!(entries = outcome.entry_count(), "publishing debounced parse");
                if tx.send(Some(outcome)).is_err() {
                    return;
                }
            }
        }
    }
}
