//! Debounce and duplicate suppression for search text.
//!
//! Every raw input replaces the pending value and restarts the quiet window.
//! When the window elapses without newer input, the pending value is emitted
//! unless it equals the last emitted value. Superseded values are dropped
//! without ever being emitted.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<String>,
    task: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Start the debounce task on the current runtime.
    ///
    /// Returns the debouncer and the receiving end of the effective query
    /// stream. The stream ends when the debouncer is dropped.
    pub fn spawn(window: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (input, raw_rx) = mpsc::unbounded_channel();
        let (effective_tx, effective_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(window, raw_rx, effective_tx));
        (Self { input, task }, effective_rx)
    }

    /// Feed one raw text value (typically every keystroke).
    pub fn push(&self, text: impl Into<String>) {
        if self.input.send(text.into()).is_err() {
            log::debug!("search debouncer already stopped; dropping input");
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    window: Duration,
    mut raw: mpsc::UnboundedReceiver<String>,
    effective: mpsc::UnboundedSender<String>,
) {
    let mut pending: Option<String> = None;
    let mut last_emitted: Option<String> = None;

    loop {
        let next = if pending.is_some() {
            match tokio::time::timeout(window, raw.recv()).await {
                Ok(next) => next,
                Err(_quiet) => {
                    let Some(value) = pending.take() else {
                        continue;
                    };
                    if last_emitted.as_deref() == Some(value.as_str()) {
                        log::trace!("suppressing duplicate query {value:?}");
                        continue;
                    }
                    log::debug!("effective query {value:?}");
                    last_emitted = Some(value.clone());
                    if effective.send(value).is_err() {
                        break;
                    }
                    continue;
                }
            }
        } else {
            raw.recv().await
        };

        match next {
            Some(text) => pending = Some(text),
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    const WINDOW: Duration = Duration::from_millis(300);

    fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(value) = rx.try_recv() {
            out.push(value);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_coalesce_into_latest_value() {
        let (debouncer, mut rx) = SearchDebouncer::spawn(WINDOW);
        for text in ["b", "ba", "bat", "batman"] {
            debouncer.push(text);
            sleep(Duration::from_millis(50)).await;
        }
        assert!(drain(&mut rx).is_empty(), "nothing before quiet period");

        sleep(Duration::from_millis(400)).await;
        assert_eq!(drain(&mut rx), vec!["batman"]);
    }

    #[tokio::test(start_paused = true)]
    async fn each_pause_emits_once() {
        let (debouncer, mut rx) = SearchDebouncer::spawn(WINDOW);
        debouncer.push("alien");
        sleep(Duration::from_millis(350)).await;
        debouncer.push("aliens");
        sleep(Duration::from_millis(350)).await;

        assert_eq!(drain(&mut rx), vec!["alien", "aliens"]);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_value_is_suppressed() {
        let (debouncer, mut rx) = SearchDebouncer::spawn(WINDOW);
        debouncer.push("heat");
        sleep(Duration::from_millis(350)).await;

        // Edit away and back within one window: same effective value.
        debouncer.push("hea");
        sleep(Duration::from_millis(100)).await;
        debouncer.push("heat");
        sleep(Duration::from_millis(350)).await;

        assert_eq!(drain(&mut rx), vec!["heat"]);
    }

    #[tokio::test(start_paused = true)]
    async fn first_empty_value_is_emitted() {
        let (debouncer, mut rx) = SearchDebouncer::spawn(WINDOW);
        debouncer.push("");
        sleep(Duration::from_millis(301)).await;
        assert_eq!(drain(&mut rx), vec![""]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_debouncer_discards_pending_value() {
        let (debouncer, mut rx) = SearchDebouncer::spawn(WINDOW);
        debouncer.push("pending");
        sleep(Duration::from_millis(10)).await;
        drop(debouncer);

        sleep(Duration::from_millis(500)).await;
        assert_eq!(rx.recv().await, None);
    }
}
