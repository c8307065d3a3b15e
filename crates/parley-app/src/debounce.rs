use std::time::Duration;

use kanal::AsyncSender;
use parley_types::AppEvent;
use tokio_util::sync::CancellationToken;

/// Trailing-edge timer for auto-translate. Each `arm` supersedes the
/// previous one; only the newest generation is ever reported as due.
pub struct Debouncer {
    delay: Duration,
    generation: u64,
    timer: Option<CancellationToken>,
    parent: CancellationToken,
}

impl Debouncer {
    pub fn new(delay: Duration, parent: CancellationToken) -> Self {
        Self {
            delay,
            generation: 0,
            timer: None,
            parent,
        }
    }

    /// Restart the quiet period. Posts `DebounceElapsed` to `tx` when it ends.
    pub fn arm(&mut self, tx: &AsyncSender<AppEvent>) -> u64 {
        self.cancel();
        self.generation += 1;

        let token = self.parent.child_token();
        self.timer = Some(token.clone());

        let generation = self.generation;
        let delay = self.delay;
        let tx = tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if tx.send(AppEvent::DebounceElapsed(generation)).await.is_err() {
                        tracing::debug!("Debounce fired after event loop closed");
                    }
                }
            }
        });

        generation
    }

    pub fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Whether an elapsed `generation` should run. Consumes the pending timer.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.timer.is_some() && generation == self.generation {
            self.timer = None;
            true
        } else {
            false
        }
    }
}
