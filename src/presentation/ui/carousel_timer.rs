//! Fixed-interval ticker driving the home banner.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::presentation::events::UiEvent;

/// Sends [`UiEvent::CarouselTick`] every `period` until stopped.
///
/// The first tick fires one full period after start. The timer stops when
/// dropped or when `scope` is cancelled.
pub struct CarouselTimer {
    cancel: CancellationToken,
}

impl CarouselTimer {
    /// Spawns the ticker on the current runtime. It also stops when `scope` is cancelled.
    #[must_use]
    pub fn start(period: Duration, tx: mpsc::UnboundedSender<UiEvent>, scope: &CancellationToken) -> Self {
        let cancel = scope.child_token();
        let token = cancel.clone();

        tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    _ = ticks.tick() => {
                        if tx.send(UiEvent::CarouselTick).is_err() {
                            break;
                        }
                    }
                }
            }
            debug!("Carousel timer stopped");
        });

        Self { cancel }
    }
}

impl Drop for CarouselTimer {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
