use crate::time;
use chrono::{DateTime, Utc};
use crossbeam_channel::{Receiver, Sender, bounded, select, tick};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Anything that shows a relative time for a stored timestamp.
pub trait TimeLabel {
    fn timestamp(&self) -> &str;
    fn set_label(&mut self, label: String);
}

/// Recomputes every label in `labels` against `now`.
///
/// Elements whose timestamp does not parse keep their current text.
/// Returns how many labels were rewritten.
pub fn refresh_labels<'a, T, I>(labels: I, now: DateTime<Utc>, date_format: &str) -> usize
where
    T: TimeLabel + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    let mut refreshed = 0;

    for label in labels {
        match time::label_for(label.timestamp(), now, date_format) {
            Ok(text) => {
                label.set_label(text);
                refreshed += 1;
            }
            Err(e) => log::warn!("skipping time label: {}", e),
        }
    }

    refreshed
}

/// Repeating tick source with an explicit stop.
pub struct RefreshTimer {
    ticks: Receiver<Instant>,
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl RefreshTimer {
    pub fn start(interval: Duration) -> Self {
        let (tick_tx, ticks) = bounded(1);
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let ticker = tick(interval);

        let handle = std::thread::spawn(move || {
            loop {
                select! {
                    recv(ticker) -> at => {
                        let Ok(at) = at else { break };
                        // a tick that is still pending covers this one
                        let _ = tick_tx.try_send(at);
                    }
                    recv(stop_rx) -> _ => break,
                }
            }
        });

        Self {
            ticks,
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn ticks(&self) -> &Receiver<Instant> {
        &self.ticks
    }

    /// True if at least one tick fired since the last call.
    pub fn due(&self) -> bool {
        self.ticks().try_recv().is_ok()
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn stop(&mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RefreshTimer {
    fn drop(&mut self) {
        if self.is_running() {
            self.stop();
        }
    }
}
