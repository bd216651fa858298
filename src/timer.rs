//! Elapsed time tracking module.
//!
//! This module contains the shared elapsed-time value and the background thread that keeps it up
//! to date while the player is solving mazes.

use std::{
    io,
    sync::{
        atomic::{AtomicU64, Ordering},
        mpsc::{self, RecvTimeoutError, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use tracing::{debug, warn};

/// Interval between two updates of the elapsed time.
pub(crate) const TICK: Duration = Duration::from_secs(1);

/// Elapsed session time shared between the timer thread and the rendering code.
///
/// The value is stored as whole milliseconds. Only the timer thread writes it; everything else
/// reads the last value written.
#[derive(Clone, Debug, Default)]
pub(crate) struct ElapsedTime(Arc<AtomicU64>);

impl ElapsedTime {
    /// Returns the last value written by the timer.
    pub(crate) fn get(&self) -> Duration {
        Duration::from_millis(self.0.load(Ordering::Acquire))
    }

    /// Stores a new value, saturating at [`u64::MAX`] milliseconds.
    fn set(&self, elapsed: Duration) {
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.0.store(millis, Ordering::Release);
    }
}

/// Handle to the background thread that updates an [`ElapsedTime`].
///
/// Every tick the thread writes the time elapsed since [`Timer::start`] was called. A stop request
/// wakes the thread immediately; it writes the final value and exits. Dropping the handle stops
/// the thread as well.
#[derive(Debug)]
pub(crate) struct Timer {
    /// Channel used to ask the thread to stop.
    stop: Sender<()>,
    /// Join handle of the running thread, taken once it has been stopped.
    handle: Option<JoinHandle<()>>,
    /// Value the thread writes to.
    elapsed: ElapsedTime,
}

impl Timer {
    /// Spawns the timer thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the operating system refuses to spawn the thread.
    pub(crate) fn start(elapsed: ElapsedTime, tick: Duration) -> io::Result<Self> {
        let (stop, stop_rx) = mpsc::channel();
        let shared = elapsed.clone();
        let started_at = Instant::now();

        let handle = thread::Builder::new()
            .name("maze-timer".to_owned())
            .spawn(move || loop {
                match stop_rx.recv_timeout(tick) {
                    Err(RecvTimeoutError::Timeout) => shared.set(started_at.elapsed()),
                    Ok(()) => {
                        shared.set(started_at.elapsed());
                        debug!(elapsed_ms = shared.get().as_millis(), "timer stopped");
                        break;
                    }
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;
        debug!(tick_ms = tick.as_millis(), "timer started");

        Ok(Self {
            stop,
            handle: Some(handle),
            elapsed,
        })
    }

    /// Stops the thread, waits for it to finish and returns the final elapsed time.
    ///
    /// Calling this more than once is harmless; later calls just return the frozen value.
    pub(crate) fn stop(&mut self) -> Duration {
        if let Some(handle) = self.handle.take() {
            if self.stop.send(()).is_err() {
                warn!("timer thread exited before it was asked to stop");
            }
            if handle.join().is_err() {
                warn!("timer thread panicked");
            }
        }

        self.elapsed.get()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}
