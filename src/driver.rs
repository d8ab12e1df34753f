use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, warn};

use crate::config::{BASE_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS, TICK_STEP_PER_LEVEL_MS};
use crate::game::GameState;
use crate::input::GameInput;
use crate::snapshot::Snapshot;

/// Tick timing for the loop driver.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DriverConfig {
    pub base_ms: u64,
    pub min_ms: u64,
    pub step_ms: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            base_ms: BASE_TICK_INTERVAL_MS,
            min_ms: MIN_TICK_INTERVAL_MS,
            step_ms: TICK_STEP_PER_LEVEL_MS,
        }
    }
}

/// Delay before the next tick: `max(min, base - level * step)`.
#[must_use]
pub fn tick_interval_for_level(level: u32, config: DriverConfig) -> Duration {
    let penalty_ms = u64::from(level).saturating_mul(config.step_ms);
    let clamped_ms = config
        .base_ms
        .saturating_sub(penalty_ms)
        .max(config.min_ms);
    Duration::from_millis(clamped_ms)
}

/// Game state shared between the driver thread and the UI thread.
///
/// Every mutation and every snapshot happens under one lock, so readers
/// never observe a half-applied step.
#[derive(Debug, Clone)]
pub struct SharedGame {
    inner: Arc<Mutex<GameState>>,
}

impl SharedGame {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Advances one tick and returns the resulting snapshot.
    #[must_use]
    pub fn step(&self) -> Snapshot {
        let mut state = self.lock();
        state.step();
        state.snapshot()
    }

    /// Applies an input; returns a fresh snapshot when it should be shown
    /// without waiting for the next tick.
    #[must_use]
    pub fn apply_input(&self, input: GameInput) -> Option<Snapshot> {
        let mut state = self.lock();
        state.apply_input(input).then(|| state.snapshot())
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    fn lock(&self) -> MutexGuard<'_, GameState> {
        recover(self.inner.lock())
    }
}

fn recover<T>(result: Result<T, PoisonError<T>>) -> T {
    result.unwrap_or_else(|poisoned| {
        warn!("recovering poisoned lock");
        poisoned.into_inner()
    })
}

#[derive(Debug, Default)]
struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    fn raise(&self) {
        *recover(self.stopped.lock()) = true;
        self.wake.notify_all();
    }

    /// Sleeps for `timeout` unless stopped first. Returns true when stopped.
    ///
    /// Spurious wakeups resume the wait for the remaining time.
    fn wait(&self, timeout: Duration) -> bool {
        let guard = recover(self.stopped.lock());
        let (guard, _timed_out) =
            recover(self.wake.wait_timeout_while(guard, timeout, |stopped| !*stopped));
        *guard
    }
}

/// Background thread stepping the game at a level-dependent rate.
///
/// Each tick is published on the frame channel; the driver never waits for
/// the receiver. It stops when the receiver hangs up, on [`Driver::stop`],
/// or when dropped.
#[derive(Debug)]
pub struct Driver {
    signal: Arc<StopSignal>,
    handle: Option<JoinHandle<()>>,
}

impl Driver {
    /// Starts the loop thread.
    pub fn spawn(
        game: SharedGame,
        config: DriverConfig,
        frames: Sender<Snapshot>,
    ) -> io::Result<Self> {
        let signal = Arc::new(StopSignal::default());
        let thread_signal = Arc::clone(&signal);

        let handle = thread::Builder::new()
            .name("game-loop".to_owned())
            .spawn(move || run_loop(&game, config, &frames, &thread_signal))?;

        Ok(Self {
            signal,
            handle: Some(handle),
        })
    }

    /// Signals the loop to stop and waits for the thread to exit.
    pub fn stop(&mut self) {
        self.signal.raise();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("game loop thread panicked");
            }
        }
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Drains pending frames and returns the newest of them and `current`.
///
/// Frames the UI fell behind on are skipped. A frame taken before an input
/// that the UI already applied (a restart) is older than `current` and is
/// dropped, so the screen never steps back.
#[must_use]
pub fn latest_frame(frames: &Receiver<Snapshot>, current: Snapshot) -> Snapshot {
    frames.try_iter().fold(current, |newest, frame| {
        if frame.is_newer_than(&newest) {
            frame
        } else {
            newest
        }
    })
}

fn run_loop(
    game: &SharedGame,
    config: DriverConfig,
    frames: &Sender<Snapshot>,
    signal: &StopSignal,
) {
    debug!("game loop started: {config:?}");

    loop {
        let snapshot = game.step();
        let delay = tick_interval_for_level(snapshot.level, config);

        if frames.send(snapshot).is_err() {
            debug!("frame receiver closed");
            break;
        }

        if signal.wait(delay) {
            break;
        }
    }

    debug!("game loop stopped");
}
