use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// How long the runner blocks for input while no countdown is armed
const IDLE_WAIT: Duration = Duration::from_millis(250);

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// One countdown period elapsed
    Tick,
    /// The event source went away
    Closed,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait AppEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    /// Returns Ok(event) if an event arrives before the timeout, or Err(Timeout) if it expires.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(CtEvent::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(CtEvent::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("terminal event read failed: {}", e);
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// A repeating deadline. Disarmed countdowns never fire.
#[derive(Clone, Copy, Debug)]
pub struct Countdown {
    period: Duration,
    next_due: Option<Instant>,
}

impl Countdown {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn arm(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }

    /// Puts back a tick taken by `poll` so the next step delivers it
    pub fn defer(&mut self, now: Instant) {
        if let Some(due) = self.next_due {
            self.next_due = Some((due - self.period).min(now));
        }
    }

    /// Fires at most once per call; the next deadline follows the previous one
    /// so late polls do not drift the schedule.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(due + self.period);
                true
            }
            _ => false,
        }
    }
}

/// Timer control handed to whoever executes session effects
pub trait CountdownControl {
    fn arm_countdown(&mut self);
    fn cancel_countdown(&mut self);
}

/// Runner that advances the application one event/tick at a time
pub struct Runner<E: AppEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    countdown: Countdown,
}

impl<E: AppEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let countdown = Countdown::new(ticker.interval());
        Self {
            event_source,
            ticker,
            countdown,
        }
    }

    pub fn countdown_armed(&self) -> bool {
        self.countdown.is_armed()
    }

    /// Blocks until an input event arrives or the countdown comes due
    pub fn step(&mut self) -> AppEvent {
        loop {
            let now = Instant::now();
            if self.countdown.poll(now) {
                // input already queued goes before ticks that fell behind
                return match self.event_source.recv_timeout(Duration::ZERO) {
                    Ok(ev) => {
                        self.countdown.defer(now);
                        ev
                    }
                    Err(_) => AppEvent::Tick,
                };
            }
            let wait = self.countdown.time_until_due(now).unwrap_or(IDLE_WAIT);
            match self.event_source.recv_timeout(wait) {
                Ok(ev) => return ev,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    if !self.countdown.is_armed() {
                        return AppEvent::Closed;
                    }
                    // keep the clock honest until the session is over
                    std::thread::sleep(wait);
                }
            }
        }
    }
}

impl<E: AppEventSource, T: Ticker> CountdownControl for Runner<E, T> {
    fn arm_countdown(&mut self) {
        log::debug!("countdown armed, period {:?}", self.ticker.interval());
        self.countdown.arm(Instant::now());
    }

    fn cancel_countdown(&mut self) {
        if self.countdown.is_armed() {
            log::debug!("countdown cancelled");
        }
        self.countdown.cancel();
    }
}

impl<E: AppEventSource, T: Ticker> Drop for Runner<E, T> {
    fn drop(&mut self) {
        self.countdown.cancel();
    }
}
