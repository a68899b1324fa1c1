//! Pure stopwatch logic with no platform dependencies.
//! Time only advances through [`Stopwatch::tick`]; the host decides when to call it.

mod laps;

pub use laps::{Lap, LapBook, LapMark};

/// Milliseconds added to the elapsed time on every tick.
pub const TICK_MS: u64 = 10;

/// Wall-clock period between ticks, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 10;

pub const DEFAULT_SHARE_LINK: &str = "https://stop-watch_app.vercel.com";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    Stopped,
    Running,
}

#[derive(Debug)]
pub struct Stopwatch {
    state: TimerState,
    elapsed_ms: u64,
    laps: LapBook,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    pub fn new() -> Self {
        Self {
            state: TimerState::Stopped,
            elapsed_ms: 0,
            laps: LapBook::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Flip between running and stopped, returning the new state.
    pub fn toggle(&mut self) -> TimerState {
        self.state = match self.state {
            TimerState::Stopped => TimerState::Running,
            TimerState::Running => TimerState::Stopped,
        };
        self.state
    }

    pub fn start(&mut self) {
        self.state = TimerState::Running;
    }

    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    pub fn reset(&mut self) {
        self.state = TimerState::Stopped;
        self.elapsed_ms = 0;
        self.laps.clear();
    }

    /// Advance by one quantum. Ignored while stopped, so a late tick
    /// delivered after stopping cannot move the clock.
    pub fn tick(&mut self) -> u64 {
        if self.state == TimerState::Running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(TICK_MS);
        }
        self.elapsed_ms
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Record a lap at the current elapsed time. Returns `None` while stopped.
    pub fn record_lap(&mut self) -> Option<Lap> {
        if self.state != TimerState::Running {
            return None;
        }
        Some(self.laps.record(self.elapsed_ms))
    }

    pub fn laps(&self) -> &LapBook {
        &self.laps
    }

    pub fn best_lap_ms(&self) -> Option<u64> {
        self.laps.best_ms()
    }

    pub fn worst_lap_ms(&self) -> Option<u64> {
        self.laps.worst_ms()
    }

    /// Plain-text results summary handed to the share target.
    pub fn share_text(&self, link: &str) -> String {
        format!(
            "My Stopwatch Results:\n\
             Total Time: {}\n\
             Number of Laps: {}\n\
             Best Lap: {}\n\
             Worst Lap: {}\n\
             Try it: {}",
            format_time(self.elapsed_ms),
            self.laps.len(),
            format_optional(self.best_lap_ms()),
            format_optional(self.worst_lap_ms()),
            link,
        )
    }
}

/// Format milliseconds as "MM:SS:CC". Minutes are not wrapped into hours.
pub fn format_time(ms: u64) -> String {
    let m = ms / 60_000;
    let s = (ms % 60_000) / 1000;
    let cs = (ms % 1000) / 10;
    format!("{:02}:{:02}:{:02}", m, s, cs)
}

/// Like [`format_time`], but "N/A" when there is no value.
pub fn format_optional(ms: Option<u64>) -> String {
    match ms {
        Some(ms) => format_time(ms),
        None => String::from("N/A"),
    }
}
