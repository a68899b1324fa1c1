use stopwatch_core::{Lap, Stopwatch};

/// Widget-side stopwatch state: the core bookkeeping plus the lap list view.
pub struct StopwatchState {
    pub timer: Stopwatch,
    /// Rows skipped from the top (newest) of the lap list.
    pub lap_scroll_offset: usize,
}

impl StopwatchState {
    pub fn new() -> Self {
        Self {
            timer: Stopwatch::new(),
            lap_scroll_offset: 0,
        }
    }

    pub fn record_lap(&mut self) -> Option<Lap> {
        self.timer.record_lap()
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.lap_scroll_offset = 0;
    }

    pub fn scroll_up(&mut self) {
        self.lap_scroll_offset = self.lap_scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let max = self.timer.laps().len().saturating_sub(1);
        if self.lap_scroll_offset < max {
            self.lap_scroll_offset += 1;
        }
    }
}
