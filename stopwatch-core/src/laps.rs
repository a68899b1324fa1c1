use std::collections::VecDeque;

/// A recorded checkpoint. `difference_ms` is the time since the previous lap
/// (or since zero for the first one).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lap {
    pub id: usize,
    pub time_ms: u64,
    pub difference_ms: u64,
}

/// How a lap row should be highlighted relative to the session extrema.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LapMark {
    Best,
    Worst,
    Plain,
}

/// Lap history for one session, newest first, with running extrema.
#[derive(Debug, Default)]
pub struct LapBook {
    laps: VecDeque<Lap>,
    // Elapsed time at the most recent lap
    last_lap_ms: u64,
    best_ms: Option<u64>,
    worst_ms: Option<u64>,
}

impl LapBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed_ms: u64) -> Lap {
        let difference_ms = elapsed_ms.saturating_sub(self.last_lap_ms);
        let lap = Lap {
            id: self.laps.len() + 1,
            time_ms: elapsed_ms,
            difference_ms,
        };
        self.laps.push_front(lap);
        self.last_lap_ms = elapsed_ms;

        self.best_ms = Some(match self.best_ms {
            Some(best) if best <= difference_ms => best,
            _ => difference_ms,
        });
        self.worst_ms = Some(match self.worst_ms {
            Some(worst) if worst >= difference_ms => worst,
            _ => difference_ms,
        });
        lap
    }

    pub fn clear(&mut self) {
        self.laps.clear();
        self.last_lap_ms = 0;
        self.best_ms = None;
        self.worst_ms = None;
    }

    /// Laps, most recent first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Lap> + DoubleEndedIterator {
        self.laps.iter()
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    pub fn best_ms(&self) -> Option<u64> {
        self.best_ms
    }

    pub fn worst_ms(&self) -> Option<u64> {
        self.worst_ms
    }

    /// Best wins when a lap equals both extrema (e.g. a single lap).
    pub fn mark(&self, lap: &Lap) -> LapMark {
        if self.best_ms == Some(lap.difference_ms) {
            LapMark::Best
        } else if self.worst_ms == Some(lap.difference_ms) {
            LapMark::Worst
        } else {
            LapMark::Plain
        }
    }
}
