use core::cell::Cell;
use std::rc::Rc;

use web_time::{SystemTime, UNIX_EPOCH};

use crate::TimestampMs;

/// Source of wall-clock time for round timing.
pub trait Clock {
    fn now_ms(&self) -> TimestampMs;
}

/// Reads the system clock, also in the browser.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> TimestampMs {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|since| since.as_millis() as TimestampMs)
            .unwrap_or_default()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<TimestampMs>>,
}

impl ManualClock {
    pub fn new(start: TimestampMs) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: TimestampMs) {
        self.now.set(now);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.now.set(self.now.get() + secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> TimestampMs {
        self.now.get()
    }
}
