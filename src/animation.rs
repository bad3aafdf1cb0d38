use druid::Data;
use std::time::{Duration, Instant};

pub const CLOSED_ANGLE: f64 = 0.0;
pub const OPEN_ANGLE: f64 = 120.0;

/// Where the door is in its open/close cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Door hinge angle and the direction it is travelling in.
///
/// The angle only ever changes through [`Door::tick`] and always stays within
/// `[CLOSED_ANGLE, OPEN_ANGLE]`.
#[derive(Debug, Clone, Copy, Data, PartialEq)]
pub struct Door {
    angle: f64,
    opening: bool,
    closing: bool,
    step: f64,
}

impl Door {
    /// A closed door that moves `step` degrees per tick
    pub fn new(step: f64) -> Self {
        Door {
            angle: CLOSED_ANGLE,
            opening: false,
            closing: false,
            step,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn is_opening(&self) -> bool {
        self.opening
    }

    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Starts opening, reversing a close in progress without moving the door
    pub fn open(&mut self) {
        self.opening = true;
        self.closing = false;
    }

    /// Starts closing, reversing an open in progress without moving the door
    pub fn close(&mut self) {
        self.closing = true;
        self.opening = false;
    }

    /// Advances the door by one step. Opening is checked before closing.
    pub fn tick(&mut self) {
        if self.opening {
            self.angle = (self.angle + self.step).min(OPEN_ANGLE);
            if self.angle >= OPEN_ANGLE {
                self.opening = false;
                log::debug!("door open");
            }
        } else if self.closing {
            self.angle = (self.angle - self.step).max(CLOSED_ANGLE);
            if self.angle <= CLOSED_ANGLE {
                self.closing = false;
                log::debug!("door closed");
            }
        }
    }

    pub fn phase(&self) -> DoorPhase {
        if self.opening {
            DoorPhase::Opening
        } else if self.closing {
            DoorPhase::Closing
        } else if self.angle >= OPEN_ANGLE {
            DoorPhase::Open
        } else {
            DoorPhase::Closed
        }
    }
}

/// Fixed-rate tick source fed with wall-clock time.
///
/// Elapsed time accumulates into a backlog that is paid out in whole
/// periods, so late timer callbacks are made up for on the next call instead
/// of slowing the animation down.
#[derive(Debug, Clone)]
pub struct FixedStep {
    period: Duration,
    max_catch_up: u32,
    backlog: Duration,
    last: Option<Instant>,
}

impl FixedStep {
    pub fn new(period: Duration, max_catch_up: u32) -> Self {
        FixedStep {
            period,
            max_catch_up,
            backlog: Duration::ZERO,
            last: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Number of ticks due at `now`. The first call always yields one tick.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let elapsed = match self.last {
            Some(last) => now.saturating_duration_since(last),
            None => self.period,
        };
        self.last = Some(now);
        self.accumulate(elapsed)
    }

    /// Adds `elapsed` to the backlog and pays out whole periods, at most
    /// `max_catch_up` of them. Backlog beyond the cap is dropped.
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        if self.period.is_zero() {
            return 0;
        }
        self.backlog += elapsed;
        let mut ticks = 0;
        while self.backlog >= self.period && ticks < self.max_catch_up {
            self.backlog -= self.period;
            ticks += 1;
        }
        if self.backlog >= self.period {
            log::debug!("dropping {:?} of animation backlog", self.backlog);
            self.backlog = Duration::ZERO;
        }
        ticks
    }
}
