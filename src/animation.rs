use std::time::{Duration, Instant};

// ============================================================================
// MARKER ORBIT
// ============================================================================

/// Angle of the orbiting marker, in whole degrees counter-clockwise from
/// 3 o'clock. Each step moves it clockwise by `increment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orbit {
    initial: i32,
    increment: i32,
    angle: i32,
}

impl Orbit {
    /// `increment` is clamped to at least one degree so the marker always
    /// moves and eventually wraps.
    pub fn new(initial: i32, increment: i32) -> Self {
        Self {
            initial,
            increment: increment.max(1),
            angle: initial,
        }
    }

    pub fn increment(&self) -> i32 {
        self.increment
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn initial(&self) -> i32 {
        self.initial
    }

    pub fn set(&mut self, angle: i32) {
        self.angle = angle;
    }

    pub fn reset(&mut self) {
        self.angle = self.initial;
    }

    /// Advances one tick. Going below zero lands on `360 - increment` however
    /// far below zero the subtraction went, or whether it overflowed.
    pub fn step(&mut self) -> i32 {
        self.angle = match self.angle.checked_sub(self.increment) {
            Some(angle) if angle >= 0 => angle,
            _ => 360 - self.increment,
        };
        self.angle
    }
}

// ============================================================================
// REPEATING TIMER
// ============================================================================

/// Host-polled repeating timer. It owns no thread; whoever drives the event
/// loop calls [`RepeatingTimer::poll`] and sleeps until [`RepeatingTimer::deadline`].
#[derive(Debug, Clone, Default)]
pub struct RepeatingTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl RepeatingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts the timer; the first tick is due one interval after `now`.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_due = Some(now + interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Returns whether a tick is due at `now`. Fires at most once per call;
    /// periods missed while the host was busy collapse into that one tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.interval;
                self.next_due = Some(if next > now { next } else { now + self.interval });
                true
            }
            _ => false,
        }
    }
}
