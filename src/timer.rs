//! Countdown timer: wall-clock anchored, pause/resume, exactly-once expiry.

use std::time::{Duration, Instant};

/// Display tick interval: observers get a fresh `remaining` once per second.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopped,
    Running { deadline: Instant },
}

/// Countdown over a fixed duration. All methods take `now` explicitly so the
/// event loop owns the clock and tests stay deterministic.
///
/// The expiry and the display tick are independent schedules: pausing freezes
/// the deadline but ticks keep delivering the frozen `remaining`, and `reset`
/// cancels both so a stale deadline can never fire into a later round.
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    duration: Duration,
    /// Remaining time while stopped (frozen on pause, zero after expiry).
    remaining: Duration,
    phase: Phase,
    next_tick: Option<Instant>,
}

impl CountdownTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            remaining: duration,
            phase: Phase::Stopped,
            next_tick: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Start counting down from the current `remaining`. No-op while already
    /// running; a second `start` never moves the deadline.
    pub fn start(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }
        self.phase = Phase::Running {
            deadline: now + self.remaining,
        };
        if self.next_tick.is_none() {
            self.next_tick = Some(now + TICK_INTERVAL);
        }
    }

    /// Freeze the countdown. `remaining` keeps reporting the frozen value
    /// until `resume`. No-op while stopped.
    pub fn pause(&mut self, now: Instant) {
        if let Phase::Running { deadline } = self.phase {
            self.remaining = deadline.saturating_duration_since(now);
            self.phase = Phase::Stopped;
        }
    }

    /// Continue from the frozen remaining value.
    pub fn resume(&mut self, now: Instant) {
        self.start(now);
    }

    /// Cancel any pending expiry and tick, restore the full duration, leave
    /// the timer stopped.
    pub fn reset(&mut self) {
        self.phase = Phase::Stopped;
        self.remaining = self.duration;
        self.next_tick = None;
    }

    /// Whole seconds left, rounded to nearest, clamped to `[0, duration]`.
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let left = match self.phase {
            Phase::Running { deadline } => deadline.saturating_duration_since(now),
            Phase::Stopped => self.remaining,
        };
        let secs = (left.as_millis() + 500) / 1000;
        (secs as u64).min(self.duration.as_secs())
    }

    /// True exactly once per start→expiry cycle, when the deadline has
    /// passed. Firing stops the timer; it never restarts itself.
    pub fn poll_expiry(&mut self, now: Instant) -> bool {
        if let Phase::Running { deadline } = self.phase {
            if now >= deadline {
                self.phase = Phase::Stopped;
                self.remaining = Duration::ZERO;
                return true;
            }
        }
        false
    }

    /// `Some(remaining)` once per `TICK_INTERVAL` since `start`, `None`
    /// otherwise. Keeps delivering while paused so the display shows the
    /// frozen value rather than going stale.
    pub fn poll_tick(&mut self, now: Instant) -> Option<u64> {
        let due = self.next_tick?;
        if now < due {
            return None;
        }
        let mut next = due + TICK_INTERVAL;
        // Skip ticks missed under a stalled event loop instead of bursting.
        while next <= now {
            next += TICK_INTERVAL;
        }
        self.next_tick = Some(next);
        Some(self.remaining_secs(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn counts_down_while_running() {
        let t0 = Instant::now();
        let mut t = CountdownTimer::new(secs(20));
        assert_eq!(t.remaining_secs(t0), 20);

        t.start(t0);
        assert_eq!(t.remaining_secs(t0 + secs(3)), 17);
        assert_eq!(t.remaining_secs(t0 + secs(19)), 1);
    }

    #[test]
    fn start_is_idempotent() {
        let t0 = Instant::now();
        let mut t = CountdownTimer::new(secs(20));
        t.start(t0);
        // A later second start must not push the deadline out.
        t.start(t0 + secs(5));
        assert_eq!(t.remaining_secs(t0 + secs(10)), 10);
    }

    #[test]
    fn pause_freezes_and_resume_continues() {
        let t0 = Instant::now();
        let mut t = CountdownTimer::new(secs(20));
        t.start(t0);
        t.pause(t0 + secs(8));
        assert!(!t.is_running());
        assert_eq!(t.remaining_secs(t0 + secs(60)), 12);

        t.resume(t0 + secs(60));
        assert_eq!(t.remaining_secs(t0 + secs(65)), 7);
    }

    #[test]
    fn redundant_pause_and_resume_are_noops() {
        let t0 = Instant::now();
        let mut t = CountdownTimer::new(secs(20));
        t.pause(t0);
        assert_eq!(t.remaining_secs(t0), 20);

        t.start(t0);
        t.resume(t0 + secs(4));
        assert_eq!(t.remaining_secs(t0 + secs(4)), 16);
    }

    #[test]
    fn reset_restores_full_duration_and_stops() {
        let t0 = Instant::now();
        let mut t = CountdownTimer::new(secs(20));
        t.start(t0);
        t.reset();
        assert!(!t.is_running());
        assert_eq!(t.remaining_secs(t0 + secs(100)), 20);
        // A deadline from before the reset can never fire.
        assert!(!t.poll_expiry(t0 + secs(100)));
    }

    #[test]
    fn expiry_fires_exactly_once_per_cycle() {
        let t0 = Instant::now();
        let mut t = CountdownTimer::new(secs(5));
        t.start(t0);
        assert!(!t.poll_expiry(t0 + secs(4)));
        assert!(t.poll_expiry(t0 + secs(5)));
        assert!(!t.poll_expiry(t0 + secs(6)));
        assert_eq!(t.remaining_secs(t0 + secs(6)), 0);

        // A fresh cycle may expire again.
        t.reset();
        t.start(t0 + secs(10));
        assert!(t.poll_expiry(t0 + secs(15)));
        assert!(!t.poll_expiry(t0 + secs(16)));
    }

    #[test]
    fn remaining_never_negative_or_above_duration() {
        let t0 = Instant::now();
        let mut t = CountdownTimer::new(secs(5));
        t.start(t0);
        assert_eq!(t.remaining_secs(t0 + secs(9)), 0);
        t.reset();
        assert_eq!(t.remaining_secs(t0), 5);
    }

    #[test]
    fn ticks_deliver_once_per_interval() {
        let t0 = Instant::now();
        let mut t = CountdownTimer::new(secs(20));
        t.start(t0);
        assert_eq!(t.poll_tick(t0), None);
        assert_eq!(t.poll_tick(t0 + secs(1)), Some(19));
        assert_eq!(t.poll_tick(t0 + secs(1)), None);
        assert_eq!(t.poll_tick(t0 + secs(2)), Some(18));
    }

    #[test]
    fn ticks_report_frozen_value_while_paused() {
        let t0 = Instant::now();
        let mut t = CountdownTimer::new(secs(20));
        t.start(t0);
        t.pause(t0 + secs(3));
        assert_eq!(t.poll_tick(t0 + secs(4)), Some(17));
        assert_eq!(t.poll_tick(t0 + secs(5)), Some(17));
    }
}
