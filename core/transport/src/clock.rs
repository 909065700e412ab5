use std::time::Duration;

/// Periodic UI tick source for polling playback progress.
///
/// Fed with wall-clock deltas by whatever loop owns it; emits a tick every
/// `interval`. Several intervals elapsing between two calls collapse into a
/// single tick, since a late poll only needs the latest cursor.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    interval: Duration,
    pending: Duration,
    tick_counter: u64,
    running: bool,
}

impl FrameClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: Duration::ZERO,
            tick_counter: 0,
            running: false,
        }
    }

    pub fn advance_by(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }

        if self.interval.is_zero() {
            self.tick_counter += 1;
            return true;
        }

        self.pending += elapsed;
        if self.pending < self.interval {
            return false;
        }

        let intervals = self.pending.as_nanos() / self.interval.as_nanos();
        let consumed = self.interval.as_nanos() * intervals;
        self.pending = Duration::from_nanos((self.pending.as_nanos() - consumed) as u64);
        self.tick_counter += 1;
        true
    }

    /// Time left before the next tick is due.
    pub fn until_next_tick(&self) -> Duration {
        self.interval.saturating_sub(self.pending)
    }

    pub fn current_tick(&self) -> u64 {
        self.tick_counter
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(16);

    fn running_clock() -> FrameClock {
        let mut clock = FrameClock::new(INTERVAL);
        clock.start();
        clock
    }

    #[test]
    fn test_new_clock_is_stopped() {
        let mut clock = FrameClock::new(INTERVAL);
        assert!(!clock.is_running());
        assert!(!clock.advance_by(INTERVAL));
        assert_eq!(clock.current_tick(), 0);
    }

    #[test]
    fn test_no_tick_emitted_before_interval() {
        let mut clock = running_clock();
        assert!(!clock.advance_by(Duration::from_millis(10)));
        assert_eq!(clock.until_next_tick(), Duration::from_millis(6));
    }

    #[test]
    fn test_tick_emitted_at_interval() {
        let mut clock = running_clock();
        assert!(!clock.advance_by(Duration::from_millis(10)));
        assert!(clock.advance_by(Duration::from_millis(6)));
        assert_eq!(clock.current_tick(), 1);
        assert_eq!(clock.until_next_tick(), INTERVAL);
    }

    #[test]
    fn test_late_poll_coalesces_into_one_tick() {
        let mut clock = running_clock();
        assert!(clock.advance_by(Duration::from_millis(50)));
        assert_eq!(clock.current_tick(), 1);
        // 50 - 3 * 16 = 2ms carried over
        assert_eq!(clock.until_next_tick(), Duration::from_millis(14));
    }

    #[test]
    fn test_stop_prevents_tick() {
        let mut clock = running_clock();
        clock.stop();
        assert!(!clock.advance_by(INTERVAL));
        assert_eq!(clock.current_tick(), 0);
    }

    #[test]
    fn test_zero_interval_ticks_every_advance() {
        let mut clock = FrameClock::new(Duration::ZERO);
        clock.start();
        assert!(clock.advance_by(Duration::ZERO));
        assert!(clock.advance_by(Duration::ZERO));
        assert_eq!(clock.current_tick(), 2);
    }
}
