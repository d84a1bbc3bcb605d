/// Simulation clock driven by host frame timestamps (milliseconds).
///
/// Simulated time is the sum of accepted frame deltas, so every scheduler
/// compares against the same timeline. Deltas are clamped to `[0, max_dt]`:
/// a backgrounded tab resumes without a jump, and a clock that steps backwards
/// is treated as a zero-length frame.
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Largest accepted delta.
    max_dt: f64,
    /// Last host timestamp seen.
    last: f64,
    /// Current simulated time.
    now: f64,
}

impl SimClock {
    /// Start the clock at host time `start`; simulated time starts there too.
    pub fn new(start: f64, max_dt: f64) -> Self {
        Self {
            max_dt,
            last: start,
            now: start,
        }
    }

    /// Consume a host frame timestamp. Returns the accepted delta.
    pub fn tick(&mut self, timestamp: f64) -> f64 {
        let raw = timestamp - self.last;
        if timestamp.is_finite() {
            self.last = timestamp;
        }
        self.step(raw)
    }

    /// Advance simulated time by an explicit delta. Returns the accepted delta.
    pub fn step(&mut self, dt: f64) -> f64 {
        let dt = self.clamp(dt);
        self.now += dt;
        dt
    }

    fn clamp(&self, dt: f64) -> f64 {
        if dt.is_finite() {
            dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        }
    }

    /// Current simulated time (ms).
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn max_dt(&self) -> f64 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_elapsed_time() {
        let mut clock = SimClock::new(1000.0, 250.0);
        assert_eq!(clock.tick(1016.0), 16.0);
        assert_eq!(clock.now(), 1016.0);
    }

    #[test]
    fn large_gaps_are_capped() {
        let mut clock = SimClock::new(0.0, 250.0);
        let dt = clock.tick(60_000.0); // tab was hidden for a minute
        assert_eq!(dt, 250.0);
        assert_eq!(clock.now(), 250.0);
        // Following frames measure from the real timestamp, not the capped one.
        assert_eq!(clock.tick(60_016.0), 16.0);
        assert_eq!(clock.now(), 266.0);
    }

    #[test]
    fn backwards_timestamps_are_zero_length() {
        let mut clock = SimClock::new(500.0, 250.0);
        assert_eq!(clock.tick(400.0), 0.0);
        assert_eq!(clock.now(), 500.0);
        assert_eq!(clock.tick(416.0), 16.0);
    }

    #[test]
    fn non_finite_deltas_are_ignored() {
        let mut clock = SimClock::new(0.0, 250.0);
        assert_eq!(clock.step(f64::NAN), 0.0);
        assert_eq!(clock.tick(f64::INFINITY), 0.0);
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn simulated_time_never_decreases() {
        let mut clock = SimClock::new(0.0, 250.0);
        let mut prev = clock.now();
        for ts in [10.0, 5.0, 900.0, 901.0, 100.0, 2000.0] {
            clock.tick(ts);
            assert!(clock.now() >= prev);
            prev = clock.now();
        }
    }
}
