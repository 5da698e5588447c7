// clock.rs - Frame time from host timestamps
//
// Hosts hand over millisecond timestamps (rAF, performance.now). Time only moves
// forward; a stale or garbage timestamp leaves it where it is.

#[derive(Debug, Clone, Default)]
pub struct Clock {
    seconds: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now_ms`; returns the step in seconds (0 if nothing moved)
    pub fn advance_to(&mut self, now_ms: f64) -> f64 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let next = now_ms * 0.001;
        if next <= self.seconds {
            return 0.0;
        }
        let dt = next - self.seconds;
        self.seconds = next;
        dt
    }

    /// Shader-facing time. Wrapped so f32 keeps sub-millisecond precision on long sessions.
    pub fn time(&self) -> f32 {
        (self.seconds % WRAP_SECONDS) as f32
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }
}

// Shader time wraps once a day
const WRAP_SECONDS: f64 = 86_400.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_monotonically() {
        let mut c = Clock::new();
        assert_eq!(c.advance_to(1500.0), 1.5);
        assert_eq!(c.advance_to(1000.0), 0.0);
        assert_eq!(c.time(), 1.5);
        assert!((c.advance_to(2000.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn ignores_non_finite() {
        let mut c = Clock::new();
        c.advance_to(500.0);
        assert_eq!(c.advance_to(f64::NAN), 0.0);
        assert_eq!(c.advance_to(f64::INFINITY), 0.0);
        assert_eq!(c.time(), 0.5);
    }
}
