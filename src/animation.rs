//! Easing curves and the accumulating flip tween

use crate::constants::{FLIP_DEGREES, FLIP_DURATION_MS};
use std::time::{Duration, Instant};

/// CSS-style cubic bezier easing with fixed endpoints (0,0) and (1,1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezierEasing {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezierEasing {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    fn bezier(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    fn bezier_slope(a1: f32, a2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    /// Solve x(s) = t for the curve parameter s.
    fn solve_s(&self, t: f32) -> f32 {
        let mut s = t;
        for _ in 0..8 {
            let err = Self::bezier(self.x1, self.x2, s) - t;
            if err.abs() < 1e-6 {
                return s;
            }
            let slope = Self::bezier_slope(self.x1, self.x2, s);
            if slope.abs() < 1e-6 {
                break;
            }
            s -= err / slope;
        }

        // Newton stalled, bisect
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        s = t;
        for _ in 0..32 {
            let x = Self::bezier(self.x1, self.x2, s);
            if (x - t).abs() < 1e-6 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        s
    }

    pub fn transform(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        Self::bezier(self.y1, self.y2, self.solve_s(t))
    }
}

/// Material standard curve
pub const FAST_OUT_SLOW_IN: CubicBezierEasing = CubicBezierEasing::new(0.4, 0.0, 0.2, 1.0);

/// Rotation that advances by a half turn on every flip.
///
/// The target always grows by exactly [`FLIP_DEGREES`] per flip, so the
/// settled angle is `flips * 180` even if a flip lands mid-animation.
#[derive(Debug, Clone)]
pub struct FlipAnimation {
    from: f32,
    target: f32,
    started_at: Option<Instant>,
    duration: Duration,
    easing: CubicBezierEasing,
    flips: u64,
}

impl Default for FlipAnimation {
    fn default() -> Self {
        Self::new(Duration::from_millis(FLIP_DURATION_MS), FAST_OUT_SLOW_IN)
    }
}

impl FlipAnimation {
    pub fn new(duration: Duration, easing: CubicBezierEasing) -> Self {
        Self {
            from: 0.0,
            target: 0.0,
            started_at: None,
            duration,
            easing,
            flips: 0,
        }
    }

    fn fraction(&self, now: Instant) -> f32 {
        match self.started_at {
            Some(start) if !self.duration.is_zero() => {
                let elapsed = now.saturating_duration_since(start);
                (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
            }
            _ => 1.0,
        }
    }

    pub fn flip(&mut self, now: Instant) {
        self.from = self.value(now);
        self.target += FLIP_DEGREES;
        self.started_at = Some(now);
        self.flips += 1;
    }

    /// Current angle in degrees, unbounded
    pub fn value(&self, now: Instant) -> f32 {
        let fraction = self.fraction(now);
        if fraction >= 1.0 {
            return self.target;
        }
        let eased = self.easing.transform(fraction);
        self.from + (self.target - self.from) * eased
    }

    /// Current angle folded into [0, 360)
    pub fn display_degrees(&self, now: Instant) -> f32 {
        self.value(now).rem_euclid(360.0)
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_running(&self, now: Instant) -> bool {
        self.fraction(now) < 1.0
    }

    pub fn flips(&self) -> u64 {
        self.flips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_hits_endpoints() {
        let linear = CubicBezierEasing::new(0.0, 0.0, 1.0, 1.0);
        for easing in [linear, FAST_OUT_SLOW_IN] {
            assert_eq!(easing.transform(0.0), 0.0);
            assert_eq!(easing.transform(1.0), 1.0);
            assert_eq!(easing.transform(-0.5), 0.0);
            assert_eq!(easing.transform(2.0), 1.0);
        }
        assert!((linear.transform(0.3) - 0.3).abs() < 1e-4);
    }

    #[test]
    fn fast_out_slow_in_is_monotonic_and_front_loaded() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let y = FAST_OUT_SLOW_IN.transform(i as f32 / 100.0);
            assert!(y + 1e-5 >= prev, "not monotonic at {i}: {y} < {prev}");
            prev = y;
        }
        // Past the midpoint well before half the duration
        assert!(FAST_OUT_SLOW_IN.transform(0.5) > 0.7);
    }

    #[test]
    fn idle_animation_rests_at_zero() {
        let anim = FlipAnimation::default();
        let now = Instant::now();
        assert_eq!(anim.value(now), 0.0);
        assert!(!anim.is_running(now));
        assert_eq!(anim.flips(), 0);
    }

    #[test]
    fn flip_settles_on_half_turn() {
        let mut anim = FlipAnimation::default();
        let start = Instant::now();
        anim.flip(start);

        assert_eq!(anim.value(start), 0.0);
        assert!(anim.is_running(start + Duration::from_millis(350)));
        let mid = anim.value(start + Duration::from_millis(350));
        assert!(mid > 0.0 && mid < 180.0);

        let done = start + Duration::from_millis(FLIP_DURATION_MS);
        assert_eq!(anim.value(done), 180.0);
        assert!(!anim.is_running(done));
    }

    #[test]
    fn rotation_accumulates_exactly_per_flip() {
        let mut anim = FlipAnimation::default();
        let mut now = Instant::now();
        for _ in 0..5 {
            anim.flip(now);
            now += Duration::from_secs(60);
        }
        assert_eq!(anim.flips(), 5);
        assert_eq!(anim.value(now), 900.0);
        assert_eq!(anim.display_degrees(now), 180.0);
    }

    #[test]
    fn interrupted_flip_keeps_total() {
        let mut anim = FlipAnimation::default();
        let start = Instant::now();
        anim.flip(start);
        anim.flip(start + Duration::from_millis(100));
        assert_eq!(anim.target(), 360.0);
        let settled = start + Duration::from_secs(2);
        assert_eq!(anim.value(settled), 360.0);
        assert_eq!(anim.display_degrees(settled), 0.0);
    }
}
