// Pure easing math for the reveal animations. No state, no allocation.

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    CubicInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Eased interpolation between `a` and `b`.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for e in [Easing::Linear, Easing::QuadOut, Easing::CubicInOut] {
            assert_eq!(e.apply(0.0), 0.0);
            assert_eq!(e.apply(1.0), 1.0);
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::QuadOut.apply(-1.0), 0.0);
        assert_eq!(Easing::QuadOut.apply(2.0), 1.0);
    }

    #[test]
    fn quad_out_decelerates() {
        // Second half covers less distance than the first.
        let first = Easing::QuadOut.apply(0.5);
        let second = 1.0 - first;
        assert!(first > second);
    }

    #[test]
    fn ease_interpolates_range() {
        let mid = ease(0.0, 200.0, 0.5, Easing::Linear);
        assert_eq!(mid, 100.0);
    }
}
