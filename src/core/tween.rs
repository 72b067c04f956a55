//! Easing curves shared by time ramps and visual fades.

use serde::Deserialize;

/// Shape of a 0..1 interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    SmoothStep,
}

impl Easing {
    /// Map normalized progress `t` through the curve. Input is clamped to [0, 1].
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Interpolate between `from` and `to` at progress `t`.
    pub fn lerp(self, from: f32, to: f32, t: f32) -> f32 {
        from + (to - from) * self.sample(t)
    }
}

/// Triangle wave in [0, 1], used for blink and pulse effects.
pub fn ping_pong(value: f32) -> f32 {
    let wrapped = value.rem_euclid(2.0);
    if wrapped > 1.0 {
        2.0 - wrapped
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::QuadInOut,
            Easing::SmoothStep,
        ] {
            assert_eq!(easing.sample(0.0), 0.0, "{easing:?} at 0");
            assert!((easing.sample(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn sample_clamps_out_of_range_progress() {
        assert_eq!(Easing::QuadOut.sample(-3.0), 0.0);
        assert!((Easing::QuadOut.sample(7.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ping_pong_folds_back() {
        assert!((ping_pong(0.25) - 0.25).abs() < 1e-6);
        assert!((ping_pong(1.5) - 0.5).abs() < 1e-6);
        assert!((ping_pong(2.25) - 0.25).abs() < 1e-6);
    }
}
