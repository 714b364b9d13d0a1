//! Time-warp curves for the selection animations.

use std::f64::consts::PI;

/// Overshoot-and-settle bounce. `0` at `x = 0`, `1` at `x = 1`, briefly
/// exceeds `1.0` in between.
pub fn ease_out_elastic(x: f64) -> f64 {
    const C4: f64 = (2.0 * PI) / 3.0;

    if x <= 0.0 {
        0.0
    } else if x >= 1.0 {
        1.0
    } else {
        2.0_f64.powf(-10.0 * x) * ((10.0 * x - 0.75) * C4).sin() + 1.0
    }
}

/// Monotonic decelerating curve, no overshoot.
pub fn ease_out_quint(x: f64) -> f64 {
    1.0 - (1.0 - x).powi(5)
}
