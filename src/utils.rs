//! Utility functions - interpolation, easing, sampling.
//!
//! **Why**: the sub-canvas transition system and the session collaborators
//! share these small numeric helpers.
//!
//! **Used by**: session (random sampling), external tab/transition hosts.

use rand::Rng;

/// Move `value` toward `target` by `amount` in [0,1].
pub fn lerp(value: f32, target: f32, amount: f32) -> f32 {
    value + (target - value) * amount
}

/// Uniform random index in `[0, n)`. `n` must be non-zero.
pub fn random_index(n: usize) -> usize {
    rand::thread_rng().gen_range(0..n)
}

/// Animation easing curves, all mapping [0,1] -> [0,1].
pub mod ease {
    pub fn linear(x: f32) -> f32 {
        x
    }

    pub fn in_quad(x: f32) -> f32 {
        x * x
    }

    pub fn out_quad(x: f32) -> f32 {
        1.0 - (1.0 - x) * (1.0 - x)
    }

    pub fn in_cubic(x: f32) -> f32 {
        x * x * x
    }

    pub fn out_cubic(x: f32) -> f32 {
        1.0 - (1.0 - x).powi(3)
    }

    pub fn in_expo(x: f32) -> f32 {
        if x == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * x - 10.0) }
    }

    pub fn out_expo(x: f32) -> f32 {
        if x == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * x) }
    }
}
