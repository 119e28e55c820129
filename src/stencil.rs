use crate::boundary::FIXED_END_VALUE;
use crate::parameters::*;

/// Three point, three level stencil for the damped wave equation
/// `ρ_tt = c² ρ_xx − ρ_t / tau`.
///
/// Central differences in space and time, solved explicitly for the value
/// at the next time level.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DampedWaveStencil {
    /// `(c / dx)²`
    k: f64,
    dt: f64,
    tau: f64,
}

impl DampedWaveStencil {
    pub fn new(c: f64, dx: f64, dt: f64, tau: f64) -> Self {
        DampedWaveStencil {
            k: (c / dx).powi(2),
            dt,
            tau,
        }
    }

    pub fn from_parameters(params: &Parameters) -> Self {
        DampedWaveStencil::new(
            params.input.c,
            params.input.dx,
            params.dt,
            params.input.tau,
        )
    }

    /// Next value of one point.
    /// `args` is `[left, middle, right]` at the current level,
    /// `prev` the middle point one level earlier.
    #[inline]
    pub fn apply(&self, args: &[f64; 3], prev: f64) -> f64 {
        let [left, middle, right] = *args;
        let laplacian = self.k * (right + left - 2.0 * middle);
        let friction = (middle - prev) / self.tau;
        2.0 * middle - prev + self.dt * (laplacian * self.dt - friction)
    }

    /// Advance the field one time step, writing every point of `next`.
    ///
    /// Only reads `prev` and `current`; boundary values of `current` must
    /// already be enforced by the caller. The two end points of `next`
    /// are set to `FIXED_END_VALUE`. Fields shorter than three points have
    /// no interior and only get their end points written.
    pub fn step(&self, prev: &[f64], current: &[f64], next: &mut [f64]) {
        let n = current.len();
        assert_eq!(prev.len(), n);
        assert_eq!(next.len(), n);
        profiling::scope!("stencil::step");

        for i in 1..n.saturating_sub(1) {
            let args = [current[i - 1], current[i], current[i + 1]];
            next[i] = self.apply(&args, prev[i]);
        }
        if let Some(first) = next.first_mut() {
            *first = FIXED_END_VALUE;
        }
        if let Some(last) = next.last_mut() {
            *last = FIXED_END_VALUE;
        }
    }
}
