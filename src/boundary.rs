/// Value both ends of the domain are held at.
pub const FIXED_END_VALUE: f64 = 0.0;

/// Boundary condition applied to the current field before each step.
pub trait Boundary {
    /// Overwrite the boundary points of `field` in place.
    fn enforce(&self, field: &mut [f64]);
}

/// Field pinned to `FIXED_END_VALUE` at both ends of the domain.
/// `DampedWaveStencil::step` writes the same value into the ends of the
/// next level.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DirichletBoundary;

impl DirichletBoundary {
    pub fn zero() -> Self {
        DirichletBoundary
    }
}

impl Boundary for DirichletBoundary {
    fn enforce(&self, field: &mut [f64]) {
        if let Some(first) = field.first_mut() {
            *first = FIXED_END_VALUE;
        }
        if let Some(last) = field.last_mut() {
            *last = FIXED_END_VALUE;
        }
    }
}
