/// Evenly spaced coordinates on `[x1, x2]`, both ends included.
/// Built once per run and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    x1: f64,
    x2: f64,
    coords: Vec<f64>,
}

impl Grid {
    /// Point `i` is `x1 + i * (x2 - x1) / (ngrid - 1)`.
    /// The last point is pinned to `x2`, since `x1 + (x2 - x1)` can be off
    /// by one ulp. Requires `ngrid >= 2`.
    pub fn new(x1: f64, x2: f64, ngrid: usize) -> Self {
        debug_assert!(ngrid >= 2, "grid needs both end points, got {ngrid}");
        let width = x2 - x1;
        let last = ngrid.saturating_sub(1).max(1) as f64;
        let mut coords: Vec<f64> = (0..ngrid)
            .map(|i| x1 + (i as f64 * width) / last)
            .collect();
        if ngrid >= 2 {
            coords[ngrid - 1] = x2;
        }
        Grid { x1, x2, coords }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    /// Width of the domain.
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Distance between neighbouring points. Slightly larger than the
    /// requested `dx` when `dx` does not divide the domain.
    pub fn spacing(&self) -> f64 {
        self.width() / (self.len().saturating_sub(1).max(1)) as f64
    }
}
