//! Initial conditions
//!
//! The wave starts at rest, so the initial profile is used for both the
//! current and the previous time level.

use crate::grid::*;

/// Triangle shaped pulse over the middle half of `[x1, x2]`.
///
/// Zero outside `[x1 + (x2 - x1)/4, x1 + 3(x2 - x1)/4]`, rising linearly to
/// a peak of `0.25` at the midpoint.
pub fn triangle_pulse(grid: &Grid) -> Vec<f64> {
    let (x1, x2, width) = (grid.x1(), grid.x2(), grid.width());
    let xstart = 0.25 * width + x1;
    let xmid = 0.5 * (x2 + x1);
    let xfinish = 0.75 * width + x1;
    grid.coords()
        .iter()
        .map(|&x| {
            if x < xstart || x > xfinish {
                0.0
            } else {
                0.25 - (x - xmid).abs() / width
            }
        })
        .collect()
}
