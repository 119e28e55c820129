use crate::boundary::*;
use crate::grid::*;
use crate::init::*;
use crate::output::*;
use crate::parameters::*;
use crate::ring::*;
use crate::stencil::*;
use tracing::{debug, info, warn};

/// What a finished run did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub snapshots: usize,
}

/// Owns everything a run needs: the frozen parameters, the grid, the
/// stencil and the three rotating field buffers.
pub struct Simulation {
    params: Parameters,
    grid: Grid,
    stencil: DampedWaveStencil,
    boundary: DirichletBoundary,
    ring: FieldRing,
    step: usize,
}

impl Simulation {
    /// Build the grid and the at-rest triangle pulse.
    /// Expects `params.ngrid >= 2`, which `Parameters::try_from` ensures.
    pub fn new(params: Parameters) -> Self {
        let grid = Grid::new(params.input.x1, params.input.x2, params.ngrid);
        let initial = triangle_pulse(&grid);
        Simulation::with_initial(params, grid, initial)
    }

    /// Start from an arbitrary profile instead of the triangle pulse.
    pub fn with_initial(params: Parameters, grid: Grid, initial: Vec<f64>) -> Self {
        assert_eq!(grid.len(), initial.len());
        let stencil = DampedWaveStencil::from_parameters(&params);
        Simulation {
            params,
            grid,
            stencil,
            boundary: DirichletBoundary::zero(),
            ring: FieldRing::new(initial),
            step: 0,
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Field at the current time level.
    pub fn field(&self) -> &[f64] {
        self.ring.current()
    }

    /// Field one level back.
    pub fn prev_field(&self) -> &[f64] {
        self.ring.prev()
    }

    /// Steps taken so far.
    pub fn steps_taken(&self) -> usize {
        self.step
    }

    /// Simulated time of the current level.
    pub fn time(&self) -> f64 {
        self.params.time_at(self.step)
    }

    /// Advance one time step.
    ///
    /// First the boundary is clamped on the current buffer (this does
    /// modify it), then the stencil fills the next buffer from the
    /// previous and current ones, then the roles rotate.
    pub fn step_once(&mut self) {
        self.boundary.enforce(self.ring.current_mut());
        let (prev, current, next) = self.ring.split_mut();
        self.stencil.step(prev, current, next);
        self.ring.rotate();
        self.step += 1;
    }

    /// Advance `n` steps without emitting anything.
    pub fn advance(&mut self, n: usize) {
        for _ in 0..n {
            self.step_once();
        }
    }

    /// Whether a snapshot is due after `step` steps. Never true when
    /// `nper` is zero.
    pub fn snapshot_due(&self, step: usize) -> bool {
        self.params.nper > 0 && step % self.params.nper == 0
    }

    /// Run all `nsteps` steps, emitting the initial field and then one
    /// snapshot every `nper` steps.
    pub fn run<S: SnapshotSink>(&mut self, sink: &mut S) -> std::io::Result<RunSummary> {
        let nsteps = self.params.nsteps;
        info!(
            ngrid = self.params.ngrid,
            spacing = self.grid.spacing(),
            dt = self.params.dt,
            nsteps,
            nper = self.params.nper,
            "starting run"
        );
        if self.params.nper == 0 {
            warn!(
                outtime = self.params.input.outtime,
                dt = self.params.dt,
                "outtime shorter than one time step, only the initial field is written"
            );
        }
        if nsteps == 0 {
            warn!("runtime shorter than one time step, no steps taken");
        }
        if self.params.nsteps_near_truncation_edge() {
            warn!(
                runtime = self.params.input.runtime,
                dt = self.params.dt,
                nsteps,
                "runtime / dt truncated just below an integer"
            );
        }

        sink.begin(&self.params)?;
        let mut snapshots = 0;
        self.emit(sink, &mut snapshots)?;

        for _ in 0..nsteps {
            self.step_once();
            if self.snapshot_due(self.step) {
                self.emit(sink, &mut snapshots)?;
            }
        }
        sink.finish()?;

        let summary = RunSummary {
            steps: nsteps,
            snapshots,
        };
        info!(steps = summary.steps, snapshots = summary.snapshots, "run finished");
        Ok(summary)
    }

    fn emit<S: SnapshotSink>(&self, sink: &mut S, count: &mut usize) -> std::io::Result<()> {
        let field = self.ring.current();
        debug!(
            step = self.step,
            t = self.time(),
            peak = peak_amplitude(field),
            "snapshot"
        );
        sink.snapshot(self.time(), &self.grid, field)?;
        *count += 1;
        Ok(())
    }
}

/// Number of snapshots a full run writes.
pub fn expected_snapshots(params: &Parameters) -> usize {
    if params.nper == 0 {
        1
    } else {
        1 + params.nsteps / params.nper
    }
}

/// Largest absolute value in the field.
pub fn peak_amplitude(field: &[f64]) -> f64 {
    field.iter().fold(0.0, |m: f64, v| m.max(v.abs()))
}

/// Sum of squared amplitudes, a rough energy measure.
pub fn sum_of_squares(field: &[f64]) -> f64 {
    field.iter().map(|v| v * v).sum()
}
