//! Explicit finite difference integration of the 1D damped wave equation
//! `ρ_tt = c² ρ_xx − ρ_t / tau` with the field pinned to zero at both ends.

pub mod boundary;
pub mod build_info;
pub mod cli;
pub mod error;
pub mod fmt;
pub mod grid;
pub mod init;
pub mod output;
pub mod parameters;
pub mod ring;
pub mod solver;
pub mod stencil;

pub use error::{ParameterError, Result, Wave1dError};
pub use parameters::{InputParameters, Parameters};
pub use solver::{RunSummary, Simulation};
