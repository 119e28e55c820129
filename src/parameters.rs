use crate::error::*;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Order of the tokens in a parameter file.
pub const TOKEN_NAMES: [&str; 8] = [
    "c",
    "tau",
    "x1",
    "x2",
    "runtime",
    "dx",
    "outtime",
    "outfilename",
];

/// Physical inputs, exactly as read from a parameter file.
#[derive(Debug, Clone, PartialEq)]
pub struct InputParameters {
    /// Wave speed.
    pub c: f64,

    /// Damping time.
    pub tau: f64,

    /// Left most x value.
    pub x1: f64,

    /// Right most x value.
    pub x2: f64,

    /// How long the simulation should run.
    pub runtime: f64,

    /// Spatial grid size.
    pub dx: f64,

    /// How often a snapshot of the wave is written out.
    pub outtime: f64,

    /// File receiving the output data.
    pub outfilename: PathBuf,
}

/// Inputs together with the discretization derived from them.
/// Frozen for the lifetime of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub input: InputParameters,

    /// Number of x points.
    pub ngrid: usize,

    /// Time step size.
    pub dt: f64,

    /// Number of steps of size `dt` to reach runtime.
    pub nsteps: usize,

    /// Number of steps between snapshots.
    pub nper: usize,
}

impl InputParameters {
    /// Parse the eight whitespace separated tokens
    /// `c tau x1 x2 runtime dx outtime outfilename`.
    /// Anything after the last token is ignored.
    pub fn parse_tokens<'a, I: Iterator<Item = &'a str>>(
        mut tokens: I,
    ) -> std::result::Result<Self, ParameterError> {
        let mut numbers = [0.0; 7];
        for (value, name) in numbers.iter_mut().zip(TOKEN_NAMES) {
            let token = tokens.next().ok_or(ParameterError::MissingToken { name })?;
            // `inf` and `nan` parse as f64 but are not usable input
            *value = token
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParameterError::InvalidNumber {
                    name,
                    token: token.to_string(),
                })?;
        }
        let outfilename = tokens.next().ok_or(ParameterError::MissingToken {
            name: TOKEN_NAMES[7],
        })?;

        let [c, tau, x1, x2, runtime, dx, outtime] = numbers;
        Ok(InputParameters {
            c,
            tau,
            x1,
            x2,
            runtime,
            dx,
            outtime,
            outfilename: PathBuf::from(outfilename),
        })
    }

    /// Check input sanity, reporting the first violated constraint.
    /// Comparisons are written so that NaN fails them.
    pub fn validate(&self) -> std::result::Result<(), ParameterError> {
        if !(self.c > 0.0) {
            Err(ParameterError::NonPositiveWaveSpeed)
        } else if !(self.tau > 0.0) {
            Err(ParameterError::NonPositiveDampingTime)
        } else if !(self.x1 < self.x2) {
            Err(ParameterError::EmptyDomain)
        } else if !(self.dx > 0.0) {
            Err(ParameterError::NonPositiveSpatialStep)
        } else if !(self.dx <= self.x2 - self.x1) {
            Err(ParameterError::SpatialStepTooLarge)
        } else if !(self.runtime >= 0.0) {
            Err(ParameterError::NegativeRuntime)
        } else if !(self.outtime >= 0.0) {
            Err(ParameterError::NegativeOutputInterval)
        } else if self.outfilename.as_os_str().is_empty() {
            Err(ParameterError::MissingOutputFile)
        } else {
            Ok(())
        }
    }

    /// Compute the discretization.
    ///
    /// The counts are truncated toward zero, never rounded. A ratio such as
    /// `runtime / dt` that lands at `99.99999999` in floating point gives 99
    /// steps, which shifts the snapshot timing. That is kept as is.
    pub fn derive(self) -> Parameters {
        let ngrid = ((self.x2 - self.x1) / self.dx) as usize;
        let dt = 0.5 * self.dx / self.c;
        let nsteps = (self.runtime / dt) as usize;
        let nper = (self.outtime / dt) as usize;
        Parameters {
            input: self,
            ngrid,
            dt,
            nsteps,
            nper,
        }
    }
}

impl FromStr for InputParameters {
    type Err = ParameterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        InputParameters::parse_tokens(s.split_whitespace())
    }
}

impl TryFrom<InputParameters> for Parameters {
    type Error = ParameterError;

    /// Validate then derive, rejecting grids without an interior point and
    /// counts too large for `usize`.
    fn try_from(input: InputParameters) -> std::result::Result<Self, Self::Error> {
        input.validate()?;
        let params = input.derive();
        let ratios = [
            ("ngrid", (params.input.x2 - params.input.x1) / params.input.dx),
            ("nsteps", params.input.runtime / params.dt),
            ("nper", params.input.outtime / params.dt),
        ];
        for (name, ratio) in ratios {
            // Also catches NaN and infinity, which `as usize` would clamp
            if !(ratio < usize::MAX as f64) {
                return Err(ParameterError::CountOverflow { name });
            }
        }
        if params.ngrid < 3 {
            return Err(ParameterError::GridTooCoarse {
                ngrid: params.ngrid,
            });
        }
        Ok(params)
    }
}

impl Parameters {
    /// Read, validate and derive parameters from a file on disk.
    /// Nothing is written anywhere until this has succeeded.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Wave1dError::ParameterFileNotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| {
            Wave1dError::ParameterFileRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        contents
            .parse::<InputParameters>()
            .and_then(Parameters::try_from)
            .map_err(|source| Wave1dError::Parameter {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Simulated time after `step` steps.
    #[inline]
    pub fn time_at(&self, step: usize) -> f64 {
        step as f64 * self.dt
    }

    /// Whether `runtime / dt` is within `1e-9` below an integer, in which
    /// case truncation drops what was probably meant to be the last step.
    pub fn nsteps_near_truncation_edge(&self) -> bool {
        let ratio = self.input.runtime / self.dt;
        let next = ratio.floor() + 1.0;
        next - ratio < 1e-9
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    fn reference_input() -> InputParameters {
        "1.0 1000.0 0.0 10.0 5.0 0.1 1.0 out.txt".parse().unwrap()
    }

    #[test]
    fn parse_tokens_test() {
        let input: InputParameters =
            "2.5\n20\n-1 1\n\n 4.0 0.01 0.5   results.dat\n".parse().unwrap();
        assert_eq!(input.c, 2.5);
        assert_eq!(input.tau, 20.0);
        assert_eq!(input.x1, -1.0);
        assert_eq!(input.x2, 1.0);
        assert_eq!(input.runtime, 4.0);
        assert_eq!(input.dx, 0.01);
        assert_eq!(input.outtime, 0.5);
        assert_eq!(input.outfilename, PathBuf::from("results.dat"));
    }

    #[test]
    fn trailing_tokens_ignored_test() {
        let input: InputParameters =
            "1 1 0 1 1 0.1 0.1 out.txt extra stuff".parse().unwrap();
        assert_eq!(input.outfilename, PathBuf::from("out.txt"));
    }

    #[test]
    fn missing_token_test() {
        let e = "1 1 0 1 1 0.1".parse::<InputParameters>().unwrap_err();
        assert_eq!(e, ParameterError::MissingToken { name: "outtime" });
        assert!(e.is_malformed());

        let e = "1 1 0 1 1 0.1 0.1".parse::<InputParameters>().unwrap_err();
        assert_eq!(
            e,
            ParameterError::MissingToken {
                name: "outfilename"
            }
        );

        let e = "".parse::<InputParameters>().unwrap_err();
        assert_eq!(e, ParameterError::MissingToken { name: "c" });
    }

    #[test]
    fn invalid_number_test() {
        let e = "1 fast 0 1 1 0.1 0.1 out.txt"
            .parse::<InputParameters>()
            .unwrap_err();
        assert_eq!(
            e,
            ParameterError::InvalidNumber {
                name: "tau",
                token: "fast".to_string()
            }
        );
        assert!(e.is_malformed());
    }

    #[test]
    fn validate_test() {
        assert_eq!(reference_input().validate(), Ok(()));

        let cases: [(fn(&mut InputParameters), ParameterError); 10] = [
            (|p| p.c = 0.0, ParameterError::NonPositiveWaveSpeed),
            (|p| p.c = f64::NAN, ParameterError::NonPositiveWaveSpeed),
            (|p| p.tau = -1.0, ParameterError::NonPositiveDampingTime),
            (|p| p.x1 = 10.0, ParameterError::EmptyDomain),
            (|p| p.dx = 0.0, ParameterError::NonPositiveSpatialStep),
            (|p| p.dx = -0.1, ParameterError::NonPositiveSpatialStep),
            (|p| p.dx = 10.5, ParameterError::SpatialStepTooLarge),
            (|p| p.runtime = -1.0, ParameterError::NegativeRuntime),
            (|p| p.outtime = -0.5, ParameterError::NegativeOutputInterval),
            (
                |p| p.outfilename = PathBuf::new(),
                ParameterError::MissingOutputFile,
            ),
        ];
        for (modify, expected) in cases {
            let mut p = reference_input();
            modify(&mut p);
            assert_eq!(p.validate(), Err(expected.clone()));
            assert!(!expected.is_malformed());
        }
    }

    #[test]
    fn validate_reports_first_violation_test() {
        let mut p = reference_input();
        p.c = -1.0;
        p.tau = -1.0;
        p.runtime = -1.0;
        assert_eq!(p.validate(), Err(ParameterError::NonPositiveWaveSpeed));
    }

    #[test]
    fn derive_test() {
        let p = reference_input().derive();
        assert_eq!(p.ngrid, 100);
        assert_approx_eq!(f64, p.dt, 0.05);
        assert_eq!(p.nsteps, 100);
        assert_eq!(p.nper, 20);
    }

    #[test]
    fn derive_truncates_test() {
        let mut p = reference_input();
        p.dx = 0.3;
        p.runtime = 1.0;
        p.outtime = 0.4;
        let d = p.derive();
        // 10 / 0.3 = 33.3, dt = 0.15, 1 / 0.15 = 6.67, 0.4 / 0.15 = 2.67
        assert_eq!(d.ngrid, 33);
        assert_approx_eq!(f64, d.dt, 0.15);
        assert_eq!(d.nsteps, 6);
        assert_eq!(d.nper, 2);
    }

    #[test]
    fn derive_is_deterministic_test() {
        let a = reference_input().derive();
        let b = reference_input().derive();
        assert_eq!(a, b);
        assert_eq!(a.dt.to_bits(), b.dt.to_bits());
    }

    #[test]
    fn courant_ratio_test() {
        for (c, dx) in [(1.0, 0.1), (3.0, 0.02), (0.25, 1.0)] {
            let mut p = reference_input();
            p.c = c;
            p.dx = dx;
            let d = p.derive();
            assert_approx_eq!(f64, c * d.dt / dx, 0.5);
        }
    }

    #[test]
    fn grid_too_coarse_test() {
        let mut p = reference_input();
        p.dx = 4.0;
        assert_eq!(
            Parameters::try_from(p),
            Err(ParameterError::GridTooCoarse { ngrid: 2 })
        );

        let mut p = reference_input();
        p.dx = 10.0 / 3.0;
        assert_eq!(Parameters::try_from(p).unwrap().ngrid, 3);
    }

    #[test]
    fn non_finite_token_test() {
        for (text, name, token) in [
            ("1 1 0 inf 1 0.1 1 out.txt", "x2", "inf"),
            ("inf 1 0 10 1 0.1 1 out.txt", "c", "inf"),
            ("1 -infinity 0 10 1 0.1 1 out.txt", "tau", "-infinity"),
            ("1 1 0 10 NaN 0.1 1 out.txt", "runtime", "NaN"),
        ] {
            let e = text.parse::<InputParameters>().unwrap_err();
            assert_eq!(
                e,
                ParameterError::InvalidNumber {
                    name,
                    token: token.to_string()
                }
            );
            assert!(e.is_malformed());
        }
    }

    #[test]
    fn count_overflow_test() {
        let input: InputParameters =
            "1 1 -1e308 1e308 1 1 1 out.txt".parse().unwrap();
        assert_eq!(input.validate(), Ok(()));
        assert_eq!(
            Parameters::try_from(input),
            Err(ParameterError::CountOverflow { name: "ngrid" })
        );

        let input: InputParameters = "1e300 1 0 10 1 1e-300 1 out.txt".parse().unwrap();
        assert_eq!(
            Parameters::try_from(input),
            Err(ParameterError::CountOverflow { name: "ngrid" })
        );

        let input: InputParameters = "1e300 1 0 10 1 0.1 0 out.txt".parse().unwrap();
        // dt = 5e-302, runtime / dt far beyond usize
        assert_eq!(
            Parameters::try_from(input),
            Err(ParameterError::CountOverflow { name: "nsteps" })
        );
        assert!(!ParameterError::CountOverflow { name: "nper" }.is_malformed());
    }

    #[test]
    fn try_from_validates_first_test() {
        let mut p = reference_input();
        p.tau = 0.0;
        assert_eq!(
            Parameters::try_from(p),
            Err(ParameterError::NonPositiveDampingTime)
        );
    }

    #[test]
    fn truncation_edge_test() {
        let p = reference_input().derive();
        assert!(!p.nsteps_near_truncation_edge());

        let mut q = reference_input();
        q.runtime = 5.0 - 1e-12;
        let q = q.derive();
        assert_eq!(q.nsteps, 99);
        assert!(q.nsteps_near_truncation_edge());
    }
}
