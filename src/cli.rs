use crate::build_info;
use crate::error::*;
use crate::output::*;
use crate::parameters::*;
use crate::solver::*;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Exit status for a bad command line.
pub const USAGE_EXIT_CODE: u8 = 1;

/// Integrate the 1D damped wave equation with fixed ends.
///
/// The parameter file holds `c tau x1 x2 runtime dx outtime outfilename`
/// separated by whitespace.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Parameter file.
    #[arg(required_unless_present = "build_info")]
    pub parameter_file: Option<PathBuf>,

    /// Log debug output, including every snapshot.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Print git information for this build and exit.
    #[arg(long)]
    pub build_info: bool,
}

impl Args {
    /// Parse the command line. Help and version requests exit 0, anything
    /// else clap rejects exits with `USAGE_EXIT_CODE`.
    pub fn cli_parse(name: &str) -> Self {
        let args = match Args::try_parse() {
            Ok(args) => args,
            Err(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
                kind => {
                    let _ = e.print();
                    if let Some(hint) = usage_hint(kind, name) {
                        eprintln!("{hint}");
                    }
                    std::process::exit(USAGE_EXIT_CODE.into());
                }
            },
        };

        if args.build_info {
            build_info::print_report(name);
            std::process::exit(0);
        }

        args
    }

    /// Default log directive for this crate, `RUST_LOG` still wins.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "wave1d=debug"
        } else if self.quiet {
            "wave1d=warn"
        } else {
            "wave1d=info"
        }
    }

    /// Install a stderr subscriber so stdout only carries the result line.
    pub fn init_logging(&self) {
        let filter = EnvFilter::builder()
            .with_default_directive(
                self.log_directive()
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            )
            .from_env_lossy();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Extra line printed after a clap error. Only a missing parameter file
/// gets one, clap's own message already covers the rest.
pub fn usage_hint(kind: ErrorKind, name: &str) -> Option<String> {
    match kind {
        ErrorKind::MissingRequiredArgument => {
            Some(format!("Error: {name} needs one parameter file argument."))
        }
        _ => None,
    }
}

/// Load the parameters, then write the whole run to the output file.
/// The output file is only created once the parameters are valid.
pub fn run_from_file(parameter_file: &std::path::Path) -> Result<(Parameters, RunSummary)> {
    let params = Parameters::load(parameter_file)?;
    info!(
        file = %parameter_file.display(),
        output = %params.input.outfilename.display(),
        "parameters loaded"
    );

    let mut writer = TextWriter::create(&params.input.outfilename)?;
    let mut simulation = Simulation::new(params.clone());
    let summary = simulation.run(&mut writer)?;
    Ok((params, summary))
}
