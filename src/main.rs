use std::process::ExitCode;
use wave1d::cli::*;

fn main() -> ExitCode {
    let args = Args::cli_parse("wave1d");
    args.init_logging();

    #[cfg(feature = "profile-with-puffin")]
    let _puffin_server = {
        let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        eprintln!("Run this to view profiling data:  puffin_viewer {server_addr}");
        profiling::puffin::set_scopes_on(true);
        puffin_http::Server::new(&server_addr).ok()
    };

    let Some(parameter_file) = args.parameter_file.as_deref() else {
        eprintln!("Error: wave1d needs one parameter file argument.");
        return ExitCode::from(USAGE_EXIT_CODE);
    };

    let result = run_from_file(parameter_file);

    #[cfg(feature = "profile-with-puffin")]
    profiling::finish_frame!();

    match result {
        Ok((params, _)) => {
            println!(
                "Results written to '{}'.",
                params.input.outfilename.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
