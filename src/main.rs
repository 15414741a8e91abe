use std::process::ExitCode;

use revlane::cli::{self, Cli};
use revlane::ui::output;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_env("REVLANE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if debug {
            "revlane=debug,warn"
        } else {
            "revlane=warn,error"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let args = Cli::parse_args();
    init_tracing(args.debug);

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
