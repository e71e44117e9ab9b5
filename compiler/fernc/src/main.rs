//! Fern compiler CLI.

use fernc::cli::{parse_args, Mode};
use fernc::commands;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = match parse_args(&args) {
        Ok(invocation) => invocation,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    let code = match invocation.mode {
        Mode::Version => commands::version(),
        Mode::Help => commands::help(),
        Mode::Check => commands::check(&invocation),
        Mode::Build => commands::build(&invocation),
        Mode::Run => commands::run(&invocation),
    };
    std::process::exit(code);
}
