mod args;
mod report;

use anyhow::{Context, Result};
use argkit::ParseOutcome;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = match err.downcast_ref::<argkit::Error>() {
                Some(usage) => {
                    eprintln!("Try '{} --help' for usage information.", args::PROGRAM);
                    usage.exit_code()
                }
                None => 1,
            };
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run() -> Result<()> {
    let mut cli = args::build().context("failed to declare arguments")?;
    if cli.parse_env()? == ParseOutcome::Help {
        return Ok(());
    }

    if cli.get_bool("schema") {
        let json = cli
            .schema()
            .to_json_pretty()
            .context("failed to encode argument schema")?;
        println!("{json}");
        return Ok(());
    }

    tracing::info!(input = %cli.get_str("input")?, "configuration parsed");
    if !cli.get_bool("quiet") {
        print!("{}", report::summary(&cli)?);
    }
    if cli.get_bool("verbose") {
        println!("\nArguments:");
        print!("{}", report::details(&cli));
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
