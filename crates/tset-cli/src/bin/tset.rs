#![allow(clippy::print_stderr)]

use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use tset_cli::args::{CliArgs, Command};
use tset_cli::driver;
use tset_cli::reporter::Reporter;
use tset_cli::tracing_config::init_tracing;

fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    match args.command {
        Command::Check(check) => {
            let report = driver::check(&check)?;
            print!("{}", report.render(check.format)?);

            if !report.diagnostics.is_empty() {
                let color = !check.no_color && std::io::stderr().is_terminal();
                let reporter = Reporter::new(color, check.unit.display().to_string());
                eprintln!("{}", reporter.render(&report.diagnostics));
            }
            if report.has_errors() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
