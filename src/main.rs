use clap::Parser;
use clap::error::ErrorKind;
use cubemx2makefile::config::Settings;
use cubemx2makefile::error::EXIT_INVALID_COMMANDLINE;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

/// STM32CubeMX project to Makefile
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// SW4STM32 project folder generated by STM32CubeMX
    project_dir: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().ok();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_INVALID_COMMANDLINE),
            };
        }
    };

    match cubemx2makefile::run(&cli.project_dir, &Settings::from_env()) {
        Ok(path) => {
            println!("Makefile created: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
