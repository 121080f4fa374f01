use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use collectorctl::commands::{install, restart, start, status, stop, uninstall};
use collectorctl::paths::ControllerPaths;

#[derive(Parser)]
#[command(name = "collectorctl")]
#[command(about = "Lifecycle controller for the telemetry collector daemon", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the collector package and its yum repository
    Install,

    /// Start the collector daemon
    Start,

    /// Stop the collector daemon
    Stop,

    /// Show whether the daemon is running, with a usage snapshot
    Status,

    /// Stop then start the daemon
    Restart,

    /// Remove the collector package
    Uninstall,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    // clap's default error exit is 2; this tool's contract is usage plus
    // exit 1 for anything unrecognized, 0 for --help/--version.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let paths = ControllerPaths::system();
    let result = match cli.command {
        Commands::Install => install::run(&paths),
        Commands::Start => start::run(&paths).map(|_| ()),
        Commands::Stop => stop::run(&paths).map(|_| ()),
        Commands::Status => status::run(&paths).map(|_| ()),
        Commands::Restart => restart::run(&paths).map(|_| ()),
        Commands::Uninstall => uninstall::run().map(|_| ()),
    };

    if let Err(e) = result {
        eprintln!("{} {e:#}", "✗".red().bold());
        std::process::exit(1);
    }
}
