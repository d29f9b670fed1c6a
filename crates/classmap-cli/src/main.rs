//! Classmap CLI - Generate class diagrams from Java and C# sources

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized inside run() from the CLI flags
    let mut app = cli::ClassmapApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
