mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{compile, init, preview, CompileArgs, InitArgs, PreviewArgs};

/// Slidebar CLI - compile and preview announcement bar campaigns
#[derive(Parser, Debug)]
#[command(name = "slidebar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new slidebar project
    Init(InitArgs),

    /// Compile campaign files to JSON layouts or static HTML
    Compile(CompileArgs),

    /// Mount a campaign on a simulated page
    Preview(PreviewArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Compile(args) => compile(args, &cwd),
            Command::Preview(args) => preview(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
