mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::interactive::InteractiveArgs;
use commands::quote::QuoteArgs;

/// Monthly car payment calculator
#[derive(Parser)]
#[command(
    name = "carpay",
    version,
    about = "Estimate the monthly payment on a vehicle loan",
    long_about = "Estimate the fixed monthly payment on a vehicle loan from the price, \
                  APR, term, down payment and trade-in value. Without a subcommand it \
                  prompts for loans on the console until input ends; type 'quit' at \
                  any prompt to stop.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    session: InteractiveArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a single loan and print the full breakdown
    Quote(QuoteArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        None => commands::interactive::run_interactive(cli.session),
        Some(Commands::Quote(args)) => {
            let format = args.output.clone();
            commands::quote::run_quote(args).map(|value| output::format_output(&format, &value))
        }
        Some(Commands::Version) => {
            println!("carpay {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
