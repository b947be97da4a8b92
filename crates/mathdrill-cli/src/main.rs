//! The mathdrill command-line interface.

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod console;
mod drill;

#[derive(Parser)]
#[command(name = "mathdrill", version, about = "Arithmetic drill tests in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a test
    Run(commands::run::RunArgs),

    /// Show the unique question pool for a set of operators
    Pool {
        /// Operator characters to include (e.g. "+-"); all four when omitted
        #[arg(short, long)]
        operators: Option<String>,

        /// Pin the first operand
        #[arg(short, long, allow_negative_numbers = true)]
        first: Option<i32>,

        /// Pin the second operand
        #[arg(short, long, allow_negative_numbers = true)]
        second: Option<i32>,

        /// Print every question in the pool
        #[arg(long)]
        list: bool,
    },

    /// Create a starter mathdrill.toml in the current directory
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mathdrill=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Pool {
            operators,
            first,
            second,
            list,
        } => commands::pool::execute(operators, first, second, list),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_flags_parse() {
        let cli = Cli::try_parse_from([
            "mathdrill", "run", "-o", "+-", "-q", "4", "-f", "-2", "--unique", "--seed", "7",
        ])
        .unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.operator.as_deref(), Some("+-"));
        assert_eq!(args.questions, Some(4));
        assert_eq!(args.first, Some(-2));
        assert!(args.unique);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn config_path_is_a_path() {
        let cli = Cli::try_parse_from(["mathdrill", "run", "--config", "drill.toml"]).unwrap();
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, Some(PathBuf::from("drill.toml")));
    }
}
