use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "pomochill", version, about = "Pomochill focus timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive focus session
    Run(commands::run::RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Preview upcoming phases of the work/break cycle
    Cycle(commands::cycle::CycleArgs),
    /// Ambient stream catalog
    Streams {
        #[command(subcommand)]
        action: commands::streams::StreamsAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Config { action } => commands::config::run(action),
        Commands::Cycle(args) => commands::cycle::run(args),
        Commands::Streams { action } => commands::streams::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pomochill", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
