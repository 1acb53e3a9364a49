use clap::Subcommand;
use pomochill_core::config::Config;
use pomochill_core::error::Result;

#[derive(Subcommand)]
pub enum StreamsAction {
    /// List the configured ambient streams
    List {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StreamsAction) -> Result<()> {
    match action {
        StreamsAction::List { json } => {
            let cfg = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg.ambient.streams)?);
            } else {
                for stream in &cfg.ambient.streams {
                    println!("{:<16} {}", stream.name, stream.id);
                }
            }
        }
    }
    Ok(())
}
