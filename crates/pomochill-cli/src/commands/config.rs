use clap::Subcommand;
use pomochill_core::config::{Config, KEYS};
use pomochill_core::error::Result;
use pomochill_core::ConfigError;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a configuration value
    Get { key: String },
    /// Set a configuration value
    Set { key: String, value: String },
    /// List all configuration keys and values
    List,
    /// Print the configuration file path
    Path,
}

pub fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let cfg = Config::load()?;
            match cfg.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(ConfigError::UnknownKey(key).into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut cfg = Config::load()?;
            cfg.set(&key, &value)?;
            cfg.save()?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let cfg = Config::load()?;
            for key in KEYS {
                println!("{key} = {}", cfg.get(key).unwrap_or_default());
            }
        }
        ConfigAction::Path => {
            println!("{}", Config::path()?.display());
        }
    }
    Ok(())
}
