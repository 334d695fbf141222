//! CLI module graph and command dispatch.

pub mod assets;
pub mod command;
pub mod config;
pub mod diagnostic;
pub mod games;
pub mod hash;
#[cfg(feature = "chain")]
pub mod market;
pub mod output;
pub mod paths;
#[cfg(feature = "chain")]
pub mod resolve;
pub mod template;
#[cfg(feature = "chain")]
pub mod trade;
#[cfg(feature = "chain")]
pub mod wallet;

use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Confirm};

use self::command::{Cli, ColorChoice, Commands, ConfigCommand};
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::bootstrap::AppContext;
use crate::infrastructure::config::settings::Config;

/// Apply `--color`.
pub fn apply_color(choice: &ColorChoice) {
    match choice {
        ColorChoice::Auto => owo_colors::unset_override(),
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
    }
}

/// Load the config file (defaults when absent). Parse failures are
/// rendered as a diagnostic against the file contents.
pub fn load_config(path: &Path) -> Result<Config> {
    match Config::load_or_default(path) {
        Err(Error::Config(ConfigError::Parse(err))) => {
            if let Ok(src) = std::fs::read_to_string(path) {
                if let Some(diagnostic) = diagnostic::ConfigError::from_toml(&err, &src) {
                    eprintln!("{:?}", miette::Report::new(diagnostic));
                }
            }
            Err(ConfigError::Parse(err).into())
        }
        other => other,
    }
}

/// Ask before sending a transaction. `--yes` and JSON mode skip the prompt.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes || output::is_json() {
        return Ok(true);
    }
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

fn context(path: &Path, verbose: u8) -> Result<AppContext> {
    let config = load_config(path)?;
    config.logging.clone().with_verbosity(verbose).init();
    Ok(AppContext::new(config))
}

/// Run the parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    let Cli {
        config: path,
        verbose,
        command,
        ..
    } = cli;

    match command {
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&path, args.force),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&path),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&path),
        Commands::Games(cmd) => games::execute(&context(&path, verbose)?, cmd).await,
        Commands::Assets(cmd) => assets::execute(&context(&path, verbose)?, cmd).await,
        Commands::Template(cmd) => template::execute(&context(&path, verbose)?, cmd).await,
        Commands::Hash(args) => hash::execute(&context(&path, verbose)?, &args),
        #[cfg(feature = "chain")]
        Commands::Market(cmd) => market::execute(&context(&path, verbose)?, cmd).await,
        #[cfg(feature = "chain")]
        Commands::Trade(cmd) => trade::execute(&context(&path, verbose)?, cmd).await,
        #[cfg(feature = "chain")]
        Commands::Resolve(cmd) => resolve::execute(&context(&path, verbose)?, cmd).await,
        #[cfg(feature = "chain")]
        Commands::Wallet(cmd) => wallet::execute(&context(&path, verbose)?, cmd).await,
        #[cfg(not(feature = "chain"))]
        Commands::Market(_) | Commands::Trade(_) | Commands::Resolve(_) | Commands::Wallet(_) => {
            Err(ConfigError::InvalidValue {
                field: "features",
                reason: "horizon was built without the `chain` feature".to_string(),
            }
            .into())
        }
    }
}
