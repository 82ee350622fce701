//! Command-line entry points.
//!
//! `main` parses the arguments first. Anything other than
//! [`CliCommand::RunTui`] is handled here without starting the TUI:
//!
//! ```ignore
//! use roundtable::cli::{parse_args, run_cli_command};
//!
//! let args = parse_args(std::env::args());
//! let config = args.overrides.apply(ClientConfig::from_env());
//! if let Some(result) = run_cli_command(&args.command, &config).await {
//!     return result;
//! }
//! // continue to the TUI
//! ```

pub mod args;
pub mod output;

pub use args::{parse_args, CliArgs, CliCommand, CliOverrides, USAGE};
pub use output::PrintObserver;

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::client::ChatClient;
use crate::config::ClientConfig;
use crate::controller::ChatController;
use crate::models::ChatMode;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a non-TUI command.
///
/// Returns `None` for [`CliCommand::RunTui`], otherwise the command's result.
pub async fn run_cli_command(command: &CliCommand, config: &ClientConfig) -> Option<Result<()>> {
    match command {
        CliCommand::RunTui => None,
        CliCommand::Version => {
            println!("roundtable {}", VERSION);
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Some(Ok(()))
        }
        CliCommand::Invalid(reason) => {
            eprintln!("{}", USAGE);
            Some(Err(eyre!("{}", reason)))
        }
        CliCommand::Ask { multi, prompt } => {
            let mode = if *multi {
                ChatMode::MultiAgent
            } else {
                ChatMode::Normal
            };
            Some(handle_ask(config, prompt, mode).await)
        }
        CliCommand::Clear => Some(handle_clear(config).await),
    }
}

async fn handle_ask(config: &ClientConfig, prompt: &str, mode: ChatMode) -> Result<()> {
    let client = ChatClient::from_config(config);
    let mut controller = ChatController::new(client, config.session_id.as_str());

    println!("{}", output::prompt_echo(prompt, mode == ChatMode::MultiAgent));
    let mut observer = PrintObserver::new(std::io::stdout());
    let summary = controller.send(prompt, mode, &mut observer).await?;

    match summary.error {
        Some(error) => Err(eyre!("{}", error)),
        None => Ok(()),
    }
}

async fn handle_clear(config: &ClientConfig) -> Result<()> {
    let client = ChatClient::from_config(config);
    client.clear_history(&config.session_id).await?;
    println!("Cleared history for session {}", config.session_id);
    Ok(())
}
