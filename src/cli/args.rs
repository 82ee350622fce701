//! Command-line argument parsing.

use std::path::PathBuf;

use crate::config::ClientConfig;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Run the TUI application (default)
    RunTui,
    /// Send one prompt and stream the reply to stdout
    Ask { multi: bool, prompt: String },
    /// Clear the server-side history for the session
    Clear,
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Arguments could not be parsed; carries the reason
    Invalid(String),
}

impl CliCommand {
    /// Whether the command talks to the backend, and so needs a valid
    /// configuration. Help, version and parse errors work with any.
    pub fn needs_backend(&self) -> bool {
        matches!(
            self,
            CliCommand::RunTui | CliCommand::Ask { .. } | CliCommand::Clear
        )
    }
}

/// Flags that override the environment configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub session_id: Option<String>,
    pub new_session: bool,
    pub log_file: Option<PathBuf>,
}

impl CliOverrides {
    /// Layer these flags over `config`.
    pub fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(session_id) = &self.session_id {
            config = config.with_session_id(session_id.as_str());
        }
        if self.new_session {
            config = config.with_fresh_session();
        }
        if let Some(path) = &self.log_file {
            config = config.with_log_file(path.clone());
        }
        config
    }
}

/// Everything parsed from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: CliCommand,
    pub overrides: CliOverrides,
}

pub const USAGE: &str = "\
Usage: roundtable [OPTIONS] [COMMAND]

Commands:
  (none)                   Start the interactive chat
  ask [--multi] <PROMPT>   Send one prompt and print the reply
  clear                    Clear the server-side history for the session

Options:
  --url <URL>              Backend base URL (env ROUNDTABLE_URL)
  --session <ID>           Session id (env ROUNDTABLE_SESSION)
  --new-session            Use a freshly generated session id
  --log-file <PATH>        Log file (env ROUNDTABLE_LOG_FILE)
  -V, --version            Print version
  -h, --help               Print this help";

fn flag_value<I>(flag: &str, args: &mut I) -> Result<String, String>
where
    I: Iterator<Item = String>,
{
    match args.next() {
        Some(value) if !value.starts_with("--") => Ok(value),
        _ => Err(format!("{} requires a value", flag)),
    }
}

/// Parse command-line arguments, including the program name.
///
/// ```
/// use roundtable::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["roundtable".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).command, CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliArgs
where
    I: Iterator<Item = String>,
{
    let mut overrides = CliOverrides::default();
    match parse_into(args.skip(1), &mut overrides) {
        Ok(command) => CliArgs { command, overrides },
        Err(reason) => CliArgs {
            command: CliCommand::Invalid(reason),
            overrides,
        },
    }
}

fn parse_into<I>(mut args: I, overrides: &mut CliOverrides) -> Result<CliCommand, String>
where
    I: Iterator<Item = String>,
{
    let mut command = CliCommand::RunTui;
    let mut multi = false;
    let mut words: Vec<String> = Vec::new();
    let mut in_ask = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--url" => overrides.base_url = Some(flag_value("--url", &mut args)?),
            "--session" => overrides.session_id = Some(flag_value("--session", &mut args)?),
            "--new-session" => overrides.new_session = true,
            "--log-file" => {
                overrides.log_file = Some(PathBuf::from(flag_value("--log-file", &mut args)?))
            }
            "--multi" if in_ask => multi = true,
            "ask" if command == CliCommand::RunTui => {
                in_ask = true;
                command = CliCommand::Ask {
                    multi: false,
                    prompt: String::new(),
                };
            }
            "clear" if command == CliCommand::RunTui => command = CliCommand::Clear,
            flag if flag.starts_with('-') => return Err(format!("unknown option '{}'", flag)),
            word if in_ask => words.push(word.to_string()),
            other => return Err(format!("unexpected argument '{}'", other)),
        }
    }

    if in_ask {
        let prompt = words.join(" ");
        if prompt.trim().is_empty() {
            return Err("ask requires a prompt".to_string());
        }
        return Ok(CliCommand::Ask { multi, prompt });
    }
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        let args: Vec<String> = std::iter::once("roundtable")
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        parse_args(args.into_iter())
    }

    #[test]
    fn test_parse_no_args() {
        let parsed = parse(&[]);
        assert_eq!(parsed.command, CliCommand::RunTui);
        assert_eq!(parsed.overrides, CliOverrides::default());
    }

    #[test]
    fn test_parse_version_and_help() {
        assert_eq!(parse(&["--version"]).command, CliCommand::Version);
        assert_eq!(parse(&["-V"]).command, CliCommand::Version);
        assert_eq!(parse(&["-h"]).command, CliCommand::Help);
        assert_eq!(parse(&["ask", "--help"]).command, CliCommand::Help);
    }

    #[test]
    fn test_parse_ask_joins_words() {
        assert_eq!(
            parse(&["ask", "what", "is", "rust?"]).command,
            CliCommand::Ask {
                multi: false,
                prompt: "what is rust?".to_string()
            }
        );
    }

    #[test]
    fn test_parse_ask_multi_anywhere_after_ask() {
        assert_eq!(
            parse(&["ask", "pros", "--multi", "cons"]).command,
            CliCommand::Ask {
                multi: true,
                prompt: "pros cons".to_string()
            }
        );
    }

    #[test]
    fn test_parse_ask_without_prompt_is_invalid() {
        assert!(matches!(parse(&["ask"]).command, CliCommand::Invalid(_)));
        assert!(matches!(
            parse(&["ask", "--multi"]).command,
            CliCommand::Invalid(_)
        ));
    }

    #[test]
    fn test_parse_overrides() {
        let parsed = parse(&[
            "--url",
            "http://chat:8080/",
            "--session",
            "abc",
            "--log-file",
            "/tmp/rt.log",
            "clear",
        ]);
        assert_eq!(parsed.command, CliCommand::Clear);
        assert_eq!(parsed.overrides.base_url.as_deref(), Some("http://chat:8080/"));
        assert_eq!(parsed.overrides.session_id.as_deref(), Some("abc"));
        assert_eq!(parsed.overrides.log_file, Some(PathBuf::from("/tmp/rt.log")));

        let config = parsed.overrides.apply(ClientConfig::new());
        assert_eq!(config.base_url, "http://chat:8080");
        assert_eq!(config.session_id, "abc");
    }

    #[test]
    fn test_new_session_generates_id() {
        let parsed = parse(&["--new-session"]);
        let config = parsed.overrides.apply(ClientConfig::new());
        assert_ne!(config.session_id, "default");
        assert_eq!(config.session_id.len(), 36);
    }

    #[test]
    fn test_only_backend_commands_need_config() {
        for (args, needs) in [
            (vec![], true),
            (vec!["ask", "hi"], true),
            (vec!["clear"], true),
            (vec!["--help"], false),
            (vec!["--version"], false),
            (vec!["--bogus"], false),
        ] {
            assert_eq!(parse(&args).command.needs_backend(), needs, "{:?}", args);
        }
    }

    #[test]
    fn test_parse_invalid_input() {
        assert!(matches!(parse(&["--bogus"]).command, CliCommand::Invalid(_)));
        assert!(matches!(parse(&["hello"]).command, CliCommand::Invalid(_)));
        assert!(matches!(parse(&["--url"]).command, CliCommand::Invalid(_)));
        assert!(matches!(
            parse(&["--session", "--new-session"]).command,
            CliCommand::Invalid(_)
        ));
        assert!(matches!(parse(&["--multi"]).command, CliCommand::Invalid(_)));
    }
}
