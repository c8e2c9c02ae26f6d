//! chatline CLI: Terminal chat client for a webhook-backed assistant

use chatline_engine::{Config, Dispatcher, ThemeMode};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Chat with a webhook-backed assistant from the terminal
#[derive(Parser)]
#[command(name = "chatline")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/chatline/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Webhook URL, overriding the config file
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// Write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat TUI (default when no command specified)
    Tui,

    /// Send one message and print the reply
    Send {
        /// Message text
        text: String,

        /// Print the reply as HTML
        #[arg(long)]
        html: bool,
    },

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult<ExitCode> {
    match &cli.command {
        None | Some(Commands::Tui) => {
            // stdout belongs to the terminal UI, so only log to a file.
            init_logging(cli, false)?;
            let config = load_config(cli)?;
            cmd_tui(&config)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Send { text, html }) => {
            init_logging(cli, true)?;
            let config = load_config(cli)?;
            cmd_send(&config, text, *html)
        }
        Some(Commands::Config {
            action: Some(ConfigAction::Init { force }),
            ..
        }) => {
            cmd_config_init(cli, *force)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config { json, action: None }) => {
            let config = load_config(cli)?;
            cmd_config(&config, config_path(cli).as_deref(), *json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Default log level for the number of `-v` flags.
fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(cli: &Cli, stderr_fallback: bool) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose)));

    if let Some(path) = &cli.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("failed to open log file {}: {e}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
            .map_err(|e| -> Box<dyn std::error::Error> { e })?;
    } else if stderr_fallback {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| -> Box<dyn std::error::Error> { e })?;
    }

    Ok(())
}

/// Config file in effect: `--config`, else the default location.
fn config_path(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(Config::default_path)
}

/// Load configuration and apply command-line overrides.
///
/// An explicit `--config` must exist; the default location may be absent.
fn load_config(cli: &Cli) -> CliResult<Config> {
    let mut config = match (&cli.config, Config::default_path()) {
        (Some(path), _) => Config::load(path)
            .map_err(|e| format!("failed to load {}: {e}", path.display()))?,
        (None, Some(path)) => Config::load_or_default(&path)
            .map_err(|e| format!("failed to load {}: {e}", path.display()))?,
        (None, None) => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.webhook_url.clone_from(url);
    }

    debug!(url = %config.webhook_url, "configuration loaded");
    Ok(config)
}

fn cmd_tui(config: &Config) -> CliResult<()> {
    let dispatcher = Dispatcher::from_config(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(chatline_tui::run_tui(config, dispatcher))
}

fn cmd_send(config: &Config, text: &str, html: bool) -> CliResult<ExitCode> {
    let dispatcher = Dispatcher::from_config(config)?;
    let runtime = tokio::runtime::Runtime::new()?;

    let Some(reply) = runtime.block_on(dispatcher.send(text)) else {
        return Ok(ExitCode::FAILURE);
    };
    info!(
        duration_ms = reply.duration_ms,
        fallback = reply.is_fallback(),
        "reply received"
    );

    let formatted = reply.formatted();
    if html {
        println!("{}", formatted.to_html());
    } else {
        println!("{}", formatted.plain());
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_config(config: &Config, path: Option<&Path>, json: bool) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("chatline configuration\n");

    match path {
        Some(path) if path.exists() => println!("  Config file: {}", path.display()),
        Some(path) => println!("  Config file: {} (not found, using defaults)", path.display()),
        None => println!("  Config file: none (using defaults)"),
    }
    println!("  Webhook URL: {}", config.webhook_url);
    match config.request_timeout_seconds {
        Some(secs) => println!("  Timeout:     {secs}s"),
        None => println!("  Timeout:     none"),
    }
    let theme = match config.theme {
        ThemeMode::Light => "light",
        ThemeMode::Dark => "dark",
    };
    println!("  Theme:       {theme}");

    println!("\n  Suggestions:");
    for (i, suggestion) in config.suggestions.iter().enumerate() {
        println!("    {}. {suggestion}", i + 1);
    }

    Ok(())
}

fn cmd_config_init(cli: &Cli, force: bool) -> CliResult<()> {
    let path = config_path(cli).ok_or("no config location found; pass --config <PATH>")?;

    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(url) = &cli.url {
        config.webhook_url.clone_from(url);
    }
    config
        .save(&path)
        .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    println!("Created {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_opens_tui() {
        let cli = Cli::try_parse_from(["chatline"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_send_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "chatline",
            "send",
            "Hola",
            "--html",
            "--url",
            "http://localhost:9/hook",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.url.as_deref(), Some("http://localhost:9/hook"));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Commands::Send { text, html }) => {
                assert_eq!(text, "Hola");
                assert!(html);
            }
            _ => panic!("expected send"),
        }
    }

    #[test]
    fn test_config_init_parses() {
        let cli = Cli::try_parse_from(["chatline", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: Some(ConfigAction::Init { force: true }),
                ..
            })
        ));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(7), "trace");
    }

    #[test]
    fn test_load_config_applies_url_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"webhook_url":"http://from-file/hook","theme":"dark"}"#)
            .unwrap();

        let path_arg = path.to_str().unwrap();
        let cli = Cli::try_parse_from(["chatline", "--config", path_arg]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.webhook_url, "http://from-file/hook");
        assert_eq!(config.theme, ThemeMode::Dark);

        let cli = Cli::try_parse_from([
            "chatline",
            "--config",
            path_arg,
            "--url",
            "http://override/hook",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.webhook_url, "http://override/hook");
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        let cli = Cli::try_parse_from(["chatline", "--config", path.to_str().unwrap()]).unwrap();

        let err = load_config(&cli).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }

    #[test]
    fn test_config_init_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let path_arg = path.to_str().unwrap();

        let cli = Cli::try_parse_from([
            "chatline",
            "--config",
            path_arg,
            "--url",
            "http://init/hook",
            "config",
            "init",
        ])
        .unwrap();
        cmd_config_init(&cli, false).unwrap();

        let written = Config::load(&path).unwrap();
        assert_eq!(written.webhook_url, "http://init/hook");
        assert_eq!(written.suggestions, Config::default().suggestions);

        // A second init leaves the file alone.
        std::fs::write(&path, r#"{"webhook_url":"http://edited/hook"}"#).unwrap();
        cmd_config_init(&cli, false).unwrap();
        assert_eq!(Config::load(&path).unwrap().webhook_url, "http://edited/hook");

        cmd_config_init(&cli, true).unwrap();
        assert_eq!(Config::load(&path).unwrap().webhook_url, "http://init/hook");
    }
}
