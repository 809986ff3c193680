//! keystash command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use commands::config::ConfigCommand;
use keystash_core::{Config, ConfigError};

/// keystash - service-scoped secrets in the OS keychain
#[derive(Parser)]
#[command(name = "keystash")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "KEYSTASH_CONFIG", global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Manage secrets in the keychain
    Secrets(commands::secrets::SecretsArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

impl Commands {
    /// Whether the command writes or only names the config file, so a
    /// missing `--config` path is expected.
    fn creates_config(&self) -> bool {
        matches!(
            self,
            Commands::Config(args)
                if matches!(
                    args.command,
                    ConfigCommand::Init { .. } | ConfigCommand::Set { .. } | ConfigCommand::Path
                )
        )
    }
}

/// Load the configuration for `cli`.
///
/// A missing `--config` file is an error unless the command is about to
/// create it.
pub fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    match Config::load_or_default(cli.config.as_deref()) {
        Err(ConfigError::NotFound(_)) if cli.command.creates_config() => {
            let mut config = Config::default();
            config.apply_env();
            Ok(config)
        }
        result => result,
    }
}

/// Run the CLI with the given arguments and loaded configuration.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Secrets(args) => commands::secrets::run(args, &config).await,
        Commands::Config(args) => commands::config::run(args, config, cli.config.as_deref()),
        Commands::Version => {
            println!("keystash {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use commands::secrets::SecretsCommand;
    use tempfile::TempDir;

    #[test]
    fn test_parse_version() {
        let cli = Cli::try_parse_from(["keystash", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["keystash", "config", "show"]).unwrap();
        match cli.command {
            Commands::Config(args) => assert!(matches!(args.command, ConfigCommand::Show)),
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_parse_secrets_set_with_service() {
        let cli = Cli::try_parse_from([
            "keystash",
            "secrets",
            "set",
            "api-token",
            "--value",
            "abc",
            "--service",
            "com.example.app",
        ])
        .unwrap();
        match cli.command {
            Commands::Secrets(args) => {
                assert_eq!(args.service.as_deref(), Some("com.example.app"));
                match args.command {
                    SecretsCommand::Set { key, value } => {
                        assert_eq!(key, "api-token");
                        assert_eq!(value.as_deref(), Some("abc"));
                    }
                    _ => panic!("Expected Secrets Set command"),
                }
            }
            _ => panic!("Expected Secrets command"),
        }
    }

    #[test]
    fn test_parse_secrets_clear() {
        let cli = Cli::try_parse_from(["keystash", "secrets", "clear"]).unwrap();
        match cli.command {
            Commands::Secrets(args) => {
                assert!(args.service.is_none());
                assert!(matches!(args.command, SecretsCommand::Clear));
            }
            _ => panic!("Expected Secrets command"),
        }
    }

    #[test]
    fn test_parse_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["keystash", "secrets", "get", "k", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_missing_key_fails() {
        assert!(Cli::try_parse_from(["keystash", "secrets", "get"]).is_err());
    }

    #[test]
    fn test_load_config_missing_explicit_path_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("typo.json5");
        let path = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["keystash", "--config", path, "secrets", "clear"]).unwrap();
        assert!(matches!(load_config(&cli), Err(ConfigError::NotFound(_))));

        let cli = Cli::try_parse_from(["keystash", "--config", path, "config", "show"]).unwrap();
        assert!(matches!(load_config(&cli), Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_config_missing_path_allowed_for_init() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.json5");
        let path = path.to_str().unwrap();

        let cli = Cli::try_parse_from(["keystash", "--config", path, "config", "init"]).unwrap();
        assert!(load_config(&cli).is_ok());

        let cli =
            Cli::try_parse_from(["keystash", "--config", path, "config", "set", "store.service", "x"])
                .unwrap();
        assert!(load_config(&cli).is_ok());
    }
}
