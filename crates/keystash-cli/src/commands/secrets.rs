//! Secret management commands.
//!
//! Provides `keystash secrets get|set|update|remove|clear|exists`
//! subcommands over a [`SecretStore`] bound to the configured service.

use std::io::Write;

use anyhow::Context;
use clap::Args;
use keystash_core::Config;
use keystash_secrets::{platform_vault, SecretStore, StoreError, Vault};

/// Secrets command arguments.
#[derive(Args)]
pub struct SecretsArgs {
    /// Service namespace (overrides KEYSTASH_SERVICE and the config file)
    #[arg(long, global = true)]
    pub service: Option<String>,

    #[command(subcommand)]
    pub command: SecretsCommand,
}

#[derive(clap::Subcommand)]
pub enum SecretsCommand {
    /// Print the secret stored under a key
    Get {
        /// Secret key
        key: String,
    },

    /// Store a secret, replacing any existing value (prompts for value)
    Set {
        /// Secret key
        key: String,

        /// Secret value (if omitted, prompts for hidden input)
        #[arg(long)]
        value: Option<String>,
    },

    /// Replace the value of an existing secret
    Update {
        /// Secret key
        key: String,

        /// Secret value (if omitted, prompts for hidden input)
        #[arg(long)]
        value: Option<String>,
    },

    /// Remove a secret
    Remove {
        /// Secret key
        key: String,
    },

    /// Remove every secret in the service
    Clear,

    /// Print whether a secret is stored under a key
    Exists {
        /// Secret key
        key: String,
    },
}

/// Run the secrets command against the platform keychain.
pub async fn run(args: SecretsArgs, config: &Config) -> anyhow::Result<()> {
    let service = resolve_service(args.service, config)?;
    let vault = platform_vault()
        .ok_or_else(|| anyhow::anyhow!("No OS keychain is available on this platform"))?;
    let command = with_prompted_value(args.command)?;

    let store = SecretStore::new(service, vault);
    tracing::debug!(service = store.service(), "opened secret store");

    // Keychain calls block; keep them off the async workers.
    tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        execute(&store, command, &mut stdout.lock())
    })
    .await
    .context("keychain task failed")?
}

/// Pick the `--service` flag over the configured service and check it.
fn resolve_service(flag: Option<String>, config: &Config) -> anyhow::Result<String> {
    let service = flag.unwrap_or_else(|| config.store.service.clone());
    Config::validate_service(&service)
        .with_context(|| format!("Invalid service name {:?}", service))?;
    Ok(service)
}

/// Fill in a missing `--value` by prompting for hidden input.
fn with_prompted_value(command: SecretsCommand) -> anyhow::Result<SecretsCommand> {
    let command = match command {
        SecretsCommand::Set { key, value: None } => {
            let value = prompt_value(&key)?;
            SecretsCommand::Set { key, value: Some(value) }
        }
        SecretsCommand::Update { key, value: None } => {
            let value = prompt_value(&key)?;
            SecretsCommand::Update { key, value: Some(value) }
        }
        other => other,
    };
    Ok(command)
}

fn prompt_value(key: &str) -> anyhow::Result<String> {
    let prompt = format!("Enter value for '{key}': ");
    rpassword::prompt_password(prompt).context("Failed to read secret")
}

fn require_value(value: Option<String>) -> anyhow::Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => anyhow::bail!("Secret value must not be empty"),
    }
}

/// Execute a secrets command against `store`, writing results to `out`.
pub fn execute<V: Vault>(
    store: &SecretStore<V>,
    command: SecretsCommand,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        SecretsCommand::Get { key } => match store.get(&key)? {
            Some(value) => writeln!(out, "{}", value)?,
            None => anyhow::bail!(
                "No secret stored under '{}' in service '{}'",
                key,
                store.service()
            ),
        },

        SecretsCommand::Set { key, value } => {
            let value = require_value(value)?;
            store.set(&value, &key)?;
            writeln!(out, "Secret '{}' stored successfully.", key)?;
        }

        SecretsCommand::Update { key, value } => {
            let value = require_value(value)?;
            match store.update(&value, &key) {
                Ok(()) => writeln!(out, "Secret '{}' updated.", key)?,
                Err(StoreError::ItemNotFound) => anyhow::bail!(
                    "No secret stored under '{}'; use 'set' to create it",
                    key
                ),
                Err(e) => return Err(e.into()),
            }
        }

        SecretsCommand::Remove { key } => {
            store
                .remove(&key)
                .with_context(|| format!("Failed to remove secret '{}'", key))?;
            writeln!(out, "Secret '{}' removed.", key)?;
        }

        SecretsCommand::Clear => {
            store.remove_all()?;
            writeln!(out, "All secrets in service '{}' removed.", store.service())?;
        }

        SecretsCommand::Exists { key } => {
            writeln!(out, "{}", store.exists(&key)?)?;
        }
    }

    Ok(())
}
