//
//  upcloud-api
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and edits the config file directly. Environment overrides are not
//! applied here, so what is shown is what is stored.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::GlobalOptions;

/// Manage the upctl configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(KeyArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Reset a configuration value to its default
    Unset(KeyArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct KeyArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

/// Hides secrets from printed output.
fn display_value(key: &str, value: Option<String>) -> Option<String> {
    match (key, value) {
        ("password", Some(_)) => Some("********".to_string()),
        (_, value) => value,
    }
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let path = global.config_path()?;
        let writer = global.writer();

        match &self.command {
            ConfigSubcommand::Get(args) => {
                let config = Config::load_from(&path)?;
                let value = display_value(&args.key, config.get(&args.key)?);
                if global.json {
                    let result = serde_json::json!({
                        "key": args.key,
                        "value": value,
                    });
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else if let Some(v) = value {
                    println!("{}", v);
                }
                Ok(())
            }
            ConfigSubcommand::Set(args) => {
                let mut config = Config::load_from(&path)?;
                config.set(&args.key, &args.value)?;
                config.save_to(&path)?;
                let shown = display_value(&args.key, Some(args.value.clone())).unwrap_or_default();
                writer.write_success(&format!("Set {} = {}", args.key, shown));
                Ok(())
            }
            ConfigSubcommand::Unset(args) => {
                let mut config = Config::load_from(&path)?;
                config.unset(&args.key)?;
                config.save_to(&path)?;
                writer.write_success(&format!("Unset {}", args.key));
                Ok(())
            }
            ConfigSubcommand::List => {
                let config = Config::load_from(&path)?;
                if global.json {
                    let mut values = serde_json::Map::new();
                    for key in CONFIG_KEYS {
                        let value = display_value(key, config.get(key)?);
                        values.insert(key.to_string(), serde_json::json!(value));
                    }
                    println!("{}", serde_json::to_string_pretty(&values)?);
                    return Ok(());
                }

                println!();
                println!("{}", style("Configuration").bold());
                println!("{}", "-".repeat(50));
                for key in CONFIG_KEYS {
                    match display_value(key, config.get(key)?) {
                        Some(v) => println!("  {}: {}", style(key).cyan(), v),
                        None => println!("  {}: {}", style(key).cyan(), style("(not set)").dim()),
                    }
                }
                Ok(())
            }
            ConfigSubcommand::Path => {
                if global.json {
                    let result = serde_json::json!({ "path": path });
                    println!("{}", serde_json::to_string_pretty(&result)?);
                } else {
                    println!("{}", path.display());
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_password_is_redacted() {
        assert_eq!(
            display_value("password", Some("secret".to_string())).as_deref(),
            Some("********")
        );
        assert_eq!(display_value("password", None), None);
        assert_eq!(
            display_value("username", Some("alice".to_string())).as_deref(),
            Some("alice")
        );
    }

    #[test]
    fn test_parse_set() {
        let cli = Cli::try_parse_from(["upctl", "config", "set", "timeout", "30"]).unwrap();
        let Commands::Config(cmd) = cli.command else {
            panic!("expected config command");
        };
        let ConfigSubcommand::Set(args) = cmd.command else {
            panic!("expected set");
        };
        assert_eq!(args.key, "timeout");
        assert_eq!(args.value, "30");
    }

    #[tokio::test]
    async fn test_set_then_unset_updates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let global = GlobalOptions {
            json: false,
            config: Some(path.clone()),
        };

        let set = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "poll_interval".to_string(),
                value: "9".to_string(),
            }),
        };
        set.run(&global).await.unwrap();
        assert_eq!(Config::load_from(&path).unwrap().poll_interval, 9);

        let unset = ConfigCommand {
            command: ConfigSubcommand::Unset(KeyArgs {
                key: "poll_interval".to_string(),
            }),
        };
        unset.run(&global).await.unwrap();
        assert_eq!(
            Config::load_from(&path).unwrap().poll_interval,
            Config::default().poll_interval
        );
    }

    #[tokio::test]
    async fn test_set_zero_timeout_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let global = GlobalOptions {
            json: false,
            config: Some(path.clone()),
        };

        let set = ConfigCommand {
            command: ConfigSubcommand::Set(SetArgs {
                key: "timeout".to_string(),
                value: "0".to_string(),
            }),
        };
        assert!(set.run(&global).await.is_err());
        assert!(!path.exists());
    }
}
