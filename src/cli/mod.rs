//
//  upcloud-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod account;
mod config;
mod permission;
mod server;
mod storage;
mod tag;

pub use account::AccountCommand;
pub use config::ConfigCommand;
pub use permission::PermissionCommand;
pub use server::ServerCommand;
pub use storage::StorageCommand;
pub use tag::TagCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::api::common::Error;
use crate::config::{Config, MissingCredentials};
use crate::exit_codes;
use crate::output::OutputWriter;
use crate::service::Service;

/// upctl - Work with UpCloud from the command line
#[derive(Parser, Debug)]
#[command(
    name = "upctl",
    version,
    about = "Work with UpCloud from the command line",
    long_about = "upctl is a CLI for the UpCloud control-plane API.\n\n\
                  It manages accounts, servers, storages, tags and permissions.",
    propagate_version = true,
    after_help = "Use 'upctl <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the config file
    #[arg(long, global = true, env = "UPCLOUD_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GlobalOptions {
    /// Loads the configuration, applying environment overrides.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => {
                let mut config = Config::load_from(path)?;
                config.apply_env();
                Ok(config)
            }
            None => Config::load(),
        }
    }

    /// Path of the config file: `--config` when given, the default otherwise.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    /// Builds a service from the loaded configuration.
    pub fn service(&self) -> Result<Service> {
        Service::from_config(&self.load_config()?)
    }

    pub fn writer(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the authenticated account
    Account(AccountCommand),

    /// Manage servers
    #[command(visible_alias = "srv")]
    Server(ServerCommand),

    /// Manage storages and storage imports
    #[command(visible_alias = "st")]
    Storage(StorageCommand),

    /// Manage tags
    Tag(TagCommand),

    /// Manage sub-account permissions
    Permission(PermissionCommand),

    /// Manage upctl configuration
    Config(ConfigCommand),

    /// Show version information
    Version,
}

/// Maps a command failure to the process exit code.
///
/// | Failure | Exit code |
/// |---------|-----------|
/// | missing credentials, HTTP 401 | [`exit_codes::AUTH_ERROR`] |
/// | HTTP 404 | [`exit_codes::NOT_FOUND`] |
/// | cancellation | [`exit_codes::CANCELLED`] |
/// | deadline exceeded | [`exit_codes::TIMEOUT`] |
/// | anything else | [`exit_codes::ERROR`] |
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<MissingCredentials>().is_some() {
        return exit_codes::AUTH_ERROR;
    }

    match err.downcast_ref::<Error>() {
        Some(Error::Canceled) => exit_codes::CANCELLED,
        Some(Error::Timeout) => exit_codes::TIMEOUT,
        Some(e) => match e.service_error() {
            Some(se) if se.is_unauthorized() => exit_codes::AUTH_ERROR,
            Some(se) if se.is_not_found() => exit_codes::NOT_FOUND,
            _ => exit_codes::ERROR,
        },
        None => exit_codes::ERROR,
    }
}
