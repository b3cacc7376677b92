//
//  upcloud-api
//  cli/storage.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Storage commands
//!
//! Lists and inspects storages, and imports data into them either from a
//! URL the API downloads itself or by uploading a local file directly.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use console::style;
use tokio_util::sync::CancellationToken;

use crate::api::storage::{
    CancelStorageImportRequest, CreateStorageImportRequest, DeleteStorageRequest,
    GetStorageDetailsRequest, GetStorageImportDetailsRequest, GetStoragesRequest, SourceLocation,
    Storage, StorageDetails, StorageFilter, StorageImportDetails, StorageImportSource,
    StorageState, WaitForStorageImportCompletionRequest, WaitForStorageStateRequest,
};
use crate::output::{format_bytes, format_state, or_dash, TableOutput, TableRow};

use super::GlobalOptions;

/// Manage storages and storage imports
#[derive(Args, Debug)]
pub struct StorageCommand {
    #[command(subcommand)]
    pub command: StorageSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum StorageSubcommand {
    /// List storages
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Show storage details
    Show(UuidArgs),

    /// Import data into a storage
    Import(ImportArgs),

    /// Show the state of a storage's import
    ImportStatus(UuidArgs),

    /// Cancel a running import
    ImportCancel(UuidArgs),

    /// Wait for a storage to reach a state
    Wait(WaitArgs),

    /// Delete a storage
    Delete(UuidArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FilterArg {
    Public,
    Private,
    Normal,
    Backup,
    Cdrom,
    Template,
    Favorite,
}

impl From<FilterArg> for StorageFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::Public => Self::Public,
            FilterArg::Private => Self::Private,
            FilterArg::Normal => Self::Normal,
            FilterArg::Backup => Self::Backup,
            FilterArg::Cdrom => Self::Cdrom,
            FilterArg::Template => Self::Template,
            FilterArg::Favorite => Self::Favorite,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list storages of this access level or type
    #[arg(long, short = 'f', value_enum)]
    pub filter: Option<FilterArg>,
}

#[derive(Args, Debug)]
pub struct UuidArgs {
    /// Storage UUID
    pub uuid: String,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Storage UUID
    pub uuid: String,

    /// Upload a local file directly
    #[arg(long, conflicts_with = "url", required_unless_present = "url")]
    pub file: Option<PathBuf>,

    /// Let the API download the image from this URL
    #[arg(long)]
    pub url: Option<String>,

    /// Content type of the uploaded file
    #[arg(long, requires = "file")]
    pub content_type: Option<String>,

    /// Wait until the import has completed
    #[arg(long)]
    pub wait: bool,

    /// Maximum seconds to wait with --wait
    #[arg(long, default_value = "3600")]
    pub timeout: u64,
}

#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Storage UUID
    pub uuid: String,

    /// State to wait for (online, maintenance, cloning, backuping, syncing, error)
    #[arg(long)]
    pub state: StorageState,

    /// Maximum seconds to wait
    #[arg(long, default_value = "600")]
    pub timeout: u64,
}

impl TableRow for Storage {
    fn headers() -> &'static [&'static str] {
        &["UUID", "TITLE", "ZONE", "TYPE", "SIZE (GiB)", "STATE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.uuid.clone(),
            self.title.clone(),
            or_dash(&self.zone),
            self.storage_type.clone(),
            self.size.to_string(),
            format_state(self.state.as_str(), color),
        ]
    }
}

impl TableOutput for StorageDetails {
    fn print_table(&self, color: bool) {
        let storage = &self.storage;
        let title = if color {
            style(&storage.title).bold().to_string()
        } else {
            storage.title.clone()
        };

        println!("{}", title);
        println!();
        println!("  UUID:    {}", storage.uuid);
        println!("  State:   {}", format_state(storage.state.as_str(), color));
        println!("  Type:    {} ({})", storage.storage_type, storage.access);
        println!("  Tier:    {}", or_dash(&storage.tier));
        println!("  Size:    {} GiB", storage.size);
        println!("  Zone:    {}", or_dash(&storage.zone));
        println!("  Servers: {}", or_dash(&self.servers.server.join(", ")));
        println!("  Backups: {}", self.backups.backup.len());
        if let Some(rule) = &self.backup_rule {
            println!(
                "  Backup rule: {} at {}, kept {} days",
                rule.interval, rule.time, rule.retention
            );
        }
    }
}

impl TableOutput for StorageImportDetails {
    fn print_table(&self, color: bool) {
        println!("Import {}", self.uuid);
        println!();
        println!("  State:    {}", format_state(self.state.as_str(), color));
        println!("  Source:   {} {}", self.source, or_dash(&self.source_location));
        println!("  Read:     {}", format_bytes(self.read_bytes));
        println!("  Written:  {}", format_bytes(self.written_bytes));
        if !self.sha256sum.is_empty() {
            println!("  SHA-256:  {}", self.sha256sum);
        }
        if !self.error_code.is_empty() {
            println!("  Error:    {} ({})", self.error_message, self.error_code);
        }
    }
}

impl ImportArgs {
    fn to_request(&self) -> CreateStorageImportRequest {
        match (&self.file, &self.url) {
            (Some(file), _) => CreateStorageImportRequest {
                storage_uuid: self.uuid.clone(),
                source: StorageImportSource::DirectUpload,
                source_location: SourceLocation::Path(file.display().to_string()),
                content_type: self.content_type.clone(),
            },
            (None, url) => CreateStorageImportRequest {
                storage_uuid: self.uuid.clone(),
                source: StorageImportSource::HttpImport,
                source_location: url
                    .clone()
                    .map(SourceLocation::Path)
                    .unwrap_or_default(),
                content_type: None,
            },
        }
    }
}

impl StorageCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &CancellationToken) -> Result<()> {
        let service = global.service()?;
        let writer = global.writer();

        match &self.command {
            StorageSubcommand::List(args) => {
                let storages = service
                    .get_storages(
                        ctx,
                        &GetStoragesRequest {
                            filter: args.filter.map(Into::into),
                        },
                    )
                    .await?;
                writer.write_list(&storages)
            }
            StorageSubcommand::Show(args) => {
                let details = service
                    .get_storage_details(
                        ctx,
                        &GetStorageDetailsRequest {
                            uuid: args.uuid.clone(),
                        },
                    )
                    .await?;
                writer.write(&details)
            }
            StorageSubcommand::Import(args) => {
                let mut details = service.create_storage_import(ctx, args.to_request()).await?;
                if args.wait {
                    details = service
                        .wait_for_storage_import_completion(
                            ctx,
                            &WaitForStorageImportCompletionRequest {
                                storage_uuid: args.uuid.clone(),
                                timeout: Duration::from_secs(args.timeout),
                            },
                        )
                        .await?;
                }
                writer.write(&details)
            }
            StorageSubcommand::ImportStatus(args) => {
                let details = service
                    .get_storage_import_details(
                        ctx,
                        &GetStorageImportDetailsRequest {
                            uuid: args.uuid.clone(),
                        },
                    )
                    .await?;
                writer.write(&details)
            }
            StorageSubcommand::ImportCancel(args) => {
                let details = service
                    .cancel_storage_import(
                        ctx,
                        &CancelStorageImportRequest {
                            uuid: args.uuid.clone(),
                        },
                    )
                    .await?;
                writer.write(&details)
            }
            StorageSubcommand::Wait(args) => {
                let details = service
                    .wait_for_storage_state(
                        ctx,
                        &WaitForStorageStateRequest {
                            uuid: args.uuid.clone(),
                            desired_state: args.state,
                            timeout: Duration::from_secs(args.timeout),
                        },
                    )
                    .await?;
                writer.write(&details)
            }
            StorageSubcommand::Delete(args) => {
                service
                    .delete_storage(
                        ctx,
                        &DeleteStorageRequest {
                            uuid: args.uuid.clone(),
                        },
                    )
                    .await?;
                writer.write_success(&format!("Deleted storage {}", args.uuid));
                Ok(())
            }
        }
    }
}
