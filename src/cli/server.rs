//
//  upcloud-api
//  cli/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Server commands
//!
//! Lists and inspects servers, drives power operations, and waits for a
//! server to settle in a given state.

use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use tokio_util::sync::CancellationToken;

use crate::api::server::{
    DeleteBackups, DeleteServerAndStoragesRequest, DeleteServerRequest, GetServerDetailsRequest,
    RestartServerRequest, Server, ServerDetails, ServerSize, ServerState, StartServerRequest,
    StopServerRequest, StopType, WaitForServerStateRequest,
};
use crate::output::{format_state, or_dash, OutputWriter, TableBuilder, TableOutput, TableRow};
use crate::service::Service;

use super::GlobalOptions;

/// Manage servers
#[derive(Args, Debug)]
pub struct ServerCommand {
    #[command(subcommand)]
    pub command: ServerSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ServerSubcommand {
    /// List servers
    #[command(visible_alias = "ls")]
    List,

    /// List available CPU and memory combinations
    Sizes,

    /// Show server details
    Show(UuidArgs),

    /// Start a stopped server
    Start(StartArgs),

    /// Stop a running server
    Stop(StopArgs),

    /// Restart a running server
    Restart(StopArgs),

    /// Wait for a server to reach a state
    Wait(WaitArgs),

    /// Delete a server
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct UuidArgs {
    /// Server UUID
    pub uuid: String,
}

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Server UUID
    pub uuid: String,

    /// Wait until the server is started
    #[arg(long)]
    pub wait: bool,

    /// Maximum seconds to wait with --wait
    #[arg(long, default_value = "600")]
    pub wait_timeout: u64,
}

#[derive(Args, Debug)]
pub struct StopArgs {
    /// Server UUID
    pub uuid: String,

    /// Power off immediately instead of an ACPI shutdown
    #[arg(long)]
    pub hard: bool,

    /// Seconds the API waits for a soft stop before forcing it
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Wait until the operation has finished
    #[arg(long)]
    pub wait: bool,

    /// Maximum seconds to wait with --wait
    #[arg(long, default_value = "600")]
    pub wait_timeout: u64,
}

#[derive(Args, Debug)]
pub struct WaitArgs {
    /// Server UUID
    pub uuid: String,

    /// State to wait for (started, stopped, maintenance, error)
    #[arg(long, required_unless_present = "leave")]
    pub state: Option<ServerState>,

    /// State to wait to leave
    #[arg(long)]
    pub leave: Option<ServerState>,

    /// Maximum seconds to wait
    #[arg(long, default_value = "600")]
    pub timeout: u64,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Server UUID
    pub uuid: String,

    /// Also delete the attached storages
    #[arg(long)]
    pub storages: bool,

    /// Delete the storages' backups too (with --storages)
    #[arg(long, requires = "storages")]
    pub backups: bool,
}

impl TableRow for Server {
    fn headers() -> &'static [&'static str] {
        &["UUID", "HOSTNAME", "ZONE", "PLAN", "STATE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.uuid.clone(),
            self.hostname.clone(),
            self.zone.clone(),
            or_dash(&self.plan),
            format_state(self.state.as_str(), color),
        ]
    }
}

impl TableRow for ServerSize {
    fn headers() -> &'static [&'static str] {
        &["CORES", "MEMORY (MiB)"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![self.core_number.clone(), self.memory_amount.clone()]
    }
}

impl TableOutput for ServerDetails {
    fn print_table(&self, color: bool) {
        let server = &self.server;
        let title = if color {
            style(&server.hostname).bold().to_string()
        } else {
            server.hostname.clone()
        };

        println!("{}", title);
        println!();
        println!("  UUID:   {}", server.uuid);
        println!("  Title:  {}", server.title);
        println!("  State:  {}", format_state(server.state.as_str(), color));
        println!("  Zone:   {}", server.zone);
        println!("  Plan:   {}", or_dash(&server.plan));
        println!(
            "  Size:   {} cores, {} MiB",
            server.core_number, server.memory_amount
        );
        println!("  Tags:   {}", or_dash(&server.tags.tag.join(", ")));

        if !self.storage_devices.storage_device.is_empty() {
            println!();
            TableBuilder::new()
                .color(color)
                .headers(["ADDRESS", "STORAGE", "TITLE", "SIZE (GiB)"])
                .rows(self.storage_devices.storage_device.iter().map(|d| {
                    [
                        d.address.clone(),
                        d.uuid.clone(),
                        d.title.clone(),
                        d.size.to_string(),
                    ]
                }))
                .print();
        }

        if !self.ip_addresses.ip_address.is_empty() {
            println!();
            TableBuilder::new()
                .color(color)
                .headers(["ADDRESS", "ACCESS", "FAMILY"])
                .rows(self.ip_addresses.ip_address.iter().map(|ip| {
                    [ip.address.clone(), ip.access.clone(), ip.family.clone()]
                }))
                .print();
        }
    }
}

impl ServerCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &CancellationToken) -> Result<()> {
        let service = global.service()?;
        let writer = global.writer();

        match &self.command {
            ServerSubcommand::List => {
                let servers = service.get_servers(ctx).await?;
                writer.write_list(&servers)
            }
            ServerSubcommand::Sizes => {
                let sizes = service.get_server_sizes(ctx).await?;
                writer.write_list(&sizes)
            }
            ServerSubcommand::Show(args) => {
                let details = service
                    .get_server_details(
                        ctx,
                        &GetServerDetailsRequest {
                            uuid: args.uuid.clone(),
                        },
                    )
                    .await?;
                writer.write(&details)
            }
            ServerSubcommand::Start(args) => self.start(&service, &writer, ctx, args).await,
            ServerSubcommand::Stop(args) => self.stop(&service, &writer, ctx, args).await,
            ServerSubcommand::Restart(args) => self.restart(&service, &writer, ctx, args).await,
            ServerSubcommand::Wait(args) => {
                let details = service
                    .wait_for_server_state(
                        ctx,
                        &WaitForServerStateRequest {
                            uuid: args.uuid.clone(),
                            desired_state: args.state,
                            undesired_state: args.leave,
                            timeout: Duration::from_secs(args.timeout),
                        },
                    )
                    .await?;
                writer.write(&details)
            }
            ServerSubcommand::Delete(args) => {
                if args.storages {
                    let backups = if args.backups {
                        DeleteBackups::Delete
                    } else {
                        DeleteBackups::Keep
                    };
                    service
                        .delete_server_and_storages(
                            ctx,
                            &DeleteServerAndStoragesRequest {
                                uuid: args.uuid.clone(),
                                backups: Some(backups),
                            },
                        )
                        .await?;
                } else {
                    service
                        .delete_server(
                            ctx,
                            &DeleteServerRequest {
                                uuid: args.uuid.clone(),
                            },
                        )
                        .await?;
                }
                writer.write_success(&format!("Deleted server {}", args.uuid));
                Ok(())
            }
        }
    }

    async fn start(
        &self,
        service: &Service,
        writer: &OutputWriter,
        ctx: &CancellationToken,
        args: &StartArgs,
    ) -> Result<()> {
        let mut details = service
            .start_server(
                ctx,
                &StartServerRequest {
                    uuid: args.uuid.clone(),
                    ..Default::default()
                },
            )
            .await?;

        if args.wait {
            details = wait_for(service, ctx, &args.uuid, ServerState::Started, args.wait_timeout)
                .await?;
        }
        writer.write(&details)
    }

    async fn stop(
        &self,
        service: &Service,
        writer: &OutputWriter,
        ctx: &CancellationToken,
        args: &StopArgs,
    ) -> Result<()> {
        let mut details = service
            .stop_server(
                ctx,
                &StopServerRequest {
                    uuid: args.uuid.clone(),
                    stop_type: Some(stop_type(args.hard)),
                    timeout: args.timeout.map(Duration::from_secs),
                },
            )
            .await?;

        if args.wait {
            details = wait_for(service, ctx, &args.uuid, ServerState::Stopped, args.wait_timeout)
                .await?;
        }
        writer.write(&details)
    }

    async fn restart(
        &self,
        service: &Service,
        writer: &OutputWriter,
        ctx: &CancellationToken,
        args: &StopArgs,
    ) -> Result<()> {
        let mut details = service
            .restart_server(
                ctx,
                &RestartServerRequest {
                    uuid: args.uuid.clone(),
                    stop_type: Some(stop_type(args.hard)),
                    timeout: args.timeout.map(Duration::from_secs),
                    ..Default::default()
                },
            )
            .await?;

        if args.wait {
            details = wait_for(service, ctx, &args.uuid, ServerState::Started, args.wait_timeout)
                .await?;
        }
        writer.write(&details)
    }
}

fn stop_type(hard: bool) -> StopType {
    if hard {
        StopType::Hard
    } else {
        StopType::Soft
    }
}

async fn wait_for(
    service: &Service,
    ctx: &CancellationToken,
    uuid: &str,
    state: ServerState,
    timeout: u64,
) -> Result<ServerDetails> {
    let details = service
        .wait_for_server_state(
            ctx,
            &WaitForServerStateRequest {
                uuid: uuid.to_string(),
                desired_state: Some(state),
                undesired_state: None,
                timeout: Duration::from_secs(timeout),
            },
        )
        .await?;
    Ok(details)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    #[test]
    fn test_parse_stop() {
        let cli = Cli::try_parse_from([
            "upctl", "server", "stop", "00af", "--hard", "--timeout", "900", "--wait",
        ])
        .unwrap();
        let Commands::Server(cmd) = cli.command else {
            panic!("expected server command");
        };
        let ServerSubcommand::Stop(args) = cmd.command else {
            panic!("expected stop");
        };
        assert_eq!(args.uuid, "00af");
        assert!(args.hard);
        assert_eq!(args.timeout, Some(900));
        assert!(args.wait);
    }

    #[test]
    fn test_parse_wait_state() {
        let cli =
            Cli::try_parse_from(["upctl", "server", "wait", "00af", "--state", "stopped"]).unwrap();
        let Commands::Server(cmd) = cli.command else {
            panic!("expected server command");
        };
        let ServerSubcommand::Wait(args) = cmd.command else {
            panic!("expected wait");
        };
        assert_eq!(args.state, Some(ServerState::Stopped));
        assert_eq!(args.leave, None);
    }

    #[test]
    fn test_wait_requires_a_state() {
        assert!(Cli::try_parse_from(["upctl", "server", "wait", "00af"]).is_err());
        assert!(
            Cli::try_parse_from(["upctl", "server", "wait", "00af", "--state", "sleeping"])
                .is_err()
        );
    }
}
