//
//  upcloud-api
//  cli/permission.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Permission commands

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::api::permission::{GrantPermissionRequest, Permission, RevokePermissionRequest};
use crate::output::{or_dash, TableRow};

use super::GlobalOptions;

/// Manage sub-account permissions
#[derive(Args, Debug)]
pub struct PermissionCommand {
    #[command(subcommand)]
    pub command: PermissionSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PermissionSubcommand {
    /// List permissions
    #[command(visible_alias = "ls")]
    List,

    /// Grant a sub-account access to a resource
    Grant(TargetArgs),

    /// Revoke a sub-account's access to a resource
    Revoke(TargetArgs),
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Sub-account username
    #[arg(long, short = 'u')]
    pub user: String,

    /// Resource type (server, storage, network, ...)
    #[arg(long, short = 't')]
    pub target_type: String,

    /// Resource identifier, usually a UUID
    pub target: String,
}

impl TargetArgs {
    fn permission(&self) -> Permission {
        Permission {
            target_identifier: self.target.clone(),
            target_type: self.target_type.clone(),
            user: self.user.clone(),
            ..Default::default()
        }
    }
}

impl TableRow for Permission {
    fn headers() -> &'static [&'static str] {
        &["USER", "TYPE", "TARGET", "PERMISSION"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.user.clone(),
            self.target_type.clone(),
            self.target_identifier.clone(),
            or_dash(&self.permission),
        ]
    }
}

impl PermissionCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &CancellationToken) -> Result<()> {
        let service = global.service()?;
        let writer = global.writer();

        match &self.command {
            PermissionSubcommand::List => {
                let permissions = service.get_permissions(ctx).await?;
                writer.write_list(&permissions)
            }
            PermissionSubcommand::Grant(args) => {
                let granted = service
                    .grant_permission(
                        ctx,
                        &GrantPermissionRequest {
                            permission: args.permission(),
                        },
                    )
                    .await?;
                writer.write_list(&[granted])
            }
            PermissionSubcommand::Revoke(args) => {
                service
                    .revoke_permission(
                        ctx,
                        &RevokePermissionRequest {
                            permission: args.permission(),
                        },
                    )
                    .await?;
                writer.write_success(&format!(
                    "Revoked {} access to {} {}",
                    args.user, args.target_type, args.target
                ));
                Ok(())
            }
        }
    }
}
