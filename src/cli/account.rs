//
//  upcloud-api
//  cli/account.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Account commands
//!
//! Shows the authenticated account with its resource limits, and lists the
//! sub-accounts visible to it.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use tokio_util::sync::CancellationToken;

use crate::api::account::{Account, AccountDetails, AccountListItem, GetAccountDetailsRequest};
use crate::output::{or_dash, TableBuilder, TableOutput, TableRow};

use super::GlobalOptions;

/// Show the authenticated account
#[derive(Args, Debug)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub command: Option<AccountSubcommand>,
}

#[derive(Subcommand, Debug)]
pub enum AccountSubcommand {
    /// Show the account and its resource limits (default)
    Show,

    /// List accounts
    #[command(visible_alias = "ls")]
    List,

    /// Show details of a sub-account
    View(ViewArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Account username
    pub username: String,
}

impl TableOutput for Account {
    fn print_table(&self, color: bool) {
        let title = if color {
            style(&self.username).bold().to_string()
        } else {
            self.username.clone()
        };

        println!("{}", title);
        println!();
        println!("  Credits: {:.2}", self.credits / 100.0);
        println!();

        let limits = &self.resource_limits;
        TableBuilder::new()
            .color(color)
            .headers(["RESOURCE", "LIMIT"])
            .rows([
                ["cores".to_string(), limits.cores.to_string()],
                ["memory (MiB)".to_string(), limits.memory.to_string()],
                ["storage hdd (GiB)".to_string(), limits.storage_hdd.to_string()],
                ["storage ssd (GiB)".to_string(), limits.storage_ssd.to_string()],
                ["storage maxiops (GiB)".to_string(), limits.storage_maxiops.to_string()],
                ["networks".to_string(), limits.networks.to_string()],
                ["public ipv4".to_string(), limits.public_ipv4.to_string()],
                ["public ipv6".to_string(), limits.public_ipv6.to_string()],
                ["load balancers".to_string(), limits.load_balancers.to_string()],
            ])
            .print();
    }
}

impl TableRow for AccountListItem {
    fn headers() -> &'static [&'static str] {
        &["USERNAME", "TYPE", "ROLES"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.username.clone(),
            self.account_type.clone(),
            or_dash(&self.roles.role.join(", ")),
        ]
    }
}

impl TableOutput for AccountDetails {
    fn print_table(&self, color: bool) {
        let title = if color {
            style(&self.username).bold().to_string()
        } else {
            self.username.clone()
        };

        println!("{}", title);
        println!();
        println!("  Name:     {} {}", self.first_name, self.last_name);
        println!("  Type:     {}", self.account_type);
        println!("  Main:     {}", or_dash(&self.main_account));
        println!("  Email:    {}", or_dash(&self.email));
        println!("  Company:  {}", or_dash(&self.company));
        println!("  Timezone: {}", or_dash(&self.timezone));
        println!("  API:      {}", if self.allow_api.0 { "yes" } else { "no" });
        println!("  GUI:      {}", if self.allow_gui.0 { "yes" } else { "no" });
        println!("  Roles:    {}", or_dash(&self.roles.role.join(", ")));
    }
}

impl AccountCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &CancellationToken) -> Result<()> {
        let service = global.service()?;
        let writer = global.writer();

        match self.command.as_ref().unwrap_or(&AccountSubcommand::Show) {
            AccountSubcommand::Show => {
                let account = service.get_account(ctx).await?;
                writer.write(&account)
            }
            AccountSubcommand::List => {
                let accounts = service.get_account_list(ctx).await?;
                writer.write_list(&accounts)
            }
            AccountSubcommand::View(args) => {
                let details = service
                    .get_account_details(
                        ctx,
                        &GetAccountDetailsRequest {
                            username: args.username.clone(),
                        },
                    )
                    .await?;
                writer.write(&details)
            }
        }
    }
}
