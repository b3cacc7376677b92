//
//  upcloud-api
//  cli/tag.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Tag commands

use anyhow::Result;
use clap::{Args, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::api::tag::{CreateTagRequest, DeleteTagRequest, Tag, TagServerRequest, UntagServerRequest};
use crate::output::{or_dash, TableRow};

use super::GlobalOptions;

/// Manage tags
#[derive(Args, Debug)]
pub struct TagCommand {
    #[command(subcommand)]
    pub command: TagSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TagSubcommand {
    /// List tags
    #[command(visible_alias = "ls")]
    List,

    /// Create a tag
    Create(CreateArgs),

    /// Delete a tag
    Delete(NameArgs),

    /// Add tags to a server
    Add(ServerTagsArgs),

    /// Remove tags from a server
    Remove(ServerTagsArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Tag name
    pub name: String,

    /// Tag description
    #[arg(long, short = 'd', default_value = "")]
    pub description: String,
}

#[derive(Args, Debug)]
pub struct NameArgs {
    /// Tag name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct ServerTagsArgs {
    /// Server UUID
    pub uuid: String,

    /// Tags to add or remove
    #[arg(required = true)]
    pub tags: Vec<String>,
}

impl TableRow for Tag {
    fn headers() -> &'static [&'static str] {
        &["NAME", "DESCRIPTION", "SERVERS"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![
            self.name.clone(),
            or_dash(&self.description),
            self.servers.server.len().to_string(),
        ]
    }
}

impl TagCommand {
    pub async fn run(&self, global: &GlobalOptions, ctx: &CancellationToken) -> Result<()> {
        let service = global.service()?;
        let writer = global.writer();

        match &self.command {
            TagSubcommand::List => {
                let tags = service.get_tags(ctx).await?;
                writer.write_list(&tags)
            }
            TagSubcommand::Create(args) => {
                let tag = service
                    .create_tag(
                        ctx,
                        &CreateTagRequest {
                            tag: Tag {
                                name: args.name.clone(),
                                description: args.description.clone(),
                                ..Default::default()
                            },
                        },
                    )
                    .await?;
                writer.write_list(&[tag])
            }
            TagSubcommand::Delete(args) => {
                service
                    .delete_tag(
                        ctx,
                        &DeleteTagRequest {
                            name: args.name.clone(),
                        },
                    )
                    .await?;
                writer.write_success(&format!("Deleted tag {}", args.name));
                Ok(())
            }
            TagSubcommand::Add(args) => {
                let details = service
                    .tag_server(
                        ctx,
                        &TagServerRequest {
                            uuid: args.uuid.clone(),
                            tags: args.tags.clone(),
                        },
                    )
                    .await?;
                writer.write(&details)
            }
            TagSubcommand::Remove(args) => {
                let details = service
                    .untag_server(
                        ctx,
                        &UntagServerRequest {
                            uuid: args.uuid.clone(),
                            tags: args.tags.clone(),
                        },
                    )
                    .await?;
                writer.write(&details)
            }
        }
    }
}
