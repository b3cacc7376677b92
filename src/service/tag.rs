//
//  upcloud-api
//  service/tag.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Tag operations.

use tokio_util::sync::CancellationToken;

use super::Service;
use crate::api::common::Result;
use crate::api::server::{ServerDetails, ServerDetailsEnvelope};
use crate::api::tag::{
    CreateTagRequest, DeleteTagRequest, GetTagsRequest, ModifyTagRequest, Tag, TagEnvelope,
    TagServerRequest, TagsEnvelope, UntagServerRequest,
};

impl Service {
    /// Lists all tags.
    pub async fn get_tags(&self, ctx: &CancellationToken) -> Result<Vec<Tag>> {
        let mut out = TagsEnvelope::default();
        self.client.get(ctx, &GetTagsRequest, &mut out).await?;
        Ok(out.tags.tag)
    }

    /// Creates a tag.
    pub async fn create_tag(&self, ctx: &CancellationToken, req: &CreateTagRequest) -> Result<Tag> {
        let mut out = TagEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.tag)
    }

    /// Modifies a tag.
    pub async fn modify_tag(&self, ctx: &CancellationToken, req: &ModifyTagRequest) -> Result<Tag> {
        let mut out = TagEnvelope::default();
        self.client.modify(ctx, req, &mut out).await?;
        Ok(out.tag)
    }

    /// Deletes a tag.
    pub async fn delete_tag(&self, ctx: &CancellationToken, req: &DeleteTagRequest) -> Result<()> {
        self.client.delete(ctx, req).await
    }

    /// Adds tags to a server and returns the updated server.
    pub async fn tag_server(
        &self,
        ctx: &CancellationToken,
        req: &TagServerRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.server)
    }

    /// Removes tags from a server and returns the updated server.
    pub async fn untag_server(
        &self,
        ctx: &CancellationToken,
        req: &UntagServerRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.server)
    }
}
