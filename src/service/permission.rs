//
//  upcloud-api
//  service/permission.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Permission operations.

use serde::de::IgnoredAny;
use tokio_util::sync::CancellationToken;

use super::Service;
use crate::api::common::Result;
use crate::api::permission::{
    GetPermissionsRequest, GrantPermissionRequest, Permission, PermissionEnvelope,
    PermissionsEnvelope, RevokePermissionRequest,
};

impl Service {
    /// Lists all permissions granted to sub-accounts.
    pub async fn get_permissions(&self, ctx: &CancellationToken) -> Result<Vec<Permission>> {
        let mut out = PermissionsEnvelope::default();
        self.client.get(ctx, &GetPermissionsRequest, &mut out).await?;
        Ok(out.permissions.permission)
    }

    /// Grants a permission and returns it as stored by the API.
    pub async fn grant_permission(
        &self,
        ctx: &CancellationToken,
        req: &GrantPermissionRequest,
    ) -> Result<Permission> {
        let mut out = PermissionEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.permission)
    }

    /// Revokes a permission.
    pub async fn revoke_permission(
        &self,
        ctx: &CancellationToken,
        req: &RevokePermissionRequest,
    ) -> Result<()> {
        self.client.create(ctx, req, &mut IgnoredAny).await
    }
}
