//
//  upcloud-api
//  service/server.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Server operations.
//!
//! Start, stop and restart carry their own transport timeout (see
//! [`Request::timeout`](crate::api::Request::timeout)); the client's default
//! timeout is never changed, so one [`Service`] can be shared by concurrent
//! callers.

use tokio_util::sync::CancellationToken;

use super::Service;
use crate::api::common::{Error, Result};
use crate::api::server::{
    CreateServerRequest, DeleteServerAndStoragesRequest, DeleteServerRequest,
    GetServerDetailsRequest, GetServerSizesRequest, GetServersRequest, ModifyServerRequest,
    RestartServerRequest, Server, ServerDetails, ServerDetailsEnvelope, ServerSize,
    ServerSizesEnvelope, ServersEnvelope, StartServerRequest, StopServerRequest,
    WaitForServerStateRequest,
};
use crate::api::wait::{poll_until, server_state_verdict, PollPolicy};

impl Service {
    /// Lists the predefined server sizes.
    pub async fn get_server_sizes(&self, ctx: &CancellationToken) -> Result<Vec<ServerSize>> {
        let mut out = ServerSizesEnvelope::default();
        self.client.get(ctx, &GetServerSizesRequest, &mut out).await?;
        Ok(out.server_sizes.server_size)
    }

    /// Lists all servers of the account.
    pub async fn get_servers(&self, ctx: &CancellationToken) -> Result<Vec<Server>> {
        let mut out = ServersEnvelope::default();
        self.client.get(ctx, &GetServersRequest, &mut out).await?;
        Ok(out.servers.server)
    }

    /// Returns the full description of one server.
    pub async fn get_server_details(
        &self,
        ctx: &CancellationToken,
        req: &GetServerDetailsRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.get(ctx, req, &mut out).await?;
        Ok(out.server)
    }

    /// Creates a server. The server starts in `maintenance` while it is built.
    pub async fn create_server(
        &self,
        ctx: &CancellationToken,
        req: &CreateServerRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.server)
    }

    /// Starts a server.
    pub async fn start_server(
        &self,
        ctx: &CancellationToken,
        req: &StartServerRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.server)
    }

    /// Stops a server.
    ///
    /// With a stop timeout the request waits for the API for that long plus
    /// a ten second grace.
    pub async fn stop_server(
        &self,
        ctx: &CancellationToken,
        req: &StopServerRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.server)
    }

    /// Restarts a server.
    pub async fn restart_server(
        &self,
        ctx: &CancellationToken,
        req: &RestartServerRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.create(ctx, req, &mut out).await?;
        Ok(out.server)
    }

    /// Modifies a server.
    pub async fn modify_server(
        &self,
        ctx: &CancellationToken,
        req: &ModifyServerRequest,
    ) -> Result<ServerDetails> {
        let mut out = ServerDetailsEnvelope::default();
        self.client.modify(ctx, req, &mut out).await?;
        Ok(out.server)
    }

    /// Deletes a stopped server, keeping its storages.
    pub async fn delete_server(&self, ctx: &CancellationToken, req: &DeleteServerRequest) -> Result<()> {
        self.client.delete(ctx, req).await
    }

    /// Deletes a stopped server together with its storages.
    pub async fn delete_server_and_storages(
        &self,
        ctx: &CancellationToken,
        req: &DeleteServerAndStoragesRequest,
    ) -> Result<()> {
        self.client.delete(ctx, req).await
    }

    /// Polls a server until it reaches `desired_state` or leaves
    /// `undesired_state`.
    ///
    /// The first read happens after one poll interval, since a server that
    /// was just created or stopped may still report its previous state.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if neither state is set
    /// - [`Error::Timeout`] once `req.timeout` has elapsed
    /// - [`Error::Canceled`] when `ctx` fires
    pub async fn wait_for_server_state(
        &self,
        ctx: &CancellationToken,
        req: &WaitForServerStateRequest,
    ) -> Result<ServerDetails> {
        if req.desired_state.is_none() && req.undesired_state.is_none() {
            return Err(Error::InvalidArgument(
                "desired_state or undesired_state must be specified".to_string(),
            ));
        }

        let policy = PollPolicy {
            interval: self.client.poll_interval(),
            timeout: req.timeout,
            sleep_first: true,
        };
        let details_request = &GetServerDetailsRequest {
            uuid: req.uuid.clone(),
        };

        poll_until(
            ctx,
            policy,
            move || self.get_server_details(ctx, details_request),
            |details| {
                server_state_verdict(details.server.state, req.desired_state, req.undesired_state)
            },
        )
        .await
    }
}
