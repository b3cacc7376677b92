//
//  upcloud-api
//  service/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Service Facade
//!
//! One method per API operation. Each method builds nothing itself: it takes
//! a request value, picks the dispatcher verb, and returns the decoded
//! payload without its JSON envelope.
//!
//! Operations whose API answers only with a status re-read the resource, so
//! callers always get the current object back (for example
//! [`Service::modify_subaccount`] returns the sub-account's details).
//!
//! ## Operations
//!
//! | Area | Module |
//! |------|--------|
//! | Accounts and sub-accounts | [`account`] |
//! | Servers and server waits | [`server`] |
//! | Storages, imports and storage waits | [`storage`] |
//! | Tags | [`tag`] |
//! | Permissions | [`permission`] |
//!
//! ## Example
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use upcloud_api::api::Client;
//! use upcloud_api::Service;
//!
//! # async fn example() -> upcloud_api::Result<()> {
//! let service = Service::new(Client::new("api-user", "secret")?);
//! for server in service.get_servers(&CancellationToken::new()).await? {
//!     println!("{} {}", server.uuid, server.state);
//! }
//! # Ok(())
//! # }
//! ```

pub mod account;
pub mod permission;
pub mod server;
pub mod storage;
pub mod tag;

use crate::api::Client;
use crate::config::Config;

/// Operation-level entry point to the UpCloud API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Service {
    client: Client,
}

impl Service {
    /// Wraps an existing client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from `config` and wraps it.
    ///
    /// # Errors
    ///
    /// Fails if credentials are missing, the API URL is invalid, or a
    /// configured duration is zero.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(Client::from_config(config)?))
    }

    /// The underlying client, for requests the facade does not cover.
    pub fn client(&self) -> &Client {
        &self.client
    }
}
