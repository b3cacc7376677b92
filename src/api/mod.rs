//
//  upcloud-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module implements the request/response pipeline for the UpCloud REST
//! API (v1.3) and the typed request and response values of each resource.
//!
//! ## Architecture
//!
//! - [`client`]: Authenticated HTTP transport and the generic dispatcher
//! - [`request`]: The [`Request`] trait every operation implements
//! - [`common`]: Error taxonomy, error-response decoder and shared wire types
//! - [`wait`]: Polling state machines
//! - [`upload`]: The two-phase direct upload for storage imports
//! - [`account`], [`server`], [`storage`], [`tag`], [`permission`]: Resource types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tokio_util::sync::CancellationToken;
//! use upcloud_api::api::Client;
//! use upcloud_api::api::account::{AccountEnvelope, GetAccountRequest};
//!
//! # async fn example() -> upcloud_api::Result<()> {
//! let client = Client::new("api-user", "secret")?;
//! let mut out = AccountEnvelope::default();
//! client.get(&CancellationToken::new(), &GetAccountRequest, &mut out).await?;
//! println!("credits: {}", out.account.credits);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`Error`]. Non-2xx responses become
//! [`Error::Service`] carrying a [`ServiceError`] with the HTTP status.

/// Core HTTP client: transport, authentication and dispatch.
pub mod client;

/// Shared error and wire types.
pub mod common;

/// The request capability set.
pub mod request;

/// Wait loops built on top of the dispatcher.
pub mod wait;

/// Direct-upload coordinator.
pub mod upload;

/// Account and sub-account types.
pub mod account;

/// Server types.
pub mod server;

/// Storage and storage import types.
pub mod storage;

/// Tag types.
pub mod tag;

/// Permission types.
pub mod permission;

/// Re-export of the API client.
pub use client::{Client, Credentials};

/// Re-export of the error types.
pub use common::{Error, Result, ServiceError, ServiceErrorKind};

/// Re-export of the request trait.
pub use request::Request;
