//
//  upcloud-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # UpCloud API Library
//!
//! A typed client for the UpCloud infrastructure control plane.
//!
//! ## Overview
//!
//! This library provides the core functionality for the `upctl` CLI tool:
//! an authenticated JSON-over-HTTPS client, typed request values for every
//! supported operation, long-poll wait loops, and direct upload of storage
//! import data.
//!
//! ## Module Structure
//!
//! - [`api`]: Transport, dispatcher, error decoding, wait loops, direct upload and resource types
//! - [`service`]: One method per API operation on top of [`api::Client`]
//! - [`config`]: Configuration file and environment handling
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Table and JSON rendering for command results
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use upcloud_api::api::server::{ServerState, StopServerRequest, WaitForServerStateRequest};
//! use upcloud_api::{Config, Service};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = Service::from_config(&Config::load()?)?;
//! let ctx = CancellationToken::new();
//!
//! service
//!     .stop_server(&ctx, &StopServerRequest {
//!         uuid: "00af".to_string(),
//!         timeout: Some(Duration::from_secs(60)),
//!         ..Default::default()
//!     })
//!     .await?;
//! service
//!     .wait_for_server_state(&ctx, &WaitForServerStateRequest {
//!         uuid: "00af".to_string(),
//!         desired_state: Some(ServerState::Stopped),
//!         undesired_state: None,
//!         timeout: Duration::from_secs(120),
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
///
/// Contains the `upctl` commands and arguments defined using the clap derive API.
pub mod cli;

/// UpCloud API client layer.
///
/// Handles authentication, request building, error decoding, cancellation,
/// polling and direct uploads.
pub mod api;

/// Configuration file management.
///
/// Manages credentials and client settings stored in platform-specific locations:
/// - Linux: `~/.config/upctl/config.toml`
/// - macOS: `~/Library/Application Support/com.upcloud.upctl/config.toml`
pub mod config;

/// Operation-level facade over the API client.
pub mod service;

/// Output formatting.
///
/// Renders results as tables or JSON.
pub mod output;

/// Re-export of the main CLI struct.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Re-export of the service facade.
pub use service::Service;

/// Re-export of the unified error type and result alias.
pub use api::common::{Error, Result};

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes.
pub const APP_NAME: &str = "upctl";

/// Application version constant.
///
/// Derived from Cargo.toml at compile time. Also sent in the `User-Agent`
/// header as `upcloud-api/<VERSION>`.
///
/// # Example
///
/// ```rust
/// use upcloud_api::VERSION;
///
/// println!("upctl version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `16-31`: Operation-related issues
///
/// # Example
///
/// ```rust,no_run
/// use upcloud_api::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Authentication failed.
    ///
    /// The API answered `401 Unauthorized`, or no credentials were configured.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The API answered `404 Not Found`.
    pub const NOT_FOUND: i32 = 8;

    /// Operation cancelled by user, typically with Ctrl+C.
    pub const CANCELLED: i32 = 16;

    /// A wait loop or request exceeded its timeout.
    pub const TIMEOUT: i32 = 17;
}
