//
//  upcloud-api
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use upcloud_api::cli::{self, Cli, Commands};
use upcloud_api::exit_codes;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Ctrl+C cancels in-flight requests and wait loops
    let ctx = CancellationToken::new();
    let canceller = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    // Execute command
    let result = run(cli, &ctx).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(cli::exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("UPCLOUD_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli, ctx: &CancellationToken) -> Result<()> {
    match cli.command {
        Commands::Account(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Server(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Storage(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Tag(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Permission(cmd) => cmd.run(&cli.global, ctx).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", upcloud_api::APP_NAME, upcloud_api::VERSION);
            Ok(())
        }
    }
}
