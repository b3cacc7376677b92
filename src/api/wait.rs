//
//  upcloud-api
//  api/wait.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Polling state machines.
//!
//! A wait loop repeatedly fetches a resource and asks an `accept` function
//! whether the fetched value is final. Fetch errors end the loop at once;
//! nothing is ever re-issued except the read itself.
//!
//! # Algorithm
//!
//! ```text
//! start := now
//! loop:
//!   canceled?            -> Canceled
//!   details := fetch()?  -> fetch error returned as is
//!   match accept(details):
//!     Done    -> Ok(details)
//!     Fail(e) -> Err(e)
//!     Continue
//!   now - start >= timeout -> Timeout
//!   sleep(interval), interrupted by cancellation
//! ```
//!
//! With [`PollPolicy::sleep_first`] one interval is slept before the first
//! fetch. Server waits use this: a server that was just created or stopped
//! may not have entered `maintenance` yet, and an early read would report
//! the old state as final.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::api::common::{Error, Result, ServiceError};
use crate::api::server::ServerState;
use crate::api::storage::{StorageImportDetails, StorageImportState, StorageState};

/// Timing of a wait loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Delay between two fetches.
    pub interval: Duration,
    /// Total time budget, measured from the start of the loop.
    pub timeout: Duration,
    /// Sleep one interval before the first fetch.
    pub sleep_first: bool,
}

/// Outcome of inspecting one fetched value.
#[derive(Debug)]
pub enum Verdict {
    Done,
    Continue,
    Fail(Error),
}

/// Polls `fetch` until `accept` says [`Verdict::Done`] or [`Verdict::Fail`].
///
/// # Errors
///
/// - [`Error::Canceled`] as soon as `ctx` fires, without any further fetch
/// - [`Error::Timeout`] once `policy.timeout` has elapsed
/// - any error returned by `fetch`, unmodified
/// - the error carried by [`Verdict::Fail`]
pub async fn poll_until<T, F, Fut, A>(
    ctx: &CancellationToken,
    policy: PollPolicy,
    mut fetch: F,
    mut accept: A,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    A: FnMut(&T) -> Verdict,
{
    let start = Instant::now();
    let mut attempts: u32 = 0;

    if policy.sleep_first {
        sleep(ctx, policy.interval).await?;
    }

    loop {
        attempts += 1;
        if ctx.is_cancelled() {
            return Err(Error::Canceled);
        }

        let details = fetch().await?;
        match accept(&details) {
            Verdict::Done => {
                debug!(attempts, elapsed_ms = start.elapsed().as_millis() as u64, "wait finished");
                return Ok(details);
            }
            Verdict::Fail(err) => {
                debug!(attempts, error = %err, "wait failed");
                return Err(err);
            }
            Verdict::Continue => debug!(attempts, "wait continuing"),
        }

        if start.elapsed() >= policy.timeout {
            warn!(attempts, timeout_secs = policy.timeout.as_secs(), "wait timed out");
            return Err(Error::Timeout);
        }

        sleep(ctx, policy.interval).await?;
    }
}

/// Sleeps for `duration` unless `ctx` fires first.
pub(crate) async fn sleep(ctx: &CancellationToken, duration: Duration) -> Result<()> {
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(Error::Canceled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}

/// Accepts a server state when it equals `desired`, or differs from `undesired`.
pub fn server_state_verdict(
    state: ServerState,
    desired: Option<ServerState>,
    undesired: Option<ServerState>,
) -> Verdict {
    if desired.is_some_and(|d| state == d) || undesired.is_some_and(|u| state != u) {
        Verdict::Done
    } else {
        Verdict::Continue
    }
}

/// Accepts a storage state when it equals `desired`.
pub fn storage_state_verdict(state: StorageState, desired: StorageState) -> Verdict {
    if state == desired {
        Verdict::Done
    } else {
        Verdict::Continue
    }
}

/// Accepts `completed`; fails on `failed`, `cancelled` and `cancelling`.
pub fn import_verdict(details: &StorageImportDetails) -> Verdict {
    match details.state {
        StorageImportState::Completed => Verdict::Done,
        StorageImportState::Failed
        | StorageImportState::Cancelled
        | StorageImportState::Cancelling => Verdict::Fail(import_failure(details)),
        _ => Verdict::Continue,
    }
}

fn import_failure(details: &StorageImportDetails) -> Error {
    let state = details.state.as_str();
    let code = if details.error_code.is_empty() {
        state.to_string()
    } else {
        details.error_code.clone()
    };
    let message = if details.error_message.is_empty() {
        state.to_string()
    } else {
        details.error_message.clone()
    };

    Error::ImportFailed {
        details: Box::new(details.clone()),
        source: ServiceError::new(code, message),
    }
}
