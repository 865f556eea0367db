// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded exponential backoff for queue-submission retries (§4.6: "owned
//! by the durable-queue client, not by the synchronous HTTP call itself").

use std::time::Duration;

const BASE: Duration = Duration::from_millis(200);
const CAP: Duration = Duration::from_secs(10);

/// `min(cap, base * 2^attempt)`, jittered by up to 25% using the wall
/// clock's sub-second component — no external randomness source needed
/// for a bound this loose.
pub fn delay_for(attempt: u32) -> Duration {
    let exp = BASE.saturating_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX));
    let capped = exp.min(CAP);
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    let jitter_frac = (nanos % 250) as f64 / 1000.0;
    capped.mul_f64(1.0 + jitter_frac)
}

/// Retries `attempt` up to `max_attempts` times (the first call counts as
/// attempt 0), sleeping [`delay_for`] between attempts, while `is_retryable`
/// holds for the error returned.
pub async fn retry<T, E, F, Fut>(max_attempts: u32, mut attempt: F, is_retryable: impl Fn(&E) -> bool) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
{
    let mut last_err = None;
    for n in 0..max_attempts {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retryable(&err) {
                    return Err(err);
                }
                last_err = Some(err);
                if n + 1 < max_attempts {
                    tokio::time::sleep(delay_for(n)).await;
                }
            }
        }
    }
    Err(last_err.expect("max_attempts >= 1"))
}
