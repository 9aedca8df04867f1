//! Transaction assembly.
//!
//! Anchors the envelope to the current chain head and stamps an
//! expiration a bounded window into the future.

use bwc_protocol::{Operation, ProtocolError, UnsignedTransaction};
use chrono::{DateTime, Duration, Utc};
use shared_types::HeadBlock;

use crate::errors::PipelineError;

/// Default expiration window.
pub const DEFAULT_EXPIRATION_WINDOW_SECS: i64 = 60;

/// Longest accepted expiration window, one day. A longer window widens
/// the replay surface for no operational benefit.
pub const MAX_EXPIRATION_WINDOW_SECS: i64 = 86_400;

/// Builds an unsigned transaction expiring `window_secs` from now.
pub fn assemble(
    head: &HeadBlock,
    window_secs: i64,
    operations: Vec<Operation>,
) -> Result<UnsignedTransaction, PipelineError> {
    assemble_at(head, Utc::now(), window_secs, operations)
}

/// Builds an unsigned transaction expiring `window_secs` after `now`.
///
/// Rejects windows that are not positive or exceed
/// [`MAX_EXPIRATION_WINDOW_SECS`].
pub fn assemble_at(
    head: &HeadBlock,
    now: DateTime<Utc>,
    window_secs: i64,
    operations: Vec<Operation>,
) -> Result<UnsignedTransaction, PipelineError> {
    if window_secs <= 0 || window_secs > MAX_EXPIRATION_WINDOW_SECS {
        return Err(ProtocolError::InvalidExpiration {
            seconds: window_secs,
            max: MAX_EXPIRATION_WINDOW_SECS,
        }
        .into());
    }
    let expiration = now + Duration::seconds(window_secs);
    Ok(UnsignedTransaction::new(head, expiration, operations))
}
