//! Authority resolution errors.

use crate::ports::DirectoryError;
use thiserror::Error;

/// Errors raised while resolving signers for an authority.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorityError {
    /// The reachable keys never accumulate enough weight.
    ///
    /// Fatal for this signing attempt; the caller may retry after
    /// supplying more keys. No partial signature set is returned.
    #[error(
        "Quorum unreachable for account '{account}': threshold {threshold}, reachable weight {reached}"
    )]
    QuorumUnreachable {
        /// Account whose authority could not be satisfied.
        account: String,
        /// Required weight.
        threshold: u32,
        /// Weight actually reachable with held keys.
        reached: u32,
    },

    /// The account directory failed; opaque transport error.
    #[error("Account directory lookup failed: {0}")]
    Directory(#[from] DirectoryError),
}
