//! Pipeline error taxonomy.

use bwc_authority::{AuthorityError, DirectoryError};
use bwc_protocol::ProtocolError;
use shared_crypto::CryptoError;
use thiserror::Error;

use crate::pipeline::PipelineStage;

/// Errors surfaced by the broadcast pipeline.
///
/// Encoding and authority failures are fatal to the attempt; transport
/// failures are opaque and left to the caller to retry; a network
/// rejection carries the node's message verbatim.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The signing account does not exist in the directory.
    #[error("Account '{0}' not found")]
    UnknownAccount(String),

    /// No reachable key set satisfies the signing threshold.
    #[error("Signing quorum unreachable: {0}")]
    MissingKey(#[from] AuthorityError),

    /// Assembly or encoding failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Signature production failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The account directory could not be reached.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// A collaborator failed at the transport level.
    #[error("Transport error at stage {stage}: {message}")]
    Transport {
        /// Stage the pipeline had reached.
        stage: PipelineStage,
        /// Collaborator's message.
        message: String,
    },

    /// The node rejected the transaction as invalid.
    #[error("Rejected by network: {message}")]
    RejectedByNetwork {
        /// The node's message, unaltered.
        message: String,
    },
}
