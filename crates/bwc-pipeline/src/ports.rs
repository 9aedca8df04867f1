//! Outbound ports of the broadcast pipeline.

use bwc_protocol::SignedTransaction;
use shared_types::{BroadcastReceipt, HeadBlock};
use thiserror::Error;

/// Error from a remote gateway call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never got a usable answer.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The node answered and said no.
    #[error("Node rejected the request: {0}")]
    Rejected(String),
}

/// Source of the current chain head, used to anchor the TaPoS
/// reference block fields.
#[async_trait::async_trait]
pub trait ChainHeadProvider: Send + Sync {
    /// The latest block the node knows about.
    async fn head_block(&self) -> Result<HeadBlock, GatewayError>;
}

/// Gateway to the node's transaction endpoints.
#[async_trait::async_trait]
pub trait BroadcastGateway: Send + Sync {
    /// Pre-flight check that the attached signatures satisfy the
    /// required authorities.
    async fn verify_authority(&self, transaction: &SignedTransaction) -> Result<(), GatewayError>;

    /// Submit the transaction and wait for the node's receipt.
    async fn broadcast(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<BroadcastReceipt, GatewayError>;
}
