//! # Broadcast Pipeline
//!
//! Drives a transaction from intent to network acceptance:
//!
//! ```text
//! Built -> KeysResolved -> Signed -> Verified -> Broadcast -> {Confirmed, Rejected}
//! ```
//!
//! Each stage consumes the previous stage's output, so the pipeline for
//! one transaction is strictly sequential. Failure to gather a signing
//! quorum is terminal at `KeysResolved`; no partial signature ever
//! reaches the wire. An offline mode stops at `KeysResolved`, emitting
//! the public keys an out-of-process signer would need instead of
//! touching private key material.
//!
//! Collaborators (chain head, account directory, broadcast gateway) are
//! injected through ports; nothing here opens a connection itself.

#![warn(missing_docs)]

pub mod assembler;
pub mod errors;
pub mod pipeline;
pub mod ports;
pub mod signer;

pub use errors::PipelineError;
pub use pipeline::{BroadcastPipeline, PipelineOutcome, PipelineStage, SigningMode};
pub use ports::{BroadcastGateway, ChainHeadProvider, GatewayError};
