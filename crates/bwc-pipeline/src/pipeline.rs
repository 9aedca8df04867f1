//! # Pipeline Service
//!
//! | Section               | Contents                                |
//! |-----------------------|-----------------------------------------|
//! | `PipelineStage`       | Stage names for logs and errors         |
//! | `SigningMode`         | Local signing vs. offline preparation   |
//! | `BroadcastPipeline`   | The orchestrator                        |

use std::fmt;

use bwc_authority::{
    required_authorities, required_public_keys, resolve_signers, AccountDirectory, KeyLookup,
    Role, DEFAULT_MAX_DEPTH,
};
use bwc_protocol::{Authority, Operation, SignedTransaction, UnsignedTransaction};
use serde::Serialize;
use shared_types::{BroadcastReceipt, ChainParams};

use crate::assembler;
use crate::errors::PipelineError;
use crate::ports::{BroadcastGateway, ChainHeadProvider, GatewayError};
use crate::signer;

/// Substring identifying the node-side verify_authority defect: the
/// endpoint chokes on the extensions array of an otherwise valid
/// transaction. A verify failure carrying it is ignored and broadcast
/// proceeds.
const VERIFY_BAD_CAST: &str = "Bad Cast:Invalid cast from string_type to Array";

/// Where a transaction is in its life cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Envelope assembled.
    Built,
    /// Signing keys gathered (or listed, in offline mode).
    KeysResolved,
    /// Signatures attached.
    Signed,
    /// Pre-flight authority check passed.
    Verified,
    /// Submitted to the node.
    Broadcast,
    /// Node accepted the transaction.
    Confirmed,
    /// Node rejected the transaction.
    Rejected,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Built => "built",
            PipelineStage::KeysResolved => "keys_resolved",
            PipelineStage::Signed => "signed",
            PipelineStage::Verified => "verified",
            PipelineStage::Broadcast => "broadcast",
            PipelineStage::Confirmed => "confirmed",
            PipelineStage::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// How the pipeline treats private key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SigningMode {
    /// Sign with locally held keys and broadcast.
    #[default]
    Local,
    /// Never touch private keys: stop after resolution and report the
    /// public keys an external signer would need.
    Offline,
}

fn serialize_authorities<S: serde::Serializer>(
    authorities: &[(String, Authority)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(authorities.iter().map(|(account, authority)| (account, authority)))
}

/// Annotated envelope handed to an out-of-process signer.
#[derive(Debug, Serialize)]
pub struct SigningRequirements {
    /// The assembled, unsigned envelope.
    pub transaction: UnsignedTransaction,
    /// The authorities to satisfy, keyed by account: the signing
    /// account's own plus each delegated account's, one recursion
    /// deep.
    #[serde(serialize_with = "serialize_authorities")]
    pub required_authorities: Vec<(String, Authority)>,
    /// Textual public keys that could satisfy those authorities.
    pub required_keys: Vec<String>,
}

/// Result of a full pipeline run.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The node accepted the transaction.
    Confirmed(BroadcastReceipt),
    /// Offline mode: the envelope awaits external signatures.
    AwaitingSignatures(SigningRequirements),
}

/// Orchestrates assemble, resolve, sign, verify, and broadcast against
/// injected collaborators.
pub struct BroadcastPipeline<H, D, G> {
    chain: ChainParams,
    head: H,
    directory: D,
    gateway: G,
    mode: SigningMode,
    max_depth: u32,
    verify_first: bool,
    expiration_window_secs: i64,
}

impl<H, D, G> BroadcastPipeline<H, D, G>
where
    H: ChainHeadProvider,
    D: AccountDirectory,
    G: BroadcastGateway,
{
    /// Creates a pipeline with default depth, window, and pre-flight
    /// verification enabled.
    pub fn new(chain: ChainParams, head: H, directory: D, gateway: G) -> Self {
        Self {
            chain,
            head,
            directory,
            gateway,
            mode: SigningMode::Local,
            max_depth: DEFAULT_MAX_DEPTH,
            verify_first: true,
            expiration_window_secs: assembler::DEFAULT_EXPIRATION_WINDOW_SECS,
        }
    }

    /// Selects local signing or offline preparation.
    pub fn with_mode(mut self, mode: SigningMode) -> Self {
        self.mode = mode;
        self
    }

    /// Overrides the delegation depth bound.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Disables the pre-flight verify_authority call.
    pub fn without_preflight_verify(mut self) -> Self {
        self.verify_first = false;
        self
    }

    /// Overrides the expiration window.
    pub fn with_expiration_window(mut self, seconds: i64) -> Self {
        self.expiration_window_secs = seconds;
        self
    }

    /// Runs the pipeline end to end for `account`'s operations.
    ///
    /// In [`SigningMode::Local`] this assembles, resolves, signs, and
    /// broadcasts, returning the node's receipt. In
    /// [`SigningMode::Offline`] it stops after resolution and `keys`
    /// is never consulted.
    pub async fn run<K>(
        &self,
        account: &str,
        operations: Vec<Operation>,
        keys: &K,
    ) -> Result<PipelineOutcome, PipelineError>
    where
        K: KeyLookup + Sync + ?Sized,
    {
        let transaction = self.build(operations).await?;
        tracing::debug!(account, stage = %PipelineStage::Built, "envelope assembled");

        match self.mode {
            SigningMode::Offline => {
                let requirements = self.signing_requirements(account, transaction).await?;
                tracing::info!(
                    account,
                    stage = %PipelineStage::KeysResolved,
                    keys = requirements.required_keys.len(),
                    "offline envelope prepared"
                );
                Ok(PipelineOutcome::AwaitingSignatures(requirements))
            }
            SigningMode::Local => {
                let signed = self.sign(account, transaction, keys).await?;
                let receipt = self.submit(&signed).await?;
                Ok(PipelineOutcome::Confirmed(receipt))
            }
        }
    }

    /// Assembles an unsigned envelope anchored to the live chain head.
    pub async fn build(
        &self,
        operations: Vec<Operation>,
    ) -> Result<UnsignedTransaction, PipelineError> {
        let head = self
            .head
            .head_block()
            .await
            .map_err(|e| transport(PipelineStage::Built, e))?;
        assembler::assemble(&head, self.expiration_window_secs, operations)
    }

    /// Resolves `account`'s owner authority and signs with the
    /// matching local keys.
    pub async fn sign<K>(
        &self,
        account: &str,
        transaction: UnsignedTransaction,
        keys: &K,
    ) -> Result<SignedTransaction, PipelineError>
    where
        K: KeyLookup + Sync + ?Sized,
    {
        let authority = self.owner_authority(account).await?;
        let resolved = resolve_signers(
            account,
            &authority,
            keys,
            &self.directory,
            Role::Owner,
            self.max_depth,
        )
        .await?;
        tracing::debug!(
            account,
            stage = %PipelineStage::KeysResolved,
            keys = resolved.keys.len(),
            weight = resolved.weight,
            "signing quorum gathered"
        );

        let signed = signer::sign_transaction(transaction, &resolved.keys, self.chain.chain_id())?;
        tracing::debug!(
            account,
            stage = %PipelineStage::Signed,
            signatures = signed.signatures.len(),
            "signatures attached"
        );
        Ok(signed)
    }

    /// Pre-flight verifies (unless disabled) and broadcasts.
    pub async fn submit(
        &self,
        signed: &SignedTransaction,
    ) -> Result<BroadcastReceipt, PipelineError> {
        if self.verify_first {
            match self.gateway.verify_authority(signed).await {
                Ok(()) => {
                    tracing::debug!(stage = %PipelineStage::Verified, "authority pre-flight passed");
                }
                Err(e) if e.to_string().contains(VERIFY_BAD_CAST) => {
                    tracing::warn!(
                        stage = %PipelineStage::Verified,
                        "node verify_authority defect hit, skipping pre-flight"
                    );
                }
                Err(GatewayError::Rejected(message)) => {
                    tracing::debug!(stage = %PipelineStage::Rejected, %message, "pre-flight rejected");
                    return Err(PipelineError::RejectedByNetwork { message });
                }
                Err(e) => return Err(transport(PipelineStage::Verified, e)),
            }
        }

        match self.gateway.broadcast(signed).await {
            Ok(receipt) => {
                tracing::info!(
                    stage = %PipelineStage::Confirmed,
                    id = %receipt.id,
                    block = receipt.block_num,
                    "transaction accepted"
                );
                Ok(receipt)
            }
            Err(GatewayError::Rejected(message)) => {
                tracing::debug!(stage = %PipelineStage::Rejected, %message, "transaction rejected");
                Err(PipelineError::RejectedByNetwork { message })
            }
            Err(e) => Err(transport(PipelineStage::Broadcast, e)),
        }
    }

    /// Prepares an envelope for out-of-process signing.
    pub async fn signing_requirements(
        &self,
        account: &str,
        transaction: UnsignedTransaction,
    ) -> Result<SigningRequirements, PipelineError> {
        let authority = self.owner_authority(account).await?;
        let required_authorities =
            required_authorities(account, &authority, &self.directory, Role::Owner).await?;
        let required_keys = required_public_keys(&authority, &self.directory, Role::Owner).await?;
        Ok(SigningRequirements {
            transaction,
            required_authorities,
            required_keys,
        })
    }

    async fn owner_authority(&self, account: &str) -> Result<Authority, PipelineError> {
        self.directory
            .get_authority(account, Role::Owner)
            .await?
            .ok_or_else(|| PipelineError::UnknownAccount(account.to_string()))
    }
}

fn transport(stage: PipelineStage, error: GatewayError) -> PipelineError {
    let message = match error {
        GatewayError::Transport(m) | GatewayError::Rejected(m) => m,
    };
    PipelineError::Transport { stage, message }
}
