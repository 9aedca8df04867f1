//! Vault-backed signing: keys never leave the vault except to sign.

#[cfg(test)]
mod tests {
    use bwc_authority::{AccountDirectory, DirectoryError, Role};
    use bwc_pipeline::{
        BroadcastGateway, BroadcastPipeline, ChainHeadProvider, GatewayError, PipelineError,
        PipelineOutcome,
    };
    use bwc_protocol::operations::Transfer;
    use bwc_protocol::{Authority, Operation, SignedTransaction};
    use bwc_vault::KeyVault;
    use shared_crypto::PrivateKey;
    use shared_types::{Asset, BlockId, BroadcastReceipt, ChainParams, HeadBlock, SymbolTable};

    struct FixedHead;

    #[async_trait::async_trait]
    impl ChainHeadProvider for FixedHead {
        async fn head_block(&self) -> Result<HeadBlock, GatewayError> {
            Ok(HeadBlock {
                number: 100,
                id: BlockId([3u8; 20]),
            })
        }
    }

    struct OwnerDirectory {
        authority: Authority,
    }

    #[async_trait::async_trait]
    impl AccountDirectory for OwnerDirectory {
        async fn get_authority(
            &self,
            account: &str,
            _role: Role,
        ) -> Result<Option<Authority>, DirectoryError> {
            Ok((account == "alice").then(|| self.authority.clone()))
        }
    }

    struct AcceptingGateway;

    #[async_trait::async_trait]
    impl BroadcastGateway for AcceptingGateway {
        async fn verify_authority(
            &self,
            _transaction: &SignedTransaction,
        ) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn broadcast(
            &self,
            transaction: &SignedTransaction,
        ) -> Result<BroadcastReceipt, GatewayError> {
            if transaction.signatures.is_empty() {
                return Err(GatewayError::Rejected("missing signatures".to_string()));
            }
            Ok(BroadcastReceipt {
                id: "feed".to_string(),
                block_num: Some(101),
                trx_num: Some(0),
                expired: false,
            })
        }
    }

    fn transfer_op() -> Operation {
        let symbols = SymbolTable::default();
        Operation::Transfer(Transfer::new(
            "alice",
            "bob",
            Asset::parse("10.00000 BWF", &symbols).unwrap(),
            Asset::parse("0.10000 W", &symbols).unwrap(),
            None,
        ))
    }

    fn pipeline_for(
        key: &PrivateKey,
    ) -> BroadcastPipeline<FixedHead, OwnerDirectory, AcceptingGateway> {
        let authority = Authority::single_key(key.public_key(), "BEO");
        BroadcastPipeline::new(
            ChainParams::testnet(),
            FixedHead,
            OwnerDirectory { authority },
            AcceptingGateway,
        )
    }

    #[tokio::test]
    async fn test_vault_keys_drive_the_pipeline() {
        let key = PrivateKey::generate();
        let mut vault = KeyVault::new("alice", "BEO");
        vault.add_key(&key.to_wif()).unwrap();
        vault.seal("hunter2").unwrap();
        vault.lock();

        // A locked vault yields nothing to sign with.
        assert!(vault.private_keys().is_err());

        vault.unlock("hunter2").unwrap();
        let keys = vault.private_keys().unwrap();

        let pipeline = pipeline_for(&key);
        let outcome = pipeline
            .run("alice", vec![transfer_op()], &keys)
            .await
            .unwrap();
        assert!(matches!(outcome, PipelineOutcome::Confirmed(_)));
    }

    #[tokio::test]
    async fn test_locked_out_key_fails_resolution() {
        let owner = PrivateKey::generate();
        let vault = KeyVault::new("alice", "BEO");
        let keys = vault.private_keys().unwrap();

        let pipeline = pipeline_for(&owner);
        let result = pipeline.run("alice", vec![transfer_op()], &keys).await;
        assert!(matches!(result, Err(PipelineError::MissingKey(_))));
    }
}
