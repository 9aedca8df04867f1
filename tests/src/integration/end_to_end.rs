//! Assemble a transfer, sign it, and round-trip the wire forms.

#[cfg(test)]
mod tests {
    use bwc_codec::{encode_to_vec, ByteReader};
    use bwc_pipeline::assembler;
    use bwc_pipeline::signer;
    use bwc_protocol::operations::Transfer;
    use bwc_protocol::{Operation, UnsignedTransaction};
    use chrono::{TimeZone, Utc};
    use shared_crypto::PrivateKey;
    use shared_types::{Asset, BlockId, ChainParams, HeadBlock, SymbolTable};

    fn head() -> HeadBlock {
        HeadBlock {
            number: 0x0000_8764,
            id: BlockId([
                0x00, 0x00, 0x87, 0x64, 0xde, 0xad, 0xbe, 0xef, 0x01, 0x02, 0x03, 0x04, 0x05,
                0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
            ]),
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

    #[test]
    fn test_transfer_signs_and_round_trips() {
        let chain = ChainParams::testnet();
        let now = Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap();
        let tx = assembler::assemble_at(&head(), now, 60, vec![transfer_op()]).unwrap();

        let key = PrivateKey::generate();
        let signed = signer::sign_transaction(tx, &[key.clone()], chain.chain_id()).unwrap();
        assert_eq!(signed.signatures.len(), 1);

        // The signature must recover to the signing key.
        let digest = signed.transaction.signing_digest(chain.chain_id());
        assert_eq!(
            signed.signatures[0].recover(&digest).unwrap(),
            key.public_key()
        );

        // Decoding the canonical bytes reconstructs the envelope.
        let bytes = encode_to_vec(&signed.transaction);
        let mut reader = ByteReader::new(&bytes);
        let decoded = UnsignedTransaction::decode(&mut reader, chain.prefix()).unwrap();
        assert!(reader.is_empty());
        assert_eq!(decoded, signed.transaction);

        let Operation::Transfer(round_tripped) = &decoded.operations[0] else {
            panic!("expected a transfer operation");
        };
        assert_eq!(round_tripped.from, "alice");
        assert_eq!(round_tripped.to, "bob");
        assert_eq!(round_tripped.amount.to_string(), "10.00000 BWF");
        assert_eq!(round_tripped.fee.to_string(), "0.10000 W");
        assert_eq!(round_tripped.memo, "");
    }

    #[test]
    fn test_chain_id_separates_networks() {
        let now = Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap();
        let tx = assembler::assemble_at(&head(), now, 60, vec![transfer_op()]).unwrap();

        let mainnet = tx.signing_digest(ChainParams::mainnet().chain_id());
        let testnet = tx.signing_digest(ChainParams::testnet().chain_id());
        assert_ne!(mainnet, testnet);
    }

    #[test]
    fn test_wire_json_shape() {
        let now = Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap();
        let tx = assembler::assemble_at(&head(), now, 60, vec![transfer_op()]).unwrap();
        let key = PrivateKey::generate();
        let signed =
            signer::sign_transaction(tx, &[key], ChainParams::testnet().chain_id()).unwrap();

        let json = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["ref_block_num"], 0x8764);
        assert_eq!(json["expiration"], "2021-03-01T12:01:00");
        assert_eq!(json["extensions"], serde_json::json!([]));

        let op = &json["operations"][0];
        assert_eq!(op[0], "transfer");
        assert_eq!(op[1]["from"], "alice");
        assert_eq!(op[1]["amount"], "10.00000 BWF");

        let signature = json["signatures"][0].as_str().unwrap();
        assert_eq!(signature.len(), 130);
        assert!(hex::decode(signature).is_ok());
    }
}
