//! Client-constructible operations.
//!
//! One struct per operation kind, each owning its declared field order.
//! Binary form is `varint(id)` followed by the fields in that order;
//! JSON wire form is the `[name, {fields}]` pair the node expects.

use crate::authority::Authority;
use crate::errors::ProtocolError;
use crate::registry;
use bwc_codec::{ByteReader, WireDecode, WireEncode};
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use shared_crypto::PublicKey;
use shared_types::asset::SYMBOL_WIRE_LEN;
use shared_types::{validate_account_name, Asset, TypeError};

/// Leading character marking a memo as externally encrypted ciphertext.
///
/// Such memos are opaque to this client; the marker and everything after
/// it pass through untouched.
pub const MEMO_CIPHER_MARKER: char = '#';

/// Funds transfer between two accounts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transfer {
    /// Paying account.
    pub from: String,
    /// Receiving account.
    pub to: String,
    /// Amount to move.
    pub amount: Asset,
    /// Network fee.
    pub fee: Asset,
    /// Free-form memo; empty by default.
    pub memo: String,
}

impl Transfer {
    /// Build a transfer. A missing memo becomes the empty string.
    pub fn new(from: &str, to: &str, amount: Asset, fee: Asset, memo: Option<String>) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            amount,
            fee,
            memo: memo.unwrap_or_default(),
        }
    }

    /// Whether the memo carries externally produced ciphertext.
    pub fn has_encrypted_memo(&self) -> bool {
        self.memo.starts_with(MEMO_CIPHER_MARKER)
    }

    fn decode_fields(reader: &mut ByteReader<'_>) -> Result<Self, ProtocolError> {
        Ok(Self {
            from: String::decode(reader)?,
            to: String::decode(reader)?,
            amount: Asset::decode(reader)?,
            fee: Asset::decode(reader)?,
            memo: String::decode(reader)?,
        })
    }
}

impl WireEncode for Transfer {
    fn encode(&self, out: &mut Vec<u8>) {
        self.from.encode(out);
        self.to.encode(out);
        self.amount.encode(out);
        self.fee.encode(out);
        self.memo.encode(out);
    }
}

/// Conversion of liquid funds into vesting shares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferToVesting {
    /// Paying account.
    pub from: String,
    /// Account receiving the vesting shares.
    pub to: String,
    /// Liquid amount to vest.
    pub amount: Asset,
    /// Network fee.
    pub fee: Asset,
}

impl TransferToVesting {
    fn decode_fields(reader: &mut ByteReader<'_>) -> Result<Self, ProtocolError> {
        Ok(Self {
            from: String::decode(reader)?,
            to: String::decode(reader)?,
            amount: Asset::decode(reader)?,
            fee: Asset::decode(reader)?,
        })
    }
}

impl WireEncode for TransferToVesting {
    fn encode(&self, out: &mut Vec<u8>) {
        self.from.encode(out);
        self.to.encode(out);
        self.amount.encode(out);
        self.fee.encode(out);
    }
}

/// Start of a vesting withdrawal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawVesting {
    /// Withdrawing account.
    pub account: String,
    /// Vesting shares to withdraw.
    pub vesting_shares: Asset,
    /// Network fee.
    pub fee: Asset,
}

impl WithdrawVesting {
    fn decode_fields(reader: &mut ByteReader<'_>) -> Result<Self, ProtocolError> {
        Ok(Self {
            account: String::decode(reader)?,
            vesting_shares: Asset::decode(reader)?,
            fee: Asset::decode(reader)?,
        })
    }
}

impl WireEncode for WithdrawVesting {
    fn encode(&self, out: &mut Vec<u8>) {
        self.account.encode(out);
        self.vesting_shares.encode(out);
        self.fee.encode(out);
    }
}

/// Creation of a new account with its owner authority.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountCreate {
    /// Creation fee, paid by the creator.
    pub fee: Asset,
    /// Account paying for and signing the creation.
    pub creator: String,
    /// Name of the account being created.
    pub new_account_name: String,
    /// Owner authority of the new account.
    pub owner: Authority,
    /// JSON metadata text, or empty.
    pub json_metadata: String,
}

impl AccountCreate {
    /// Build an account creation. The new name must satisfy the chain's
    /// 3..=16 character account-name rules.
    pub fn new(
        fee: Asset,
        creator: &str,
        new_account_name: &str,
        owner: Authority,
        json_metadata: &str,
    ) -> Result<Self, ProtocolError> {
        validate_account_name(new_account_name)?;
        Ok(Self {
            fee,
            creator: creator.to_string(),
            new_account_name: new_account_name.to_string(),
            owner,
            json_metadata: json_metadata.to_string(),
        })
    }

    fn decode_fields(reader: &mut ByteReader<'_>, prefix: &str) -> Result<Self, ProtocolError> {
        Ok(Self {
            fee: Asset::decode(reader)?,
            creator: String::decode(reader)?,
            new_account_name: String::decode(reader)?,
            owner: Authority::decode(reader, prefix)?,
            json_metadata: String::decode(reader)?,
        })
    }
}

impl WireEncode for AccountCreate {
    fn encode(&self, out: &mut Vec<u8>) {
        self.fee.encode(out);
        self.creator.encode(out);
        self.new_account_name.encode(out);
        self.owner.encode(out);
        self.json_metadata.encode(out);
    }
}

/// Update of an existing account's owner authority and metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountUpdate {
    /// Account being updated.
    pub account: String,
    /// Replacement owner authority, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<Authority>,
    /// JSON metadata text, or empty.
    pub json_metadata: String,
    /// Network fee.
    pub fee: Asset,
}

impl AccountUpdate {
    fn decode_fields(reader: &mut ByteReader<'_>, prefix: &str) -> Result<Self, ProtocolError> {
        let account = String::decode(reader)?;
        let owner = match u8::decode(reader)? {
            0 => None,
            1 => Some(Authority::decode(reader, prefix)?),
            other => return Err(bwc_codec::CodecError::InvalidOptionTag(other).into()),
        };
        Ok(Self {
            account,
            owner,
            json_metadata: String::decode(reader)?,
            fee: Asset::decode(reader)?,
        })
    }
}

impl WireEncode for AccountUpdate {
    fn encode(&self, out: &mut Vec<u8>) {
        self.account.encode(out);
        self.owner.encode(out);
        self.json_metadata.encode(out);
        self.fee.encode(out);
    }
}

/// Registration or update of a supernode's block-signing key.
#[derive(Debug, Clone, PartialEq)]
pub struct SupernodeUpdate {
    /// The supernode account.
    pub owner: String,
    /// Key the supernode signs blocks with; the null key disables
    /// production.
    pub block_signing_key: PublicKey,
    /// Network fee.
    pub fee: Asset,
}

impl SupernodeUpdate {
    /// Build an update. Omitting the signing key publishes the null key.
    pub fn new(owner: &str, block_signing_key: Option<PublicKey>, fee: Asset) -> Self {
        Self {
            owner: owner.to_string(),
            block_signing_key: block_signing_key.unwrap_or_else(|| PublicKey::from_bytes([0; 33])),
            fee,
        }
    }

    fn decode_fields(reader: &mut ByteReader<'_>) -> Result<Self, ProtocolError> {
        Ok(Self {
            owner: String::decode(reader)?,
            block_signing_key: PublicKey::decode(reader)?,
            fee: Asset::decode(reader)?,
        })
    }
}

impl WireEncode for SupernodeUpdate {
    fn encode(&self, out: &mut Vec<u8>) {
        self.owner.encode(out);
        self.block_signing_key.encode(out);
        self.fee.encode(out);
    }
}

impl Serialize for SupernodeUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("SupernodeUpdate", 3)?;
        state.serialize_field("owner", &self.owner)?;
        // Keys travel as text in JSON; the mainnet prefix is the only one
        // in use on all known networks.
        state.serialize_field("block_signing_key", &self.block_signing_key.to_text("BEO"))?;
        state.serialize_field("fee", &self.fee)?;
        state.end()
    }
}

/// A vote for or against a supernode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountSupernodeVote {
    /// Voting account.
    pub account: String,
    /// Supernode being voted on.
    pub supernode: String,
    /// Approve or withdraw approval.
    pub approve: bool,
    /// Vote weight in micro-units.
    pub votes: i64,
    /// Network fee.
    pub fee: Asset,
}

impl AccountSupernodeVote {
    fn decode_fields(reader: &mut ByteReader<'_>) -> Result<Self, ProtocolError> {
        Ok(Self {
            account: String::decode(reader)?,
            supernode: String::decode(reader)?,
            approve: bool::decode(reader)?,
            votes: i64::decode(reader)?,
            fee: Asset::decode(reader)?,
        })
    }
}

impl WireEncode for AccountSupernodeVote {
    fn encode(&self, out: &mut Vec<u8>) {
        self.account.encode(out);
        self.supernode.encode(out);
        self.approve.encode(out);
        self.votes.encode(out);
        self.fee.encode(out);
    }
}

/// Symbol record of a smart-media token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmtSymbol {
    /// Decimal places of the token.
    pub decimals: u8,
    /// Token name, at most 9 bytes.
    pub name: String,
}

impl SmtSymbol {
    /// Build a symbol record, bounding the name to the wire field width.
    pub fn new(decimals: u8, name: &str) -> Result<Self, ProtocolError> {
        if name.len() > SYMBOL_WIRE_LEN {
            return Err(TypeError::SymbolTooLong(name.to_string()).into());
        }
        Ok(Self {
            decimals,
            name: name.to_string(),
        })
    }

    fn decode_fields(reader: &mut ByteReader<'_>) -> Result<Self, ProtocolError> {
        let decimals = u32::decode(reader)?;
        let decimals: u8 = decimals
            .try_into()
            .map_err(|_| bwc_codec::CodecError::PrecisionOutOfRange(decimals))?;
        let field = reader.read_exact(SYMBOL_WIRE_LEN)?;
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        if field[end..].iter().any(|&b| b != 0) {
            return Err(bwc_codec::CodecError::InvalidSymbol.into());
        }
        let name = std::str::from_utf8(&field[..end])
            .map_err(|_| bwc_codec::CodecError::InvalidSymbol)?;
        Self::new(decimals, name)
    }
}

/// Decimals widen to 4 bytes on the wire; the name pads to 9.
impl WireEncode for SmtSymbol {
    fn encode(&self, out: &mut Vec<u8>) {
        u32::from(self.decimals).encode(out);
        let mut name = [0u8; SYMBOL_WIRE_LEN];
        name[..self.name.len()].copy_from_slice(self.name.as_bytes());
        out.extend_from_slice(&name);
    }
}

/// Creation of a smart-media token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmtCreate {
    /// Account controlling the token.
    pub control_account: String,
    /// The token's symbol record.
    pub symbol: SmtSymbol,
    /// Account paying the creation fee.
    pub creator: String,
    /// Token creation fee.
    pub smt_creation_fee: Asset,
    /// Decimal precision of the token.
    pub precision: u8,
    /// Reserved for forward compatibility; always empty today.
    pub extensions: Vec<String>,
    /// Maximum token supply in micro-units.
    pub max_supply: u64,
}

impl SmtCreate {
    fn decode_fields(reader: &mut ByteReader<'_>) -> Result<Self, ProtocolError> {
        Ok(Self {
            control_account: String::decode(reader)?,
            symbol: SmtSymbol::decode_fields(reader)?,
            creator: String::decode(reader)?,
            smt_creation_fee: Asset::decode(reader)?,
            precision: u8::decode(reader)?,
            extensions: Vec::<String>::decode(reader)?,
            max_supply: u64::decode(reader)?,
        })
    }
}

impl WireEncode for SmtCreate {
    fn encode(&self, out: &mut Vec<u8>) {
        self.control_account.encode(out);
        self.symbol.encode(out);
        self.creator.encode(out);
        self.smt_creation_fee.encode(out);
        self.precision.encode(out);
        self.extensions.encode(out);
        self.max_supply.encode(out);
    }
}

/// The closed set of client-constructible operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Funds transfer.
    Transfer(Transfer),
    /// Vesting deposit.
    TransferToVesting(TransferToVesting),
    /// Vesting withdrawal.
    WithdrawVesting(WithdrawVesting),
    /// Account creation.
    AccountCreate(AccountCreate),
    /// Account update.
    AccountUpdate(AccountUpdate),
    /// Supernode key update.
    SupernodeUpdate(SupernodeUpdate),
    /// Supernode vote.
    AccountSupernodeVote(AccountSupernodeVote),
    /// Token creation.
    SmtCreate(SmtCreate),
}

impl Operation {
    /// Registry name of this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Transfer(_) => "transfer",
            Operation::TransferToVesting(_) => "transfer_to_vesting",
            Operation::WithdrawVesting(_) => "withdraw_vesting",
            Operation::AccountCreate(_) => "account_create",
            Operation::AccountUpdate(_) => "account_update",
            Operation::SupernodeUpdate(_) => "supernode_update",
            Operation::AccountSupernodeVote(_) => "account_supernode_vote",
            Operation::SmtCreate(_) => "smt_create",
        }
    }

    /// Registry id of this operation.
    ///
    /// # Panics
    ///
    /// This function will not panic: every variant's name is in the
    /// registry table by construction.
    pub fn id(&self) -> u64 {
        registry::id_for(self.name()).unwrap_or_else(|_| unreachable!())
    }

    /// Decode one operation: varint id, then the fields of that kind.
    pub fn decode(reader: &mut ByteReader<'_>, prefix: &str) -> Result<Self, ProtocolError> {
        let id = bwc_codec::varint::read_varint(reader)?;
        let name = registry::name_for(id)?;
        if registry::is_virtual(id) {
            return Err(ProtocolError::VirtualOperation(name.to_string()));
        }
        Ok(match name {
            "transfer" => Operation::Transfer(Transfer::decode_fields(reader)?),
            "transfer_to_vesting" => {
                Operation::TransferToVesting(TransferToVesting::decode_fields(reader)?)
            }
            "withdraw_vesting" => {
                Operation::WithdrawVesting(WithdrawVesting::decode_fields(reader)?)
            }
            "account_create" => {
                Operation::AccountCreate(AccountCreate::decode_fields(reader, prefix)?)
            }
            "account_update" => {
                Operation::AccountUpdate(AccountUpdate::decode_fields(reader, prefix)?)
            }
            "supernode_update" => {
                Operation::SupernodeUpdate(SupernodeUpdate::decode_fields(reader)?)
            }
            "account_supernode_vote" => {
                Operation::AccountSupernodeVote(AccountSupernodeVote::decode_fields(reader)?)
            }
            "smt_create" => Operation::SmtCreate(SmtCreate::decode_fields(reader)?),
            _ => return Err(ProtocolError::UnknownOperation(name.to_string())),
        })
    }
}

/// `varint(id)` then the fields in declared order.
impl WireEncode for Operation {
    fn encode(&self, out: &mut Vec<u8>) {
        bwc_codec::varint::write_varint(out, self.id());
        match self {
            Operation::Transfer(op) => op.encode(out),
            Operation::TransferToVesting(op) => op.encode(out),
            Operation::WithdrawVesting(op) => op.encode(out),
            Operation::AccountCreate(op) => op.encode(out),
            Operation::AccountUpdate(op) => op.encode(out),
            Operation::SupernodeUpdate(op) => op.encode(out),
            Operation::AccountSupernodeVote(op) => op.encode(out),
            Operation::SmtCreate(op) => op.encode(out),
        }
    }
}

/// JSON wire form: `[name, {fields}]`.
impl Serialize for Operation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(2))?;
        seq.serialize_element(self.name())?;
        match self {
            Operation::Transfer(op) => seq.serialize_element(op)?,
            Operation::TransferToVesting(op) => seq.serialize_element(op)?,
            Operation::WithdrawVesting(op) => seq.serialize_element(op)?,
            Operation::AccountCreate(op) => seq.serialize_element(op)?,
            Operation::AccountUpdate(op) => seq.serialize_element(op)?,
            Operation::SupernodeUpdate(op) => seq.serialize_element(op)?,
            Operation::AccountSupernodeVote(op) => seq.serialize_element(op)?,
            Operation::SmtCreate(op) => seq.serialize_element(op)?,
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bwc_codec::encode_to_vec;
    use shared_crypto::PrivateKey;
    use shared_types::SymbolTable;

    fn asset(s: &str) -> Asset {
        Asset::parse(s, &SymbolTable::default()).unwrap()
    }

    fn round_trip(op: Operation) {
        let bytes = encode_to_vec(&op);
        let mut reader = ByteReader::new(&bytes);
        let decoded = Operation::decode(&mut reader, "BEO").unwrap();
        assert!(reader.is_empty(), "{} left trailing bytes", op.name());
        assert_eq!(decoded, op);
    }

    #[test]
    fn test_transfer_round_trip() {
        round_trip(Operation::Transfer(Transfer::new(
            "alice",
            "bob",
            asset("10.00000 BWF"),
            asset("0.10000 W"),
            Some("thanks".to_string()),
        )));
    }

    #[test]
    fn test_transfer_defaults_to_empty_memo() {
        let op = Transfer::new("a-ok", "bob", asset("1.00000 BWF"), asset("0.10000 W"), None);
        assert_eq!(op.memo, "");
        assert!(!op.has_encrypted_memo());
        round_trip(Operation::Transfer(op));
    }

    #[test]
    fn test_encrypted_memo_marker() {
        let op = Transfer::new(
            "alice",
            "bob",
            asset("1.00000 BWF"),
            asset("0.10000 W"),
            Some("#deadbeefciphertext".to_string()),
        );
        assert!(op.has_encrypted_memo());
    }

    #[test]
    fn test_transfer_wire_prefixes_id_zero() {
        let op = Operation::Transfer(Transfer::new(
            "alice",
            "bob",
            asset("1.00000 BWF"),
            asset("0.10000 W"),
            None,
        ));
        let bytes = encode_to_vec(&op);
        assert_eq!(bytes[0], 0); // transfer id
        assert_eq!(bytes[1], 5); // varint length of "alice"
        assert_eq!(&bytes[2..7], b"alice");
    }

    #[test]
    fn test_vesting_ops_round_trip() {
        round_trip(Operation::TransferToVesting(TransferToVesting {
            from: "alice".into(),
            to: "alice".into(),
            amount: asset("5.00000 BWF"),
            fee: asset("0.10000 W"),
        }));
        round_trip(Operation::WithdrawVesting(WithdrawVesting {
            account: "alice".into(),
            vesting_shares: asset("5.00000 M"),
            fee: asset("0.10000 W"),
        }));
    }

    #[test]
    fn test_account_create_round_trip_and_validation() {
        let owner = Authority::single_key(
            PrivateKey::from_bytes([9; 32]).unwrap().public_key(),
            "BEO",
        );
        let op = AccountCreate::new(
            asset("1.00000 BWF"),
            "alice",
            "newaccount",
            owner.clone(),
            "{}",
        )
        .unwrap();
        round_trip(Operation::AccountCreate(op));

        assert!(AccountCreate::new(asset("1.00000 BWF"), "alice", "ab", owner, "").is_err());
    }

    #[test]
    fn test_account_update_optional_owner() {
        let with_owner = AccountUpdate {
            account: "alice".into(),
            owner: Some(Authority::single_key(
                PrivateKey::from_bytes([7; 32]).unwrap().public_key(),
                "BEO",
            )),
            json_metadata: String::new(),
            fee: asset("0.10000 W"),
        };
        let without_owner = AccountUpdate {
            owner: None,
            ..with_owner.clone()
        };
        round_trip(Operation::AccountUpdate(with_owner));
        round_trip(Operation::AccountUpdate(without_owner.clone()));

        // Empty optional serializes as a single absent byte.
        let bytes = encode_to_vec(&without_owner);
        assert_eq!(bytes[6], 0);
    }

    #[test]
    fn test_supernode_update_defaults_to_null_key() {
        let op = SupernodeUpdate::new("supernode1", None, asset("0.10000 W"));
        assert!(op.block_signing_key.is_null());
        round_trip(Operation::SupernodeUpdate(op.clone()));

        let json = serde_json::to_value(Operation::SupernodeUpdate(op)).unwrap();
        assert_eq!(
            json[1]["block_signing_key"],
            "BEO1111111111111111111111111111111114T1Anm"
        );
    }

    #[test]
    fn test_supernode_vote_round_trip() {
        round_trip(Operation::AccountSupernodeVote(AccountSupernodeVote {
            account: "alice".into(),
            supernode: "supernode1".into(),
            approve: true,
            votes: 1_000_000,
            fee: asset("0.10000 W"),
        }));
    }

    #[test]
    fn test_smt_create_round_trip() {
        round_trip(Operation::SmtCreate(SmtCreate {
            control_account: "alice".into(),
            symbol: SmtSymbol::new(3, "GOLD").unwrap(),
            creator: "alice".into(),
            smt_creation_fee: asset("10.00000 W"),
            precision: 3,
            extensions: Vec::new(),
            max_supply: 1_000_000_000,
        }));
    }

    #[test]
    fn test_smt_symbol_name_bounded() {
        assert!(SmtSymbol::new(0, "TOOLONGNAME").is_err());
    }

    #[test]
    fn test_smt_symbol_rejects_bytes_after_nul() {
        let mut bytes = Vec::new();
        3u32.encode(&mut bytes);
        bytes.extend_from_slice(b"GOLD\0\0\0\0\0");
        let mut reader = ByteReader::new(&bytes);
        assert!(SmtSymbol::decode_fields(&mut reader).is_ok());

        let mut bytes = Vec::new();
        3u32.encode(&mut bytes);
        bytes.extend_from_slice(b"GOLD\0X\0\0\0");
        let mut reader = ByteReader::new(&bytes);
        assert!(SmtSymbol::decode_fields(&mut reader).is_err());
    }

    #[test]
    fn test_virtual_operation_rejected_on_decode() {
        let bytes = [10u8]; // hardfork
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            Operation::decode(&mut reader, "BEO"),
            Err(ProtocolError::VirtualOperation(name)) if name == "hardfork"
        ));
    }

    #[test]
    fn test_unknown_id_rejected_on_decode() {
        let bytes = [42u8];
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            Operation::decode(&mut reader, "BEO"),
            Err(ProtocolError::UnknownOperationId(42))
        ));
    }

    #[test]
    fn test_json_pair_shape() {
        let op = Operation::Transfer(Transfer::new(
            "alice",
            "bob",
            asset("10.00000 BWF"),
            asset("0.10000 W"),
            None,
        ));
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json[0], "transfer");
        assert_eq!(json[1]["from"], "alice");
        assert_eq!(json[1]["amount"], "10.00000 BWF");
        assert_eq!(json[1]["fee"], "0.10000 W");
        assert_eq!(json[1]["memo"], "");
    }
}
