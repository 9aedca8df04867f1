//! The closed, versioned operation-id table.
//!
//! Ids are assigned by position and are stable for the lifetime of the
//! protocol; the table is append-only. Virtual operations are reported by
//! the chain inside blocks but are never client-constructed.

use crate::errors::ProtocolError;

struct Entry {
    name: &'static str,
    virtual_op: bool,
}

const OPERATIONS: &[Entry] = &[
    Entry { name: "transfer", virtual_op: false },
    Entry { name: "transfer_to_vesting", virtual_op: false },
    Entry { name: "withdraw_vesting", virtual_op: false },
    Entry { name: "account_create", virtual_op: false },
    Entry { name: "account_update", virtual_op: false },
    Entry { name: "supernode_update", virtual_op: false },
    Entry { name: "account_supernode_vote", virtual_op: false },
    Entry { name: "smt_create", virtual_op: false },
    Entry { name: "fill_vesting_withdraw", virtual_op: true },
    Entry { name: "shutdown_supernode", virtual_op: true },
    Entry { name: "hardfork", virtual_op: true },
    Entry { name: "producer_reward", virtual_op: true },
    Entry { name: "clear_null_account_balance", virtual_op: true },
];

/// Id of a symbolic operation name. Unknown names are a hard error,
/// never coerced.
pub fn id_for(name: &str) -> Result<u64, ProtocolError> {
    OPERATIONS
        .iter()
        .position(|entry| entry.name == name)
        .map(|id| id as u64)
        .ok_or_else(|| ProtocolError::UnknownOperation(name.to_string()))
}

/// Name of an operation id.
pub fn name_for(id: u64) -> Result<&'static str, ProtocolError> {
    OPERATIONS
        .get(usize::try_from(id).map_err(|_| ProtocolError::UnknownOperationId(id))?)
        .map(|entry| entry.name)
        .ok_or(ProtocolError::UnknownOperationId(id))
}

/// Whether the id names a chain-reported virtual operation.
pub fn is_virtual(id: u64) -> bool {
    usize::try_from(id)
        .ok()
        .and_then(|i| OPERATIONS.get(i))
        .map(|entry| entry.virtual_op)
        .unwrap_or(false)
}
