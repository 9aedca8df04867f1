//! Depth-bounded signer resolution.

use crate::errors::AuthorityError;
use crate::ports::{AccountDirectory, KeyLookup, Role};
use bwc_protocol::Authority;
use shared_crypto::{PrivateKey, PublicKey};

/// Default delegation bound: the account itself plus one level of
/// delegated accounts, mirroring the chain's own bounded indirection.
pub const DEFAULT_MAX_DEPTH: u32 = 2;

/// Outcome of a successful resolution.
#[derive(Debug)]
pub struct ResolvedSigners {
    /// Matched private keys, in resolution order.
    pub keys: Vec<PrivateKey>,
    /// Combined weight the keys contribute to the root threshold.
    pub weight: u32,
}

/// Resolve the private keys needed to satisfy `authority`.
///
/// Collects directly matched keys first; while the threshold is unmet,
/// descends one delegation level at a time, fetching each delegated
/// account's same-role authority. A key matched at any level counts once,
/// with the weight its own authority entry assigns it.
///
/// Fails with [`AuthorityError::QuorumUnreachable`] when the reachable
/// weight never meets the threshold; no partial result is returned.
pub async fn resolve_signers<K, D>(
    account: &str,
    authority: &Authority,
    keys: &K,
    directory: &D,
    role: Role,
    max_depth: u32,
) -> Result<ResolvedSigners, AuthorityError>
where
    K: KeyLookup + ?Sized,
    D: AccountDirectory + ?Sized,
{
    let threshold = authority.weight_threshold();
    let mut matched: Vec<PrivateKey> = Vec::new();
    let mut seen: Vec<PublicKey> = Vec::new();
    let mut reached: u32 = 0;

    let mut frontier: Vec<Authority> = vec![authority.clone()];
    for depth in 0..max_depth {
        for level_authority in &frontier {
            for (public, weight) in level_authority.key_auths() {
                if seen.contains(public) {
                    continue;
                }
                if let Some(private) = keys.private_key_for(public) {
                    seen.push(*public);
                    matched.push(private);
                    reached += u32::from(*weight);
                }
            }
        }
        if reached >= threshold {
            break;
        }
        if depth + 1 == max_depth {
            break;
        }

        let mut next = Vec::new();
        for level_authority in &frontier {
            for (delegate, _) in level_authority.account_auths() {
                match directory.get_authority(delegate, role).await? {
                    Some(delegated) => next.push(delegated),
                    None => {
                        tracing::warn!(account = %delegate, "delegated account not found, skipping");
                    }
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    if reached < threshold {
        tracing::debug!(
            account,
            threshold,
            reached,
            "authority resolution fell short of quorum"
        );
        return Err(AuthorityError::QuorumUnreachable {
            account: account.to_string(),
            threshold,
            reached,
        });
    }
    Ok(ResolvedSigners {
        keys: matched,
        weight: reached,
    })
}

/// Public keys that could satisfy `authority`, in textual form, for
/// out-of-process signing: the direct keys plus one recursion into each
/// delegated account.
pub async fn required_public_keys<D>(
    authority: &Authority,
    directory: &D,
    role: Role,
) -> Result<Vec<String>, AuthorityError>
where
    D: AccountDirectory + ?Sized,
{
    let prefix = authority.prefix().to_string();
    let mut keys: Vec<String> = authority
        .key_auths()
        .iter()
        .map(|(public, _)| public.to_text(&prefix))
        .collect();
    for (delegate, _) in authority.account_auths() {
        if let Some(delegated) = directory.get_authority(delegate, role).await? {
            keys.extend(
                delegated
                    .key_auths()
                    .iter()
                    .map(|(public, _)| public.to_text(&prefix)),
            );
        }
    }
    Ok(keys)
}

/// The authorities an external signer must satisfy, keyed by account:
/// `account`'s own authority plus each delegated account's, one
/// recursion deep. Delegates missing from the directory are skipped.
pub async fn required_authorities<D>(
    account: &str,
    authority: &Authority,
    directory: &D,
    role: Role,
) -> Result<Vec<(String, Authority)>, AuthorityError>
where
    D: AccountDirectory + ?Sized,
{
    let mut authorities = vec![(account.to_string(), authority.clone())];
    for (delegate, _) in authority.account_auths() {
        if let Some(delegated) = directory.get_authority(delegate, role).await? {
            authorities.push((delegate.clone(), delegated));
        }
    }
    Ok(authorities)
}
