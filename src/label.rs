//! Account labels
//!
//! Loose accounts get a short tag next to their name in the selector.
//! Hardware and imported labels are known from the keyring alone; contract
//! accounts need a metadata lookup to tell a proxy from a plain contract.

use crate::error::AccountError;
use crate::host::AccountActions;
use crate::keyring::{is_loose_account, Keyring, KeyringKind};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountLabel {
    Imported,
    Hardware,
    Contract,
    Proxy,
}

impl AccountLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Imported => "Imported",
            Self::Hardware => "Hardware",
            Self::Contract => "Contract",
            Self::Proxy => "Proxy",
        }
    }
}

impl fmt::Display for AccountLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address → label, last write wins
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    labels: HashMap<String, AccountLabel>,
}

impl LabelMap {
    pub fn get(&self, address: &str) -> Option<AccountLabel> {
        self.labels.get(address).copied()
    }

    pub fn insert(&mut self, address: impl Into<String>, label: AccountLabel) {
        self.labels.insert(address.into(), label);
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Resolve the label for `address` held by `keyring`.
///
/// Returns `Ok(None)` for seed-derived accounts. Only contract keyrings
/// touch the host; a failed lookup is returned as an error for the caller
/// to treat as "label unknown".
pub async fn resolve_label<A>(
    actions: &A,
    keyring: &Keyring,
    address: &str,
    proxy_type: &str,
) -> Result<Option<AccountLabel>, AccountError>
where
    A: AccountActions + ?Sized,
{
    if !is_loose_account(keyring) {
        return Ok(None);
    }

    let label = match keyring.kind() {
        KeyringKind::Contract => {
            let metadata = actions
                .get_contract_metadata(address)
                .await
                .map_err(AccountError::Metadata)?;
            if metadata.is_proxy(proxy_type) {
                AccountLabel::Proxy
            } else {
                AccountLabel::Contract
            }
        }
        KeyringKind::Hardware(_) => AccountLabel::Hardware,
        KeyringKind::Imported | KeyringKind::Standard => AccountLabel::Imported,
    };

    Ok(Some(label))
}
