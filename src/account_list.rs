//! Account list building
//!
//! Flattens the keyring list into the ordered list of addresses shown in the
//! selector. Keyring order and per-keyring account order are preserved.
//!
//! An address held by two visible keyrings is listed twice. That matches
//! what the wallet has always shown; whether it is intended is unclear, so
//! it is logged rather than silently de-duplicated.

use crate::keyring::{is_loose_account, Keyring, KeyringKind, Snapshot};
use crate::label::{AccountLabel, LabelMap};
use std::collections::HashSet;

/// Visible `(keyring, address)` pairs in display order
pub fn visible_accounts<'a>(
    keyrings: &'a [Keyring],
    network: &'a str,
) -> impl Iterator<Item = (&'a Keyring, &'a str)> + 'a {
    keyrings
        .iter()
        .filter(move |kr| kr.is_visible_on(network))
        .flat_map(|kr| kr.accounts.iter().map(move |a| (kr, a.as_str())))
}

/// Ordered list of addresses visible on `network`. Computed fresh on every
/// call.
pub fn build_account_list(keyrings: &[Keyring], network: &str) -> Vec<String> {
    let list: Vec<String> = visible_accounts(keyrings, network)
        .map(|(_, address)| address.to_string())
        .collect();

    let mut seen = HashSet::with_capacity(list.len());
    for address in &list {
        if !seen.insert(address.as_str()) {
            log::debug!("Address {} is listed by more than one keyring", address);
        }
    }

    list
}

/// One rendered entry of the account selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub address: String,
    pub name: String,
    pub label: Option<AccountLabel>,
    pub kind: KeyringKind,
    pub selected: bool,
    /// Loose accounts can be removed from the wallet
    pub removable: bool,
}

/// Join the visible account list with identities and resolved labels.
///
/// Addresses without an identity are skipped.
pub fn build_rows(snapshot: &Snapshot, labels: &LabelMap) -> Vec<AccountRow> {
    visible_accounts(&snapshot.keyrings, &snapshot.network)
        .filter_map(|(keyring, address)| {
            let Some(identity) = snapshot.identities.get(address) else {
                log::debug!("No identity for {}, skipping row", address);
                return None;
            };
            Some(AccountRow {
                address: address.to_string(),
                name: identity.name.clone(),
                label: labels.get(address),
                kind: keyring.kind(),
                selected: snapshot.selected_address.as_deref() == Some(address),
                removable: is_loose_account(keyring),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyring::{tags, Identity};

    fn hd(accounts: &[&str]) -> Keyring {
        Keyring::new(tags::HD_KEY_TREE, accounts.iter().map(|a| a.to_string()).collect())
    }

    fn contract(network: &str, accounts: &[&str]) -> Keyring {
        Keyring::contract(network, accounts.iter().map(|a| a.to_string()).collect())
    }

    #[test]
    fn test_contract_on_other_network_is_excluded() {
        let keyrings = vec![contract("1", &["0xA"]), Keyring::new("standard", vec!["0xB".into()])];
        assert_eq!(build_account_list(&keyrings, "3"), vec!["0xB".to_string()]);
    }

    #[test]
    fn test_contract_on_active_network_is_included() {
        let keyrings = vec![hd(&["0x1"]), contract("3", &["0xA", "0xB"])];
        assert_eq!(build_account_list(&keyrings, "3"), vec!["0x1", "0xA", "0xB"]);
    }

    #[test]
    fn test_non_contract_keyrings_ignore_network() {
        let keyrings = vec![
            hd(&["0x1", "0x2"]),
            Keyring::new(tags::SIMPLE_KEY_PAIR, vec!["0x3".into()]),
            Keyring::new(tags::LEDGER_HARDWARE, vec!["0x4".into()]),
        ];
        for network in ["1", "3", "99", ""] {
            assert_eq!(build_account_list(&keyrings, network), vec!["0x1", "0x2", "0x3", "0x4"]);
        }
    }

    #[test]
    fn test_order_is_preserved() {
        let keyrings = vec![
            Keyring::new(tags::SIMPLE_KEY_PAIR, vec!["0xZ".into(), "0xY".into()]),
            hd(&["0xB", "0xA"]),
        ];
        assert_eq!(build_account_list(&keyrings, "1"), vec!["0xZ", "0xY", "0xB", "0xA"]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let keyrings = vec![hd(&["0xA"]), Keyring::new(tags::SIMPLE_KEY_PAIR, vec!["0xA".into()])];
        assert_eq!(build_account_list(&keyrings, "1"), vec!["0xA", "0xA"]);
    }

    #[test]
    fn test_rows_skip_missing_identities() {
        let mut snapshot = Snapshot {
            keyrings: vec![hd(&["0xA", "0xB"]), Keyring::new(tags::SIMPLE_KEY_PAIR, vec!["0xC".into()])],
            selected_address: Some("0xC".into()),
            network: "1".into(),
            ..Default::default()
        };
        snapshot.identities.insert("0xA".into(), Identity::new("0xA", "Account 1"));
        snapshot.identities.insert("0xC".into(), Identity::new("0xC", "Imported"));

        let mut labels = LabelMap::default();
        labels.insert("0xC", AccountLabel::Imported);

        let rows = build_rows(&snapshot, &labels);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].address, "0xA");
        assert!(!rows[0].selected);
        assert!(!rows[0].removable);
        assert_eq!(rows[1].label, Some(AccountLabel::Imported));
        assert!(rows[1].selected);
        assert!(rows[1].removable);
    }
}
