//! Keyrings, identities and the host snapshot
//!
//! A keyring is one account-management backend (seed phrase, imported key,
//! hardware device, observed contract). Keyrings arrive from the host as
//! loosely typed records tagged with a `type` string; this module turns that
//! tag into a closed [`KeyringKind`] once, so nothing downstream compares
//! strings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Keyring type tags used by the wallet store
pub mod tags {
    pub const HD_KEY_TREE: &str = "HD Key Tree";
    pub const SIMPLE_KEY_PAIR: &str = "Simple Key Pair";
    pub const LEDGER_HARDWARE: &str = "Ledger Hardware";
    pub const TREZOR_HARDWARE: &str = "Trezor Hardware";
    pub const SIMPLE_ADDRESS: &str = "Simple Address";
}

/// Hardware signer families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HardwareDevice {
    Ledger,
    Trezor,
}

impl HardwareDevice {
    /// Device name as the host's connect action expects it
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ledger => "ledger",
            Self::Trezor => "trezor",
        }
    }
}

impl fmt::Display for HardwareDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed classification of a keyring's type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyringKind {
    /// Seed-derived accounts (and any tag we don't recognise)
    #[default]
    Standard,
    /// User-supplied private key
    Imported,
    Hardware(HardwareDevice),
    /// Observed contract, bound to one network
    Contract,
}

impl KeyringKind {
    /// Map a raw type tag to a kind. Unknown tags are standard.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            tags::SIMPLE_KEY_PAIR => Self::Imported,
            tags::LEDGER_HARDWARE => Self::Hardware(HardwareDevice::Ledger),
            tags::TREZOR_HARDWARE => Self::Hardware(HardwareDevice::Trezor),
            tags::SIMPLE_ADDRESS => Self::Contract,
            _ => Self::Standard,
        }
    }
}

/// Flags produced by [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub is_contract: bool,
    pub is_hardware: bool,
    pub is_imported: bool,
}

/// One account-management backend, as supplied by the host store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyring {
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Only meaningful for contract keyrings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default)]
    pub accounts: Vec<String>,
}

impl Keyring {
    pub fn new(type_tag: impl Into<String>, accounts: Vec<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            network: None,
            accounts,
        }
    }

    /// Contract keyring observed on `network`
    pub fn contract(network: impl Into<String>, accounts: Vec<String>) -> Self {
        Self {
            type_tag: tags::SIMPLE_ADDRESS.to_string(),
            network: Some(network.into()),
            accounts,
        }
    }

    pub fn kind(&self) -> KeyringKind {
        KeyringKind::from_tag(&self.type_tag)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.accounts.iter().any(|a| a == address)
    }

    /// Whether this keyring's accounts are visible on `network`.
    ///
    /// Contract keyrings require an exact network match; every other kind
    /// is network-agnostic.
    pub fn is_visible_on(&self, network: &str) -> bool {
        match self.kind() {
            KeyringKind::Contract => self.network.as_deref() == Some(network),
            _ => true,
        }
    }
}

/// Classify a keyring by its type tag
pub fn classify(keyring: &Keyring) -> Classification {
    match keyring.kind() {
        KeyringKind::Standard => Classification::default(),
        KeyringKind::Imported => Classification {
            is_imported: true,
            ..Default::default()
        },
        KeyringKind::Hardware(_) => Classification {
            is_hardware: true,
            ..Default::default()
        },
        KeyringKind::Contract => Classification {
            is_contract: true,
            ..Default::default()
        },
    }
}

/// True when the account was not derived from the wallet seed: imported
/// keys, hardware accounts and observed contracts. Gates the remove-account
/// affordance and label resolution.
pub fn is_loose_account(keyring: &Keyring) -> bool {
    keyring.kind() != KeyringKind::Standard
}

/// Display metadata for an address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub address: String,
    #[serde(default)]
    pub name: String,
}

impl Identity {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }
}

/// Read-only view of the host store that drives the dropdown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub identities: HashMap<String, Identity>,
    #[serde(default)]
    pub keyrings: Vec<Keyring>,
    #[serde(default)]
    pub selected_address: Option<String>,
    pub network: String,
}

impl Snapshot {
    /// First visible keyring holding `address` on the active network
    pub fn keyring_for(&self, address: &str) -> Option<&Keyring> {
        self.keyrings
            .iter()
            .filter(|kr| kr.is_visible_on(&self.network))
            .find(|kr| kr.contains(address))
    }

    /// First account visible on the active network, used when the selection
    /// stops being valid
    pub fn default_address(&self) -> Option<&str> {
        self.keyrings
            .iter()
            .filter(|kr| kr.is_visible_on(&self.network))
            .find_map(|kr| kr.accounts.first())
            .map(String::as_str)
    }
}
