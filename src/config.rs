/// Dropdown configuration from environment variables
///
/// Controls the proxy contract sentinel and the derivation paths tried
/// when unlocking hardware accounts.

use crate::keyring::HardwareDevice;
use std::env;

pub const DEFAULT_PROXY_CONTRACT_TYPE: &str = "OwnedUpgradeabilityProxy";

/// Primary and fallback derivation path for one device family
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HdPaths {
    pub primary: String,
    pub fallback: String,
}

impl HdPaths {
    pub fn new(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback: fallback.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownConfig {
    /// Contract type that marks a proxy contract
    pub proxy_contract_type: String,
    pub ledger_paths: HdPaths,
    pub trezor_paths: HdPaths,
}

impl DropdownConfig {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `PROXY_CONTRACT_TYPE`: proxy sentinel (default `OwnedUpgradeabilityProxy`)
    /// - `LEDGER_HD_PATH`, `LEDGER_FALLBACK_HD_PATH`
    /// - `TREZOR_HD_PATH`, `TREZOR_FALLBACK_HD_PATH`
    ///
    /// Unset or blank values keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let proxy_contract_type = read_var("PROXY_CONTRACT_TYPE", &defaults.proxy_contract_type);
        if proxy_contract_type != defaults.proxy_contract_type {
            log::info!("🔧 Proxy contract type: {}", proxy_contract_type);
        }

        let ledger_paths = HdPaths::new(
            read_var("LEDGER_HD_PATH", &defaults.ledger_paths.primary),
            read_var("LEDGER_FALLBACK_HD_PATH", &defaults.ledger_paths.fallback),
        );
        let trezor_paths = HdPaths::new(
            read_var("TREZOR_HD_PATH", &defaults.trezor_paths.primary),
            read_var("TREZOR_FALLBACK_HD_PATH", &defaults.trezor_paths.fallback),
        );
        log::debug!("Ledger paths: {:?}, Trezor paths: {:?}", ledger_paths, trezor_paths);

        Self {
            proxy_contract_type,
            ledger_paths,
            trezor_paths,
        }
    }

    /// Derivation paths to try for `device`
    pub fn hd_paths(&self, device: HardwareDevice) -> &HdPaths {
        match device {
            HardwareDevice::Ledger => &self.ledger_paths,
            HardwareDevice::Trezor => &self.trezor_paths,
        }
    }
}

fn read_var(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        Ok(_) => {
            log::warn!("⚠️  {} is blank, using default '{}'", key, default);
            default.to_string()
        }
        Err(_) => default.to_string(),
    }
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            proxy_contract_type: DEFAULT_PROXY_CONTRACT_TYPE.to_string(),
            // Ledger Live layout first, then the legacy MEW layout
            ledger_paths: HdPaths::new("m/44'/60'/0'/0/0", "m/44'/60'/0'"),
            trezor_paths: HdPaths::new("m/44'/60'/0'/0", "m/44'/60'/0'"),
        }
    }
}
