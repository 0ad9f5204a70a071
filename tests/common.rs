//! Common test utilities for account selector integration tests
//!
//! This module provides shared test infrastructure including:
//! - A recording mock host with scripted metadata and hardware responses
//! - Gates that hold metadata lookups until a test releases them
//! - Snapshot builders
#![allow(dead_code)]

use account_selector::keyring::tags;
use account_selector::{
    AccountActions, Clipboard, ContractMetadata, HardwareDevice, HostError, Identity, Keyring,
    Snapshot, UrlOpener,
};
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

pub const PROXY_TYPE: &str = "OwnedUpgradeabilityProxy";

pub fn init_logging() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init()
        .ok();
}

/// Everything the mock host was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ShowAccountDetail(String),
    AddNewAccount,
    ShowImportPage,
    ShowConnectHardwarePage,
    ConnectHardware {
        device: HardwareDevice,
        hd_path: String,
        address: String,
    },
    Warning(String),
    Toast(String),
    GetContractMetadata(String),
    ShowDeleteImportedAccount(String),
    RequestAccountExport(String),
    UpdateAbi {
        address: String,
        network: String,
        abi: serde_json::Value,
    },
    Copy(String),
    OpenUrl(String),
}

#[derive(Default)]
pub struct MockHost {
    calls: Mutex<Vec<Call>>,
    metadata: Mutex<HashMap<String, Result<ContractMetadata, HostError>>>,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    hardware: Mutex<HashMap<String, Result<(), HostError>>>,
}

impl MockHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Script the metadata response for `address`
    pub fn set_metadata(&self, address: &str, result: Result<ContractMetadata, HostError>) {
        self.metadata
            .lock()
            .unwrap()
            .insert(address.to_string(), result);
    }

    pub fn set_contract_type(&self, address: &str, contract_type: &str) {
        self.set_metadata(
            address,
            Ok(ContractMetadata {
                abi: serde_json::json!([{ "type": "function", "name": contract_type }]),
                contract_type: Some(contract_type.to_string()),
            }),
        );
    }

    /// Hold metadata lookups for `address` until [`MockHost::release`]
    pub fn gate(&self, address: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(address.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, address: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(address) {
            gate.close();
        }
    }

    /// Script the hardware connect response for `hd_path`
    pub fn set_hardware_result(&self, hd_path: &str, result: Result<(), HostError>) {
        self.hardware
            .lock()
            .unwrap()
            .insert(hd_path.to_string(), result);
    }
}

impl AccountActions for MockHost {
    fn show_account_detail(&self, address: &str) {
        self.record(Call::ShowAccountDetail(address.to_string()));
    }

    fn add_new_account(&self) {
        self.record(Call::AddNewAccount);
    }

    fn show_import_page(&self) {
        self.record(Call::ShowImportPage);
    }

    fn show_connect_hardware_page(&self) {
        self.record(Call::ShowConnectHardwarePage);
    }

    fn connect_hardware_and_unlock(
        &self,
        device: HardwareDevice,
        hd_path: &str,
        address: &str,
    ) -> BoxFuture<'static, Result<(), HostError>> {
        self.record(Call::ConnectHardware {
            device,
            hd_path: hd_path.to_string(),
            address: address.to_string(),
        });
        let result = self
            .hardware
            .lock()
            .unwrap()
            .get(hd_path)
            .cloned()
            .unwrap_or(Ok(()));
        Box::pin(async move { result })
    }

    fn display_warning(&self, message: &str) {
        self.record(Call::Warning(message.to_string()));
    }

    fn display_toast(&self, message: &str) {
        self.record(Call::Toast(message.to_string()));
    }

    fn get_contract_metadata(
        &self,
        address: &str,
    ) -> BoxFuture<'static, Result<ContractMetadata, HostError>> {
        self.record(Call::GetContractMetadata(address.to_string()));
        let result = self
            .metadata
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_else(|| Err(HostError::Rejected(format!("{} is not a contract", address))));
        let gate = self.gates.lock().unwrap().get(address).cloned();
        Box::pin(async move {
            if let Some(gate) = gate {
                // Closed semaphore means released
                let _ = gate.acquire().await;
            }
            result
        })
    }

    fn show_delete_imported_account(&self, identity: &Identity, _keyring: &Keyring) {
        self.record(Call::ShowDeleteImportedAccount(identity.address.clone()));
    }

    fn request_account_export(&self, address: &str) {
        self.record(Call::RequestAccountExport(address.to_string()));
    }

    fn update_abi(&self, address: &str, network: &str, abi: &serde_json::Value) {
        self.record(Call::UpdateAbi {
            address: address.to_string(),
            network: network.to_string(),
            abi: abi.clone(),
        });
    }
}

impl Clipboard for MockHost {
    fn copy(&self, text: &str) {
        self.record(Call::Copy(text.to_string()));
    }
}

impl UrlOpener for MockHost {
    fn open_url(&self, url: &str) {
        self.record(Call::OpenUrl(url.to_string()));
    }
}

// ============================================================================
// Snapshot builders
// ============================================================================

fn owned(accounts: &[&str]) -> Vec<String> {
    accounts.iter().map(|a| a.to_string()).collect()
}

pub fn hd(accounts: &[&str]) -> Keyring {
    Keyring::new(tags::HD_KEY_TREE, owned(accounts))
}

pub fn imported(accounts: &[&str]) -> Keyring {
    Keyring::new(tags::SIMPLE_KEY_PAIR, owned(accounts))
}

pub fn ledger(accounts: &[&str]) -> Keyring {
    Keyring::new(tags::LEDGER_HARDWARE, owned(accounts))
}

pub fn contract(network: &str, accounts: &[&str]) -> Keyring {
    Keyring::contract(network, owned(accounts))
}

/// Snapshot with an identity for every keyring account
pub fn snapshot(keyrings: Vec<Keyring>, selected: Option<&str>, network: &str) -> Snapshot {
    let identities = keyrings
        .iter()
        .flat_map(|kr| kr.accounts.iter())
        .enumerate()
        .map(|(i, address)| {
            (
                address.clone(),
                Identity::new(address.clone(), format!("Account {}", i + 1)),
            )
        })
        .collect();

    Snapshot {
        identities,
        keyrings,
        selected_address: selected.map(str::to_string),
        network: network.to_string(),
    }
}
