//! Account dropdown controller
//!
//! Owns the transient view state (menu visibility, label map, proxy slot)
//! and keeps it in step with host snapshots. Lookups run as background
//! tasks on the tokio runtime; results are committed only if the dropdown
//! is still mounted and nothing newer has been requested since:
//!
//! - labels carry the generation of the refresh that started them
//! - the proxy slot carries the generation of the selection it was
//!   started for, so A→B→C only ever commits C
//!
//! All methods that start background work must be called from inside a
//! tokio runtime.

use crate::account_list::{build_rows, visible_accounts, AccountRow};
use crate::config::DropdownConfig;
use crate::error::AccountError;
use crate::explorer;
use crate::hardware::connect_and_unlock;
use crate::host::Host;
use crate::keyring::{is_loose_account, Keyring, KeyringKind, Snapshot};
use crate::label::{resolve_label, AccountLabel, LabelMap};
use crate::proxy::{check_proxy, ProxyStatus};
use crate::selector::{MenuEvent, MenuState};
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::{JoinHandle, JoinSet};

// ============================================================================
// Events
// ============================================================================

/// Entries of the options menu for the selected account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionsAction {
    CopyAddress,
    ViewOnExplorer,
    ShowDetails,
    ExportPrivateKey,
    RemoveAccount,
    /// Re-fetch a proxy's implementation ABI and hand it to the host
    UpdateImplementationAbi,
}

impl fmt::Display for OptionsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CopyAddress => "Copy address",
            Self::ViewOnExplorer => "View on block explorer",
            Self::ShowDetails => "Show details",
            Self::ExportPrivateKey => "Export private key",
            Self::RemoveAccount => "Remove account",
            Self::UpdateImplementationAbi => "Update implementation ABI",
        };
        f.write_str(name)
    }
}

/// User interaction delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent {
    Menu(MenuEvent),
    SelectAccount(String),
    AddAccount,
    ImportAccount,
    ConnectHardware,
    Options(OptionsAction),
}

// ============================================================================
// Transient state
// ============================================================================

/// Proxy status committed for one selected address
#[derive(Debug, Clone, PartialEq)]
pub struct ProxySlot {
    pub address: String,
    pub status: ProxyStatus,
}

#[derive(Debug, Default)]
struct Transient {
    mounted: bool,
    menus: MenuState,
    labels: LabelMap,
    label_generation: u64,
    proxy: Option<ProxySlot>,
    proxy_generation: u64,
}

fn lock(shared: &Mutex<Transient>) -> MutexGuard<'_, Transient> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn commit_label(
    shared: &Mutex<Transient>,
    generation: u64,
    address: &str,
    result: Result<Option<AccountLabel>, AccountError>,
) {
    let mut state = lock(shared);
    if !state.mounted || state.label_generation != generation {
        log::debug!("Discarding stale label result for {}", address);
        return;
    }
    match result {
        Ok(Some(label)) => state.labels.insert(address, label),
        Ok(None) => {}
        Err(e) => log::warn!("Label for {} left unresolved: {}", address, e),
    }
}

fn commit_proxy(shared: &Mutex<Transient>, generation: u64, slot: ProxySlot) {
    let mut state = lock(shared);
    if !state.mounted || state.proxy_generation != generation {
        log::debug!("Discarding stale proxy check for {}", slot.address);
        return;
    }
    state.proxy = Some(slot);
}

// ============================================================================
// Controller
// ============================================================================

pub struct AccountDropdown<H: Host> {
    host: Arc<H>,
    config: Arc<DropdownConfig>,
    props: Snapshot,
    shared: Arc<Mutex<Transient>>,
    /// Lookups owned by the dropdown, aborted when it is dropped
    tasks: JoinSet<()>,
    /// User-facing flows that must finish even if the dropdown goes away
    detached: Vec<JoinHandle<()>>,
}

/// Visible `(kind, address)` membership, in display order
fn membership(snapshot: &Snapshot) -> Vec<(KeyringKind, &str)> {
    visible_accounts(&snapshot.keyrings, &snapshot.network)
        .map(|(keyring, address)| (keyring.kind(), address))
        .collect()
}

impl<H: Host> AccountDropdown<H> {
    /// Mount with an initial snapshot and start label and proxy resolution
    pub fn mount(host: Arc<H>, config: DropdownConfig, snapshot: Snapshot) -> Self {
        log::info!(
            "Mounting account dropdown: {} keyrings on network {}",
            snapshot.keyrings.len(),
            snapshot.network
        );

        let shared = Arc::new(Mutex::new(Transient {
            mounted: true,
            ..Default::default()
        }));

        let mut dropdown = Self {
            host,
            config: Arc::new(config),
            props: snapshot,
            shared,
            tasks: JoinSet::new(),
            detached: Vec::new(),
        };
        dropdown.refresh_labels();
        dropdown.refresh_proxy();
        dropdown
    }

    /// Stop committing results. In-flight lookups finish but their results
    /// are dropped.
    pub fn unmount(&mut self) {
        lock(&self.shared).mounted = false;
        log::info!("Account dropdown unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        lock(&self.shared).mounted
    }

    /// Wait for every background lookup started so far
    pub async fn settle(&mut self) {
        while let Some(joined) = self.tasks.join_next().await {
            if let Err(e) = joined {
                log::error!("Account dropdown task failed: {}", e);
            }
        }
        for handle in self.detached.drain(..) {
            if let Err(e) = handle.await {
                log::error!("Account dropdown task failed: {}", e);
            }
        }
    }

    /// Background tasks not yet reaped
    pub fn in_flight(&self) -> usize {
        self.tasks.len() + self.detached.len()
    }

    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(e) = joined {
                log::error!("Account dropdown task failed: {}", e);
            }
        }
        self.detached.retain(|handle| !handle.is_finished());
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.reap();
        self.tasks.spawn(task);
    }

    fn spawn_detached<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.reap();
        self.detached.push(tokio::spawn(task));
    }

    // ========================================================================
    // Prop changes
    // ========================================================================

    /// Apply a new host snapshot and re-derive what depends on it
    pub fn update(&mut self, snapshot: Snapshot) {
        let prev = std::mem::replace(&mut self.props, snapshot);

        let selection_changed = prev.selected_address != self.props.selected_address;
        let keyrings_changed = prev.keyrings.len() != self.props.keyrings.len();
        let network_changed = prev.network != self.props.network;
        let membership_changed = membership(&prev) != membership(&self.props);

        if selection_changed {
            log::debug!(
                "Selection changed: {:?} -> {:?}",
                prev.selected_address,
                self.props.selected_address
            );
            self.refresh_proxy();
        }

        if network_changed {
            log::info!("Network changed: {} -> {}", prev.network, self.props.network);
            if let Err(e) = self.fall_back_if_selection_invalid() {
                log::warn!("Selection not valid on network {}: {}", self.props.network, e);
            }
        }

        if keyrings_changed || network_changed || membership_changed {
            self.refresh_labels();
        }
    }

    /// Ask the host to select the default account when the current selection
    /// is not held by any keyring visible on the active network
    fn fall_back_if_selection_invalid(&self) -> Result<(), AccountError> {
        let selected = self.props.selected_address.as_deref();
        if selected.is_some_and(|address| self.props.keyring_for(address).is_some()) {
            return Ok(());
        }

        let target = self
            .props
            .default_address()
            .ok_or(AccountError::NoDefaultAccount)?;
        if Some(target) == selected {
            return Ok(());
        }

        log::info!("Switching selection to default account {}", target);
        self.host.show_account_detail(target);
        Ok(())
    }

    fn refresh_labels(&mut self) {
        let generation = {
            let mut state = lock(&self.shared);
            state.labels.clear();
            state.label_generation += 1;
            state.label_generation
        };

        let loose: Vec<Arc<Keyring>> = self
            .props
            .keyrings
            .iter()
            .filter(|kr| kr.is_visible_on(&self.props.network) && is_loose_account(kr))
            .map(|kr| Arc::new(kr.clone()))
            .collect();

        for keyring in loose {
            for address in keyring.accounts.iter().cloned() {
                let host = Arc::clone(&self.host);
                let shared = Arc::clone(&self.shared);
                let config = Arc::clone(&self.config);
                let keyring = Arc::clone(&keyring);
                self.spawn(async move {
                    let result = resolve_label(
                        host.as_ref(),
                        &keyring,
                        &address,
                        &config.proxy_contract_type,
                    )
                    .await;
                    commit_label(&shared, generation, &address, result);
                });
            }
        }
    }

    fn refresh_proxy(&mut self) {
        let generation = {
            let mut state = lock(&self.shared);
            state.proxy = None;
            state.proxy_generation += 1;
            state.proxy_generation
        };

        let Some(address) = self.props.selected_address.clone() else {
            return;
        };

        let host = Arc::clone(&self.host);
        let shared = Arc::clone(&self.shared);
        let config = Arc::clone(&self.config);
        self.spawn(async move {
            let status = match check_proxy(host.as_ref(), &address, &config.proxy_contract_type).await
            {
                Ok(status) => status,
                Err(e) => {
                    log::debug!("Proxy check for {} failed, assuming not a proxy: {}", address, e);
                    ProxyStatus::unknown()
                }
            };
            commit_proxy(&shared, generation, ProxySlot { address, status });
        });
    }

    // ========================================================================
    // User interaction
    // ========================================================================

    /// Single entry point for user interaction
    pub fn handle(&mut self, event: DropdownEvent) -> Result<(), AccountError> {
        if !self.is_mounted() {
            log::debug!("Ignoring {:?} on unmounted dropdown", event);
            return Ok(());
        }

        match event {
            DropdownEvent::Menu(menu_event) => {
                let mut state = lock(&self.shared);
                state.menus = state.menus.apply(menu_event);
                Ok(())
            }
            DropdownEvent::SelectAccount(address) => {
                self.close_menus();
                self.select_account(address)
            }
            DropdownEvent::AddAccount => {
                self.close_menus();
                self.host.add_new_account();
                Ok(())
            }
            DropdownEvent::ImportAccount => {
                self.close_menus();
                self.host.show_import_page();
                Ok(())
            }
            DropdownEvent::ConnectHardware => {
                self.close_menus();
                self.host.show_connect_hardware_page();
                Ok(())
            }
            DropdownEvent::Options(action) => {
                self.close_menus();
                self.run_option(action)
            }
        }
    }

    fn close_menus(&self) {
        let mut state = lock(&self.shared);
        state.menus = state.menus.apply(MenuEvent::CloseAll);
    }

    fn select_account(&mut self, address: String) -> Result<(), AccountError> {
        let keyring = self
            .props
            .keyring_for(&address)
            .ok_or_else(|| AccountError::UnknownAccount(address.clone()))?;

        let KeyringKind::Hardware(device) = keyring.kind() else {
            self.host.show_account_detail(&address);
            return Ok(());
        };

        let host = Arc::clone(&self.host);
        let paths = self.config.hd_paths(device).clone();
        self.spawn_detached(async move {
            match connect_and_unlock(host.as_ref(), device, &paths, &address).await {
                Ok(()) => {
                    log::info!("✓ Hardware account {} unlocked", address);
                    host.show_account_detail(&address);
                }
                Err(e) => {
                    log::error!("Hardware account {} could not be unlocked: {}", address, e);
                    host.display_warning(&e.to_string());
                    host.display_toast(&format!("Could not connect {} device", device));
                }
            }
        });
        Ok(())
    }

    fn selected(&self) -> Result<(&str, &Keyring), AccountError> {
        let address = self
            .props
            .selected_address
            .as_deref()
            .ok_or(AccountError::NoSelectedAccount)?;
        let keyring = self
            .props
            .keyring_for(address)
            .ok_or_else(|| AccountError::UnknownAccount(address.to_string()))?;
        Ok((address, keyring))
    }

    /// Options offered for the selected account
    pub fn available_options(&self) -> Vec<OptionsAction> {
        let Ok((address, keyring)) = self.selected() else {
            return Vec::new();
        };

        let mut options = vec![
            OptionsAction::CopyAddress,
            OptionsAction::ViewOnExplorer,
            OptionsAction::ShowDetails,
        ];
        if matches!(keyring.kind(), KeyringKind::Standard | KeyringKind::Imported) {
            options.push(OptionsAction::ExportPrivateKey);
        }
        if is_loose_account(keyring) {
            options.push(OptionsAction::RemoveAccount);
        }
        let is_proxy = lock(&self.shared)
            .proxy
            .as_ref()
            .is_some_and(|slot| slot.address == address && slot.status.is_proxy);
        if keyring.kind() == KeyringKind::Contract && is_proxy {
            options.push(OptionsAction::UpdateImplementationAbi);
        }
        options
    }

    fn run_option(&mut self, action: OptionsAction) -> Result<(), AccountError> {
        if !self.available_options().contains(&action) {
            let address = self.selected()?.0.to_string();
            return Err(AccountError::ActionUnavailable {
                action: action.to_string(),
                address,
            });
        }

        let (address, keyring) = self.selected()?;
        let address = address.to_string();
        match action {
            OptionsAction::CopyAddress => self.host.copy(&address),
            OptionsAction::ViewOnExplorer => match explorer::account_url(&self.props.network, &address) {
                Some(url) => self.host.open_url(&url),
                None => self.host.display_toast(&format!(
                    "No block explorer known for network {}",
                    self.props.network
                )),
            },
            OptionsAction::ShowDetails => self.host.show_account_detail(&address),
            OptionsAction::ExportPrivateKey => self.host.request_account_export(&address),
            OptionsAction::RemoveAccount => {
                let identity = self
                    .props
                    .identities
                    .get(&address)
                    .ok_or_else(|| AccountError::UnknownAccount(address.clone()))?;
                self.host.show_delete_imported_account(identity, keyring);
            }
            OptionsAction::UpdateImplementationAbi => self.update_implementation_abi(address),
        }
        Ok(())
    }

    fn update_implementation_abi(&mut self, address: String) {
        let host = Arc::clone(&self.host);
        let config = Arc::clone(&self.config);
        let network = self.props.network.clone();
        self.spawn(async move {
            match check_proxy(host.as_ref(), &address, &config.proxy_contract_type).await {
                Ok(ProxyStatus {
                    metadata: Some(metadata),
                    ..
                }) => {
                    log::info!("Updating ABI for {} on network {}", address, network);
                    host.update_abi(&address, &network, &metadata.abi);
                }
                Ok(_) => log::warn!("No contract metadata for {}", address),
                Err(e) => {
                    log::warn!("ABI update for {} failed: {}", address, e);
                    host.display_toast(&format!("Could not update ABI: {}", e));
                }
            }
        });
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn snapshot(&self) -> &Snapshot {
        &self.props
    }

    pub fn menus(&self) -> MenuState {
        lock(&self.shared).menus
    }

    /// Rows to render, in display order
    pub fn rows(&self) -> Vec<AccountRow> {
        let state = lock(&self.shared);
        build_rows(&self.props, &state.labels)
    }

    pub fn label(&self, address: &str) -> Option<AccountLabel> {
        lock(&self.shared).labels.get(address)
    }

    /// Committed proxy status for the current selection, if resolved
    pub fn proxy(&self) -> Option<ProxySlot> {
        lock(&self.shared).proxy.clone()
    }
}

impl<H: Host> Drop for AccountDropdown<H> {
    fn drop(&mut self) {
        lock(&self.shared).mounted = false;
    }
}
