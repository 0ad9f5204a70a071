//! Host collaborators
//!
//! The dropdown never reaches into the host store. It reads snapshots and
//! emits intents through these traits. Async calls return boxed futures so
//! the traits stay object safe and the futures can be moved onto spawned
//! tasks.

use crate::error::HostError;
use crate::keyring::{HardwareDevice, Identity, Keyring};
use crate::proxy::ContractMetadata;
use futures::future::BoxFuture;

/// Intents dispatched to the host store
pub trait AccountActions: Send + Sync + 'static {
    fn show_account_detail(&self, address: &str);

    fn add_new_account(&self);

    fn show_import_page(&self);

    fn show_connect_hardware_page(&self);

    /// Unlock `address` on a hardware device using `hd_path`
    fn connect_hardware_and_unlock(
        &self,
        device: HardwareDevice,
        hd_path: &str,
        address: &str,
    ) -> BoxFuture<'static, Result<(), HostError>>;

    fn display_warning(&self, message: &str);

    fn display_toast(&self, message: &str);

    /// Fetch ABI and contract type for `address`
    fn get_contract_metadata(
        &self,
        address: &str,
    ) -> BoxFuture<'static, Result<ContractMetadata, HostError>>;

    fn show_delete_imported_account(&self, identity: &Identity, keyring: &Keyring);

    fn request_account_export(&self, address: &str);

    fn update_abi(&self, address: &str, network: &str, abi: &serde_json::Value);
}

/// Clipboard access (fire and forget)
pub trait Clipboard: Send + Sync + 'static {
    fn copy(&self, text: &str);
}

/// Opens external links such as block explorer pages (fire and forget)
pub trait UrlOpener: Send + Sync + 'static {
    fn open_url(&self, url: &str);
}

/// Everything the dropdown needs from its environment
pub trait Host: AccountActions + Clipboard + UrlOpener {}

impl<T: AccountActions + Clipboard + UrlOpener> Host for T {}
