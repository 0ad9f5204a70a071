//! Account Selector: keyring classification and account dropdown state
//!
//! This crate holds the state logic behind a wallet's account dropdown:
//! which accounts are listed on the active network, what tag each one
//! carries, which menu is open, and what to ask the host to do when the
//! user picks something.
//!
//! # Architecture
//!
//! - **Classifier** (`keyring`): maps keyring type tags to a closed
//!   [`KeyringKind`]
//! - **Account list** (`account_list`): network-filtered, ordered address list
//! - **Label resolver** (`label`, `proxy`): `Imported` / `Hardware` /
//!   `Contract` / `Proxy` tags, using the host's contract metadata
//! - **Selector** (`selector`, `dropdown`): menu state machine and the
//!   controller that re-derives state from host snapshots
//!
//! Rendering, signing and network access stay on the host side behind the
//! traits in [`host`].
//!
//! # Example
//!
//! ```ignore
//! use account_selector::{AccountDropdown, DropdownConfig, DropdownEvent, Menu, MenuEvent};
//!
//! let mut dropdown = AccountDropdown::mount(host, DropdownConfig::from_env(), snapshot);
//! dropdown.handle(DropdownEvent::Menu(MenuEvent::Toggle(Menu::AccountSelector)))?;
//! for row in dropdown.rows() {
//!     println!("{} {} {:?}", row.name, row.address, row.label);
//! }
//! ```

// Public modules
pub mod account_list;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod explorer;
pub mod hardware;
pub mod host;
pub mod keyring;
pub mod label;
pub mod proxy;
pub mod selector;

// Re-exports for convenience
pub use account_list::{build_account_list, build_rows, AccountRow};
pub use config::{DropdownConfig, HdPaths};
pub use dropdown::{AccountDropdown, DropdownEvent, OptionsAction, ProxySlot};
pub use error::{AccountError, HostError};
pub use hardware::connect_and_unlock;
pub use host::{AccountActions, Clipboard, Host, UrlOpener};
pub use keyring::{
    classify, is_loose_account, Classification, HardwareDevice, Identity, Keyring, KeyringKind,
    Snapshot,
};
pub use label::{resolve_label, AccountLabel, LabelMap};
pub use proxy::{check_proxy, ContractMetadata, ProxyStatus};
pub use selector::{Menu, MenuEvent, MenuState, PointerTarget};

// Common result type
pub type Result<T> = std::result::Result<T, AccountError>;
