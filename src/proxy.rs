//! Proxy contract detection
//!
//! A contract account is a proxy when the metadata the host fetches for it
//! reports the configured proxy contract type. Proxies delegate to an
//! implementation contract, so their ABI has to be resolved separately.

use crate::error::AccountError;
use crate::host::AccountActions;
use serde::{Deserialize, Serialize};

/// Contract metadata returned by the host
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractMetadata {
    /// Contract ABI as JSON
    #[serde(default)]
    pub abi: serde_json::Value,

    /// Contract type reported by the host (e.g. the proxy sentinel)
    #[serde(default)]
    pub contract_type: Option<String>,
}

impl ContractMetadata {
    pub fn is_proxy(&self, proxy_type: &str) -> bool {
        self.contract_type.as_deref() == Some(proxy_type)
    }
}

/// Proxy status of one address
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProxyStatus {
    pub is_proxy: bool,
    pub metadata: Option<ContractMetadata>,
}

impl ProxyStatus {
    /// What a failed lookup degrades to: not a proxy, no metadata
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Fetch metadata for `address` and derive its proxy status.
///
/// Always goes to the host; nothing is cached between calls.
pub async fn check_proxy<A>(
    actions: &A,
    address: &str,
    proxy_type: &str,
) -> Result<ProxyStatus, AccountError>
where
    A: AccountActions + ?Sized,
{
    let metadata = actions
        .get_contract_metadata(address)
        .await
        .map_err(AccountError::Metadata)?;

    let is_proxy = metadata.is_proxy(proxy_type);
    log::debug!("Proxy check for {}: is_proxy={}", address, is_proxy);

    Ok(ProxyStatus {
        is_proxy,
        metadata: Some(metadata),
    })
}
