//! Hardware account unlock
//!
//! Devices can hold the same address under more than one derivation layout.
//! The primary path is tried first and the fallback exactly once after it.

use crate::config::HdPaths;
use crate::error::AccountError;
use crate::host::AccountActions;
use crate::keyring::HardwareDevice;

/// Unlock `address` on `device`, retrying once with the fallback path
pub async fn connect_and_unlock<A>(
    actions: &A,
    device: HardwareDevice,
    paths: &HdPaths,
    address: &str,
) -> Result<(), AccountError>
where
    A: AccountActions + ?Sized,
{
    log::info!("🔌 Connecting {} for {} on {}", device, address, paths.primary);

    let primary = match actions
        .connect_hardware_and_unlock(device, &paths.primary, address)
        .await
    {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    log::warn!(
        "{} unlock on {} failed ({}), retrying on {}",
        device,
        paths.primary,
        primary,
        paths.fallback
    );

    actions
        .connect_hardware_and_unlock(device, &paths.fallback, address)
        .await
        .map_err(|fallback| {
            AccountError::hardware_connect(&paths.primary, primary, &paths.fallback, fallback)
        })
}
