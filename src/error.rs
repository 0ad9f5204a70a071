//! Error types for account selection
//!
//! Classification never fails. Everything here comes from the host
//! collaborators (metadata lookups, hardware devices) or from asking
//! for an account the current snapshot does not know about.

use thiserror::Error;

/// Failure reported by a host collaborator
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum HostError {
    /// The host refused or failed the request
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// The backing service could not be reached
    #[error("Host unavailable: {0}")]
    Unavailable(String),

    /// Hardware device error (locked, wrong app, unplugged)
    #[error("Device error: {0}")]
    Device(String),
}

/// Core error type for account selection operations
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum AccountError {
    #[error("Contract metadata lookup failed: {0}")]
    Metadata(#[source] HostError),

    /// Both derivation paths were tried and both failed
    #[error("Hardware connect failed on {primary_path} ({primary}) and {fallback_path} ({fallback})")]
    HardwareConnect {
        primary_path: String,
        primary: HostError,
        fallback_path: String,
        fallback: HostError,
    },

    #[error("Account not found: {0}")]
    UnknownAccount(String),

    #[error("No default account to fall back to")]
    NoDefaultAccount,

    #[error("No account is selected")]
    NoSelectedAccount,

    #[error("{action} is not available for {address}")]
    ActionUnavailable { action: String, address: String },
}

impl AccountError {
    /// Create a combined hardware connect error
    pub fn hardware_connect(
        primary_path: impl Into<String>,
        primary: HostError,
        fallback_path: impl Into<String>,
        fallback: HostError,
    ) -> Self {
        Self::HardwareConnect {
            primary_path: primary_path.into(),
            primary,
            fallback_path: fallback_path.into(),
            fallback,
        }
    }
}
