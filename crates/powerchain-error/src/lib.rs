//! # PowerChain Error
//!
//! This crate provides the unified error type for the PowerChain client SDK.
//! Only three error kinds are raised locally (a missing or malformed client
//! at construction, an empty account list from the wallet, and an
//! over-withdrawal); everything the wallet provider or the network layer
//! reports is carried through unchanged in one of the passthrough variants,
//! with no retries and no translation.
//!
//! ## Example
//!
//! ```
//! use powerchain_error::{Error, Result};
//!
//! fn check_withdrawal(available: u128, requested: u128) -> Result<()> {
//!     if requested > available {
//!         return Err(Error::InsufficientBalance {
//!             kind: powerchain_error::BalanceKind::Vesting,
//!             available,
//!             requested,
//!         });
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::fmt;
use thiserror::Error;

/// Which tracked balance an over-withdrawal was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BalanceKind {
    /// Tokens locked against a chain registration.
    Vesting,
    /// Collateral tokens held against a chain registration.
    Deposit,
}

impl fmt::Display for BalanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceKind::Vesting => write!(f, "vesting"),
            BalanceKind::Deposit => write!(f, "deposit"),
        }
    }
}

/// The main error type for PowerChain client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable wallet or network client at construction time.
    #[error("no ethereum compatible client available")]
    MissingClient,

    /// Account authorization returned an empty account list.
    #[error("wallet returned no authorized accounts")]
    NoAccounts,

    /// A withdrawal request exceeds the tracked balance. Amounts are in
    /// base units.
    #[error("withdrawal of {requested} exceeds tracked {kind} balance of {available}")]
    InsufficientBalance {
        /// The balance the request was checked against.
        kind: BalanceKind,
        /// Tracked balance in base units.
        available: u128,
        /// Requested withdrawal in base units.
        requested: u128,
    },

    /// Invalid address format or checksum.
    #[error("invalid address '{address}': {reason}")]
    InvalidAddress {
        /// The invalid address.
        address: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// Arithmetic overflow while converting or combining token amounts.
    #[error("amount overflow: {0}")]
    Overflow(String),

    /// Transaction not found for the given hash.
    #[error("transaction not found: {0}")]
    TransactionNotFound(String),

    /// Failure surfaced unchanged from the wallet provider.
    #[error("provider error: {0}")]
    Provider(String),

    /// Failure surfaced unchanged from a contract call.
    #[error("contract error: {0}")]
    Contract(String),

    /// Failure surfaced unchanged from the RPC transport.
    #[error("rpc error: {0}")]
    Rpc(String),
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
