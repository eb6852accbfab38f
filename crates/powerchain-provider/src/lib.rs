//! # PowerChain Provider
//!
//! This crate provides the wallet-provider abstraction for the PowerChain
//! client SDK. A [`WalletProvider`] is whatever holds the user's accounts
//! and authorizes their use: in a browser that is an injected wallet
//! extension, server-side it is a key-backed provider such as
//! [`LocalWalletProvider`].
//!
//! The provider reports the chain id it is connected to, answers whether it
//! self-identifies as the reference wallet implementation, authorizes
//! accounts on request, and notifies a registered listener when the active
//! account set changes.
//!
//! ## Example
//!
//! ```
//! use powerchain_provider::{LocalWalletProvider, WalletProvider};
//!
//! # async fn provider() -> Result<(), powerchain_error::Error> {
//! let provider = LocalWalletProvider::new(
//!     "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
//!     1,
//! )?;
//! assert_eq!(provider.network_version(), "1");
//! let accounts = provider.request_accounts().await?;
//! assert_eq!(accounts.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod network;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use powerchain_error::{Error, Result};

/// Listener invoked with the new account list whenever the provider reports
/// an account switch. Delivery is fire-and-forget: last write wins, with no
/// ordering guarantee relative to in-flight calls.
pub type AccountsListener = Box<dyn Fn(Vec<Address>) + Send + Sync>;

/// Opaque handle returned by a successful accounts-changed subscription.
///
/// Callers keep the handle for as long as they want the listener
/// registered; its presence is what enforces subscribe-once semantics on
/// the client side.
#[derive(Debug)]
pub struct AccountsSubscription {
    id: u64,
}

impl AccountsSubscription {
    /// Creates a subscription handle with a provider-assigned id.
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// The provider-assigned subscription id.
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A wallet provider: the component holding the user's accounts.
///
/// Implementations are expected to honor the inbound contract of a
/// browser-injected wallet: a reported chain id, a reference-wallet
/// self-identification flag, an authorization call yielding the account
/// list, and an account-change notification channel.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// The chain id the provider is connected to, as the provider reports
    /// it (a decimal string, e.g. `"1"` for mainnet).
    fn network_version(&self) -> String;

    /// Whether the provider self-identifies as the reference wallet
    /// implementation. Pure read, no side effect.
    fn is_metamask(&self) -> bool;

    /// Requests account authorization and returns the authorized
    /// addresses. A user rejection surfaces unchanged as
    /// [`Error::Provider`].
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Registers `listener` for account-change notifications and returns
    /// the subscription handle. Each call registers one more listener;
    /// callers that want at-most-one registration keep the returned handle
    /// and check it before subscribing again.
    fn subscribe_accounts_changed(&self, listener: AccountsListener) -> AccountsSubscription;
}

/// A wallet provider backed by a local private key.
///
/// The account set is a single address derived from the key and never
/// changes, so registered listeners are retained but never invoked. Useful
/// server-side and in examples; anything interactive sits behind the same
/// [`WalletProvider`] trait.
pub struct LocalWalletProvider {
    address: Address,
    chain_id: u64,
    listeners: Mutex<Vec<AccountsListener>>,
    next_subscription_id: AtomicU64,
}

impl LocalWalletProvider {
    /// Creates a provider from a hex encoded private key and a chain id.
    ///
    /// The key is used only to derive the account address; signing happens
    /// in the network layer. A malformed key is an error.
    pub fn new(private_key: &str, chain_id: u64) -> Result<Self> {
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|_| Error::Provider("private key is not a valid hex encoded secret".into()))?;
        Ok(Self {
            address: signer.address(),
            chain_id,
            listeners: Mutex::new(Vec::new()),
            next_subscription_id: AtomicU64::new(1),
        })
    }

    /// The address derived from the configured private key.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl std::fmt::Debug for LocalWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalWalletProvider")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

#[async_trait]
impl WalletProvider for LocalWalletProvider {
    fn network_version(&self) -> String {
        self.chain_id.to_string()
    }

    fn is_metamask(&self) -> bool {
        false
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Ok(vec![self.address])
    }

    fn subscribe_accounts_changed(&self, listener: AccountsListener) -> AccountsSubscription {
        let id = self.next_subscription_id.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(subscription_id = id, "accounts-changed listener registered");
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
        AccountsSubscription::new(id)
    }
}
