//! # PowerChain Testing
//!
//! Mock collaborators for exercising the PowerChain client without a
//! wallet or a node: a scripted [`MockWalletProvider`] that counts
//! authorizations and subscriptions, and mock contract proxies that
//! record every state-changing submission for later assertion.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use powerchain_testing::{MockNetworkClient, MockWalletProvider};
//!
//! let provider = MockWalletProvider::new("1").with_accounts(vec![account]);
//! let network = MockNetworkClient::new();
//! network.registry().set_user_details(5, account, deposit, vesting);
//! // ... drive the client, then assert on network.registry().calls()
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use powerchain_error::{Error, Result};
use powerchain_provider::network::{
    ChainDynamicData, ChainRegistrationData, ChainStaticData, NetworkClient, RegistryContract,
    TokenContract, TransactionInfo, UserDetailsData,
};
use powerchain_provider::{AccountsListener, AccountsSubscription, WalletProvider};

/// Transaction hash every mock submission reports back.
pub const MOCK_TX_HASH: B256 = B256::repeat_byte(0xAA);

/// A scripted wallet provider.
///
/// Counts authorization requests and listener registrations, and lets the
/// test fire accounts-changed notifications by hand.
pub struct MockWalletProvider {
    network_version: String,
    metamask: bool,
    accounts: Mutex<Vec<Address>>,
    denial: Mutex<Option<String>>,
    authorization_count: AtomicUsize,
    subscription_count: AtomicUsize,
    listeners: Mutex<Vec<AccountsListener>>,
}

impl MockWalletProvider {
    /// Creates a provider reporting the given chain id with no accounts.
    pub fn new(network_version: impl Into<String>) -> Self {
        Self {
            network_version: network_version.into(),
            metamask: true,
            accounts: Mutex::new(Vec::new()),
            denial: Mutex::new(None),
            authorization_count: AtomicUsize::new(0),
            subscription_count: AtomicUsize::new(0),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Sets the accounts the provider authorizes.
    pub fn with_accounts(self, accounts: Vec<Address>) -> Self {
        *self.accounts.lock().unwrap() = accounts;
        self
    }

    /// Sets the reference-wallet self-identification flag.
    pub fn with_metamask(mut self, metamask: bool) -> Self {
        self.metamask = metamask;
        self
    }

    /// Makes every authorization request fail with the given message, the
    /// way a user rejection surfaces.
    pub fn deny_with(self, message: impl Into<String>) -> Self {
        *self.denial.lock().unwrap() = Some(message.into());
        self
    }

    /// Number of authorization requests seen so far.
    pub fn authorization_count(&self) -> usize {
        self.authorization_count.load(Ordering::SeqCst)
    }

    /// Number of accounts-changed listener registrations seen so far.
    pub fn subscription_count(&self) -> usize {
        self.subscription_count.load(Ordering::SeqCst)
    }

    /// Delivers an accounts-changed notification to every registered
    /// listener, as the wallet would on an account switch.
    pub fn fire_accounts_changed(&self, accounts: Vec<Address>) {
        for listener in self.listeners.lock().unwrap().iter() {
            listener(accounts.clone());
        }
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    fn network_version(&self) -> String {
        self.network_version.clone()
    }

    fn is_metamask(&self) -> bool {
        self.metamask
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.authorization_count.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.denial.lock().unwrap().clone() {
            return Err(Error::Provider(message));
        }
        Ok(self.accounts.lock().unwrap().clone())
    }

    fn subscribe_accounts_changed(&self, listener: AccountsListener) -> AccountsSubscription {
        let id = self.subscription_count.fetch_add(1, Ordering::SeqCst) as u64 + 1;
        self.listeners.lock().unwrap().push(listener);
        AccountsSubscription::new(id)
    }
}

/// A state-changing call recorded by [`MockTokenContract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCall {
    /// A `mint` submission.
    Mint {
        /// Recipient.
        to: Address,
        /// Amount in base units.
        amount: U256,
        /// Sender.
        from: Address,
    },
    /// An `approve` submission.
    Approve {
        /// Approved spender.
        spender: Address,
        /// Amount in base units.
        amount: U256,
        /// Sender.
        from: Address,
    },
}

/// Token contract proxy that records submissions instead of sending them.
#[derive(Default)]
pub struct MockTokenContract {
    calls: Mutex<Vec<TokenCall>>,
}

impl MockTokenContract {
    /// All submissions recorded so far, in order.
    pub fn calls(&self) -> Vec<TokenCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TokenContract for MockTokenContract {
    async fn mint(&self, to: Address, amount: U256, from: Address) -> Result<B256> {
        self.calls
            .lock()
            .unwrap()
            .push(TokenCall::Mint { to, amount, from });
        Ok(MOCK_TX_HASH)
    }

    async fn approve(&self, spender: Address, amount: U256, from: Address) -> Result<B256> {
        self.calls
            .lock()
            .unwrap()
            .push(TokenCall::Approve {
                spender,
                amount,
                from,
            });
        Ok(MOCK_TX_HASH)
    }
}

/// A state-changing call recorded by [`MockRegistryContract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryCall {
    /// A `registerChain` submission.
    RegisterChain {
        /// Submitted registration parameters.
        params: ChainRegistrationData,
        /// Sender.
        from: Address,
    },
    /// A vesting request for an absolute amount.
    RequestVest {
        /// Target chain.
        chain_id: u64,
        /// Requested total in base units.
        amount: U256,
        /// Sender.
        from: Address,
    },
    /// A vesting confirmation.
    ConfirmVest {
        /// Target chain.
        chain_id: u64,
        /// Sender.
        from: Address,
    },
    /// A deposit request for an absolute amount.
    RequestDeposit {
        /// Target chain.
        chain_id: u64,
        /// Requested total in base units.
        amount: U256,
        /// Sender.
        from: Address,
    },
    /// A deposit-withdrawal confirmation.
    ConfirmDepositWithdrawal {
        /// Target chain.
        chain_id: u64,
        /// Sender.
        from: Address,
    },
    /// A mining start.
    StartMining {
        /// Target chain.
        chain_id: u64,
        /// Sender.
        from: Address,
    },
    /// A mining stop.
    StopMining {
        /// Target chain.
        chain_id: u64,
        /// Sender.
        from: Address,
    },
}

/// Registry contract proxy backed by in-memory state.
///
/// Reads come from scripted records; state-changing submissions are
/// recorded but do not mutate the scripted state, mirroring the real
/// request/confirm flow where a request alone changes nothing.
#[derive(Default)]
pub struct MockRegistryContract {
    calls: Mutex<Vec<RegistryCall>>,
    users: Mutex<HashMap<(u64, Address), UserDetailsData>>,
    statics: Mutex<HashMap<u64, ChainStaticData>>,
    dynamics: Mutex<HashMap<u64, ChainDynamicData>>,
}

impl MockRegistryContract {
    /// All state-changing submissions recorded so far, in order.
    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Scripts the participation record returned for `(chain_id, account)`.
    pub fn set_user_details(&self, chain_id: u64, account: Address, details: UserDetailsData) {
        self.users.lock().unwrap().insert((chain_id, account), details);
    }

    /// Scripts the static record returned for `chain_id`.
    pub fn set_static_details(&self, chain_id: u64, details: ChainStaticData) {
        self.statics.lock().unwrap().insert(chain_id, details);
    }

    /// Scripts the dynamic record returned for `chain_id`.
    pub fn set_dynamic_details(&self, chain_id: u64, details: ChainDynamicData) {
        self.dynamics.lock().unwrap().insert(chain_id, details);
    }

    fn record(&self, call: RegistryCall) -> Result<B256> {
        self.calls.lock().unwrap().push(call);
        Ok(MOCK_TX_HASH)
    }
}

#[async_trait]
impl RegistryContract for MockRegistryContract {
    async fn register_chain(&self, params: ChainRegistrationData, from: Address) -> Result<B256> {
        self.record(RegistryCall::RegisterChain { params, from })
    }

    async fn chain_static_details(&self, chain_id: u64) -> Result<ChainStaticData> {
        self.statics
            .lock()
            .unwrap()
            .get(&chain_id)
            .cloned()
            .ok_or_else(|| Error::Contract(format!("chain {chain_id} is not registered")))
    }

    async fn chain_dynamic_details(&self, chain_id: u64) -> Result<ChainDynamicData> {
        self.dynamics
            .lock()
            .unwrap()
            .get(&chain_id)
            .copied()
            .ok_or_else(|| Error::Contract(format!("chain {chain_id} is not registered")))
    }

    async fn request_vest_in_chain(
        &self,
        chain_id: u64,
        amount: U256,
        from: Address,
    ) -> Result<B256> {
        self.record(RegistryCall::RequestVest {
            chain_id,
            amount,
            from,
        })
    }

    async fn confirm_vest_in_chain(&self, chain_id: u64, from: Address) -> Result<B256> {
        self.record(RegistryCall::ConfirmVest { chain_id, from })
    }

    async fn request_deposit_in_chain(
        &self,
        chain_id: u64,
        amount: U256,
        from: Address,
    ) -> Result<B256> {
        self.record(RegistryCall::RequestDeposit {
            chain_id,
            amount,
            from,
        })
    }

    async fn confirm_deposit_withdrawal(&self, chain_id: u64, from: Address) -> Result<B256> {
        self.record(RegistryCall::ConfirmDepositWithdrawal { chain_id, from })
    }

    async fn user_details(&self, chain_id: u64, account: Address) -> Result<UserDetailsData> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&(chain_id, account))
            .copied()
            .unwrap_or_default())
    }

    async fn start_mining(&self, chain_id: u64, from: Address) -> Result<B256> {
        self.record(RegistryCall::StartMining { chain_id, from })
    }

    async fn stop_mining(&self, chain_id: u64, from: Address) -> Result<B256> {
        self.record(RegistryCall::StopMining { chain_id, from })
    }
}

/// Network client handing out the shared mock proxies.
///
/// The addresses each factory call was asked to bind are recorded so
/// reinitialization can be asserted on.
pub struct MockNetworkClient {
    token: Arc<MockTokenContract>,
    registry: Arc<MockRegistryContract>,
    transactions: Mutex<HashMap<B256, TransactionInfo>>,
    token_bindings: Mutex<Vec<Address>>,
    registry_bindings: Mutex<Vec<Address>>,
}

impl MockNetworkClient {
    /// Creates a network client with fresh mock proxies.
    pub fn new() -> Self {
        Self {
            token: Arc::new(MockTokenContract::default()),
            registry: Arc::new(MockRegistryContract::default()),
            transactions: Mutex::new(HashMap::new()),
            token_bindings: Mutex::new(Vec::new()),
            registry_bindings: Mutex::new(Vec::new()),
        }
    }

    /// The shared token proxy.
    pub fn token(&self) -> Arc<MockTokenContract> {
        Arc::clone(&self.token)
    }

    /// The shared registry proxy.
    pub fn registry(&self) -> Arc<MockRegistryContract> {
        Arc::clone(&self.registry)
    }

    /// Scripts a transaction returned by the by-hash read.
    pub fn insert_transaction(&self, info: TransactionInfo) {
        self.transactions.lock().unwrap().insert(info.hash, info);
    }

    /// Addresses the token factory was asked to bind, in order.
    pub fn token_bindings(&self) -> Vec<Address> {
        self.token_bindings.lock().unwrap().clone()
    }

    /// Addresses the registry factory was asked to bind, in order.
    pub fn registry_bindings(&self) -> Vec<Address> {
        self.registry_bindings.lock().unwrap().clone()
    }
}

impl Default for MockNetworkClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkClient for MockNetworkClient {
    fn token_contract(&self, address: Address) -> Arc<dyn TokenContract> {
        self.token_bindings.lock().unwrap().push(address);
        self.token.clone()
    }

    fn registry_contract(&self, address: Address) -> Arc<dyn RegistryContract> {
        self.registry_bindings.lock().unwrap().push(address);
        self.registry.clone()
    }

    async fn transaction(&self, hash: B256) -> Result<Option<TransactionInfo>> {
        Ok(self.transactions.lock().unwrap().get(&hash).copied())
    }
}
