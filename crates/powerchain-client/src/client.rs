use std::sync::{Arc, Mutex, PoisonError, RwLock};

use alloy::primitives::{Address, B256};
use powerchain_error::{BalanceKind, Error, Result};
use powerchain_provider::network::{NetworkClient, RegistryContract, TokenContract, TransactionInfo};
use powerchain_provider::{AccountsSubscription, WalletProvider};
use tracing::debug;

use crate::amount::TokenAmount;
use crate::network::{ContractAddresses, Network};
use crate::types::{ChainDynamicDetails, ChainRegistration, ChainStaticDetails, UserDetails};

struct Contracts {
    token: Arc<dyn TokenContract>,
    registry: Arc<dyn RegistryContract>,
    registry_address: Address,
}

/// Client for the PowerChain token and chain-registry contracts.
///
/// Constructed from a wallet provider and a network client. The network is
/// resolved once from the provider's reported chain id and both contract
/// proxies are bound to that network's deployment; [`reinitialize`]
/// rebinds them. Every account-scoped operation logs in first if no
/// account is active yet.
///
/// Derived operations (`add_to_*`, `withdraw_*`) read the current balance
/// and submit a request for a new absolute total. The read and the write
/// are not atomic: a concurrent request against the same account and chain
/// can race and overwrite the other's effect.
///
/// [`reinitialize`]: Self::reinitialize
pub struct ChainClient {
    provider: Arc<dyn WalletProvider>,
    network_client: Arc<dyn NetworkClient>,
    network: Option<Network>,
    contracts: RwLock<Contracts>,
    account: Arc<RwLock<Option<Address>>>,
    subscription: Mutex<Option<AccountsSubscription>>,
}

impl ChainClient {
    /// Creates a client, resolving the network from the provider's chain
    /// id and binding both contract proxies to that network's default
    /// deployment. An unrecognized chain id is not an error; the network
    /// is simply unresolved.
    pub fn new(provider: Arc<dyn WalletProvider>, network_client: Arc<dyn NetworkClient>) -> Self {
        let network = Network::from_version(&provider.network_version());
        let addresses = ContractAddresses::defaults_for(network);
        debug!(?network, ?addresses, "constructing chain client");
        let contracts = Contracts {
            token: network_client.token_contract(addresses.token),
            registry: network_client.registry_contract(addresses.registry),
            registry_address: addresses.registry,
        };
        Self {
            provider,
            network_client,
            network,
            contracts: RwLock::new(contracts),
            account: Arc::new(RwLock::new(None)),
            subscription: Mutex::new(None),
        }
    }

    /// Whether the provider self-identifies as the reference wallet
    /// implementation.
    pub fn has_metamask(&self) -> bool {
        self.provider.is_metamask()
    }

    /// The network resolved at construction, if the chain id was
    /// recognized.
    pub fn network(&self) -> Option<Network> {
        self.network
    }

    /// The resolved network's name.
    pub fn network_name(&self) -> Option<&'static str> {
        self.network.map(|network| network.name())
    }

    /// The currently active account, if one is authorized.
    ///
    /// Lock poisoning is recovered rather than propagated; the account is
    /// a plain `Option<Address>`, so a panicked writer cannot leave it in
    /// a torn state.
    pub fn account(&self) -> Option<Address> {
        *self.account.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Requests account authorization and records the first authorized
    /// account as active.
    ///
    /// Fails with [`Error::NoAccounts`] when authorization yields none.
    /// The first successful login registers the accounts-changed listener
    /// so later account switches track automatically; repeated logins
    /// never register it twice.
    pub async fn login(&self) -> Result<Address> {
        let accounts = self.provider.request_accounts().await?;
        let first = *accounts.first().ok_or(Error::NoAccounts)?;
        *self
            .account
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(first);
        debug!(account = %first, "login succeeded");

        let mut subscription = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if subscription.is_none() {
            let account = Arc::clone(&self.account);
            let handle = self.provider.subscribe_accounts_changed(Box::new(move |accounts| {
                *account.write().unwrap_or_else(PoisonError::into_inner) =
                    accounts.first().copied();
            }));
            *subscription = Some(handle);
        }
        Ok(first)
    }

    /// Rebinds both contract proxies, replacing the prior ones wholesale.
    ///
    /// With no overrides the resolved network's default deployment is
    /// used. The active account is unaffected.
    pub fn reinitialize(&self, overrides: Option<ContractAddresses>) {
        let addresses = overrides.unwrap_or_else(|| ContractAddresses::defaults_for(self.network));
        debug!(?addresses, "rebinding contract proxies");
        let mut contracts = self
            .contracts
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *contracts = Contracts {
            token: self.network_client.token_contract(addresses.token),
            registry: self.network_client.registry_contract(addresses.registry),
            registry_address: addresses.registry,
        };
    }

    /// The account guard: returns the active account, logging in first if
    /// none is active yet.
    async fn ensure_account(&self) -> Result<Address> {
        if let Some(account) = self.account() {
            return Ok(account);
        }
        self.login().await
    }

    fn token(&self) -> Arc<dyn TokenContract> {
        self.contracts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .token
            .clone()
    }

    fn registry(&self) -> Arc<dyn RegistryContract> {
        self.contracts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .registry
            .clone()
    }

    fn registry_address(&self) -> Address {
        self.contracts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .registry_address
    }

    /// Mints `tokens` to the active account.
    pub async fn mint(&self, tokens: f64) -> Result<B256> {
        let account = self.ensure_account().await?;
        let amount = TokenAmount::from_tokens(tokens);
        self.token()
            .mint(account, amount.base_units(), account)
            .await
    }

    /// Approves the registry contract to spend `tokens` of the active
    /// account's balance.
    pub async fn approve(&self, tokens: f64) -> Result<B256> {
        let account = self.ensure_account().await?;
        let amount = TokenAmount::from_tokens(tokens);
        let spender = self.registry_address();
        self.token()
            .approve(spender, amount.base_units(), account)
            .await
    }

    /// Registers a new chain. An absent validator submits the canonical
    /// zero address; token-amount fields are scaled to base units,
    /// percentages and counts are not.
    pub async fn register_chain(&self, registration: ChainRegistration) -> Result<B256> {
        let account = self.ensure_account().await?;
        debug!(description = %registration.description, "registering chain");
        self.registry()
            .register_chain(registration.into_data(), account)
            .await
    }

    /// Reads a chain's static registration record.
    pub async fn chain_static_details(&self, chain_id: u64) -> Result<ChainStaticDetails> {
        self.ensure_account().await?;
        let data = self.registry().chain_static_details(chain_id).await?;
        Ok(data.into())
    }

    /// Reads a chain's dynamic state.
    pub async fn chain_dynamic_details(&self, chain_id: u64) -> Result<ChainDynamicDetails> {
        self.ensure_account().await?;
        let data = self.registry().chain_dynamic_details(chain_id).await?;
        Ok(data.into())
    }

    /// Submits a vesting request for the absolute amount `tokens`.
    pub async fn request_vest_in_chain(&self, chain_id: u64, tokens: f64) -> Result<B256> {
        let account = self.ensure_account().await?;
        let amount = TokenAmount::from_tokens(tokens);
        self.registry()
            .request_vest_in_chain(chain_id, amount.base_units(), account)
            .await
    }

    /// Raises the account's vesting request by `tokens`: reads the current
    /// vesting balance and submits a request for the new total, replacing
    /// any pending request rather than incrementing it.
    pub async fn add_to_vest_in_chain(&self, chain_id: u64, tokens: f64) -> Result<B256> {
        let account = self.ensure_account().await?;
        let current = self.user_details(chain_id).await?.vesting;
        let total = (current + TokenAmount::from_tokens(tokens))?;
        self.registry()
            .request_vest_in_chain(chain_id, total.base_units(), account)
            .await
    }

    /// Confirms a previously requested vesting change.
    pub async fn confirm_vest_in_chain(&self, chain_id: u64) -> Result<B256> {
        let account = self.ensure_account().await?;
        self.registry().confirm_vest_in_chain(chain_id, account).await
    }

    /// Submits a deposit request for the absolute amount `tokens`.
    pub async fn request_deposit_in_chain(&self, chain_id: u64, tokens: f64) -> Result<B256> {
        let account = self.ensure_account().await?;
        let amount = TokenAmount::from_tokens(tokens);
        self.registry()
            .request_deposit_in_chain(chain_id, amount.base_units(), account)
            .await
    }

    /// Raises the account's deposit request by `tokens`, replacing any
    /// pending request with the new total.
    pub async fn add_to_deposit_in_chain(&self, chain_id: u64, tokens: f64) -> Result<B256> {
        let account = self.ensure_account().await?;
        let current = self.user_details(chain_id).await?.deposit;
        let total = (current + TokenAmount::from_tokens(tokens))?;
        self.registry()
            .request_deposit_in_chain(chain_id, total.base_units(), account)
            .await
    }

    /// Reads the active account's participation record on a chain.
    pub async fn user_details(&self, chain_id: u64) -> Result<UserDetails> {
        let account = self.ensure_account().await?;
        let data = self.registry().user_details(chain_id, account).await?;
        Ok(data.into())
    }

    /// Withdraws `tokens` from the account's vesting on a chain by
    /// submitting a request for (current − tokens).
    ///
    /// Fails with [`Error::InsufficientBalance`] before any contract call
    /// when `tokens` exceeds the tracked vesting balance.
    pub async fn withdraw_vest_in_chain(&self, chain_id: u64, tokens: f64) -> Result<B256> {
        let account = self.ensure_account().await?;
        let current = self.user_details(chain_id).await?.vesting;
        let requested = TokenAmount::from_tokens(tokens);
        if requested > current {
            return Err(Error::InsufficientBalance {
                kind: BalanceKind::Vesting,
                available: current.base_units_u128(),
                requested: requested.base_units_u128(),
            });
        }
        let remainder = (current - requested)?;
        self.registry()
            .request_vest_in_chain(chain_id, remainder.base_units(), account)
            .await
    }

    /// Withdraws `tokens` from the account's deposit on a chain by
    /// submitting a request for (current − tokens).
    ///
    /// Fails with [`Error::InsufficientBalance`] before any contract call
    /// when `tokens` exceeds the tracked deposit balance.
    pub async fn withdraw_deposit_in_chain(&self, chain_id: u64, tokens: f64) -> Result<B256> {
        let account = self.ensure_account().await?;
        let current = self.user_details(chain_id).await?.deposit;
        let requested = TokenAmount::from_tokens(tokens);
        if requested > current {
            return Err(Error::InsufficientBalance {
                kind: BalanceKind::Deposit,
                available: current.base_units_u128(),
                requested: requested.base_units_u128(),
            });
        }
        let remainder = (current - requested)?;
        self.registry()
            .request_deposit_in_chain(chain_id, remainder.base_units(), account)
            .await
    }

    /// Confirms a previously requested deposit withdrawal.
    pub async fn confirm_deposit_withdrawal_from_chain(&self, chain_id: u64) -> Result<B256> {
        let account = self.ensure_account().await?;
        self.registry()
            .confirm_deposit_withdrawal(chain_id, account)
            .await
    }

    /// Starts mining for the active account on a chain.
    pub async fn start_mining(&self, chain_id: u64) -> Result<B256> {
        let account = self.ensure_account().await?;
        self.registry().start_mining(chain_id, account).await
    }

    /// Stops mining for the active account on a chain.
    pub async fn stop_mining(&self, chain_id: u64) -> Result<B256> {
        let account = self.ensure_account().await?;
        self.registry().stop_mining(chain_id, account).await
    }

    /// Reads transaction metadata by hash. Goes through the same account
    /// guard as every other operation.
    pub async fn transaction(&self, hash: B256) -> Result<TransactionInfo> {
        self.ensure_account().await?;
        self.network_client
            .transaction(hash)
            .await?
            .ok_or_else(|| Error::TransactionNotFound(hash.to_string()))
    }
}
