//! The network-side collaborators: the contract factory and the two
//! contract proxies the client drives.
//!
//! Every monetary value on these interfaces is in on-chain base units
//! (`U256`); converting to and from human token amounts is the caller's
//! concern. State-changing methods take the sending account explicitly and
//! return the submitted transaction hash without waiting for inclusion.

use std::sync::Arc;

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use powerchain_error::Result;

/// Parameters for registering a new chain, in wire form.
///
/// The validator field is never absent here: a registration without a
/// validator carries the canonical zero address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRegistrationData {
    /// Human readable chain description.
    pub description: String,
    /// Initial endpoint of the chain.
    pub init_endpoint: String,
    /// Validator contract address, or the zero address for none.
    pub validator: Address,
    /// Minimum required deposit, base units.
    pub min_required_deposit: U256,
    /// Minimum required vesting, base units.
    pub min_required_vesting: U256,
    /// Vesting threshold for the reward bonus, base units.
    pub reward_bonus_required_vesting: U256,
    /// Reward bonus percentage. Never scaled.
    pub reward_bonus_percentage: u64,
    /// Notary period in blocks.
    pub notary_period: u64,
    /// Validator capacity limit.
    pub max_validators: u64,
    /// Transactor capacity limit.
    pub max_transactors: u64,
    /// Notary vesting parameter.
    pub notary_vesting: u64,
    /// Notary participation parameter.
    pub notary_participation: u64,
}

/// Static chain registration record as the registry stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStaticData {
    /// Human readable chain description.
    pub description: String,
    /// Current endpoint of the chain.
    pub endpoint: String,
    /// Validator contract address; zero address means none.
    pub validator: Address,
    /// Minimum required deposit, base units.
    pub min_required_deposit: U256,
    /// Minimum required vesting, base units.
    pub min_required_vesting: U256,
    /// Vesting threshold for the reward bonus, base units.
    pub reward_bonus_required_vesting: U256,
    /// Reward bonus percentage.
    pub reward_bonus_percentage: u64,
    /// Notary period in blocks.
    pub notary_period: u64,
    /// Validator capacity limit.
    pub max_validators: u64,
    /// Transactor capacity limit.
    pub max_transactors: u64,
    /// Notary vesting parameter.
    pub notary_vesting: u64,
    /// Notary participation parameter.
    pub notary_participation: u64,
    /// Whether the chain registration is active.
    pub registered: bool,
}

/// Dynamic chain state as the registry reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainDynamicData {
    /// Total vested tokens across all users, base units.
    pub total_vesting: U256,
    /// Total deposited tokens across all users, base units.
    pub total_deposit: U256,
    /// Number of active validators.
    pub validators_count: u64,
    /// Number of active transactors.
    pub transactors_count: u64,
    /// Block number of the last notarization.
    pub last_notary_block: u64,
}

/// Per (account, chain) participation record, base units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserDetailsData {
    /// Deposited collateral, base units.
    pub deposit: U256,
    /// Vested tokens, base units.
    pub vesting: U256,
    /// Whether the account is currently mining on the chain.
    pub mining: bool,
}

/// Transaction metadata read by hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionInfo {
    /// Transaction hash.
    pub hash: B256,
    /// Sender address.
    pub from: Address,
    /// Recipient address; `None` for contract creation.
    pub to: Option<Address>,
    /// Transferred value in wei.
    pub value: U256,
    /// Block the transaction was included in, if any.
    pub block_number: Option<u64>,
}

/// Proxy for the ERC20-style token contract.
#[async_trait]
pub trait TokenContract: Send + Sync {
    /// Mints `amount` base units to `to`, sent from `from`.
    async fn mint(&self, to: Address, amount: U256, from: Address) -> Result<B256>;

    /// Approves `spender` for `amount` base units, sent from `from`.
    async fn approve(&self, spender: Address, amount: U256, from: Address) -> Result<B256>;
}

/// Proxy for the chain-registry contract.
#[async_trait]
pub trait RegistryContract: Send + Sync {
    /// Registers a new chain.
    async fn register_chain(&self, params: ChainRegistrationData, from: Address) -> Result<B256>;

    /// Reads the static registration record of a chain.
    async fn chain_static_details(&self, chain_id: u64) -> Result<ChainStaticData>;

    /// Reads the dynamic state of a chain.
    async fn chain_dynamic_details(&self, chain_id: u64) -> Result<ChainDynamicData>;

    /// Submits a vesting request for the given absolute amount.
    async fn request_vest_in_chain(
        &self,
        chain_id: u64,
        amount: U256,
        from: Address,
    ) -> Result<B256>;

    /// Confirms a previously requested vesting change.
    async fn confirm_vest_in_chain(&self, chain_id: u64, from: Address) -> Result<B256>;

    /// Submits a deposit request for the given absolute amount.
    async fn request_deposit_in_chain(
        &self,
        chain_id: u64,
        amount: U256,
        from: Address,
    ) -> Result<B256>;

    /// Confirms a previously requested deposit withdrawal.
    async fn confirm_deposit_withdrawal(&self, chain_id: u64, from: Address) -> Result<B256>;

    /// Reads the participation record of `account` on a chain.
    async fn user_details(&self, chain_id: u64, account: Address) -> Result<UserDetailsData>;

    /// Starts mining for `from` on a chain.
    async fn start_mining(&self, chain_id: u64, from: Address) -> Result<B256>;

    /// Stops mining for `from` on a chain.
    async fn stop_mining(&self, chain_id: u64, from: Address) -> Result<B256>;
}

/// The network client: a contract factory plus a by-hash transaction read.
///
/// Given a contract address, the factory yields a proxy bound to that
/// address; the ABI is supplied by the implementation.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Binds a token contract proxy to `address`.
    fn token_contract(&self, address: Address) -> Arc<dyn TokenContract>;

    /// Binds a registry contract proxy to `address`.
    fn registry_contract(&self, address: Address) -> Arc<dyn RegistryContract>;

    /// Reads transaction metadata by hash. `Ok(None)` means the node does
    /// not know the transaction.
    async fn transaction(&self, hash: B256) -> Result<Option<TransactionInfo>>;
}
