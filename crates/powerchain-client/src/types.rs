//! Caller-facing record types.
//!
//! These mirror the wire records in `powerchain_provider::network`, with
//! every balance-like field carried as a [`TokenAmount`] and the
//! zero-address validator sentinel surfaced as `Option<Address>`.

use alloy::primitives::Address;
use powerchain_provider::network::{ChainDynamicData, ChainRegistrationData, ChainStaticData, UserDetailsData};
use serde::{Deserialize, Serialize};

use crate::amount::TokenAmount;

/// Parameters for registering a new chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRegistration {
    /// Human readable chain description.
    pub description: String,
    /// Initial endpoint of the chain.
    pub init_endpoint: String,
    /// Validator contract address; `None` means no validator and submits
    /// the canonical zero address.
    pub validator: Option<Address>,
    /// Minimum deposit required to transact on the chain.
    pub min_required_deposit: TokenAmount,
    /// Minimum vesting required to validate on the chain.
    pub min_required_vesting: TokenAmount,
    /// Vesting threshold above which the reward bonus applies.
    pub reward_bonus_required_vesting: TokenAmount,
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

impl ChainRegistration {
    /// Wire form: token amounts scaled to base units, absent validator
    /// replaced by the zero address.
    pub(crate) fn into_data(self) -> ChainRegistrationData {
        ChainRegistrationData {
            description: self.description,
            init_endpoint: self.init_endpoint,
            validator: self.validator.unwrap_or(Address::ZERO),
            min_required_deposit: self.min_required_deposit.base_units(),
            min_required_vesting: self.min_required_vesting.base_units(),
            reward_bonus_required_vesting: self.reward_bonus_required_vesting.base_units(),
            reward_bonus_percentage: self.reward_bonus_percentage,
            notary_period: self.notary_period,
            max_validators: self.max_validators,
            max_transactors: self.max_transactors,
            notary_vesting: self.notary_vesting,
            notary_participation: self.notary_participation,
        }
    }
}

/// Static registration record of a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainStaticDetails {
    /// Human readable chain description.
    pub description: String,
    /// Current endpoint of the chain.
    pub endpoint: String,
    /// Validator contract address; the zero-address sentinel reads back
    /// as `None`.
    pub validator: Option<Address>,
    /// Minimum deposit required to transact on the chain.
    pub min_required_deposit: TokenAmount,
    /// Minimum vesting required to validate on the chain.
    pub min_required_vesting: TokenAmount,
    /// Vesting threshold above which the reward bonus applies.
    pub reward_bonus_required_vesting: TokenAmount,
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
    /// Whether the registration is active.
    pub registered: bool,
}

impl From<ChainStaticData> for ChainStaticDetails {
    fn from(data: ChainStaticData) -> Self {
        Self {
            description: data.description,
            endpoint: data.endpoint,
            validator: (data.validator != Address::ZERO).then_some(data.validator),
            min_required_deposit: TokenAmount::from_base_units(data.min_required_deposit),
            min_required_vesting: TokenAmount::from_base_units(data.min_required_vesting),
            reward_bonus_required_vesting: TokenAmount::from_base_units(
                data.reward_bonus_required_vesting,
            ),
            reward_bonus_percentage: data.reward_bonus_percentage,
            notary_period: data.notary_period,
            max_validators: data.max_validators,
            max_transactors: data.max_transactors,
            notary_vesting: data.notary_vesting,
            notary_participation: data.notary_participation,
            registered: data.registered,
        }
    }
}

/// Dynamic state of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChainDynamicDetails {
    /// Total vested tokens across all users.
    pub total_vesting: TokenAmount,
    /// Total deposited tokens across all users.
    pub total_deposit: TokenAmount,
    /// Number of active validators.
    pub validators_count: u64,
    /// Number of active transactors.
    pub transactors_count: u64,
    /// Block number of the last notarization.
    pub last_notary_block: u64,
}

impl From<ChainDynamicData> for ChainDynamicDetails {
    fn from(data: ChainDynamicData) -> Self {
        Self {
            total_vesting: TokenAmount::from_base_units(data.total_vesting),
            total_deposit: TokenAmount::from_base_units(data.total_deposit),
            validators_count: data.validators_count,
            transactors_count: data.transactors_count,
            last_notary_block: data.last_notary_block,
        }
    }
}

/// Per (account, chain) participation record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserDetails {
    /// Deposited collateral.
    pub deposit: TokenAmount,
    /// Vested tokens.
    pub vesting: TokenAmount,
    /// Whether the account is currently mining on the chain.
    pub mining: bool,
}

impl From<UserDetailsData> for UserDetails {
    fn from(data: UserDetailsData) -> Self {
        Self {
            deposit: TokenAmount::from_base_units(data.deposit),
            vesting: TokenAmount::from_base_units(data.vesting),
            mining: data.mining,
        }
    }
}
