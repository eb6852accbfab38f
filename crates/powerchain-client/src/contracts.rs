//! Alloy-backed implementations of the network-side contracts.
//!
//! The ABIs are bound at compile time through `sol!`; the factory only
//! needs a deployment address to hand out a proxy. State changes go out
//! through a signer-filled HTTP provider with the sending account set
//! explicitly on every call.

use std::sync::Arc;

use alloy::consensus::Transaction as _;
use alloy::network::EthereumWallet;
use alloy::primitives::{Address, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::sol;
use async_trait::async_trait;
use powerchain_error::{Error, Result};
use powerchain_provider::network::{
    ChainDynamicData, ChainRegistrationData, ChainStaticData, NetworkClient, RegistryContract,
    TokenContract, TransactionInfo, UserDetailsData,
};
use url::Url;

sol! {
    #[sol(rpc)]
    interface IPowerChainToken {
        function mint(address to, uint256 amount) external returns (bool);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    #[sol(rpc)]
    interface IPowerChainRegistry {
        function registerChain(
            string description,
            string initEndpoint,
            address chainValidator,
            uint256 minRequiredDeposit,
            uint256 minRequiredVesting,
            uint256 rewardBonusRequiredVesting,
            uint256 rewardBonusPercentage,
            uint256 notaryPeriod,
            uint256 maxValidators,
            uint256 maxTransactors,
            uint256 notaryVesting,
            uint256 notaryParticipation
        ) external;

        function getChainStaticDetails(uint256 chainId) external view returns (
            string description,
            string endpoint,
            address chainValidator,
            uint256 minRequiredDeposit,
            uint256 minRequiredVesting,
            uint256 rewardBonusRequiredVesting,
            uint256 rewardBonusPercentage,
            uint256 notaryPeriod,
            uint256 maxValidators,
            uint256 maxTransactors,
            uint256 notaryVesting,
            uint256 notaryParticipation,
            bool registered
        );

        function getChainDynamicDetails(uint256 chainId) external view returns (
            uint256 totalVesting,
            uint256 totalDeposit,
            uint256 validatorsCount,
            uint256 transactorsCount,
            uint256 lastNotaryBlock
        );

        function requestVestInChain(uint256 chainId, uint256 amount) external;
        function confirmVestInChain(uint256 chainId) external;
        function requestDepositInChain(uint256 chainId, uint256 amount) external;
        function confirmDepositWithdrawalFromChain(uint256 chainId) external;
        function getUserDetails(uint256 chainId, address account) external view returns (
            uint256 deposit,
            uint256 vesting,
            bool mining
        );
        function startMining(uint256 chainId) external;
        function stopMining(uint256 chainId) external;
    }
}

fn as_u64(value: U256) -> u64 {
    value.try_into().unwrap_or(u64::MAX)
}

fn contract_err(e: impl std::fmt::Display) -> Error {
    Error::Contract(e.to_string())
}

/// Network client over an alloy HTTP provider with a local signer.
pub struct AlloyNetworkClient {
    provider: DynProvider,
}

impl AlloyNetworkClient {
    /// Connects to `rpc_url` with transactions signed by `private_key`.
    ///
    /// An empty or unparseable endpoint is [`Error::MissingClient`]; a
    /// malformed key is [`Error::Provider`].
    pub fn new(rpc_url: &str, private_key: &str) -> Result<Self> {
        if rpc_url.is_empty() {
            return Err(Error::MissingClient);
        }
        let url: Url = rpc_url.parse().map_err(|_| Error::MissingClient)?;
        let signer: PrivateKeySigner = private_key
            .parse()
            .map_err(|_| Error::Provider("private key is not a valid hex encoded secret".into()))?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();
        Ok(Self { provider })
    }
}

#[async_trait]
impl NetworkClient for AlloyNetworkClient {
    fn token_contract(&self, address: Address) -> Arc<dyn TokenContract> {
        Arc::new(AlloyTokenContract {
            instance: IPowerChainToken::new(address, self.provider.clone()),
        })
    }

    fn registry_contract(&self, address: Address) -> Arc<dyn RegistryContract> {
        Arc::new(AlloyRegistryContract {
            instance: IPowerChainRegistry::new(address, self.provider.clone()),
        })
    }

    async fn transaction(&self, hash: B256) -> Result<Option<TransactionInfo>> {
        let tx = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| Error::Rpc(e.to_string()))?;
        Ok(tx.map(|tx| TransactionInfo {
            hash,
            from: tx.inner.signer(),
            to: tx.to(),
            value: tx.value(),
            block_number: tx.block_number,
        }))
    }
}

struct AlloyTokenContract {
    instance: IPowerChainToken::IPowerChainTokenInstance<DynProvider>,
}

#[async_trait]
impl TokenContract for AlloyTokenContract {
    async fn mint(&self, to: Address, amount: U256, from: Address) -> Result<B256> {
        let pending = self
            .instance
            .mint(to, amount)
            .from(from)
            .send()
            .await
            .map_err(contract_err)?;
        Ok(*pending.tx_hash())
    }

    async fn approve(&self, spender: Address, amount: U256, from: Address) -> Result<B256> {
        let pending = self
            .instance
            .approve(spender, amount)
            .from(from)
            .send()
            .await
            .map_err(contract_err)?;
        Ok(*pending.tx_hash())
    }
}

struct AlloyRegistryContract {
    instance: IPowerChainRegistry::IPowerChainRegistryInstance<DynProvider>,
}

#[async_trait]
impl RegistryContract for AlloyRegistryContract {
    async fn register_chain(&self, params: ChainRegistrationData, from: Address) -> Result<B256> {
        let pending = self
            .instance
            .registerChain(
                params.description,
                params.init_endpoint,
                params.validator,
                params.min_required_deposit,
                params.min_required_vesting,
                params.reward_bonus_required_vesting,
                U256::from(params.reward_bonus_percentage),
                U256::from(params.notary_period),
                U256::from(params.max_validators),
                U256::from(params.max_transactors),
                U256::from(params.notary_vesting),
                U256::from(params.notary_participation),
            )
            .from(from)
            .send()
            .await
            .map_err(contract_err)?;
        Ok(*pending.tx_hash())
    }

    async fn chain_static_details(&self, chain_id: u64) -> Result<ChainStaticData> {
        let details = self
            .instance
            .getChainStaticDetails(U256::from(chain_id))
            .call()
            .await
            .map_err(contract_err)?;
        Ok(ChainStaticData {
            description: details.description,
            endpoint: details.endpoint,
            validator: details.chainValidator,
            min_required_deposit: details.minRequiredDeposit,
            min_required_vesting: details.minRequiredVesting,
            reward_bonus_required_vesting: details.rewardBonusRequiredVesting,
            reward_bonus_percentage: as_u64(details.rewardBonusPercentage),
            notary_period: as_u64(details.notaryPeriod),
            max_validators: as_u64(details.maxValidators),
            max_transactors: as_u64(details.maxTransactors),
            notary_vesting: as_u64(details.notaryVesting),
            notary_participation: as_u64(details.notaryParticipation),
            registered: details.registered,
        })
    }

    async fn chain_dynamic_details(&self, chain_id: u64) -> Result<ChainDynamicData> {
        let details = self
            .instance
            .getChainDynamicDetails(U256::from(chain_id))
            .call()
            .await
            .map_err(contract_err)?;
        Ok(ChainDynamicData {
            total_vesting: details.totalVesting,
            total_deposit: details.totalDeposit,
            validators_count: as_u64(details.validatorsCount),
            transactors_count: as_u64(details.transactorsCount),
            last_notary_block: as_u64(details.lastNotaryBlock),
        })
    }

    async fn request_vest_in_chain(
        &self,
        chain_id: u64,
        amount: U256,
        from: Address,
    ) -> Result<B256> {
        let pending = self
            .instance
            .requestVestInChain(U256::from(chain_id), amount)
            .from(from)
            .send()
            .await
            .map_err(contract_err)?;
        Ok(*pending.tx_hash())
    }

    async fn confirm_vest_in_chain(&self, chain_id: u64, from: Address) -> Result<B256> {
        let pending = self
            .instance
            .confirmVestInChain(U256::from(chain_id))
            .from(from)
            .send()
            .await
            .map_err(contract_err)?;
        Ok(*pending.tx_hash())
    }

    async fn request_deposit_in_chain(
        &self,
        chain_id: u64,
        amount: U256,
        from: Address,
    ) -> Result<B256> {
        let pending = self
            .instance
            .requestDepositInChain(U256::from(chain_id), amount)
            .from(from)
            .send()
            .await
            .map_err(contract_err)?;
        Ok(*pending.tx_hash())
    }

    async fn confirm_deposit_withdrawal(&self, chain_id: u64, from: Address) -> Result<B256> {
        let pending = self
            .instance
            .confirmDepositWithdrawalFromChain(U256::from(chain_id))
            .from(from)
            .send()
            .await
            .map_err(contract_err)?;
        Ok(*pending.tx_hash())
    }

    async fn user_details(&self, chain_id: u64, account: Address) -> Result<UserDetailsData> {
        let details = self
            .instance
            .getUserDetails(U256::from(chain_id), account)
            .call()
            .await
            .map_err(contract_err)?;
        Ok(UserDetailsData {
            deposit: details.deposit,
            vesting: details.vesting,
            mining: details.mining,
        })
    }

    async fn start_mining(&self, chain_id: u64, from: Address) -> Result<B256> {
        let pending = self
            .instance
            .startMining(U256::from(chain_id))
            .from(from)
            .send()
            .await
            .map_err(contract_err)?;
        Ok(*pending.tx_hash())
    }

    async fn stop_mining(&self, chain_id: u64, from: Address) -> Result<B256> {
        let pending = self
            .instance
            .stopMining(U256::from(chain_id))
            .from(from)
            .send()
            .await
            .map_err(contract_err)?;
        Ok(*pending.tx_hash())
    }
}
