//! Client behavior tests against mock collaborators.
//!
//! No wallet and no node: the provider counts authorizations and
//! subscriptions, the contract proxies record every submission, and the
//! tests assert on exactly what would have gone on chain.

use std::sync::Arc;

use powerchain_client::prelude::*;
use powerchain_client::BASE_UNITS_PER_TOKEN;
use powerchain_provider::network::{TransactionInfo, UserDetailsData};
use powerchain_testing::{MockNetworkClient, MockWalletProvider, RegistryCall, TokenCall, MOCK_TX_HASH};

fn test_account() -> Address {
    Address::repeat_byte(0x42)
}

fn whole(tokens: u64) -> U256 {
    U256::from(tokens) * U256::from(BASE_UNITS_PER_TOKEN)
}

fn setup(
    network_version: &str,
    accounts: Vec<Address>,
) -> (Arc<MockWalletProvider>, Arc<MockNetworkClient>, ChainClient) {
    let provider = Arc::new(MockWalletProvider::new(network_version).with_accounts(accounts));
    let network = Arc::new(MockNetworkClient::new());
    let client = ChainClient::new(provider.clone(), network.clone());
    (provider, network, client)
}

mod construction {
    use super::*;

    #[test]
    fn network_id_1_resolves_to_main() {
        let (_, _, client) = setup("1", vec![]);
        assert_eq!(client.network(), Some(Network::Main));
        assert_eq!(client.network_name(), Some("main"));
    }

    #[test]
    fn network_id_3_resolves_to_ropsten() {
        let (_, _, client) = setup("3", vec![]);
        assert_eq!(client.network_name(), Some("ropsten"));
    }

    #[test]
    fn unrecognized_network_id_still_constructs() {
        let (_, _, client) = setup("42", vec![]);
        assert_eq!(client.network(), None);
        assert_eq!(client.network_name(), None);
    }

    #[test]
    fn construction_binds_default_deployment() {
        let (_, network, _) = setup("3", vec![]);
        assert_eq!(
            network.token_bindings(),
            vec![powerchain_client::ROPSTEN_ADDRESSES.token]
        );
        assert_eq!(
            network.registry_bindings(),
            vec![powerchain_client::ROPSTEN_ADDRESSES.registry]
        );
    }

    #[test]
    fn has_metamask_reflects_provider() {
        let provider = Arc::new(MockWalletProvider::new("1").with_metamask(false));
        let network = Arc::new(MockNetworkClient::new());
        let client = ChainClient::new(provider, network);
        assert!(!client.has_metamask());
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn zero_accounts_fails_and_sets_no_account() {
        let (_, _, client) = setup("1", vec![]);
        let err = client.login().await.unwrap_err();
        assert!(matches!(err, Error::NoAccounts));
        assert_eq!(client.account(), None);
    }

    #[tokio::test]
    async fn records_first_authorized_account() {
        let other = Address::repeat_byte(0x99);
        let (_, _, client) = setup("1", vec![test_account(), other]);
        let active = client.login().await.unwrap();
        assert_eq!(active, test_account());
        assert_eq!(client.account(), Some(test_account()));
    }

    #[tokio::test]
    async fn double_login_registers_listener_once() {
        let (provider, _, client) = setup("1", vec![test_account()]);
        client.login().await.unwrap();
        client.login().await.unwrap();
        assert_eq!(provider.subscription_count(), 1);
    }

    #[tokio::test]
    async fn account_change_updates_active_account() {
        let (provider, _, client) = setup("1", vec![test_account()]);
        client.login().await.unwrap();

        let switched = Address::repeat_byte(0x77);
        provider.fire_accounts_changed(vec![switched]);
        assert_eq!(client.account(), Some(switched));

        provider.fire_accounts_changed(vec![]);
        assert_eq!(client.account(), None);
    }

    #[tokio::test]
    async fn provider_rejection_propagates_unchanged() {
        let provider = Arc::new(MockWalletProvider::new("1").deny_with("user rejected"));
        let network = Arc::new(MockNetworkClient::new());
        let client = ChainClient::new(provider, network);
        let err = client.login().await.unwrap_err();
        assert!(matches!(err, Error::Provider(m) if m == "user rejected"));
    }
}

mod guard {
    use super::*;

    #[tokio::test]
    async fn authenticated_op_logs_in_exactly_once() {
        let (provider, network, client) = setup("1", vec![test_account()]);
        assert_eq!(client.account(), None);

        client.mint(10.0).await.unwrap();
        assert_eq!(provider.authorization_count(), 1);
        assert_eq!(
            network.token().calls(),
            vec![TokenCall::Mint {
                to: test_account(),
                amount: whole(10),
                from: test_account(),
            }]
        );
    }

    #[tokio::test]
    async fn second_op_reuses_active_account() {
        let (provider, _, client) = setup("1", vec![test_account()]);
        client.mint(1.0).await.unwrap();
        client.start_mining(5).await.unwrap();
        assert_eq!(provider.authorization_count(), 1);
    }

    #[tokio::test]
    async fn transaction_read_goes_through_guard() {
        let (provider, network, client) = setup("1", vec![test_account()]);
        network.insert_transaction(TransactionInfo {
            hash: MOCK_TX_HASH,
            from: test_account(),
            to: Some(Address::repeat_byte(0x01)),
            value: U256::ZERO,
            block_number: Some(7),
        });

        let info = client.transaction(MOCK_TX_HASH).await.unwrap();
        assert_eq!(info.block_number, Some(7));
        assert_eq!(provider.authorization_count(), 1);
    }

    #[tokio::test]
    async fn unknown_transaction_hash_is_not_found() {
        let (_, _, client) = setup("1", vec![test_account()]);
        let err = client.transaction(B256::repeat_byte(0x0F)).await.unwrap_err();
        assert!(matches!(err, Error::TransactionNotFound(_)));
    }
}

mod token_ops {
    use super::*;

    #[tokio::test]
    async fn mint_scales_to_base_units() {
        let (_, network, client) = setup("1", vec![test_account()]);
        client.mint(2.5).await.unwrap();
        assert_eq!(
            network.token().calls(),
            vec![TokenCall::Mint {
                to: test_account(),
                amount: U256::from(2_500_000_000_000_000_000u128),
                from: test_account(),
            }]
        );
    }

    #[tokio::test]
    async fn approve_targets_registry_deployment() {
        let (_, network, client) = setup("1", vec![test_account()]);
        client.approve(100.0).await.unwrap();
        assert_eq!(
            network.token().calls(),
            vec![TokenCall::Approve {
                spender: powerchain_client::MAIN_ADDRESSES.registry,
                amount: whole(100),
                from: test_account(),
            }]
        );
    }
}

mod registration {
    use super::*;

    fn registration(validator: Option<Address>) -> ChainRegistration {
        ChainRegistration {
            description: "powerchain side chain".into(),
            init_endpoint: "https://chain.example".into(),
            validator,
            min_required_deposit: TokenAmount::from_whole(1000),
            min_required_vesting: TokenAmount::from_whole(500),
            reward_bonus_required_vesting: TokenAmount::from_whole(5000),
            reward_bonus_percentage: 15,
            notary_period: 64,
            max_validators: 21,
            max_transactors: 1000,
            notary_vesting: 33,
            notary_participation: 66,
        }
    }

    #[tokio::test]
    async fn absent_validator_submits_zero_address() {
        let (_, network, client) = setup("1", vec![test_account()]);
        client.register_chain(registration(None)).await.unwrap();

        let calls = network.registry().calls();
        let RegistryCall::RegisterChain { params, from } = &calls[0] else {
            panic!("expected a register-chain submission, got {calls:?}");
        };
        assert_eq!(params.validator, Address::ZERO);
        assert_eq!(*from, test_account());
    }

    #[tokio::test]
    async fn token_fields_scaled_plain_fields_not() {
        let (_, network, client) = setup("1", vec![test_account()]);
        let validator = Address::repeat_byte(0x05);
        client
            .register_chain(registration(Some(validator)))
            .await
            .unwrap();

        let calls = network.registry().calls();
        let RegistryCall::RegisterChain { params, .. } = &calls[0] else {
            panic!("expected a register-chain submission, got {calls:?}");
        };
        assert_eq!(params.validator, validator);
        assert_eq!(params.min_required_deposit, whole(1000));
        assert_eq!(params.min_required_vesting, whole(500));
        assert_eq!(params.reward_bonus_required_vesting, whole(5000));
        assert_eq!(params.reward_bonus_percentage, 15);
        assert_eq!(params.notary_period, 64);
        assert_eq!(params.max_validators, 21);
        assert_eq!(params.max_transactors, 1000);
    }
}

mod vesting {
    use super::*;

    fn script_vesting(network: &MockNetworkClient, chain_id: u64, tokens: u64) {
        network.registry().set_user_details(
            chain_id,
            test_account(),
            UserDetailsData {
                deposit: U256::ZERO,
                vesting: whole(tokens),
                mining: false,
            },
        );
    }

    #[tokio::test]
    async fn withdraw_within_balance_submits_remainder() {
        let (_, network, client) = setup("1", vec![test_account()]);
        script_vesting(&network, 5, 100);

        client.withdraw_vest_in_chain(5, 30.0).await.unwrap();
        assert_eq!(
            network.registry().calls(),
            vec![RegistryCall::RequestVest {
                chain_id: 5,
                amount: whole(70),
                from: test_account(),
            }]
        );
    }

    #[tokio::test]
    async fn withdraw_over_balance_fails_without_contract_call() {
        let (_, network, client) = setup("1", vec![test_account()]);
        script_vesting(&network, 5, 100);

        let err = client.withdraw_vest_in_chain(5, 130.0).await.unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientBalance {
                kind: BalanceKind::Vesting,
                ..
            }
        ));
        assert!(network.registry().calls().is_empty());
    }

    #[tokio::test]
    async fn withdraw_exact_balance_submits_zero() {
        let (_, network, client) = setup("1", vec![test_account()]);
        script_vesting(&network, 5, 100);

        client.withdraw_vest_in_chain(5, 100.0).await.unwrap();
        assert_eq!(
            network.registry().calls(),
            vec![RegistryCall::RequestVest {
                chain_id: 5,
                amount: U256::ZERO,
                from: test_account(),
            }]
        );
    }

    #[tokio::test]
    async fn add_to_vest_replaces_with_new_total() {
        let (_, network, client) = setup("1", vec![test_account()]);
        script_vesting(&network, 5, 100);

        client.add_to_vest_in_chain(5, 25.0).await.unwrap();
        assert_eq!(
            network.registry().calls(),
            vec![RegistryCall::RequestVest {
                chain_id: 5,
                amount: whole(125),
                from: test_account(),
            }]
        );
    }

    #[tokio::test]
    async fn request_and_confirm_pass_through() {
        let (_, network, client) = setup("1", vec![test_account()]);
        client.request_vest_in_chain(5, 10.0).await.unwrap();
        client.confirm_vest_in_chain(5).await.unwrap();
        assert_eq!(
            network.registry().calls(),
            vec![
                RegistryCall::RequestVest {
                    chain_id: 5,
                    amount: whole(10),
                    from: test_account(),
                },
                RegistryCall::ConfirmVest {
                    chain_id: 5,
                    from: test_account(),
                },
            ]
        );
    }
}

mod deposits {
    use super::*;

    fn script_deposit(network: &MockNetworkClient, chain_id: u64, tokens: u64) {
        network.registry().set_user_details(
            chain_id,
            test_account(),
            UserDetailsData {
                deposit: whole(tokens),
                vesting: U256::ZERO,
                mining: false,
            },
        );
    }

    #[tokio::test]
    async fn withdraw_over_deposit_fails_without_contract_call() {
        let (_, network, client) = setup("1", vec![test_account()]);
        script_deposit(&network, 5, 40);

        let err = client.withdraw_deposit_in_chain(5, 50.0).await.unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientBalance {
                kind: BalanceKind::Deposit,
                ..
            }
        ));
        assert!(network.registry().calls().is_empty());
    }

    #[tokio::test]
    async fn withdraw_within_deposit_submits_remainder() {
        let (_, network, client) = setup("1", vec![test_account()]);
        script_deposit(&network, 5, 40);

        client.withdraw_deposit_in_chain(5, 15.0).await.unwrap();
        assert_eq!(
            network.registry().calls(),
            vec![RegistryCall::RequestDeposit {
                chain_id: 5,
                amount: whole(25),
                from: test_account(),
            }]
        );
    }

    #[tokio::test]
    async fn add_to_deposit_replaces_with_new_total() {
        let (_, network, client) = setup("1", vec![test_account()]);
        script_deposit(&network, 5, 40);

        client.add_to_deposit_in_chain(5, 60.0).await.unwrap();
        assert_eq!(
            network.registry().calls(),
            vec![RegistryCall::RequestDeposit {
                chain_id: 5,
                amount: whole(100),
                from: test_account(),
            }]
        );
    }

    #[tokio::test]
    async fn confirm_withdrawal_passes_through() {
        let (_, network, client) = setup("1", vec![test_account()]);
        client.confirm_deposit_withdrawal_from_chain(5).await.unwrap();
        assert_eq!(
            network.registry().calls(),
            vec![RegistryCall::ConfirmDepositWithdrawal {
                chain_id: 5,
                from: test_account(),
            }]
        );
    }
}

mod reads {
    use super::*;
    use powerchain_provider::network::{ChainDynamicData, ChainStaticData};

    #[tokio::test]
    async fn user_details_convert_inward() {
        let (_, network, client) = setup("1", vec![test_account()]);
        network.registry().set_user_details(
            5,
            test_account(),
            UserDetailsData {
                deposit: whole(40),
                vesting: whole(100),
                mining: true,
            },
        );

        let details = client.user_details(5).await.unwrap();
        assert_eq!(details.deposit.tokens(), 40.0);
        assert_eq!(details.vesting.tokens(), 100.0);
        assert!(details.mining);
    }

    #[tokio::test]
    async fn static_details_convert_inward() {
        let (_, network, client) = setup("1", vec![test_account()]);
        network.registry().set_static_details(
            5,
            ChainStaticData {
                description: "side chain".into(),
                endpoint: "https://chain.example".into(),
                validator: Address::ZERO,
                min_required_deposit: whole(1000),
                min_required_vesting: whole(500),
                reward_bonus_required_vesting: whole(5000),
                reward_bonus_percentage: 15,
                notary_period: 64,
                max_validators: 21,
                max_transactors: 1000,
                notary_vesting: 33,
                notary_participation: 66,
                registered: true,
            },
        );

        let details = client.chain_static_details(5).await.unwrap();
        assert_eq!(details.validator, None);
        assert_eq!(details.min_required_deposit.tokens(), 1000.0);
        assert_eq!(details.reward_bonus_percentage, 15);
        assert!(details.registered);
    }

    #[tokio::test]
    async fn dynamic_details_convert_inward() {
        let (_, network, client) = setup("1", vec![test_account()]);
        network.registry().set_dynamic_details(
            5,
            ChainDynamicData {
                total_vesting: whole(123),
                total_deposit: whole(456),
                validators_count: 7,
                transactors_count: 11,
                last_notary_block: 9000,
            },
        );

        let details = client.chain_dynamic_details(5).await.unwrap();
        assert_eq!(details.total_vesting.tokens(), 123.0);
        assert_eq!(details.total_deposit.tokens(), 456.0);
        assert_eq!(details.validators_count, 7);
    }

    #[tokio::test]
    async fn unknown_chain_read_propagates_contract_error() {
        let (_, _, client) = setup("1", vec![test_account()]);
        let err = client.chain_static_details(99).await.unwrap_err();
        assert!(matches!(err, Error::Contract(_)));
    }
}

mod scenarios {
    use super::*;

    #[tokio::test]
    async fn vesting_and_deposit_flow_under_a_single_authorization() {
        let (provider, network, client) = setup("1", vec![test_account()]);
        network.registry().set_user_details(
            5,
            test_account(),
            UserDetailsData {
                deposit: whole(40),
                vesting: whole(100),
                mining: false,
            },
        );

        client.withdraw_vest_in_chain(5, 30.0).await.unwrap();
        let err = client.withdraw_deposit_in_chain(5, 50.0).await.unwrap_err();
        assert!(matches!(
            err,
            Error::InsufficientBalance {
                kind: BalanceKind::Deposit,
                ..
            }
        ));

        // Only the vesting remainder went out; the rejected deposit
        // withdrawal submitted nothing.
        assert_eq!(
            network.registry().calls(),
            vec![RegistryCall::RequestVest {
                chain_id: 5,
                amount: whole(70),
                from: test_account(),
            }]
        );
        assert_eq!(provider.authorization_count(), 1);
        assert_eq!(provider.subscription_count(), 1);
    }
}

mod reinitialization {
    use super::*;

    #[tokio::test]
    async fn overrides_rebind_both_proxies() {
        let (_, network, client) = setup("1", vec![test_account()]);
        client.login().await.unwrap();

        let overrides = ContractAddresses {
            token: Address::repeat_byte(0xA1),
            registry: Address::repeat_byte(0xB2),
        };
        client.reinitialize(Some(overrides));

        assert_eq!(
            network.token_bindings(),
            vec![
                powerchain_client::MAIN_ADDRESSES.token,
                Address::repeat_byte(0xA1)
            ]
        );
        assert_eq!(
            network.registry_bindings(),
            vec![
                powerchain_client::MAIN_ADDRESSES.registry,
                Address::repeat_byte(0xB2)
            ]
        );
        // The active account is unaffected.
        assert_eq!(client.account(), Some(test_account()));
    }

    #[tokio::test]
    async fn approve_after_reinitialize_targets_new_registry() {
        let (_, network, client) = setup("1", vec![test_account()]);
        let overrides = ContractAddresses {
            token: Address::repeat_byte(0xA1),
            registry: Address::repeat_byte(0xB2),
        };
        client.reinitialize(Some(overrides));

        client.approve(1.0).await.unwrap();
        assert_eq!(
            network.token().calls(),
            vec![TokenCall::Approve {
                spender: Address::repeat_byte(0xB2),
                amount: whole(1),
                from: test_account(),
            }]
        );
    }

    #[tokio::test]
    async fn no_overrides_rebinds_network_defaults() {
        let (_, network, client) = setup("3", vec![test_account()]);
        client.reinitialize(None);
        assert_eq!(
            network.registry_bindings(),
            vec![
                powerchain_client::ROPSTEN_ADDRESSES.registry,
                powerchain_client::ROPSTEN_ADDRESSES.registry,
            ]
        );
    }
}
