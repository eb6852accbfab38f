//! # PowerChain Client
//!
//! A promise-based client for the PowerChain token contract (ERC20-style)
//! and the chain-registry contract. The client manages wallet
//! authorization, binds both contract proxies to the deployment for the
//! detected network, converts between human token amounts and on-chain
//! base units at the boundary, and forwards every operation to the
//! contracts.
//!
//! This library uses the [alloy](https://github.com/alloy-rs/alloy)
//! framework for contract bindings and transports.
//!
//! ## Quickstart Guide
//!
//! Construct a [`ChainClient`] from a wallet provider and a network
//! client, then drive the registry through it:
//!
//! ```no_run
//! use std::sync::Arc;
//! use powerchain_client::prelude::*;
//!
//! # async fn powerchain() -> powerchain_client::Result<()> {
//! let provider = Arc::new(LocalWalletProvider::new(
//!     "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
//!     1,
//! )?);
//! let network = Arc::new(AlloyNetworkClient::new(
//!     "https://eth.llamarpc.com",
//!     "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
//! )?);
//! let client = ChainClient::new(provider, network);
//!
//! println!("network: {:?}", client.network_name());
//! let account = client.login().await?;
//! println!("active account: {account}");
//!
//! let details = client.user_details(5).await?;
//! println!("vesting: {} tokens", details.vesting.tokens());
//! let tx = client.withdraw_vest_in_chain(5, 30.0).await?;
//! println!("submitted: {tx}");
//! # Ok(())
//! # }
//! ```
//!
//! Every monetary value sent to a contract is in fixed-precision base
//! units and every value returned to the caller is a [`TokenAmount`]
//! readable in human units; no mixed-unit value crosses the boundary in
//! either direction.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod amount;
pub use amount::{TokenAmount, BASE_UNITS_PER_TOKEN, TOKEN_DECIMALS};
mod client;
pub use client::ChainClient;
mod contracts;
pub use contracts::AlloyNetworkClient;
mod network;
pub use network::{ContractAddresses, Network, MAIN_ADDRESSES, ROPSTEN_ADDRESSES};
mod types;
pub use types::{ChainDynamicDetails, ChainRegistration, ChainStaticDetails, UserDetails};

pub use powerchain_error::{BalanceKind, Error, Result};
pub use alloy;
pub mod prelude;
