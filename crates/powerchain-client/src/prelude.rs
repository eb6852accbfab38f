//! This prelude module simplifies importing many useful items from the powerchain_client crate using a glob import.
//!
//! To use this prelude, add the following to your code:
//! ```
//! use powerchain_client::prelude::*;
//! ```

pub use crate::{
    AlloyNetworkClient, BalanceKind, ChainClient, ChainDynamicDetails, ChainRegistration,
    ChainStaticDetails, ContractAddresses, Error, Network, Result, TokenAmount, UserDetails,
};

pub use powerchain_provider::{LocalWalletProvider, WalletProvider};

pub use alloy::primitives::{Address, B256, U256};
