//! Wallet network configuration.
//!
//! This crate provides static, per-network configuration for the wallet
//! orchestrator:
//!
//! - [`Network`] -- which chain environment the session targets
//! - [`NetworkConfig`] -- endpoints and the fixed token contract for a network
//! - [`constants`] -- protocol-level parameters (token decimals, grant size)
//!
//! All data is compile-time constant (`&'static str`). Zero heap
//! allocations. Types are `Copy`.
//!
//! The relayer API key is deliberately **not** here: it is a runtime secret
//! supplied once per session when the wallet is constructed. `config` has no
//! dependencies, so it can be used freely as a leaf crate.

pub mod constants;

use std::fmt;

// ---------------------------------------------------------------------------
// Network
// ---------------------------------------------------------------------------

/// The chain environment a wallet session runs against.
///
/// Exactly one network is configured per session; the orchestrator never
/// switches networks at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Polygon Mumbai testnet (the faucet-backed test environment).
    Mumbai,
    /// Local development chain.
    Devnet,
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mumbai => write!(f, "mumbai"),
            Self::Devnet => write!(f, "devnet"),
        }
    }
}

// ---------------------------------------------------------------------------
// NetworkConfig
// ---------------------------------------------------------------------------

/// Network-specific configuration: endpoints and the token contract.
///
/// This is `Copy` -- just pointers to static data. Every balance, transfer,
/// and claim call in a session uses the single [`token_contract`] configured
/// here; multi-token and multi-chain support are out of scope.
///
/// [`token_contract`]: NetworkConfig::token_contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// The network this configuration is for.
    pub network: Network,

    /// JSON-RPC endpoint for the chain.
    pub rpc_url: &'static str,

    /// Relayer API endpoint (gasless submission and the faucet grant).
    pub relayer_url: &'static str,

    /// The fixed ERC20-style token contract address (18 decimals).
    pub token_contract: &'static str,
}

impl NetworkConfig {
    /// Get the configuration for a specific network.
    pub const fn for_network(network: Network) -> Self {
        match network {
            Network::Mumbai => Self::MUMBAI,
            Network::Devnet => Self::DEVNET,
        }
    }

    // -----------------------------------------------------------------------
    // Built-in network configurations
    // -----------------------------------------------------------------------

    /// Polygon Mumbai testnet configuration.
    pub const MUMBAI: Self = Self {
        network: Network::Mumbai,
        rpc_url: "https://rpc-mumbai.maticvigil.com",
        relayer_url: "https://api.rly.network",
        token_contract: "0x1C7312Cb60b40cF586e796FEdD60Cf243286c9E9",
    };

    /// Local development chain configuration.
    pub const DEVNET: Self = Self {
        network: Network::Devnet,
        rpc_url: "http://127.0.0.1:8545",
        relayer_url: "http://127.0.0.1:8075",
        token_contract: "0x5FbDB2315678afecb367f032d93F642f64180aa3",
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
