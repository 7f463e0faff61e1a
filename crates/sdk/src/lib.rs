//! Wallet session and transfer orchestrator.
//!
//! The orchestrator turns user intent -- create or import an account, pay a
//! scanned address, queue and drain a batch of transfers, claim the one-time
//! faucet grant -- into sequenced calls against two external providers:
//!
//! - **Key provider** (`provider::KeyProvider`) for account lifecycle and
//!   recovery-phrase access. Private key material never crosses this
//!   boundary.
//! - **Ledger provider** (`provider::LedgerProvider`) for balance reads,
//!   exact-amount token transfers, and the faucet grant, against one fixed
//!   token contract on one configured network.
//!
//! # Architecture
//!
//! [`Wallet`] is the entry point: `Clone`-able (wraps an `Arc`), generic
//! over the two provider implementations. Operations live in focused
//! modules:
//!
//! - [`session`] -- account lifecycle state machine (probe/create/import)
//! - [`amount`] -- decimal-to-base-units codec
//! - [`transfer`] -- single payment submission and outcome classification
//! - [`batch`] -- client-side transfer queue with sequential drain
//! - [`claim`] -- balance reads and the one-time grant
//!
//! A session-wide submission lock serializes every provider submission:
//! the network sequences transactions per address, so exactly one transfer
//! may be in flight at a time across the single-payment and batch paths.
//!
//! # Usage
//!
//! ```no_run
//! use config::NetworkConfig;
//! use provider::mock::{MockKeyProvider, MockLedger};
//! use sdk::{DrainPolicy, Wallet, WalletConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), sdk::WalletError> {
//! let wallet = Wallet::new(
//!     WalletConfig {
//!         network: NetworkConfig::MUMBAI,
//!         api_key: "relayer-api-key".into(),
//!         drain_policy: DrainPolicy::default(),
//!     },
//!     MockKeyProvider::new(),
//!     MockLedger::new(),
//!     CancellationToken::new(),
//! );
//!
//! wallet.probe_existing_account().await;
//! let address = wallet.create_account(Default::default()).await?;
//!
//! wallet.add_to_batch(&address, "1.5")?;
//! let report = wallet.drain_batch().await?;
//! assert!(report.all_succeeded());
//! # Ok(())
//! # }
//! ```

pub mod amount;
pub mod batch;
pub mod claim;
pub mod error;
pub mod session;
pub mod transfer;

pub use batch::{DrainPolicy, DrainReport, IntentId, TransferIntent};
pub use claim::ClaimOutcome;
pub use error::WalletError;
pub use session::SessionState;
pub use transfer::{TransferOutcome, TransferStatus};

use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use config::NetworkConfig;
use provider::{Address, KeyProvider, LedgerProvider};
use tokio_util::sync::CancellationToken;

use crate::batch::BatchState;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Wallet session configuration, fixed at construction.
#[derive(Clone)]
pub struct WalletConfig {
    /// Network endpoints and the fixed token contract.
    pub network: NetworkConfig,
    /// Relayer API key for this session.
    pub api_key: String,
    /// What happens to the batch queue when a drain aborts mid-run.
    pub drain_policy: DrainPolicy,
}

// Manual Debug: the API key is a secret and must not leak into logs.
impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("network", &self.network)
            .field("api_key", &"<redacted>")
            .field("drain_policy", &self.drain_policy)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// Shared state across all wallet operations.
pub(crate) struct WalletInner<K, L> {
    pub config: WalletConfig,
    pub keys: K,
    pub ledger: L,
    /// Account lifecycle state (`Unknown` until the first probe).
    pub session: RwLock<SessionState>,
    /// The active account address, set on probe/create/import success.
    pub address: RwLock<Option<Address>>,
    /// Session-lifetime recovery phrase cache. Cleared by
    /// [`Wallet::forget_recovery_phrase`] and [`Wallet::shutdown`].
    pub phrase_cache: RwLock<Option<String>>,
    /// Pending transfer intents, insertion order = submission order.
    pub batch: Mutex<BatchState>,
    /// Session-wide submission lock: one transfer in flight at a time
    /// across the single-payment and batch-drain paths.
    pub submit_lock: tokio::sync::Mutex<()>,
    pub cancel: CancellationToken,
}

/// The wallet orchestrator entry point.
///
/// `Clone`-able (wraps an `Arc<WalletInner>`). Generic over the key and
/// ledger provider implementations.
///
/// # Type Parameters
///
/// - `K`: Key/account provider (create, import, probe, recovery phrase)
/// - `L`: Network/ledger provider (balance, transfer, grant)
pub struct Wallet<K, L> {
    pub(crate) inner: Arc<WalletInner<K, L>>,
}

// Manual Clone: we don't require K, L to be Clone.
impl<K, L> Clone for Wallet<K, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, L> fmt::Debug for Wallet<K, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("config", &self.inner.config)
            .finish()
    }
}

impl<K, L> Wallet<K, L>
where
    K: KeyProvider,
    L: LedgerProvider,
{
    /// Creates a new wallet session.
    ///
    /// No provider I/O happens during construction; call
    /// [`probe_existing_account`](Self::probe_existing_account) to resolve
    /// the initial session state.
    pub fn new(config: WalletConfig, keys: K, ledger: L, cancel: CancellationToken) -> Self {
        Self {
            inner: Arc::new(WalletInner {
                config,
                keys,
                ledger,
                session: RwLock::new(SessionState::Unknown),
                address: RwLock::new(None),
                phrase_cache: RwLock::new(None),
                batch: Mutex::new(BatchState::default()),
                submit_lock: tokio::sync::Mutex::new(()),
                cancel,
            }),
        }
    }

    /// Returns a reference to the session configuration.
    pub fn config(&self) -> &WalletConfig {
        &self.inner.config
    }

    /// Returns a reference to the ledger provider.
    pub fn ledger(&self) -> &L {
        &self.inner.ledger
    }

    /// Returns a reference to the cancellation token.
    pub fn cancel(&self) -> &CancellationToken {
        &self.inner.cancel
    }

    /// Checks whether the wallet has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }

    /// Graceful shutdown: signals cancellation, drops the recovery-phrase
    /// cache, and yields so operations checking the token can exit.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.inner.phrase_cache.write().unwrap().take();
        tokio::task::yield_now().await;
    }

    /// Returns [`WalletError::Cancelled`] if the cancellation token fired.
    pub(crate) fn check_cancelled(&self) -> Result<(), WalletError> {
        if self.inner.cancel.is_cancelled() {
            Err(WalletError::Cancelled)
        } else {
            Ok(())
        }
    }

    /// The active account address, or [`WalletError::NoAccount`].
    ///
    /// Gate for every operation that requires an established session.
    pub(crate) fn require_account(&self) -> Result<Address, WalletError> {
        self.inner
            .address
            .read()
            .unwrap()
            .clone()
            .ok_or(WalletError::NoAccount)
    }
}
