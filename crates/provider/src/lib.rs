//! Provider boundary: the external capabilities the wallet orchestrator
//! calls but does not implement.
//!
//! Two collaborators sit behind traits here:
//!
//! - [`KeyProvider`] -- account lifecycle (create, import, probe) and
//!   recovery-phrase retrieval. The orchestrator never sees private key
//!   material; it only ever handles the chain-format address and, on
//!   explicit user request, the recovery phrase.
//! - [`LedgerProvider`] -- token balance reads, exact-amount transfers,
//!   and the one-time faucet grant, all against a single configured
//!   token contract and network.
//!
//! Both traits return **raw** errors ([`KeyProviderError`], [`LedgerError`])
//! carrying provider wording verbatim. Interpreting that wording is the job
//! of exactly one place, the [`classify`] module -- callers must not match
//! on message substrings themselves.
//!
//! [`mock`] provides scripted in-memory implementations for tests and the
//! local smoke harness.

pub mod classify;
pub mod mock;

use std::fmt;
use std::future::Future;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Chain-format public account identifier (0x-prefixed hex).
pub type Address = String;

/// Options for creating a new account.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateAccountOptions {
    /// Whether the provider should also persist the new keypair to its
    /// remote backup storage. `false` keeps the key device-local.
    pub persist_remotely: bool,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Raw failure from the key/account provider.
///
/// Carries the provider's message verbatim. Use
/// [`classify::is_account_conflict`] to detect the recoverable
/// "already exists" condition; do not inspect `message` elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyProviderError {
    /// Provider diagnostic message, unmodified.
    pub message: String,
}

impl KeyProviderError {
    /// Wrap a provider message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for KeyProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key provider error: {}", self.message)
    }
}

impl std::error::Error for KeyProviderError {}

/// Raw failure from the network/ledger provider.
///
/// Mirrors the three shapes the underlying node/relayer stack produces
/// for a failed call. Classification into the user-facing taxonomy is
/// done by [`classify::classify_transfer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The transaction was accepted by the network and executed a revert
    /// with a decoded reason string.
    Reverted {
        /// The revert reason, decoded by the node.
        reason: String,
    },

    /// A call exception with an undecoded diagnostic body. An intentional
    /// revert without a reason surfaces here with a recognizable body.
    CallException {
        /// Raw diagnostic payload from the node.
        body: String,
    },

    /// Transport failure, timeout, or provider-internal error.
    Provider {
        /// Provider diagnostic message, unmodified.
        message: String,
    },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reverted { reason } => write!(f, "execution reverted: {reason}"),
            Self::CallException { body } => write!(f, "call exception: {body}"),
            Self::Provider { message } => write!(f, "provider error: {message}"),
        }
    }
}

impl std::error::Error for LedgerError {}

// ---------------------------------------------------------------------------
// KeyProvider
// ---------------------------------------------------------------------------

/// Account lifecycle and recovery-phrase access.
///
/// Implementations must be `Send + Sync`; the orchestrator is `Clone` and
/// may be shared across tasks.
pub trait KeyProvider: Send + Sync {
    /// Look up the locally stored account, if any.
    ///
    /// Returns `Ok(None)` when no account has been created or imported on
    /// this device.
    fn probe_account(&self) -> impl Future<Output = Result<Option<Address>, KeyProviderError>> + Send;

    /// Generate and persist a new keypair, returning its address.
    ///
    /// Fails with the "already exists" signature when the device already
    /// holds an account (see [`classify::is_account_conflict`]).
    fn create_account(
        &self,
        options: CreateAccountOptions,
    ) -> impl Future<Output = Result<Address, KeyProviderError>> + Send;

    /// Derive and persist an account from a recovery phrase.
    ///
    /// Same "already exists" failure mode as [`Self::create_account`].
    fn import_account(
        &self,
        phrase: &str,
    ) -> impl Future<Output = Result<Address, KeyProviderError>> + Send;

    /// Return the recovery phrase of the stored account.
    ///
    /// Sensitive: callers must not log or embed the result in error text.
    fn recovery_phrase(&self) -> impl Future<Output = Result<String, KeyProviderError>> + Send;
}

// ---------------------------------------------------------------------------
// LedgerProvider
// ---------------------------------------------------------------------------

/// Token balance, transfer, and faucet-grant calls.
///
/// All methods operate against the single token contract passed per call
/// (static session configuration); the provider owns signing, gas, and
/// broadcast mechanics entirely.
pub trait LedgerProvider: Send + Sync {
    /// Read the token balance for `address`, formatted for display by the
    /// provider itself.
    fn display_balance(
        &self,
        address: &str,
        token_contract: &str,
    ) -> impl Future<Output = Result<String, LedgerError>> + Send;

    /// Transfer an exact integer base-unit amount of the token to `to`.
    ///
    /// `amount_base_units` is a decimal integer string (amount x 10^18 for
    /// the 18-decimal token), produced by the orchestrator's amount codec.
    fn transfer_exact(
        &self,
        to: &str,
        amount_base_units: &str,
        token_contract: &str,
    ) -> impl Future<Output = Result<(), LedgerError>> + Send;

    /// Perform the one-time faucet grant for `address`.
    ///
    /// A repeat claim fails with the "already dusted" signature (see
    /// [`classify::is_already_granted`]).
    fn claim_grant(&self, address: &str) -> impl Future<Output = Result<(), LedgerError>> + Send;
}
