//! Account session lifecycle.
//!
//! State machine: `Unknown -> (probe) -> {NoAccount, HasAccount}`;
//! `NoAccount -> (create | import) -> HasAccount`. `HasAccount` is terminal
//! for the session -- there is no account deletion or switch flow.
//!
//! A failed probe is **never** fatal: it resolves to `NoAccount` so the
//! user can always proceed to create or import instead of being stuck on
//! an error screen.

use std::fmt;

use provider::{classify, Address, CreateAccountOptions, KeyProvider, LedgerProvider};
use tracing::{info, warn};

use crate::{Wallet, WalletError};

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Account lifecycle state for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The provider has not been probed yet.
    Unknown,
    /// Probed: no account stored on this device.
    NoAccount,
    /// An account is active. Terminal for the session.
    HasAccount,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::NoAccount => write!(f, "no_account"),
            Self::HasAccount => write!(f, "has_account"),
        }
    }
}

// ---------------------------------------------------------------------------
// Wallet impl -- session operations
// ---------------------------------------------------------------------------

impl<K, L> Wallet<K, L>
where
    K: KeyProvider,
    L: LedgerProvider,
{
    /// The current session state.
    pub fn session_state(&self) -> SessionState {
        *self.inner.session.read().unwrap()
    }

    /// The active account address, if a session is established.
    pub fn address(&self) -> Option<Address> {
        self.inner.address.read().unwrap().clone()
    }

    /// Probe the key provider for an existing account.
    ///
    /// Resolves the session to [`SessionState::HasAccount`] if one is
    /// found, [`SessionState::NoAccount`] otherwise. Provider failures are
    /// logged and treated as "no account found" so onboarding can proceed.
    ///
    /// `HasAccount` is terminal: once established, a re-probe is a no-op
    /// and cannot regress the session, whatever the provider reports.
    pub async fn probe_existing_account(&self) -> SessionState {
        if self.session_state() == SessionState::HasAccount {
            return SessionState::HasAccount;
        }

        let state = match self.inner.keys.probe_account().await {
            Ok(Some(address)) => {
                info!(%address, "existing account found");
                *self.inner.address.write().unwrap() = Some(address);
                SessionState::HasAccount
            }
            Ok(None) => SessionState::NoAccount,
            Err(error) => {
                warn!(%error, "account probe failed, treating as no account");
                SessionState::NoAccount
            }
        };
        *self.inner.session.write().unwrap() = state;
        state
    }

    /// Create a new account via the key provider.
    ///
    /// # Errors
    ///
    /// - [`WalletError::AccountConflict`] if the session already holds an
    ///   account, or the provider reports one already exists. Recoverable:
    ///   the user chooses to import or retry.
    /// - [`WalletError::Provider`] for any other provider failure.
    pub async fn create_account(
        &self,
        options: CreateAccountOptions,
    ) -> Result<Address, WalletError> {
        self.check_cancelled()?;
        if self.session_state() == SessionState::HasAccount {
            return Err(WalletError::AccountConflict);
        }

        match self.inner.keys.create_account(options).await {
            Ok(address) => {
                info!(%address, "account created");
                self.establish(address.clone());
                Ok(address)
            }
            Err(error) if classify::is_account_conflict(&error) => {
                Err(WalletError::AccountConflict)
            }
            Err(error) => {
                warn!(%error, "account creation failed");
                Err(WalletError::Provider)
            }
        }
    }

    /// Import an account from a recovery phrase.
    ///
    /// The phrase is handed to the provider and otherwise never retained,
    /// logged, or embedded in error text by the orchestrator.
    ///
    /// # Errors
    ///
    /// - [`WalletError::InvalidPhrase`] if the phrase is empty.
    /// - [`WalletError::AccountConflict`] / [`WalletError::Provider`] as in
    ///   [`create_account`](Self::create_account).
    pub async fn import_account(&self, phrase: &str) -> Result<Address, WalletError> {
        self.check_cancelled()?;
        if phrase.trim().is_empty() {
            return Err(WalletError::InvalidPhrase);
        }
        if self.session_state() == SessionState::HasAccount {
            return Err(WalletError::AccountConflict);
        }

        match self.inner.keys.import_account(phrase).await {
            Ok(address) => {
                info!(%address, "account imported");
                self.establish(address.clone());
                Ok(address)
            }
            Err(error) if classify::is_account_conflict(&error) => {
                Err(WalletError::AccountConflict)
            }
            Err(_) => {
                // Deliberately not logging the provider message here: some
                // providers echo the supplied phrase back in diagnostics.
                warn!("account import failed");
                Err(WalletError::Provider)
            }
        }
    }

    /// Fetch the account's recovery phrase.
    ///
    /// User-initiated, explicit read. The result is cached for the session
    /// lifetime; invalidation is explicit via
    /// [`forget_recovery_phrase`](Self::forget_recovery_phrase) or
    /// [`shutdown`](Self::shutdown).
    pub async fn recovery_phrase(&self) -> Result<String, WalletError> {
        self.check_cancelled()?;
        self.require_account()?;

        if let Some(cached) = self.inner.phrase_cache.read().unwrap().clone() {
            return Ok(cached);
        }

        match self.inner.keys.recovery_phrase().await {
            Ok(phrase) => {
                *self.inner.phrase_cache.write().unwrap() = Some(phrase.clone());
                Ok(phrase)
            }
            Err(_) => {
                warn!("recovery phrase fetch failed");
                Err(WalletError::Provider)
            }
        }
    }

    /// Drop the session's cached recovery phrase.
    pub fn forget_recovery_phrase(&self) {
        self.inner.phrase_cache.write().unwrap().take();
    }

    /// Mark the session established with the given address.
    fn establish(&self, address: Address) {
        *self.inner.address.write().unwrap() = Some(address);
        *self.inner.session.write().unwrap() = SessionState::HasAccount;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
