//! Balance reads and the one-time faucet grant.
//!
//! Both operations run against the configured token contract only. The
//! grant is once per account: the ledger enforces that, and a repeat claim
//! resolves to [`ClaimOutcome::AlreadyClaimed`] rather than an error so the
//! UI shows an informative notice instead of a failure screen.

use std::fmt;

use config::constants::FAUCET_GRANT_WHOLE_TOKENS;
use provider::{classify, KeyProvider, LedgerProvider};
use tracing::{info, warn};

use crate::{Wallet, WalletError};

// ---------------------------------------------------------------------------
// ClaimOutcome
// ---------------------------------------------------------------------------

/// Result of a faucet grant claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The grant was disbursed to the account.
    Claimed,
    /// The account already received its grant. Not an error.
    AlreadyClaimed,
}

impl fmt::Display for ClaimOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Claimed => write!(
                f,
                "claimed {FAUCET_GRANT_WHOLE_TOKENS} test tokens successfully"
            ),
            Self::AlreadyClaimed => {
                write!(f, "tokens can be claimed only once per account")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Wallet impl -- balance and claim
// ---------------------------------------------------------------------------

impl<K, L> Wallet<K, L>
where
    K: KeyProvider,
    L: LedgerProvider,
{
    /// Read the account's display balance for the configured token.
    ///
    /// Returned as the provider's decimal display string; never converted
    /// to base units on this path.
    ///
    /// # Errors
    ///
    /// [`WalletError::Provider`] on a failed read. Non-fatal: the session
    /// and queue are untouched and the caller may retry.
    pub async fn balance(&self) -> Result<String, WalletError> {
        self.check_cancelled()?;
        let address = self.require_account()?;
        let token_contract = self.inner.config.network.token_contract;

        match self
            .inner
            .ledger
            .display_balance(&address, token_contract)
            .await
        {
            Ok(balance) => Ok(balance),
            Err(error) => {
                warn!(%error, "balance read failed");
                Err(WalletError::Provider)
            }
        }
    }

    /// Claim the one-time faucet grant for the active account.
    ///
    /// A repeat claim is not an error: the ledger's "already granted"
    /// response resolves to [`ClaimOutcome::AlreadyClaimed`].
    ///
    /// # Errors
    ///
    /// [`WalletError::Provider`] for any other ledger failure.
    pub async fn claim(&self) -> Result<ClaimOutcome, WalletError> {
        self.check_cancelled()?;
        let address = self.require_account()?;

        match self.inner.ledger.claim_grant(&address).await {
            Ok(()) => {
                info!(%address, "grant claimed");
                Ok(ClaimOutcome::Claimed)
            }
            Err(error) if classify::is_already_granted(&error) => {
                info!(%address, "grant already claimed");
                Ok(ClaimOutcome::AlreadyClaimed)
            }
            Err(error) => {
                warn!(%error, "grant claim failed");
                Err(WalletError::Provider)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use config::NetworkConfig;
    use provider::mock::{MockKeyProvider, MockLedger};
    use tokio_util::sync::CancellationToken;

    use crate::{DrainPolicy, WalletConfig};

    async fn ready_wallet(ledger: MockLedger) -> Wallet<MockKeyProvider, MockLedger> {
        let wallet = Wallet::new(
            WalletConfig {
                network: NetworkConfig::DEVNET,
                api_key: "test-key".into(),
                drain_policy: DrainPolicy::default(),
            },
            MockKeyProvider::with_account(),
            ledger,
            CancellationToken::new(),
        );
        wallet.probe_existing_account().await;
        wallet
    }

    #[tokio::test]
    async fn balance_reads_the_display_string() {
        let ledger = MockLedger::new();
        let wallet = ready_wallet(ledger).await;
        let address = wallet.address().unwrap();
        wallet.inner.ledger.set_balance(&address, "12.5");

        assert_eq!(wallet.balance().await.unwrap(), "12.5");
    }

    #[tokio::test]
    async fn balance_failure_is_retryable() {
        let ledger = MockLedger::new();
        ledger.fail_balance_reads("rpc unreachable");
        let wallet = ready_wallet(ledger).await;

        assert_eq!(wallet.balance().await, Err(WalletError::Provider));
        // Session survives a failed read.
        assert!(wallet.address().is_some());
    }

    #[tokio::test]
    async fn balance_requires_account() {
        let wallet = Wallet::new(
            WalletConfig {
                network: NetworkConfig::DEVNET,
                api_key: "test-key".into(),
                drain_policy: DrainPolicy::default(),
            },
            MockKeyProvider::new(),
            MockLedger::new(),
            CancellationToken::new(),
        );
        assert_eq!(wallet.balance().await, Err(WalletError::NoAccount));
    }

    #[tokio::test]
    async fn first_claim_succeeds_second_is_already_claimed() {
        let wallet = ready_wallet(MockLedger::new()).await;

        assert_eq!(wallet.claim().await.unwrap(), ClaimOutcome::Claimed);
        assert_eq!(wallet.claim().await.unwrap(), ClaimOutcome::AlreadyClaimed);
    }

    #[tokio::test]
    async fn outcome_messages_are_user_facing() {
        assert_eq!(
            ClaimOutcome::Claimed.to_string(),
            "claimed 10 test tokens successfully"
        );
        assert_eq!(
            ClaimOutcome::AlreadyClaimed.to_string(),
            "tokens can be claimed only once per account"
        );
    }
}
