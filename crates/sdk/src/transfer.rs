//! Transfer submission and outcome classification.
//!
//! One submission path serves both entry points: [`Wallet::pay`] (the
//! scan-and-pay single transfer) and the batch drain in [`crate::batch`].
//! Every submission validates input, converts the decimal amount to base
//! units, calls the ledger provider under the session submission lock, and
//! classifies failures through `provider::classify` into the three-way
//! contract the UI depends on: reverted-with-reason, reverted-without-
//! reason, or generic failure.

use std::fmt;

use provider::classify::{self, TransferFailure};
use provider::{KeyProvider, LedgerProvider};
use tracing::{info, warn};

use crate::batch::IntentId;
use crate::{amount, Wallet, WalletError};

// ---------------------------------------------------------------------------
// TransferStatus / TransferOutcome
// ---------------------------------------------------------------------------

/// Terminal status of one transfer submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferStatus {
    /// The transfer was submitted and executed.
    Success,

    /// The transaction was accepted by the network but reverted on-chain.
    /// `Some(reason)` carries the node's decoded reason, surfaced verbatim;
    /// `None` is an intentional revert without a message, surfaced as a
    /// fixed explanation rather than the raw diagnostic.
    Reverted(Option<String>),

    /// Network, timeout, or provider-internal failure. Retryable.
    Failed,
}

impl TransferStatus {
    /// Whether the transfer executed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

// The user-facing notification text for each terminal outcome.
impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "transaction sent successfully"),
            Self::Reverted(Some(reason)) => write!(f, "transaction failed: {reason}"),
            Self::Reverted(None) => write!(
                f,
                "transaction failed: the transaction was intentionally \
                 reverted without providing a reason"
            ),
            Self::Failed => write!(f, "error sending transaction, please try again"),
        }
    }
}

/// Result of one transfer submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    /// The intent this outcome belongs to.
    pub intent_id: IntentId,
    /// Terminal status.
    pub status: TransferStatus,
    /// Opaque provider diagnostic, for logs and support -- never shown
    /// directly to the user.
    pub raw_error: Option<String>,
}

// ---------------------------------------------------------------------------
// Wallet impl -- single payment path
// ---------------------------------------------------------------------------

impl<K, L> Wallet<K, L>
where
    K: KeyProvider,
    L: LedgerProvider,
{
    /// Submit one transfer to an already-decoded recipient address (the
    /// scan-and-pay path).
    ///
    /// Validation happens before any provider call; a reverted or failed
    /// submission is an `Ok` outcome, not an error.
    ///
    /// Waits for the session submission lock if a batch drain or another
    /// payment is in flight.
    ///
    /// # Errors
    ///
    /// [`WalletError::InvalidRecipient`] / [`WalletError::InvalidAmount`]
    /// before submission, [`WalletError::NoAccount`] without a session,
    /// [`WalletError::Cancelled`] after shutdown.
    pub async fn pay(
        &self,
        recipient: &str,
        amount_decimal: &str,
    ) -> Result<TransferOutcome, WalletError> {
        self.check_cancelled()?;
        self.require_account()?;
        validate_transfer_input(recipient, amount_decimal)?;

        let _submit = self.inner.submit_lock.lock().await;
        self.submit_transfer(IntentId::next(), recipient, amount_decimal)
            .await
    }

    /// Submit one transfer. Caller must hold the session submission lock.
    ///
    /// Base units are recomputed here, at submission time, so an intent
    /// queued earlier can never carry a stale conversion.
    pub(crate) async fn submit_transfer(
        &self,
        intent_id: IntentId,
        recipient: &str,
        amount_decimal: &str,
    ) -> Result<TransferOutcome, WalletError> {
        self.check_cancelled()?;
        let base_units = amount::to_base_units(amount_decimal)?;
        let token_contract = self.inner.config.network.token_contract;

        info!(%intent_id, recipient, "submitting transfer");
        match self
            .inner
            .ledger
            .transfer_exact(recipient, &base_units, token_contract)
            .await
        {
            Ok(()) => {
                info!(%intent_id, "transfer executed");
                Ok(TransferOutcome {
                    intent_id,
                    status: TransferStatus::Success,
                    raw_error: None,
                })
            }
            Err(error) => {
                warn!(%intent_id, %error, "transfer failed");
                let status = match classify::classify_transfer(&error) {
                    TransferFailure::Reverted(reason) => TransferStatus::Reverted(Some(reason)),
                    TransferFailure::RevertedWithoutReason => TransferStatus::Reverted(None),
                    TransferFailure::Provider => TransferStatus::Failed,
                };
                Ok(TransferOutcome {
                    intent_id,
                    status,
                    raw_error: Some(error.to_string()),
                })
            }
        }
    }
}

/// Reject empty or malformed transfer input before any provider call.
pub(crate) fn validate_transfer_input(
    recipient: &str,
    amount_decimal: &str,
) -> Result<(), WalletError> {
    if recipient.trim().is_empty() {
        return Err(WalletError::InvalidRecipient);
    }
    amount::to_base_units(amount_decimal).map(|_| ())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
