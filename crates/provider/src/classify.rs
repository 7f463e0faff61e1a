//! Provider error-signature classification.
//!
//! The upstream key and ledger providers report several recoverable
//! conditions only through message wording. That coupling is fragile, so
//! every substring the orchestrator depends on lives in this one table;
//! swapping a provider means updating this module and nothing else.

use crate::{KeyProviderError, LedgerError};

// ---------------------------------------------------------------------------
// Signature table
// ---------------------------------------------------------------------------

/// Wording the key provider emits when a create or import targets a device
/// that already holds an account.
pub const ACCOUNT_EXISTS_SIGNATURE: &str = "Account already exists";

/// Wording the relayer emits when the one-time faucet grant was already
/// performed for the address.
pub const ALREADY_DUSTED_SIGNATURE: &str = "Account already dusted";

/// Wording found in a call-exception body when a transaction reverted
/// intentionally without providing a reason string.
pub const MISSING_REVERT_DATA_SIGNATURE: &str = "missing revert data";

// ---------------------------------------------------------------------------
// Key provider classification
// ---------------------------------------------------------------------------

/// Whether a key provider failure means "an account already exists".
///
/// This is a recoverable condition: the user is offered the choice to
/// import or retry instead of seeing a generic failure.
pub fn is_account_conflict(err: &KeyProviderError) -> bool {
    err.message.contains(ACCOUNT_EXISTS_SIGNATURE)
}

// ---------------------------------------------------------------------------
// Ledger classification
// ---------------------------------------------------------------------------

/// Whether a ledger failure means the faucet grant was already claimed.
///
/// A benign terminal state, not an error path.
pub fn is_already_granted(err: &LedgerError) -> bool {
    match err {
        LedgerError::Provider { message } => message.contains(ALREADY_DUSTED_SIGNATURE),
        LedgerError::CallException { body } => body.contains(ALREADY_DUSTED_SIGNATURE),
        LedgerError::Reverted { .. } => false,
    }
}

/// How a failed transfer submission should be surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferFailure {
    /// Accepted on-chain, reverted with an explicit reason. Surfaced
    /// verbatim.
    Reverted(String),

    /// Intentionally reverted without a reason string. Surfaced as a fixed
    /// explanatory message, never as the raw diagnostic.
    RevertedWithoutReason,

    /// Network, timeout, or provider-internal failure. Surfaced as a
    /// generic retryable message.
    Provider,
}

/// Classify a failed transfer submission.
///
/// The three-way contract both the single-payment path and the batch path
/// depend on:
///
/// 1. structured revert reason -> [`TransferFailure::Reverted`]
/// 2. call exception whose body carries the missing-revert-data signature
///    -> [`TransferFailure::RevertedWithoutReason`]
/// 3. anything else -> [`TransferFailure::Provider`]
pub fn classify_transfer(err: &LedgerError) -> TransferFailure {
    match err {
        LedgerError::Reverted { reason } => TransferFailure::Reverted(reason.clone()),
        LedgerError::CallException { body } if body.contains(MISSING_REVERT_DATA_SIGNATURE) => {
            TransferFailure::RevertedWithoutReason
        }
        LedgerError::CallException { .. } | LedgerError::Provider { .. } => {
            TransferFailure::Provider
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_conflict_matches_provider_wording() {
        let err = KeyProviderError::new("Account already exists on this device");
        assert!(is_account_conflict(&err));
    }

    #[test]
    fn account_conflict_ignores_other_failures() {
        let err = KeyProviderError::new("keystore unavailable");
        assert!(!is_account_conflict(&err));
    }

    #[test]
    fn already_granted_matches_relayer_wording() {
        let err = LedgerError::Provider {
            message: "Account already dusted, will not dust again".into(),
        };
        assert!(is_already_granted(&err));
    }

    #[test]
    fn already_granted_ignores_reverts() {
        let err = LedgerError::Reverted {
            reason: "Account already dusted".into(),
        };
        assert!(!is_already_granted(&err));
    }

    #[test]
    fn structured_reason_classifies_as_reverted() {
        let err = LedgerError::Reverted {
            reason: "ERC20: transfer amount exceeds balance".into(),
        };
        assert_eq!(
            classify_transfer(&err),
            TransferFailure::Reverted("ERC20: transfer amount exceeds balance".into())
        );
    }

    #[test]
    fn missing_revert_data_classifies_as_reverted_without_reason() {
        let err = LedgerError::CallException {
            body: "{\"error\":{\"message\":\"missing revert data in call exception\"}}".into(),
        };
        assert_eq!(
            classify_transfer(&err),
            TransferFailure::RevertedWithoutReason
        );
    }

    #[test]
    fn other_call_exceptions_classify_as_provider() {
        let err = LedgerError::CallException {
            body: "gateway timeout".into(),
        };
        assert_eq!(classify_transfer(&err), TransferFailure::Provider);
    }

    #[test]
    fn transport_failures_classify_as_provider() {
        let err = LedgerError::Provider {
            message: "connection reset by peer".into(),
        };
        assert_eq!(classify_transfer(&err), TransferFailure::Provider);
    }
}
