//! Orchestrator error types.
//!
//! [`WalletError`] is the unified error type for all wallet operations.
//! `Display` renders the user-facing notification text for each terminal
//! outcome; no variant carries sensitive payloads (addresses, phrases,
//! amounts).
//!
//! Reverted transfers and the benign already-claimed grant are **not**
//! errors: they are expected outcomes, modeled by
//! [`TransferStatus`](crate::TransferStatus) and
//! [`ClaimOutcome`](crate::ClaimOutcome).

use std::fmt;

// ---------------------------------------------------------------------------
// WalletError
// ---------------------------------------------------------------------------

/// Errors from wallet operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletError {
    /// The wallet has been shut down (cancellation token fired).
    Cancelled,

    /// No account session: probe found nothing and none was created yet.
    NoAccount,

    /// The recipient address is empty.
    InvalidRecipient,

    /// The amount is empty, malformed, negative, or out of range.
    InvalidAmount,

    /// The recovery phrase supplied for import is empty.
    InvalidPhrase,

    /// Create or import targeted a device that already holds an account.
    /// Recoverable: offer the user the choice to import or retry.
    AccountConflict,

    /// Another submission or batch drain currently holds the session
    /// submission lock.
    SubmissionInFlight,

    /// Generic provider failure (network, timeout, internal). Retryable.
    Provider,
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "operation cancelled"),
            Self::NoAccount => write!(f, "no wallet account: create or import one first"),
            Self::InvalidRecipient => write!(f, "please enter a recipient address"),
            Self::InvalidAmount => write!(f, "please enter a valid amount"),
            Self::InvalidPhrase => write!(f, "please enter a recovery phrase"),
            Self::AccountConflict => write!(
                f,
                "an account already exists: import it or create a new one"
            ),
            Self::SubmissionInFlight => write!(f, "another submission is already in progress"),
            Self::Provider => write!(f, "something went wrong, please try again"),
        }
    }
}

impl std::error::Error for WalletError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_user_facing() {
        // Every variant renders a complete sentence fragment with no
        // debug formatting artifacts.
        let all = [
            WalletError::Cancelled,
            WalletError::NoAccount,
            WalletError::InvalidRecipient,
            WalletError::InvalidAmount,
            WalletError::InvalidPhrase,
            WalletError::AccountConflict,
            WalletError::SubmissionInFlight,
            WalletError::Provider,
        ];
        for err in all {
            let text = err.to_string();
            assert!(!text.is_empty());
            assert!(!text.contains("WalletError"));
        }
    }
}
