//! Client-side batch queue: accumulate transfer intents, drain sequentially.
//!
//! Intents are validated at add-time and submitted strictly in insertion
//! order, one in flight at a time -- the network sequences transactions per
//! address, so concurrent submissions would race the sequence number.
//!
//! # Partial-failure policy
//!
//! A drain aborts on the first non-success outcome. What happens to the
//! queue is governed by [`DrainPolicy`]:
//!
//! - [`DrainPolicy::ClearAll`] (default): the queue ends empty no matter
//!   where the abort happened. This reproduces the reference product
//!   behavior and its known sharp edge -- the queue itself no longer says
//!   which intents landed on-chain; callers must read the returned
//!   [`DrainReport`] (every attempted intent has an outcome there).
//! - [`DrainPolicy::RetainPending`]: attempted intents (succeeded, or the
//!   one that failed -- both have reported outcomes) are removed;
//!   never-attempted intents stay queued for a later drain.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use provider::{KeyProvider, LedgerProvider};
use tracing::{info, warn};

use crate::transfer::{validate_transfer_input, TransferOutcome};
use crate::{Wallet, WalletError};

// ---------------------------------------------------------------------------
// IntentId
// ---------------------------------------------------------------------------

/// Locally unique identifier for a transfer intent.
///
/// Monotonically increasing u64 -- cheap to create, copy, and display.
/// Shared by the batch path and the single-payment path so outcomes
/// correlate in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntentId(u64);

impl IntentId {
    /// Generate the next unique intent ID.
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "intent-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TransferIntent
// ---------------------------------------------------------------------------

/// A user-declared, not-yet-submitted request to move value.
///
/// The decimal amount is stored as entered; base units are computed at
/// submission time, never at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferIntent {
    /// Locally unique, monotonic.
    pub id: IntentId,
    /// Recipient address. Non-empty; otherwise unvalidated.
    pub recipient: String,
    /// Human-entered decimal amount. Non-empty and parseable.
    pub amount_decimal: String,
}

// ---------------------------------------------------------------------------
// DrainPolicy / DrainReport
// ---------------------------------------------------------------------------

/// What happens to the queue when a drain aborts mid-run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrainPolicy {
    /// Clear the whole queue regardless of where the abort happened
    /// (reference behavior).
    #[default]
    ClearAll,
    /// Remove only attempted intents; keep never-attempted ones queued.
    RetainPending,
}

/// Per-item report of one drain run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainReport {
    /// One outcome per attempted intent, in submission order.
    pub outcomes: Vec<TransferOutcome>,
    /// Whether the run aborted before reaching the end of the queue.
    pub aborted: bool,
    /// Whether the abort was caused by shutdown firing mid-run.
    pub cancelled: bool,
}

impl DrainReport {
    /// How many intents were attempted before the run ended.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Whether every attempted intent succeeded (and nothing was skipped).
    pub fn all_succeeded(&self) -> bool {
        !self.aborted && self.outcomes.iter().all(|o| o.status.is_success())
    }
}

/// Queue state behind the wallet's batch mutex.
#[derive(Default)]
pub(crate) struct BatchState {
    /// Insertion order = submission order. No duplicate IDs.
    pub intents: Vec<TransferIntent>,
}

// ---------------------------------------------------------------------------
// Wallet impl -- batch operations
// ---------------------------------------------------------------------------

impl<K, L> Wallet<K, L>
where
    K: KeyProvider,
    L: LedgerProvider,
{
    /// Queue a transfer intent.
    ///
    /// Rejected intents never mutate the queue: empty recipient, empty or
    /// malformed amount are validation errors at add-time, not drain-time.
    pub fn add_to_batch(
        &self,
        recipient: &str,
        amount_decimal: &str,
    ) -> Result<TransferIntent, WalletError> {
        validate_transfer_input(recipient, amount_decimal)?;

        let intent = TransferIntent {
            id: IntentId::next(),
            recipient: recipient.to_owned(),
            amount_decimal: amount_decimal.to_owned(),
        };
        self.inner
            .batch
            .lock()
            .unwrap()
            .intents
            .push(intent.clone());
        Ok(intent)
    }

    /// Delete an intent by ID. Idempotent: absent IDs are a no-op.
    pub fn remove_from_batch(&self, id: IntentId) {
        self.inner
            .batch
            .lock()
            .unwrap()
            .intents
            .retain(|intent| intent.id != id);
    }

    /// Snapshot of the pending intents, in insertion order.
    pub fn batch(&self) -> Vec<TransferIntent> {
        self.inner.batch.lock().unwrap().intents.clone()
    }

    /// Submit every queued intent sequentially, in insertion order.
    ///
    /// Exactly one transfer is in flight at a time. The run aborts on the
    /// first non-success outcome; the queue is then resolved per the
    /// configured [`DrainPolicy`]. Every attempted intent has an outcome in
    /// the returned [`DrainReport`], so the caller always knows how far the
    /// run got.
    ///
    /// # Errors
    ///
    /// - [`WalletError::SubmissionInFlight`] if another drain or payment
    ///   holds the submission lock -- a drain is never interleaved.
    /// - [`WalletError::Cancelled`] if shutdown fired before the run
    ///   started. Shutdown firing mid-run is not an error: the run ends
    ///   early, the queue is resolved per the policy as usual, and the
    ///   partial record comes back with [`DrainReport::cancelled`] set.
    pub async fn drain_batch(&self) -> Result<DrainReport, WalletError> {
        self.check_cancelled()?;
        self.require_account()?;

        let _submit = self
            .inner
            .submit_lock
            .try_lock()
            .map_err(|_| WalletError::SubmissionInFlight)?;

        let snapshot = self.batch();
        info!(pending = snapshot.len(), "draining batch");

        let mut outcomes: Vec<TransferOutcome> = Vec::with_capacity(snapshot.len());
        let mut aborted = false;
        let mut cancelled = false;

        for intent in &snapshot {
            let outcome = match self
                .submit_transfer(intent.id, &intent.recipient, &intent.amount_decimal)
                .await
            {
                Ok(outcome) => outcome,
                // Shutdown mid-run ends the run; the attempted outcomes
                // are kept so the caller still gets the full record.
                Err(WalletError::Cancelled) => {
                    aborted = true;
                    cancelled = true;
                    warn!(
                        attempted = outcomes.len(),
                        total = snapshot.len(),
                        "batch drain cancelled mid-run"
                    );
                    break;
                }
                Err(error) => return Err(error),
            };
            let succeeded = outcome.status.is_success();
            outcomes.push(outcome);

            if !succeeded {
                aborted = true;
                warn!(
                    attempted = outcomes.len(),
                    total = snapshot.len(),
                    "batch drain aborted on first failure"
                );
                break;
            }
        }

        {
            let mut state = self.inner.batch.lock().unwrap();
            match self.inner.config.drain_policy {
                DrainPolicy::ClearAll => state.intents.clear(),
                DrainPolicy::RetainPending => {
                    let attempted: HashSet<IntentId> =
                        outcomes.iter().map(|o| o.intent_id).collect();
                    state.intents.retain(|intent| !attempted.contains(&intent.id));
                }
            }
        }

        info!(
            attempted = outcomes.len(),
            aborted, "batch drain finished"
        );
        Ok(DrainReport {
            outcomes,
            aborted,
            cancelled,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
