//! Scripted in-memory providers for tests and the local smoke harness.
//!
//! [`MockKeyProvider`] and [`MockLedger`] implement the provider traits
//! without any network I/O. Failure modes are scripted per call site so
//! orchestrator tests can exercise every branch of the error taxonomy,
//! and the ledger records every transfer call so tests can assert
//! submission ordering.
//!
//! Suitable for development and testing only.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use bip39::Mnemonic;
use sha2::{Digest, Sha256};

use crate::classify::{ACCOUNT_EXISTS_SIGNATURE, ALREADY_DUSTED_SIGNATURE};
use crate::{
    Address, CreateAccountOptions, KeyProvider, KeyProviderError, LedgerError, LedgerProvider,
};

/// Derive a deterministic 0x-hex address from a recovery phrase.
///
/// Stand-in for real key derivation: first 20 bytes of SHA256(phrase).
fn address_for_phrase(phrase: &str) -> Address {
    let digest = Sha256::digest(phrase.as_bytes());
    format!("0x{}", hex::encode(&digest[..20]))
}

/// Generate a fresh 12-word recovery phrase from OS entropy.
fn generate_phrase() -> String {
    let mut entropy = [0u8; 16];
    rand_core::RngCore::fill_bytes(&mut rand_core::OsRng, &mut entropy);
    Mnemonic::from_entropy(&entropy)
        .expect("16 bytes is valid BIP39 entropy")
        .to_string()
}

// ---------------------------------------------------------------------------
// MockKeyProvider
// ---------------------------------------------------------------------------

#[derive(Default)]
struct KeyState {
    /// The stored account, if any: (address, recovery phrase).
    account: Option<(Address, String)>,
    /// When set, `probe_account` fails with this message.
    probe_failure: Option<String>,
}

/// In-memory key provider with scripted failure modes.
#[derive(Default)]
pub struct MockKeyProvider {
    state: Mutex<KeyState>,
}

impl MockKeyProvider {
    /// An empty provider: no account stored, all calls succeed.
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider preloaded with a freshly generated account.
    pub fn with_account() -> Self {
        let provider = Self::new();
        let phrase = generate_phrase();
        provider.state.lock().unwrap().account = Some((address_for_phrase(&phrase), phrase));
        provider
    }

    /// Make the next `probe_account` calls fail (provider unreachable).
    pub fn fail_probe(&self, message: &str) {
        self.state.lock().unwrap().probe_failure = Some(message.to_owned());
    }

    /// Restore `probe_account` to normal behavior.
    pub fn restore_probe(&self) {
        self.state.lock().unwrap().probe_failure = None;
    }

    /// The stored account address, if any. Test inspection only.
    pub fn stored_address(&self) -> Option<Address> {
        self.state
            .lock()
            .unwrap()
            .account
            .as_ref()
            .map(|(addr, _)| addr.clone())
    }
}

impl KeyProvider for MockKeyProvider {
    async fn probe_account(&self) -> Result<Option<Address>, KeyProviderError> {
        let state = self.state.lock().unwrap();
        if let Some(message) = &state.probe_failure {
            return Err(KeyProviderError::new(message.clone()));
        }
        Ok(state.account.as_ref().map(|(addr, _)| addr.clone()))
    }

    async fn create_account(
        &self,
        _options: CreateAccountOptions,
    ) -> Result<Address, KeyProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.account.is_some() {
            return Err(KeyProviderError::new(ACCOUNT_EXISTS_SIGNATURE));
        }
        let phrase = generate_phrase();
        let address = address_for_phrase(&phrase);
        state.account = Some((address.clone(), phrase));
        Ok(address)
    }

    async fn import_account(&self, phrase: &str) -> Result<Address, KeyProviderError> {
        let mut state = self.state.lock().unwrap();
        if state.account.is_some() {
            return Err(KeyProviderError::new(ACCOUNT_EXISTS_SIGNATURE));
        }
        if phrase.parse::<Mnemonic>().is_err() {
            return Err(KeyProviderError::new("invalid recovery phrase"));
        }
        let address = address_for_phrase(phrase);
        state.account = Some((address.clone(), phrase.to_owned()));
        Ok(address)
    }

    async fn recovery_phrase(&self) -> Result<String, KeyProviderError> {
        self.state
            .lock()
            .unwrap()
            .account
            .as_ref()
            .map(|(_, phrase)| phrase.clone())
            .ok_or_else(|| KeyProviderError::new("no account stored"))
    }
}

// ---------------------------------------------------------------------------
// MockLedger
// ---------------------------------------------------------------------------

/// A recorded `transfer_exact` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCall {
    /// Recipient address.
    pub to: String,
    /// Integer base-unit amount, as passed.
    pub amount_base_units: String,
    /// Token contract, as passed.
    pub token_contract: String,
}

#[derive(Default)]
struct LedgerState {
    /// Display balances by address.
    balances: HashMap<String, String>,
    /// Scripted transfer failures, keyed by recipient.
    transfer_failures: HashMap<String, LedgerError>,
    /// Addresses that have already received the one-time grant.
    granted: HashSet<String>,
    /// When set, `display_balance` fails with this message.
    balance_failure: Option<String>,
    /// Every transfer call, in submission order.
    calls: Vec<TransferCall>,
}

/// In-memory ledger provider with scripted failures and a call log.
///
/// The faucet grant is genuinely one-time: a second `claim_grant` for the
/// same address fails with the relayer's already-dusted wording.
#[derive(Default)]
pub struct MockLedger {
    state: Mutex<LedgerState>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display balance returned for `address`.
    pub fn set_balance(&self, address: &str, display: &str) {
        self.state
            .lock()
            .unwrap()
            .balances
            .insert(address.to_owned(), display.to_owned());
    }

    /// Make balance reads fail (provider unreachable).
    pub fn fail_balance_reads(&self, message: &str) {
        self.state.lock().unwrap().balance_failure = Some(message.to_owned());
    }

    /// Script transfers to `recipient` to fail with `error`.
    pub fn fail_transfer_to(&self, recipient: &str, error: LedgerError) {
        self.state
            .lock()
            .unwrap()
            .transfer_failures
            .insert(recipient.to_owned(), error);
    }

    /// Every transfer call made so far, in submission order.
    pub fn transfer_calls(&self) -> Vec<TransferCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl LedgerProvider for MockLedger {
    async fn display_balance(
        &self,
        address: &str,
        _token_contract: &str,
    ) -> Result<String, LedgerError> {
        let state = self.state.lock().unwrap();
        if let Some(message) = &state.balance_failure {
            return Err(LedgerError::Provider {
                message: message.clone(),
            });
        }
        Ok(state
            .balances
            .get(address)
            .cloned()
            .unwrap_or_else(|| "0".to_owned()))
    }

    async fn transfer_exact(
        &self,
        to: &str,
        amount_base_units: &str,
        token_contract: &str,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(TransferCall {
            to: to.to_owned(),
            amount_base_units: amount_base_units.to_owned(),
            token_contract: token_contract.to_owned(),
        });
        match state.transfer_failures.get(to) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn claim_grant(&self, address: &str) -> Result<(), LedgerError> {
        let mut state = self.state.lock().unwrap();
        if !state.granted.insert(address.to_owned()) {
            return Err(LedgerError::Provider {
                message: format!("{ALREADY_DUSTED_SIGNATURE}, will not dust again"),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify;

    #[tokio::test]
    async fn probe_empty_provider_finds_nothing() {
        let keys = MockKeyProvider::new();
        assert_eq!(keys.probe_account().await.unwrap(), None);
    }

    #[tokio::test]
    async fn create_then_probe_roundtrip() {
        let keys = MockKeyProvider::new();
        let address = keys
            .create_account(CreateAccountOptions::default())
            .await
            .unwrap();
        assert!(address.starts_with("0x"));
        assert_eq!(keys.probe_account().await.unwrap(), Some(address));
    }

    #[tokio::test]
    async fn create_twice_reports_conflict() {
        let keys = MockKeyProvider::with_account();
        let err = keys
            .create_account(CreateAccountOptions::default())
            .await
            .unwrap_err();
        assert!(classify::is_account_conflict(&err));
    }

    #[tokio::test]
    async fn import_derives_deterministic_address() {
        let phrase = "abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon about";
        let a = MockKeyProvider::new();
        let b = MockKeyProvider::new();
        assert_eq!(
            a.import_account(phrase).await.unwrap(),
            b.import_account(phrase).await.unwrap()
        );
    }

    #[tokio::test]
    async fn recovery_phrase_matches_imported_phrase() {
        let phrase = "abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon about";
        let keys = MockKeyProvider::new();
        keys.import_account(phrase).await.unwrap();
        assert_eq!(keys.recovery_phrase().await.unwrap(), phrase);
    }

    #[tokio::test]
    async fn second_grant_reports_already_dusted() {
        let ledger = MockLedger::new();
        ledger.claim_grant("0xabc").await.unwrap();
        let err = ledger.claim_grant("0xabc").await.unwrap_err();
        assert!(classify::is_already_granted(&err));
    }

    #[tokio::test]
    async fn transfer_calls_are_recorded_in_order() {
        let ledger = MockLedger::new();
        ledger.transfer_exact("0xa", "1", "0xtoken").await.unwrap();
        ledger.transfer_exact("0xb", "2", "0xtoken").await.unwrap();
        let calls = ledger.transfer_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].to, "0xa");
        assert_eq!(calls[1].to, "0xb");
    }

    #[tokio::test]
    async fn scripted_transfer_failure_is_returned() {
        let ledger = MockLedger::new();
        ledger.fail_transfer_to(
            "0xbad",
            LedgerError::Reverted {
                reason: "paused".into(),
            },
        );
        let err = ledger.transfer_exact("0xbad", "1", "0xtoken").await.unwrap_err();
        assert_eq!(
            err,
            LedgerError::Reverted {
                reason: "paused".into()
            }
        );
    }
}
