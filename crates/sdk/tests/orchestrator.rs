//! End-to-end orchestrator flow over the scripted in-memory providers:
//! onboarding, faucet grant, balance, single payment, and batch drain.

use config::NetworkConfig;
use provider::mock::{MockKeyProvider, MockLedger};
use provider::{CreateAccountOptions, LedgerError};
use sdk::{
    ClaimOutcome, DrainPolicy, SessionState, TransferStatus, Wallet, WalletConfig, WalletError,
};
use tokio_util::sync::CancellationToken;

fn test_config(drain_policy: DrainPolicy) -> WalletConfig {
    WalletConfig {
        network: NetworkConfig::DEVNET,
        api_key: "test-key".into(),
        drain_policy,
    }
}

#[tokio::test]
async fn fresh_device_onboarding_claim_and_payment() {
    let wallet = Wallet::new(
        test_config(DrainPolicy::default()),
        MockKeyProvider::new(),
        MockLedger::new(),
        CancellationToken::new(),
    );

    // Nothing stored on this device yet.
    assert_eq!(
        wallet.probe_existing_account().await,
        SessionState::NoAccount
    );
    assert_eq!(
        wallet.pay("0xdead", "1").await,
        Err(WalletError::NoAccount)
    );

    let address = wallet
        .create_account(CreateAccountOptions::default())
        .await
        .unwrap();
    assert_eq!(wallet.session_state(), SessionState::HasAccount);
    assert_eq!(wallet.address(), Some(address.clone()));

    // The grant is once per account.
    assert_eq!(wallet.claim().await.unwrap(), ClaimOutcome::Claimed);
    assert_eq!(wallet.claim().await.unwrap(), ClaimOutcome::AlreadyClaimed);

    // Scan-and-pay: decimal in, exact base units out.
    let outcome = wallet.pay("0xrecipient", "2.25").await.unwrap();
    assert_eq!(outcome.status, TransferStatus::Success);

    let calls = wallet_calls(&wallet);
    assert_eq!(calls.last().unwrap().amount_base_units, "2250000000000000000");
    assert_eq!(
        calls.last().unwrap().token_contract,
        NetworkConfig::DEVNET.token_contract
    );
}

#[tokio::test]
async fn import_resumes_the_same_account() {
    let phrase = "abandon abandon abandon abandon abandon abandon \
                  abandon abandon abandon abandon abandon about";

    let first = Wallet::new(
        test_config(DrainPolicy::default()),
        MockKeyProvider::new(),
        MockLedger::new(),
        CancellationToken::new(),
    );
    first.probe_existing_account().await;
    let imported = first.import_account(phrase).await.unwrap();
    assert_eq!(first.recovery_phrase().await.unwrap(), phrase);

    // A second device importing the same phrase derives the same address.
    let second = Wallet::new(
        test_config(DrainPolicy::default()),
        MockKeyProvider::new(),
        MockLedger::new(),
        CancellationToken::new(),
    );
    second.probe_existing_account().await;
    assert_eq!(second.import_account(phrase).await.unwrap(), imported);
}

#[tokio::test]
async fn batch_drain_aborts_and_reports_every_attempt() {
    let ledger = MockLedger::new();
    ledger.fail_transfer_to(
        "0xfails",
        LedgerError::Reverted {
            reason: "ERC20: transfer amount exceeds balance".into(),
        },
    );

    let wallet = Wallet::new(
        test_config(DrainPolicy::default()),
        MockKeyProvider::with_account(),
        ledger,
        CancellationToken::new(),
    );
    wallet.probe_existing_account().await;

    wallet.add_to_batch("0xok", "1").unwrap();
    wallet.add_to_batch("0xfails", "2").unwrap();
    wallet.add_to_batch("0xnever", "3").unwrap();

    let report = wallet.drain_batch().await.unwrap();
    assert!(report.aborted);
    assert_eq!(report.attempted(), 2);
    assert_eq!(report.outcomes[0].status, TransferStatus::Success);
    assert_eq!(
        report.outcomes[1].status,
        TransferStatus::Reverted(Some("ERC20: transfer amount exceeds balance".into()))
    );

    // Third intent never reached the provider; queue cleared regardless.
    let calls = wallet_calls(&wallet);
    assert!(calls.iter().all(|c| c.to != "0xnever"));
    assert!(wallet.batch().is_empty());
}

#[tokio::test]
async fn retain_pending_policy_leaves_unattempted_intents_queued() {
    let ledger = MockLedger::new();
    ledger.fail_transfer_to(
        "0xfails",
        LedgerError::Provider {
            message: "gateway timeout".into(),
        },
    );

    let wallet = Wallet::new(
        test_config(DrainPolicy::RetainPending),
        MockKeyProvider::with_account(),
        ledger,
        CancellationToken::new(),
    );
    wallet.probe_existing_account().await;

    wallet.add_to_batch("0xok", "1").unwrap();
    wallet.add_to_batch("0xfails", "2").unwrap();
    let survivor = wallet.add_to_batch("0xlater", "3").unwrap();

    let report = wallet.drain_batch().await.unwrap();
    assert!(report.aborted);

    let remaining = wallet.batch();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, survivor.id);

    // The retained intent drains cleanly on the next run.
    let second = wallet.drain_batch().await.unwrap();
    assert!(second.all_succeeded());
    assert_eq!(second.attempted(), 1);
    assert!(wallet.batch().is_empty());
}

#[tokio::test]
async fn shutdown_cancels_all_operations() {
    let wallet = Wallet::new(
        test_config(DrainPolicy::default()),
        MockKeyProvider::with_account(),
        MockLedger::new(),
        CancellationToken::new(),
    );
    wallet.probe_existing_account().await;
    wallet.add_to_batch("0xok", "1").unwrap();

    wallet.shutdown().await;

    assert_eq!(
        wallet.pay("0xok", "1").await,
        Err(WalletError::Cancelled)
    );
    assert_eq!(wallet.drain_batch().await, Err(WalletError::Cancelled));
    assert_eq!(wallet.balance().await, Err(WalletError::Cancelled));
    assert_eq!(wallet.claim().await, Err(WalletError::Cancelled));
    // Cancellation leaves the queue untouched.
    assert_eq!(wallet.batch().len(), 1);
}

fn wallet_calls(
    wallet: &Wallet<MockKeyProvider, MockLedger>,
) -> Vec<provider::mock::TransferCall> {
    wallet.ledger().transfer_calls()
}
