//! Local smoke harness for the wallet orchestrator.
//!
//! Runs the full session flow against the scripted in-memory providers:
//! probe, create or import, claim the faucet grant twice (the second claim
//! must resolve to already-claimed), read the balance, then queue and
//! drain a small batch.
//!
//! Environment:
//! - `WALLET_PHRASE`: import this recovery phrase instead of creating a
//!   fresh account.
//! - `WALLET_API_KEY`: relayer API key (defaults to a placeholder).
//! - `RUST_LOG`: tracing filter, e.g. `info` or `sdk=debug`.

use config::NetworkConfig;
use provider::mock::{MockKeyProvider, MockLedger};
use provider::CreateAccountOptions;
use sdk::{DrainPolicy, Wallet, WalletConfig, WalletError};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), WalletError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WalletConfig {
        network: NetworkConfig::DEVNET,
        api_key: std::env::var("WALLET_API_KEY").unwrap_or_else(|_| "local-dev-key".into()),
        drain_policy: DrainPolicy::default(),
    };
    info!(network = %config.network.network, "starting wallet session");

    let wallet = Wallet::new(
        config,
        MockKeyProvider::new(),
        MockLedger::new(),
        CancellationToken::new(),
    );

    // Onboarding: resume, import, or create.
    let state = wallet.probe_existing_account().await;
    info!(%state, "session probed");

    let address = match std::env::var("WALLET_PHRASE") {
        Ok(phrase) => wallet.import_account(&phrase).await?,
        Err(_) => wallet.create_account(CreateAccountOptions::default()).await?,
    };
    info!(%address, "session established");

    // Faucet grant, twice: the second claim must be benign.
    let first = wallet.claim().await?;
    info!(outcome = %first, "first claim");
    let second = wallet.claim().await?;
    info!(outcome = %second, "second claim");

    let balance = wallet.balance().await?;
    info!(%balance, "token balance");

    // Queue a small batch and drain it.
    for (recipient, amount) in [("0xaaaa", "0.25"), ("0xbbbb", "1.5"), ("0xcccc", "2")] {
        let intent = wallet.add_to_batch(recipient, amount)?;
        info!(id = %intent.id, recipient, amount, "queued");
    }

    let report = wallet.drain_batch().await?;
    for outcome in &report.outcomes {
        if outcome.status.is_success() {
            info!(id = %outcome.intent_id, "{}", outcome.status);
        } else {
            warn!(id = %outcome.intent_id, raw = ?outcome.raw_error, "{}", outcome.status);
        }
    }
    info!(
        attempted = report.attempted(),
        aborted = report.aborted,
        "batch drained"
    );

    wallet.shutdown().await;
    Ok(())
}
