//! Protocol-level wallet constants.

/// Decimal places of the configured token contract.
///
/// The amount codec scales human-entered decimal amounts by
/// `10^TOKEN_DECIMALS` to produce the integer base-unit representation
/// the ledger provider expects.
pub const TOKEN_DECIMALS: u32 = 18;

/// Size of the one-time faucet grant, in whole tokens.
///
/// Display-only: the grant itself is minted by the relayer; the
/// orchestrator never computes with this value.
pub const FAUCET_GRANT_WHOLE_TOKENS: u64 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_fit_in_u128_scaling() {
        // 10^18 must be representable so the codec can scale without
        // arbitrary-precision arithmetic.
        assert!(10u128.checked_pow(TOKEN_DECIMALS).is_some());
    }
}
