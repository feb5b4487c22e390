use std::fmt;

use near_sdk::{env, FunctionError};

/// Every way a registry operation can refuse to run.
///
/// Returned through `#[handle_result]`, so an `Err` aborts the transaction
/// and reverts all state changes, including the escrow deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapError {
    /// Registration with an expiration height at or below the current one.
    ExpiryInPast,
    /// The presented secret does not hash to the stored commitment.
    InvalidPreimage,
    /// Claim attempted strictly after the expiration height.
    SwapIntentExpired,
    /// No active swap at this identity, or the caller is not allowed to
    /// know whether one exists. Cancellation by a non-sender maps here on
    /// purpose: a single opaque code never reveals the swap's existence.
    UnknownSwapIntent,
    /// The escrow debit cannot be covered by the attached deposit.
    InsufficientFunds,
}

impl SwapError {
    pub const fn code(&self) -> &'static str {
        match self {
            SwapError::ExpiryInPast => "ERR_EXPIRY_IN_PAST",
            SwapError::InvalidPreimage => "ERR_INVALID_PREIMAGE",
            SwapError::SwapIntentExpired => "ERR_SWAP_INTENT_EXPIRED",
            SwapError::UnknownSwapIntent => "ERR_UNKNOWN_SWAP_INTENT",
            SwapError::InsufficientFunds => "ERR_INSUFFICIENT_FUNDS",
        }
    }
}

impl fmt::Display for SwapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FunctionError for SwapError {
    fn panic(&self) -> ! {
        env::panic_str(self.code())
    }
}
