use near_sdk::json_types::{Base58CryptoHash, U128};
use near_sdk::{near, AccountId, CryptoHash, NearToken};

/// Parameters a sender supplies when registering a swap intent. Together
/// with the sender account they fully define the swap and its identity.
#[near(serializers = [json, borsh])]
#[derive(Clone)]
pub struct SwapParams {
    pub hash_commitment: Base58CryptoHash,
    pub expiration_height: u64,
    pub amount: U128,
    pub recipient: AccountId,
}

// All the immutable parameters of a single swap intent, plus the transient
// settlement state.
#[near(serializers = [json, borsh])]
#[derive(Clone)]
pub struct SwapIntent {
    // Core HTLC parameters
    pub hash_commitment: CryptoHash,
    pub sender: AccountId,    // The party who funded the escrow and may cancel
    pub recipient: AccountId, // The party paid out against the correct secret
    pub amount: NearToken,
    pub expiration_height: u64,

    // State
    pub instances: u32,  // Co-funded registrations of the identical tuple
    pub settling: bool,  // Flag to prevent double-spends before deletion
}

impl SwapIntent {
    /// Expiry is exclusive of the boundary block: a claim at exactly
    /// `expiration_height` is still valid.
    pub fn is_expired(&self, current_height: u64) -> bool {
        current_height > self.expiration_height
    }
}

/// Read-only projection of an active swap intent.
#[near(serializers = [json])]
pub struct SwapIntentView {
    pub amount: U128,
    pub expiration_height: u64,
    pub recipient: AccountId,
}

impl From<&SwapIntent> for SwapIntentView {
    fn from(intent: &SwapIntent) -> Self {
        Self {
            amount: U128(intent.amount.as_yoctonear()),
            expiration_height: intent.expiration_height,
            recipient: intent.recipient.clone(),
        }
    }
}
