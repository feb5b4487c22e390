use near_sdk::{bs58, env, AccountId, NearToken};

use crate::identity::SwapId;

// Helper for consistent logging
pub fn log_swap_event(event: &str, swap_id: &SwapId, actor: &AccountId, amount: NearToken) {
    env::log_str(&format!(
        "SWAP_{}: swap_id='{}', actor='{}', amount='{}'",
        event,
        bs58::encode(swap_id).into_string(),
        actor,
        amount.as_yoctonear()
    ));
}
