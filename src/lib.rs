use near_sdk::base64::{engine::general_purpose::STANDARD, Engine as _};
use near_sdk::json_types::Base58CryptoHash;
use near_sdk::store::IterableMap;
use near_sdk::{
    bs58, env, ext_contract, log, near, AccountId, CryptoHash, NearToken, Promise, PromiseError,
};

mod errors;
mod identity;
mod swap;
mod utils;

pub use errors::SwapError;
pub use identity::SwapId;
pub use swap::{SwapIntent, SwapIntentView, SwapParams};

use utils::log_swap_event;

#[ext_contract(ext_self)]
pub trait SelfCallbacks {
    fn on_swap_settled(&mut self, swap_id: Base58CryptoHash);
}

// Define the contract structure
#[near(contract_state)]
pub struct Contract {
    // All active swap intents, keyed by their content-derived identity
    pub swaps: IterableMap<SwapId, SwapIntent>,
}

// Define the default, which automatically initializes the contract
impl Default for Contract {
    fn default() -> Self {
        Self {
            swaps: IterableMap::new(b"s"),
        }
    }
}

// Implement the contract structure
#[near]
impl Contract {
    /// Registers a new swap intent and escrows the attached deposit for it.
    ///
    /// The caller is the sender: the party funding the escrow and the only
    /// one who may later cancel. The attached deposit must cover `amount`;
    /// anything above it is returned in the same transaction.
    ///
    /// Registering a tuple that is already active is not an error: the new
    /// deposit funds a further instance under the same identity, each
    /// instance independently claimable or cancellable.
    #[payable]
    #[handle_result]
    pub fn register_swap_intent(&mut self, params: SwapParams) -> Result<(), SwapError> {
        let sender = env::predecessor_account_id();
        let amount = NearToken::from_yoctonear(params.amount.0);

        if params.expiration_height <= env::block_height() {
            return Err(SwapError::ExpiryInPast);
        }
        // A zero-value escrow can never be funded.
        if amount.is_zero() || env::attached_deposit() < amount {
            return Err(SwapError::InsufficientFunds);
        }

        let hash_commitment: CryptoHash = params.hash_commitment.into();
        let swap_id = identity::derive_swap_id(
            &hash_commitment,
            &sender,
            &params.recipient,
            params.expiration_height,
            params.amount.0,
        );

        if let Some(intent) = self.swaps.get_mut(&swap_id) {
            intent.instances += 1;
        } else {
            self.swaps.insert(
                swap_id,
                SwapIntent {
                    hash_commitment,
                    sender: sender.clone(),
                    recipient: params.recipient,
                    amount,
                    expiration_height: params.expiration_height,
                    instances: 1,
                    settling: false,
                },
            );
        }

        let excess = env::attached_deposit().saturating_sub(amount);
        if !excess.is_zero() {
            Promise::new(sender.clone()).transfer(excess);
        }

        log_swap_event("REGISTERED", &swap_id, &sender, amount);
        Ok(())
    }

    /// Returns the visible fields of an active swap intent, or `None`.
    ///
    /// A settled swap and a never-registered one answer identically.
    pub fn get_swap_intent(&self, swap_id: Base58CryptoHash) -> Option<SwapIntentView> {
        self.swaps
            .get(&CryptoHash::from(swap_id))
            .filter(|intent| !intent.settling)
            .map(SwapIntentView::from)
    }

    /// Derives the identity a registration by `sender` with `params` would
    /// get. Pure; clients use it to address `execute_swap`/`cancel_swap_intent`.
    pub fn derive_swap_id(&self, params: SwapParams, sender: AccountId) -> Base58CryptoHash {
        identity::derive_swap_id(
            &CryptoHash::from(params.hash_commitment),
            &sender,
            &params.recipient,
            params.expiration_height,
            params.amount.0,
        )
        .into()
    }

    /// Claims an active swap by revealing the secret behind its commitment.
    ///
    /// Pays the registered recipient no matter who calls: the secret itself
    /// is the authorization. Valid up to and including the expiration
    /// height.
    #[handle_result]
    pub fn execute_swap(
        &mut self,
        swap_id: Base58CryptoHash,
        secret: String,
    ) -> Result<Promise, SwapError> {
        let swap_id: SwapId = swap_id.into();

        let intent = self
            .swaps
            .get_mut(&swap_id)
            .filter(|intent| !intent.settling)
            .ok_or(SwapError::UnknownSwapIntent)?;

        // A secret that does not even decode is just a wrong preimage.
        let secret_bytes = STANDARD
            .decode(&secret)
            .map_err(|_| SwapError::InvalidPreimage)?;
        if env::sha256_array(&secret_bytes) != intent.hash_commitment {
            return Err(SwapError::InvalidPreimage);
        }
        if intent.is_expired(env::block_height()) {
            return Err(SwapError::SwapIntentExpired);
        }

        intent.settling = true;
        let recipient = intent.recipient.clone();
        let amount = intent.amount;

        log_swap_event("CLAIMED", &swap_id, &env::predecessor_account_id(), amount);

        Ok(Promise::new(recipient).transfer(amount).then(
            ext_self::ext(env::current_account_id())
                .with_static_gas(env::prepaid_gas().saturating_div(4))
                .on_swap_settled(swap_id.into()),
        ))
    }

    /// Refunds an active swap to its sender.
    ///
    /// Existence and authorization are one predicate with one error, so a
    /// non-sender caller cannot learn whether the swap exists. Cancellation
    /// is not gated on the expiration height, only on the caller.
    #[handle_result]
    pub fn cancel_swap_intent(&mut self, swap_id: Base58CryptoHash) -> Result<Promise, SwapError> {
        let caller = env::predecessor_account_id();
        let swap_id: SwapId = swap_id.into();

        let intent = self
            .swaps
            .get_mut(&swap_id)
            .filter(|intent| !intent.settling && intent.sender == caller)
            .ok_or(SwapError::UnknownSwapIntent)?;

        intent.settling = true;
        let sender = intent.sender.clone();
        let amount = intent.amount;

        log_swap_event("CANCELED", &swap_id, &caller, amount);

        Ok(Promise::new(sender).transfer(amount).then(
            ext_self::ext(env::current_account_id())
                .with_static_gas(env::prepaid_gas().saturating_div(4))
                .on_swap_settled(swap_id.into()),
        ))
    }

    // --- PRIVATE CALLBACKS ---

    /// Finalizes a settlement after the outbound transfer resolves.
    ///
    /// On success the settled instance is consumed and the record removed
    /// once no funded instances remain. If the transfer bounced, the record
    /// is reopened so settlement can be retried.
    #[private]
    pub fn on_swap_settled(
        &mut self,
        #[callback_result] result: Result<(), PromiseError>,
        swap_id: Base58CryptoHash,
    ) {
        let swap_id: SwapId = swap_id.into();

        if result.is_err() {
            if let Some(intent) = self.swaps.get_mut(&swap_id) {
                intent.settling = false;
            }
            log!(
                "SWAP_SETTLEMENT_FAILED: transfer bounced, reopened swap_id='{}'",
                bs58::encode(&swap_id).into_string()
            );
            return;
        }

        let remaining = match self.swaps.get_mut(&swap_id) {
            Some(intent) if intent.instances > 1 => {
                intent.instances -= 1;
                intent.settling = false;
                true
            }
            _ => false,
        };
        if !remaining {
            self.swaps.remove(&swap_id);
        }

        env::log_str(&format!(
            "SWAP_SETTLED: swap_id='{}'",
            bs58::encode(&swap_id).into_string()
        ));
    }
}
