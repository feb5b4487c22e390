use near_sdk::borsh::BorshSerialize;
use near_sdk::{env, AccountId, CryptoHash};

// Unique identifier for one swap instance, content-addressed from its
// defining parameters. Two registrations of the identical tuple land on the
// same identity; changing any parameter yields a distinct one.
pub type SwapId = CryptoHash;

/// Serializes the defining tuple into a canonical byte array for hashing.
///
/// Borsh is length-prefixed per field, so distinct tuples can never encode
/// to the same bytes.
pub fn to_identity_bytes(
    hash_commitment: &CryptoHash,
    sender: &AccountId,
    recipient: &AccountId,
    expiration_height: u64,
    amount: u128,
) -> Vec<u8> {
    let mut buffer = Vec::new();
    hash_commitment
        .serialize(&mut buffer)
        .expect("Serialization failed");
    sender.serialize(&mut buffer).expect("Serialization failed");
    recipient
        .serialize(&mut buffer)
        .expect("Serialization failed");
    expiration_height
        .serialize(&mut buffer)
        .expect("Serialization failed");
    amount.serialize(&mut buffer).expect("Serialization failed");
    buffer
}

/// Derives the swap identity for a parameter tuple.
pub fn derive_swap_id(
    hash_commitment: &CryptoHash,
    sender: &AccountId,
    recipient: &AccountId,
    expiration_height: u64,
    amount: u128,
) -> SwapId {
    env::sha256_array(&to_identity_bytes(
        hash_commitment,
        sender,
        recipient,
        expiration_height,
        amount,
    ))
}
