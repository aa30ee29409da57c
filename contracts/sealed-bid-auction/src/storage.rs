use soroban_sdk::{Address, Env};

use crate::types::{
    AuctionConfig, AuctionState, Commitment, DataKey, Settlement, INSTANCE_TTL_AMOUNT,
    INSTANCE_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
};

// ============================================================================
// INSTANCE STORAGE
// ============================================================================

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

pub fn get_config(env: &Env) -> Option<AuctionConfig> {
    env.storage().instance().get(&DataKey::Config)
}

pub fn set_config(env: &Env, config: &AuctionConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

/// Auction state, or the opening state if nothing was written yet.
pub fn get_state(env: &Env) -> AuctionState {
    env.storage()
        .instance()
        .get(&DataKey::State)
        .unwrap_or(AuctionState::new())
}

pub fn set_state(env: &Env, state: &AuctionState) {
    env.storage().instance().set(&DataKey::State, state);
}

pub fn get_settlement(env: &Env) -> Option<Settlement> {
    env.storage().instance().get(&DataKey::Settlement)
}

pub fn set_settlement(env: &Env, settlement: &Settlement) {
    env.storage().instance().set(&DataKey::Settlement, settlement);
}

// ============================================================================
// COMMITMENT STORAGE
// ============================================================================

pub fn get_commitment(env: &Env, bidder: &Address) -> Option<Commitment> {
    let key = DataKey::Commitment(bidder.clone());
    let commitment = env.storage().persistent().get::<_, Commitment>(&key);
    if commitment.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    commitment
}

/// Writes the bidder's commitment, replacing any earlier one.
pub fn set_commitment(env: &Env, bidder: &Address, commitment: &Commitment) {
    let key = DataKey::Commitment(bidder.clone());
    env.storage().persistent().set(&key, commitment);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}
