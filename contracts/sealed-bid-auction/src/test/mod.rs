
use crate::services::commitment_hash;
use crate::{SealedBidAuction, SealedBidAuctionClient};
use soroban_sdk::{
    testutils::{Address as _, Events as _, IssuerFlags, Ledger, LedgerInfo},
    token, Address, BytesN, Env, Event,
};

pub const COMMIT_DURATION: u64 = 100;
pub const REVEAL_DURATION: u64 = 100;
pub const STARTING_BALANCE: i128 = 1_000;

pub struct Setup {
    pub env: Env,
    pub client: SealedBidAuctionClient<'static>,
    pub beneficiary: Address,
    pub alice: Address,
    pub bob: Address,
    pub token: token::TokenClient<'static>,
    pub token_admin: token::StellarAssetClient<'static>,
}

/// Auction deployed at t=0 with 100s commit and 100s reveal windows.
/// Alice and Bob start with `STARTING_BALANCE` each.
pub fn setup_test() -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    env.ledger().set(LedgerInfo {
        timestamp: 0,
        protocol_version: 23,
        sequence_number: 1,
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 10,
        min_persistent_entry_ttl: 10,
        max_entry_ttl: 3110400,
    });

    let issuer = Address::generate(&env);
    let token_contract = env.register_stellar_asset_contract_v2(issuer);
    token_contract.issuer().set_flag(IssuerFlags::RevocableFlag);
    let token_address = token_contract.address();
    let token = token::TokenClient::new(&env, &token_address);
    let token_admin = token::StellarAssetClient::new(&env, &token_address);

    let beneficiary = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);

    token_admin.mint(&alice, &STARTING_BALANCE);
    token_admin.mint(&bob, &STARTING_BALANCE);

    let client = deploy_auction(
        &env,
        &beneficiary,
        &token_address,
        COMMIT_DURATION,
        REVEAL_DURATION,
    );

    Setup {
        env,
        client,
        beneficiary,
        alice,
        bob,
        token,
        token_admin,
    }
}

pub fn deploy_auction(
    env: &Env,
    beneficiary: &Address,
    token: &Address,
    commit_duration: u64,
    reveal_duration: u64,
) -> SealedBidAuctionClient<'static> {
    let contract_id = env.register(
        SealedBidAuction,
        (
            beneficiary.clone(),
            token.clone(),
            commit_duration,
            reveal_duration,
        ),
    );
    SealedBidAuctionClient::new(env, &contract_id)
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().set_timestamp(timestamp);
}

pub fn secret(env: &Env, seed: u8) -> BytesN<32> {
    BytesN::from_array(env, &[seed; 32])
}

/// Commitment hash a client would build for `value` under `secret(seed)`.
pub fn sealed(env: &Env, value: i128, seed: u8) -> BytesN<32> {
    commitment_hash(env, value, &secret(env, seed))
}

/// Token balance held by the auction contract.
pub fn held(setup: &Setup) -> i128 {
    setup.token.balance(&setup.client.address)
}

/// Whether the auction published `event` during the last invocation.
pub fn published(setup: &Setup, event: &impl Event) -> bool {
    let env = &setup.env;
    env.events().all().contains((
        setup.client.address.clone(),
        event.topics(env),
        event.data(env),
    ))
}
