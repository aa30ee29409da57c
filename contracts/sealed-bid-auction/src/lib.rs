#![no_std]

mod engine;
mod errors;
mod events;
mod services;
mod storage;
mod types;

use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, BytesN, Env};

pub use crate::errors::Error;
use crate::engine::AuctionEngine;
use crate::events::*;
use crate::services::{Ledger, LedgerClock, Sha256Hasher, TokenLedger};
use crate::types::{
    AuctionConfig, AuctionState, Commitment, Phase, RevealOutcome, Settlement,
};

/// Sealed-bid auction with a commit phase and a reveal phase.
///
/// Bidders lock a deposit in the bid token together with
/// `sha256(value || secret)`, open it once bidding has closed, and the
/// highest covered bid is paid to the beneficiary by `finalize`.
///
/// Every mutating call runs in three steps: the engine proposes a
/// transition, the token transfer for it is attempted, and storage is
/// written only after the transfer succeeded.
#[contract]
pub struct SealedBidAuction;

#[contractimpl]
impl SealedBidAuction {
    /// Create the auction. Commit phase runs for `commit_duration` seconds
    /// from now, reveal phase for `reveal_duration` seconds after that.
    ///
    /// # Panics
    /// * `Error::InvalidSchedule` - If a deadline overflows the clock
    pub fn __constructor(
        env: Env,
        beneficiary: Address,
        token: Address,
        commit_duration: u64,
        reveal_duration: u64,
    ) {
        let start_time = env.ledger().timestamp();
        let (commit_end, reveal_end) = match deadlines(start_time, commit_duration, reveal_duration) {
            Some(deadlines) => deadlines,
            None => panic_with_error!(&env, Error::InvalidSchedule),
        };

        let config = AuctionConfig {
            beneficiary,
            token,
            start_time,
            commit_end,
            reveal_end,
        };

        storage::set_config(&env, &config);
        storage::set_state(&env, &AuctionState::new());
        storage::extend_instance_ttl(&env);
    }

    // ========================================================================
    // BIDDING
    // ========================================================================

    /// Lock `deposit` and record `hash` as the bidder's sealed bid.
    ///
    /// A second call from the same bidder replaces the first commitment.
    /// The earlier deposit is not refunded.
    ///
    /// # Errors
    /// * `Error::WrongPhase` - Outside the commit phase
    /// * `Error::InvalidAmount` - If `deposit` is negative
    /// * `Error::TransferFailed` - If the token refuses the deposit
    pub fn place_commitment(
        env: Env,
        bidder: Address,
        hash: BytesN<32>,
        deposit: i128,
    ) -> Result<(), Error> {
        bidder.require_auth();

        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        let previous = storage::get_commitment(&env, &bidder);

        let step = auction_engine(&env, &config).place_commitment(
            &storage::get_state(&env),
            previous.as_ref(),
            hash,
            deposit,
        )?;

        TokenLedger::new(&env, &config.token).custody(&bidder, deposit)?;

        storage::set_commitment(&env, &bidder, &step.commitment);
        storage::set_state(&env, &step.state);
        storage::extend_instance_ttl(&env);

        if step.replaced {
            log!(&env, "commitment replaced", bidder);
        }

        CommitmentPlacedEventData {
            bidder,
            deposit,
            replaced: step.replaced,
        }
        .publish(&env);

        Ok(())
    }

    /// Open the bidder's commitment with the bid value and secret.
    ///
    /// A mismatching secret or a deposit smaller than `value` is not an
    /// error: the call succeeds, the commitment is spent and the deposit
    /// stays in the contract. The outcome says which case applied.
    ///
    /// # Errors
    /// * `Error::WrongPhase` - Outside the reveal phase
    /// * `Error::NoCommitment` - If the bidder never committed
    /// * `Error::AlreadyRevealed` - If the commitment was already opened
    /// * `Error::TransferFailed` - If refunding the displaced leader fails
    pub fn reveal(
        env: Env,
        bidder: Address,
        value: i128,
        secret: BytesN<32>,
    ) -> Result<RevealOutcome, Error> {
        bidder.require_auth();

        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;

        let step = auction_engine(&env, &config).reveal(
            &storage::get_state(&env),
            storage::get_commitment(&env, &bidder),
            &bidder,
            value,
            &secret,
        )?;

        if let Some(refund) = &step.refund {
            TokenLedger::new(&env, &config.token).pay_out(refund)?;
        }

        storage::set_commitment(&env, &bidder, &step.commitment);
        storage::set_state(&env, &step.state);
        storage::extend_instance_ttl(&env);

        if let Some(refund) = step.refund {
            LeaderRefundedEventData {
                bidder: refund.to,
                amount: refund.amount,
            }
            .publish(&env);
        }

        if step.outcome != RevealOutcome::Accepted {
            log!(&env, "deposit forfeited", bidder, step.commitment.locked_amount);
        }

        BidRevealedEventData {
            bidder,
            value,
            outcome: step.outcome,
            leading: step.leading,
        }
        .publish(&env);

        Ok(step.outcome)
    }

    // ========================================================================
    // SETTLEMENT
    // ========================================================================

    /// Settle the auction. Anyone may call this once the reveal phase is
    /// over; it succeeds exactly once.
    ///
    /// # Errors
    /// * `Error::WrongPhase` - Before the reveal deadline has passed
    /// * `Error::AlreadyFinalized` - On every call after the first
    /// * `Error::TransferFailed` - If the beneficiary cannot receive funds
    pub fn finalize(env: Env) -> Result<Settlement, Error> {
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;

        let step = auction_engine(&env, &config).finalize(&storage::get_state(&env))?;

        if let Some(payout) = &step.payout {
            TokenLedger::new(&env, &config.token).pay_out(payout)?;
        }

        storage::set_state(&env, &step.state);
        storage::set_settlement(&env, &step.settlement);
        storage::extend_instance_ttl(&env);

        AuctionSettledEventData {
            beneficiary: config.beneficiary,
            winner: step.settlement.winner.clone(),
            amount: step.settlement.amount,
        }
        .publish(&env);

        Ok(step.settlement)
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn get_config(env: Env) -> Result<AuctionConfig, Error> {
        storage::get_config(&env).ok_or(Error::NotInitialized)
    }

    pub fn get_state(env: Env) -> AuctionState {
        storage::get_state(&env)
    }

    pub fn get_commitment(env: Env, bidder: Address) -> Result<Commitment, Error> {
        storage::get_commitment(&env, &bidder).ok_or(Error::NoCommitment)
    }

    /// Current leader and bid.
    pub fn get_highest_bid(env: Env) -> (Option<Address>, i128) {
        let state = storage::get_state(&env);
        (state.highest_bidder, state.highest_bid)
    }

    pub fn get_phase(env: Env) -> Result<Phase, Error> {
        let config = storage::get_config(&env).ok_or(Error::NotInitialized)?;
        Ok(auction_engine(&env, &config).phase())
    }

    pub fn get_settlement(env: Env) -> Option<Settlement> {
        storage::get_settlement(&env)
    }
}

fn deadlines(start_time: u64, commit_duration: u64, reveal_duration: u64) -> Option<(u64, u64)> {
    let commit_end = start_time.checked_add(commit_duration)?;
    let reveal_end = commit_end.checked_add(reveal_duration)?;
    Some((commit_end, reveal_end))
}

fn auction_engine<'a>(
    env: &'a Env,
    config: &'a AuctionConfig,
) -> AuctionEngine<'a, LedgerClock<'a>, Sha256Hasher<'a>> {
    AuctionEngine::new(config, LedgerClock::new(env), Sha256Hasher::new(env))
}

#[cfg(test)]
mod test;
