//! Auction state machine.
//!
//! The engine never writes storage and never moves funds. Each operation
//! checks its guards against the injected clock and returns the transition
//! it proposes: the next `AuctionState`, the affected commitment, and at
//! most one payout. The contract applies the payout
//! first and persists the transition only when the transfer went through.

use soroban_sdk::{Address, BytesN};

use crate::errors::Error;
use crate::services::{Clock, Hasher};
use crate::types::{
    AuctionConfig, AuctionState, Commitment, Payout, Phase, RevealOutcome, Settlement,
};

/// Phase of an auction at `now`. Comparisons are strict on both sides of
/// each deadline, so the deadline instants themselves admit nothing.
pub fn phase_at(now: u64, commit_end: u64, reveal_end: u64) -> Phase {
    if now < commit_end {
        Phase::Commit
    } else if now > commit_end && now < reveal_end {
        Phase::Reveal
    } else if now > reveal_end {
        Phase::Ended
    } else {
        Phase::Boundary
    }
}

pub struct CommitTransition {
    pub state: AuctionState,
    pub commitment: Commitment,
    /// An earlier commitment of the same bidder was overwritten.
    pub replaced: bool,
}

pub struct RevealTransition {
    pub state: AuctionState,
    pub commitment: Commitment,
    pub outcome: RevealOutcome,
    /// Refund owed to the leader being displaced.
    pub refund: Option<Payout>,
    pub leading: bool,
}

pub struct FinalizeTransition {
    pub state: AuctionState,
    pub settlement: Settlement,
    pub payout: Option<Payout>,
}

pub struct AuctionEngine<'a, C: Clock, H: Hasher> {
    config: &'a AuctionConfig,
    clock: C,
    hasher: H,
}

impl<'a, C: Clock, H: Hasher> AuctionEngine<'a, C, H> {
    pub fn new(config: &'a AuctionConfig, clock: C, hasher: H) -> Self {
        Self {
            config,
            clock,
            hasher,
        }
    }

    pub fn phase(&self) -> Phase {
        phase_at(
            self.clock.now(),
            self.config.commit_end,
            self.config.reveal_end,
        )
    }

    fn require_phase(&self, expected: Phase) -> Result<(), Error> {
        if self.phase() != expected {
            return Err(Error::WrongPhase);
        }
        Ok(())
    }

    /// Store `hash` as the bidder's commitment with `amount` locked.
    ///
    /// A previous commitment is replaced outright. Its deposit stays in
    /// custody and counts towards nothing.
    pub fn place_commitment(
        &self,
        state: &AuctionState,
        previous: Option<&Commitment>,
        hash: BytesN<32>,
        amount: i128,
    ) -> Result<CommitTransition, Error> {
        self.require_phase(Phase::Commit)?;

        if amount < 0 {
            return Err(Error::InvalidAmount);
        }

        let mut next = state.clone();
        next.custody = next
            .custody
            .checked_add(amount)
            .ok_or(Error::InvalidAmount)?;
        next.commitments = next.commitments.saturating_add(1);

        Ok(CommitTransition {
            state: next,
            commitment: Commitment {
                hash,
                locked_amount: amount,
                revealed: false,
            },
            replaced: previous.is_some(),
        })
    }

    /// Open a commitment.
    ///
    /// The commitment is marked revealed whatever the outcome. A hash
    /// mismatch or a deposit below `value` is reported through the outcome,
    /// not as an error, and leaves the deposit forfeited in custody.
    pub fn reveal(
        &self,
        state: &AuctionState,
        commitment: Option<Commitment>,
        bidder: &Address,
        value: i128,
        secret: &BytesN<32>,
    ) -> Result<RevealTransition, Error> {
        self.require_phase(Phase::Reveal)?;

        let mut commitment = commitment.ok_or(Error::NoCommitment)?;
        if commitment.revealed {
            return Err(Error::AlreadyRevealed);
        }
        commitment.revealed = true;

        let mut next = state.clone();
        next.reveals = next.reveals.saturating_add(1);

        let outcome = if self.hasher.commit(value, secret) != commitment.hash {
            RevealOutcome::InvalidHash
        } else if commitment.locked_amount < value {
            RevealOutcome::InsufficientDeposit
        } else {
            RevealOutcome::Accepted
        };

        let mut refund = None;
        let mut leading = false;

        // Ties stay with the earlier leader.
        if outcome == RevealOutcome::Accepted && value > next.highest_bid {
            if let Some(previous) = next.highest_bidder.take() {
                next.custody -= next.highest_bid;
                refund = Some(Payout {
                    to: previous,
                    amount: next.highest_bid,
                });
            }
            next.highest_bid = value;
            next.highest_bidder = Some(bidder.clone());
            leading = true;
        }

        Ok(RevealTransition {
            state: next,
            commitment,
            outcome,
            refund,
            leading,
        })
    }

    /// Close the auction and pay the highest bid to the beneficiary.
    pub fn finalize(&self, state: &AuctionState) -> Result<FinalizeTransition, Error> {
        self.require_phase(Phase::Ended)?;

        if state.finalized {
            return Err(Error::AlreadyFinalized);
        }

        let mut next = state.clone();
        next.finalized = true;
        next.custody -= next.highest_bid;

        let payout = if next.highest_bid > 0 {
            Some(Payout {
                to: self.config.beneficiary.clone(),
                amount: next.highest_bid,
            })
        } else {
            None
        };

        let settlement = Settlement {
            winner: next.highest_bidder.clone(),
            amount: next.highest_bid,
            settled_at: self.clock.now(),
        };

        Ok(FinalizeTransition {
            state: next,
            settlement,
            payout,
        })
    }
}
