use soroban_sdk::{contractevent, Address};

use crate::types::RevealOutcome;

/// Event emitted when a bidder places or replaces a commitment
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitmentPlacedEventData {
    #[topic]
    pub bidder: Address,
    pub deposit: i128,
    pub replaced: bool,
}

/// Event emitted on every completed reveal, valid or not
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidRevealedEventData {
    #[topic]
    pub bidder: Address,
    pub value: i128,
    pub outcome: RevealOutcome,
    pub leading: bool,
}

/// Event emitted when a displaced leader gets its bid back
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderRefundedEventData {
    #[topic]
    pub bidder: Address,
    pub amount: i128,
}

/// Settlement record, emitted exactly once
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionSettledEventData {
    #[topic]
    pub beneficiary: Address,
    pub winner: Option<Address>,
    pub amount: i128,
}
