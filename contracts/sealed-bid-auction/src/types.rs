use soroban_sdk::{contracttype, Address, BytesN};

/// Number of ledgers in a day (assuming ~5 second block time)
pub const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for instance storage (30 days)
pub const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// TTL extension amount for commitments (90 days)
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Window the auction is in, derived from the ledger clock on every call.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Phase {
    Commit = 0,
    Reveal = 1,
    Ended = 2,
    /// The clock sits exactly on a deadline; nothing is admitted.
    Boundary = 3,
}

/// Result of a reveal call that was accepted by the phase and
/// commitment guards.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RevealOutcome {
    Accepted = 0,
    InvalidHash = 1,
    InsufficientDeposit = 2,
}

/// Immutable auction parameters, fixed at deployment.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionConfig {
    pub beneficiary: Address,
    pub token: Address,
    pub start_time: u64,
    pub commit_end: u64,
    pub reveal_end: u64,
}

/// Mutable auction state.
///
/// `custody` is the total this auction holds in the bid token: every
/// deposit ever taken, minus leader refunds and the final payout.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionState {
    pub highest_bid: i128,
    pub highest_bidder: Option<Address>,
    pub finalized: bool,
    pub custody: i128,
    pub commitments: u32,
    pub reveals: u32,
}

impl AuctionState {
    pub fn new() -> Self {
        Self {
            highest_bid: 0,
            highest_bidder: None,
            finalized: false,
            custody: 0,
            commitments: 0,
            reveals: 0,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Commitment {
    pub hash: BytesN<32>,
    pub locked_amount: i128,
    pub revealed: bool,
}

/// A transfer out of custody proposed by the engine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Payout {
    pub to: Address,
    pub amount: i128,
}

/// Settlement record written once by `finalize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Settlement {
    pub winner: Option<Address>,
    pub amount: i128,
    pub settled_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    State,
    Settlement,
    Commitment(Address),
}
