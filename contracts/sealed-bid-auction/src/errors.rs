use soroban_sdk::contracterror;

/// Error codes for the sealed-bid auction contract.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Auction configuration missing from storage
    NotInitialized = 1,
    /// Operation invoked outside its time window
    WrongPhase = 2,
    /// Reveal without a prior commitment
    NoCommitment = 3,
    /// Commitment was already revealed
    AlreadyRevealed = 4,
    /// Auction was already settled
    AlreadyFinalized = 5,
    /// Token contract refused a custody or payout transfer
    TransferFailed = 6,
    /// Negative deposit
    InvalidAmount = 7,
    /// Deadlines overflow the ledger clock
    InvalidSchedule = 8,
}
