//! Capabilities the auction consumes from its host: the clock, the
//! commitment hash, and value custody.

use soroban_sdk::{log, token, Address, Bytes, BytesN, Env};

use crate::errors::Error;
use crate::types::Payout;

pub trait Clock {
    fn now(&self) -> u64;
}

pub trait Hasher {
    /// Deterministic commitment over a bid value and its secret.
    fn commit(&self, value: i128, secret: &BytesN<32>) -> BytesN<32>;
}

/// Custody of bid value. Both operations either move the full amount or
/// fail without moving anything.
pub trait Ledger {
    fn custody(&self, from: &Address, amount: i128) -> Result<(), Error>;
    fn pay_out(&self, payout: &Payout) -> Result<(), Error>;
}

// ============================================================================
// Soroban implementations
// ============================================================================

/// Ledger close time.
pub struct LedgerClock<'a> {
    env: &'a Env,
}

impl<'a> LedgerClock<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl Clock for LedgerClock<'_> {
    fn now(&self) -> u64 {
        self.env.ledger().timestamp()
    }
}

/// `sha256(value as 16-byte big-endian || secret)`
pub fn commitment_hash(env: &Env, value: i128, secret: &BytesN<32>) -> BytesN<32> {
    let mut preimage = Bytes::from_array(env, &value.to_be_bytes());
    preimage.append(&Bytes::from_array(env, &secret.to_array()));
    env.crypto().sha256(&preimage).into()
}

pub struct Sha256Hasher<'a> {
    env: &'a Env,
}

impl<'a> Sha256Hasher<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }
}

impl Hasher for Sha256Hasher<'_> {
    fn commit(&self, value: i128, secret: &BytesN<32>) -> BytesN<32> {
        commitment_hash(self.env, value, secret)
    }
}

/// Custody held by this contract in a SEP-41 token.
///
/// Transfers go through the fallible client path so a refusing token
/// surfaces as `Error::TransferFailed` instead of trapping mid-operation.
pub struct TokenLedger<'a> {
    env: &'a Env,
    client: token::TokenClient<'a>,
}

impl<'a> TokenLedger<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        Self {
            env,
            client: token::TokenClient::new(env, token),
        }
    }
}

impl Ledger for TokenLedger<'_> {
    fn custody(&self, from: &Address, amount: i128) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }
        let contract = self.env.current_contract_address();
        match self.client.try_transfer(from, &contract, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "custody refused", from, amount);
                Err(Error::TransferFailed)
            }
        }
    }

    fn pay_out(&self, payout: &Payout) -> Result<(), Error> {
        if payout.amount == 0 {
            return Ok(());
        }
        let contract = self.env.current_contract_address();
        match self
            .client
            .try_transfer(&contract, &payout.to, &payout.amount)
        {
            Ok(Ok(())) => Ok(()),
            _ => {
                log!(self.env, "payout refused", payout.to, payout.amount);
                Err(Error::TransferFailed)
            }
        }
    }
}
