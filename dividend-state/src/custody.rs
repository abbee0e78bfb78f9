//! Value custody collaborator.
//!
//! The ledger never holds value itself. Deposits (mint, dividends) are
//! handed to a [`ValueCustody`] implementation and redemptions (burn,
//! dividend withdrawal) are paid out through it. A custody failure aborts
//! the whole operation.

use std::collections::{HashMap, HashSet};

use dividend_core::{Address, U256};

/// Reasons a custody call can fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustodyError {
    /// The custodian refused the call.
    Rejected(String),
    /// The custodian does not hold enough value to pay.
    InsufficientReserves { available: U256, requested: U256 },
}

impl std::fmt::Display for CustodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CustodyError::Rejected(reason) => write!(f, "rejected: {}", reason),
            CustodyError::InsufficientReserves {
                available,
                requested,
            } => {
                write!(
                    f,
                    "insufficient reserves: available {}, requested {}",
                    available, requested
                )
            }
        }
    }
}

impl std::error::Error for CustodyError {}

/// External store of value backing the ledger.
pub trait ValueCustody {
    /// Accept `amount` of incoming value.
    fn receive(&mut self, amount: U256) -> Result<(), CustodyError>;

    /// Pay `amount` of value out to `to`.
    fn pay(&mut self, to: &Address, amount: U256) -> Result<(), CustodyError>;

    /// Value currently held.
    fn reserves(&self) -> U256;
}

/// In-memory custodian.
///
/// Tracks the value it holds and what it has paid to each account.
/// Payees can be frozen and deposits refused, which lets callers exercise
/// the ledger's failure paths.
#[derive(Clone, Debug, Default)]
pub struct VaultCustody {
    reserves: U256,
    paid: HashMap<Address, U256>,
    frozen: HashSet<Address>,
    refuse_deposits: bool,
}

impl VaultCustody {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a vault already holding `reserves`.
    ///
    /// Used to pair a restored ledger with the value that backs it.
    pub fn with_reserves(reserves: U256) -> Self {
        Self {
            reserves,
            ..Self::default()
        }
    }

    /// Total value paid out to `account`.
    pub fn paid_to(&self, account: &Address) -> U256 {
        self.paid.get(account).copied().unwrap_or_else(U256::zero)
    }

    /// Refuse all future payments to `account`.
    pub fn freeze(&mut self, account: Address) {
        self.frozen.insert(account);
    }

    /// Allow payments to `account` again.
    pub fn unfreeze(&mut self, account: &Address) {
        self.frozen.remove(account);
    }

    /// Refuse (or accept again) incoming deposits.
    pub fn set_refuse_deposits(&mut self, refuse: bool) {
        self.refuse_deposits = refuse;
    }
}

impl ValueCustody for VaultCustody {
    fn receive(&mut self, amount: U256) -> Result<(), CustodyError> {
        if self.refuse_deposits {
            return Err(CustodyError::Rejected("deposits refused".to_string()));
        }
        self.reserves = self
            .reserves
            .checked_add(amount)
            .ok_or_else(|| CustodyError::Rejected("reserve overflow".to_string()))?;
        Ok(())
    }

    fn pay(&mut self, to: &Address, amount: U256) -> Result<(), CustodyError> {
        if self.frozen.contains(to) {
            return Err(CustodyError::Rejected("payee frozen".to_string()));
        }
        if self.reserves < amount {
            return Err(CustodyError::InsufficientReserves {
                available: self.reserves,
                requested: amount,
            });
        }
        self.reserves = self.reserves - amount;
        let paid = self.paid.entry(*to).or_insert_with(U256::zero);
        *paid = *paid + amount;
        Ok(())
    }

    fn reserves(&self) -> U256 {
        self.reserves
    }
}
