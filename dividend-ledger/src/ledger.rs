//! Owned ledger facade.
//!
//! [`Ledger`] bundles the state, the custodian and the configuration
//! into a single value. Every mutation goes through [`Ledger::apply`],
//! which runs it atomically and logs the outcome.

use std::fs;
use std::path::Path;

use dividend_core::serialization::{deserialize, serialize};
use dividend_core::{Address, LedgerSnapshot, Operation, DECIMALS, U256};
use dividend_state::{
    accumulative_dividend_of, apply_operation, owed_dividends, LedgerReader, LedgerState,
    StateError, ValueCustody, VaultCustody,
};
use tracing::{debug, info, warn};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, LedgerResult};

/// A dividend-paying token ledger.
///
/// Holders mint units 1:1 against deposited value, burn them to redeem,
/// and transfer them freely. Recorded dividends are owed pro rata to
/// whoever holds units at that moment and can be withdrawn at any time,
/// even after the units are gone.
#[derive(Debug)]
pub struct Ledger<C: ValueCustody = VaultCustody> {
    config: LedgerConfig,
    state: LedgerState,
    custody: C,
}

impl Ledger<VaultCustody> {
    /// Create an empty ledger backed by an in-memory vault.
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_custody(config, VaultCustody::new())
    }
}

impl Ledger<VaultCustody> {
    /// Rebuild a ledger from a snapshot, backed by a fresh vault holding
    /// exactly the value the snapshot requires.
    pub fn from_snapshot_with_vault(config: LedgerConfig, snapshot: LedgerSnapshot) -> LedgerResult<Self> {
        let required = required_reserves(&snapshot)?;
        Self::from_snapshot(config, VaultCustody::with_reserves(required), snapshot)
    }

    /// Load a snapshot file into a ledger backed by a freshly funded vault.
    pub fn load_snapshot_with_vault(config: LedgerConfig, path: &Path) -> LedgerResult<Self> {
        let snapshot = read_snapshot(path)?;
        let ledger = Self::from_snapshot_with_vault(config, snapshot)?;
        ledger.log_loaded(path);
        Ok(ledger)
    }
}

impl Default for Ledger<VaultCustody> {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl<C: ValueCustody> Ledger<C> {
    /// Create an empty ledger backed by `custody`.
    pub fn with_custody(config: LedgerConfig, custody: C) -> Self {
        let state = LedgerState::with_capacity(config.holder_capacity);
        Self {
            config,
            state,
            custody,
        }
    }

    /// Rebuild a ledger from a snapshot.
    ///
    /// `custody` must already hold the value backing the snapshot: every
    /// outstanding unit plus every dividend not yet withdrawn. An
    /// underfunded custodian is rejected, since burns and withdrawals
    /// against it would fail.
    pub fn from_snapshot(config: LedgerConfig, custody: C, snapshot: LedgerSnapshot) -> LedgerResult<Self> {
        let required = required_reserves(&snapshot)?;
        let state = LedgerState::from_snapshot(snapshot)?;

        let available = custody.reserves();
        if available < required {
            return Err(LedgerError::UnderfundedCustody {
                available,
                required,
            });
        }

        Ok(Self {
            config,
            state,
            custody,
        })
    }

    // === Metadata ===

    /// Token name.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Token symbol.
    pub fn symbol(&self) -> &str {
        &self.config.symbol
    }

    /// Fixed precision of one unit.
    pub fn decimals(&self) -> u8 {
        DECIMALS
    }

    /// Active configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // === Mutations ===

    /// Apply an operation atomically.
    ///
    /// Returns the value paid out by custody (zero for operations that pay
    /// nothing). On error the ledger is unchanged.
    pub fn apply(&mut self, op: &Operation) -> LedgerResult<U256> {
        match apply_operation(&mut self.state, &mut self.custody, op) {
            Ok(paid) => {
                debug!(
                    op = op.kind(),
                    %paid,
                    total_supply = %self.state.total_supply(),
                    holders = self.state.holder_count(),
                    "operation applied"
                );
                Ok(paid)
            }
            Err(e) => {
                match &e {
                    StateError::PayoutFailure { .. } | StateError::DepositRejected { .. } => {
                        warn!(op = op.kind(), error = %e, "custody refused operation")
                    }
                    _ => debug!(op = op.kind(), error = %e, "operation rejected"),
                }
                Err(e.into())
            }
        }
    }

    /// Deposit `amount` of value and mint the same number of units.
    pub fn mint(&mut self, account: Address, amount: U256) -> LedgerResult<()> {
        self.apply(&Operation::Mint { account, amount })?;
        Ok(())
    }

    /// Burn `amount` units and pay the same value back. Returns the amount paid.
    pub fn burn(&mut self, account: Address, amount: U256) -> LedgerResult<U256> {
        self.apply(&Operation::Burn { account, amount })
    }

    /// Move `amount` units from `from` to `to`.
    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) -> LedgerResult<()> {
        self.apply(&Operation::Transfer { from, to, amount })?;
        Ok(())
    }

    /// Let `spender` move up to `amount` of `owner`'s units.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) -> LedgerResult<()> {
        self.apply(&Operation::Approve {
            owner,
            spender,
            amount,
        })?;
        Ok(())
    }

    /// Move units on behalf of `from` using `spender`'s allowance.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> LedgerResult<()> {
        self.apply(&Operation::TransferFrom {
            spender,
            from,
            to,
            amount,
        })?;
        Ok(())
    }

    /// Deposit a dividend for all current holders.
    pub fn record_dividend(&mut self, amount: U256) -> LedgerResult<()> {
        self.apply(&Operation::RecordDividend { amount })?;
        Ok(())
    }

    /// Pay out everything owed to `account`. Returns the amount paid,
    /// which is zero when nothing was owed.
    pub fn withdraw_dividends(&mut self, account: Address) -> LedgerResult<U256> {
        self.apply(&Operation::WithdrawDividends { account })
    }

    // === Queries ===

    /// Total units outstanding.
    pub fn total_supply(&self) -> U256 {
        self.state.total_supply()
    }

    /// Units held by `account`.
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.state.balance_of(account)
    }

    /// Dividend owed to `account` and not yet withdrawn.
    pub fn owed(&self, account: &Address) -> LedgerResult<U256> {
        Ok(owed_dividends(&self.state, account)?)
    }

    /// Dividend already paid out to `account`.
    pub fn withdrawn_dividends_of(&self, account: &Address) -> U256 {
        self.state
            .get_account(account)
            .map(|a| a.withdrawn)
            .unwrap_or_else(U256::zero)
    }

    /// Everything `account` has ever earned (owed plus withdrawn).
    pub fn accumulative_dividend_of(&self, account: &Address) -> LedgerResult<U256> {
        Ok(accumulative_dividend_of(&self.state, account)?)
    }

    /// Number of accounts holding a nonzero balance.
    pub fn holders_length(&self) -> usize {
        self.state.holder_count()
    }

    /// Holder at `index`. Order is unspecified and changes as holders leave.
    pub fn holder_at(&self, index: usize) -> Option<Address> {
        self.state.holders().get(index).copied()
    }

    /// All current holders.
    pub fn holders(&self) -> &[Address] {
        self.state.holders()
    }

    /// Whether `account` currently holds units.
    pub fn is_holder(&self, account: &Address) -> bool {
        self.state.holder_set().contains(account)
    }

    /// Units `spender` may move on behalf of `owner`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.state.get_allowance(owner, spender)
    }

    /// Cumulative dividend-per-unit index (128.128 fixed-point).
    pub fn dividend_per_unit(&self) -> U256 {
        self.state.get_accumulator().dividend_per_unit
    }

    /// Total dividend value ever recorded.
    pub fn total_dividends(&self) -> U256 {
        self.state.get_accumulator().total_dividends
    }

    /// Total dividend value ever withdrawn.
    pub fn total_withdrawn(&self) -> U256 {
        self.state.get_accumulator().total_withdrawn
    }

    /// Read-only view of the underlying state.
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// The custodian.
    pub fn custody(&self) -> &C {
        &self.custody
    }

    /// Mutable access to the custodian.
    pub fn custody_mut(&mut self) -> &mut C {
        &mut self.custody
    }

    // === Snapshots ===

    /// Point-in-time copy of the ledger.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.to_snapshot()
    }

    /// Snapshot encoded with the deterministic bincode configuration.
    pub fn snapshot_bytes(&self) -> LedgerResult<Vec<u8>> {
        Ok(serialize(&self.snapshot())?)
    }

    /// Rebuild a ledger from snapshot bytes.
    pub fn from_snapshot_bytes(config: LedgerConfig, custody: C, bytes: &[u8]) -> LedgerResult<Self> {
        let snapshot: LedgerSnapshot = deserialize(bytes)?;
        Self::from_snapshot(config, custody, snapshot)
    }

    /// Write a snapshot to `path`.
    pub fn save_snapshot(&self, path: &Path) -> LedgerResult<()> {
        let bytes = self.snapshot_bytes()?;
        fs::write(path, &bytes)?;
        info!(
            path = %path.display(),
            bytes = bytes.len(),
            accounts = self.state.account_count(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Load a ledger from a snapshot file written by [`Ledger::save_snapshot`].
    pub fn load_snapshot(config: LedgerConfig, custody: C, path: &Path) -> LedgerResult<Self> {
        let snapshot = read_snapshot(path)?;
        let ledger = Self::from_snapshot(config, custody, snapshot)?;
        ledger.log_loaded(path);
        Ok(ledger)
    }

    fn log_loaded(&self, path: &Path) {
        info!(
            path = %path.display(),
            accounts = self.state.account_count(),
            holders = self.holders_length(),
            reserves = %self.custody.reserves(),
            "snapshot loaded"
        );
    }
}

fn read_snapshot(path: &Path) -> LedgerResult<LedgerSnapshot> {
    let bytes = fs::read(path)?;
    Ok(deserialize(&bytes)?)
}

/// Value a custodian must hold to back `snapshot`.
fn required_reserves(snapshot: &LedgerSnapshot) -> LedgerResult<U256> {
    snapshot.accumulator.required_reserves().ok_or_else(|| {
        LedgerError::State(StateError::InvalidSnapshot {
            reason: "required reserves overflow".to_string(),
        })
    })
}
