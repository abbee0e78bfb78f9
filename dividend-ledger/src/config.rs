//! Ledger configuration.

/// Token metadata and sizing for a [`Ledger`](crate::Ledger).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Human-readable token name.
    pub name: String,

    /// Ticker symbol.
    pub symbol: String,

    /// Expected number of accounts, used to pre-size the state maps.
    pub holder_capacity: usize,
}

impl LedgerConfig {
    /// Create a configuration with the given name and symbol.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Pre-size the ledger for `capacity` accounts.
    pub fn with_holder_capacity(mut self, capacity: usize) -> Self {
        self.holder_capacity = capacity;
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: "Dividend Token".to_string(),
            symbol: "DIV".to_string(),
            holder_capacity: 0,
        }
    }
}
