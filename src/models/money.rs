//! Yen amount type
//!
//! Marketplace exports denominate every amount in integral yen, so amounts
//! are stored as unsigned whole units. Signed settlement amounts (used only
//! for cancellation detection) are parsed separately and never reach this
//! type.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A non-negative amount of whole yen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Yen(u64);

impl Yen {
    /// Create a Yen amount
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Create a zero Yen amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount as a plain integer
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a yen amount from a string
    ///
    /// Accepts plain decimal digits only; signs, separators, and empty
    /// strings are rejected.
    pub fn parse(s: &str) -> Result<Self, YenParseError> {
        let s = s.trim();
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| YenParseError(s.to_string()))
    }
}

impl Default for Yen {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Yen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a valid yen amount
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid yen amount: '{0}'")]
pub struct YenParseError(String);
