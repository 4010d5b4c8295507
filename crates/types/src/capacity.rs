//! Lot capacity and occupancy snapshots

use parklot_errors::LotError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Number of spaces in a lot. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    /// Validate a raw space count
    ///
    /// # Errors
    ///
    /// Returns `LotError::InvalidCapacity` if `value` is zero.
    pub fn new(value: usize) -> Result<Self, LotError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or(LotError::InvalidCapacity { value })
    }

    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl From<NonZeroUsize> for Capacity {
    fn from(value: NonZeroUsize) -> Self {
        Self(value)
    }
}

impl TryFrom<usize> for Capacity {
    type Error = LotError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Capacity> for usize {
    fn from(value: Capacity) -> Self {
        value.get()
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Point-in-time view of how many spaces are taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub capacity: usize,
    pub occupied: usize,
}

impl Occupancy {
    #[must_use]
    pub fn available(&self) -> usize {
        self.capacity.saturating_sub(self.occupied)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.occupied >= self.capacity
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.occupied, self.capacity)
    }
}
