//! Parking lot error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

/// Rejections raised by a lot when a park or unpark cannot proceed.
///
/// A failed operation never mutates the lot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LotError {
    #[error("lot is full: all {capacity} spaces are taken")]
    CapacityExceeded { capacity: usize },

    #[error("vehicle already parked: {vehicle}")]
    DuplicateItem { vehicle: String },

    #[error("vehicle not found: {vehicle}")]
    ItemNotFound { vehicle: String },

    #[error("invalid capacity: {value} (must be at least 1)")]
    InvalidCapacity { value: usize },
}

/// A park the lot refused, handing the vehicle back to the caller.
///
/// Take the parts with [`Rejected::into_parts`] or
/// convert into the bare [`LotError`] with `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}")]
pub struct Rejected<T> {
    pub error: LotError,
    pub vehicle: T,
}

impl<T> Rejected<T> {
    #[must_use]
    pub fn new(error: LotError, vehicle: T) -> Self {
        Self { error, vehicle }
    }

    #[must_use]
    pub fn error(&self) -> &LotError {
        &self.error
    }

    /// Recover the vehicle that was not parked
    #[must_use]
    pub fn into_vehicle(self) -> T {
        self.vehicle
    }

    #[must_use]
    pub fn into_parts(self) -> (LotError, T) {
        (self.error, self.vehicle)
    }
}

impl<T> From<Rejected<T>> for LotError {
    fn from(rejected: Rejected<T>) -> Self {
        rejected.error
    }
}

impl<T> UserFacingError for Rejected<T> {
    fn user_message(&self) -> Cow<'_, str> {
        self.error.user_message()
    }

    fn user_hint(&self) -> Option<&'static str> {
        self.error.user_hint()
    }

    fn user_code(&self) -> Option<&'static str> {
        self.error.user_code()
    }
}

impl UserFacingError for LotError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::CapacityExceeded { .. } => Some("Unpark a vehicle to free a space first."),
            Self::DuplicateItem { .. } => Some("The vehicle is already in this lot."),
            Self::ItemNotFound { .. } => Some("Only vehicles parked in this lot can be unparked."),
            Self::InvalidCapacity { .. } => Some("Configure a capacity of at least 1."),
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        let code = match self {
            Self::CapacityExceeded { .. } => "lot.capacity_exceeded",
            Self::DuplicateItem { .. } => "lot.duplicate_item",
            Self::ItemNotFound { .. } => "lot.item_not_found",
            Self::InvalidCapacity { .. } => "lot.invalid_capacity",
        };
        Some(code)
    }
}
