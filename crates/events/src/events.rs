use serde::{Deserialize, Serialize};

use crate::{EventLevel, EventSource};
use parklot_errors::UserFacingError;
use parklot_types::VehicleId;

/// Structured failure information for rejected operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureContext {
    /// Stable error code, e.g. `lot.capacity_exceeded`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Short user-facing message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Whether retrying the operation might succeed.
    pub retryable: bool,
}

impl FailureContext {
    /// Build failure context from a `UserFacingError` implementation.
    #[must_use]
    pub fn from_error<E: UserFacingError + ?Sized>(error: &E) -> Self {
        Self {
            code: error.user_code().map(Into::into),
            message: error.user_message().into_owned(),
            hint: error.user_hint().map(Into::into),
            retryable: error.is_retryable(),
        }
    }
}

/// Which lot operation an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotOperation {
    Park,
    Unpark,
}

/// Everything a lot reports about itself
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LotEvent {
    /// A vehicle took a space
    VehicleParked {
        lot: String,
        vehicle_id: VehicleId,
        vehicle: String,
        occupied: usize,
        capacity: usize,
    },

    /// A vehicle left its space
    VehicleUnparked {
        lot: String,
        vehicle_id: VehicleId,
        vehicle: String,
        occupied: usize,
        capacity: usize,
    },

    /// The last free space was just taken
    LotFull { lot: String, capacity: usize },

    /// A space was just freed
    SpaceAvailable {
        lot: String,
        occupied: usize,
        capacity: usize,
    },

    ObserverAdded {
        lot: String,
        observer_id: u64,
        observers: usize,
    },

    ObserverRemoved {
        lot: String,
        observer_id: u64,
        observers: usize,
    },

    /// A park or unpark was refused; the lot is unchanged
    OperationRejected {
        lot: String,
        operation: LotOperation,
        vehicle: String,
        failure: FailureContext,
    },
}

impl LotEvent {
    /// Name of the lot that produced this event
    #[must_use]
    pub fn lot(&self) -> &str {
        match self {
            Self::VehicleParked { lot, .. }
            | Self::VehicleUnparked { lot, .. }
            | Self::LotFull { lot, .. }
            | Self::SpaceAvailable { lot, .. }
            | Self::ObserverAdded { lot, .. }
            | Self::ObserverRemoved { lot, .. }
            | Self::OperationRejected { lot, .. } => lot,
        }
    }

    /// Identify the source component for this event (used for metadata/logging).
    #[must_use]
    pub fn event_source(&self) -> EventSource {
        match self {
            Self::ObserverAdded { .. } | Self::ObserverRemoved { .. } => EventSource::OBSERVER,
            _ => EventSource::LOT,
        }
    }

    /// Severity this event is reported and logged at
    #[must_use]
    pub fn log_level(&self) -> EventLevel {
        match self {
            Self::OperationRejected { .. } => EventLevel::Warn,
            Self::LotFull { .. } | Self::SpaceAvailable { .. } => EventLevel::Info,
            Self::VehicleParked { .. }
            | Self::VehicleUnparked { .. }
            | Self::ObserverAdded { .. }
            | Self::ObserverRemoved { .. } => EventLevel::Debug,
        }
    }
}
