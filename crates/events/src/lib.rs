#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for parklot
//!
//! Lots report what happens to them through events sent over an unbounded
//! channel. The receiving side decides how to render or log them; emitters
//! never block and never fail when nobody is listening.
//!
//! ## Architecture
//!
//! - **`LotEvent`**: one enum covering parks, unparks, capacity transitions
//!   and rejected operations
//! - **`EventMeta`**: id, timestamp, level and source attached at emission
//! - **`EventEmitter` trait**: single API for anything that holds a sender

pub mod events;
pub mod meta;

pub use events::{FailureContext, LotEvent, LotOperation};
pub use meta::{EventLevel, EventMessage, EventMeta, EventSource};

use parklot_types::Occupancy;
use tokio::sync::mpsc::UnboundedSender;

/// Type alias for the event sender
pub type EventSender = UnboundedSender<EventMessage>;

/// Type alias for the event receiver
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<EventMessage>;

/// Create a new event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting lot events
///
/// Works the same whether you have a raw `EventSender` or a struct that
/// optionally carries one.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: LotEvent) {
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(EventMessage::from_event(event));
        }
    }

    /// Emit a lot-full transition
    fn emit_lot_full(&self, lot: impl Into<String>, occupancy: Occupancy) {
        self.emit(LotEvent::LotFull {
            lot: lot.into(),
            capacity: occupancy.capacity,
        });
    }

    /// Emit a space-available transition
    fn emit_space_available(&self, lot: impl Into<String>, occupancy: Occupancy) {
        self.emit(LotEvent::SpaceAvailable {
            lot: lot.into(),
            occupied: occupancy.occupied,
            capacity: occupancy.capacity,
        });
    }

    /// Emit a rejection built from any user-facing error
    fn emit_rejected<E: parklot_errors::UserFacingError + ?Sized>(
        &self,
        lot: impl Into<String>,
        operation: LotOperation,
        vehicle: impl Into<String>,
        error: &E,
    ) {
        self.emit(LotEvent::OperationRejected {
            lot: lot.into(),
            operation,
            vehicle: vehicle.into(),
            failure: FailureContext::from_error(error),
        });
    }
}

/// Implementation of `EventEmitter` for the raw `EventSender`
impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}
