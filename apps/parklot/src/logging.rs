//! Structured logging of lot events
//!
//! Every event drained from the lot's channel is also written to the tracing
//! subscriber at the level stamped on it, so `--json` logs carry the full
//! event stream next to the rendered output.

use parklot_events::{EventLevel, EventMessage, LotEvent};
use tracing::{debug, info, warn};

/// Log one event at the severity recorded in its metadata
pub fn log_event_with_tracing(message: &EventMessage) {
    let event = &message.event;
    let meta = &message.meta;

    match event {
        LotEvent::OperationRejected {
            lot,
            operation,
            vehicle,
            failure,
        } => {
            warn!(
                source = meta.source.as_str(),
                event_id = %meta.event_id,
                lot = %lot,
                operation = ?operation,
                vehicle = %vehicle,
                code = ?failure.code,
                message = %failure.message,
                "Operation rejected"
            );
        }
        _ => match meta.level {
            EventLevel::Warn => {
                warn!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?event, "Lot event");
            }
            EventLevel::Info => {
                info!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?event, "Lot event");
            }
            EventLevel::Debug => {
                debug!(source = meta.source.as_str(), event_id = %meta.event_id, correlation = ?meta.correlation_id, event = ?event, "Lot event");
            }
        },
    }
}
