//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use console::Style;
use parklot_events::{EventMessage, LotEvent};
use parklot_lot::ParkingLot;
use parklot_types::{Car, OutputFormat};
use std::io;

use crate::events::NoticeBoard;

/// Output renderer for lot events and the final summary
#[derive(Clone)]
pub struct OutputRenderer {
    format: OutputFormat,
}

impl OutputRenderer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render one event drained from the lot's channel
    pub fn render_event(&self, message: &EventMessage) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string(message).map_err(io::Error::other)?;
                println!("{json}");
                Ok(())
            }
            OutputFormat::Plain => {
                self.render_plain_event(&message.event);
                Ok(())
            }
        }
    }

    fn render_plain_event(&self, event: &LotEvent) {
        let dim = Style::new().dim();
        match event {
            LotEvent::VehicleParked {
                vehicle,
                occupied,
                capacity,
                ..
            } => {
                println!("parked   {vehicle} {}", dim.apply_to(format!("({occupied}/{capacity})")));
            }
            LotEvent::VehicleUnparked {
                vehicle,
                occupied,
                capacity,
                ..
            } => {
                println!("unparked {vehicle} {}", dim.apply_to(format!("({occupied}/{capacity})")));
            }
            LotEvent::OperationRejected {
                operation,
                vehicle,
                failure,
                ..
            } => {
                let red = Style::new().red().bold();
                eprintln!(
                    "{} {operation:?} {vehicle}: {}",
                    red.apply_to("rejected"),
                    failure.message
                );
                if let Some(code) = &failure.code {
                    eprintln!("  Code: {code}");
                }
                if let Some(hint) = &failure.hint {
                    eprintln!("  Hint: {hint}");
                }
            }
            // Transitions are announced by the notice board as they happen
            LotEvent::LotFull { .. }
            | LotEvent::SpaceAvailable { .. }
            | LotEvent::ObserverAdded { .. }
            | LotEvent::ObserverRemoved { .. } => {}
        }
    }

    /// Render the lot contents once all operations have run
    pub fn render_summary(&self, lot: &ParkingLot<Car>, notices: &NoticeBoard) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "lot": lot.name(),
                    "occupancy": lot.occupancy(),
                    "vehicles": lot.vehicles(),
                    "notices": {
                        "full": notices.full_count(),
                        "space_available": notices.space_count(),
                    },
                });
                println!("{summary}");
            }
            OutputFormat::Plain => {
                println!();
                println!(
                    "{} {} ({} free)",
                    Style::new().bold().apply_to(lot.name()),
                    lot.occupancy(),
                    lot.available()
                );

                if !lot.is_empty() {
                    let mut table = Table::new();
                    table
                        .load_preset(UTF8_FULL)
                        .set_content_arrangement(ContentArrangement::Dynamic)
                        .set_header(vec!["#", "Vehicle", "Id"]);
                    for (slot, car) in lot.vehicles().iter().enumerate() {
                        table.add_row(vec![
                            Cell::new(slot + 1),
                            Cell::new(car.plate.as_deref().unwrap_or("-")),
                            Cell::new(car.id),
                        ]);
                    }
                    println!("{table}");
                }

                println!(
                    "notices: {} full, {} space available",
                    notices.full_count(),
                    notices.space_count()
                );
            }
        }
        Ok(())
    }
}
