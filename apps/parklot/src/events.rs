//! Lot observers used by the CLI

use console::Style;
use parklot_lot::LotObserver;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Observer standing in for the lot's sign at the entrance.
///
/// Counts every notice it receives and, when `announce` is set, prints it
/// immediately so it lands between the events that caused it.
pub struct NoticeBoard {
    lot: String,
    announce: bool,
    full: AtomicUsize,
    space: AtomicUsize,
}

impl NoticeBoard {
    pub fn new(lot: impl Into<String>, announce: bool) -> Self {
        Self {
            lot: lot.into(),
            announce,
            full: AtomicUsize::new(0),
            space: AtomicUsize::new(0),
        }
    }

    pub fn full_count(&self) -> usize {
        self.full.load(Ordering::Relaxed)
    }

    pub fn space_count(&self) -> usize {
        self.space.load(Ordering::Relaxed)
    }
}

impl LotObserver for NoticeBoard {
    fn on_full(&self) {
        self.full.fetch_add(1, Ordering::Relaxed);
        if self.announce {
            let style = Style::new().yellow().bold();
            println!("{} {} is full", style.apply_to("FULL"), self.lot);
        }
    }

    fn on_space_available(&self) {
        self.space.fetch_add(1, Ordering::Relaxed);
        if self.announce {
            let style = Style::new().green();
            println!("{} in {}", style.apply_to("SPACE AVAILABLE"), self.lot);
        }
    }
}
