#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Capacity-bounded parking lot for parklot
//!
//! A [`ParkingLot`] holds at most `capacity` vehicles, compared by
//! [`VehicleId`](parklot_types::VehicleId), and tells its registered
//! [`LotObserver`]s when the last space is taken and whenever a space frees
//! up. Observers run inline, in registration order, before `park` or
//! `unpark` returns.

pub mod lot;
pub mod observer;

pub use lot::ParkingLot;
pub use observer::{LotObserver, ObserverId};
