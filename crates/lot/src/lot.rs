//! The capacity tracker

use std::fmt;
use std::sync::Arc;

use parklot_errors::{LotError, Rejected};
use parklot_events::{EventEmitter, EventSender, LotEvent, LotOperation};
use parklot_types::{Capacity, Occupancy, Vehicle, VehicleId};
use tracing::{debug, info};

use crate::observer::{LotObserver, ObserverId, ObserverRegistry};

const DEFAULT_NAME: &str = "lot";

/// A lot with a fixed number of spaces.
///
/// Vehicles are kept in the order they were parked. Observers are notified
/// with the live list at the moment of each transition: `on_full` after a
/// park that takes the last space, `on_space_available` after every
/// successful unpark.
pub struct ParkingLot<V> {
    name: String,
    capacity: Capacity,
    vehicles: Vec<V>,
    observers: ObserverRegistry,
    event_sender: Option<EventSender>,
}

impl<V: Vehicle> ParkingLot<V> {
    /// Create an empty lot with no observers
    #[must_use]
    pub fn new(capacity: Capacity) -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            capacity,
            vehicles: Vec::with_capacity(capacity.get()),
            observers: ObserverRegistry::default(),
            event_sender: None,
        }
    }

    /// Create an empty lot with an initial set of observers, registered in
    /// iteration order. Their handles are listed by
    /// [`observer_ids`](Self::observer_ids).
    #[must_use]
    pub fn with_observers<I>(capacity: Capacity, observers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn LotObserver>>,
    {
        let mut lot = Self::new(capacity);
        for observer in observers {
            let _ = lot.observers.add(observer);
        }
        lot
    }

    /// Name used in logs and emitted events
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Report parks, unparks, transitions and rejections on this channel
    #[must_use]
    pub fn with_event_sender(mut self, sender: EventSender) -> Self {
        self.event_sender = Some(sender);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.vehicles.len() == self.capacity.get()
    }

    /// Number of free spaces
    #[must_use]
    pub fn available(&self) -> usize {
        self.capacity.get() - self.vehicles.len()
    }

    #[must_use]
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            capacity: self.capacity.get(),
            occupied: self.vehicles.len(),
        }
    }

    #[must_use]
    pub fn contains(&self, id: VehicleId) -> bool {
        self.vehicles.iter().any(|vehicle| vehicle.id() == id)
    }

    #[must_use]
    pub fn get(&self, id: VehicleId) -> Option<&V> {
        self.vehicles.iter().find(|vehicle| vehicle.id() == id)
    }

    /// Parked vehicles, oldest first
    #[must_use]
    pub fn vehicles(&self) -> &[V] {
        &self.vehicles
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Handles of the registered observers, in registration order
    #[must_use]
    pub fn observer_ids(&self) -> Vec<ObserverId> {
        self.observers.ids().collect()
    }

    /// Register an observer; it sees every transition from now on
    pub fn add_observer(&mut self, observer: Arc<dyn LotObserver>) -> ObserverId {
        let id = self.observers.add(observer);
        debug!(lot = %self.name, observer = %id, "observer added");
        self.emit(LotEvent::ObserverAdded {
            lot: self.name.clone(),
            observer_id: id.as_u64(),
            observers: self.observers.len(),
        });
        id
    }

    /// Deregister an observer. Returns `false` if the handle is unknown.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        if !self.observers.remove(id) {
            return false;
        }
        debug!(lot = %self.name, observer = %id, "observer removed");
        self.emit(LotEvent::ObserverRemoved {
            lot: self.name.clone(),
            observer_id: id.as_u64(),
            observers: self.observers.len(),
        });
        true
    }

    /// Take a space for `vehicle`.
    ///
    /// If this park takes the last space, every observer's `on_full` runs
    /// once before this returns.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejected`] holding `LotError::CapacityExceeded` if the lot
    /// is already full and `LotError::DuplicateItem` if the same vehicle is
    /// already parked, together with the vehicle passed in. The capacity
    /// check comes first. The lot is unchanged on error.
    pub fn park(&mut self, vehicle: V) -> Result<(), Rejected<V>> {
        if self.is_full() {
            let err = LotError::CapacityExceeded {
                capacity: self.capacity.get(),
            };
            let err = self.reject(LotOperation::Park, vehicle.label(), err);
            return Err(Rejected::new(err, vehicle));
        }

        let id = vehicle.id();
        if self.contains(id) {
            let label = vehicle.label();
            let err = LotError::DuplicateItem {
                vehicle: label.clone(),
            };
            let err = self.reject(LotOperation::Park, label, err);
            return Err(Rejected::new(err, vehicle));
        }

        let label = vehicle.label();
        self.vehicles.push(vehicle);
        debug!(
            lot = %self.name,
            vehicle = %label,
            occupied = self.vehicles.len(),
            capacity = self.capacity.get(),
            "vehicle parked"
        );
        self.emit(LotEvent::VehicleParked {
            lot: self.name.clone(),
            vehicle_id: id,
            vehicle: label,
            occupied: self.vehicles.len(),
            capacity: self.capacity.get(),
        });

        if self.is_full() {
            info!(
                lot = %self.name,
                capacity = self.capacity.get(),
                observers = self.observers.len(),
                "lot is full"
            );
            self.observers.notify_full();
            self.emit_lot_full(self.name.as_str(), self.occupancy());
        }

        Ok(())
    }

    /// Release the space held by `vehicle` and hand the parked value back.
    ///
    /// Every observer's `on_space_available` runs once before this returns.
    ///
    /// # Errors
    ///
    /// Returns `LotError::ItemNotFound` if the lot is empty or the vehicle
    /// is not parked here. The lot is unchanged on error.
    pub fn unpark(&mut self, vehicle: &V) -> Result<V, LotError> {
        self.release(vehicle.id(), vehicle.label())
    }

    /// Same as [`unpark`](Self::unpark), keyed by id.
    ///
    /// # Errors
    ///
    /// Returns `LotError::ItemNotFound` if no vehicle with `id` is parked.
    pub fn unpark_by_id(&mut self, id: VehicleId) -> Result<V, LotError> {
        self.release(id, id.to_string())
    }

    fn release(&mut self, id: VehicleId, label: String) -> Result<V, LotError> {
        let Some(index) = self.vehicles.iter().position(|vehicle| vehicle.id() == id) else {
            let err = LotError::ItemNotFound {
                vehicle: label.clone(),
            };
            return Err(self.reject(LotOperation::Unpark, label, err));
        };

        let vehicle = self.vehicles.remove(index);
        debug!(
            lot = %self.name,
            vehicle = %label,
            occupied = self.vehicles.len(),
            capacity = self.capacity.get(),
            "vehicle unparked"
        );
        self.emit(LotEvent::VehicleUnparked {
            lot: self.name.clone(),
            vehicle_id: id,
            vehicle: label,
            occupied: self.vehicles.len(),
            capacity: self.capacity.get(),
        });

        self.observers.notify_space_available();
        self.emit_space_available(self.name.as_str(), self.occupancy());

        Ok(vehicle)
    }

    fn reject(&self, operation: LotOperation, vehicle: String, err: LotError) -> LotError {
        debug!(
            lot = %self.name,
            operation = ?operation,
            vehicle = %vehicle,
            error = %err,
            "operation rejected"
        );
        self.emit_rejected(self.name.as_str(), operation, vehicle, &err);
        err
    }
}

impl<V> EventEmitter for ParkingLot<V> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}

impl<V: fmt::Debug> fmt::Debug for ParkingLot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParkingLot")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("vehicles", &self.vehicles)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parklot_types::Car;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counter {
        full: AtomicUsize,
        space: AtomicUsize,
    }

    impl Counter {
        fn full(&self) -> usize {
            self.full.load(Ordering::SeqCst)
        }

        fn space(&self) -> usize {
            self.space.load(Ordering::SeqCst)
        }
    }

    impl LotObserver for Counter {
        fn on_full(&self) {
            self.full.fetch_add(1, Ordering::SeqCst);
        }

        fn on_space_available(&self) {
            self.space.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn lot(capacity: usize) -> ParkingLot<Car> {
        ParkingLot::new(Capacity::new(capacity).unwrap())
    }

    #[test]
    fn test_park_until_full_then_reject() {
        let mut lot = lot(2);
        lot.park(Car::new()).unwrap();
        lot.park(Car::new()).unwrap();
        assert!(lot.is_full());

        let extra = Car::new();
        let rejected = lot.park(extra.clone()).unwrap_err();
        assert_eq!(rejected.error, LotError::CapacityExceeded { capacity: 2 });
        assert_eq!(rejected.into_vehicle().id, extra.id);
        assert_eq!(lot.len(), 2);
    }

    #[test]
    fn test_same_vehicle_twice_is_duplicate() {
        let mut lot = lot(2);
        let car = Car::with_plate("AB-123");
        lot.park(car.clone()).unwrap();

        let err = lot.park(car.clone()).unwrap_err().error;
        assert_eq!(
            err,
            LotError::DuplicateItem {
                vehicle: "AB-123".into()
            }
        );
        assert_eq!(lot.len(), 1);
    }

    #[test]
    fn test_capacity_checked_before_duplicate() {
        let mut lot = lot(1);
        let car = Car::new();
        lot.park(car.clone()).unwrap();

        let err = lot.park(car).unwrap_err().error;
        assert!(matches!(err, LotError::CapacityExceeded { .. }));
    }

    #[test]
    fn test_unpark_from_empty_lot() {
        let mut lot = lot(1);
        let err = lot.unpark(&Car::new()).unwrap_err();
        assert!(matches!(err, LotError::ItemNotFound { .. }));
    }

    #[test]
    fn test_unpark_returns_vehicle_and_restores_state() {
        let mut lot = lot(3);
        let first = Car::new();
        lot.park(first.clone()).unwrap();
        let before = lot.occupancy();

        let second = Car::with_plate("XY-9");
        lot.park(second.clone()).unwrap();
        let returned = lot.unpark(&second).unwrap();

        assert_eq!(returned.id, second.id);
        assert_eq!(lot.occupancy(), before);
        assert!(lot.contains(first.id));
        assert!(!lot.contains(second.id));
    }

    #[test]
    fn test_unpark_keeps_park_order() {
        let mut lot = lot(3);
        let cars: Vec<Car> = (0..3).map(|_| Car::new()).collect();
        for car in &cars {
            lot.park(car.clone()).unwrap();
        }
        lot.unpark_by_id(cars[1].id).unwrap();

        let remaining: Vec<VehicleId> = lot.vehicles().iter().map(|car| car.id).collect();
        assert_eq!(remaining, vec![cars[0].id, cars[2].id]);
    }

    #[test]
    fn test_full_notifies_every_observer_once() {
        let owner = Arc::new(Counter::default());
        let guard = Arc::new(Counter::default());
        let mut lot: ParkingLot<Car> = ParkingLot::with_observers(
            Capacity::new(2).unwrap(),
            [
                Arc::clone(&owner) as Arc<dyn LotObserver>,
                Arc::clone(&guard) as Arc<dyn LotObserver>,
            ],
        );

        lot.park(Car::new()).unwrap();
        assert_eq!(owner.full(), 0);

        lot.park(Car::new()).unwrap();
        assert_eq!(owner.full(), 1);
        assert_eq!(guard.full(), 1);

        let _ = lot.park(Car::new());
        assert_eq!(owner.full(), 1);
    }

    #[test]
    fn test_initial_observer_can_be_removed() {
        let initial = Arc::new(Counter::default());
        let later = Arc::new(Counter::default());
        let mut lot: ParkingLot<Car> = ParkingLot::with_observers(
            Capacity::new(1).unwrap(),
            [Arc::clone(&initial) as Arc<dyn LotObserver>],
        );
        let later_id = lot.add_observer(Arc::clone(&later) as Arc<dyn LotObserver>);

        let ids = lot.observer_ids();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[1], later_id);

        let car = Car::new();
        lot.park(car.clone()).unwrap();
        assert!(lot.remove_observer(ids[0]));
        lot.unpark(&car).unwrap();

        assert_eq!(initial.full(), 1);
        assert_eq!(initial.space(), 0);
        assert_eq!(later.space(), 1);
        assert_eq!(lot.observer_ids(), vec![later_id]);
    }

    #[test]
    fn test_observer_added_later_is_notified() {
        let mut lot = lot(1);
        let late = Arc::new(Counter::default());
        lot.add_observer(Arc::clone(&late) as Arc<dyn LotObserver>);

        lot.park(Car::new()).unwrap();
        assert_eq!(late.full(), 1);
    }

    #[test]
    fn test_removed_observer_is_not_notified() {
        let mut lot = lot(1);
        let kept = Arc::new(Counter::default());
        let dropped = Arc::new(Counter::default());
        lot.add_observer(Arc::clone(&kept) as Arc<dyn LotObserver>);
        let dropped_id = lot.add_observer(Arc::clone(&dropped) as Arc<dyn LotObserver>);

        let car = Car::new();
        lot.park(car.clone()).unwrap();
        assert!(lot.remove_observer(dropped_id));
        lot.unpark(&car).unwrap();

        assert_eq!(kept.full(), 1);
        assert_eq!(kept.space(), 1);
        assert_eq!(dropped.full(), 1);
        assert_eq!(dropped.space(), 0);
        assert_eq!(lot.observer_count(), 1);
    }

    #[test]
    fn test_failed_operations_do_not_notify() {
        let counter = Arc::new(Counter::default());
        let mut lot = lot(1);
        lot.add_observer(Arc::clone(&counter) as Arc<dyn LotObserver>);

        let _ = lot.unpark(&Car::new());
        let car = Car::new();
        lot.park(car.clone()).unwrap();
        let _ = lot.park(car);

        assert_eq!(counter.full(), 1);
        assert_eq!(counter.space(), 0);
    }

    #[test]
    fn test_remove_unknown_observer() {
        let mut lot = lot(1);
        let id = lot.add_observer(Arc::new(Counter::default()));
        assert!(lot.remove_observer(id));
        assert!(!lot.remove_observer(id));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone, Copy)]
        enum Op {
            Park(usize),
            Unpark(usize),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![(0..6usize).prop_map(Op::Park), (0..6usize).prop_map(Op::Unpark)]
        }

        proptest! {
            #[test]
            fn matches_model(capacity in 1..5usize, ops in proptest::collection::vec(op(), 0..64)) {
                let pool: Vec<Car> = (0..6).map(|_| Car::new()).collect();
                let counter = Arc::new(Counter::default());
                let mut lot = lot(capacity);
                lot.add_observer(Arc::clone(&counter) as Arc<dyn LotObserver>);

                let mut model: Vec<usize> = Vec::new();
                let mut expected_full = 0;
                let mut expected_space = 0;

                for op in ops {
                    match op {
                        Op::Park(i) => {
                            let result = lot.park(pool[i].clone());
                            if model.len() == capacity {
                                let full = matches!(&result, Err(r) if matches!(r.error, LotError::CapacityExceeded { .. }));
                                prop_assert!(full, "expected capacity rejection, got {:?}", result);
                            } else if model.contains(&i) {
                                let duplicate = matches!(&result, Err(r) if matches!(r.error, LotError::DuplicateItem { .. }));
                                prop_assert!(duplicate, "expected duplicate rejection, got {:?}", result);
                            } else {
                                prop_assert!(result.is_ok());
                                model.push(i);
                                if model.len() == capacity {
                                    expected_full += 1;
                                }
                            }
                        }
                        Op::Unpark(i) => {
                            let result = lot.unpark(&pool[i]);
                            if let Some(pos) = model.iter().position(|&m| m == i) {
                                prop_assert_eq!(result.map(|car| car.id), Ok(pool[i].id));
                                model.remove(pos);
                                expected_space += 1;
                            } else {
                                let missing = matches!(result, Err(LotError::ItemNotFound { .. }));
                                prop_assert!(missing, "expected missing vehicle, got {:?}", result);
                            }
                        }
                    }

                    prop_assert!(lot.len() <= lot.capacity());
                    let parked: Vec<VehicleId> = lot.vehicles().iter().map(|car| car.id).collect();
                    let modelled: Vec<VehicleId> = model.iter().map(|&m| pool[m].id).collect();
                    prop_assert_eq!(parked, modelled);
                }

                prop_assert_eq!(counter.full(), expected_full);
                prop_assert_eq!(counter.space(), expected_space);
            }
        }
    }
}
