//! Vehicle identity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of a single physical vehicle.
///
/// Lots compare vehicles by this id alone, never by their other fields, so
/// two cars with the same plate are still two different vehicles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(Uuid);

impl VehicleId {
    /// Mint a fresh, never-before-seen id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing uuid
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VehicleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can occupy a space in a lot.
pub trait Vehicle {
    /// Stable identity used for membership and duplicate checks
    fn id(&self) -> VehicleId;

    /// Human-readable label for logs and error messages
    fn label(&self) -> String {
        self.id().to_string()
    }
}

impl<T: Vehicle + ?Sized> Vehicle for Arc<T> {
    fn id(&self) -> VehicleId {
        (**self).id()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

impl<T: Vehicle + ?Sized> Vehicle for &T {
    fn id(&self) -> VehicleId {
        (**self).id()
    }

    fn label(&self) -> String {
        (**self).label()
    }
}

/// A plain vehicle with an optional licence plate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: VehicleId,
    pub plate: Option<String>,
}

impl Car {
    /// Create a car with a fresh identity
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: VehicleId::new(),
            plate: None,
        }
    }

    /// Create a car with a fresh identity and a plate
    #[must_use]
    pub fn with_plate(plate: impl Into<String>) -> Self {
        Self {
            id: VehicleId::new(),
            plate: Some(plate.into()),
        }
    }
}

impl Default for Car {
    fn default() -> Self {
        Self::new()
    }
}

impl Vehicle for Car {
    fn id(&self) -> VehicleId {
        self.id
    }

    fn label(&self) -> String {
        match &self.plate {
            Some(plate) => plate.clone(),
            None => self.id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cars_with_same_plate_are_distinct() {
        let a = Car::with_plate("AB-123");
        let b = Car::with_plate("AB-123");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.label(), b.label());
    }

    #[test]
    fn test_clone_keeps_identity() {
        let a = Car::new();
        let copy = a.clone();
        assert_eq!(a.id(), copy.id());
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let car = Car::new();
        assert_eq!(car.label(), car.id.to_string());
    }
}
