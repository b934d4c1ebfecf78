use tracing::info;

use crate::error::StudioError;
use crate::models::{Bike, BikeFilter, BikeStatus, Occupancy};

/// The fixed set of bikes in the room, kept in ascending id order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BikeRegistry {
    bikes: Vec<Bike>,
}

impl BikeRegistry {
    /// Creates `total` available bikes numbered from 1.
    pub fn new(total: u32) -> Self {
        Self {
            bikes: (1..=total).map(Bike::available).collect(),
        }
    }

    /// Builds a registry from seed records. Ids must be unique and positive,
    /// and each bike's occupant fields must agree with its status.
    pub fn from_bikes(mut bikes: Vec<Bike>) -> Result<Self, StudioError> {
        bikes.sort_by_key(|b| b.id);
        for pair in bikes.windows(2) {
            if pair[0].id == pair[1].id {
                return Err(StudioError::InvalidSeed(format!(
                    "duplicate bike id {}",
                    pair[0].id
                )));
            }
        }
        if let Some(bike) = bikes.iter().find(|b| b.id == 0) {
            return Err(StudioError::InvalidSeed(format!(
                "bike id must be positive, got {}",
                bike.id
            )));
        }
        if let Some(bike) = bikes.iter().find(|b| !b.is_consistent()) {
            return Err(StudioError::InvalidSeed(format!(
                "bike {} is {} but occupant fields disagree",
                bike.id,
                bike.status.label()
            )));
        }
        Ok(Self { bikes })
    }

    pub fn len(&self) -> usize {
        self.bikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bikes.is_empty()
    }

    pub fn get(&self, bike_id: u32) -> Option<&Bike> {
        self.bikes.iter().find(|b| b.id == bike_id)
    }

    fn get_mut(&mut self, bike_id: u32) -> Result<&mut Bike, StudioError> {
        self.bikes
            .iter_mut()
            .find(|b| b.id == bike_id)
            .ok_or_else(|| StudioError::NotFound(format!("bike {bike_id}")))
    }

    /// Assigns an available bike to a rider. One credit is consumed at booking
    /// time, independently of the roster's own credit balance.
    pub fn book(
        &mut self,
        bike_id: u32,
        name: &str,
        class_label: &str,
        credits: u32,
    ) -> Result<&Bike, StudioError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StudioError::InvalidInput("name must not be empty".into()));
        }
        if credits < 1 {
            return Err(StudioError::InvalidInput(
                "at least 1 credit is required to book".into(),
            ));
        }

        let bike = self.get_mut(bike_id)?;
        if bike.status != BikeStatus::Available {
            return Err(StudioError::InvalidState(format!(
                "bike {bike_id} is {}",
                bike.status.label()
            )));
        }

        bike.status = BikeStatus::Occupied;
        bike.occupancy = Some(Occupancy {
            occupant: name.to_string(),
            class_label: class_label.to_string(),
            credits_remaining: credits - 1,
        });
        info!(bike_id, rider = name, credits_left = credits - 1, "bike booked");
        Ok(bike)
    }

    /// Takes an available bike out of service.
    pub fn block(&mut self, bike_id: u32) -> Result<&Bike, StudioError> {
        let bike = self.get_mut(bike_id)?;
        if bike.status != BikeStatus::Available {
            return Err(StudioError::InvalidState(format!(
                "bike {bike_id} is {}",
                bike.status.label()
            )));
        }
        bike.status = BikeStatus::Blocked;
        bike.occupancy = None;
        info!(bike_id, "bike blocked");
        Ok(bike)
    }

    pub fn reset_all(&mut self) {
        for bike in &mut self.bikes {
            bike.status = BikeStatus::Available;
            bike.occupancy = None;
        }
        info!(total = self.bikes.len(), "room reset");
    }

    pub fn query(&self, filter: BikeFilter) -> Vec<&Bike> {
        self.bikes.iter().filter(|b| filter.matches(b.status)).collect()
    }

    pub fn count(&self, status: BikeStatus) -> usize {
        self.bikes.iter().filter(|b| b.status == status).count()
    }
}
