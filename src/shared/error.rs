use thiserror::Error;

use crate::shared::CarId;

/// Failures the dispatch core reports back to its caller.
///
/// Duplicate calls and destinations are not errors; the request store
/// absorbs them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("car {car_id} does not exist (fleet has {fleet_size} cars)")]
    InvalidCarId { car_id: CarId, fleet_size: usize },
}
