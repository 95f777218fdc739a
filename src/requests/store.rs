/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::collections::VecDeque;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{CarId, DestinationRequest, Floor, FloorCall};

/**
 * Outstanding demand not yet served by any car.
 *
 * Calls and destinations behave as sets: adding a duplicate is a no-op and
 * removing a non-member reports false. Both keep submission order so that
 * "first available" work is the earliest submitted.
 *
 * # Fields
 * - `calls`:           Outstanding floor calls.
 * - `destinations`:    Outstanding in-car destination requests.
 * - `pending`:         Floors that had no eligible car when they arrived.
 */
#[derive(Debug, Default, Clone)]
pub struct RequestStore {
    calls: Vec<FloorCall>,
    destinations: Vec<DestinationRequest>,
    pending: VecDeque<Floor>,
}

/***************************************/
/*             Public API              */
/***************************************/
impl RequestStore {
    pub fn new() -> RequestStore {
        RequestStore::default()
    }

    /// Returns false if the call was already outstanding.
    pub fn add_call(&mut self, call: FloorCall) -> bool {
        if self.contains_call(&call) {
            return false;
        }
        self.calls.push(call);
        true
    }

    pub fn contains_call(&self, call: &FloorCall) -> bool {
        self.calls.contains(call)
    }

    pub fn remove_call(&mut self, call: &FloorCall) -> bool {
        match self.calls.iter().position(|c| c == call) {
            Some(index) => {
                self.calls.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns false if the destination was already outstanding.
    pub fn add_destination(&mut self, destination: DestinationRequest) -> bool {
        if self.contains_destination(&destination) {
            return false;
        }
        self.destinations.push(destination);
        true
    }

    pub fn contains_destination(&self, destination: &DestinationRequest) -> bool {
        self.destinations.contains(destination)
    }

    pub fn remove_destination(&mut self, destination: &DestinationRequest) -> bool {
        match self.destinations.iter().position(|d| d == destination) {
            Some(index) => {
                self.destinations.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn enqueue_pending(&mut self, floor: Floor) {
        self.pending.push_back(floor);
    }

    pub fn dequeue_pending(&mut self) -> Option<Floor> {
        self.pending.pop_front()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Destination of `car_id` closest to `floor`, earliest submitted on ties.
    pub fn nearest_destination(&self, car_id: CarId, floor: Floor) -> Option<Floor> {
        self.destinations
            .iter()
            .filter(|d| d.car_id == car_id)
            .enumerate()
            .min_by_key(|(order, d)| ((i64::from(d.floor) - i64::from(floor)).abs(), *order))
            .map(|(_, d)| d.floor)
    }

    pub fn earliest_call(&self) -> Option<FloorCall> {
        self.calls.first().copied()
    }

    pub fn calls(&self) -> Vec<FloorCall> {
        self.calls.clone()
    }

    pub fn destinations(&self) -> Vec<DestinationRequest> {
        self.destinations.clone()
    }

    pub fn pending(&self) -> Vec<Floor> {
        self.pending.iter().copied().collect()
    }
}
