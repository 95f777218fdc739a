/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::car::Car;
use crate::config::DispatchConfig;
use crate::notifier::ArrivalNotifier;
use crate::requests::RequestStore;
use crate::shared::{
    Arrival, CarId, CarStatus, DestinationRequest, Direction, DispatchError, Floor, FloorCall,
    StatusReport,
};

/**
 * Assigns floor calls and destination requests to cars.
 *
 * All dispatch state lives behind a single lock. Request intake and arrival
 * reconciliation each take the lock for their whole decision, so a status
 * read never sees a half-applied update and evaluation of a car is atomic
 * with committing its next motion.
 */
pub struct Dispatcher {
    state: Mutex<DispatchState>,
}

/**
 * # Fields
 * - `cars`:        Car handles, indexed by car id.
 * - `statuses`:    Last known floor and committed target per car.
 * - `requests`:    Outstanding calls, destinations and the pending-floor queue.
 */
struct DispatchState {
    cars: Vec<Car>,
    statuses: Vec<CarStatus>,
    requests: RequestStore,
}

/***************************************/
/*             Public API              */
/***************************************/
impl Dispatcher {
    /// Builds a fleet of `config.n_cars` idle cars at floor 0.
    pub fn new(config: &DispatchConfig, notifier: ArrivalNotifier) -> Dispatcher {
        let cars = (0..config.n_cars)
            .map(|id| {
                let (travel_delay, dwell_delay) = config.car_timing(id);
                Car::new(id, 0, travel_delay, dwell_delay, notifier.clone())
            })
            .collect::<Vec<Car>>();
        let statuses = (0..config.n_cars)
            .map(|id| CarStatus::new(id, 0))
            .collect::<Vec<CarStatus>>();

        Dispatcher {
            state: Mutex::new(DispatchState {
                cars,
                statuses,
                requests: RequestStore::new(),
            }),
        }
    }

    pub fn fleet_size(&self) -> usize {
        self.lock().cars.len()
    }

    /// Records a call and hands it to the best placed car, or queues its floor.
    pub fn submit_floor_call(&self, floor: Floor, direction: Direction) -> Vec<FloorCall> {
        let mut state = self.lock();
        state.submit_floor_call(floor, direction);
        state.wake_cars();
        state.requests.calls()
    }

    /// Records a destination and extends the target of the car it was placed in.
    pub fn submit_destination(
        &self,
        floor: Floor,
        car_id: CarId,
    ) -> Result<Vec<DestinationRequest>, DispatchError> {
        let mut state = self.lock();
        state.check_car(car_id)?;
        state.submit_destination(floor, car_id);
        state.wake_cars();
        Ok(state.requests.destinations())
    }

    /// Reconciles outstanding requests with a completed travel or dwell.
    pub fn handle_arrival(&self, arrival: Arrival) -> Result<(), DispatchError> {
        let mut state = self.lock();
        state.check_car(arrival.car_id)?;
        state.handle_arrival(arrival);
        state.wake_cars();
        Ok(())
    }

    pub fn status(&self) -> StatusReport {
        let state = self.lock();
        StatusReport {
            cars: state.car_statuses(),
            queue: state.requests.pending(),
            calls: state.requests.calls(),
            destinations: state.requests.destinations(),
        }
    }

    pub fn car_status(&self, car_id: CarId) -> Result<CarStatus, DispatchError> {
        let state = self.lock();
        state.check_car(car_id)?;
        Ok(state.car_status(car_id))
    }

    pub fn car_statuses(&self) -> Vec<CarStatus> {
        self.lock().car_statuses()
    }

    pub fn outstanding_calls(&self) -> Vec<FloorCall> {
        self.lock().requests.calls()
    }

    pub fn outstanding_destinations(&self) -> Vec<DestinationRequest> {
        self.lock().requests.destinations()
    }

    pub fn pending_floors(&self) -> Vec<Floor> {
        self.lock().requests.pending()
    }

    fn lock(&self) -> MutexGuard<'_, DispatchState> {
        // Every mutation completes before the guard drops, so a poisoned
        // lock still holds consistent state.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/***************************************/
/*           Dispatch logic            */
/***************************************/
impl DispatchState {
    fn check_car(&self, car_id: CarId) -> Result<(), DispatchError> {
        if car_id < self.cars.len() {
            Ok(())
        } else {
            Err(DispatchError::InvalidCarId {
                car_id,
                fleet_size: self.cars.len(),
            })
        }
    }

    fn car_status(&self, car_id: CarId) -> CarStatus {
        let mut status = self.statuses[car_id].clone();
        status.moving = self.cars[car_id].in_motion();
        status
    }

    fn car_statuses(&self) -> Vec<CarStatus> {
        (0..self.cars.len()).map(|id| self.car_status(id)).collect()
    }

    fn submit_floor_call(&mut self, floor: Floor, direction: Direction) {
        let call = FloorCall { floor, direction };
        if !self.requests.add_call(call) {
            debug!("Call {:?} already outstanding", call);
            return;
        }

        match self.select_car(floor) {
            Some(car_id) => {
                info!("Assigning call at {} ({}) to car {}", floor, direction, car_id);
                self.extend_target(car_id, floor, Some(direction));
            }
            None => {
                info!("No car can take call at {} ({}), queueing", floor, direction);
                self.requests.enqueue_pending(floor);
            }
        }
    }

    fn submit_destination(&mut self, floor: Floor, car_id: CarId) {
        let destination = DestinationRequest { floor, car_id };
        if !self.requests.add_destination(destination) {
            debug!("Destination {:?} already outstanding", destination);
        }
        info!("Car {} asked for floor {}", car_id, floor);
        self.extend_target(car_id, floor, None);
    }

    /// Car whose committed path covers `floor` and whose target is closest to it.
    fn select_car(&self, floor: Floor) -> Option<CarId> {
        self.statuses
            .iter()
            .filter(|s| {
                let heading = i64::from(s.to_floor) - i64::from(s.at_floor);
                let offset = i64::from(floor) - i64::from(s.at_floor);
                heading * offset >= 0
            })
            .min_by_key(|s| ((i64::from(s.to_floor) - i64::from(floor)).abs(), s.car_id))
            .map(|s| s.car_id)
    }

    /// Merges `floor` into the car's commitment, SCAN style.
    ///
    /// A call whose direction opposes the current sweep and lies behind the
    /// target is deferred to the pending queue instead.
    fn extend_target(&mut self, car_id: CarId, floor: Floor, direction: Option<Direction>) {
        let status = &mut self.statuses[car_id];
        match status.to_floor.cmp(&status.at_floor) {
            Ordering::Greater => {
                if direction == Some(Direction::Down) && floor < status.to_floor {
                    info!("Car {} sweeping up, deferring {}", car_id, floor);
                    self.requests.enqueue_pending(floor);
                } else {
                    status.to_floor = status.to_floor.max(floor);
                }
            }
            Ordering::Less => {
                if direction == Some(Direction::Up) && floor > status.to_floor {
                    info!("Car {} sweeping down, deferring {}", car_id, floor);
                    self.requests.enqueue_pending(floor);
                } else {
                    status.to_floor = status.to_floor.min(floor);
                }
            }
            Ordering::Equal => status.to_floor = floor,
        }

        if status.at_floor == status.to_floor && !self.cars[car_id].dwell() {
            debug!("Car {} busy, stop at {} waits for its arrival", car_id, floor);
        }
        self.evaluate(car_id, false);
    }

    /// Evaluates every car left without motion while it still has work:
    /// a car whose last start failed, or an idle car while floors are queued.
    fn wake_cars(&mut self) {
        for car_id in 0..self.cars.len() {
            if self.cars[car_id].in_motion() {
                continue;
            }
            let status = &self.statuses[car_id];
            if status.at_floor != status.to_floor || self.requests.has_pending() {
                self.evaluate(car_id, false);
            }
        }
    }

    /// Decides the next motion of an idle car.
    fn evaluate(&mut self, car_id: CarId, pickup: bool) {
        let car = &self.cars[car_id];
        if car.in_motion() {
            debug!("Car {} is moving: {:?}", car_id, self.statuses[car_id]);
            return;
        }
        let status = &self.statuses[car_id];
        let started = if pickup {
            car.dwell()
        } else {
            match status.to_floor.cmp(&status.at_floor) {
                Ordering::Greater => car.travel(Direction::Up),
                Ordering::Less => car.travel(Direction::Down),
                Ordering::Equal => {
                    self.pull_work(car_id);
                    return;
                }
            }
        };
        if !started {
            warn!(
                "Car {} could not start at {} (target {}), retrying on next event",
                car_id, status.at_floor, status.to_floor
            );
        }
    }

    /// Gives an idle car the next piece of work: pending floors first, then
    /// its own nearest destination, then the earliest outstanding call.
    fn pull_work(&mut self, car_id: CarId) {
        let at_floor = self.statuses[car_id].at_floor;

        if let Some(floor) = self.requests.dequeue_pending() {
            info!("Car {} taking queued floor {}", car_id, floor);
            self.extend_target(car_id, floor, None);
        } else if let Some(floor) = self.requests.nearest_destination(car_id, at_floor) {
            info!("Car {} resuming destination {}", car_id, floor);
            self.extend_target(car_id, floor, None);
        } else if let Some(call) = self.requests.earliest_call() {
            info!("Car {} taking outstanding call at {}", car_id, call.floor);
            self.extend_target(car_id, call.floor, None);
        } else {
            debug!("Car {} idle at {}", car_id, at_floor);
        }
    }

    fn handle_arrival(&mut self, arrival: Arrival) {
        let car_id = arrival.car_id;
        self.cars[car_id].release();

        let status = &mut self.statuses[car_id];
        status.at_floor = arrival.floor;
        let (at_floor, to_floor) = (status.at_floor, status.to_floor);
        let direction = if to_floor > at_floor {
            Direction::Up
        } else {
            Direction::Down
        };

        // Non short-circuit: every matching request is cleared.
        let mut pickup = self.requests.remove_call(&FloorCall {
            floor: at_floor,
            direction,
        });
        pickup |= self.requests.remove_destination(&DestinationRequest {
            floor: at_floor,
            car_id,
        });
        if at_floor == to_floor {
            // An up call at the final target is served whatever the approach.
            pickup |= self.requests.remove_call(&FloorCall {
                floor: at_floor,
                direction: Direction::Up,
            });
        }

        debug!(
            "Car {} at {} (target {}), pickup: {}",
            car_id, at_floor, to_floor, pickup
        );
        self.evaluate(car_id, pickup);
    }
}

#[cfg(test)]
impl Dispatcher {
    /// Records a call without assigning it to any car.
    pub(crate) fn seed_call(&self, call: FloorCall) {
        self.lock().requests.add_call(call);
    }

    /// Commits a car to `to_floor` without starting it, as a failed start leaves it.
    pub(crate) fn seed_target(&self, car_id: CarId, to_floor: Floor) {
        self.lock().statuses[car_id].to_floor = to_floor;
    }
}
