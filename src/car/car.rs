use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;
use std::thread::{sleep, Builder};
use std::time::Duration;

use log::{debug, info, warn};

use crate::notifier::ArrivalNotifier;
use crate::shared::{Arrival, CarId, Direction, Floor};

/// The two timed physical actions a car performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Travel(Direction),
    Dwell,
}

/**
 * One elevator car and its physical state.
 *
 * A car performs at most one timed action at a time. Starting an action
 * sets the motion flag with a compare-and-set; the flag stays set until the
 * dispatcher has reconciled the resulting arrival and calls `release`, so a
 * car is never commanded twice from the same floor.
 *
 * # Fields
 * - `id`:              Car number within the fleet.
 * - `travel_delay`:    Time to travel one floor.
 * - `dwell_delay`:     Time spent at a stop for boarding/alighting.
 * - `floor`:           Physical floor, written by the timer thread on completion.
 * - `in_motion`:       Motion flag, true while a travel or dwell is outstanding.
 * - `notifier`:        Channel on which completions are reported.
 */
pub struct Car {
    id: CarId,
    travel_delay: Duration,
    dwell_delay: Duration,
    floor: Arc<AtomicI32>,
    in_motion: Arc<AtomicBool>,
    notifier: ArrivalNotifier,
}

impl Car {
    pub fn new(
        id: CarId,
        floor: Floor,
        travel_delay: Duration,
        dwell_delay: Duration,
        notifier: ArrivalNotifier,
    ) -> Car {
        Car {
            id,
            travel_delay,
            dwell_delay,
            floor: Arc::new(AtomicI32::new(floor)),
            in_motion: Arc::new(AtomicBool::new(false)),
            notifier,
        }
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn floor(&self) -> Floor {
        self.floor.load(Ordering::Acquire)
    }

    pub fn in_motion(&self) -> bool {
        self.in_motion.load(Ordering::Acquire)
    }

    /// Stay at the current floor for the dwell delay. Returns false if the car is busy.
    pub fn dwell(&self) -> bool {
        self.start(Motion::Dwell)
    }

    /// Move one floor in `direction`. Returns false if the car is busy.
    pub fn travel(&self, direction: Direction) -> bool {
        self.start(Motion::Travel(direction))
    }

    /// Clears the motion flag once the arrival of the last action has been handled.
    pub fn release(&self) {
        self.in_motion.store(false, Ordering::Release);
    }

    fn start(&self, motion: Motion) -> bool {
        if self
            .in_motion
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Car {} is busy, ignoring {:?}", self.id, motion);
            return false;
        }

        let delay = match motion {
            Motion::Travel(_) => self.travel_delay,
            Motion::Dwell => self.dwell_delay,
        };
        let id = self.id;
        let floor = Arc::clone(&self.floor);
        let in_motion = Arc::clone(&self.in_motion);
        let notifier = self.notifier.clone();

        match motion {
            Motion::Travel(direction) => info!("Car {} moving {}", id, direction),
            Motion::Dwell => info!("Car {} picking up at {}", id, self.floor()),
        }

        let spawned = Builder::new()
            .name(format!("car_{}_motion", id))
            .spawn(move || {
                sleep(delay);
                let at_floor = match motion {
                    Motion::Travel(direction) => {
                        floor.fetch_add(direction.step(), Ordering::AcqRel) + direction.step()
                    }
                    Motion::Dwell => floor.load(Ordering::Acquire),
                };
                info!("Car {} reached {} after {:?}", id, at_floor, motion);
                if !notifier.notify(Arrival { car_id: id, floor: at_floor }) {
                    in_motion.store(false, Ordering::Release);
                }
            });

        if let Err(e) = spawned {
            warn!("Failed to start {:?} for car {}: {}", motion, id, e);
            self.release();
            return false;
        }
        true
    }
}
