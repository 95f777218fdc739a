/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::warn;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::Arrival;

pub type ArrivalReceiver = cbc::Receiver<Arrival>;

/**
 * Carries "car X reached floor Y" events from the cars back to the dispatch loop.
 *
 * Every car holds a clone. Sending never blocks, so a car's timer thread can
 * report completion without waiting on dispatch decisions.
 *
 * # Fields
 * - `arrival_tx`:  Sender half of the unbounded arrival channel.
 */
#[derive(Clone)]
pub struct ArrivalNotifier {
    arrival_tx: cbc::Sender<Arrival>,
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn arrival_channel() -> (ArrivalNotifier, ArrivalReceiver) {
    let (arrival_tx, arrival_rx) = cbc::unbounded::<Arrival>();
    (ArrivalNotifier { arrival_tx }, arrival_rx)
}

impl ArrivalNotifier {
    /// Returns false when the dispatch loop is gone and the event was dropped.
    pub fn notify(&self, arrival: Arrival) -> bool {
        match self.arrival_tx.send(arrival) {
            Ok(()) => true,
            Err(e) => {
                warn!("Dropping arrival of car {} at floor {}: {}", arrival.car_id, arrival.floor, e);
                false
            }
        }
    }
}
