/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{info, warn};
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::Dispatcher;
use crate::notifier::ArrivalReceiver;
use crate::shared::Arrival;

/***************************************/
/*               Enums                 */
/***************************************/
enum Event {
    Arrived(Arrival),
    Disconnected,
    Terminate,
}

/**
 * Single consumer of arrival events.
 *
 * Physical completions from every car funnel through one channel into this
 * loop, which hands them to the dispatcher one at a time.
 *
 * # Fields
 * - `dispatcher`:      Shared dispatch engine, also used by request intake.
 * - `arrival_rx`:      Receives arrivals from all cars.
 * - `terminate_rx`:    Stops the loop.
 */
pub struct DispatchLoop {
    dispatcher: Arc<Dispatcher>,
    arrival_rx: ArrivalReceiver,
    terminate_rx: cbc::Receiver<()>,
}

impl DispatchLoop {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        arrival_rx: ArrivalReceiver,
        terminate_rx: cbc::Receiver<()>,
    ) -> DispatchLoop {
        DispatchLoop {
            dispatcher,
            arrival_rx,
            terminate_rx,
        }
    }

    pub fn run(self) {
        info!("Dispatch loop started for {} cars", self.dispatcher.fleet_size());

        // Main loop
        loop {
            match self.wait_for_event() {
                Event::Arrived(arrival) => {
                    if let Err(e) = self.dispatcher.handle_arrival(arrival) {
                        warn!("Discarding arrival {:?}: {}", arrival, e);
                    }
                }
                Event::Disconnected => {
                    warn!("All cars disconnected, stopping dispatch loop");
                    return;
                }
                Event::Terminate => {
                    info!("Dispatch loop terminated");
                    return;
                }
            }
        }
    }

    fn wait_for_event(&self) -> Event {
        cbc::select! {
            recv(self.arrival_rx) -> arrival => {
                match arrival {
                    Ok(arrival) => Event::Arrived(arrival),
                    Err(_) => Event::Disconnected,
                }
            }
            recv(self.terminate_rx) -> _ => Event::Terminate,
        }
    }
}
