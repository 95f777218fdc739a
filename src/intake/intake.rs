/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use serde_json::json;
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatcher::Dispatcher;
use crate::shared::{CarId, Direction, DispatchError, Floor};

/**
 * Line oriented request intake.
 *
 * Each input line is one command, answered with one JSON document:
 * - `call <floor> <up|down>`:  floor call, answers the outstanding calls.
 * - `dest <floor> <car>`:      destination request, answers the outstanding destinations.
 * - `status`:                  status of every car.
 * - `queue`:                   floors waiting for a car.
 * - `all`:                     cars, queue, calls and destinations.
 * - `car <car>`:               status of one car.
 * - `quit`:                    stop reading input.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Call { floor: Floor, direction: Direction },
    Destination { floor: Floor, car_id: CarId },
    Status,
    Queue,
    All,
    Car(CarId),
    Quit,
}

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("invalid {name} '{value}'")]
    InvalidArgument { name: &'static str, value: String },
    #[error("unexpected argument '{0}'")]
    TrailingArgument(String),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

fn argument<'a, T: FromStr>(
    args: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<T, IntakeError> {
    let value = args.next().ok_or(IntakeError::MissingArgument(name))?;
    value.parse().map_err(|_| IntakeError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

impl FromStr for Command {
    type Err = IntakeError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut args = line.split_whitespace();
        let keyword = args
            .next()
            .ok_or(IntakeError::MissingArgument("command"))?
            .to_ascii_lowercase();

        let command = match keyword.as_str() {
            "call" => Command::Call {
                floor: argument(&mut args, "floor")?,
                direction: argument(&mut args, "direction")?,
            },
            "dest" => Command::Destination {
                floor: argument(&mut args, "floor")?,
                car_id: argument(&mut args, "car")?,
            },
            "status" => Command::Status,
            "queue" => Command::Queue,
            "all" => Command::All,
            "car" => Command::Car(argument(&mut args, "car")?),
            "quit" | "exit" => Command::Quit,
            _ => return Err(IntakeError::UnknownCommand(keyword)),
        };

        match args.next() {
            Some(extra) => Err(IntakeError::TrailingArgument(extra.to_string())),
            None => Ok(command),
        }
    }
}

/***************************************/
/*             Public API              */
/***************************************/
impl Command {
    /// Runs the command against the dispatcher and encodes the answer.
    pub fn execute(&self, dispatcher: &Dispatcher) -> Result<String, IntakeError> {
        let response = match *self {
            Command::Call { floor, direction } => {
                info!("Request from outside: {} {}", floor, direction);
                serde_json::to_string_pretty(&dispatcher.submit_floor_call(floor, direction))?
            }
            Command::Destination { floor, car_id } => {
                info!("Request from inside car {}: {}", car_id, floor);
                serde_json::to_string_pretty(&dispatcher.submit_destination(floor, car_id)?)?
            }
            Command::Status => serde_json::to_string_pretty(&dispatcher.car_statuses())?,
            Command::Queue => serde_json::to_string_pretty(&dispatcher.pending_floors())?,
            Command::All => serde_json::to_string_pretty(&dispatcher.status())?,
            Command::Car(car_id) => serde_json::to_string_pretty(&dispatcher.car_status(car_id)?)?,
            Command::Quit => serde_json::to_string_pretty(&json!({ "bye": true }))?,
        };
        Ok(response)
    }
}

/// Reads commands from `input` until `quit` or end of input.
///
/// A bad line is answered with an `{"error": ...}` document and never ends
/// the session; only I/O failures do.
pub fn serve<R: BufRead, W: Write>(
    dispatcher: &Dispatcher,
    input: R,
    mut output: W,
) -> std::io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let result = line
            .parse::<Command>()
            .and_then(|command| command.execute(dispatcher).map(|r| (command, r)));

        match result {
            Ok((command, response)) => {
                writeln!(output, "{}", response)?;
                output.flush()?;
                if command == Command::Quit {
                    debug!("Intake stopped by quit");
                    return Ok(());
                }
            }
            Err(e) => {
                warn!("Rejected '{}': {}", line, e);
                writeln!(output, "{}", json!({ "error": e.to_string() }))?;
                output.flush()?;
            }
        }
    }
    debug!("Intake reached end of input");
    Ok(())
}
