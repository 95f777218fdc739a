/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub type Floor = i32;
pub type CarId = usize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Floor offset of one step in this direction.
    pub fn step(&self) -> Floor {
        match *self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("invalid direction '{}'", other)),
        }
    }
}

/// A waiting passenger's summon at a floor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloorCall {
    #[serde(rename = "atFloor")]
    pub floor: Floor,
    pub direction: Direction,
}

/// A passenger inside `car_id` asking for `floor`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DestinationRequest {
    #[serde(rename = "toFloor")]
    pub floor: Floor,
    #[serde(rename = "carId")]
    pub car_id: CarId,
}

/**
 * Last known position and committed next stop of a car.
 *
 * `at_floor == to_floor` means the car is idle or has just arrived and
 * has not been given new work yet.
 */
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CarStatus {
    #[serde(rename = "carId")]
    pub car_id: CarId,
    #[serde(rename = "atFloor")]
    pub at_floor: Floor,
    #[serde(rename = "toFloor")]
    pub to_floor: Floor,
    pub moving: bool,
}

impl CarStatus {
    pub fn new(car_id: CarId, floor: Floor) -> CarStatus {
        CarStatus {
            car_id,
            at_floor: floor,
            to_floor: floor,
            moving: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.at_floor == self.to_floor && !self.moving
    }
}

/// "Car X reached floor Y", emitted once per completed travel or dwell.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    #[serde(rename = "carId")]
    pub car_id: CarId,
    #[serde(rename = "atFloor")]
    pub floor: Floor,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StatusReport {
    #[serde(rename = "status")]
    pub cars: Vec<CarStatus>,
    pub queue: Vec<Floor>,
    #[serde(rename = "outside")]
    pub calls: Vec<FloorCall>,
    #[serde(rename = "inside")]
    pub destinations: Vec<DestinationRequest>,
}
