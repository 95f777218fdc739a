pub mod error;
pub mod macros;
pub mod structs;

pub use error::DispatchError;
pub use structs::Arrival;
pub use structs::CarId;
pub use structs::CarStatus;
pub use structs::DestinationRequest;
pub use structs::Direction;
pub use structs::Floor;
pub use structs::FloorCall;
pub use structs::StatusReport;
