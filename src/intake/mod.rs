pub mod intake;

pub use intake::serve;
pub use intake::Command;
pub use intake::IntakeError;
