pub mod notifier;

pub use notifier::arrival_channel;
pub use notifier::ArrivalNotifier;
pub use notifier::ArrivalReceiver;
