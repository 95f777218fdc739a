/* Modules */
pub mod car;
pub mod config;
pub mod dispatcher;
pub mod intake;
pub mod notifier;
pub mod requests;
pub mod shared;
