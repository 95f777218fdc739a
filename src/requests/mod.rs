pub mod store;
pub mod store_tests;

pub use store::RequestStore;
