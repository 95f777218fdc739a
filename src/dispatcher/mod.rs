pub mod dispatch_loop;
pub mod dispatcher;

pub use dispatch_loop::DispatchLoop;
pub use dispatcher::Dispatcher;
