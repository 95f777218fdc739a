/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::info;
use std::io;
use std::sync::Arc;
use std::thread::Builder;

/* Custom libraries */
use elevator_dispatch::config::{self, ConfigError};
use elevator_dispatch::dispatcher::{DispatchLoop, Dispatcher};
use elevator_dispatch::{intake, notifier, unwrap_or_exit};

fn cli() -> Command<'static> {
    Command::new("elevator-dispatch")
        .about("Dispatches a fleet of elevator cars from floor calls and destination requests")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .takes_value(true)
                .default_value("config.toml")
                .help("Path to the TOML configuration file"),
        )
        .arg(
            Arg::new("cars")
                .short('n')
                .long("cars")
                .takes_value(true)
                .help("Number of cars, overrides the configuration file"),
        )
}

/* Main */
fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let matches = cli().get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or("config.toml");
    let mut config = unwrap_or_exit!(config::load_config(config_path));
    if let Some(cars) = matches.value_of("cars") {
        config.dispatch.n_cars = unwrap_or_exit!(cars
            .parse::<usize>()
            .map_err(|e| ConfigError::Invalid(format!("--cars '{}': {}", cars, e))));
        unwrap_or_exit!(config.dispatch.validate());
    }

    // Initialize channels
    let (arrival_notifier, arrival_rx) = notifier::arrival_channel();
    let (terminate_tx, terminate_rx) = cbc::unbounded::<()>();

    // Start the dispatch loop
    let dispatcher = Arc::new(Dispatcher::new(&config.dispatch, arrival_notifier));
    let dispatch_loop = DispatchLoop::new(Arc::clone(&dispatcher), arrival_rx, terminate_rx);

    let dispatch_thread = Builder::new()
        .name("dispatch_loop".into())
        .spawn(move || dispatch_loop.run())?;

    // Serve requests from stdin until quit or end of input
    info!(
        "Serving {} cars, reading requests from stdin",
        config.dispatch.n_cars
    );
    let stdin = io::stdin();
    let stdout = io::stdout();
    intake::serve(&dispatcher, stdin.lock(), stdout.lock())?;

    let _ = terminate_tx.send(());
    if dispatch_thread.join().is_err() {
        log::error!("Dispatch loop panicked");
    }
    Ok(())
}
