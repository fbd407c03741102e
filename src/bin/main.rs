use std::io::{self, Stdout};

use embassy_executor::Spawner;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use flight_core::{FlightSession, DEFAULT_CONFIG};
use log::{error, info};
use static_cell::StaticCell;
use stick_pilot::link::{self, ChannelInput, EventChannel, SignalTelemetry, TelemetrySignal};
use stick_pilot::{ConsoleReporter, TextCommandSink};

type HostSession = FlightSession<TextCommandSink<Stdout>, ConsoleReporter<Stdout>>;

/// Controller events from the link reader, in arrival order.
static EVENTS: StaticCell<EventChannel> = StaticCell::new();

/// Latest telemetry from the link reader.
/// Signal gives "latest value wins" semantics; stale snapshots are never reported.
static TELEMETRY: StaticCell<TelemetrySignal> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    info!("stick-pilot starting...");

    let events = EVENTS.init(Channel::new());
    let telemetry = TELEMETRY.init(Signal::new());

    let session = match FlightSession::new(
        DEFAULT_CONFIG,
        TextCommandSink::new(io::stdout()),
        ConsoleReporter::new(io::stdout()),
    ) {
        Ok(session) => session,
        Err(e) => {
            error!("Invalid control config: {:?}", e);
            return;
        }
    };

    if let Err(e) = link::spawn_reader(io::stdin(), events, telemetry) {
        error!("Failed to start link reader: {}", e);
        return;
    }

    let input = ChannelInput::new(events);
    if let Err(e) = spawner.spawn(session_task(session, input, SignalTelemetry::new(telemetry))) {
        error!("Failed to spawn session: {:?}", e);
        return;
    }

    info!("stick-pilot initialized, waiting for controller input...");
}

/// Session task - runs input dispatch, control ticks and reports.
#[embassy_executor::task]
async fn session_task(
    mut session: HostSession,
    mut input: ChannelInput<'static>,
    mut telemetry: SignalTelemetry<'static>,
) {
    if let Err(e) = session.run(&mut input, &mut telemetry).await {
        error!("Session stopped: {:?}", e);
    }
}
