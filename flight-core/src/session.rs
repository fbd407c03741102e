//! FlightSession: connects controller input to the command sink on a schedule.

use embassy_futures::select::{select3, Either3};
use embassy_time::{Instant, Timer};

use crate::axis::AxisStore;
use crate::config::{ConfigError, ControlConfig};
use crate::input::{InputError, InputSource};
use crate::mapper::map_event;
use crate::output::{CommandSink, SinkError};
use crate::scheduler::{ScheduledTask, Scheduler, SchedulerError, TaskAction, TaskKind};
use crate::telemetry::{FlightSnapshot, LatestSnapshot, TelemetryReport, TelemetrySink, TelemetrySource};
use crate::translator::{translate_left, translate_right};
use crate::types::{FlightCommand, InputEvent, Stick};

/// A control session between one controller and one vehicle.
///
/// The session owns the axis state, the latest telemetry snapshot and the
/// task schedule. Controller events update the axes or dispatch one-shot
/// commands immediately; stick translation, telemetry reports and the
/// safety landing run from the schedule.
///
/// # Error Handling
///
/// Nothing the sink or the link reports stops the session. Failed sends are
/// logged and not retried, since the next control tick re-issues motion
/// commands anyway. Malformed input events are dropped. A disconnected
/// controller returns every axis to neutral so that stale stick positions
/// do not keep driving the vehicle.
pub struct FlightSession<S, R> {
    config: ControlConfig,
    axes: AxisStore,
    snapshot: LatestSnapshot,
    scheduler: Scheduler,
    sink: S,
    reporter: R,
}

impl<S: CommandSink, R: TelemetrySink> FlightSession<S, R> {
    /// Create a session that sends commands to `sink` and reports to `reporter`.
    pub fn new(config: ControlConfig, sink: S, reporter: R) -> Result<Self, ConfigError> {
        config.sanity_check()?;
        Ok(Self {
            config,
            axes: AxisStore::new(),
            snapshot: LatestSnapshot::new(),
            scheduler: Scheduler::new(),
            sink,
            reporter,
        })
    }

    /// Zero the axes and start the session's tasks, timed from `now`.
    ///
    /// Registers, in order: the safety landing, the telemetry report and the
    /// right and left stick control ticks. Activating again restarts every
    /// task from `now` instead of adding a second set.
    pub fn activate(&mut self, now: Instant) -> Result<(), SchedulerError> {
        self.axes.reset();
        self.scheduler.clear();

        let tasks = [
            ScheduledTask {
                name: "safety_land",
                kind: TaskKind::OneShot(self.config.safety_land_after),
                action: TaskAction::SafetyLand,
            },
            ScheduledTask {
                name: "telemetry_report",
                kind: TaskKind::Repeating(self.config.report_period),
                action: TaskAction::ReportTelemetry,
            },
            ScheduledTask {
                name: "right_stick",
                kind: TaskKind::Repeating(self.config.control_period),
                action: TaskAction::RightStick,
            },
            ScheduledTask {
                name: "left_stick",
                kind: TaskKind::Repeating(self.config.control_period),
                action: TaskAction::LeftStick,
            },
        ];
        for task in tasks {
            self.scheduler.register(task, now)?;
        }

        if !self.sink.is_ready() {
            warn!("Command sink not ready at activation");
        }
        info!("Session active, landing in {} ms", self.config.safety_land_after.as_millis());
        Ok(())
    }

    /// Run the session, dispatching input, telemetry and timers indefinitely.
    ///
    /// This method never returns under normal operation. It returns the
    /// scheduler error if the session's tasks cannot be registered.
    pub async fn run<I, T>(&mut self, input: &mut I, telemetry: &mut T) -> Result<(), SchedulerError>
    where
        I: InputSource,
        T: TelemetrySource,
    {
        self.activate(Instant::now())?;

        loop {
            let deadline = self.scheduler.next_deadline().unwrap_or(Instant::MAX);

            // Timers first so a burst of input cannot starve the control ticks.
            match select3(Timer::at(deadline), input.receive(), telemetry.receive()).await {
                Either3::First(()) => {
                    self.run_due(Instant::now()).await;
                }
                Either3::Second(Ok(event)) => {
                    let _ = self.handle_input(event).await;
                }
                Either3::Second(Err(e)) => self.handle_input_error(e),
                Either3::Third(snapshot) => self.handle_telemetry(snapshot),
            }
        }
    }

    /// Apply one controller event, dispatching the command it triggers.
    ///
    /// Returns the result of the dispatch for testing purposes.
    pub async fn handle_input(&mut self, event: InputEvent) -> Result<(), SinkError> {
        match map_event(&self.axes, event) {
            Some(command) => self.dispatch(command).await,
            None => Ok(()),
        }
    }

    /// React to an input source error.
    pub fn handle_input_error(&mut self, error: InputError) {
        match error {
            InputError::Disconnected => {
                warn!("Controller disconnected, centering sticks");
                self.axes.reset();
            }
            e => warn!("Dropped malformed input: {:?}", e),
        }
    }

    /// Keep `snapshot` as the latest telemetry.
    pub fn handle_telemetry(&mut self, snapshot: FlightSnapshot) {
        trace!("Telemetry: {:?}", snapshot);
        self.snapshot.store(snapshot);
    }

    /// Run every task due at `now`. Returns the number of actions run.
    pub async fn run_due(&mut self, now: Instant) -> usize {
        let due = self.scheduler.poll(now);
        for &action in &due {
            self.run_action(action).await;
        }
        due.len()
    }

    /// Earliest instant at which a task is due.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    async fn run_action(&mut self, action: TaskAction) {
        match action {
            TaskAction::SafetyLand => {
                info!("Safety timer expired, landing");
                let _ = self.dispatch(FlightCommand::Land).await;
            }
            TaskAction::ReportTelemetry => self.report().await,
            TaskAction::RightStick => {
                let commands = translate_right(self.axes.stick(Stick::Right), &self.config);
                self.dispatch_all(commands).await;
            }
            TaskAction::LeftStick => {
                let commands = translate_left(self.axes.stick(Stick::Left), &self.config);
                self.dispatch_all(commands).await;
            }
        }
    }

    async fn report(&mut self) {
        let Some(snapshot) = self.snapshot.latest() else {
            debug!("No telemetry received yet");
            return;
        };
        if let Err(e) = self.reporter.publish(&TelemetryReport(snapshot)).await {
            warn!("Telemetry report failed: {:?}", e);
        }
    }

    async fn dispatch_all(&mut self, commands: [FlightCommand; 2]) {
        for command in commands {
            let _ = self.dispatch(command).await;
        }
    }

    async fn dispatch(&mut self, command: FlightCommand) -> Result<(), SinkError> {
        trace!("Dispatching {:?}", command);
        let result = self.sink.send(&command).await;
        if let Err(e) = result {
            warn!("Command {:?} failed: {:?}", command, e);
        }
        result
    }

    /// Get a reference to the axis store.
    pub fn axes(&self) -> &AxisStore {
        &self.axes
    }

    /// Latest telemetry snapshot, if any.
    pub fn latest_snapshot(&self) -> Option<FlightSnapshot> {
        self.snapshot.latest()
    }

    /// Get a reference to the command sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the command sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Get a reference to the telemetry sink.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }
}
