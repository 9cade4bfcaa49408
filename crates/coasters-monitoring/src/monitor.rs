//! Subscriber loop feeding the dashboard and the problem log.

use std::io::{self, Write};
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;

use coasters_analysis::domain::reports::{ProblemAlert, StatusSnapshot};
use coasters_core::bus::{BusMessage, MessageBus, MessageStream};
use coasters_core::channels;
use coasters_core::clock::Clock;
use coasters_core::error::DomainError;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::dashboard::Dashboard;
use crate::problem_log::ProblemLog;

/// Default dashboard refresh period.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Default pause before re-subscribing after the subscription is lost.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

const TOPICS: [&str; 2] = [
    channels::OPERATIONAL_STATUS_UPDATES,
    channels::CAPACITY_PROBLEMS,
];

/// What a handled message produced for the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorOutput {
    /// The re-rendered dashboard.
    Dashboard(String),
    /// A logged problem line.
    Problem(String),
    /// A message on a topic the monitor does not track.
    Ignored,
}

/// Tracks live coaster status from the bus.
pub struct Monitor {
    bus: Arc<dyn MessageBus>,
    clock: Arc<dyn Clock>,
    dashboard: Dashboard,
    problem_log: ProblemLog,
    output: Box<dyn Write + Send>,
    refresh_interval: Duration,
    retry_delay: Duration,
}

impl std::fmt::Debug for Monitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monitor")
            .field("dashboard", &self.dashboard)
            .field("problem_log", &self.problem_log)
            .field("refresh_interval", &self.refresh_interval)
            .finish_non_exhaustive()
    }
}

impl Monitor {
    /// Creates a monitor that writes to stdout.
    #[must_use]
    pub fn new(bus: Arc<dyn MessageBus>, clock: Arc<dyn Clock>, problem_log: ProblemLog) -> Self {
        Self {
            bus,
            clock,
            dashboard: Dashboard::new(),
            problem_log,
            output: Box::new(io::stdout()),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Sends rendered dashboards and problem lines to `output`.
    #[must_use]
    pub fn with_output(mut self, output: Box<dyn Write + Send>) -> Self {
        self.output = output;
        self
    }

    #[must_use]
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[must_use]
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Renders the dashboard at the current time.
    #[must_use]
    pub fn render(&self) -> String {
        self.dashboard.render(self.clock.now())
    }

    /// Applies one bus message.
    ///
    /// Status snapshots update the dashboard. Problem alerts are appended to
    /// the log; a failed append is logged and the line is still returned.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the payload does not decode.
    pub async fn handle_message(
        &mut self,
        message: &BusMessage,
    ) -> Result<MonitorOutput, DomainError> {
        match message.topic.as_str() {
            channels::OPERATIONAL_STATUS_UPDATES => {
                let snapshot: StatusSnapshot = decode(message)?;
                self.dashboard.update(snapshot);
                Ok(MonitorOutput::Dashboard(self.render()))
            }
            channels::CAPACITY_PROBLEMS => {
                let alert: ProblemAlert = decode(message)?;
                match self.problem_log.append(&alert).await {
                    Ok(line) => Ok(MonitorOutput::Problem(line)),
                    Err(e) => {
                        error!(error = %e, "failed to write notifications log");
                        Ok(MonitorOutput::Problem(ProblemLog::format_line(&alert)))
                    }
                }
            }
            _ => Ok(MonitorOutput::Ignored),
        }
    }

    /// Runs until `shutdown` fires or its sender is dropped.
    ///
    /// The dashboard is written on every status message and on every
    /// refresh tick, including while the bus is unreachable.
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(topics = ?TOPICS, "monitor started");
        loop {
            match self.subscribe(&mut ticker, &mut shutdown).await {
                None => break,
                Some(Ok(mut stream)) => {
                    info!(topics = ?TOPICS, "subscribed");
                    if self.drain(&mut stream, &mut ticker, &mut shutdown).await {
                        break;
                    }
                    warn!(retry_in = ?self.retry_delay, "subscription ended; reconnecting");
                }
                Some(Err(e)) => {
                    error!(error = %e, retry_in = ?self.retry_delay, "failed to subscribe");
                }
            }

            if self.pause(&mut ticker, &mut shutdown).await {
                break;
            }
        }
        info!("monitor stopped");
    }

    /// Subscribes while keeping the refresh going. `None` means shutdown.
    async fn subscribe(
        &mut self,
        ticker: &mut Interval,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Option<Result<MessageStream, DomainError>> {
        let bus = Arc::clone(&self.bus);
        let mut subscribing = pin!(bus.subscribe(&TOPICS));
        loop {
            tokio::select! {
                _ = shutdown.recv() => return None,
                _ = ticker.tick() => self.refresh(),
                subscribed = &mut subscribing => return Some(subscribed),
            }
        }
    }

    /// Waits out the retry delay while refreshing. Returns `true` on shutdown.
    async fn pause(&mut self, ticker: &mut Interval, shutdown: &mut broadcast::Receiver<()>) -> bool {
        let mut delay = pin!(tokio::time::sleep(self.retry_delay));
        loop {
            tokio::select! {
                _ = shutdown.recv() => return true,
                _ = ticker.tick() => self.refresh(),
                () = &mut delay => return false,
            }
        }
    }

    async fn drain(
        &mut self,
        stream: &mut MessageStream,
        ticker: &mut Interval,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> bool {
        loop {
            tokio::select! {
                _ = shutdown.recv() => return true,
                _ = ticker.tick() => self.refresh(),
                next = stream.next() => match next {
                    Some(Ok(message)) => match self.handle_message(&message).await {
                        Ok(MonitorOutput::Dashboard(text)) => self.emit(&format!("{CLEAR_SCREEN}{text}")),
                        Ok(MonitorOutput::Problem(line)) => self.emit(&line),
                        Ok(MonitorOutput::Ignored) => {}
                        Err(e) => warn!(topic = %message.topic, error = %e, "malformed message ignored"),
                    },
                    Some(Err(e)) => warn!(error = %e, "undecodable message skipped"),
                    None => return false,
                },
            }
        }
    }

    fn refresh(&mut self) {
        let text = self.render();
        self.emit(&format!("{CLEAR_SCREEN}{text}"));
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}").and_then(|()| self.output.flush()) {
            warn!(error = %e, "failed to write monitor output");
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(message: &BusMessage) -> Result<T, DomainError> {
    serde_json::from_value(message.payload.clone())
        .map_err(|e| DomainError::Validation(format!("{}: {e}", message.topic)))
}
