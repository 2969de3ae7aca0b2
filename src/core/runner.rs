// Background tick loop - drives a PostureMonitor from a PositionSource at
// a fixed interval and services commands from the application.

use std::time::Duration;

use log::{info, warn};
use tokio::sync::mpsc;

use super::alarm::AudioResource;
use super::model::{MonitorStatus, Tolerance};
use super::monitor::PostureMonitor;
use super::source::PositionSource;

/// Control messages from the embedding application.
#[derive(Debug, Clone, Copy)]
pub enum MonitorCommand {
    /// Arm: freeze the reference and start guarding.
    Start,
    /// Disarm: back to calibration, alarm forced off.
    Stop,
    /// Live tolerance update from the settings UI.
    SetTolerance(Tolerance),
    /// Silence the alarm and end the loop.
    Shutdown,
}

pub struct MonitorRunner<S: PositionSource, A: AudioResource> {
    monitor: PostureMonitor<A>,
    source: S,
    interval: Duration,
    commands: mpsc::Receiver<MonitorCommand>,
    status_tx: mpsc::Sender<MonitorStatus>,
}

impl<S: PositionSource, A: AudioResource> MonitorRunner<S, A> {
    pub fn new(
        source: S,
        audio: A,
        tolerance: Tolerance,
        interval: Duration,
        commands: mpsc::Receiver<MonitorCommand>,
        status_tx: mpsc::Sender<MonitorStatus>,
    ) -> Self {
        Self {
            monitor: PostureMonitor::new(audio, tolerance),
            source,
            interval,
            commands,
            status_tx,
        }
    }

    /// Run until a `Shutdown` command arrives. Commands queued before a
    /// frame are applied ahead of processing that frame.
    pub async fn run(mut self) {
        info!("Posture monitor loop started");
        let mut was_alarming = false;

        loop {
            // Drain pending commands before sampling the next frame.
            while let Ok(command) = self.commands.try_recv() {
                if !self.apply(command) {
                    info!("Posture monitor loop terminating");
                    return;
                }
            }

            if let Some(current) = self.source.next_position() {
                if let Err(e) = self.monitor.on_frame(current) {
                    // The loop keeps ticking; the caller decides whether a
                    // silent alarm warrants more than a log line.
                    warn!("Alarm playback failed: {}", e);
                }

                let status = self.monitor.status();
                if status.alarm_active != was_alarming {
                    if status.alarm_active {
                        warn!("Head left the guarded region, alarm on");
                    } else {
                        info!("Head back inside the guarded region, alarm off");
                    }
                    was_alarming = status.alarm_active;
                }

                // Drop the update rather than stall the tick thread if the
                // consumer lags.
                let _ = self.status_tx.try_send(status);
            }

            tokio::time::sleep(self.interval).await;
        }
    }

    fn apply(&mut self, command: MonitorCommand) -> bool {
        match command {
            MonitorCommand::Start => self.monitor.start(),
            MonitorCommand::Stop => self.monitor.stop(),
            MonitorCommand::SetTolerance(tolerance) => self.monitor.set_tolerance(tolerance),
            MonitorCommand::Shutdown => {
                self.monitor.stop();
                return false;
            }
        }
        true
    }
}
