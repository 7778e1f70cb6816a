//! Frame scheduler for the wheel widget.
//!
//! One task owns the widget; everything reaches it through a command
//! channel, so the wheel is never touched from two places. The task ticks
//! the animation on a fixed frame interval while a spin is in flight and,
//! once the wheel settles, announces the prize after a short delay.

use std::collections::VecDeque;
use std::time::Duration;

use anyhow::{Result, anyhow};
use fortuna_core::config::format_announcement;
use fortuna_core::{Canvas, Prize, Tick, WheelConfig};
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::widget::WheelWidget;

/// Commands sent to the wheel task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelCommand {
    Open,
    Close,
    Spin,
    Stop,
}

/// Events from the wheel task.
#[derive(Debug, Clone, PartialEq)]
pub enum WheelEvent {
    Opened,
    Closed,
    SpinStarted { target: f64 },
    /// Spin pressed while closed or already spinning.
    SpinIgnored,
    Frame { angle: f64, progress: f64 },
    Settled { angle: f64, prize: Prize },
    PrizeAnnounced { prize: Prize, message: String },
}

/// Timing and wording for the scheduler.
#[derive(Debug, Clone)]
pub struct DriverSettings {
    pub frame_interval: Duration,
    pub announce_delay: Duration,
    pub announcement: String,
}

impl From<&WheelConfig> for DriverSettings {
    fn from(config: &WheelConfig) -> Self {
        Self {
            frame_interval: Duration::from_millis(config.frame_interval_ms.max(1)),
            announce_delay: Duration::from_millis(config.announce_delay_ms),
            announcement: config.announcement.clone(),
        }
    }
}

/// Handle to a running wheel task.
pub struct WheelDriver<C: Canvas> {
    cmd_tx: mpsc::Sender<WheelCommand>,
    task: JoinHandle<WheelWidget<C>>,
}

impl<C: Canvas> std::fmt::Debug for WheelDriver<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelDriver").finish()
    }
}

impl<C> WheelDriver<C>
where
    C: Canvas + Send + 'static,
{
    /// Spawn the wheel task. Must be called inside a tokio runtime.
    pub fn start<R>(
        widget: WheelWidget<C>,
        rng: R,
        settings: DriverSettings,
    ) -> (Self, mpsc::Receiver<WheelEvent>)
    where
        R: Rng + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::channel(1024);
        let (cmd_tx, cmd_rx) = mpsc::channel(32);

        let task = tokio::spawn(run(widget, rng, settings, cmd_rx, event_tx));

        (Self { cmd_tx, task }, event_rx)
    }

    pub async fn send(&self, cmd: WheelCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|_| anyhow!("wheel driver stopped"))
    }

    pub async fn open(&self) -> Result<()> {
        self.send(WheelCommand::Open).await
    }

    pub async fn close(&self) -> Result<()> {
        self.send(WheelCommand::Close).await
    }

    pub async fn spin(&self) -> Result<()> {
        self.send(WheelCommand::Spin).await
    }

    /// Stop the task and take the widget back.
    pub async fn shutdown(self) -> Result<WheelWidget<C>> {
        // The task may already be gone if every sender was dropped.
        let _ = self.cmd_tx.send(WheelCommand::Stop).await;
        self.task
            .await
            .map_err(|e| anyhow!("wheel task failed: {}", e))
    }
}

async fn run<C, R>(
    mut widget: WheelWidget<C>,
    mut rng: R,
    settings: DriverSettings,
    mut cmd_rx: mpsc::Receiver<WheelCommand>,
    event_tx: mpsc::Sender<WheelEvent>,
) -> WheelWidget<C>
where
    C: Canvas,
    R: Rng,
{
    tracing::info!(interval_ms = settings.frame_interval.as_millis() as u64, "wheel task started");

    let epoch = Instant::now();
    let mut frames = tokio::time::interval(settings.frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Announcements waiting for their delay, oldest deadline first.
    let mut pending: VecDeque<(Instant, Prize)> = VecDeque::new();

    loop {
        let deadline = pending.front().map(|(at, _)| *at).unwrap_or_else(Instant::now);

        tokio::select! {
            cmd = cmd_rx.recv() => {
                let event = match cmd {
                    Some(WheelCommand::Open) => {
                        widget.open();
                        WheelEvent::Opened
                    }
                    Some(WheelCommand::Close) => {
                        widget.close();
                        WheelEvent::Closed
                    }
                    Some(WheelCommand::Spin) => match widget.spin(&mut rng) {
                        Some(target) => {
                            frames.reset_immediately();
                            WheelEvent::SpinStarted { target }
                        }
                        None => WheelEvent::SpinIgnored,
                    },
                    Some(WheelCommand::Stop) | None => break,
                };
                let _ = event_tx.send(event).await;
            }

            _ = frames.tick(), if widget.is_spinning() => {
                let now = epoch.elapsed().as_secs_f64() * 1000.0;
                match widget.advance(now) {
                    Tick::Frame { angle, progress } => {
                        let _ = event_tx.send(WheelEvent::Frame { angle, progress }).await;
                    }
                    Tick::Settled { angle, prize } => {
                        let at = Instant::now() + settings.announce_delay;
                        pending.push_back((at, prize.clone()));
                        let _ = event_tx.send(WheelEvent::Settled { angle, prize }).await;
                    }
                    Tick::Idle => {}
                }
            }

            _ = tokio::time::sleep_until(deadline), if !pending.is_empty() => {
                if let Some((_, prize)) = pending.pop_front() {
                    let message = format_announcement(&settings.announcement, &prize);
                    tracing::info!(%message, "prize announced");
                    let _ = event_tx.send(WheelEvent::PrizeAnnounced { prize, message }).await;
                }
            }
        }
    }

    tracing::info!("wheel task stopped");
    widget
}
