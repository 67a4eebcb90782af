use crate::session::SessionHandle;
use crate::types::SessionStatus;
use sim_core::Game;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

/// Drive a session at its configured rate until shutdown.
///
/// Paused and finished sessions stay resident: the loop keeps its cadence
/// but skips stepping until a resume or restart puts them back to running.
pub async fn run_tick_loop<G>(handle: SessionHandle<G>)
where
    G: Game + Send + 'static,
{
    let tick_hz = handle.tick_hz();
    let mut ticker = interval(Duration::from_secs_f64(1.0 / tick_hz as f64));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(tick_hz, "tick loop started");
    let mut last_status = SessionStatus::Running;

    while !handle.should_shutdown() {
        ticker.tick().await;

        let status = handle.status().await;
        if status != last_status {
            tracing::debug!(from = ?last_status, to = ?status, "session status changed");
            last_status = status;
        }

        match status {
            SessionStatus::Shutdown => break,
            SessionStatus::Paused | SessionStatus::Finished(_) => continue,
            SessionStatus::Running => {
                if handle.step_one_tick().await {
                    break;
                }
            }
        }
    }

    let tick = handle.current_tick().await;
    tracing::info!(tick, "tick loop stopped");
}

/// Spawn [`run_tick_loop`] as a tokio task.
pub fn spawn_tick_loop<G>(handle: SessionHandle<G>) -> tokio::task::JoinHandle<()>
where
    G: Game + Send + 'static,
{
    tokio::spawn(run_tick_loop(handle))
}
