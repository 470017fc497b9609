//! Dispatch controller for running one loop per worker account
//!
//! Spawns every loop as its own task, staggering the launches.
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::dispatch::DispatchLoop;

pub struct DispatchController {
    launch_stagger: Duration,
    shutdown_token: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl DispatchController {
    pub fn new(launch_stagger: Duration, shutdown_token: CancellationToken) -> Self {
        Self { launch_stagger, shutdown_token, handles: Vec::new() }
    }

    /// Spawns the loops in order, sleeping `launch_stagger` between two launches.
    pub async fn launch(&mut self, loops: Vec<DispatchLoop>) {
        let total = loops.len();
        info!(workers = total, stagger = ?self.launch_stagger, "Launching dispatch loops");

        for (position, dispatch) in loops.into_iter().enumerate() {
            let worker = dispatch.account().index;
            let shutdown = self.shutdown_token.clone();
            self.handles.push(tokio::spawn(dispatch.run(shutdown)));
            info!(worker, "Dispatch loop launched");

            if position + 1 < total && !self.launch_stagger.is_zero() {
                tokio::select! {
                    _ = self.shutdown_token.cancelled() => break,
                    _ = tokio::time::sleep(self.launch_stagger) => {}
                }
            }
        }

        info!(workers = self.handles.len(), "All dispatch loops running");
    }

    pub fn running(&self) -> usize {
        self.handles.iter().filter(|handle| !handle.is_finished()).count()
    }

    /// Waits for every loop to return
    pub async fn wait_for_completion(&mut self) {
        for handle in self.handles.drain(..) {
            if let Err(e) = handle.await {
                error!(error = %e, "Dispatch task panicked");
            }
        }
    }

    /// Cancels every loop and waits for them to stop
    pub async fn shutdown(&mut self) {
        info!(workers = self.handles.len(), "Stopping dispatch loops");
        self.shutdown_token.cancel();
        self.wait_for_completion().await;
        info!("Dispatch loops stopped");
    }
}
