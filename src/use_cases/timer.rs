// Deferred automatic detonation.
//
// The timer never touches sessions or the world itself: when a fuse elapses it
// posts a `DetonateCommand` back to the host loop, which re-validates it.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::debug;

use super::types::DetonateCommand;

/// Schedules one command per fuse on the current tokio runtime.
#[derive(Debug, Clone)]
pub struct DetonationTimer {
    command_tx: mpsc::Sender<DetonateCommand>,
}

/// Owned handle to a pending fuse. Dropping it cancels the fuse.
#[derive(Debug)]
pub struct TimerHandle {
    deadline: Instant,
    task: AbortHandle,
}

impl DetonationTimer {
    pub fn new(command_tx: mpsc::Sender<DetonateCommand>) -> Self {
        Self { command_tx }
    }

    /// Posts `command` once after `delay` without blocking the caller.
    pub fn schedule(&self, delay: Duration, command: DetonateCommand) -> TimerHandle {
        let command_tx = self.command_tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if command_tx.send(command).await.is_err() {
                debug!(rider = %command.rider, "host loop gone; dropping fuse");
            }
        });

        TimerHandle {
            deadline: Instant::now() + delay,
            task: task.abort_handle(),
        }
    }

    /// Best-effort. A command already posted is not recalled.
    pub fn cancel(&self, handle: TimerHandle) {
        handle.cancel();
    }
}

impl TimerHandle {
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// True until the fuse fires or is cancelled.
    pub fn is_pending(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
