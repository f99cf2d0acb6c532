use crate::use_cases::{HostEvent, WorldSnapshot};
use tokio::sync::{mpsc, watch};

#[derive(Clone)]
pub struct AppState {
    // Host events flowing from the network into the world task.
    pub input_tx: mpsc::Sender<HostEvent>,
    // Latest world snapshot, republished every host tick.
    pub snapshot_rx: watch::Receiver<WorldSnapshot>,
}
