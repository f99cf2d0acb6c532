use super::lifecycle::ExplosiveLifecycleManager;
use super::types::{DetonateCommand, HostEvent, TriggerEvent, WorldSnapshot};
use crate::domain::{LifecycleError, RiderId, SandboxWorld};
use std::sync::Arc;
use tokio::sync::{Notify, mpsc, watch};
use tracing::{debug, error, info, warn};

/// Authoritative host loop. Owns the world and every session; all arming,
/// detonation and cleanup happen here, including fuses posted back by the timer.
pub async fn world_task(
    mut input_rx: mpsc::Receiver<HostEvent>,
    mut command_rx: mpsc::Receiver<DetonateCommand>,
    mut manager: ExplosiveLifecycleManager<SandboxWorld>,
    snapshot_tx: watch::Sender<WorldSnapshot>,
    shutdown: Arc<Notify>,
) {
    let mut tick: u64 = 0;

    // Drive the fixed-step host simulation at the configured tick rate.
    let mut interval = tokio::time::interval(manager.settings().tick_interval);

    loop {
        let result = tokio::select! {
            _ = shutdown.notified() => {
                info!("world task shutting down");
                break;
            }
            Some(command) = command_rx.recv() => {
                manager.on_detonate_command(command).map(|outcome| {
                    debug!(?outcome, "fuse handled");
                })
            }
            event = input_rx.recv() => match event {
                Some(event) => apply_event(&mut manager, event),
                None => {
                    info!("input channel closed; world task exiting");
                    break;
                }
            },
            _ = interval.tick() => {
                let expired = manager.world_mut().step();
                let result = expired.into_iter().try_for_each(|explosive| {
                    manager
                        .on_explosive_expired(explosive)
                        .map(|outcome| debug!(explosive = %explosive, ?outcome, "host fuse handled"))
                });
                tick += 1;
                snapshot_tx.send_replace(snapshot(&manager, tick));
                result
            }
        };

        if !keep_running(result) {
            break;
        }
    }
}

/// Logs a lifecycle error and reports whether the loop may continue.
fn keep_running(result: Result<(), LifecycleError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) if e.is_fatal() => {
            error!(error = ?e, "fatal lifecycle error; stopping world task");
            false
        }
        Err(e) => {
            warn!(error = ?e, "lifecycle error");
            true
        }
    }
}

fn apply_event(
    manager: &mut ExplosiveLifecycleManager<SandboxWorld>,
    event: HostEvent,
) -> Result<(), LifecycleError> {
    match event {
        HostEvent::Join { rider, pose, fuel } => {
            match manager.world_mut().add_rider(rider, pose, fuel) {
                Ok(()) => info!(rider = %rider, fuel, "rider joined"),
                Err(e) => warn!(rider = %rider, error = ?e, "rider could not join"),
            }
        }
        HostEvent::Leave { rider } => {
            if manager.world_mut().remove_rider(rider) {
                info!(rider = %rider, "rider left");
            }
        }
        HostEvent::PlaceObject { position } => match manager.world_mut().place_prop(position) {
            Ok(id) => debug!(object = %id, "object placed"),
            Err(e) => warn!(error = ?e, "object could not be placed"),
        },
        HostEvent::Interact {
            rider,
            action,
            item_in_hand,
        } => {
            let trigger = TriggerEvent {
                rider,
                action,
                item_in_hand,
                has_fuel: manager.world().has_fuel(rider),
            };
            if !trigger.is_trigger() {
                return Ok(());
            }
            let outcome = manager.handle_trigger(trigger.rider, trigger.has_fuel)?;
            debug!(rider = %rider, ?outcome, "trigger handled");
        }
    }
    Ok(())
}

fn snapshot(manager: &ExplosiveLifecycleManager<SandboxWorld>, tick: u64) -> WorldSnapshot {
    let world = manager.world();
    let mut armed_riders: Vec<RiderId> = manager.registry().armed_riders().collect();
    armed_riders.sort();
    WorldSnapshot {
        tick,
        bodies: world.bodies().cloned().collect(),
        armed_riders,
        recent_effects: world.recent_effects().collect(),
        notices: world.rider_notices(),
    }
}
