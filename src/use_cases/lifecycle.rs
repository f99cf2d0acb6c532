// Explosive lifecycle: arm on first trigger, detonate on the second trigger or
// when the fuse elapses, then clean up.

use std::time::Duration;
use tracing::{debug, error, info, info_span, warn};

use super::registry::SessionRegistry;
use super::timer::DetonationTimer;
use super::types::{DetonateCommand, DetonationOutcome, KnockbackReport, TriggerOutcome};
use crate::domain::knockback::compute_impulse;
use crate::domain::tuning::BlastTuning;
use crate::domain::{
    ExplosiveId, HostWorld, ItemKind, LifecycleError, RiderId, RiderNotice, SpawnError,
};

/// Settings the lifecycle needs at runtime.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleSettings {
    /// Search radius around a detonation.
    pub effect_radius: f64,
    /// Speed given to each object caught in the blast.
    pub effect_power: f64,
    pub tuning: BlastTuning,
    /// Length of one host tick, used to turn fuse ticks into wall time.
    pub tick_interval: Duration,
}

impl LifecycleSettings {
    pub fn fuse(&self) -> Duration {
        self.tick_interval * self.tuning.fuse_ticks
    }
}

/// Owns the session registry and the detonation timer, and drives the host
/// world through its ports. Must live on the thread that owns the world.
pub struct ExplosiveLifecycleManager<W> {
    world: W,
    registry: SessionRegistry,
    timer: DetonationTimer,
    settings: LifecycleSettings,
}

impl<W: HostWorld> ExplosiveLifecycleManager<W> {
    pub fn new(world: W, timer: DetonationTimer, settings: LifecycleSettings) -> Self {
        Self {
            world,
            registry: SessionRegistry::new(),
            timer,
            settings,
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    /// Read-only view of live sessions.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    /// Arms a new explosive, or detonates the rider's live one.
    pub fn handle_trigger(
        &mut self,
        rider: RiderId,
        has_required_fuel: bool,
    ) -> Result<TriggerOutcome, LifecycleError> {
        if let Some(session) = self.registry.lookup_by_rider(rider) {
            let explosive = session.explosive;
            info!(rider = %rider, explosive = %explosive, "manual detonation");
            return self
                .detonate(rider, explosive)
                .map(TriggerOutcome::Detonated);
        }

        if !has_required_fuel {
            debug!(rider = %rider, "trigger without fuel");
            self.world.notify(rider, RiderNotice::MissingFuel);
            return Ok(TriggerOutcome::MissingFuel);
        }

        // Spawn before touching the inventory so a failed spawn costs nothing.
        let Some(pose) = self.world.rider_pose(rider) else {
            warn!(rider = %rider, "rider not in world; cannot spawn explosive");
            return Ok(TriggerOutcome::SpawnFailed(SpawnError::RiderUnavailable(
                rider,
            )));
        };
        let tuning = self.settings.tuning;
        let velocity = pose.forward() * tuning.launch_speed;
        let explosive = match self
            .world
            .spawn_explosive(pose, velocity, tuning.engine_fuse_ticks())
        {
            Ok(explosive) => explosive,
            Err(e) => {
                warn!(rider = %rider, error = ?e, "failed to spawn explosive");
                return Ok(TriggerOutcome::SpawnFailed(e));
            }
        };

        let fuse = self.settings.fuse();
        let handle = self.timer.schedule(fuse, DetonateCommand { rider, explosive });
        if let Err(e) = self
            .registry
            .try_arm(rider, explosive, tuning.fuse_ticks, fuse, handle)
        {
            // The rejected fuse was dropped with the handle; take the orphan back out.
            error!(rider = %rider, explosive = %explosive, error = ?e, "arm rejected");
            if let Err(e) = self.world.remove_explosive(explosive) {
                warn!(explosive = %explosive, error = ?e, "failed to remove orphaned explosive");
            }
            return Err(e.into());
        }
        info!(
            rider = %rider,
            explosive = %explosive,
            fuse_ticks = tuning.fuse_ticks,
            "explosive armed"
        );

        match self.world.consume_one(rider, ItemKind::Fuel) {
            Ok(()) => Ok(TriggerOutcome::Armed { explosive }),
            Err(e) => {
                warn!(rider = %rider, explosive = %explosive, error = ?e, "armed but fuel was not deducted");
                Ok(TriggerOutcome::ArmedWithoutFuel {
                    explosive,
                    error: e,
                })
            }
        }
    }

    /// Entry point for fuse commands posted back by the timer.
    pub fn on_detonate_command(
        &mut self,
        command: DetonateCommand,
    ) -> Result<DetonationOutcome, LifecycleError> {
        debug!(rider = %command.rider, explosive = %command.explosive, "fuse elapsed");
        self.detonate(command.rider, command.explosive)
    }

    /// Closes the session of an explosive the host already removed on its own
    /// fuse. Nothing is pushed since there is no explosive left to detonate.
    pub fn on_explosive_expired(
        &mut self,
        explosive: ExplosiveId,
    ) -> Result<DetonationOutcome, LifecycleError> {
        let Some(rider) = self
            .registry
            .lookup_by_explosive(explosive)
            .map(|session| session.rider)
        else {
            return Ok(DetonationOutcome::Stale);
        };
        warn!(rider = %rider, explosive = %explosive, "host fuse burned out before the session fuse");
        self.detonate(rider, explosive)
    }

    /// Explodes the rider's explosive and destroys the session.
    ///
    /// Does nothing unless the rider's live session is for `explosive`, so a fuse
    /// command that lost the race against a manual detonation (or that targets
    /// an older explosive) has no effect.
    pub fn detonate(
        &mut self,
        rider: RiderId,
        explosive: ExplosiveId,
    ) -> Result<DetonationOutcome, LifecycleError> {
        match self.registry.lookup_by_rider(rider) {
            Some(session) if session.explosive == explosive => {}
            Some(session) => {
                debug!(
                    rider = %rider,
                    explosive = %explosive,
                    live = %session.explosive,
                    "ignoring detonation for an older explosive"
                );
                return Ok(DetonationOutcome::Stale);
            }
            None => {
                debug!(rider = %rider, explosive = %explosive, "no live session; nothing to detonate");
                return Ok(DetonationOutcome::Stale);
            }
        }

        let span = info_span!("detonation", rider = %rider, explosive = %explosive);
        let _enter = span.enter();

        let Some(pose) = self.world.explosive_pose(explosive) else {
            warn!("explosive vanished before detonation; cleaning up");
            self.cleanup(rider, explosive)?;
            return Ok(DetonationOutcome::Vanished);
        };

        if let Err(e) = self.world.emit_explosion_effect(pose.position) {
            warn!(error = ?e, "failed to emit explosion effect");
        }

        let mut report = KnockbackReport::default();
        let nearby = self
            .world
            .nearby_objects(pose.position, self.settings.effect_radius);
        for object in nearby {
            if object.id == explosive.entity() {
                continue;
            }
            let impulse = match compute_impulse(pose, object.position, self.settings.effect_power)
            {
                Ok(impulse) => impulse,
                Err(_) => {
                    debug!(object = %object.id, "object sits on the detonation point; skipping");
                    report.skipped += 1;
                    continue;
                }
            };
            match self.world.apply_velocity(object.id, impulse) {
                Ok(()) => report.pushed += 1,
                Err(e) => {
                    warn!(object = %object.id, error = ?e, "failed to apply knockback");
                    report.skipped += 1;
                }
            }
        }

        if let Err(e) = self.world.remove_explosive(explosive) {
            warn!(error = ?e, "failed to remove detonated explosive");
        }
        self.cleanup(rider, explosive)?;

        info!(
            pushed = report.pushed,
            skipped = report.skipped,
            "explosive detonated"
        );
        Ok(DetonationOutcome::Exploded(report))
    }

    fn cleanup(&mut self, rider: RiderId, explosive: ExplosiveId) -> Result<(), LifecycleError> {
        match self.registry.remove(rider) {
            Some(session) if session.explosive == explosive => {
                debug!(
                    armed_for_ms = session.armed_at.elapsed().as_millis() as u64,
                    "session closed"
                );
                self.timer.cancel(session.timer);
                Ok(())
            }
            _ => {
                error!(rider = %rider, explosive = %explosive, "session cleanup failed");
                Err(LifecycleError::CleanupFailed { rider, explosive })
            }
        }
    }
}
