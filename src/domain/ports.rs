use glam::DVec3;

use crate::domain::entities::{EntityId, ExplosiveId, ItemKind, Pose, RiderId, RiderNotice};
use crate::domain::errors::{InventoryError, SpawnError, WorldError};

// Ports for the host world. The lifecycle manager depends on these traits, not
// on a concrete engine, and calls them only from the thread that owns the world.

/// A body found inside the search radius of a detonation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyObject {
    pub id: EntityId,
    pub position: DVec3,
}

pub trait WorldSpawner {
    /// Creates an explosive at `at` moving with `velocity`. The host's own fuse is
    /// set to `fuse_ticks`.
    fn spawn_explosive(
        &mut self,
        at: Pose,
        velocity: DVec3,
        fuse_ticks: u32,
    ) -> Result<ExplosiveId, SpawnError>;

    fn remove_explosive(&mut self, explosive: ExplosiveId) -> Result<(), WorldError>;

    /// Current pose of a live explosive, `None` once the host dropped it.
    fn explosive_pose(&self, explosive: ExplosiveId) -> Option<Pose>;
}

pub trait EffectEmitter {
    /// Best-effort particles and sound.
    fn emit_explosion_effect(&mut self, at: DVec3) -> Result<(), WorldError>;
}

pub trait PhysicsApplier {
    /// Every body within `radius` of `center`. Nothing is excluded.
    fn nearby_objects(&self, center: DVec3, radius: f64) -> Vec<NearbyObject>;

    fn apply_velocity(&mut self, object: EntityId, velocity: DVec3) -> Result<(), WorldError>;
}

pub trait InventoryMutator {
    fn consume_one(&mut self, rider: RiderId, kind: ItemKind) -> Result<(), InventoryError>;
}

pub trait RiderDirectory {
    fn rider_pose(&self, rider: RiderId) -> Option<Pose>;

    fn notify(&mut self, rider: RiderId, notice: RiderNotice);
}

/// Everything the lifecycle manager needs from the host.
pub trait HostWorld:
    WorldSpawner + EffectEmitter + PhysicsApplier + InventoryMutator + RiderDirectory
{
}

impl<T> HostWorld for T where
    T: WorldSpawner + EffectEmitter + PhysicsApplier + InventoryMutator + RiderDirectory
{
}
