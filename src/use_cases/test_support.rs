use std::collections::HashMap;

use glam::DVec3;

use crate::domain::ports::{
    EffectEmitter, InventoryMutator, NearbyObject, PhysicsApplier, RiderDirectory, WorldSpawner,
};
use crate::domain::{
    EntityId, ExplosiveId, InventoryError, ItemKind, Pose, RiderId, RiderNotice, SpawnError,
    WorldError,
};

// Static host fake: nothing moves unless a test moves it, and every port call
// is recorded so tests can assert on what the lifecycle asked for.

#[derive(Clone, Default)]
pub(crate) struct FailureFlags {
    pub spawn: bool,
    pub effect: bool,
    pub remove: bool,
    pub consume: bool,
    pub velocity_for: Vec<EntityId>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SpawnRecord {
    pub pose: Pose,
    pub velocity: DVec3,
    pub fuse_ticks: u32,
}

pub(crate) struct RecordingWorld {
    poses: HashMap<EntityId, Pose>,
    explosives: Vec<ExplosiveId>,
    fuel: HashMap<RiderId, u32>,
    velocities: HashMap<EntityId, DVec3>,
    next_id: u64,
    failures: FailureFlags,
    pub spawns: Vec<SpawnRecord>,
    pub effects: Vec<DVec3>,
    pub notices: Vec<(RiderId, RiderNotice)>,
    pub removals: Vec<Result<ExplosiveId, WorldError>>,
}

impl RecordingWorld {
    pub(crate) fn new() -> Self {
        Self {
            poses: HashMap::new(),
            explosives: Vec::new(),
            fuel: HashMap::new(),
            velocities: HashMap::new(),
            next_id: 1_000,
            failures: FailureFlags::default(),
            spawns: Vec::new(),
            effects: Vec::new(),
            notices: Vec::new(),
            removals: Vec::new(),
        }
    }

    pub(crate) fn with_rider(mut self, rider: RiderId, pose: Pose, fuel: u32) -> Self {
        self.poses.insert(rider.entity(), pose);
        self.fuel.insert(rider, fuel);
        self
    }

    pub(crate) fn with_object(mut self, id: EntityId, position: DVec3) -> Self {
        self.poses.insert(id, Pose::at(position));
        self
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn fuel(&self, rider: RiderId) -> u32 {
        self.fuel.get(&rider).copied().unwrap_or(0)
    }

    /// Last velocity applied to `id`, if any.
    pub(crate) fn velocity_of(&self, id: EntityId) -> Option<DVec3> {
        self.velocities.get(&id).copied()
    }

    pub(crate) fn move_to(&mut self, id: EntityId, position: DVec3) {
        if let Some(pose) = self.poses.get_mut(&id) {
            pose.position = position;
        }
    }

    /// Drops an entity behind the lifecycle's back, as the host would when its
    /// own fuse burns out.
    pub(crate) fn forget(&mut self, id: EntityId) {
        self.poses.remove(&id);
        self.explosives.retain(|e| e.entity() != id);
    }
}

impl WorldSpawner for RecordingWorld {
    fn spawn_explosive(
        &mut self,
        at: Pose,
        velocity: DVec3,
        fuse_ticks: u32,
    ) -> Result<ExplosiveId, SpawnError> {
        if self.failures.spawn {
            return Err(SpawnError::Rejected("spawn failed".to_string()));
        }
        let explosive = ExplosiveId(EntityId(self.next_id));
        self.next_id += 1;
        self.poses.insert(explosive.entity(), at);
        self.explosives.push(explosive);
        self.spawns.push(SpawnRecord {
            pose: at,
            velocity,
            fuse_ticks,
        });
        Ok(explosive)
    }

    fn remove_explosive(&mut self, explosive: ExplosiveId) -> Result<(), WorldError> {
        let result = if self.failures.remove {
            Err(WorldError::Rejected("remove failed".to_string()))
        } else if self.explosives.contains(&explosive) {
            self.forget(explosive.entity());
            Ok(explosive)
        } else {
            Err(WorldError::EntityMissing(explosive.entity()))
        };
        self.removals.push(result.clone());
        result.map(|_| ())
    }

    fn explosive_pose(&self, explosive: ExplosiveId) -> Option<Pose> {
        if !self.explosives.contains(&explosive) {
            return None;
        }
        self.poses.get(&explosive.entity()).copied()
    }
}

impl EffectEmitter for RecordingWorld {
    fn emit_explosion_effect(&mut self, at: DVec3) -> Result<(), WorldError> {
        if self.failures.effect {
            return Err(WorldError::Rejected("effect failed".to_string()));
        }
        self.effects.push(at);
        Ok(())
    }
}

impl PhysicsApplier for RecordingWorld {
    fn nearby_objects(&self, center: DVec3, radius: f64) -> Vec<NearbyObject> {
        let mut found: Vec<NearbyObject> = self
            .poses
            .iter()
            .filter(|(_, pose)| pose.position.distance(center) <= radius)
            .map(|(id, pose)| NearbyObject {
                id: *id,
                position: pose.position,
            })
            .collect();
        found.sort_by_key(|o| o.id);
        found
    }

    fn apply_velocity(&mut self, object: EntityId, velocity: DVec3) -> Result<(), WorldError> {
        if self.failures.velocity_for.contains(&object) {
            return Err(WorldError::Rejected("velocity rejected".to_string()));
        }
        if !self.poses.contains_key(&object) {
            return Err(WorldError::EntityMissing(object));
        }
        self.velocities.insert(object, velocity);
        Ok(())
    }
}

impl InventoryMutator for RecordingWorld {
    fn consume_one(&mut self, rider: RiderId, kind: ItemKind) -> Result<(), InventoryError> {
        if self.failures.consume {
            return Err(InventoryError::OutOfStock { rider, kind });
        }
        let fuel = self
            .fuel
            .get_mut(&rider)
            .ok_or(InventoryError::UnknownRider(rider))?;
        if *fuel == 0 {
            return Err(InventoryError::OutOfStock { rider, kind });
        }
        *fuel -= 1;
        Ok(())
    }
}

impl RiderDirectory for RecordingWorld {
    fn rider_pose(&self, rider: RiderId) -> Option<Pose> {
        if !self.fuel.contains_key(&rider) {
            return None;
        }
        self.poses.get(&rider.entity()).copied()
    }

    fn notify(&mut self, rider: RiderId, notice: RiderNotice) {
        self.notices.push((rider, notice));
    }
}
