// In-memory reference host: bodies, rider inventories and explosive fuses.
// Implements every host port so the lifecycle core can run without an engine.

use glam::DVec3;
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::{debug, info};

use crate::domain::entities::{EntityId, ExplosiveId, ItemKind, Pose, RiderId, RiderNotice};
use crate::domain::errors::{InventoryError, SpawnError, WorldError};
use crate::domain::ports::{
    EffectEmitter, InventoryMutator, NearbyObject, PhysicsApplier, RiderDirectory, WorldSpawner,
};

/// Velocity multiplier applied every tick.
pub const DRAG: f64 = 0.98;
pub const DEFAULT_CAPACITY: usize = 4096;
const EFFECT_LOG_LIMIT: usize = 32;
// Per rider; older notices fall off.
const NOTICE_LOG_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Rider,
    Prop,
    Explosive,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: EntityId,
    pub kind: BodyKind,
    pub pose: Pose,
    /// Blocks per tick.
    pub velocity: DVec3,
}

#[derive(Debug, Default)]
struct RiderState {
    fuel: u32,
    notices: VecDeque<RiderNotice>,
}

#[derive(Debug)]
pub struct SandboxWorld {
    capacity: usize,
    next_id: u64,
    // Ordered so snapshots and searches are deterministic.
    bodies: BTreeMap<EntityId, Body>,
    riders: HashMap<RiderId, RiderState>,
    // Remaining host fuse per live explosive.
    fuses: HashMap<ExplosiveId, u32>,
    effects: VecDeque<DVec3>,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl SandboxWorld {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            next_id: 1,
            bodies: BTreeMap::new(),
            riders: HashMap::new(),
            fuses: HashMap::new(),
            effects: VecDeque::with_capacity(EFFECT_LOG_LIMIT),
        }
    }

    pub fn add_rider(&mut self, rider: RiderId, pose: Pose, fuel: u32) -> Result<(), SpawnError> {
        if self.bodies.contains_key(&rider.entity()) {
            return Err(SpawnError::Rejected(format!("entity {} already exists", rider.0)));
        }
        self.insert_body(rider.entity(), BodyKind::Rider, pose, DVec3::ZERO)?;
        self.riders.insert(
            rider,
            RiderState {
                fuel,
                notices: VecDeque::with_capacity(NOTICE_LOG_LIMIT),
            },
        );
        Ok(())
    }

    /// Returns false if the rider was not present.
    pub fn remove_rider(&mut self, rider: RiderId) -> bool {
        self.riders.remove(&rider);
        self.bodies.remove(&rider.entity()).is_some()
    }

    pub fn place_prop(&mut self, position: DVec3) -> Result<EntityId, SpawnError> {
        let id = self.allocate_id();
        self.insert_body(id, BodyKind::Prop, Pose::at(position), DVec3::ZERO)?;
        Ok(id)
    }

    pub fn fuel(&self, rider: RiderId) -> u32 {
        self.riders.get(&rider).map_or(0, |r| r.fuel)
    }

    pub fn has_fuel(&self, rider: RiderId) -> bool {
        self.fuel(rider) > 0
    }

    /// Notices delivered to `rider`, oldest first.
    pub fn notices(&self, rider: RiderId) -> impl Iterator<Item = RiderNotice> + '_ {
        self.riders
            .get(&rider)
            .into_iter()
            .flat_map(|r| r.notices.iter().copied())
    }

    /// Every rider's recent notices, grouped by rider in id order.
    pub fn rider_notices(&self) -> Vec<(RiderId, RiderNotice)> {
        let mut riders: Vec<&RiderId> = self.riders.keys().collect();
        riders.sort();
        riders
            .into_iter()
            .flat_map(|rider| self.notices(*rider).map(move |notice| (*rider, notice)))
            .collect()
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    /// Most recent explosion effects, oldest first.
    pub fn recent_effects(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.effects.iter().copied()
    }

    /// Advances one host tick. Returns explosives whose host fuse burned out;
    /// those are already gone from the world.
    pub fn step(&mut self) -> Vec<ExplosiveId> {
        for body in self.bodies.values_mut() {
            body.pose.position += body.velocity;
            body.velocity *= DRAG;
        }

        let mut expired = Vec::new();
        for (explosive, remaining) in self.fuses.iter_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                expired.push(*explosive);
            }
        }
        for explosive in &expired {
            self.fuses.remove(explosive);
            self.bodies.remove(&explosive.entity());
            info!(explosive = %explosive, "host fuse burned out");
        }
        expired
    }

    fn allocate_id(&mut self) -> EntityId {
        loop {
            let id = EntityId(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if !self.bodies.contains_key(&id) {
                return id;
            }
        }
    }

    fn insert_body(
        &mut self,
        id: EntityId,
        kind: BodyKind,
        pose: Pose,
        velocity: DVec3,
    ) -> Result<(), SpawnError> {
        if self.bodies.len() >= self.capacity {
            return Err(SpawnError::WorldFull);
        }
        self.bodies.insert(
            id,
            Body {
                id,
                kind,
                pose,
                velocity,
            },
        );
        Ok(())
    }
}

impl WorldSpawner for SandboxWorld {
    fn spawn_explosive(
        &mut self,
        at: Pose,
        velocity: DVec3,
        fuse_ticks: u32,
    ) -> Result<ExplosiveId, SpawnError> {
        let id = self.allocate_id();
        self.insert_body(id, BodyKind::Explosive, at, velocity)?;
        let explosive = ExplosiveId(id);
        self.fuses.insert(explosive, fuse_ticks.max(1));
        Ok(explosive)
    }

    fn remove_explosive(&mut self, explosive: ExplosiveId) -> Result<(), WorldError> {
        self.fuses.remove(&explosive);
        match self.bodies.get(&explosive.entity()) {
            Some(body) if body.kind == BodyKind::Explosive => {
                self.bodies.remove(&explosive.entity());
                Ok(())
            }
            _ => Err(WorldError::EntityMissing(explosive.entity())),
        }
    }

    fn explosive_pose(&self, explosive: ExplosiveId) -> Option<Pose> {
        self.bodies
            .get(&explosive.entity())
            .filter(|b| b.kind == BodyKind::Explosive)
            .map(|b| b.pose)
    }
}

impl EffectEmitter for SandboxWorld {
    fn emit_explosion_effect(&mut self, at: DVec3) -> Result<(), WorldError> {
        if self.effects.len() == EFFECT_LOG_LIMIT {
            self.effects.pop_front();
        }
        self.effects.push_back(at);
        Ok(())
    }
}

impl PhysicsApplier for SandboxWorld {
    fn nearby_objects(&self, center: DVec3, radius: f64) -> Vec<NearbyObject> {
        self.bodies
            .values()
            .filter(|b| b.pose.position.distance(center) <= radius)
            .map(|b| NearbyObject {
                id: b.id,
                position: b.pose.position,
            })
            .collect()
    }

    fn apply_velocity(&mut self, object: EntityId, velocity: DVec3) -> Result<(), WorldError> {
        let body = self
            .bodies
            .get_mut(&object)
            .ok_or(WorldError::EntityMissing(object))?;
        body.velocity = velocity;
        Ok(())
    }
}

impl InventoryMutator for SandboxWorld {
    fn consume_one(&mut self, rider: RiderId, kind: ItemKind) -> Result<(), InventoryError> {
        let state = self
            .riders
            .get_mut(&rider)
            .ok_or(InventoryError::UnknownRider(rider))?;
        // Only fuel is stocked in the sandbox.
        if kind != ItemKind::Fuel || state.fuel == 0 {
            return Err(InventoryError::OutOfStock { rider, kind });
        }
        state.fuel -= 1;
        Ok(())
    }
}

impl RiderDirectory for SandboxWorld {
    fn rider_pose(&self, rider: RiderId) -> Option<Pose> {
        self.bodies
            .get(&rider.entity())
            .filter(|b| b.kind == BodyKind::Rider)
            .map(|b| b.pose)
    }

    fn notify(&mut self, rider: RiderId, notice: RiderNotice) {
        debug!(rider = %rider, ?notice, "rider notice");
        if let Some(state) = self.riders.get_mut(&rider) {
            if state.notices.len() == NOTICE_LOG_LIMIT {
                state.notices.pop_front();
            }
            state.notices.push_back(notice);
        }
    }
}
