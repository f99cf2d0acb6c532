// Identities and spatial types shared by the lifecycle core and the host world.

use glam::DVec3;
use std::fmt;

/// Identity of any body living in the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Identity of the actor that arms and detonates explosives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RiderId(pub EntityId);

/// Identity of a spawned explosive, assigned by the host at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExplosiveId(pub EntityId);

impl RiderId {
    pub fn new(raw: u64) -> Self {
        Self(EntityId(raw))
    }

    pub fn entity(self) -> EntityId {
        self.0
    }
}

impl ExplosiveId {
    pub fn entity(self) -> EntityId {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RiderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rider-{}", self.0)
    }
}

impl fmt::Display for ExplosiveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "explosive-{}", self.0)
    }
}

/// Position plus facing. Angles are radians.
///
/// Facing follows the block-game convention: `yaw = 0, pitch = 0` looks down
/// +Z, positive yaw turns towards -X and positive pitch looks down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: DVec3,
    pub yaw: f64,
    pub pitch: f64,
}

impl Pose {
    pub fn new(position: DVec3, yaw: f64, pitch: f64) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// A pose at `position` facing +Z.
    pub fn at(position: DVec3) -> Self {
        Self::new(position, 0.0, 0.0)
    }

    /// Unit vector the pose is looking along.
    pub fn forward(&self) -> DVec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        DVec3::new(-sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch)
    }
}

/// Inventory items the trigger path cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Item that must be held to arm or detonate.
    Detonator,
    /// Consumed once per armed explosive.
    Fuel,
    Other,
}

/// Interaction the rider performed with the item in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractAction {
    UseAir,
    UseBlock,
    Attack,
}

impl InteractAction {
    pub fn is_use(self) -> bool {
        matches!(self, InteractAction::UseAir | InteractAction::UseBlock)
    }
}

/// User-visible messages sent back to a rider. These are not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiderNotice {
    MissingFuel,
}
