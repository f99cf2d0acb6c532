// Use-case level inputs/outputs for the explosive lifecycle and the host loop.

use glam::DVec3;

use crate::domain::world::Body;
use crate::domain::{
    ExplosiveId, InteractAction, InventoryError, ItemKind, Pose, RiderId, RiderNotice,
    SpawnError,
};

/// Events delivered to the host loop by the input adapter.
#[derive(Debug, Clone)]
pub enum HostEvent {
    Join {
        rider: RiderId,
        pose: Pose,
        fuel: u32,
    },
    Leave {
        rider: RiderId,
    },
    PlaceObject {
        position: DVec3,
    },
    Interact {
        rider: RiderId,
        action: InteractAction,
        item_in_hand: ItemKind,
    },
}

/// A rider interaction, with the fuel check already resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerEvent {
    pub rider: RiderId,
    pub action: InteractAction,
    pub item_in_hand: ItemKind,
    pub has_fuel: bool,
}

impl TriggerEvent {
    /// Only using the detonator item arms or detonates.
    pub fn is_trigger(&self) -> bool {
        self.action.is_use() && self.item_in_hand == ItemKind::Detonator
    }
}

/// Posted back onto the host loop when a fuse elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetonateCommand {
    pub rider: RiderId,
    pub explosive: ExplosiveId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Rider had no fuel; they were notified.
    MissingFuel,
    /// Host refused the spawn. Nothing was armed and no fuel was used.
    SpawnFailed(SpawnError),
    Armed { explosive: ExplosiveId },
    /// Armed, but the fuel could not be deducted.
    ArmedWithoutFuel {
        explosive: ExplosiveId,
        error: InventoryError,
    },
    Detonated(DetonationOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetonationOutcome {
    /// No matching session: already detonated, or the command targets an older
    /// explosive.
    Stale,
    /// The host dropped the explosive before detonation; only cleanup ran.
    Vanished,
    Exploded(KnockbackReport),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KnockbackReport {
    /// Objects that received a velocity.
    pub pushed: usize,
    /// Objects skipped because of a degenerate direction or a host failure.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub bodies: Vec<Body>,
    pub armed_riders: Vec<RiderId>,
    pub recent_effects: Vec<DVec3>,
    /// Recent notices per rider, grouped by rider id.
    pub notices: Vec<(RiderId, RiderNotice)>,
}
