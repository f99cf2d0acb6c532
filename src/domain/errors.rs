// Domain-level errors for the explosive lifecycle and its collaborators.

use super::entities::{EntityId, ExplosiveId, ItemKind, RiderId};

/// Registry guard failures. Never expected given the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The rider already owns a live session.
    AlreadyArmed { rider: RiderId },
    /// The explosive id is already indexed by another session.
    ExplosiveTaken { explosive: ExplosiveId },
}

/// The host refused or failed to create an explosive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpawnError {
    /// The rider is not present in the world, so there is nowhere to spawn.
    RiderUnavailable(RiderId),
    WorldFull,
    Rejected(String),
}

/// Fuel consumption failed after the explosive was already spawned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    UnknownRider(RiderId),
    OutOfStock { rider: RiderId, kind: ItemKind },
}

/// Effect emission, velocity application or entity removal failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    EntityMissing(EntityId),
    Rejected(String),
}

/// The object sits exactly on the detonation point, so it has no direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateDirection;

/// Errors surfaced by the lifecycle manager to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    Session(SessionError),
    /// Registry cleanup did not remove the session. The session would leak and
    /// could never detonate again, so the owner must treat this as fatal.
    CleanupFailed {
        rider: RiderId,
        explosive: ExplosiveId,
    },
}

impl LifecycleError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, LifecycleError::CleanupFailed { .. })
    }
}

impl From<SessionError> for LifecycleError {
    fn from(e: SessionError) -> Self {
        LifecycleError::Session(e)
    }
}
