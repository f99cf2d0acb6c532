// Domain layer: identities, pure knockback rules, host ports and the sandbox world.

pub mod entities;
pub mod errors;
pub mod knockback;
pub mod ports;
pub mod tuning;
pub mod world;

pub use entities::{
    EntityId, ExplosiveId, InteractAction, ItemKind, Pose, RiderId, RiderNotice,
};
pub use errors::{
    DegenerateDirection, InventoryError, LifecycleError, SessionError, SpawnError, WorldError,
};
pub use ports::HostWorld;
pub use world::SandboxWorld;
