// Use cases layer: explosive lifecycle workflows and the host loop that owns them.

pub mod host;
pub mod lifecycle;
pub mod registry;
pub mod timer;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use host::world_task;
pub use lifecycle::{ExplosiveLifecycleManager, LifecycleSettings};
pub use registry::{ExplosiveSession, SessionRegistry};
pub use timer::{DetonationTimer, TimerHandle};
pub use types::{
    DetonateCommand, DetonationOutcome, HostEvent, KnockbackReport, TriggerEvent, TriggerOutcome,
    WorldSnapshot,
};
