/// Gameplay tuning for launched explosives.
///
/// Keep this separate from runtime/server configuration (tick rates, buffer sizes, etc.)
/// and from the file-configured effect radius/power.
#[derive(Debug, Clone, Copy)]
pub struct BlastTuning {
    /// Launch speed along the rider's facing, in blocks per tick.
    pub launch_speed: f64,

    /// Ticks from arming until automatic detonation.
    pub fuse_ticks: u32,

    /// Extra ticks added to the host's own fuse so the controlled detonation
    /// always wins against the engine exploding the entity by itself.
    pub engine_fuse_margin_ticks: u32,
}

impl BlastTuning {
    pub fn engine_fuse_ticks(&self) -> u32 {
        self.fuse_ticks + self.engine_fuse_margin_ticks
    }
}

impl Default for BlastTuning {
    fn default() -> Self {
        Self {
            launch_speed: 3.0,
            fuse_ticks: 97,
            engine_fuse_margin_ticks: 3,
        }
    }
}
