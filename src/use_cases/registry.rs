// Session bookkeeping for armed explosives.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::time::Duration;
use tokio::time::Instant;

use super::timer::TimerHandle;
use crate::domain::{ExplosiveId, RiderId, SessionError};

/// One armed explosive owned by one rider. Never mutated after arming.
#[derive(Debug)]
pub struct ExplosiveSession {
    pub rider: RiderId,
    pub explosive: ExplosiveId,
    pub armed_at: Instant,
    pub fuse_ticks: u32,
    pub fuse: Duration,
    /// Pending automatic detonation. Cancelled when the session is destroyed.
    pub timer: TimerHandle,
}

/// Live sessions, reachable by rider or by explosive.
///
/// Sessions are stored once, keyed by rider; the explosive index points back at
/// the rider. Both entries are written and removed together.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    by_rider: HashMap<RiderId, ExplosiveSession>,
    by_explosive: HashMap<ExplosiveId, RiderId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a new session under both keys, or fails leaving the registry untouched.
    pub fn try_arm(
        &mut self,
        rider: RiderId,
        explosive: ExplosiveId,
        fuse_ticks: u32,
        fuse: Duration,
        timer: TimerHandle,
    ) -> Result<&ExplosiveSession, SessionError> {
        if self.by_explosive.contains_key(&explosive) {
            return Err(SessionError::ExplosiveTaken { explosive });
        }

        match self.by_rider.entry(rider) {
            Entry::Occupied(_) => Err(SessionError::AlreadyArmed { rider }),
            Entry::Vacant(slot) => {
                self.by_explosive.insert(explosive, rider);
                let session = slot.insert(ExplosiveSession {
                    rider,
                    explosive,
                    armed_at: Instant::now(),
                    fuse_ticks,
                    fuse,
                    timer,
                });
                Ok(&*session)
            }
        }
    }

    pub fn lookup_by_rider(&self, rider: RiderId) -> Option<&ExplosiveSession> {
        self.by_rider.get(&rider)
    }

    pub fn lookup_by_explosive(&self, explosive: ExplosiveId) -> Option<&ExplosiveSession> {
        self.by_explosive
            .get(&explosive)
            .and_then(|rider| self.by_rider.get(rider))
    }

    /// Removes both index entries. Removing twice returns `None` the second time.
    pub fn remove(&mut self, rider: RiderId) -> Option<ExplosiveSession> {
        let session = self.by_rider.remove(&rider)?;
        self.by_explosive.remove(&session.explosive);
        Some(session)
    }

    pub fn len(&self) -> usize {
        self.by_rider.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_rider.is_empty()
    }

    /// Riders with a live session, in no particular order.
    pub fn armed_riders(&self) -> impl Iterator<Item = RiderId> + '_ {
        self.by_rider.keys().copied()
    }
}
