use domain_shared::discord::{GuildId, UserId};
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Members whose role change is currently being applied.
#[derive(Debug, Default)]
pub struct InFlightChanges {
    members: Mutex<HashSet<(GuildId, UserId)>>,
}

impl InFlightChanges {
    /// Returns `None` when a change for the same member is still running.
    pub fn begin(&self, guild_id: GuildId, user_id: UserId) -> Option<InFlightGuard<'_>> {
        let key = (guild_id, user_id);
        let inserted = self
            .members
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key);

        inserted.then_some(InFlightGuard { changes: self, key })
    }
}

pub struct InFlightGuard<'a> {
    changes: &'a InFlightChanges,
    key: (GuildId, UserId),
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.changes
            .members
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}
