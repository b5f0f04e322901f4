use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Handle of a scheduled reversion, unique for the lifetime of a scheduler.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

/// Transient view that must be put back once its timer fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reversion {
    /// A peek of this kind expires.
    Peek(PeekKind),
    /// A mine that cost a life is hidden again.
    MineFlash,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Pending {
    due: Duration,
    reversion: Reversion,
}

/// Registry of timed reversions on a logical clock.
///
/// The host moves the clock with [`Scheduler::advance`]; nothing fires on its own. At most one
/// reversion of each kind is pending, scheduling a new one cancels the old.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<TimerId, Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, reversion: Reversion, delay: Duration) -> TimerId {
        if self.cancel_reversion(reversion) {
            log::trace!("Superseded pending {:?}", reversion);
        }

        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.insert(
            id,
            Pending {
                due: self.now.saturating_add(delay),
                reversion,
            },
        );
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.pending.remove(&id).is_some()
    }

    pub fn cancel_reversion(&mut self, reversion: Reversion) -> bool {
        let before = self.pending.len();
        self.pending.retain(|_, pending| pending.reversion != reversion);
        self.pending.len() != before
    }

    /// Drops every pending reversion, returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        if count > 0 {
            log::debug!("Cancelled {} pending reversions", count);
        }
        count
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Moves the clock forward and returns the reversions that came due, earliest first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TimerId, Reversion)> {
        self.now = self.now.saturating_add(elapsed);
        let now = self.now;

        let mut fired: Vec<(Duration, TimerId, Reversion)> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.due <= now)
            .map(|(&id, pending)| (pending.due, id, pending.reversion))
            .collect();
        fired.sort_unstable_by_key(|&(due, id, _)| (due, id));

        for (_, id, _) in &fired {
            self.pending.remove(id);
        }
        fired
            .into_iter()
            .map(|(_, id, reversion)| (id, reversion))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn fires_only_once_due() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(Reversion::MineFlash, ms(300));

        assert!(scheduler.advance(ms(299)).is_empty());
        assert!(scheduler.is_pending(id));
        assert_eq!(scheduler.advance(ms(1)), vec![(id, Reversion::MineFlash)]);
        assert!(!scheduler.is_pending(id));
        assert!(scheduler.advance(ms(1000)).is_empty());
    }

    #[test]
    fn same_kind_supersedes_other_kinds_coexist() {
        let mut scheduler = Scheduler::new();
        let first = scheduler.schedule(Reversion::Peek(PeekKind::SafeClick), ms(100));
        let flash = scheduler.schedule(Reversion::MineFlash, ms(50));
        let second = scheduler.schedule(Reversion::Peek(PeekKind::SafeClick), ms(100));

        assert!(!scheduler.is_pending(first));
        assert_eq!(scheduler.pending_count(), 2);
        assert_eq!(
            scheduler.advance(ms(100)),
            vec![
                (flash, Reversion::MineFlash),
                (second, Reversion::Peek(PeekKind::SafeClick))
            ]
        );
    }

    #[test]
    fn cancel_all_prevents_stale_fires() {
        let mut scheduler = Scheduler::new();
        let id = scheduler.schedule(Reversion::Peek(PeekKind::Hint), ms(10));
        scheduler.schedule(Reversion::MineFlash, ms(10));

        assert_eq!(scheduler.cancel_all(), 2);
        assert!(!scheduler.cancel(id));
        assert!(scheduler.advance(ms(10)).is_empty());
    }
}
