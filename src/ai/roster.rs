//! Own units partitioned by role, taken once per turn

use crate::core::types::{PlayerId, Role, UnitId};
use crate::game::snapshot::Snapshot;

#[derive(Debug, Clone, Default)]
pub struct Roster {
    by_role: [Vec<UnitId>; Role::COUNT],
}

impl Roster {
    /// Partition `owner`'s living units, in snapshot order
    pub fn from_snapshot(snapshot: &Snapshot, owner: PlayerId) -> Self {
        let mut roster = Roster::default();
        for unit in snapshot.units_of(owner) {
            roster.by_role[unit.role.index()].push(unit.id);
        }
        roster
    }

    pub fn of(&self, role: Role) -> &[UnitId] {
        &self.by_role[role.index()]
    }

    /// Corvettes then missile boats
    pub fn combat_units(&self) -> Vec<UnitId> {
        Role::ALL
            .iter()
            .filter(|r| r.is_combat())
            .flat_map(|&r| self.of(r).iter().copied())
            .collect()
    }

    /// Unit counts indexed by [`Role::index`]
    pub fn counts(&self) -> [usize; Role::COUNT] {
        let mut counts = [0; Role::COUNT];
        for role in Role::ALL {
            counts[role.index()] = self.of(role).len();
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.by_role.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::SnapshotBuilder;
    use glam::Vec2;

    #[test]
    fn test_partition_by_role() {
        let mut builder = SnapshotBuilder::new(5.0);
        let miner = builder.own_unit(Role::Miner, Vec2::new(100.0, 0.0));
        let corvette = builder.own_unit(Role::Corvette, Vec2::new(0.0, 100.0));
        let boat = builder.own_unit(Role::MissileBoat, Vec2::new(0.0, -100.0));
        builder.enemy_unit(Role::Miner, Vec2::new(-100.0, 0.0));
        let snapshot = builder.build();

        let roster = Roster::from_snapshot(&snapshot, snapshot.me);
        assert_eq!(roster.of(Role::Miner), &[miner]);
        assert_eq!(roster.combat_units(), vec![corvette, boat]);
        assert_eq!(roster.total(), 3);
        assert_eq!(roster.counts()[Role::Transport.index()], 0);
    }
}
