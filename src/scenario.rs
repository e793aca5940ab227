//! Scenario construction for tests, benches and the headless runner
//!
//! [`SnapshotBuilder`] assembles a snapshot piece by piece;
//! [`demo_snapshot`] generates a full two-player map from a seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::{BodyId, Material, PlayerId, ProjectileId, Role, UnitId};
use crate::game::bodies::{HomeBase, Projectile, ResourceBody, Sun};
use crate::game::player::Player;
use crate::game::snapshot::{GameConstants, Snapshot};
use crate::game::units::{RoleTable, Unit};

/// Home base of the controlled player
pub const HOME: Vec2 = Vec2::new(-900.0, 0.0);
/// Home base of the opponent
pub const ENEMY_HOME: Vec2 = Vec2::new(900.0, 0.0);
const HOME_RADIUS: f32 = 60.0;

/// Incrementally builds a [`Snapshot`] around a sun at the origin
///
/// Defaults: turn 100 (past any protected window), ship radius 1, the
/// controlled player at [`HOME`] with 1000 funds, the opponent at
/// [`ENEMY_HOME`], and the default role table.
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
    next_unit: u32,
    next_body: u32,
    next_projectile: u32,
}

impl SnapshotBuilder {
    pub fn new(sun_radius: f32) -> Self {
        let me = PlayerId(0);
        let enemy = PlayerId(1);
        let player = |id: PlayerId, name: &str, home: Vec2, opponent: PlayerId| Player {
            id,
            name: name.to_string(),
            funds: 1000.0,
            victory_points: 0,
            home: HomeBase {
                position: home,
                radius: HOME_RADIUS,
            },
            opponent,
        };

        Self {
            snapshot: Snapshot {
                turn: 100,
                me,
                constants: GameConstants {
                    ship_radius: 1.0,
                    ..GameConstants::default()
                },
                roles: RoleTable::default(),
                sun: Sun {
                    position: Vec2::ZERO,
                    radius: sun_radius,
                },
                bodies: Vec::new(),
                players: vec![
                    player(me, "blue", HOME, enemy),
                    player(enemy, "red", ENEMY_HOME, me),
                ],
                units: Vec::new(),
                projectiles: Vec::new(),
            },
            next_unit: 1,
            next_body: 1,
            next_projectile: 1,
        }
    }

    pub fn turn(&mut self, turn: u32) -> &mut Self {
        self.snapshot.turn = turn;
        self
    }

    pub fn ship_radius(&mut self, radius: f32) -> &mut Self {
        self.snapshot.constants.ship_radius = radius;
        self
    }

    /// Funds of the controlled player
    pub fn funds(&mut self, funds: f32) -> &mut Self {
        let me = self.snapshot.me;
        if let Some(p) = self.snapshot.player_mut(me) {
            p.funds = funds;
        }
        self
    }

    pub fn own_unit(&mut self, role: Role, position: Vec2) -> UnitId {
        let owner = self.snapshot.me;
        self.unit(owner, role, position)
    }

    pub fn enemy_unit(&mut self, role: Role, position: Vec2) -> UnitId {
        let owner = self.enemy();
        self.unit(owner, role, position)
    }

    /// A mineral asteroid
    pub fn mineral(&mut self, material: Material, position: Vec2, amount: f32) -> BodyId {
        self.body(material, position, amount, false)
    }

    /// The contested asteroid
    pub fn contested(&mut self, position: Vec2, amount: f32) -> BodyId {
        self.body(Material::Mythicite, position, amount, true)
    }

    /// An enemy missile with no particular target
    pub fn projectile(&mut self, position: Vec2) -> ProjectileId {
        let id = ProjectileId(self.next_projectile);
        self.next_projectile += 1;
        let owner = self.enemy();
        self.snapshot.projectiles.push(Projectile {
            id,
            owner,
            position,
            target: None,
        });
        id
    }

    pub fn build(&self) -> Snapshot {
        self.snapshot.clone()
    }

    fn enemy(&self) -> PlayerId {
        self.snapshot
            .me()
            .map(|p| p.opponent)
            .unwrap_or(PlayerId(1))
    }

    fn unit(&mut self, owner: PlayerId, role: Role, position: Vec2) -> UnitId {
        let id = UnitId(self.next_unit);
        self.next_unit += 1;
        let unit = Unit::new(id, owner, role, position).with_stats(self.snapshot.stats(role));
        self.snapshot.units.push(unit);
        id
    }

    fn body(&mut self, material: Material, position: Vec2, amount: f32, contested: bool) -> BodyId {
        let id = BodyId(self.next_body);
        self.next_body += 1;
        self.snapshot.bodies.push(ResourceBody {
            id,
            position,
            radius: if contested { 30.0 } else { 10.0 },
            material,
            amount,
            contested,
        });
        id
    }
}

/// Fleet each side starts a demo game with
const DEMO_FLEET: [(Role, usize); 5] = [
    (Role::Miner, 4),
    (Role::Transport, 2),
    (Role::Corvette, 2),
    (Role::MissileBoat, 1),
    (Role::Martyr, 1),
];

/// Generate a reproducible two-player map
///
/// A sun of radius 100 sits at the origin inside a belt of mineral
/// asteroids. The contested asteroid lies north of the belt. Each side
/// starts with a small fleet scattered around its home base, some of it
/// already carrying cargo.
pub fn demo_snapshot(seed: u64) -> Snapshot {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = SnapshotBuilder::new(100.0);
    builder
        .turn(rng.gen_range(0..60))
        .ship_radius(GameConstants::default().ship_radius)
        .funds(rng.gen_range(100.0..400.0));

    let belt = rng.gen_range(14..22);
    for i in 0..belt {
        let angle = i as f32 / belt as f32 * std::f32::consts::TAU + rng.gen_range(-0.1..0.1);
        let radius = rng.gen_range(280.0..420.0);
        let material = match rng.gen_range(0..10) {
            0..=4 => Material::Genarium,
            5..=7 => Material::Rarium,
            8 => Material::Legendarium,
            _ => Material::Mythicite,
        };
        builder.mineral(
            material,
            Vec2::from_angle(angle) * radius,
            rng.gen_range(50.0..300.0),
        );
    }
    builder.contested(Vec2::new(0.0, rng.gen_range(600.0..700.0)), 2000.0);

    for (home, enemy) in [(HOME, false), (ENEMY_HOME, true)] {
        for (role, count) in DEMO_FLEET {
            for _ in 0..count {
                let offset = Vec2::new(rng.gen_range(-150.0..150.0), rng.gen_range(-250.0..250.0));
                let position = home + offset;
                if enemy {
                    builder.enemy_unit(role, position);
                } else {
                    builder.own_unit(role, position);
                }
            }
        }
    }

    let mut snapshot = builder.build();
    for unit in &mut snapshot.units {
        if unit.role == Role::Miner && rng.gen_bool(0.5) {
            unit.cargo.add(Material::Genarium, rng.gen_range(5.0..30.0));
        }
    }
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_assigns_distinct_ids() {
        let mut builder = SnapshotBuilder::new(10.0);
        let a = builder.own_unit(Role::Miner, Vec2::ZERO);
        let b = builder.enemy_unit(Role::Miner, Vec2::ONE);
        let snapshot = builder.build();
        assert_ne!(a, b);
        assert_eq!(snapshot.unit(a).unwrap().owner, snapshot.me);
        assert_eq!(snapshot.unit(b).unwrap().owner, PlayerId(1));
        assert_eq!(snapshot.unit(a).unwrap().moves, snapshot.roles.miner.moves);
    }

    #[test]
    fn test_demo_snapshot_is_reproducible() {
        let a = demo_snapshot(7);
        let b = demo_snapshot(7);
        assert_eq!(a.turn, b.turn);
        assert_eq!(a.bodies.len(), b.bodies.len());
        assert_eq!(a.units[3].position, b.units[3].position);
    }

    #[test]
    fn test_demo_snapshot_keeps_belt_clear_of_the_sun() {
        let snapshot = demo_snapshot(11);
        assert!(snapshot.contested_body().is_some());
        assert!(snapshot.units_of(snapshot.me).count() >= 10);
        for body in snapshot.mineral_bodies() {
            assert!(body.position.length() > snapshot.sun.radius * 2.0);
        }
    }
}
