//! Player swings against enemies, headless and without a physics world.

use bevy::prelude::*;
use bevy_rapier2d::prelude::Velocity;

use parry_dash::combat::{Health, MeleeAttack};
use parry_dash::create_headless_app;
use parry_dash::enemies::{AiState, AttackTimer, DeathTimer, Enemy, EnemyStats};
use parry_dash::hazards::Parryable;
use parry_dash::parry::{ParryActor, ParryConfig, ParryIntent, ParryState};
use parry_dash::player::{Facing, Player};

struct Duel {
    app: App,
    player: Entity,
    enemy: Entity,
}

fn duel(enemy_at: Vec2) -> Duel {
    let mut app = create_headless_app();
    app.insert_resource(ParryConfig::default());

    let player = app
        .world_mut()
        .spawn((
            Player,
            Facing::default(),
            MeleeAttack::default(),
            ParryActor::default(),
            ParryIntent::default(),
            Transform::default(),
        ))
        .id();
    let stats = EnemyStats::default();
    let enemy = app
        .world_mut()
        .spawn((
            Enemy,
            AiState::default(),
            AttackTimer::ready(stats.attack_cooldown),
            Health::new(stats.max_health),
            Parryable::default(),
            Velocity::zero(),
            stats,
            Transform::from_translation(enemy_at.extend(0.0)),
        ))
        .id();

    app.update();
    Duel { app, player, enemy }
}

impl Duel {
    fn swing(&mut self) {
        self.app
            .world_mut()
            .get_mut::<MeleeAttack>(self.player)
            .unwrap()
            .requested = true;
        self.app.update();
    }

    fn wait(&mut self, frames: usize) {
        for _ in 0..frames {
            self.app.update();
        }
    }

    fn enemy_health(&self) -> i32 {
        self.app.world().get::<Health>(self.enemy).unwrap().current
    }
}

#[test]
fn three_swings_kill_an_enemy_and_it_despawns() {
    let mut duel = duel(Vec2::new(0.8, 0.0));

    for expected in [2, 1] {
        duel.swing();
        duel.wait(1);
        assert_eq!(duel.enemy_health(), expected);
        // Two swings per second
        duel.wait(35);
    }

    duel.swing();
    duel.wait(2);

    let world = duel.app.world();
    assert_eq!(world.get::<AiState>(duel.enemy), Some(&AiState::Dying));
    assert!(world.get::<DeathTimer>(duel.enemy).is_some());
    assert!(!world.get::<Parryable>(duel.enemy).unwrap().enabled);

    // One second of gameplay time to leave the arena
    duel.wait(70);
    assert!(duel.app.world().get::<Enemy>(duel.enemy).is_none());
}

#[test]
fn swings_during_cooldown_do_nothing() {
    let mut duel = duel(Vec2::new(0.8, 0.0));
    duel.swing();
    duel.wait(1);
    assert_eq!(duel.enemy_health(), 2);

    for _ in 0..10 {
        duel.swing();
    }
    assert_eq!(duel.enemy_health(), 2);
}

#[test]
fn enemy_behind_the_player_is_not_hit() {
    let mut duel = duel(Vec2::new(-0.8, 0.0));
    duel.swing();
    duel.wait(1);
    assert_eq!(duel.enemy_health(), 3);

    duel.app.world_mut().get_mut::<Facing>(duel.player).unwrap().0 = Vec2::NEG_X;
    duel.wait(35);
    duel.swing();
    duel.wait(1);
    assert_eq!(duel.enemy_health(), 2);
}

#[test]
fn aiming_a_parry_blocks_the_swing() {
    let mut duel = duel(Vec2::new(0.8, 0.0));
    duel.app
        .world_mut()
        .get_mut::<Parryable>(duel.enemy)
        .unwrap()
        .set_parryable(false);
    // Locking on pulls the player to here, which leaves the enemy inside the swing
    duel.app.world_mut().spawn((
        Parryable::default(),
        Velocity::zero(),
        Transform::from_xyz(0.3, 0.0, 0.0),
    ));
    duel.app
        .world_mut()
        .get_mut::<ParryIntent>(duel.player)
        .unwrap()
        .press();
    duel.app.update();
    assert_eq!(
        duel.app.world().get::<ParryActor>(duel.player).unwrap().state(),
        ParryState::Aiming
    );

    duel.swing();
    duel.wait(1);
    assert_eq!(duel.enemy_health(), 3);
    assert!(!duel.app.world().get::<MeleeAttack>(duel.player).unwrap().requested);
}
