//! Headless runs of the parry state machine against the real plugin set.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{ColliderDisabled, Velocity};

use parry_dash::combat::Health;
use parry_dash::core::{
    CancelParry, DamageEvent, GameState, ParryExecuted, ParryStrike, TimeDilation,
};
use parry_dash::create_headless_app;
use parry_dash::hazards::Parryable;
use parry_dash::parry::{ParryActor, ParryConfig, ParryIntent, ParryState};
use parry_dash::player::Player;

struct Arena {
    app: App,
    actor: Entity,
    hazard: Entity,
}

fn arena() -> Arena {
    let mut app = create_headless_app();
    app.insert_resource(ParryConfig::default());

    let actor = app
        .world_mut()
        .spawn((
            ParryActor::default(),
            ParryIntent::default(),
            Health::new(3),
            Transform::default(),
        ))
        .id();
    let hazard = app
        .world_mut()
        .spawn((
            Parryable::default(),
            Velocity::linear(Vec2::new(-3.0, 0.0)),
            Transform::from_xyz(2.0, 0.0, 0.0),
        ))
        .id();

    // First frame has no real delta
    app.update();
    Arena { app, actor, hazard }
}

impl Arena {
    fn intent(&mut self) -> Mut<ParryIntent> {
        self.app.world_mut().get_mut::<ParryIntent>(self.actor).unwrap()
    }

    fn actor(&self) -> &ParryActor {
        self.app.world().get::<ParryActor>(self.actor).unwrap()
    }

    fn position(&self) -> Vec2 {
        self.app
            .world()
            .get::<Transform>(self.actor)
            .unwrap()
            .translation
            .truncate()
    }

    fn scale(&self) -> f32 {
        self.app.world().resource::<TimeDilation>().scale_factor()
    }

    fn engage(&mut self) {
        self.intent().press();
        self.app.update();
    }

    fn release_toward(&mut self, aim: Vec2) {
        let mut intent = self.intent();
        intent.aim = aim;
        intent.release();
        self.app.update();
    }
}

fn sent<E: Event + Copy>(app: &App) -> Vec<E> {
    let events = app.world().resource::<Events<E>>();
    events.get_cursor().read(events).copied().collect()
}

#[test]
fn press_locks_hazard_and_freezes_time() {
    let mut arena = arena();
    arena.engage();

    let actor = arena.actor();
    assert_eq!(actor.state(), ParryState::Aiming);
    assert_eq!(actor.locked_target(), Some(arena.hazard));
    assert_eq!(arena.position(), Vec2::new(2.0, 0.0));
    assert_eq!(arena.scale(), 0.05);

    let health = arena.app.world().get::<Health>(arena.actor).unwrap();
    assert!(health.is_invincible());
}

#[test]
fn release_dashes_and_knocks_hazard_back() {
    let mut arena = arena();
    arena.engage();
    arena.release_toward(Vec2::X);

    assert_eq!(arena.actor().state(), ParryState::Cooldown);
    // No physics world, so the full dash distance is free
    assert!((arena.position() - Vec2::new(7.0, 0.0)).length() < 1e-5);

    let velocity = arena.app.world().get::<Velocity>(arena.hazard).unwrap();
    assert!(velocity.linvel.x < 0.0);
    assert!(velocity.linvel.y.abs() < 1e-5);

    let parryable = arena.app.world().get::<Parryable>(arena.hazard).unwrap();
    assert!(parryable.is_stunned());

    let executed = sent::<ParryExecuted>(&arena.app);
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].target, Some(arena.hazard));
    assert_eq!(executed[0].direction, Vec2::X);
}

#[test]
fn time_ramps_back_to_full_speed_after_dash() {
    let mut arena = arena();
    arena.engage();
    arena.release_toward(Vec2::X);
    assert!(arena.scale() < 1.0);

    for _ in 0..20 {
        arena.app.update();
    }
    assert_eq!(arena.scale(), 1.0);
}

#[test]
fn cooldown_runs_on_real_time() {
    let mut arena = arena();
    arena.engage();
    arena.release_toward(Vec2::X);

    // Ask for a new aim every frame; the gate must hold for 0.5 real seconds
    for _ in 0..20 {
        arena.intent().press();
        arena.app.update();
        assert_eq!(arena.actor().state(), ParryState::Cooldown);
    }

    for _ in 0..15 {
        arena.app.update();
    }
    assert_eq!(arena.actor().state(), ParryState::Ready);
    assert_eq!(arena.actor().locked_target(), None);
}

#[test]
fn holding_without_release_keeps_aiming() {
    let mut arena = arena();
    arena.engage();

    for _ in 0..10 {
        arena.app.update();
    }
    assert_eq!(arena.actor().state(), ParryState::Aiming);
    assert_eq!(arena.scale(), 0.05);
}

#[test]
fn cancel_restores_time_without_dashing() {
    let mut arena = arena();
    arena.engage();

    let actor = arena.actor;
    arena.app.world_mut().send_event(CancelParry { actor });
    arena.app.update();

    assert_eq!(arena.actor().state(), ParryState::Ready);
    assert_eq!(arena.scale(), 1.0);
    assert_eq!(arena.position(), Vec2::new(2.0, 0.0));
    assert!(sent::<ParryStrike>(&arena.app).is_empty());
}

#[test]
fn cancel_while_ready_is_ignored() {
    let mut arena = arena();
    let actor = arena.actor;
    arena.app.world_mut().send_event(CancelParry { actor });
    arena.app.update();

    assert_eq!(arena.actor().state(), ParryState::Ready);
    assert_eq!(arena.scale(), 1.0);
}

#[test]
fn destroyed_target_still_dashes_without_strike() {
    let mut arena = arena();
    arena.engage();

    arena.app.world_mut().despawn(arena.hazard);
    arena.release_toward(Vec2::X);

    assert_eq!(arena.actor().state(), ParryState::Cooldown);
    assert!(sent::<ParryStrike>(&arena.app).is_empty());

    let executed = sent::<ParryExecuted>(&arena.app);
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].target, None);
}

#[test]
fn removing_actor_mid_aim_restores_time() {
    let mut arena = arena();
    arena.engage();
    assert_eq!(arena.scale(), 0.05);

    arena.app.world_mut().despawn(arena.actor);
    arena.app.update();
    assert_eq!(arena.scale(), 1.0);
}

#[test]
fn hazard_out_of_range_is_not_locked() {
    let mut arena = arena();
    arena
        .app
        .world_mut()
        .get_mut::<Transform>(arena.hazard)
        .unwrap()
        .translation = Vec3::new(2.6, 0.0, 0.0);
    arena.engage();

    assert_eq!(arena.actor().state(), ParryState::Ready);
    assert_eq!(arena.scale(), 1.0);
}

#[test]
fn disabled_hazard_is_skipped() {
    let mut arena = arena();
    arena
        .app
        .world_mut()
        .get_mut::<Parryable>(arena.hazard)
        .unwrap()
        .set_parryable(false);
    arena.engage();

    assert_eq!(arena.actor().state(), ParryState::Ready);
}

#[test]
fn player_death_mid_aim_aborts_the_parry() {
    let mut arena = arena();
    let actor = arena.actor;
    arena.app.world_mut().entity_mut(actor).insert(Player);
    arena.engage();
    assert!(arena.app.world().get::<ColliderDisabled>(actor).is_some());

    // Aiming grants invincibility; strip it so the hit lands
    arena.app.world_mut().get_mut::<Health>(actor).unwrap().invincible_for = 0.0;
    arena.app.world_mut().send_event(DamageEvent {
        target: actor,
        source: None,
        amount: 999,
    });
    arena.app.update();
    arena.app.update();

    let world = arena.app.world();
    assert_eq!(*world.resource::<State<GameState>>().get(), GameState::GameOver);
    assert_eq!(arena.actor().state(), ParryState::Ready);
    assert_eq!(arena.actor().locked_target(), None);
    assert!(world.get::<ColliderDisabled>(actor).is_none());
    assert_eq!(arena.scale(), 1.0);
}

#[test]
fn second_actor_freezes_while_first_cools_down() {
    let mut arena = arena();
    let first = arena.actor;
    let second = arena
        .app
        .world_mut()
        .spawn((
            ParryActor::default(),
            ParryIntent::default(),
            Health::new(3),
            Transform::from_xyz(20.0, 0.0, 0.0),
        ))
        .id();
    arena.app.world_mut().spawn((
        Parryable::default(),
        Velocity::zero(),
        Transform::from_xyz(22.0, 0.0, 0.0),
    ));

    arena.engage();
    arena.release_toward(Vec2::X);
    assert_eq!(arena.actor().state(), ParryState::Cooldown);

    // Second actor freezes time while the first one's restore ramp is running
    arena
        .app
        .world_mut()
        .get_mut::<ParryIntent>(second)
        .unwrap()
        .press();
    arena.app.update();
    let second_state = |app: &App| app.world().get::<ParryActor>(second).unwrap().state();
    assert_eq!(second_state(&arena.app), ParryState::Aiming);
    assert_eq!(arena.scale(), 0.05);

    // A cancel carrying the first actor's old freeze must not thaw the clock
    arena.app.world_mut().send_event(CancelParry { actor: first });
    arena.app.update();
    assert_eq!(arena.actor().state(), ParryState::Cooldown);
    assert_eq!(arena.scale(), 0.05);

    // Frozen gameplay time does not stretch the first actor's cooldown
    for _ in 0..35 {
        arena.app.update();
    }
    assert_eq!(arena.actor().state(), ParryState::Ready);
    assert_eq!(second_state(&arena.app), ParryState::Aiming);
    assert_eq!(arena.scale(), 0.05);
}
