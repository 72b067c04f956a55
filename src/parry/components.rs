//! Parry actor components.

use bevy::prelude::*;

use crate::core::FreezeEpisode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParryState {
    #[default]
    Ready,
    /// Locked on a hazard with gameplay time frozen
    Aiming,
    /// Dashed; waiting on the real clock before the next aim
    Cooldown,
}

/// Player-side parry state machine.
#[derive(Component, Debug, Clone)]
pub struct ParryActor {
    state: ParryState,
    /// Unit length or zero
    aim_direction: Vec2,
    /// Set whenever the actor is not `Ready`. May outlive the entity it names.
    locked_target: Option<Entity>,
    /// Where the locked target was last seen
    target_position: Vec2,
    /// Real-clock seconds at which `Cooldown` may end
    cooldown_until: f64,
    /// Freeze this actor opened and may still restore
    episode: Option<FreezeEpisode>,
    /// Half size of the body used to place dash rays
    pub body_half_extents: Vec2,
}

impl Default for ParryActor {
    fn default() -> Self {
        Self::new(Vec2::new(0.3, 0.5))
    }
}

impl ParryActor {
    pub fn new(body_half_extents: Vec2) -> Self {
        Self {
            state: ParryState::Ready,
            aim_direction: Vec2::ZERO,
            locked_target: None,
            target_position: Vec2::ZERO,
            cooldown_until: 0.0,
            episode: None,
            body_half_extents,
        }
    }

    pub fn state(&self) -> ParryState {
        self.state
    }

    pub fn is_aiming(&self) -> bool {
        self.state == ParryState::Aiming
    }

    /// True when a new aim may start.
    pub fn can_act(&self) -> bool {
        self.state == ParryState::Ready
    }

    pub fn aim_direction(&self) -> Vec2 {
        self.aim_direction
    }

    pub fn locked_target(&self) -> Option<Entity> {
        self.locked_target
    }

    pub fn target_position(&self) -> Vec2 {
        self.target_position
    }

    pub fn cooldown_until(&self) -> f64 {
        self.cooldown_until
    }

    pub fn episode(&self) -> Option<FreezeEpisode> {
        self.episode
    }

    /// Ready -> Aiming. Ignored in any other state.
    pub fn begin_aim(&mut self, target: Entity, target_position: Vec2, episode: FreezeEpisode) -> bool {
        if self.state != ParryState::Ready {
            return false;
        }
        self.state = ParryState::Aiming;
        self.locked_target = Some(target);
        self.target_position = target_position;
        self.aim_direction = Vec2::ZERO;
        self.episode = Some(episode);
        true
    }

    pub fn track_target(&mut self, position: Vec2) {
        self.target_position = position;
    }

    pub fn set_aim(&mut self, direction: Vec2) {
        self.aim_direction = direction.normalize_or_zero();
    }

    /// Aiming -> Cooldown. The episode stays with the actor so the restore
    /// ramp it starts can still be cancelled.
    pub fn finish_aim(&mut self, cooldown_until: f64) -> bool {
        if self.state != ParryState::Aiming {
            return false;
        }
        self.state = ParryState::Cooldown;
        self.cooldown_until = cooldown_until;
        true
    }

    /// Cooldown -> Ready once the real clock reaches `cooldown_until`.
    pub fn recover(&mut self, real_now: f64) -> bool {
        if self.state != ParryState::Cooldown || real_now < self.cooldown_until {
            return false;
        }
        self.state = ParryState::Ready;
        self.locked_target = None;
        self.aim_direction = Vec2::ZERO;
        self.episode = None;
        true
    }

    /// Abort without dashing and hand back the episode to restore.
    ///
    /// Aiming returns to Ready. Cooldown keeps its gate and only gives up
    /// its time ramp. Ready has nothing to cancel.
    pub fn cancel(&mut self) -> Option<FreezeEpisode> {
        match self.state {
            ParryState::Ready => None,
            ParryState::Aiming => {
                self.state = ParryState::Ready;
                self.locked_target = None;
                self.aim_direction = Vec2::ZERO;
                self.episode.take()
            }
            ParryState::Cooldown => self.episode.take(),
        }
    }
}

/// Parry input for one actor, sampled once per frame.
///
/// Written by the device input system in the game, or directly by tests.
/// Edges are cleared at the end of every gameplay frame.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ParryIntent {
    pub pressed: bool,
    pub released: bool,
    pub held: bool,
    /// Desired aim, any length; short vectors count as no input
    pub aim: Vec2,
}

impl ParryIntent {
    pub fn press(&mut self) {
        self.pressed = true;
        self.held = true;
    }

    pub fn release(&mut self) {
        self.released = true;
        self.held = false;
    }

    pub fn clear_edges(&mut self) {
        self.pressed = false;
        self.released = false;
    }
}

/// Pick the dash direction for this frame.
///
/// Uses the aim input when it clears the deadzone, otherwise points away from
/// the target, otherwise along `facing`.
pub fn resolve_aim(input: Vec2, deadzone: f32, actor: Vec2, target: Option<Vec2>, facing: Vec2) -> Vec2 {
    if input.length() > deadzone {
        return input.normalize();
    }

    if let Some(away) = target.and_then(|t| (actor - t).try_normalize()) {
        return away;
    }

    facing.try_normalize().unwrap_or(Vec2::X)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeDilation;

    fn aiming_actor() -> (ParryActor, Entity) {
        let mut actor = ParryActor::default();
        let target = Entity::from_raw(7);
        let episode = TimeDilation::default().freeze(0.05);
        assert!(actor.begin_aim(target, Vec2::new(2.0, 0.0), episode));
        (actor, target)
    }

    #[test]
    fn target_is_locked_exactly_while_not_ready() {
        let (mut actor, target) = aiming_actor();
        assert_eq!(actor.locked_target(), Some(target));
        assert!(!actor.can_act());

        assert!(actor.finish_aim(10.0));
        assert_eq!(actor.locked_target(), Some(target));

        assert!(actor.recover(10.0));
        assert_eq!(actor.locked_target(), None);
        assert!(actor.can_act());
    }

    #[test]
    fn cooldown_holds_until_deadline() {
        let (mut actor, _) = aiming_actor();
        actor.finish_aim(3.5);
        assert!(!actor.recover(3.499));
        assert_eq!(actor.state(), ParryState::Cooldown);
        assert!(actor.recover(3.5));
    }

    #[test]
    fn cancel_while_aiming_returns_to_ready_with_episode() {
        let (mut actor, _) = aiming_actor();
        assert!(actor.cancel().is_some());
        assert_eq!(actor.state(), ParryState::Ready);
        assert_eq!(actor.locked_target(), None);
        assert_eq!(actor.aim_direction(), Vec2::ZERO);
        assert!(actor.cancel().is_none());
    }

    #[test]
    fn cancel_during_cooldown_keeps_gate() {
        let (mut actor, _) = aiming_actor();
        actor.finish_aim(5.0);
        assert!(actor.cancel().is_some());
        assert_eq!(actor.state(), ParryState::Cooldown);
        assert!(!actor.recover(1.0));
    }

    #[test]
    fn aim_prefers_input_then_away_from_target_then_facing() {
        let actor = Vec2::new(2.0, 0.0);
        assert_eq!(resolve_aim(Vec2::new(0.0, 3.0), 0.1, actor, None, Vec2::X), Vec2::Y);
        assert_eq!(
            resolve_aim(Vec2::new(0.05, 0.0), 0.1, actor, Some(Vec2::new(3.0, 0.0)), Vec2::X),
            Vec2::NEG_X
        );
        assert_eq!(resolve_aim(Vec2::ZERO, 0.1, actor, Some(actor), Vec2::NEG_X), Vec2::NEG_X);
        assert_eq!(resolve_aim(Vec2::ZERO, 0.1, actor, None, Vec2::ZERO), Vec2::X);
    }
}
