//! Global time dilation: the single source of truth for how fast gameplay runs
//! relative to real time.
//!
//! Gameplay code never touches `Time<Virtual>` directly. It asks
//! [`TimeDilation`] to freeze or restore, and [`commit_time_dilation`] applies
//! the requested scale once per frame in `Last`, so every system in a frame
//! observes the same scale.
//!
//! Each freeze opens a new *episode*. Restores and ramps are tagged with the
//! episode that scheduled them; anything carrying a stale episode is ignored,
//! which keeps an old ramp from stomping a newer freeze.

use bevy::prelude::*;

use super::tween::Easing;

/// Lowest scale the clock may be set to. `Time<Fixed>` rejects a zero timestep.
pub const MIN_TIME_SCALE: f32 = 0.01;

/// Fixed step used when no `Time<Fixed>` exists yet (Bevy's 64 Hz default).
const DEFAULT_FIXED_STEP: f32 = 1.0 / 64.0;

/// Ownership token for one freeze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FreezeEpisode(u64);

/// Scale ramp back to 1.0, sampled on the real clock.
#[derive(Debug, Clone, Copy)]
struct TimeRamp {
    episode: u64,
    from: f32,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl TimeRamp {
    fn sample(&self) -> f32 {
        self.easing.lerp(self.from, 1.0, self.elapsed / self.duration)
    }

    fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[derive(Resource, Debug)]
pub struct TimeDilation {
    /// Scale observed by the current frame.
    scale_factor: f32,
    /// Scale that will be committed at the end of the frame.
    requested: f32,
    base_fixed_step: f32,
    episode: u64,
    ramp: Option<TimeRamp>,
}

impl Default for TimeDilation {
    fn default() -> Self {
        Self::new(DEFAULT_FIXED_STEP)
    }
}

impl FromWorld for TimeDilation {
    fn from_world(world: &mut World) -> Self {
        let base = world
            .get_resource::<Time<Fixed>>()
            .map(|fixed| fixed.timestep().as_secs_f32())
            .unwrap_or(DEFAULT_FIXED_STEP);
        Self::new(base)
    }
}

impl TimeDilation {
    pub fn new(base_fixed_step: f32) -> Self {
        Self {
            scale_factor: 1.0,
            requested: 1.0,
            base_fixed_step,
            episode: 0,
            ramp: None,
        }
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn base_fixed_step(&self) -> f32 {
        self.base_fixed_step
    }

    /// Physics step matching the committed scale.
    pub fn effective_fixed_step(&self) -> f32 {
        self.base_fixed_step * self.scale_factor
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }

    /// True while `episode` is the most recent freeze.
    pub fn owns(&self, episode: FreezeEpisode) -> bool {
        episode.0 == self.episode
    }

    /// Slow gameplay to `scale`, cancelling any ramp in flight.
    pub fn freeze(&mut self, scale: f32) -> FreezeEpisode {
        self.episode += 1;
        self.ramp = None;
        self.requested = scale.clamp(MIN_TIME_SCALE, 1.0);
        FreezeEpisode(self.episode)
    }

    /// Ramp back to full speed over `duration` real seconds.
    ///
    /// Supersedes a ramp already in flight. Returns `false` without touching
    /// anything if `episode` is no longer the current freeze.
    pub fn restore_over_time(&mut self, episode: FreezeEpisode, duration: f32, easing: Easing) -> bool {
        if !self.owns(episode) {
            return false;
        }

        if duration <= 0.0 {
            self.ramp = None;
            self.requested = 1.0;
            return true;
        }

        self.ramp = Some(TimeRamp {
            episode: episode.0,
            from: self.requested,
            duration,
            elapsed: 0.0,
            easing,
        });
        true
    }

    /// Jump straight back to full speed if `episode` still owns the clock.
    pub fn force_restore(&mut self, episode: FreezeEpisode) -> bool {
        if !self.owns(episode) {
            return false;
        }
        self.force_restore_all();
        true
    }

    /// Full speed now, regardless of who froze the clock. Every outstanding
    /// episode token becomes stale.
    pub fn force_restore_all(&mut self) {
        self.episode += 1;
        self.ramp = None;
        self.requested = 1.0;
    }

    /// Advance the active ramp by one real-time tick.
    pub fn advance(&mut self, real_delta: f32) {
        let Some(ramp) = self.ramp.as_mut() else {
            return;
        };

        if ramp.episode != self.episode {
            self.ramp = None;
            return;
        }

        ramp.elapsed += real_delta;
        if ramp.finished() {
            self.requested = 1.0;
            self.ramp = None;
        } else {
            self.requested = ramp.sample();
        }
    }

    /// Promote the requested scale to the observed one. Returns whether it changed.
    pub fn commit(&mut self) -> bool {
        let changed = self.scale_factor != self.requested;
        self.scale_factor = self.requested;
        changed
    }
}

/// Step the restore ramp with the unscaled frame delta.
pub fn advance_time_ramp(real_time: Res<Time<Real>>, mut dilation: ResMut<TimeDilation>) {
    dilation.advance(real_time.delta_secs());
}

/// Apply the requested scale to the virtual and fixed clocks.
pub fn commit_time_dilation(
    mut dilation: ResMut<TimeDilation>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut fixed_time: ResMut<Time<Fixed>>,
) {
    if !dilation.commit() {
        return;
    }

    virtual_time.set_relative_speed(dilation.scale_factor());
    fixed_time.set_timestep_seconds(dilation.effective_fixed_step() as f64);
    debug!("Time scale committed: {:.3}", dilation.scale_factor());
}

/// Never leave a finished run slowed down.
pub fn reset_time_dilation(mut dilation: ResMut<TimeDilation>) {
    dilation.force_restore_all();
}
