//! Boss plugin - flight, volleys, phases and defeat.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::components::BossRng;
use super::config::BossConfig;
use super::systems::*;
use crate::core::{init_tuning, GameplaySet};

/// Boss plugin - drives every [`Boss`](super::Boss).
pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        init_tuning::<BossConfig>(app);

        let seed = app
            .world()
            .get_resource::<BossConfig>()
            .and_then(|config| config.seed);
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        app.insert_resource(BossRng(rng)).add_systems(
            Update,
            (
                track_phase,
                steer,
                fly,
                shoot,
                handle_boss_death,
                despawn_dead_bosses,
            )
                .chain()
                .in_set(GameplaySet::Actors),
        );
    }
}
