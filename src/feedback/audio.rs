//! Parry sound cues played through kira.

use bevy::prelude::*;
use bevy_kira_audio::prelude::{Audio, AudioControl};
use bevy_kira_audio::AudioSource;

use super::components::ParrySfx;
use crate::core::GameplaySet;

/// Clips for each [`ParrySfx`] cue.
#[derive(Resource)]
pub struct ParrySounds {
    pub lock: Handle<AudioSource>,
    pub dash: Handle<AudioSource>,
    pub hazard_parried: Handle<AudioSource>,
}

impl ParrySounds {
    fn clip(&self, cue: ParrySfx) -> &Handle<AudioSource> {
        match cue {
            ParrySfx::Lock => &self.lock,
            ParrySfx::Dash => &self.dash,
            ParrySfx::HazardParried => &self.hazard_parried,
        }
    }
}

/// Plays parry cues. Needs `bevy_kira_audio::AudioPlugin` and an asset server.
pub struct FeedbackAudioPlugin;

impl Plugin for FeedbackAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_parry_sounds).add_systems(
            Update,
            play_parry_sfx
                .after(GameplaySet::Feedback)
                .run_if(resource_exists::<ParrySounds>),
        );
    }
}

fn load_parry_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(ParrySounds {
        lock: asset_server.load("audio/parry_lock.ogg"),
        dash: asset_server.load("audio/parry_dash.ogg"),
        hazard_parried: asset_server.load("audio/hazard_parried.ogg"),
    });
    info!("Parry sound cues queued for loading");
}

fn play_parry_sfx(audio: Res<Audio>, sounds: Res<ParrySounds>, mut cues: EventReader<ParrySfx>) {
    for cue in cues.read() {
        audio.play(sounds.clip(*cue).clone());
    }
}
