//! Feedback systems. Everything animates on real time so effects stay smooth
//! while gameplay is frozen.

use bevy::prelude::*;

use super::components::*;
use crate::core::Parried;
use crate::hazards::Parryable;

pub fn spawn_beams(mut commands: Commands, mut vfx: EventReader<ParryVfx>) {
    for event in vfx.read() {
        let (kind, from, to, timing) = match *event {
            ParryVfx::Teleport { from, to, timing } => (BeamKind::Teleport, from, to, timing),
            ParryVfx::Dash { from, to, timing } => (BeamKind::Dash, from, to, timing),
        };
        commands.spawn((
            Name::new(format!("{:?} Beam", kind)),
            Beam {
                kind,
                from,
                to,
                timing,
                elapsed: 0.0,
            },
        ));
    }
}

pub fn animate_beams(
    mut commands: Commands,
    real_time: Res<Time<Real>>,
    mut beams: Query<(Entity, &mut Beam)>,
) {
    for (entity, mut beam) in beams.iter_mut() {
        beam.elapsed += real_time.delta_secs();
        if beam.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}

pub fn tick_outlines(real_time: Res<Time<Real>>, mut outlines: Query<&mut ParryOutline>) {
    for mut outline in outlines.iter_mut() {
        outline.tick(real_time.delta_secs());
    }
}

/// Every accepted parry gets the hazard hit cue.
pub fn cue_hazard_parried(mut parried: EventReader<Parried>, mut sfx: EventWriter<ParrySfx>) {
    for _ in parried.read() {
        sfx.send(ParrySfx::HazardParried);
    }
}

pub fn draw_beams(mut gizmos: Gizmos, beams: Query<&Beam>) {
    for beam in beams.iter() {
        let color = match beam.kind {
            BeamKind::Teleport => Color::srgb(0.4, 0.9, 1.0),
            BeamKind::Dash => Color::WHITE,
        };
        gizmos.line_2d(beam.from, beam.to, color.with_alpha(beam.alpha()));
    }
}

pub fn draw_outlines(mut gizmos: Gizmos, outlines: Query<(&ParryOutline, &GlobalTransform)>) {
    for (outline, transform) in outlines.iter() {
        if !outline.is_active() {
            continue;
        }
        let center = transform.translation().truncate();
        let color = Color::srgb(1.0, 0.85, 0.3).with_alpha(outline.alpha);
        gizmos.circle_2d(
            Isometry2d::from_translation(center),
            0.6 + 0.1 * outline.intensity,
            color,
        );
    }
}

pub fn tint_stunned_hazards(mut hazards: Query<(&Parryable, &HazardTint, &mut Sprite)>) {
    for (parryable, tint, mut sprite) in hazards.iter_mut() {
        let t = parryable.blink_factor();
        let base = tint.base.to_srgba();
        let parried = tint.parried.to_srgba();
        sprite.color = Color::srgba(
            base.red + (parried.red - base.red) * t,
            base.green + (parried.green - base.green) * t,
            base.blue + (parried.blue - base.blue) * t,
            base.alpha,
        );
    }
}
