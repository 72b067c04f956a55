//! Collision-safe dash distance.
//!
//! Parallel rays are cast from the leading face of the actor's body along
//! the aim direction; the dash stops `skin_width` short of the nearest hit,
//! so the body itself never ends up inside the obstacle.

use bevy::prelude::*;

/// Distance from the center to the edge of the box along `direction`.
fn support(half_extents: Vec2, direction: Vec2) -> f32 {
    direction.x.abs() * half_extents.x + direction.y.abs() * half_extents.y
}

/// Ray start points on the body's leading face, spread evenly perpendicular
/// to `direction` and inset by `skin_width` from the sides.
pub fn ray_origins(
    center: Vec2,
    half_extents: Vec2,
    direction: Vec2,
    ray_count: usize,
    skin_width: f32,
) -> Vec<Vec2> {
    let direction = direction.normalize_or_zero();
    let front = center + direction * support(half_extents, direction);
    if ray_count <= 1 {
        return vec![front];
    }

    let perpendicular = direction.perp();
    let spread = (support(half_extents, perpendicular) - skin_width).max(0.0);

    (0..ray_count)
        .map(|i| {
            let t = i as f32 / (ray_count - 1) as f32;
            front + perpendicular * (-spread + 2.0 * spread * t)
        })
        .collect()
}

/// Dash length allowed by one obstacle hit at `hit_distance`.
pub fn clamp_to_hit(nominal: f32, hit_distance: f32, skin_width: f32) -> f32 {
    (hit_distance - skin_width).min(nominal).max(0.0)
}

/// Shortest allowed dash over every ray. `cast` returns the hit distance for
/// a ray starting at the given origin, or `None` when it is clear.
pub fn safe_dash_distance(
    origins: &[Vec2],
    nominal: f32,
    skin_width: f32,
    mut cast: impl FnMut(Vec2) -> Option<f32>,
) -> f32 {
    origins
        .iter()
        .filter_map(|origin| cast(*origin))
        .map(|hit| clamp_to_hit(nominal, hit, skin_width))
        .fold(nominal.max(0.0), f32::min)
}

/// Where the actor lands after dashing from `origin`.
pub fn dash_destination(origin: Vec2, direction: Vec2, distance: f32) -> Vec2 {
    origin + direction.normalize_or_zero() * distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_one_unit_ahead_stops_dash_at_skin() {
        let origins = ray_origins(Vec2::new(2.0, 0.0), Vec2::new(0.3, 0.5), Vec2::X, 3, 0.1);
        let distance = safe_dash_distance(&origins, 5.0, 0.1, |_| Some(1.0));

        assert!((distance - 0.9).abs() < 1e-6);
        let landed = dash_destination(Vec2::new(2.0, 0.0), Vec2::X, distance);
        assert!((landed - Vec2::new(2.9, 0.0)).length() < 1e-6);
    }

    #[test]
    fn clear_path_uses_nominal_distance() {
        let origins = ray_origins(Vec2::ZERO, Vec2::splat(0.5), Vec2::Y, 5, 0.1);
        assert_eq!(safe_dash_distance(&origins, 5.0, 0.1, |_| None), 5.0);
    }

    #[test]
    fn obstacle_closer_than_nominal_never_overshoots_or_goes_negative() {
        for skin in [0.05, 0.1, 0.2, 0.3] {
            for step in 0..50 {
                let hit = step as f32 * 0.1;
                let distance = clamp_to_hit(5.0, hit, skin);
                assert!(distance >= 0.0, "negative dash for hit {hit} skin {skin}");
                assert!(
                    distance <= (hit - skin).max(0.0) + 1e-6,
                    "dash {distance} past hit {hit} skin {skin}"
                );
            }
        }
    }

    #[test]
    fn nearest_ray_wins() {
        let origins = ray_origins(Vec2::ZERO, Vec2::new(0.3, 0.5), Vec2::X, 3, 0.1);
        let distance = safe_dash_distance(&origins, 5.0, 0.1, |origin| {
            // Low ledge only catches the bottom ray
            (origin.y < -0.1).then_some(0.6)
        });
        assert!((distance - 0.5).abs() < 1e-6);
    }

    #[test]
    fn origins_span_leading_face() {
        let origins = ray_origins(Vec2::ZERO, Vec2::new(0.3, 0.5), Vec2::X, 3, 0.1);
        assert_eq!(origins.len(), 3);
        assert!((origins[0] - Vec2::new(0.3, -0.4)).length() < 1e-6);
        assert!((origins[1] - Vec2::new(0.3, 0.0)).length() < 1e-6);
        assert!((origins[2] - Vec2::new(0.3, 0.4)).length() < 1e-6);

        let upward = ray_origins(Vec2::ZERO, Vec2::new(0.3, 0.5), Vec2::Y, 3, 0.1);
        assert!(upward.iter().all(|origin| (origin.y - 0.5).abs() < 1e-6));
    }

    #[test]
    fn body_stops_short_of_wall_face() {
        let center = Vec2::new(2.0, 0.0);
        let half_extents = Vec2::new(0.3, 0.5);
        let wall_face = 3.3;

        let origins = ray_origins(center, half_extents, Vec2::X, 3, 0.1);
        let distance = safe_dash_distance(&origins, 5.0, 0.1, |origin| Some(wall_face - origin.x));
        let landed = dash_destination(center, Vec2::X, distance);

        assert!((landed.x - 2.9).abs() < 1e-5);
        assert!(landed.x + half_extents.x <= wall_face - 0.1 + 1e-5);
    }
}
