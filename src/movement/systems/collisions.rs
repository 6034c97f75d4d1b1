//! Movement domain: floor and ceiling detection.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::motion::SurfaceContacts;
use crate::movement::{GameLayer, Player, SensedContacts};

/// How far past the collider edge a surface still counts as touched.
const CONTACT_SKIN: f32 = 2.0;

/// Half height assumed for non-box colliders.
const FALLBACK_HALF_HEIGHT: f32 = 24.0;

/// Ray length from the body's center to just past its top or bottom edge.
pub(crate) fn contact_reach(collider: &Collider) -> f32 {
    let half_height = match collider.shape_scaled().as_cuboid() {
        Some(c) => c.half_extents.y,
        None => FALLBACK_HALF_HEIGHT,
    };
    half_height + CONTACT_SKIN
}

pub(crate) fn detect_contacts(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &Collider, &mut SensedContacts), With<Player>>,
) {
    // Filter to only hit Ground layer entities
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, collider, mut sensed) in &mut query {
        let previous = sensed.0;

        let reach = contact_reach(collider);
        let origin = transform.translation.truncate();

        // Avian's world is y-up: the floor is below, the ceiling above.
        let floor = spatial_query.cast_ray(origin, Dir2::NEG_Y, reach, true, &ground_filter);
        let ceiling = spatial_query.cast_ray(origin, Dir2::Y, reach, true, &ground_filter);

        sensed.0 = SurfaceContacts {
            floor: floor.is_some(),
            ceiling: ceiling.is_some(),
        };

        if sensed.0 != previous {
            debug!(
                "Contacts changed: floor={}, ceiling={}",
                sensed.0.floor, sensed.0.ceiling
            );
        }
    }
}
