// picking.rs — 光标拾取：在视空间里对标记四边形做射线测试

use glam::{Mat4, Vec2, Vec3};

use crate::camera::{Camera, Ray};
use crate::geo::MarkerPlacement;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Index into the placement slice that was searched.
    pub index: usize,
    /// Distance along the normalized pick ray.
    pub distance: f32,
}

/// Deterministic marker picking.
///
/// Ordering contract:
/// - The closest hit along the ray wins.
/// - Equal distances keep the earlier marker.
///
/// Markers are camera-facing squares with side length `scale`, the same
/// quad the renderer draws. The globe body never blocks a pick ray, so
/// markers on the far side stay clickable.
pub fn pick(
    placements: &[MarkerPlacement],
    globe_yaw: f32,
    camera: &Camera,
    pixel: Vec2,
    viewport: Vec2,
) -> Option<PickHit> {
    let ray = camera.view_ray(pixel, viewport);
    let to_view = camera.view() * Mat4::from_rotation_y(globe_yaw);

    let mut best: Option<PickHit> = None;
    for (index, marker) in placements.iter().enumerate() {
        let center = to_view.transform_point3(marker.position);
        let Some(distance) = quad_hit(ray, center, marker.scale) else {
            continue;
        };

        let closer = match best {
            None => true,
            Some(b) => distance < b.distance,
        };
        if closer {
            best = Some(PickHit { index, distance });
        }
    }

    best
}

// 标记面向相机，即位于视空间 z = center.z 的平面上
fn quad_hit(ray: Ray, center_view: Vec3, side: f32) -> Option<f32> {
    if ray.dir.z >= 0.0 {
        return None;
    }

    let t = (center_view.z - ray.origin.z) / ray.dir.z;
    if t <= 0.0 {
        return None;
    }

    let hit = ray.origin + ray.dir * t;
    let half = side * 0.5;
    if (hit.x - center_view.x).abs() <= half && (hit.y - center_view.y).abs() <= half {
        Some(t)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn marker(position: Vec3, scale: f32, location: usize) -> MarkerPlacement {
        MarkerPlacement {
            location,
            position,
            scale,
        }
    }

    fn square_viewport() -> (Camera, Vec2) {
        (Camera::new(1.0), Vec2::new(1000.0, 1000.0))
    }

    #[test]
    fn marker_under_the_cursor_is_hit() {
        let (camera, viewport) = square_viewport();
        let placements = [marker(Vec3::new(0.0, 0.0, 15.0), 3.0, 0)];

        let hit = pick(&placements, 0.0, &camera, viewport * 0.5, viewport).expect("hit");
        assert_eq!(hit.index, 0);
        // eye z 40, marker z 15
        assert!((hit.distance - 25.0).abs() < 1e-3);
    }

    #[test]
    fn empty_space_misses() {
        let (camera, viewport) = square_viewport();
        let placements = [marker(Vec3::new(0.0, 0.0, 15.0), 3.0, 0)];

        assert!(pick(&placements, 0.0, &camera, Vec2::new(10.0, 10.0), viewport).is_none());
    }

    #[test]
    fn nearest_of_two_stacked_markers_wins() {
        let (camera, viewport) = square_viewport();
        let placements = [
            marker(Vec3::new(0.0, 0.0, 10.0), 3.0, 0),
            marker(Vec3::new(0.0, 0.0, 15.0), 3.0, 1),
        ];

        let hit = pick(&placements, 0.0, &camera, viewport * 0.5, viewport).expect("hit");
        assert_eq!(hit.index, 1, "the marker closer to the eye should win");
    }

    #[test]
    fn equal_distances_keep_the_earlier_marker() {
        let (camera, viewport) = square_viewport();
        let placements = [
            marker(Vec3::new(0.0, 0.0, 15.0), 3.0, 0),
            marker(Vec3::new(0.0, 0.0, 15.0), 3.0, 1),
        ];

        let hit = pick(&placements, 0.0, &camera, viewport * 0.5, viewport).expect("hit");
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn yaw_carries_the_marker_away_from_the_cursor() {
        let (camera, viewport) = square_viewport();
        let placements = [marker(Vec3::new(0.0, 0.0, 15.0), 3.0, 0)];

        // A quarter turn moves the marker to the globe's flank.
        assert!(pick(&placements, PI / 2.0, &camera, viewport * 0.5, viewport).is_none());
    }

    #[test]
    fn far_side_markers_stay_pickable() {
        let (camera, viewport) = square_viewport();
        let placements = [marker(Vec3::new(0.0, 0.0, 15.0), 3.0, 0)];

        // Half a turn puts the marker behind the globe, still on the
        // center ray and still pickable, just farther away.
        let hit = pick(&placements, PI, &camera, viewport * 0.5, viewport).expect("hit");
        assert_eq!(hit.index, 0);
        assert!((hit.distance - 55.0).abs() < 1e-2);
    }

    #[test]
    fn quad_extent_follows_the_marker_scale() {
        let (camera, viewport) = square_viewport();

        // Aim 1.0 view units off the marker center at its depth plane.
        let half_v = (crate::camera::FOV_Y_DEG.to_radians() * 0.5).tan();
        let ndc_x = (1.0 / 25.0) / half_v;
        let pixel = Vec2::new((ndc_x + 1.0) * 0.5 * viewport.x, viewport.y * 0.5);

        let big = [marker(Vec3::new(0.0, 0.0, 15.0), 3.0, 0)];
        let small = [marker(Vec3::new(0.0, 0.0, 15.0), 1.0, 0)];

        assert!(pick(&big, 0.0, &camera, pixel, viewport).is_some());
        assert!(pick(&small, 0.0, &camera, pixel, viewport).is_none());
    }
}
