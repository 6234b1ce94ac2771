// mesh.rs — 球体与背景星星的网格生成

use glam::Vec3;

pub const STAR_COUNT: usize = 20;
pub const STAR_RADIUS: f32 = 0.15;
pub const STAR_SEGMENTS: usize = 5;
pub const STAR_DEPTH: f32 = -20.0;

#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// UV sphere. Rings run pole to pole, segments around the equator.
///
/// The texture u axis follows longitude starting at the antimeridian and v
/// runs from the north pole down, so an equirectangular earth texture and
/// `geo::project` agree without any per-marker correction.
pub fn build_sphere(radius: f32, rings: usize, segments: usize) -> MeshData {
    let mut positions = Vec::with_capacity((rings + 1) * (segments + 1));
    let mut uvs = Vec::with_capacity((rings + 1) * (segments + 1));
    let mut indices = Vec::new();

    for i in 0..=rings {
        // colatitude, 0 at the north pole
        let theta = std::f32::consts::PI * (i as f32) / (rings as f32);
        let sin_t = theta.sin();
        let y = radius * theta.cos();

        for j in 0..=segments {
            let phi = 2.0 * std::f32::consts::PI * (j as f32) / (segments as f32);

            let x = -radius * sin_t * phi.cos();
            let z = radius * sin_t * phi.sin();

            positions.push([x, y, z]);
            uvs.push([(j as f32) / (segments as f32), (i as f32) / (rings as f32)]);
        }
    }

    for i in 0..rings {
        for j in 0..segments {
            let a = (i * (segments + 1) + j) as u32;
            let b = a + (segments + 1) as u32;

            indices.extend_from_slice(&[
                a, b, a + 1,
                b, b + 1, a + 1,
            ]);
        }
    }

    MeshData {
        positions,
        uvs,
        indices,
    }
}

/// All decorative stars baked into one static mesh: a small triangle fan
/// per star at its world position, facing the camera. Stars never move, so
/// one vertex buffer covers the lot.
pub fn build_star_field(centers: &[Vec3], radius: f32, segments: usize) -> MeshData {
    let mut positions = Vec::with_capacity(centers.len() * (segments + 2));
    let mut uvs = Vec::with_capacity(centers.len() * (segments + 2));
    let mut indices = Vec::with_capacity(centers.len() * segments * 3);

    for center in centers {
        let base = positions.len() as u32;

        positions.push([center.x, center.y, center.z]);
        uvs.push([0.5, 0.5]);

        for k in 0..=segments {
            let a = 2.0 * std::f32::consts::PI * (k as f32) / (segments as f32);
            positions.push([
                center.x + radius * a.cos(),
                center.y + radius * a.sin(),
                center.z,
            ]);
            uvs.push([0.0, 0.0]);
        }

        for k in 0..segments as u32 {
            indices.extend_from_slice(&[base, base + 1 + k, base + 2 + k]);
        }
    }

    MeshData {
        positions,
        uvs,
        indices,
    }
}

/// Random star spots in a loose box behind the globe.
pub fn scatter_stars<R: rand::Rng>(rng: &mut R, count: usize) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-50.0f32..50.0),
                rng.gen_range(-40.0f32..40.0),
                STAR_DEPTH,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-3;

    #[test]
    fn sphere_has_the_expected_counts() {
        let mesh = build_sphere(15.0, 32, 64);
        assert_eq!(mesh.positions.len(), 33 * 65);
        assert_eq!(mesh.uvs.len(), mesh.positions.len());
        assert_eq!(mesh.indices.len(), 32 * 64 * 6);
    }

    #[test]
    fn every_vertex_sits_on_the_radius() {
        let mesh = build_sphere(15.0, 16, 32);
        for p in &mesh.positions {
            let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((len - 15.0).abs() < EPS);
        }
    }

    #[test]
    fn texture_v_starts_at_the_north_pole() {
        let mesh = build_sphere(15.0, 16, 32);
        for (p, uv) in mesh.positions.iter().zip(&mesh.uvs) {
            if uv[1] == 0.0 {
                assert!((p[1] - 15.0).abs() < EPS, "v=0 should be the north pole");
            }
            if uv[1] == 1.0 {
                assert!((p[1] + 15.0).abs() < EPS, "v=1 should be the south pole");
            }
        }
    }

    #[test]
    fn texture_agrees_with_the_geographic_projection() {
        // A vertex with texture coordinate (u, v) must sit exactly where
        // the lat/lon it depicts projects to.
        let radius = 15.0;
        let mesh = build_sphere(radius, 32, 64);

        for (p, uv) in mesh.positions.iter().zip(&mesh.uvs) {
            let lat = 90.0 - uv[1] * 180.0;
            let lon = uv[0] * 360.0 - 180.0;
            let expected = crate::geo::project(lat, lon, radius);

            assert!(
                (Vec3::from_array(*p) - expected).length() < EPS,
                "vertex at uv ({}, {}) is off its geographic spot",
                uv[0],
                uv[1]
            );
        }
    }

    #[test]
    fn star_field_has_a_fan_per_star() {
        let centers = vec![
            Vec3::new(0.0, 0.0, STAR_DEPTH),
            Vec3::new(10.0, -5.0, STAR_DEPTH),
        ];
        let mesh = build_star_field(&centers, STAR_RADIUS, STAR_SEGMENTS);

        assert_eq!(mesh.positions.len(), 2 * (STAR_SEGMENTS + 2));
        assert_eq!(mesh.indices.len(), 2 * STAR_SEGMENTS * 3);
    }

    #[test]
    fn star_vertices_hug_their_center() {
        let centers = vec![Vec3::new(3.0, 4.0, STAR_DEPTH)];
        let mesh = build_star_field(&centers, STAR_RADIUS, STAR_SEGMENTS);

        for p in &mesh.positions {
            let d = Vec3::from_array(*p) - centers[0];
            assert!(d.length() <= STAR_RADIUS + EPS);
            assert_eq!(p[2], STAR_DEPTH, "stars are flat discs at a fixed depth");
        }
    }

    #[test]
    fn scattered_stars_stay_in_the_backdrop_box() {
        let mut rng = StdRng::seed_from_u64(7);
        let stars = scatter_stars(&mut rng, STAR_COUNT);

        assert_eq!(stars.len(), STAR_COUNT);
        for s in &stars {
            assert!(s.x >= -50.0 && s.x < 50.0);
            assert!(s.y >= -40.0 && s.y < 40.0);
            assert_eq!(s.z, STAR_DEPTH);
        }
    }
}
