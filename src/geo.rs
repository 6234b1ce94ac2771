// geo.rs — 经纬度到球面坐标的换算与标记点位

use glam::Vec3;

pub const GLOBE_RADIUS: f32 = 15.0;
pub const CLOUD_RADIUS: f32 = 15.1;

// 标记悬浮高度按 scale=3 校准，其他 scale 按比例缩放
pub const BASE_OFFSET: f32 = 0.99899;
pub const REFERENCE_SCALE: f32 = 3.0;

/// One pinned place on the globe. The set is fixed at compile time;
/// nothing mutates these after startup.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lat_deg: f32,
    pub lon_deg: f32,
    pub labels: &'static [&'static str],
    pub scale: f32,
}

pub static LOCATIONS: &[Location] = &[
    Location {
        name: "Japan",
        lat_deg: 35.6895,
        lon_deg: 139.6917,
        labels: &["Maysons Systems Japan", "FASMAC"],
        scale: 3.0,
    },
    Location {
        name: "USA",
        lat_deg: 38.9072,
        lon_deg: -77.0369,
        labels: &["Deloitte and Touche ", "Owens Corning"],
        scale: 3.0,
    },
    Location {
        name: "United Kingdom",
        lat_deg: 51.5074,
        lon_deg: -0.1278,
        labels: &[
            "Genesys Software Inc UK & India",
            "TASMAC University of South Wales UK",
        ],
        scale: 3.0,
    },
    Location {
        name: "India",
        lat_deg: 20.5937,
        lon_deg: 78.9629,
        labels: &[
            "Honeywell",
            "Hughes Network Systems",
            "Owens Corning",
            "Genesys Software Inc (UK & India)",
            "Netrack Enclosures Pvt Ltd",
        ],
        scale: 1.5,
    },
    Location {
        name: "Karnataka",
        lat_deg: 15.3173,
        lon_deg: 75.7139,
        labels: &[
            "Beml Bangalore ",
            "Bhel Bangalore",
            "Jindal steels",
            "Karnataka energy regulation commission",
            "Dept. Of cooperation gvt of Karnataka",
            "KSRTC",
        ],
        scale: 1.2,
    },
    Location {
        name: "Bengaluru",
        lat_deg: 12.9716,
        lon_deg: 77.5946,
        labels: &["MSRIT", "JSS", "SMVIT", "BIT", "BMSCE"],
        scale: 1.0,
    },
];

/// Convert latitude/longitude in degrees to a point on a sphere of `radius`.
///
/// phi is the colatitude (0 at the north pole), theta the azimuth measured
/// from the antimeridian, so (0, 0) lands on the +x axis. No input
/// validation: out-of-range coordinates still map onto the sphere, just not
/// anywhere meaningful.
pub fn project(lat_deg: f32, lon_deg: f32, radius: f32) -> Vec3 {
    let phi = (90.0 - lat_deg).to_radians();
    let theta = (lon_deg + 180.0).to_radians();

    Vec3::new(
        -radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}

/// Hover height of a marker above the sphere surface, proportional to the
/// marker's sprite scale.
pub fn surface_offset(scale: f32) -> f32 {
    BASE_OFFSET * scale / REFERENCE_SCALE
}

/// A marker's resolved spot in globe-local space. Derived once at setup;
/// the globe's yaw transform moves all of them together.
#[derive(Debug, Clone, Copy)]
pub struct MarkerPlacement {
    pub location: usize,
    pub position: Vec3,
    pub scale: f32,
}

pub fn marker_placements(locations: &[Location], radius: f32) -> Vec<MarkerPlacement> {
    locations
        .iter()
        .enumerate()
        .map(|(index, loc)| {
            let on_sphere = project(loc.lat_deg, loc.lon_deg, radius);
            MarkerPlacement {
                location: index,
                position: on_sphere.normalize() * (radius + surface_offset(loc.scale)),
                scale: loc.scale,
            }
        })
        .collect()
}
