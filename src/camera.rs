// camera.rs — 固定机位相机（地球仪自转，相机不动）

use glam::{Mat4, Vec2, Vec3};

pub const EYE: Vec3 = Vec3::new(0.0, 0.0, 40.0);
pub const FOV_Y_DEG: f32 = 50.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 1000.0;

/// A pick ray in view space. The camera sits at the view-space origin
/// looking down -z, so `origin` is always zero here.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub aspect: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self { aspect }
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y)
    }

    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEG.to_radians(), self.aspect, Z_NEAR, Z_FAR)
    }

    /// View-space ray through a window pixel.
    ///
    /// Pixel (0, 0) is the top-left corner; NDC y points up, hence the
    /// flipped sign.
    pub fn view_ray(&self, pixel: Vec2, viewport: Vec2) -> Ray {
        let ndc_x = (pixel.x / viewport.x) * 2.0 - 1.0;
        let ndc_y = -(pixel.y / viewport.y) * 2.0 + 1.0;

        let half_v = (FOV_Y_DEG.to_radians() * 0.5).tan();
        let dir = Vec3::new(ndc_x * half_v * self.aspect, ndc_y * half_v, -1.0);

        Ray {
            origin: Vec3::ZERO,
            dir: dir.normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn center_pixel_looks_straight_ahead() {
        let camera = Camera::new(16.0 / 9.0);
        let ray = camera.view_ray(Vec2::new(640.0, 360.0), Vec2::new(1280.0, 720.0));
        assert!(ray.dir.x.abs() < EPS);
        assert!(ray.dir.y.abs() < EPS);
        assert!((ray.dir.z + 1.0).abs() < EPS);
    }

    #[test]
    fn corner_rays_point_outward() {
        let camera = Camera::new(16.0 / 9.0);
        let viewport = Vec2::new(1280.0, 720.0);

        let top_left = camera.view_ray(Vec2::ZERO, viewport);
        assert!(top_left.dir.x < 0.0);
        assert!(top_left.dir.y > 0.0);

        let bottom_right = camera.view_ray(viewport, viewport);
        assert!(bottom_right.dir.x > 0.0);
        assert!(bottom_right.dir.y < 0.0);
    }

    #[test]
    fn rays_are_normalized() {
        let camera = Camera::new(1.5);
        let viewport = Vec2::new(900.0, 600.0);
        for pixel in [
            Vec2::new(0.0, 0.0),
            Vec2::new(450.0, 300.0),
            Vec2::new(899.0, 1.0),
        ] {
            let ray = camera.view_ray(pixel, viewport);
            assert!((ray.dir.length() - 1.0).abs() < EPS);
            assert!(ray.dir.z < 0.0);
        }
    }

    #[test]
    fn view_puts_the_eye_at_the_origin() {
        let camera = Camera::new(1.0);
        let eye_in_view = camera.view().transform_point3(EYE);
        assert!(eye_in_view.length() < EPS);

        let world_origin = camera.view().transform_point3(Vec3::ZERO);
        assert!((world_origin.z + EYE.z).abs() < EPS);
    }
}
