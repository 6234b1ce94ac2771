// assets.rs — 纹理后台加载与内置占位图

use image::io::Reader as ImageReader;
use image::{Rgba, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

pub const EARTH_TEXTURE: &str = "earth-texture.jpg";
pub const CLOUDS_TEXTURE: &str = "clouds-texture.jpg";
pub const MARKER_ICON: &str = "marker-icon.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
    Earth,
    Clouds,
    MarkerIcon,
}

pub struct LoadedTexture {
    pub slot: TextureSlot,
    pub image: RgbaImage,
}

/// Decode one texture off the UI thread and hand it back over the channel.
/// On failure nothing is sent; the slot keeps its placeholder and the scene
/// keeps running.
pub fn start_load(slot: TextureSlot, path: PathBuf, tx: Sender<LoadedTexture>) {
    thread::spawn(move || {
        log::info!("loading {:?} texture from {:?}", slot, path);

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                log::error!("cannot open {:?}: {}", path, e);
                return;
            }
        };
        let reader = BufReader::new(file);

        let img_result = ImageReader::new(reader)
            .with_guessed_format()
            .map_err(image::ImageError::IoError)
            .and_then(|mut r| {
                r.no_limits();
                r.decode()
            });

        match img_result {
            Ok(img) => {
                let rgba = img.to_rgba8();
                log::info!(
                    "{:?} texture ready ({}x{})",
                    slot,
                    rgba.width(),
                    rgba.height()
                );
                if tx.send(LoadedTexture { slot, image: rgba }).is_err() {
                    log::warn!("viewer went away before the {:?} texture arrived", slot);
                }
            }
            Err(e) => log::error!("cannot decode {:?}: {}", path, e),
        }
    });
}

/// What a slot shows until (or instead of) its file: plain white for the
/// globe so the tint reads, black for the clouds (a zero green channel
/// samples as fully transparent), and a drawn pin for markers.
pub fn placeholder(slot: TextureSlot) -> RgbaImage {
    match slot {
        TextureSlot::Earth => RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255])),
        TextureSlot::Clouds => RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])),
        TextureSlot::MarkerIcon => pin_icon(64),
    }
}

/// A red map pin with a white dot: round head tapering to a point at the
/// bottom of the tile.
pub fn pin_icon(size: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));
    let s = size as f32;
    let head_x = s * 0.5;
    let head_y = s * 0.35;
    let head_r = s * 0.3;
    let dot_r = s * 0.12;
    let tip_y = s * 0.95;

    let red = Rgba([250, 82, 82, 255]);
    let white = Rgba([255, 255, 255, 255]);

    for y in 0..size {
        for x in 0..size {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;
            let dx = px - head_x;
            let dy = py - head_y;
            let from_head = (dx * dx + dy * dy).sqrt();

            // 头部圆与底部尖点之间的锥形
            let in_tail = py > head_y && py <= tip_y && {
                let t = (py - head_y) / (tip_y - head_y);
                dx.abs() <= head_r * (1.0 - t)
            };

            if from_head <= head_r || in_tail {
                let color = if from_head <= dot_r { white } else { red };
                img.put_pixel(x, y, color);
            }
        }
    }

    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::time::Duration;

    #[test]
    fn placeholders_have_the_right_shades() {
        let earth = placeholder(TextureSlot::Earth);
        assert_eq!(earth.dimensions(), (1, 1));
        assert_eq!(earth.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));

        let clouds = placeholder(TextureSlot::Clouds);
        assert_eq!(clouds.dimensions(), (1, 1));
        assert_eq!(clouds.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn pin_icon_is_a_red_pin_on_a_transparent_tile() {
        let icon = pin_icon(64);
        assert_eq!(icon.dimensions(), (64, 64));

        // Corners stay empty, the head center is the white dot, the ring
        // around it and the tail are red.
        assert_eq!(icon.get_pixel(0, 0).0[3], 0);
        assert_eq!(icon.get_pixel(63, 63).0[3], 0);
        assert_eq!(icon.get_pixel(32, 22), &Rgba([255, 255, 255, 255]));
        assert_eq!(icon.get_pixel(32, 38), &Rgba([250, 82, 82, 255]));
        assert_eq!(icon.get_pixel(32, 58), &Rgba([250, 82, 82, 255]));
    }

    #[test]
    fn pin_icon_is_left_right_symmetric() {
        let size = 48;
        let icon = pin_icon(size);
        for y in 0..size {
            for x in 0..size {
                assert_eq!(
                    icon.get_pixel(x, y),
                    icon.get_pixel(size - 1 - x, y),
                    "asymmetry at ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn loader_delivers_a_decoded_image() {
        let dir = std::env::temp_dir().join("globe_viewer_asset_test");
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("tiny.png");
        RgbaImage::from_pixel(2, 3, Rgba([9, 9, 9, 255]))
            .save(&path)
            .expect("write test texture");

        let (tx, rx) = channel();
        start_load(TextureSlot::Earth, path, tx);

        let loaded = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("texture should arrive");
        assert_eq!(loaded.slot, TextureSlot::Earth);
        assert_eq!(loaded.image.dimensions(), (2, 3));
    }

    #[test]
    fn loader_stays_silent_on_a_missing_file() {
        let (tx, rx) = channel();
        start_load(
            TextureSlot::Clouds,
            PathBuf::from("/definitely/not/here.jpg"),
            tx,
        );

        assert!(rx.recv_timeout(Duration::from_millis(500)).is_err());
    }
}
