// settings.rs — 可选的 assets/settings.json 运行参数
//
// Assets directory selection:
// - CLI: --assets <dir>
// - Env: GLOBE_ASSETS
// - Default: <exe_dir>/assets, else ./assets (dev working dir)
//
// A missing or malformed settings file never stops the viewer; it logs and
// falls back to the built-in values.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::interaction::{DRAG_SENSITIVITY, SPIN_INCREMENT};

pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub drag_sensitivity: f32,
    pub spin_speed: f32,
    pub vsync: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: DRAG_SENSITIVITY,
            spin_speed: SPIN_INCREMENT,
            vsync: true,
        }
    }
}

impl ViewerSettings {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Locate the assets directory. Explicit choices (flag, env) are taken at
/// face value; the fallback locations must actually exist.
pub fn resolve_assets_dir() -> Option<PathBuf> {
    resolve_from(std::env::args().skip(1), std::env::var("GLOBE_ASSETS").ok())
}

fn resolve_from(args: impl Iterator<Item = String>, env: Option<String>) -> Option<PathBuf> {
    let mut it = args;
    while let Some(a) = it.next() {
        if a == "--assets" {
            if let Some(v) = it.next() {
                return Some(PathBuf::from(v));
            }
        }
    }

    if let Some(v) = env {
        if !v.trim().is_empty() {
            return Some(PathBuf::from(v));
        }
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join("assets");
            if p.exists() {
                return Some(p);
            }
        }
    }

    let p = PathBuf::from("assets");
    if p.exists() {
        return Some(p);
    }

    None
}

pub fn load(assets_dir: Option<&Path>) -> ViewerSettings {
    let Some(dir) = assets_dir else {
        return ViewerSettings::default();
    };

    let path = dir.join(SETTINGS_FILE);
    let text = match std::fs::read_to_string(&path) {
        Ok(t) => t,
        // 没有配置文件是常态
        Err(_) => return ViewerSettings::default(),
    };

    match ViewerSettings::from_json(&text) {
        Ok(s) => {
            log::info!("settings loaded from {}", path.display());
            s
        }
        Err(e) => {
            log::warn!("ignoring malformed {}: {e}", path.display());
            ViewerSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn defaults_match_the_interaction_constants() {
        let s = ViewerSettings::default();
        assert_eq!(s.drag_sensitivity, DRAG_SENSITIVITY);
        assert_eq!(s.spin_speed, SPIN_INCREMENT);
        assert!(s.vsync);
    }

    #[test]
    fn parses_a_full_settings_file() {
        let s = ViewerSettings::from_json(
            r#"{ "drag_sensitivity": 0.02, "spin_speed": 0.001, "vsync": false }"#,
        )
        .expect("parse");
        assert_eq!(s.drag_sensitivity, 0.02);
        assert_eq!(s.spin_speed, 0.001);
        assert!(!s.vsync);
    }

    #[test]
    fn missing_fields_keep_their_defaults() {
        let s = ViewerSettings::from_json(r#"{ "vsync": false }"#).expect("parse");
        assert_eq!(s.drag_sensitivity, DRAG_SENSITIVITY);
        assert_eq!(s.spin_speed, SPIN_INCREMENT);
        assert!(!s.vsync);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ViewerSettings::from_json("{ spin_speed: fast }").is_err());
    }

    #[test]
    fn cli_flag_beats_the_environment() {
        let dir = resolve_from(args(&["--assets", "/tmp/globe-assets"]), Some("/elsewhere".into()));
        assert_eq!(dir, Some(PathBuf::from("/tmp/globe-assets")));
    }

    #[test]
    fn environment_is_used_without_a_flag() {
        let dir = resolve_from(args(&["--verbose"]), Some("/from-env".into()));
        assert_eq!(dir, Some(PathBuf::from("/from-env")));
    }

    #[test]
    fn dangling_flag_and_blank_env_fall_through() {
        // Neither form names a directory, so resolution moves on to the
        // on-disk fallbacks (whatever this machine has).
        let dir = resolve_from(args(&["--assets"]), Some("   ".into()));
        assert_ne!(dir, Some(PathBuf::from("   ")));
    }
}
