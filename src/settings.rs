//! Game settings
//!
//! Read once at startup from `centipede.json` in the working directory.
//! Missing fields fall back to their defaults; a missing or unreadable file
//! means all defaults. Settings are never written back.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FRAME_DELAY_MS, MAX_MUSHROOMS, MUSHROOM_COUNT};
use crate::renderer::Overlay;
use crate::sim::Rules;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Mushrooms spawned at the start of each game
    pub mushroom_count: usize,
    /// Minimum ticks between shots (0 = no limit)
    pub fire_cooldown_ticks: u32,
    /// Fixed RNG seed for reproducible layouts; random when absent
    pub seed: Option<u64>,
    /// Delay between loop iterations in milliseconds
    pub frame_delay_ms: u64,
    /// Show the score while playing
    pub show_score: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mushroom_count: MUSHROOM_COUNT,
            fire_cooldown_ticks: 0,
            seed: None,
            frame_delay_ms: FRAME_DELAY_MS,
            show_score: true,
        }
    }
}

impl Settings {
    /// Settings file name, looked up in the working directory
    pub const FILE_NAME: &'static str = "centipede.json";

    /// Load from the working directory
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    /// Load from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No {} found, using default settings", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}; using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}; using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Seed to run with: the configured one, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random::<u64>)
    }

    /// Simulation rules derived from these settings.
    /// `mushroom_count` is capped at `MAX_MUSHROOMS`.
    pub fn rules(&self) -> Rules {
        let mushroom_count = if self.mushroom_count > MAX_MUSHROOMS {
            log::warn!(
                "mushroom_count {} exceeds {}; capping",
                self.mushroom_count,
                MAX_MUSHROOMS
            );
            MAX_MUSHROOMS
        } else {
            self.mushroom_count
        };
        Rules {
            mushroom_count,
            fire_cooldown_ticks: self.fire_cooldown_ticks,
        }
    }

    pub fn overlay(&self) -> Overlay {
        Overlay {
            show_score: self.show_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.mushroom_count, 20);
        assert_eq!(settings.fire_cooldown_ticks, 0);
        assert_eq!(settings.frame_delay_ms, 16);
        assert_eq!(settings.seed, None);
        assert_eq!(settings.rules(), Rules::default());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let settings = Settings::from_json(r#"{ "mushroom_count": 35, "seed": 7 }"#).unwrap();
        assert_eq!(settings.mushroom_count, 35);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.resolve_seed(), 7);
        assert!(settings.show_score);
        assert_eq!(settings.rules().mushroom_count, 35);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Settings::from_json("{ mushroom_count: }").is_err());
        assert!(Settings::from_json(r#"{ "mushroom_count": -1 }"#).is_err());
    }

    #[test]
    fn test_oversized_mushroom_count_is_capped() {
        let settings =
            Settings::from_json(r#"{ "mushroom_count": 1152921504606846976, "seed": 1 }"#).unwrap();
        assert_eq!(settings.rules().mushroom_count, MAX_MUSHROOMS);

        let rules = settings.rules();
        let mut state = crate::sim::GameState::with_rules(settings.resolve_seed(), rules);
        state.start_game();
        assert_eq!(state.mushrooms.len(), MAX_MUSHROOMS);
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let name = format!("centipede-settings-bad-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "{ \"mushroom_count\": \"many\" ").unwrap();
        let settings = Settings::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load_from(Path::new("does/not/exist/centipede.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let name = format!("centipede-settings-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, r#"{ "fire_cooldown_ticks": 4, "show_score": false }"#).unwrap();
        let settings = Settings::load_from(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(settings.fire_cooldown_ticks, 4);
        assert!(!settings.overlay().show_score);
    }
}
