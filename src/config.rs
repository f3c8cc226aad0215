//! Tuning file support.
//!
//! A JSON file may override any of the tuning resources. Missing sections
//! and fields keep their defaults:
//!
//! ```json
//! { "seed": 7, "spawner": { "max_ai": 10 }, "ai": { "detection_range": 8.0 } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::simulation::{
    AiTuning, Difficulty, GameRng, PlayerSettings, PoolSettings, SpawnerSettings,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {field} in config file {}: durations must be finite and non-negative", .path.display())]
    Invalid { path: PathBuf, field: &'static str },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub seed: Option<u64>,
    pub difficulty: Option<Difficulty>,
    pub pool: PoolSettings,
    pub spawner: SpawnerSettings,
    pub player: PlayerSettings,
    pub ai: AiTuning,
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        match config.invalid_field() {
            Some(field) => Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                field,
            }),
            None => Ok(config),
        }
    }

    /// First duration that can't back a timer, if any.
    pub fn invalid_field(&self) -> Option<&'static str> {
        [
            ("pool.bullet_lifetime", self.pool.bullet_lifetime),
            ("spawner.interval", self.spawner.interval),
            ("ai.spot_time_min", self.ai.spot_time_min),
            ("ai.spot_time_max", self.ai.spot_time_max),
            ("ai.fire_interval", self.ai.fire_interval),
            ("ai.wander_interval", self.ai.wander_interval),
        ]
        .into_iter()
        .find(|(_, secs)| !(secs.is_finite() && *secs >= 0.0))
        .map(|(field, _)| field)
    }

    /// Inserts the tuning resources. A difficulty preset, when given,
    /// overrides the file's AI spawn values.
    pub fn install(self, app: &mut App) {
        let mut ai = self.ai;
        if let Some(preset) = self.difficulty {
            ai.apply_difficulty(preset);
        }
        let rng = self.seed.map(GameRng::seeded).unwrap_or_default();

        app.insert_resource(self.pool)
            .insert_resource(self.spawner)
            .insert_resource(self.player)
            .insert_resource(ai)
            .insert_resource(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: GameConfig = serde_json::from_str(
            r#"{ "seed": 7, "difficulty": "hard", "spawner": { "max_ai": 3 } }"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.difficulty, Some(Difficulty::Hard));
        assert_eq!(config.spawner.max_ai, 3);
        assert_eq!(config.spawner.interval, SpawnerSettings::default().interval);
        assert_eq!(config.pool, PoolSettings::default());
    }

    #[test]
    fn unknown_sections_are_rejected() {
        assert!(serde_json::from_str::<GameConfig>(r#"{ "gravity": 1 }"#).is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = GameConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn negative_duration_is_rejected_at_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "pool": { "bullet_lifetime": -0.5 } }"#)
            .unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "pool.bullet_lifetime",
                ..
            }
        ));
        assert!(err.to_string().contains("pool.bullet_lifetime"));
    }

    #[test]
    fn valid_file_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "spawner": { "interval": 0.5 } }"#).unwrap();
        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.spawner.interval, 0.5);
    }

    #[test]
    fn non_finite_durations_are_flagged() {
        assert_eq!(GameConfig::default().invalid_field(), None);

        let mut config = GameConfig::default();
        config.spawner.interval = f32::NAN;
        assert_eq!(config.invalid_field(), Some("spawner.interval"));

        let mut config = GameConfig::default();
        config.ai.wander_interval = f32::INFINITY;
        assert_eq!(config.invalid_field(), Some("ai.wander_interval"));

        let mut config = GameConfig::default();
        config.ai.spot_time_max = -1.0;
        assert_eq!(config.invalid_field(), Some("ai.spot_time_max"));
    }

    #[test]
    fn preset_overrides_file_ai_values() {
        let config: GameConfig = serde_json::from_str(
            r#"{ "difficulty": "easy", "ai": { "detection_range": 9.0, "stop_distance": 3.0 } }"#,
        )
        .unwrap();
        let mut app = App::new();
        config.install(&mut app);
        let ai = app.world().resource::<AiTuning>();
        assert_eq!(ai.detection_range, 5.0);
        assert_eq!(ai.stop_distance, 3.0);
        assert_eq!(ai.matching_preset(), Some(Difficulty::Easy));
    }

    #[test]
    fn custom_ai_values_without_preset_are_not_labelled_normal() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "ai": { "detection_range": 9.0 } }"#).unwrap();
        let mut app = App::new();
        config.install(&mut app);
        let ai = app.world().resource::<AiTuning>();
        assert_eq!(ai.detection_range, 9.0);
        assert_eq!(ai.matching_preset(), None);
    }
}
