use bevy::prelude::*;
use serde::Deserialize;

/// Half extents of the playable rectangle, centred on the origin.
pub const ARENA_HALF_EXTENTS: Vec2 = Vec2::new(17.2, 9.5);

pub fn clamp_to_arena(p: Vec2) -> Vec2 {
    p.clamp(-ARENA_HALF_EXTENTS, ARENA_HALF_EXTENTS)
}

#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    pub pool_size: usize,
    pub max_active: usize,
    pub bullet_lifetime: f32,
    /// Allocate a fresh bullet when the pool runs dry.
    pub expand_pool: bool,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            pool_size: 200,
            max_active: 100,
            bullet_lifetime: 0.2,
            expand_pool: true,
        }
    }
}

#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnerSettings {
    pub enabled: bool,
    pub interval: f32,
    /// AIs never spawn closer than this to the camera centre.
    pub safe_distance: f32,
    pub max_ai: usize,
    pub max_attempts: usize,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 2.0,
            safe_distance: 6.0,
            max_ai: 20,
            max_attempts: 30,
        }
    }
}

#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub initial_hp: i32,
    pub move_speed: f32,
    pub bullet_speed: f32,
    pub muzzle_offset: f32,
    pub mask_cost: i32,
    pub heal_hp_cap: i32,
    pub win_score: i32,
    pub loss_score: i32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            initial_hp: 5,
            move_speed: 5.0,
            bullet_speed: 10.0,
            muzzle_offset: 2.0,
            mask_cost: 5,
            heal_hp_cap: 10,
            win_score: 100,
            loss_score: -10,
        }
    }
}

/// Values handed to every AI at spawn time. Changing this resource only
/// affects AIs spawned afterwards.
#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    pub detection_range: f32,
    pub move_speed: f32,
    pub spot_time_min: f32,
    pub spot_time_max: f32,
    pub bullet_speed: f32,
    pub fire_interval: f32,
    pub wander_radius: f32,
    pub wander_interval: f32,
    pub stop_distance: f32,
    pub muzzle_offset: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Normal)
    }
}

impl AiTuning {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let mut tuning = Self {
            detection_range: 6.0,
            move_speed: 3.0,
            spot_time_min: 0.5,
            spot_time_max: 1.5,
            bullet_speed: 20.0,
            fire_interval: 1.0,
            wander_radius: 9.0,
            wander_interval: 3.0,
            stop_distance: 2.0,
            muzzle_offset: 1.5,
        };
        tuning.apply_difficulty(difficulty);
        tuning
    }

    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => self.change(5.0, 3.0, 0.75, 3.0, 10.0, 1.2),
            Difficulty::Normal => self.change(6.0, 3.0, 0.5, 1.5, 20.0, 1.0),
            Difficulty::Hard => self.change(7.0, 3.0, 0.1, 1.0, 25.0, 0.8),
        }
    }

    pub fn change(
        &mut self,
        detection_range: f32,
        move_speed: f32,
        spot_time_min: f32,
        spot_time_max: f32,
        bullet_speed: f32,
        fire_interval: f32,
    ) {
        self.detection_range = detection_range;
        self.move_speed = move_speed;
        self.spot_time_min = spot_time_min;
        self.spot_time_max = spot_time_max;
        self.bullet_speed = bullet_speed;
        self.fire_interval = fire_interval;
    }

    /// The preset these values came from, or `None` for hand-tuned values.
    pub fn matching_preset(&self) -> Option<Difficulty> {
        Difficulty::ALL
            .into_iter()
            .find(|d| Self::from_difficulty(*d).same_preset_values(self))
    }

    fn same_preset_values(&self, other: &Self) -> bool {
        self.detection_range == other.detection_range
            && self.move_speed == other.move_speed
            && self.spot_time_min == other.spot_time_min
            && self.spot_time_max == other.spot_time_max
            && self.bullet_speed == other.bullet_speed
            && self.fire_interval == other.fire_interval
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_scale_with_difficulty() {
        let easy = AiTuning::from_difficulty(Difficulty::Easy);
        let normal = AiTuning::from_difficulty(Difficulty::Normal);
        let hard = AiTuning::from_difficulty(Difficulty::Hard);

        assert!(easy.detection_range < normal.detection_range);
        assert!(normal.detection_range < hard.detection_range);
        assert!(easy.fire_interval > hard.fire_interval);
        assert_eq!(hard.bullet_speed, 25.0);
        assert_eq!(easy.spot_time_max, 3.0);
    }

    #[test]
    fn changing_difficulty_keeps_movement_constants() {
        let mut tuning = AiTuning::default();
        tuning.wander_radius = 4.0;
        tuning.apply_difficulty(Difficulty::Hard);
        assert_eq!(tuning.wander_radius, 4.0);
        assert_eq!(tuning.stop_distance, 2.0);
    }

    #[test]
    fn hand_tuned_values_match_no_preset() {
        for difficulty in Difficulty::ALL {
            assert_eq!(
                AiTuning::from_difficulty(difficulty).matching_preset(),
                Some(difficulty)
            );
        }

        let mut custom = AiTuning::default();
        custom.detection_range = 9.0;
        assert_eq!(custom.matching_preset(), None);

        // movement constants outside the preset table don't matter
        let mut wide = AiTuning::from_difficulty(Difficulty::Hard);
        wide.wander_radius = 2.0;
        assert_eq!(wide.matching_preset(), Some(Difficulty::Hard));
    }

    #[test]
    fn arena_clamp_keeps_inside_points() {
        assert_eq!(clamp_to_arena(Vec2::new(1.0, -2.0)), Vec2::new(1.0, -2.0));
        assert_eq!(
            clamp_to_arena(Vec2::new(100.0, -100.0)),
            Vec2::new(17.2, -9.5)
        );
    }
}
