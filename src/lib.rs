pub mod config;
pub mod domain;

use bevy::prelude::*;

pub use domain::{InputPlugin, SimPlugin, SoundPlugin, UiPlugin};

/// Marks the camera that follows the player. Its centre is also the
/// reference point for the AI spawner's safe distance.
#[derive(Component)]
pub struct MainCamera;
