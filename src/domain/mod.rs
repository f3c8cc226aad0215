//! Domain modules split by discipline so teams can work independently.
//! - `audio`: background music and one-shot effects.
//! - `controls`: input, camera, and player intents.
//! - `presentation`: menus, HUD, and shape rendering.
//! - `simulation`: combat, AI, pooling, and authoritative game state.

pub mod audio;
pub mod controls;
pub mod presentation;
pub mod simulation;

pub use audio::SoundPlugin;
pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use simulation::{AppState, SimPlugin};
