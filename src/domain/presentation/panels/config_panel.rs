use bevy::prelude::*;
use bevy_egui::egui;

use super::menu_window;
use crate::domain::controls::{BindAction, Keybinds};
use crate::domain::simulation::{AiTuning, AppState, Difficulty};

pub fn show_config_panel(
    ctx: &mut egui::Context,
    tuning: &mut AiTuning,
    keybinds: &mut Keybinds,
    rebinding: &mut Option<BindAction>,
    next_state: &mut NextState<AppState>,
) {
    let mut pressed_key = None;
    ctx.input(|i| {
        for event in &i.events {
            if let egui::Event::Key {
                key, pressed: true, ..
            } = event
            {
                pressed_key = egui_to_bevy_keycode(*key);
            }
        }
    });

    menu_window("Config").show(ctx, |ui| {
        let current = tuning.matching_preset();
        let mut selected = current;
        egui::ComboBox::from_label("Difficulty")
            .selected_text(current.map_or("Custom", Difficulty::label))
            .show_ui(ui, |ui| {
                for option in Difficulty::ALL {
                    ui.selectable_value(&mut selected, Some(option), option.label());
                }
            });
        if let Some(difficulty) = selected.filter(|_| selected != current) {
            tuning.apply_difficulty(difficulty);
            info!(
                "difficulty {}: detection {} move {} spot {}..{} bullet {} fire every {}s",
                difficulty.label(),
                tuning.detection_range,
                tuning.move_speed,
                tuning.spot_time_min,
                tuning.spot_time_max,
                tuning.bullet_speed,
                tuning.fire_interval,
            );
        }

        ui.separator();
        ui.label("Keybinds");
        for action in BindAction::ALL {
            ui.horizontal(|ui| {
                ui.label(action.label());
                let text = if *rebinding == Some(action) {
                    "Press a key...".to_string()
                } else {
                    format!("{:?}", keybinds.key(action))
                };
                if ui.button(text).clicked() {
                    *rebinding = Some(action);
                }
            });
        }

        if let (Some(action), Some(code)) = (*rebinding, pressed_key) {
            debug!("{} bound to {code:?}", action.label());
            keybinds.rebind(action, code);
            *rebinding = None;
        }

        ui.separator();
        if ui.button("Back").clicked() {
            *rebinding = None;
            next_state.set(AppState::MainMenu);
        }
    });
}

fn egui_to_bevy_keycode(key: egui::Key) -> Option<KeyCode> {
    use egui::Key;
    let code = match key {
        Key::A => KeyCode::KeyA,
        Key::B => KeyCode::KeyB,
        Key::C => KeyCode::KeyC,
        Key::D => KeyCode::KeyD,
        Key::E => KeyCode::KeyE,
        Key::F => KeyCode::KeyF,
        Key::G => KeyCode::KeyG,
        Key::H => KeyCode::KeyH,
        Key::I => KeyCode::KeyI,
        Key::J => KeyCode::KeyJ,
        Key::K => KeyCode::KeyK,
        Key::L => KeyCode::KeyL,
        Key::M => KeyCode::KeyM,
        Key::N => KeyCode::KeyN,
        Key::O => KeyCode::KeyO,
        Key::P => KeyCode::KeyP,
        Key::Q => KeyCode::KeyQ,
        Key::R => KeyCode::KeyR,
        Key::S => KeyCode::KeyS,
        Key::T => KeyCode::KeyT,
        Key::U => KeyCode::KeyU,
        Key::V => KeyCode::KeyV,
        Key::W => KeyCode::KeyW,
        Key::X => KeyCode::KeyX,
        Key::Y => KeyCode::KeyY,
        Key::Z => KeyCode::KeyZ,
        Key::Space => KeyCode::Space,
        Key::Enter => KeyCode::Enter,
        Key::Tab => KeyCode::Tab,
        _ => return None,
    };
    Some(code)
}
