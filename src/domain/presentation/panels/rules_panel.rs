use bevy::prelude::*;
use bevy_egui::egui;

use super::menu_window;
use crate::domain::simulation::AppState;

const RULES: &[&str] = &[
    "Every fighter is a circle, a square, or a triangle.",
    "AIs hunt shapes different from their own, but they judge by what you show.",
    "Kill a different shape: +1. Kill while masked: +2. Kill your own kind: -1.",
    "Press F to buy a mask for 5 points. Press C to take it off.",
    "If a witness wearing your shape sees you kill, your mask breaks.",
    "Press H to trade 1 point for 1 HP, up to 10 HP.",
    "Reach 100 points to win. Drop to -10 points or 0 HP and you lose.",
    "WASD or arrows to move, left click to shoot, F3 for diagnostics.",
];

pub fn show_rules_panel(ctx: &mut egui::Context, next_state: &mut NextState<AppState>) {
    menu_window("Game Rules").show(ctx, |ui| {
        for line in RULES {
            ui.label(*line);
        }
        ui.separator();
        if ui.button("Back").clicked() {
            next_state.set(AppState::MainMenu);
        }
    });
}
