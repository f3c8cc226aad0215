use bevy::prelude::*;
use bevy_egui::egui::{self, Color32, FontId, RichText};

use super::menu_window;
use crate::domain::simulation::{AppState, RestartGame};

pub fn show_game_over_panel(
    ctx: &mut egui::Context,
    ev_restart: &mut EventWriter<RestartGame>,
    next_state: &mut NextState<AppState>,
) {
    menu_window("Game Over").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("You Died!")
                    .font(FontId::proportional(40.0))
                    .color(Color32::RED),
            );
            if ui.button("Try Again").clicked() {
                ev_restart.send(RestartGame);
                next_state.set(AppState::Playing);
            }
        });
    });
}
