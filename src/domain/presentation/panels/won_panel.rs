use bevy::prelude::*;
use bevy_egui::egui::{self, Color32, FontId, RichText};

use super::menu_window;
use crate::domain::presentation::format_timer;
use crate::domain::simulation::{AppState, LastRun, RestartGame};

pub fn show_won_panel(
    ctx: &mut egui::Context,
    last_run: &LastRun,
    ev_restart: &mut EventWriter<RestartGame>,
    next_state: &mut NextState<AppState>,
) {
    menu_window("You Won").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("You Won!")
                    .font(FontId::proportional(40.0))
                    .color(Color32::GREEN),
            );
            ui.label(format!("Time taken: {}", format_timer(last_run.time_taken)));
            if ui.button("Try Again").clicked() {
                ev_restart.send(RestartGame);
                next_state.set(AppState::Playing);
            }
        });
    });
}
