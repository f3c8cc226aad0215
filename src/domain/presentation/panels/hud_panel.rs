use bevy_egui::egui::{self, Align2};

use crate::domain::presentation::format_timer;
use crate::domain::simulation::{Player, ShapeWithMask};

pub fn show_hud_panel(ctx: &mut egui::Context, player: &Player, shape: &ShapeWithMask) {
    egui::Window::new("Status")
        .anchor(Align2::LEFT_TOP, [10.0, 10.0])
        .title_bar(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Score: {}", player.score));
            ui.label(format!("HP: {}", player.hp));
            ui.label(format!("Time: {}", format_timer(player.elapsed)));
            ui.separator();
            ui.label(format!("You are a {:?}", shape.true_shape()));
            match shape.mask() {
                Some(mask) => ui.label(format!("Masked as {mask:?}")),
                None => ui.label("No mask"),
            };
        });
}
