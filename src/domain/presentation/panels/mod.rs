mod config_panel;
mod diagnostics_panel;
mod game_over_panel;
mod hud_panel;
mod main_menu_panel;
mod rules_panel;
mod won_panel;

pub use config_panel::show_config_panel;
pub use diagnostics_panel::show_diagnostics_panel;
pub use game_over_panel::show_game_over_panel;
pub use hud_panel::show_hud_panel;
pub use main_menu_panel::{show_main_menu_panel, MenuChoice};
pub use rules_panel::show_rules_panel;
pub use won_panel::show_won_panel;

use bevy_egui::egui::{self, Align2};

/// Fixed, centred window used by every menu screen.
fn menu_window(title: &str) -> egui::Window<'static> {
    egui::Window::new(title)
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .collapsible(false)
        .resizable(false)
}
