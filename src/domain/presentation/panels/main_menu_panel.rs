use bevy_egui::egui::{self, FontId, RichText};

use super::menu_window;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuChoice {
    Start,
    Rules,
    Config,
    Quit,
}

pub fn show_main_menu_panel(ctx: &mut egui::Context) -> Option<MenuChoice> {
    let mut choice = None;
    menu_window("Masquerade Arena").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Masquerade Arena").font(FontId::proportional(32.0)));
            ui.add_space(12.0);
            let buttons = [
                ("Start Game", MenuChoice::Start),
                ("Game Rules", MenuChoice::Rules),
                ("Config", MenuChoice::Config),
                ("Quit", MenuChoice::Quit),
            ];
            for (label, option) in buttons {
                if ui.button(label).clicked() {
                    choice = Some(option);
                }
            }
        });
    });
    choice
}
