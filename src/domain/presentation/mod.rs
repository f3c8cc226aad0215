use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin};

use crate::domain::controls::{BindAction, Keybinds};
use crate::domain::simulation::{
    AiTuning, AppState, LastRun, Player, RestartGame, Session, ShapeWithMask, StartGame,
};

pub mod panels;
pub mod render;

use panels::{
    show_config_panel, show_diagnostics_panel, show_game_over_panel, show_hud_panel,
    show_main_menu_panel, show_rules_panel, show_won_panel, MenuChoice,
};

/// Overlay toggles that don't affect the simulation.
#[derive(Resource, Debug, Default)]
pub struct HudSettings {
    pub show_diagnostics: bool,
}

/// `MM:SS:FF`, where `FF` counts sixtieths of a second.
pub fn format_timer(total_seconds: f32) -> String {
    let total = total_seconds.max(0.0);
    let minutes = (total / 60.0).floor() as u32;
    let seconds = (total % 60.0).floor() as u32;
    let sixtieths = ((total - total.floor()) * 60.0).floor() as u32;
    format!("{minutes:02}:{seconds:02}:{sixtieths:02}")
}

pub struct UiPlugin;
impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<HudSettings>()
            .add_systems(Startup, render::load_shape_assets)
            .add_systems(
                Update,
                (render::attach_bullet_visuals, render::sync_shape_visuals),
            )
            .add_systems(Update, main_menu_ui.run_if(in_state(AppState::MainMenu)))
            .add_systems(Update, rules_ui.run_if(in_state(AppState::Rules)))
            .add_systems(Update, config_ui.run_if(in_state(AppState::Config)))
            .add_systems(Update, hud_ui.run_if(in_state(AppState::Playing)))
            .add_systems(Update, game_over_ui.run_if(in_state(AppState::GameOver)))
            .add_systems(Update, won_ui.run_if(in_state(AppState::Won)));
    }
}

fn main_menu_ui(
    mut contexts: EguiContexts,
    session: Res<Session>,
    mut ev_start: EventWriter<StartGame>,
    mut ev_restart: EventWriter<RestartGame>,
    mut next_state: ResMut<NextState<AppState>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    match show_main_menu_panel(contexts.ctx_mut()) {
        Some(MenuChoice::Start) => {
            if session.started {
                ev_restart.send(RestartGame);
            } else {
                ev_start.send(StartGame);
            }
            next_state.set(AppState::Playing);
        }
        Some(MenuChoice::Rules) => next_state.set(AppState::Rules),
        Some(MenuChoice::Config) => next_state.set(AppState::Config),
        Some(MenuChoice::Quit) => {
            ev_exit.send(AppExit::Success);
        }
        None => {}
    }
}

fn rules_ui(mut contexts: EguiContexts, mut next_state: ResMut<NextState<AppState>>) {
    show_rules_panel(contexts.ctx_mut(), &mut next_state);
}

fn config_ui(
    mut contexts: EguiContexts,
    mut tuning: ResMut<AiTuning>,
    mut keybinds: ResMut<Keybinds>,
    mut rebinding: Local<Option<BindAction>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    show_config_panel(
        contexts.ctx_mut(),
        &mut tuning,
        &mut keybinds,
        &mut rebinding,
        &mut next_state,
    );
}

fn hud_ui(
    mut contexts: EguiContexts,
    player_q: Query<(&Player, &ShapeWithMask)>,
    hud: Res<HudSettings>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let ctx = contexts.ctx_mut();
    if let Ok((player, shape)) = player_q.get_single() {
        show_hud_panel(ctx, player, shape);
    }
    if hud.show_diagnostics {
        show_diagnostics_panel(ctx, &diagnostics);
    }
}

fn game_over_ui(
    mut contexts: EguiContexts,
    mut ev_restart: EventWriter<RestartGame>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    show_game_over_panel(contexts.ctx_mut(), &mut ev_restart, &mut next_state);
}

fn won_ui(
    mut contexts: EguiContexts,
    last_run: Res<LastRun>,
    mut ev_restart: EventWriter<RestartGame>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    show_won_panel(
        contexts.ctx_mut(),
        &last_run,
        &mut ev_restart,
        &mut next_state,
    );
}
