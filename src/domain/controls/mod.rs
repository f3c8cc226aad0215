use crate::domain::presentation::HudSettings;
use crate::domain::simulation::{AppState, Player, PlayerCommand};
use crate::MainCamera;
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Keybinds {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub apply_mask: KeyCode,
    pub remove_mask: KeyCode,
    pub heal: KeyCode,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            up: KeyCode::KeyW,
            down: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            apply_mask: KeyCode::KeyF,
            remove_mask: KeyCode::KeyC,
            heal: KeyCode::KeyH,
        }
    }
}

/// Rebindable actions, in the order the config screen lists them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BindAction {
    Up,
    Down,
    Left,
    Right,
    ApplyMask,
    RemoveMask,
    Heal,
}

impl BindAction {
    pub const ALL: [BindAction; 7] = [
        BindAction::Up,
        BindAction::Down,
        BindAction::Left,
        BindAction::Right,
        BindAction::ApplyMask,
        BindAction::RemoveMask,
        BindAction::Heal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BindAction::Up => "Up",
            BindAction::Down => "Down",
            BindAction::Left => "Left",
            BindAction::Right => "Right",
            BindAction::ApplyMask => "Apply mask",
            BindAction::RemoveMask => "Remove mask",
            BindAction::Heal => "Heal",
        }
    }
}

impl Keybinds {
    pub fn key(&self, action: BindAction) -> KeyCode {
        match action {
            BindAction::Up => self.up,
            BindAction::Down => self.down,
            BindAction::Left => self.left,
            BindAction::Right => self.right,
            BindAction::ApplyMask => self.apply_mask,
            BindAction::RemoveMask => self.remove_mask,
            BindAction::Heal => self.heal,
        }
    }

    fn slot(&mut self, action: BindAction) -> &mut KeyCode {
        match action {
            BindAction::Up => &mut self.up,
            BindAction::Down => &mut self.down,
            BindAction::Left => &mut self.left,
            BindAction::Right => &mut self.right,
            BindAction::ApplyMask => &mut self.apply_mask,
            BindAction::RemoveMask => &mut self.remove_mask,
            BindAction::Heal => &mut self.heal,
        }
    }

    /// Binds `key` to `action`. An action already using `key` takes over
    /// the old key so no key ever drives two actions.
    pub fn rebind(&mut self, action: BindAction, key: KeyCode) {
        let old = self.key(action);
        if let Some(other) = BindAction::ALL
            .into_iter()
            .find(|a| *a != action && self.key(*a) == key)
        {
            *self.slot(other) = old;
        }
        *self.slot(action) = key;
    }

    /// Movement axis from the bound keys. Arrow keys always work too.
    pub fn axis(&self, keys: &ButtonInput<KeyCode>) -> Vec2 {
        let held = |bound: KeyCode, arrow: KeyCode| keys.pressed(bound) || keys.pressed(arrow);
        let mut dir = Vec2::ZERO;
        if held(self.up, KeyCode::ArrowUp) {
            dir.y += 1.0;
        }
        if held(self.down, KeyCode::ArrowDown) {
            dir.y -= 1.0;
        }
        if held(self.left, KeyCode::ArrowLeft) {
            dir.x -= 1.0;
        }
        if held(self.right, KeyCode::ArrowRight) {
            dir.x += 1.0;
        }
        dir
    }
}

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybinds>()
            .add_systems(
                Update,
                (player_move, player_abilities, player_fire, camera_controls)
                    .run_if(in_state(AppState::Playing)),
            )
            .add_systems(Update, diagnostics_toggle);
    }
}

fn player_move(
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    mut ev_cmd: EventWriter<PlayerCommand>,
) {
    ev_cmd.send(PlayerCommand::Move(keybinds.axis(&keys)));
}

fn player_abilities(
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    mut ev_cmd: EventWriter<PlayerCommand>,
) {
    if keys.just_pressed(keybinds.apply_mask) {
        ev_cmd.send(PlayerCommand::ApplyMask);
    }
    if keys.just_pressed(keybinds.remove_mask) {
        ev_cmd.send(PlayerCommand::RemoveMask);
    }
    if keys.just_pressed(keybinds.heal) {
        ev_cmd.send(PlayerCommand::Heal);
    }
}

fn player_fire(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    q_cam: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut ev_cmd: EventWriter<PlayerCommand>,
) {
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok((camera, cam_transform)) = q_cam.get_single() else {
        warn!("no main camera, shot skipped");
        return;
    };
    let Some(cursor) = windows.get_single().ok().and_then(Window::cursor_position) else {
        warn!("cursor outside the window, shot skipped");
        return;
    };
    let Some(aim) = camera.viewport_to_world_2d(cam_transform, cursor) else {
        warn!("cursor could not be projected into the world, shot skipped");
        return;
    };
    ev_cmd.send(PlayerCommand::Fire { aim });
}

fn camera_controls(
    mut scroll_evr: EventReader<MouseWheel>,
    mut q_cam: Query<&mut Transform, With<MainCamera>>,
    player_q: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    time: Res<Time>,
) {
    let Ok(mut t) = q_cam.get_single_mut() else {
        return;
    };

    for ev in scroll_evr.read() {
        let zoom = 1.0 - ev.y * 0.05;
        t.scale = (t.scale * zoom).clamp(Vec3::splat(0.01), Vec3::splat(0.05));
    }

    if let Ok(player_transform) = player_q.get_single() {
        let lerp_factor = (1.0 - (-2.0 * time.delta_seconds()).exp()).clamp(0.0, 1.0);
        let new_pos = t
            .translation
            .truncate()
            .lerp(player_transform.translation.truncate(), lerp_factor);
        t.translation.x = new_pos.x;
        t.translation.y = new_pos.y;
    }

    t.translation.z = 999.0;
}

fn diagnostics_toggle(mut hud: ResMut<HudSettings>, keys: Res<ButtonInput<KeyCode>>) {
    if keys.just_pressed(KeyCode::F3) {
        hud.show_diagnostics = !hud.show_diagnostics;
    }
}
