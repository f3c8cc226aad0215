//! Sound effects and background music.
//!
//! Effects are requested through [`SoundCue`] events so the simulation never
//! touches the asset server. Music tracks are every file under
//! `sounds/music`; one plays at a time and the next starts once the previous
//! entity despawns.

use bevy::asset::{LoadState, LoadedFolder};
use bevy::audio::Volume;
use bevy::prelude::*;
use rand::Rng;

use crate::domain::simulation::{GameRng, SoundCue, SoundEffect};

pub const BGM_VOLUME: f32 = 0.05;

#[derive(Resource)]
pub struct SoundEffects {
    pub fire: Handle<AudioSource>,
    pub killed: Handle<AudioSource>,
    pub mask_break: Handle<AudioSource>,
}

impl SoundEffects {
    pub fn handle(&self, effect: SoundEffect) -> &Handle<AudioSource> {
        match effect {
            SoundEffect::Fire => &self.fire,
            SoundEffect::Killed => &self.killed,
            SoundEffect::MaskBreak => &self.mask_break,
        }
    }
}

#[derive(Resource)]
pub struct BgmPlayer {
    folder: Handle<LoadedFolder>,
    tracks: Vec<Handle<AudioSource>>,
    last: Option<usize>,
    pub allow_repeat: bool,
    warned_empty: bool,
}

/// Marks the entity currently playing music.
#[derive(Component)]
pub struct BgmTrack;

/// Picks the next track index. Avoids `last` unless repeats are allowed or
/// there is only one track.
pub fn pick_track(
    len: usize,
    last: Option<usize>,
    allow_repeat: bool,
    rng: &mut impl Rng,
) -> Option<usize> {
    match (len, last) {
        (0, _) => None,
        (1, _) => Some(0),
        (_, Some(last)) if !allow_repeat && last < len => {
            let roll = rng.gen_range(0..len - 1);
            Some(if roll >= last { roll + 1 } else { roll })
        }
        _ => Some(rng.gen_range(0..len)),
    }
}

pub struct SoundPlugin;
impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_sounds)
            .add_systems(Update, (play_sound_cues, collect_tracks, play_next_track));
    }
}

fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(SoundEffects {
        fire: asset_server.load("sounds/fire.ogg"),
        killed: asset_server.load("sounds/killed.ogg"),
        mask_break: asset_server.load("sounds/mask_break.ogg"),
    });
    commands.insert_resource(BgmPlayer {
        folder: asset_server.load_folder("sounds/music"),
        tracks: Vec::new(),
        last: None,
        allow_repeat: false,
        warned_empty: false,
    });
}

fn play_sound_cues(
    mut commands: Commands,
    mut cues: EventReader<SoundCue>,
    effects: Option<Res<SoundEffects>>,
    asset_server: Res<AssetServer>,
) {
    let Some(effects) = effects else {
        cues.clear();
        return;
    };
    for cue in cues.read() {
        let handle = effects.handle(cue.effect);
        if matches!(asset_server.get_load_state(handle.id()), Some(LoadState::Failed(_))) {
            warn!("{:?} clip failed to load, skipping", cue.effect);
            continue;
        }
        commands.spawn(AudioBundle {
            source: handle.clone(),
            settings: PlaybackSettings::DESPAWN.with_volume(Volume::new(cue.volume)),
        });
    }
}

fn collect_tracks(
    mut bgm: ResMut<BgmPlayer>,
    folders: Res<Assets<LoadedFolder>>,
    asset_server: Res<AssetServer>,
) {
    if !bgm.tracks.is_empty() || bgm.warned_empty {
        return;
    }
    if matches!(asset_server.get_load_state(bgm.folder.id()), Some(LoadState::Failed(_))) {
        warn!("music folder failed to load, no background music");
        bgm.warned_empty = true;
        return;
    }
    let Some(folder) = folders.get(&bgm.folder) else {
        return;
    };
    let tracks: Vec<Handle<AudioSource>> = folder
        .handles
        .iter()
        .filter_map(|h| h.clone().try_typed::<AudioSource>().ok())
        .collect();
    if tracks.is_empty() {
        warn!("no music tracks under sounds/music");
        bgm.warned_empty = true;
        return;
    }
    info!("loaded {} music tracks", tracks.len());
    bgm.tracks = tracks;
}

fn play_next_track(
    mut commands: Commands,
    mut bgm: ResMut<BgmPlayer>,
    mut rng: ResMut<GameRng>,
    playing: Query<(), With<BgmTrack>>,
) {
    if !playing.is_empty() {
        return;
    }
    let Some(index) = pick_track(bgm.tracks.len(), bgm.last, bgm.allow_repeat, &mut rng.0)
    else {
        return;
    };
    bgm.last = Some(index);
    debug!("playing music track {index}");
    commands.spawn((
        AudioBundle {
            source: bgm.tracks[index].clone(),
            settings: PlaybackSettings::DESPAWN.with_volume(Volume::new(BGM_VOLUME)),
        },
        BgmTrack,
    ));
}
