//! Audio domain: fire-and-forget one-shot cues.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use std::collections::HashMap;

/// Named one-shot sources, loaded once at startup.
#[derive(Resource, Debug, Default)]
pub struct CueBank {
    cues: HashMap<&'static str, Handle<AudioSource>>,
}

impl CueBank {
    pub fn insert(&mut self, id: &'static str, handle: Handle<AudioSource>) {
        self.cues.insert(id, handle);
    }

    pub fn get(&self, id: &str) -> Option<&Handle<AudioSource>> {
        self.cues.get(id)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

/// One-shot playback request; nothing ever waits on it.
#[derive(Debug)]
pub struct CueRequest {
    pub id: &'static str,
}

impl Message for CueRequest {}

const CUE_PATHS: &[(&str, &str)] = &[
    ("morph", "audio/morph.ogg"),
    ("form_terry", "audio/form_terry.ogg"),
    ("form_frog", "audio/form_frog.ogg"),
    ("form_bulldozer", "audio/form_bulldozer.ogg"),
    ("form_ball", "audio/form_ball.ogg"),
    ("frog_jump", "audio/frog_jump.ogg"),
    ("frog_tongue", "audio/frog_tongue.ogg"),
    ("dozer_engage", "audio/dozer_engage.ogg"),
    ("dozer_release", "audio/dozer_release.ogg"),
    ("ball_jump", "audio/ball_jump.ogg"),
    ("ball_double_jump", "audio/ball_double_jump.ogg"),
    ("recharge", "audio/recharge.ogg"),
    ("meditate_start", "audio/meditate_start.ogg"),
    ("meditate_complete", "audio/meditate_complete.ogg"),
    ("select_locked", "audio/select_locked.ogg"),
];

pub(crate) fn load_cue_bank(asset_server: Res<AssetServer>, mut commands: Commands) {
    let mut bank = CueBank::default();
    for (id, path) in CUE_PATHS {
        bank.insert(id, asset_server.load(*path));
    }
    info!("[AUDIO] cue bank loaded with {} cues", bank.len());
    commands.insert_resource(bank);
}

pub(crate) fn play_cues(
    mut requests: MessageReader<CueRequest>,
    bank: Res<CueBank>,
    mut commands: Commands,
) {
    for request in requests.read() {
        match bank.get(request.id) {
            Some(handle) => {
                commands.spawn((AudioPlayer(handle.clone()), PlaybackSettings::DESPAWN));
            }
            None => debug!("[AUDIO] unknown cue '{}'", request.id),
        }
    }
}

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CueRequest>()
            .add_systems(Startup, load_cue_bank)
            .add_systems(Update, play_cues);
    }
}
