// Story orchestration: scenes, the director that plays them, and the per-frame
// loop tying input, actors, triggers and messaging together.

mod director;
mod lines;
mod scenes;
mod script;
#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::actors::{Facing, Stage};
use crate::choice::{ChoiceLayout, ChoicePicked, ChoicePresenter, WidgetId};
use crate::config::{CONFIG_PATH, StoryConfig};
use crate::dialogue::{Advance, DialoguePlayer, Line};
use crate::hud::Banner;
use crate::sections::{Character, GameState, Sections};
use crate::signal;
use crate::transition::Screen;
use crate::zones::ZoneRegistry;

pub use director::Director;
pub use scenes::SceneId;
#[cfg(feature = "dev")]
use scenes::SHORTCUTS;

/// Cue handed back when a scripted dialogue closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resume(pub u64);

pub type StoryDialogue = DialoguePlayer<Resume>;
pub type StoryChoices = ChoicePresenter<SceneId>;

pub struct StoryPlugin;

impl Plugin for StoryPlugin {
    fn build(&self, app: &mut App) {
        let config = StoryConfig::load_or_default(CONFIG_PATH);
        app.insert_resource(GameState::default())
            .insert_resource(Stage::story(config.actor_size, config.camera_lerp))
            .insert_resource(ZoneRegistry::story(config.signal_zone_size))
            .insert_resource(StoryDialogue::new(config.reveal_interval))
            .insert_resource(StoryChoices::new(ChoiceLayout::from(&config)))
            .insert_resource(Screen::with_night_filter())
            .insert_resource(Banner::new(config.banner_fade))
            .init_resource::<Director>()
            .insert_resource(config)
            .add_systems(OnEnter(Sections::Story), open_story)
            .add_systems(Update, run_story.run_if(in_state(Sections::Story)));
    }
}

/// Everything a scene may touch.
pub struct Cast<'a> {
    pub state: &'a mut GameState,
    pub stage: &'a mut Stage,
    pub dialogue: &'a mut StoryDialogue,
    pub choices: &'a mut StoryChoices,
    pub screen: &'a mut Screen,
    pub banner: &'a mut Banner,
    pub config: &'a StoryConfig,
}

impl Cast<'_> {
    /// Opens a dialogue and freezes both leads. Returns false for an empty
    /// sequence, in which case nothing changes.
    pub fn say(&mut self, lines: Vec<Line>, cue: Resume) -> bool {
        if !self.dialogue.start(lines, Some(cue)) {
            return false;
        }
        self.state.dialogue_active = true;
        self.stage.stop_all();
        true
    }

    /// Confirm input for the dialogue box. Hands back the cue when the last
    /// line is dismissed.
    pub fn confirm(&mut self) -> Option<Resume> {
        match self.dialogue.advance() {
            Advance::Closed(cue) => {
                self.state.dialogue_active = false;
                cue
            }
            Advance::Ignored | Advance::Revealed | Advance::NextLine => None,
        }
    }

    /// Hands control to `character`, panning the camera over or cutting to it.
    pub fn swap_focus(&mut self, character: Character, pan: bool) {
        let previous = self.state.active();
        self.stage.stop(previous.actor());
        self.state.set_active(character);
        if pan {
            self.stage.pan_to(character.actor(), self.config.camera_pan);
        } else {
            self.stage.follow(character.actor());
        }
        info!("Now playing as {:?}", character);
    }
}

/// One frame of player input.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub direction: Option<Facing>,
    pub confirm: bool,
    pub pick: Option<WidgetId>,
    pub shortcut: Option<SceneId>,
}

/// Advances the whole story by `dt`: input, movement, typing, fades, the
/// running scene, reception, then triggers.
pub fn advance_story(
    cast: &mut Cast,
    director: &mut Director,
    zones: &mut ZoneRegistry,
    controls: &Controls,
    dt: f32,
) {
    if let Some(scene) = controls.shortcut {
        director.jump(scene, cast);
    }
    if let Some(widget) = controls.pick {
        director.pick(widget, cast);
    }
    if controls.confirm {
        director.confirm(cast);
    }

    if !cast.state.dialogue_active {
        let active = cast.state.active().actor();
        let npc = cast.state.active().other().actor();
        cast.stage.drive(active, controls.direction, cast.config.walk_speed);
        if cast.state.npc_follows() {
            cast.stage.pursue(npc, active, cast.config.follow_speed, cast.config.follow_distance);
        } else if !cast.stage.is_walking(npc) {
            cast.stage.stop(npc);
        }
    }

    let finished = cast.stage.tick(dt);
    cast.dialogue.tick(dt);
    cast.screen.tick(dt);
    cast.banner.tick(dt);
    director.tick(dt, cast, &finished);

    signal::refresh(cast.state, zones, cast.stage);
    if director.is_busy() || cast.state.is_finished() {
        return;
    }
    let next = signal::poll(cast.state).or_else(|| zones.evaluate(cast.stage, cast.state));
    if let Some(scene) = next {
        director.begin(scene, cast);
    }
}

fn open_story(mut banner: ResMut<Banner>) {
    banner.show("Go to the school", 4.0);
    info!("Story started");
}

#[cfg(feature = "dev")]
const SHORTCUT_KEYS: [KeyCode; 7] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
];

fn read_controls(keyboard: &ButtonInput<KeyCode>, picks: &mut MessageReader<ChoicePicked>) -> Controls {
    let direction = [
        (KeyCode::ArrowLeft, Facing::Left),
        (KeyCode::ArrowRight, Facing::Right),
        (KeyCode::ArrowUp, Facing::Up),
        (KeyCode::ArrowDown, Facing::Down),
    ]
    .into_iter()
    .find(|(key, _)| keyboard.pressed(*key))
    .map(|(_, facing)| facing);

    #[cfg(feature = "dev")]
    let shortcut = SHORTCUT_KEYS
        .iter()
        .position(|key| keyboard.just_pressed(*key))
        .map(|index| SHORTCUTS[index]);
    #[cfg(not(feature = "dev"))]
    let shortcut = None;

    Controls {
        direction,
        confirm: keyboard.just_pressed(KeyCode::Space),
        pick: picks.read().last().map(|ChoicePicked(widget)| *widget),
        shortcut,
    }
}

#[allow(clippy::too_many_arguments)]
fn run_story(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut picks: MessageReader<ChoicePicked>,
    config: Res<StoryConfig>,
    mut state: ResMut<GameState>,
    mut stage: ResMut<Stage>,
    mut dialogue: ResMut<StoryDialogue>,
    mut choices: ResMut<StoryChoices>,
    mut screen: ResMut<Screen>,
    mut banner: ResMut<Banner>,
    mut director: ResMut<Director>,
    mut zones: ResMut<ZoneRegistry>,
) {
    let controls = read_controls(&keyboard, &mut picks);
    let mut cast = Cast {
        state: &mut state,
        stage: &mut stage,
        dialogue: &mut dialogue,
        choices: &mut choices,
        screen: &mut screen,
        banner: &mut banner,
        config: &config,
    };
    advance_story(&mut cast, &mut director, &mut zones, &controls, time.delta_secs());
}
