use bevy::prelude::*;

use super::scenes::SHORTCUTS;
use super::*;
use crate::actors::ActorId;
use crate::dialogue::Phase;
use crate::sections::{Mission, SubMission};

const DT: f32 = 1.0 / 60.0;

/// The whole story without an `App`: owned resources stepped at 60 fps.
struct Harness {
    config: StoryConfig,
    state: GameState,
    stage: Stage,
    dialogue: StoryDialogue,
    choices: StoryChoices,
    screen: Screen,
    banner: Banner,
    director: Director,
    zones: ZoneRegistry,
}

impl Harness {
    fn new() -> Self {
        let config = StoryConfig::default();
        Self {
            state: GameState::default(),
            stage: Stage::story(config.actor_size, config.camera_lerp),
            dialogue: StoryDialogue::new(config.reveal_interval),
            choices: StoryChoices::new(ChoiceLayout::from(&config)),
            screen: Screen::with_night_filter(),
            banner: Banner::new(config.banner_fade),
            director: Director::default(),
            zones: ZoneRegistry::story(config.signal_zone_size),
            config,
        }
    }

    fn with_cast(&mut self, f: impl FnOnce(&mut Director, &mut Cast)) {
        let mut cast = Cast {
            state: &mut self.state,
            stage: &mut self.stage,
            dialogue: &mut self.dialogue,
            choices: &mut self.choices,
            screen: &mut self.screen,
            banner: &mut self.banner,
            config: &self.config,
        };
        f(&mut self.director, &mut cast);
    }

    fn step(&mut self, controls: Controls) {
        let mut cast = Cast {
            state: &mut self.state,
            stage: &mut self.stage,
            dialogue: &mut self.dialogue,
            choices: &mut self.choices,
            screen: &mut self.screen,
            banner: &mut self.banner,
            config: &self.config,
        };
        advance_story(&mut cast, &mut self.director, &mut self.zones, &controls, DT);
    }

    fn idle(&mut self, seconds: f32) {
        for _ in 0..(seconds * 60.0).round() as usize {
            self.step(Controls::default());
        }
    }

    fn confirm(&mut self) {
        self.step(Controls {
            confirm: true,
            ..default()
        });
    }

    fn shortcut(&mut self, scene: SceneId) {
        self.step(Controls {
            shortcut: Some(scene),
            ..default()
        });
    }

    fn pick(&mut self, label: &str) {
        let widget = self
            .choices
            .widgets()
            .iter()
            .find(|widget| widget.label == label)
            .map(|widget| widget.id)
            .unwrap_or_else(|| panic!("no option {label:?}"));
        self.step(Controls {
            pick: Some(widget),
            ..default()
        });
    }

    /// Puts `actor` at a spot and runs one frame. Returns the scene that
    /// started because of it.
    fn walk_in(&mut self, actor: ActorId, x: f32, y: f32) -> SceneId {
        let before = self.director.history().len();
        self.stage.place(actor, Vec2::new(x, y));
        self.step(Controls::default());
        *self
            .director
            .history()
            .get(before)
            .unwrap_or_else(|| panic!("nothing fired with {actor:?} at ({x}, {y})"))
    }

    /// Confirms until the dialogue box closes. Returns the lines dismissed.
    fn read_all(&mut self) -> usize {
        let mut dismissed = 0;
        for _ in 0..1000 {
            if !self.dialogue.is_open() {
                return dismissed;
            }
            if self.dialogue.phase() == Phase::LineComplete {
                dismissed += 1;
            }
            self.confirm();
        }
        panic!("dialogue never closed");
    }

    /// Runs frames until the director is idle or waiting on the player.
    fn settle(&mut self) {
        for _ in 0..60 * 60 {
            if !self.director.is_busy() || self.dialogue.is_open() || self.choices.is_open() {
                return;
            }
            self.step(Controls::default());
        }
        panic!("stalled in {:?}", self.director.scene());
    }

    /// Reads every dialogue until the director is idle or a menu is up.
    /// Returns the lines read.
    fn play_out(&mut self) -> usize {
        let mut read = 0;
        loop {
            self.settle();
            if !self.dialogue.is_open() {
                return read;
            }
            read += self.read_all();
        }
    }

    fn times_played(&self, scene: SceneId) -> usize {
        self.director.history().iter().filter(|s| **s == scene).count()
    }
}

#[test]
fn reaching_school_hands_over_to_alexandre() {
    let mut h = Harness::new();
    assert_eq!(h.walk_in(ActorId::Ana, 2930.0, 450.0), SceneId::SwitchToAlexandre);
    assert!(!h.director.is_busy());
    assert!(h.state.is(Mission::Meet));
    assert_eq!(h.state.active(), Character::Alexandre);
    assert_eq!(h.banner.message(), "Go talk to Ana");

    // Control arrives with the camera.
    assert!(!h.stage.actor(ActorId::Alexandre).movable);
    h.idle(1.0);
    assert!(h.stage.actor(ActorId::Alexandre).movable);
    assert!(!h.stage.actor(ActorId::Ana).movable);
}

#[test]
fn first_meeting_sends_them_to_class() {
    let mut h = Harness::new();
    h.walk_in(ActorId::Ana, 2930.0, 450.0);
    h.idle(1.0);
    assert_eq!(h.walk_in(ActorId::Alexandre, 2950.0, 450.0), SceneId::FirstMeeting);
    assert!(h.state.dialogue_active);

    assert_eq!(h.play_out(), 17);
    assert_eq!(h.state.affection, 5);
    assert!(h.state.is_at(Mission::GoToClassroom, SubMission::HeGoesFirst));
    assert!(!h.state.dialogue_active);
    assert!(h.state.has_met());
}

#[test]
fn rapid_confirms_never_skip_a_line() {
    let mut h = Harness::new();
    h.walk_in(ActorId::Ana, 2930.0, 450.0);
    h.walk_in(ActorId::Alexandre, 2950.0, 450.0);
    assert_eq!(h.dialogue.phase(), Phase::Typing);
    assert_eq!(h.dialogue.line_index(), 0);

    h.confirm();
    assert_eq!(h.dialogue.phase(), Phase::LineComplete);
    assert_eq!(h.dialogue.line_index(), 0);
    h.confirm();
    assert_eq!(h.dialogue.line_index(), 1);
    h.confirm();
    assert_eq!(h.dialogue.line_index(), 1);
    h.confirm();
    assert_eq!(h.dialogue.line_index(), 2);
    assert_eq!(
        h.dialogue.current().map(|line| line.text.as_str()),
        Some(lines::FIRST_MEETING[2].1)
    );
}

#[test]
fn arrows_do_nothing_during_dialogue() {
    let mut h = Harness::new();
    h.walk_in(ActorId::Ana, 2930.0, 450.0);
    h.idle(1.0);
    h.walk_in(ActorId::Alexandre, 2950.0, 450.0);
    let played = h.director.history().len();
    let before = h.stage.actor(ActorId::Alexandre).position;

    for _ in 0..30 {
        h.step(Controls {
            direction: Some(Facing::Left),
            ..default()
        });
        assert!(h.state.dialogue_active);
        assert_eq!(h.stage.actor(ActorId::Alexandre).velocity, Vec2::ZERO);
        assert_eq!(h.stage.actor(ActorId::Ana).velocity, Vec2::ZERO);
    }
    assert_eq!(h.stage.actor(ActorId::Alexandre).position, before);
    assert_eq!(h.director.history().len(), played);
}

#[test]
fn arrows_move_the_active_lead() {
    let mut h = Harness::new();
    let start = h.stage.actor(ActorId::Ana).position;
    for _ in 0..30 {
        h.step(Controls {
            direction: Some(Facing::Down),
            ..default()
        });
    }
    let moved = h.stage.actor(ActorId::Ana).position - start;
    assert!((moved.y - 210.0).abs() < 1.0);
    assert_eq!(moved.x, 0.0);
    h.idle(0.1);
    assert_eq!(h.stage.actor(ActorId::Ana).velocity, Vec2::ZERO);
}

#[test]
fn message_waits_for_signal() {
    let mut h = Harness::new();
    h.shortcut(SceneId::SkipToTextAna);
    assert_eq!(h.state.active(), Character::Alexandre);
    assert_eq!(h.walk_in(ActorId::Alexandre, 2936.0, 650.0), SceneId::TextAna);
    assert!(h.state.pending_message);
    assert_eq!(h.state.recipient, Character::Ana);
    assert_eq!(h.play_out(), 1);
    assert_eq!(h.state.active(), Character::Ana);
    assert!(!h.screen.curtain_busy());

    h.idle(2.0);
    assert!(!h.state.has_signal);
    assert!(h.state.pending_message);
    assert!(!h.director.is_busy());

    assert_eq!(h.walk_in(ActorId::Ana, 992.0, 1850.0), SceneId::MessageDelivered);
    assert!(h.state.has_signal);
    assert!(!h.state.pending_message);
    assert!(h.dialogue.is_open());
}

#[test]
fn mail_only_opens_for_its_recipient() {
    let mut h = Harness::new();
    signal::send_message(&mut h.state, "see you", Character::Ana);
    assert_eq!(h.state.recipient, Character::Alexandre);

    h.stage.place(ActorId::Ana, Vec2::new(2920.0, 558.0));
    for _ in 0..120 {
        let was_pending = h.state.pending_message;
        h.step(Controls::default());
        if was_pending && !h.state.pending_message {
            assert!(h.state.has_signal);
            assert_eq!(h.state.active(), h.state.recipient);
        }
    }
    assert!(h.state.has_signal);
    assert!(h.state.pending_message);
    assert!(!signal::notify(&h.state));
}

#[test]
fn doorstep_menu_runs_one_handler_per_pick() {
    let mut h = Harness::new();
    h.shortcut(SceneId::SkipToDoorstep);
    assert_eq!(h.walk_in(ActorId::Alexandre, 520.0, 1892.0), SceneId::Doorstep);
    assert_eq!(h.play_out(), 3);
    assert_eq!(h.choices.widgets().len(), 3);
    assert_eq!(h.choices.title(), None);

    h.pick("Try to kiss her");
    assert_eq!(h.times_played(SceneId::TryKiss), 1);
    assert!(h.choices.widgets().is_empty());
    assert_eq!(h.play_out(), 5);
    assert_eq!(h.times_played(SceneId::TryKiss), 1);
    assert_eq!(h.times_played(SceneId::DoorstepChoice), 2);
    assert_eq!(h.choices.widgets().len(), 3);

    // A stale pick after the menu is gone does nothing.
    let stale = h.choices.widgets()[1].id;
    h.pick("Say goodbye and leave");
    h.step(Controls {
        pick: Some(stale),
        ..default()
    });
    assert_eq!(h.times_played(SceneId::SayGoodbye), 1);
    assert_eq!(h.times_played(SceneId::TryKiss), 1);
}

#[test]
fn busy_director_queues_the_next_scene() {
    let mut h = Harness::new();
    h.with_cast(|director, cast| {
        director.begin(SceneId::FirstMeeting, cast);
        director.begin(SceneId::SwitchToAlexandre, cast);
    });
    assert_eq!(h.director.history(), &[SceneId::FirstMeeting]);
    h.play_out();
    assert_eq!(
        h.director.history(),
        &[
            SceneId::FirstMeeting,
            SceneId::ClassroomMission,
            SceneId::SwitchToAlexandre
        ]
    );
    assert!(h.state.is(Mission::Meet));
}

#[test]
fn shortcut_drops_the_running_scene() {
    let mut h = Harness::new();
    h.walk_in(ActorId::Ana, 2930.0, 450.0);
    h.walk_in(ActorId::Alexandre, 2950.0, 450.0);
    assert!(h.dialogue.is_open());

    h.shortcut(SceneId::ClassroomMission);
    assert!(!h.dialogue.is_open());
    assert!(!h.state.dialogue_active);
    assert!(!h.director.is_busy());
    assert!(h.state.is_at(Mission::GoToClassroom, SubMission::HeGoesFirst));
    assert_eq!(h.state.affection, 5);
}

#[test]
fn every_shortcut_lands_somewhere_playable() {
    for scene in SHORTCUTS {
        let mut h = Harness::new();
        h.shortcut(scene);
        h.play_out();
        assert!(h.state.mission.is_some(), "{scene:?} left no mission");
        assert!(!h.state.dialogue_active, "{scene:?} left input locked");
    }
}

#[test]
fn snack_bar_shortcut_sets_the_last_date_up() {
    let mut h = Harness::new();
    h.shortcut(SceneId::SkipToSnackBar);
    assert!(h.state.is_at(Mission::SnackBar, SubMission::KissHer));
    assert_eq!(h.state.active(), Character::Ana);
    assert_eq!(h.state.affection, 10);
    h.idle(3.0);
    assert_eq!(h.screen.night_alpha(), Some(h.config.night_alpha));
}

#[test]
fn whole_story_plays_to_the_end() {
    let mut h = Harness::new();
    assert_eq!(h.banner.message(), "");

    assert_eq!(h.walk_in(ActorId::Ana, 2930.0, 450.0), SceneId::SwitchToAlexandre);
    h.play_out();

    assert_eq!(h.walk_in(ActorId::Alexandre, 2950.0, 450.0), SceneId::FirstMeeting);
    assert_eq!(h.play_out(), 17);

    assert_eq!(h.walk_in(ActorId::Alexandre, 2930.0, 290.0), SceneId::HeReachesClassroom);
    h.play_out();
    assert_eq!(h.state.active(), Character::Ana);
    assert!(!h.stage.actor(ActorId::Alexandre).visible);

    assert_eq!(h.walk_in(ActorId::Ana, 2930.0, 290.0), SceneId::BothInClassroom);
    h.play_out();
    assert!(h.state.is(Mission::TalkToHer));
    assert_eq!(h.state.active(), Character::Alexandre);
    assert!(h.screen.night_alpha().is_some_and(|alpha| alpha > 0.0));

    assert_eq!(h.walk_in(ActorId::Alexandre, 2964.0, 714.0), SceneId::PizzaInvite);
    assert_eq!(h.play_out(), 12);
    assert!(h.state.is_at(Mission::GoToPizzeria, SubMission::SheFollows));
    assert!(h.state.npc_follows());

    assert_eq!(h.walk_in(ActorId::Ana, 2364.0, 660.0), SceneId::PizzaDinner);
    assert_eq!(h.play_out(), 15);
    assert!(h.state.is(Mission::TakeHome));
    assert_eq!(h.state.active(), Character::Ana);
    assert_eq!(h.state.affection, 10);

    assert_eq!(h.walk_in(ActorId::Alexandre, 520.0, 1892.0), SceneId::Doorstep);
    assert_eq!(h.play_out(), 3);
    h.pick("Ask for her number");
    assert_eq!(h.play_out(), 9);
    assert!(h.state.is(Mission::SendMessage));
    assert!(!h.stage.actor(ActorId::Ana).visible);
    assert_eq!(h.stage.actor(ActorId::Ana).position, Vec2::new(274.0, 1808.0));
    assert_eq!(h.state.affection, 20);

    assert_eq!(h.walk_in(ActorId::Alexandre, 2936.0, 650.0), SceneId::TextAna);
    assert_eq!(h.play_out(), 1);
    assert_eq!(h.state.active(), Character::Ana);
    assert!(h.state.pending_message);

    assert_eq!(h.walk_in(ActorId::Ana, 992.0, 1850.0), SceneId::MessageDelivered);
    assert_eq!(h.play_out(), 2);
    assert!(h.state.is(Mission::GoToWork));
    assert_eq!(h.state.affection, 30);

    assert_eq!(h.walk_in(ActorId::Ana, 2204.0, 180.0), SceneId::ClockIn);
    assert_eq!(h.play_out(), 3);
    assert!(h.state.is(Mission::ContactHim));

    assert_eq!(h.walk_in(ActorId::Ana, 874.0, 1042.0), SceneId::ContactMenu);
    h.play_out();
    assert_eq!(h.choices.title(), Some("CONTACT ALEXANDRE"));
    h.pick("📞 Call him");
    assert_eq!(h.play_out(), 5);
    assert!(h.state.is_at(Mission::SquareDate, SubMission::SheGoes));
    assert_eq!(h.times_played(SceneId::ContactMenu), 1);

    assert_eq!(h.walk_in(ActorId::Ana, 782.0, 1010.0), SceneId::WaitAtSquare);
    h.play_out();
    assert!(h.state.is_at(Mission::SquareDate, SubMission::HeGoes));
    assert_eq!(h.state.active(), Character::Alexandre);

    assert_eq!(h.walk_in(ActorId::Alexandre, 800.0, 1010.0), SceneId::SecondDate);
    assert_eq!(h.play_out(), 39);
    assert!(h.state.is(Mission::TakeHomeAgain));
    assert_eq!(h.state.affection, 40);

    assert_eq!(h.walk_in(ActorId::Alexandre, 520.0, 1892.0), SceneId::DoorstepAgain);
    assert_eq!(h.play_out(), 6);
    assert!(h.state.is_at(Mission::MondaySchool, SubMission::TalkToAlexandre));
    assert_eq!(h.state.affection, 60);

    assert_eq!(h.walk_in(ActorId::Ana, 2962.0, 750.0), SceneId::MondayChat);
    assert_eq!(h.play_out(), 10);
    assert!(h.state.is(Mission::ClassroomAgain));

    assert_eq!(h.walk_in(ActorId::Ana, 2930.0, 290.0), SceneId::BackInClass);
    h.play_out();
    assert!(h.state.is_at(Mission::SnackBar, SubMission::KissHer));
    assert_eq!(h.state.active(), Character::Alexandre);

    assert_eq!(h.walk_in(ActorId::Ana, 1361.0, 550.0), SceneId::SnackBarDate);
    assert_eq!(h.play_out(), 10);
    assert!(h.state.is_finished());
    assert_eq!(h.state.mission, None);
    assert_eq!(h.banner.message(), "The End ❤");
    assert_eq!(h.state.affection, 60);
    assert_eq!(h.state.displayed_affection(), 60);

    let played = h.director.history().len();
    h.idle(5.0);
    assert_eq!(h.director.history().len(), played);
    assert!(!h.state.dialogue_active);
}
