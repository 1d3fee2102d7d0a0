/// Game sections and shared plot state.
use std::collections::HashSet;

use bevy::prelude::*;
use strum::{EnumIter, IntoStaticStr};

use crate::actors::ActorId;
use crate::story::SceneId;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum Sections {
    #[default]
    Title,
    Story,
}

/// The two leads. Exactly one of them receives input at a time.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
pub enum Character {
    #[default]
    Ana,
    Alexandre,
}

impl Character {
    pub fn other(self) -> Self {
        match self {
            Character::Ana => Character::Alexandre,
            Character::Alexandre => Character::Ana,
        }
    }

    pub fn actor(self) -> ActorId {
        match self {
            Character::Ana => ActorId::Ana,
            Character::Alexandre => ActorId::Alexandre,
        }
    }
}

/// Top-level story objectives, in the order the story visits them.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum Mission {
    GoToSchool,
    Meet,
    GoToClassroom,
    TalkToHer,
    GoToPizzeria,
    TakeHome,
    SendMessage,
    GoToWork,
    ContactHim,
    SquareDate,
    TakeHomeAgain,
    MondaySchool,
    ClassroomAgain,
    SnackBar,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum SubMission {
    HeGoesFirst,
    SheGoes,
    HeGoes,
    ClassOver,
    SheFollows,
    EatingPizza,
    TalkToAlexandre,
    KissHer,
}

/// Tags during which the non-active lead walks after the active one.
const FOLLOW_MISSIONS: [Mission; 5] = [
    Mission::GoToPizzeria,
    Mission::TakeHome,
    Mission::TakeHomeAgain,
    Mission::ClassroomAgain,
    Mission::SnackBar,
];
const FOLLOW_SUB_MISSIONS: [SubMission; 1] = [SubMission::SheFollows];

/// Story state for the whole play-through.
#[derive(Resource, Debug, Clone)]
pub struct GameState {
    active: Character,
    pub mission: Option<Mission>,
    pub sub_mission: Option<SubMission>,
    pub dialogue_active: bool,
    pub affection: u32,
    pub has_signal: bool,
    pub pending_message: bool,
    pub recipient: Character,
    visited: HashSet<SceneId>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            active: Character::Ana,
            mission: Some(Mission::GoToSchool),
            sub_mission: None,
            dialogue_active: false,
            affection: 0,
            has_signal: false,
            pending_message: false,
            recipient: Character::Ana,
            visited: HashSet::new(),
        }
    }
}

impl GameState {
    pub fn active(&self) -> Character {
        self.active
    }

    /// Only the story context's focus swap calls this.
    pub(crate) fn set_active(&mut self, character: Character) {
        self.active = character;
    }

    pub fn is(&self, mission: Mission) -> bool {
        self.mission == Some(mission)
    }

    pub fn is_at(&self, mission: Mission, sub_mission: SubMission) -> bool {
        self.mission == Some(mission) && self.sub_mission == Some(sub_mission)
    }

    pub fn add_affection(&mut self, amount: u32) {
        self.affection = self.affection.saturating_add(amount);
    }

    /// Affection as shown on the HUD bar.
    pub fn displayed_affection(&self) -> u32 {
        self.affection.min(100)
    }

    /// Records a scene as played. Returns false if it already was.
    pub fn mark_visited(&mut self, scene: SceneId) -> bool {
        self.visited.insert(scene)
    }

    pub fn has_visited(&self, scene: SceneId) -> bool {
        self.visited.contains(&scene)
    }

    pub fn has_met(&self) -> bool {
        self.has_visited(SceneId::FirstMeeting)
    }

    pub fn is_finished(&self) -> bool {
        self.has_visited(SceneId::Epilogue)
    }

    pub fn npc_follows(&self) -> bool {
        self.mission.is_some_and(|m| FOLLOW_MISSIONS.contains(&m))
            || self.sub_mission.is_some_and(|s| FOLLOW_SUB_MISSIONS.contains(&s))
    }
}
