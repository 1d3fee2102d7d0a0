// Trigger zones on the map and the story beats bound to them.

use bevy::prelude::*;
use strum::{EnumIter, IntoStaticStr};

use crate::actors::{ActorId, Stage};
use crate::sections::{GameState, Mission, SubMission};
use crate::story::SceneId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ZoneId {
    School,
    Classroom,
    Pizzeria,
    Home,
    SendSpot,
    Workplace,
    Square,
    SnackBar,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub bounds: Rect,
}

/// (id, center x, center y, width, height)
const ZONES: [(ZoneId, f32, f32, f32, f32); 8] = [
    (ZoneId::School, 2930.0, 450.0, 200.0, 10.0),
    (ZoneId::Classroom, 2930.0, 290.0, 64.0, 64.0),
    (ZoneId::Pizzeria, 2364.0, 660.0, 40.0, 20.0),
    (ZoneId::Home, 520.0, 1892.0, 100.0, 100.0),
    (ZoneId::SendSpot, 2936.0, 680.0, 130.0, 130.0),
    (ZoneId::Workplace, 2204.0, 180.0, 20.0, 20.0),
    (ZoneId::Square, 782.0, 1010.0, 20.0, 20.0),
    (ZoneId::SnackBar, 1361.0, 550.0, 80.0, 80.0),
];

/// Spots with phone reception.
const SIGNAL_SPOTS: [(f32, f32); 4] = [
    (2920.0, 558.0),
    (874.0, 1042.0),
    (992.0, 1850.0),
    (52.0, 1920.0),
];

/// What an actor has to overlap for a binding to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Zone(ZoneId),
    /// Another actor's body.
    Actor(ActorId),
}

pub type Guard = fn(&GameState) -> bool;

#[derive(Debug, Clone)]
pub struct Binding {
    pub actor: ActorId,
    pub region: Region,
    pub guard: Guard,
    pub scene: SceneId,
    latched: bool,
}

impl Binding {
    pub fn new(actor: ActorId, region: Region, guard: Guard, scene: SceneId) -> Self {
        Self {
            actor,
            region,
            guard,
            scene,
            latched: false,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    signal_zones: Vec<Rect>,
    bindings: Vec<Binding>,
}

impl ZoneRegistry {
    pub fn new(zones: Vec<Zone>, signal_zones: Vec<Rect>, bindings: Vec<Binding>) -> Self {
        Self {
            zones,
            signal_zones,
            bindings,
        }
    }

    /// The map's zones and every story beat that starts on overlap.
    pub fn story(signal_zone_size: f32) -> Self {
        let zones = ZONES
            .iter()
            .map(|&(id, x, y, w, h)| Zone {
                id,
                bounds: Rect::from_center_size(Vec2::new(x, y), Vec2::new(w, h)),
            })
            .collect();
        let signal_zones = SIGNAL_SPOTS
            .iter()
            .map(|&(x, y)| Rect::from_center_size(Vec2::new(x, y), Vec2::splat(signal_zone_size)))
            .collect();
        Self::new(zones, signal_zones, story_bindings())
    }

    pub fn zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    #[cfg(test)]
    pub fn signal_zones(&self) -> &[Rect] {
        &self.signal_zones
    }

    #[cfg(test)]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Whether `actor` stands in reception.
    pub fn signal_at(&self, stage: &Stage, actor: ActorId) -> bool {
        let bounds = stage.bounds(actor);
        self.signal_zones.iter().any(|zone| overlaps(*zone, bounds))
    }

    /// Fires at most one binding per call: the first whose overlap and guard
    /// hold and which was not already holding last time. Nothing fires while
    /// a dialogue owns input.
    pub fn evaluate(&mut self, stage: &Stage, state: &GameState) -> Option<SceneId> {
        if state.dialogue_active {
            return None;
        }
        let mut fired = None;
        for binding in &mut self.bindings {
            let region = match binding.region {
                Region::Zone(id) => self
                    .zones
                    .iter()
                    .find(|zone| zone.id == id)
                    .map(|zone| zone.bounds),
                Region::Actor(other) => stage.actor(other).body_enabled.then(|| stage.bounds(other)),
            };
            let touching = stage.actor(binding.actor).body_enabled
                && region.is_some_and(|region| overlaps(region, stage.bounds(binding.actor)));
            if !touching || !(binding.guard)(state) {
                binding.latched = false;
                continue;
            }
            if binding.latched || fired.is_some() {
                continue;
            }
            binding.latched = true;
            fired = Some(binding.scene);
        }
        fired
    }
}

/// Strict overlap: touching edges do not count.
fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// Where the mission marker hovers for a mission, if anywhere.
pub fn marker_zone(mission: Mission) -> Option<ZoneId> {
    match mission {
        Mission::GoToSchool => Some(ZoneId::School),
        Mission::GoToClassroom | Mission::ClassroomAgain => Some(ZoneId::Classroom),
        Mission::GoToPizzeria => Some(ZoneId::Pizzeria),
        Mission::TakeHome | Mission::TakeHomeAgain => Some(ZoneId::Home),
        Mission::SendMessage => Some(ZoneId::SendSpot),
        Mission::GoToWork => Some(ZoneId::Workplace),
        Mission::SquareDate => Some(ZoneId::Square),
        Mission::SnackBar => Some(ZoneId::SnackBar),
        Mission::Meet | Mission::TalkToHer | Mission::ContactHim | Mission::MondaySchool => None,
    }
}

fn story_bindings() -> Vec<Binding> {
    use ActorId::{Alexandre, Ana};

    let zone = Region::Zone;
    vec![
        Binding::new(
            Ana,
            zone(ZoneId::School),
            |s: &GameState| s.is(Mission::GoToSchool),
            SceneId::SwitchToAlexandre,
        ),
        Binding::new(
            Alexandre,
            zone(ZoneId::Classroom),
            |s: &GameState| s.is_at(Mission::GoToClassroom, SubMission::HeGoesFirst),
            SceneId::HeReachesClassroom,
        ),
        Binding::new(
            Ana,
            zone(ZoneId::Classroom),
            |s: &GameState| s.is_at(Mission::GoToClassroom, SubMission::SheGoes),
            SceneId::BothInClassroom,
        ),
        Binding::new(
            Ana,
            zone(ZoneId::Classroom),
            |s: &GameState| s.is(Mission::ClassroomAgain),
            SceneId::BackInClass,
        ),
        Binding::new(
            Ana,
            zone(ZoneId::Pizzeria),
            |s: &GameState| s.is_at(Mission::GoToPizzeria, SubMission::SheFollows),
            SceneId::PizzaDinner,
        ),
        Binding::new(
            Alexandre,
            zone(ZoneId::Home),
            |s: &GameState| s.is(Mission::TakeHome),
            SceneId::Doorstep,
        ),
        Binding::new(
            Alexandre,
            zone(ZoneId::Home),
            |s: &GameState| s.is(Mission::TakeHomeAgain),
            SceneId::DoorstepAgain,
        ),
        Binding::new(
            Alexandre,
            zone(ZoneId::SendSpot),
            |s: &GameState| s.is(Mission::SendMessage) && s.has_signal,
            SceneId::TextAna,
        ),
        Binding::new(
            Ana,
            zone(ZoneId::Workplace),
            |s: &GameState| s.is(Mission::GoToWork),
            SceneId::ClockIn,
        ),
        Binding::new(
            Ana,
            zone(ZoneId::Square),
            |s: &GameState| s.is_at(Mission::SquareDate, SubMission::SheGoes),
            SceneId::WaitAtSquare,
        ),
        Binding::new(
            Ana,
            zone(ZoneId::SnackBar),
            |s: &GameState| s.is(Mission::SnackBar),
            SceneId::SnackBarDate,
        ),
        // The leads bumping into each other.
        Binding::new(
            Alexandre,
            Region::Actor(Ana),
            |s: &GameState| s.is(Mission::Meet) && !s.has_met(),
            SceneId::FirstMeeting,
        ),
        Binding::new(
            Alexandre,
            Region::Actor(Ana),
            |s: &GameState| s.is(Mission::TalkToHer),
            SceneId::PizzaInvite,
        ),
        Binding::new(
            Alexandre,
            Region::Actor(Ana),
            |s: &GameState| s.is_at(Mission::SquareDate, SubMission::HeGoes),
            SceneId::SecondDate,
        ),
        Binding::new(
            Alexandre,
            Region::Actor(Ana),
            |s: &GameState| s.is_at(Mission::MondaySchool, SubMission::TalkToAlexandre),
            SceneId::MondayChat,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    fn setup() -> (ZoneRegistry, Stage, GameState) {
        (ZoneRegistry::story(230.0), Stage::story(32.0, 0.06), GameState::default())
    }

    fn center(registry: &ZoneRegistry, id: ZoneId) -> Vec2 {
        registry.zone(id).map(|zone| zone.bounds.center()).unwrap()
    }

    #[test]
    fn fires_once_per_entry() {
        let (mut zones, mut stage, state) = setup();
        assert_eq!(zones.evaluate(&stage, &state), None);

        stage.place(ActorId::Ana, center(&zones, ZoneId::School));
        assert_eq!(zones.evaluate(&stage, &state), Some(SceneId::SwitchToAlexandre));
        assert_eq!(zones.evaluate(&stage, &state), None);

        stage.place(ActorId::Ana, Vec2::new(1488.0, 496.0));
        assert_eq!(zones.evaluate(&stage, &state), None);
        stage.place(ActorId::Ana, center(&zones, ZoneId::School));
        assert_eq!(zones.evaluate(&stage, &state), Some(SceneId::SwitchToAlexandre));
    }

    #[test]
    fn nothing_fires_during_dialogue() {
        let (mut zones, mut stage, mut state) = setup();
        stage.place(ActorId::Ana, center(&zones, ZoneId::School));
        state.dialogue_active = true;
        assert_eq!(zones.evaluate(&stage, &state), None);
        state.dialogue_active = false;
        assert_eq!(zones.evaluate(&stage, &state), Some(SceneId::SwitchToAlexandre));
    }

    #[test]
    fn guard_must_hold() {
        let (mut zones, mut stage, mut state) = setup();
        state.mission = Some(Mission::Meet);
        stage.place(ActorId::Ana, center(&zones, ZoneId::School));
        assert_eq!(zones.evaluate(&stage, &state), None);
    }

    #[test]
    fn leads_meeting_uses_their_bodies() {
        let (mut zones, mut stage, mut state) = setup();
        state.mission = Some(Mission::Meet);
        stage.place(ActorId::Alexandre, Vec2::new(1500.0, 496.0));
        assert_eq!(zones.evaluate(&stage, &state), Some(SceneId::FirstMeeting));

        state.mark_visited(SceneId::FirstMeeting);
        stage.place(ActorId::Alexandre, Vec2::new(2000.0, 496.0));
        zones.evaluate(&stage, &state);
        stage.place(ActorId::Alexandre, Vec2::new(1500.0, 496.0));
        assert_eq!(zones.evaluate(&stage, &state), None);
    }

    #[test]
    fn disabled_bodies_do_not_trigger() {
        let (mut zones, mut stage, mut state) = setup();
        state.mission = Some(Mission::TakeHome);
        stage.place(ActorId::Alexandre, center(&zones, ZoneId::Home));
        stage.actor_mut(ActorId::Alexandre).body_enabled = false;
        assert_eq!(zones.evaluate(&stage, &state), None);
    }

    #[test]
    fn reception_is_spotty() {
        let (zones, mut stage, _) = setup();
        assert!(!zones.signal_at(&stage, ActorId::Ana));
        stage.place(ActorId::Ana, Vec2::new(874.0, 1042.0));
        assert!(zones.signal_at(&stage, ActorId::Ana));
        // Alexandre starts by the school gate, inside reception.
        assert!(zones.signal_at(&stage, ActorId::Alexandre));
        assert_eq!(zones.signal_zones().len(), 4);
    }

    #[test]
    fn guards_sharing_a_region_are_exclusive() {
        let (zones, _, _) = setup();
        let missions = Mission::iter().map(Some).chain([None]);
        for mission in missions {
            let subs = SubMission::iter().map(Some).chain([None]);
            for sub_mission in subs {
                for (met, signal) in [(false, false), (true, false), (false, true), (true, true)] {
                    let mut state = GameState::default();
                    state.mission = mission;
                    state.sub_mission = sub_mission;
                    state.has_signal = signal;
                    if met {
                        state.mark_visited(SceneId::FirstMeeting);
                    }
                    for binding in zones.bindings() {
                        let rivals = zones
                            .bindings()
                            .iter()
                            .filter(|other| other.actor == binding.actor && other.region == binding.region)
                            .filter(|other| (other.guard)(&state))
                            .count();
                        assert!(rivals <= 1, "{mission:?}/{sub_mission:?} arms {rivals} beats");
                    }
                }
            }
        }
    }

    #[test]
    fn every_marker_points_at_a_known_zone() {
        let (zones, _, _) = setup();
        for mission in Mission::iter() {
            if let Some(id) = marker_zone(mission) {
                assert!(zones.zone(id).is_some());
            }
        }
        assert_eq!(marker_zone(Mission::GoToSchool), Some(ZoneId::School));
    }
}
