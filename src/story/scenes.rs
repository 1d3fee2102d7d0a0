// The story, scene by scene.

use strum::{EnumIter, IntoStaticStr};

use crate::actors::ActorId::{Alexandre, Ana, Patron, Waitress};
use crate::actors::Facing;
use crate::config::StoryConfig;
use crate::sections::{Character, Mission, SubMission};

use super::lines::{self, lines};
use super::script::{Step, choose, clock_captions, objective, place, say, skip_time, walk};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum SceneId {
    SwitchToAlexandre,
    FirstMeeting,
    ClassroomMission,
    HeReachesClassroom,
    BothInClassroom,
    ClassEnds,
    PizzaInvite,
    PizzaMission,
    PizzaDinner,
    PizzaLater,
    PizzaFarewell,
    WalkHerHome,
    Doorstep,
    DoorstepChoice,
    TryKiss,
    SayGoodbye,
    AskNumber,
    TextAnaMission,
    TextAna,
    DayEnds,
    MessageDelivered,
    GoToWork,
    ClockIn,
    ContactMenu,
    TextHim,
    CallHim,
    HeadToSquare,
    WaitAtSquare,
    SecondDate,
    DoorstepAgain,
    MondayMorning,
    MondayChat,
    BackInClass,
    SnackBarMission,
    SnackBarDate,
    Epilogue,
    // Developer shortcuts.
    SkipToInvite,
    SkipToDoorstep,
    SkipToTextAna,
    SkipToContact,
    SkipToSnackBar,
}

/// Digit keys 1-7 in dev builds.
#[cfg_attr(not(feature = "dev"), allow(dead_code))]
pub const SHORTCUTS: [SceneId; 7] = [
    SceneId::ClassroomMission,
    SceneId::SkipToInvite,
    SceneId::PizzaMission,
    SceneId::SkipToDoorstep,
    SceneId::SkipToTextAna,
    SceneId::SkipToContact,
    SceneId::SkipToSnackBar,
];

/// Ana's front step, where both walks home end.
const HOME_STEP: (f32, f32) = (274.0, 1808.0);

fn chain(mut steps: Vec<Step>, more: Vec<Step>) -> Vec<Step> {
    steps.extend(more);
    steps
}

pub fn script(scene: SceneId, config: &StoryConfig) -> Vec<Step> {
    use Step::*;

    match scene {
        SceneId::SwitchToAlexandre => vec![
            SetMission(Some(Mission::Meet)),
            Movable(Ana, false),
            Movable(Alexandre, false),
            StopAll,
            Focus(Character::Alexandre),
            objective("Go talk to Ana", 2.5),
        ],
        SceneId::FirstMeeting => vec![
            FaceEachOther,
            Affection(5),
            say(lines(lines::FIRST_MEETING)),
            Then(SceneId::ClassroomMission),
        ],
        SceneId::ClassroomMission => vec![
            SetMission(Some(Mission::GoToClassroom)),
            SetSubMission(Some(SubMission::HeGoesFirst)),
            objective("The bell rang, go to the classroom", 3.0),
        ],
        SceneId::HeReachesClassroom => vec![
            SetSubMission(Some(SubMission::SheGoes)),
            StopAll,
            Show(Alexandre, false),
            Focus(Character::Ana),
        ],
        SceneId::BothInClassroom => chain(
            vec![SetSubMission(Some(SubMission::ClassOver)), SetMission(None), StopAll, Lock],
            chain(
                skip_time(
                    config,
                    clock_captions(),
                    vec![
                        place(Ana, 2964.0, 734.0),
                        place(Alexandre, 2932.0, 340.0),
                        Show(Alexandre, true),
                        Focus(Character::Alexandre),
                        Night(2.0),
                    ],
                ),
                vec![Then(SceneId::ClassEnds)],
            ),
        ),
        SceneId::ClassEnds => vec![
            Unlock,
            SetMission(Some(Mission::TalkToHer)),
            SetSubMission(None),
            Face(Ana, Facing::Down),
            Face(Alexandre, Facing::Down),
            objective("Find Ana and ask her out", 3.0),
        ],
        SceneId::PizzaInvite => vec![
            StopAll,
            FaceEachOther,
            say(lines(lines::PIZZA_INVITE)),
            Then(SceneId::PizzaMission),
        ],
        SceneId::PizzaMission => vec![
            SetMission(Some(Mission::GoToPizzeria)),
            SetSubMission(Some(SubMission::SheFollows)),
            Focus(Character::Alexandre),
            objective("Go to Paulo's pizzeria", 2.0),
        ],
        SceneId::PizzaDinner => vec![
            SetSubMission(Some(SubMission::EatingPizza)),
            SetMission(None),
            StopAll,
            place(Ana, 2342.0, 682.0),
            place(Alexandre, 2384.0, 682.0),
            Face(Alexandre, Facing::Left),
            Face(Ana, Facing::Right),
            say(lines(lines::PIZZA_ORDER)),
            Then(SceneId::PizzaLater),
        ],
        SceneId::PizzaLater => chain(
            vec![Lock],
            chain(
                skip_time(
                    config,
                    ["Some time later..."],
                    vec![
                        place(Ana, 2342.0, 682.0),
                        place(Alexandre, 2384.0, 682.0),
                        Snap(Character::Ana),
                    ],
                ),
                vec![Unlock, Then(SceneId::PizzaFarewell)],
            ),
        ),
        SceneId::PizzaFarewell => vec![
            StopAll,
            Face(Alexandre, Facing::Left),
            Face(Ana, Facing::Right),
            Affection(5),
            say(lines(lines::PIZZA_FAREWELL)),
            Then(SceneId::WalkHerHome),
        ],
        SceneId::WalkHerHome => vec![
            SetMission(Some(Mission::TakeHome)),
            SetSubMission(None),
            Focus(Character::Ana),
            objective("Head back home.", 3.0),
        ],
        SceneId::Doorstep => vec![
            Lock,
            StopAll,
            SetMission(None),
            place(Ana, 520.0, 1870.0),
            place(Alexandre, 550.0, 1870.0),
            Face(Alexandre, Facing::Left),
            Face(Ana, Facing::Right),
            say(lines(lines::DOORSTEP)),
            Then(SceneId::DoorstepChoice),
        ],
        SceneId::DoorstepChoice => vec![
            Lock,
            StopAll,
            Face(Alexandre, Facing::Left),
            Face(Ana, Facing::Right),
            choose(
                None,
                &[
                    ("Ask for her number", SceneId::AskNumber),
                    ("Try to kiss her", SceneId::TryKiss),
                    ("Say goodbye and leave", SceneId::SayGoodbye),
                ],
            ),
        ],
        SceneId::TryKiss => vec![
            say(lines(lines::TRY_KISS)),
            Wait(0.1),
            Then(SceneId::DoorstepChoice),
        ],
        SceneId::SayGoodbye => vec![
            say(lines(lines::SAY_GOODBYE)),
            Wait(0.1),
            Then(SceneId::DoorstepChoice),
        ],
        SceneId::AskNumber => vec![
            Lock,
            Focus(Character::Alexandre),
            say(lines(lines::ASK_NUMBER)),
            Lock,
            walk(Ana, HOME_STEP.0, HOME_STEP.1),
            Show(Ana, false),
            Unlock,
            Affection(10),
            Then(SceneId::TextAnaMission),
        ],
        SceneId::TextAnaMission => vec![
            SetMission(Some(Mission::SendMessage)),
            Focus(Character::Alexandre),
            objective("Go to the school to send a message", 3.0),
        ],
        SceneId::TextAna => vec![
            StopAll,
            Movable(Alexandre, false),
            Lock,
            SendMessage(lines::TEXT_TO_ANA.to_string(), Character::Alexandre),
            SetMission(None),
            objective("📱 Message sent!", 3.0),
            say(lines(lines::TEXT_SENT)),
            Lock,
            Then(SceneId::DayEnds),
        ],
        SceneId::DayEnds => chain(
            vec![Wait(1.0), Unlock],
            chain(
                skip_time(
                    config,
                    ["The next day..."],
                    vec![
                        Show(Alexandre, false),
                        Day(3.0),
                        Movable(Alexandre, true),
                        Focus(Character::Ana),
                    ],
                ),
                vec![objective("Look for phone signal, you may have messages", 4.0)],
            ),
        ),
        SceneId::MessageDelivered => vec![
            StopAll,
            Affection(10),
            say(lines(lines::MESSAGE_READ)),
            Then(SceneId::GoToWork),
        ],
        SceneId::GoToWork => vec![
            SetMission(Some(Mission::GoToWork)),
            SetSubMission(None),
            objective("Time to go to work", 4.0),
            Wait(1.0),
            say(lines(lines::SATURDAY)),
            Unlock,
        ],
        SceneId::ClockIn => chain(
            vec![
                SetMission(None),
                SetSubMission(None),
                StopAll,
                Show(Ana, false),
                Movable(Ana, false),
                Lock,
                Wait(1.0),
            ],
            chain(
                skip_time(
                    config,
                    ["After a long morning..."],
                    vec![Show(Alexandre, false), Focus(Character::Ana)],
                ),
                vec![
                    Unlock,
                    SetMission(Some(Mission::ContactHim)),
                    objective("Invite Alexandre for some tereré", 4.0),
                    Wait(1.0),
                    say(lines(lines::END_OF_SHIFT)),
                ],
            ),
        ),
        SceneId::ContactMenu => vec![
            Lock,
            StopAll,
            choose(
                Some("CONTACT ALEXANDRE"),
                &[
                    ("💬 Send a message", SceneId::TextHim),
                    ("📞 Call him", SceneId::CallHim),
                ],
            ),
        ],
        SceneId::TextHim => vec![
            say(lines(lines::TEXT_HIM)),
            SetMission(Some(Mission::SquareDate)),
            Wait(1.0),
            objective("📩 New message!", 4.0),
            say(lines(lines::HIS_REPLY)),
            Then(SceneId::HeadToSquare),
        ],
        SceneId::CallHim => vec![say(lines(lines::CALL_HIM)), Then(SceneId::HeadToSquare)],
        SceneId::HeadToSquare => vec![
            Unlock,
            SetMission(Some(Mission::SquareDate)),
            SetSubMission(Some(SubMission::SheGoes)),
            objective("Go to the meeting spot", 4.0),
            Movable(Ana, true),
            StopAll,
        ],
        SceneId::WaitAtSquare => chain(
            vec![StopAll, Movable(Ana, false), SetMission(None), Lock, Wait(1.0)],
            chain(
                skip_time(
                    config,
                    ["A few minutes later..."],
                    vec![StopAll, Focus(Character::Alexandre)],
                ),
                vec![
                    Unlock,
                    SetMission(Some(Mission::SquareDate)),
                    SetSubMission(Some(SubMission::HeGoes)),
                    objective("Ana is waiting for you at the square.", 4.0),
                    Show(Alexandre, true),
                ],
            ),
        ),
        SceneId::SecondDate => vec![
            Lock,
            StopAll,
            Movable(Ana, false),
            Movable(Alexandre, false),
            SetSubMission(None),
            SetMission(None),
            place(Ana, 788.0, 1004.0),
            place(Alexandre, 816.0, 1004.0),
            Face(Alexandre, Facing::Left),
            Face(Ana, Facing::Right),
            say(lines(lines::SECOND_DATE)),
            Affection(10),
            Unlock,
            Movable(Ana, true),
            Movable(Alexandre, true),
            Night(2.0),
            Focus(Character::Ana),
            SetMission(Some(Mission::TakeHomeAgain)),
            objective("Head home 🏡", 4.0),
        ],
        SceneId::DoorstepAgain => vec![
            Lock,
            StopAll,
            SetMission(None),
            place(Ana, 520.0, 1870.0),
            place(Alexandre, 550.0, 1870.0),
            Face(Alexandre, Facing::Left),
            Face(Ana, Facing::Right),
            say(lines(lines::DOORSTEP_AGAIN)),
            Lock,
            StopAll,
            Focus(Character::Alexandre),
            walk(Ana, HOME_STEP.0, HOME_STEP.1),
            Show(Ana, false),
            Affection(20),
            Then(SceneId::MondayMorning),
        ],
        SceneId::MondayMorning => chain(
            vec![Lock, Wait(1.0)],
            chain(
                skip_time(
                    config,
                    ["Monday"],
                    vec![
                        Show(Alexandre, false),
                        StopAll,
                        Focus(Character::Ana),
                        Day(1.0),
                        place(Alexandre, 2962.0, 724.0),
                    ],
                ),
                vec![
                    Unlock,
                    SetMission(Some(Mission::MondaySchool)),
                    SetSubMission(Some(SubMission::TalkToAlexandre)),
                    Show(Alexandre, true),
                    objective("Go to school", 4.0),
                ],
            ),
        ),
        SceneId::MondayChat => vec![
            Movable(Ana, true),
            Movable(Alexandre, true),
            FaceEachOther,
            say(lines(lines::MONDAY_CHAT)),
            StopAll,
            Focus(Character::Ana),
            SetMission(Some(Mission::ClassroomAgain)),
            SetSubMission(None),
            objective("The bell rang, go to class", 4.0),
        ],
        SceneId::BackInClass => chain(
            vec![StopAll, Movable(Ana, false), SetMission(None), Lock, Wait(0.5)],
            chain(
                skip_time(
                    config,
                    clock_captions(),
                    vec![
                        place(Ana, 2926.0, 363.0),
                        place(Alexandre, 2926.0, 363.0),
                        Show(Alexandre, true),
                        Movable(Ana, true),
                        Focus(Character::Alexandre),
                        Night(0.0),
                    ],
                ),
                vec![Unlock, Then(SceneId::SnackBarMission)],
            ),
        ),
        SceneId::SnackBarMission => vec![
            SetMission(Some(Mission::SnackBar)),
            SetSubMission(Some(SubMission::KissHer)),
            objective("Go to Alemão's snack bar", 4.0),
        ],
        SceneId::SnackBarDate => vec![
            Lock,
            StopAll,
            SetMission(None),
            place(Ana, 1380.0, 560.0),
            place(Alexandre, 1339.0, 560.0),
            place(Patron, 1520.0, 566.0),
            place(Waitress, 1616.0, 566.0),
            Show(Patron, true),
            Show(Waitress, true),
            Face(Alexandre, Facing::Right),
            Face(Ana, Facing::Left),
            Face(Patron, Facing::Right),
            Face(Waitress, Facing::Left),
            Movable(Ana, false),
            Movable(Alexandre, false),
            say(lines(lines::SNACK_BAR)),
            Focus(Character::Ana),
            Then(SceneId::Epilogue),
        ],
        SceneId::Epilogue => vec![
            Unlock,
            SetMission(None),
            SetSubMission(None),
            StopAll,
            objective("The End ❤", 0.0),
        ],
        SceneId::SkipToInvite => vec![
            SetMission(Some(Mission::TalkToHer)),
            SetSubMission(None),
            Snap(Character::Alexandre),
            place(Alexandre, 2900.0, 520.0),
            place(Ana, 2920.0, 560.0),
        ],
        SceneId::SkipToDoorstep => vec![
            Unlock,
            SetMission(Some(Mission::TakeHome)),
            SetSubMission(None),
            Snap(Character::Ana),
            place(Ana, 520.0, 1750.0),
            place(Alexandre, 550.0, 1750.0),
        ],
        SceneId::SkipToTextAna => vec![
            Unlock,
            SetMission(Some(Mission::SendMessage)),
            SetSubMission(None),
            Show(Ana, false),
            Snap(Character::Alexandre),
            place(Alexandre, 2656.0, 758.0),
        ],
        SceneId::SkipToContact => vec![
            Unlock,
            SetMission(Some(Mission::ContactHim)),
            SetSubMission(None),
            Snap(Character::Ana),
            place(Ana, 882.0, 798.0),
        ],
        SceneId::SkipToSnackBar => vec![
            Unlock,
            Affection(10),
            Movable(Ana, true),
            Movable(Alexandre, true),
            Night(2.0),
            place(Ana, 1471.0, 624.0),
            place(Alexandre, 1471.0, 624.0),
            Snap(Character::Ana),
            SetMission(Some(Mission::SnackBar)),
            SetSubMission(Some(SubMission::KissHer)),
            objective("Go to Alemão's snack bar", 4.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;
    use crate::actors::ActorId;

    fn walkers(scene: SceneId, config: &StoryConfig) -> Vec<ActorId> {
        script(scene, config)
            .into_iter()
            .filter_map(|step| match step {
                Step::Walk(actor, _) => Some(actor),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn every_scene_has_steps() {
        let config = StoryConfig::default();
        for scene in SceneId::iter() {
            assert!(!script(scene, &config).is_empty(), "{scene:?} is empty");
        }
    }

    #[test]
    fn first_meeting_is_seventeen_lines_and_worth_five() {
        let steps = script(SceneId::FirstMeeting, &StoryConfig::default());
        assert!(steps.contains(&Step::Affection(5)));
        let said: usize = steps
            .iter()
            .map(|step| match step {
                Step::Say(lines) => lines.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(said, 17);
    }

    #[test]
    fn both_walks_home_end_on_the_front_step() {
        let config = StoryConfig::default();
        assert_eq!(walkers(SceneId::AskNumber, &config), vec![Ana]);
        assert_eq!(walkers(SceneId::DoorstepAgain, &config), vec![Ana]);
    }

    #[test]
    fn doorstep_refusals_loop_back_to_the_menu() {
        let config = StoryConfig::default();
        for scene in [SceneId::TryKiss, SceneId::SayGoodbye] {
            assert_eq!(script(scene, &config).last(), Some(&Step::Then(SceneId::DoorstepChoice)));
        }
    }

    #[test]
    fn scene_names_are_camel_case() {
        let name: &'static str = SceneId::SwitchToAlexandre.into();
        assert_eq!(name, "switchToAlexandre");
    }
}
