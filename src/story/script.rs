use bevy::prelude::*;

use crate::actors::{ActorId, Facing};
use crate::config::StoryConfig;
use crate::dialogue::Line;
use crate::sections::{Character, Mission, SubMission};
use crate::transition::TimeSkip;

use super::SceneId;

/// One instruction of a scene. Say, Choose, Walk, Wait, FadeOut and Present
/// block the script until they finish; everything else is instant.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    SetMission(Option<Mission>),
    SetSubMission(Option<SubMission>),
    /// Banner text and how long it holds (zero keeps it up).
    Objective(String, f32),
    Affection(u32),
    StopAll,
    /// Takes input away from the player outside of a dialogue.
    Lock,
    Unlock,
    Place(ActorId, Vec2),
    Face(ActorId, Facing),
    /// The inactive lead turns to the active one.
    FaceEachOther,
    Show(ActorId, bool),
    Movable(ActorId, bool),
    /// Pans the camera over and hands control to the character.
    Focus(Character),
    /// Same as [`Step::Focus`] without the pan.
    Snap(Character),
    Say(Vec<Line>),
    Choose {
        title: Option<String>,
        options: Vec<(String, SceneId)>,
    },
    Walk(ActorId, Vec2),
    Wait(f32),
    FadeOut(f32),
    Present(TimeSkip),
    /// Tints the screen to night, or back to day, over the given seconds.
    Night(f32),
    Day(f32),
    SendMessage(String, Character),
    Then(SceneId),
}

pub fn objective(text: &str, hold: f32) -> Step {
    Step::Objective(text.to_string(), hold)
}

pub fn say(lines: Vec<Line>) -> Step {
    Step::Say(lines)
}

pub fn place(actor: ActorId, x: f32, y: f32) -> Step {
    Step::Place(actor, Vec2::new(x, y))
}

pub fn walk(actor: ActorId, x: f32, y: f32) -> Step {
    Step::Walk(actor, Vec2::new(x, y))
}

pub fn choose(title: Option<&str>, options: &[(&str, SceneId)]) -> Step {
    Step::Choose {
        title: title.map(str::to_string),
        options: options
            .iter()
            .map(|(label, scene)| (label.to_string(), *scene))
            .collect(),
    }
}

/// The "some time later" idiom: fade to black, run `meanwhile` unseen, show
/// the captions, then fade back in.
pub fn skip_time<S: Into<String>>(
    config: &StoryConfig,
    captions: impl IntoIterator<Item = S>,
    meanwhile: Vec<Step>,
) -> Vec<Step> {
    let mut steps = vec![Step::FadeOut(config.fade_out)];
    steps.extend(meanwhile);
    steps.push(Step::Present(TimeSkip {
        captions: captions.into_iter().map(Into::into).collect(),
        caption_interval: config.caption_interval,
        hold: config.caption_hold,
        fade_in: config.fade_in,
    }));
    steps
}

/// Evening class: the wall clock runs from 18:00 to 23:00.
pub fn clock_captions() -> Vec<String> {
    (18..=23).map(|hour| format!("{hour}:00")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_time_wraps_the_unseen_steps() {
        let config = StoryConfig::default();
        let steps = skip_time(&config, ["Monday"], vec![Step::StopAll]);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0], Step::FadeOut(0.6));
        assert_eq!(steps[1], Step::StopAll);
        let Step::Present(skip) = &steps[2] else {
            panic!("expected a caption card, got {:?}", steps[2]);
        };
        assert_eq!(skip.captions, vec!["Monday".to_string()]);
        assert_eq!(skip.hold, 3.5);
    }

    #[test]
    fn clock_runs_through_the_evening() {
        let captions = clock_captions();
        assert_eq!(captions.first().map(String::as_str), Some("18:00"));
        assert_eq!(captions.last().map(String::as_str), Some("23:00"));
        assert_eq!(captions.len(), 6);
    }
}
