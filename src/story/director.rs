use std::collections::VecDeque;

use bevy::prelude::*;

use crate::actors::MoveTicket;
use crate::choice::{Choice, WidgetId};
use crate::schedule::Timeline;
use crate::signal;

use super::scenes::{self, SceneId};
use super::script::Step;
use super::{Cast, Resume};

/// What the running script is blocked on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Waiting {
    #[default]
    Nothing,
    Dialogue(u64),
    Choice,
    Walk(MoveTicket),
    Timer(u64),
    Curtain,
}

/// Runs one scene's steps at a time, in order, resuming when whatever a step
/// started has finished.
#[derive(Resource, Default)]
pub struct Director {
    scene: Option<SceneId>,
    steps: VecDeque<Step>,
    waiting: Waiting,
    next_token: u64,
    timers: Timeline<u64>,
    queued: VecDeque<SceneId>,
    history: Vec<SceneId>,
}

fn scene_name(scene: SceneId) -> &'static str {
    scene.into()
}

impl Director {
    pub fn is_busy(&self) -> bool {
        self.scene.is_some()
    }

    #[cfg(test)]
    pub fn scene(&self) -> Option<SceneId> {
        self.scene
    }

    /// Every scene started, in order.
    #[cfg(test)]
    pub fn history(&self) -> &[SceneId] {
        &self.history
    }

    /// Starts `scene`, or queues it behind the one already running.
    pub fn begin(&mut self, scene: SceneId, cast: &mut Cast) {
        if let Some(running) = self.scene {
            warn!(
                "Queued {} behind {}",
                scene_name(scene),
                scene_name(running)
            );
            self.queued.push_back(scene);
            return;
        }
        self.load(scene, cast);
        self.run(cast);
    }

    /// Drops whatever is running and starts `scene` from a clean screen.
    pub fn jump(&mut self, scene: SceneId, cast: &mut Cast) {
        info!("Jumping to {}", scene_name(scene));
        self.steps.clear();
        self.queued.clear();
        self.timers.clear();
        self.waiting = Waiting::Nothing;
        self.scene = None;
        cast.dialogue.abort();
        cast.choices.clear();
        cast.screen.lift();
        cast.state.dialogue_active = false;
        self.begin(scene, cast);
    }

    /// Confirm input. Resumes the script when its dialogue closes.
    pub fn confirm(&mut self, cast: &mut Cast) {
        let Some(Resume(token)) = cast.confirm() else {
            return;
        };
        if self.waiting == Waiting::Dialogue(token) {
            self.waiting = Waiting::Nothing;
            self.run(cast);
        }
    }

    pub fn pick(&mut self, widget: WidgetId, cast: &mut Cast) {
        if self.waiting != Waiting::Choice {
            return;
        }
        let Some(scene) = cast.choices.select(widget) else {
            return;
        };
        info!("Picked {}", scene_name(scene));
        self.waiting = Waiting::Nothing;
        self.load(scene, cast);
        self.run(cast);
    }

    pub fn tick(&mut self, dt: f32, cast: &mut Cast, finished_walks: &[MoveTicket]) {
        let fired = self.timers.advance(dt);
        let resumed = match self.waiting {
            Waiting::Nothing => self.scene.is_some(),
            Waiting::Dialogue(_) | Waiting::Choice => false,
            Waiting::Walk(ticket) => finished_walks.contains(&ticket),
            Waiting::Timer(token) => fired.contains(&token),
            Waiting::Curtain => !cast.screen.curtain_busy(),
        };
        if resumed {
            self.waiting = Waiting::Nothing;
            self.run(cast);
        }
    }

    fn load(&mut self, scene: SceneId, cast: &mut Cast) {
        if !cast.state.mark_visited(scene) {
            debug!("Replaying {}", scene_name(scene));
        }
        info!("Scene {} (#{})", scene_name(scene), self.history.len() + 1);
        self.history.push(scene);
        self.scene = Some(scene);
        for step in scenes::script(scene, cast.config).into_iter().rev() {
            self.steps.push_front(step);
        }
    }

    fn run(&mut self, cast: &mut Cast) {
        while self.waiting == Waiting::Nothing {
            let Some(step) = self.steps.pop_front() else {
                self.scene = None;
                match self.queued.pop_front() {
                    Some(next) => {
                        self.load(next, cast);
                        continue;
                    }
                    None => break,
                }
            };
            self.waiting = self.execute(step, cast);
        }
    }

    fn token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn execute(&mut self, step: Step, cast: &mut Cast) -> Waiting {
        match step {
            Step::SetMission(mission) => cast.state.mission = mission,
            Step::SetSubMission(sub_mission) => cast.state.sub_mission = sub_mission,
            Step::Objective(text, hold) => cast.banner.show(text, hold),
            Step::Affection(amount) => cast.state.add_affection(amount),
            Step::StopAll => cast.stage.stop_all(),
            Step::Lock => {
                cast.state.dialogue_active = true;
                cast.stage.stop_all();
            }
            Step::Unlock => cast.state.dialogue_active = false,
            Step::Place(actor, position) => cast.stage.place(actor, position),
            Step::Face(actor, facing) => cast.stage.face_permanently(actor, facing),
            Step::FaceEachOther => {
                let active = cast.state.active();
                cast.stage.look_at(active.actor(), active.other().actor());
            }
            Step::Show(actor, visible) => cast.stage.actor_mut(actor).visible = visible,
            Step::Movable(actor, movable) => cast.stage.actor_mut(actor).movable = movable,
            Step::Focus(character) => cast.swap_focus(character, true),
            Step::Snap(character) => cast.swap_focus(character, false),
            Step::Say(lines) => {
                let token = self.token();
                if cast.say(lines, Resume(token)) {
                    return Waiting::Dialogue(token);
                }
            }
            Step::Choose { title, options } => {
                if options.is_empty() {
                    return Waiting::Nothing;
                }
                cast.state.dialogue_active = true;
                cast.stage.stop_all();
                let options = options
                    .into_iter()
                    .map(|(label, scene)| Choice::new(label, scene))
                    .collect();
                cast.choices.show_titled(title, options);
                return Waiting::Choice;
            }
            Step::Walk(actor, target) => {
                let ticket = cast.stage.move_to(
                    actor,
                    target,
                    cast.config.move_horizontal,
                    cast.config.move_vertical,
                );
                return Waiting::Walk(ticket);
            }
            Step::Wait(seconds) => {
                let token = self.token();
                self.timers.after(seconds, token);
                return Waiting::Timer(token);
            }
            Step::FadeOut(seconds) => {
                cast.screen.fade_out(seconds);
                if cast.screen.curtain_busy() {
                    return Waiting::Curtain;
                }
            }
            Step::Present(skip) => {
                cast.screen.present(skip);
                return Waiting::Curtain;
            }
            Step::Night(seconds) => cast.screen.tint(cast.config.night_alpha, seconds),
            Step::Day(seconds) => cast.screen.tint(0.0, seconds),
            Step::SendMessage(text, sender) => signal::send_message(cast.state, &text, sender),
            Step::Then(scene) => self.load(scene, cast),
        }
        Waiting::Nothing
    }
}
