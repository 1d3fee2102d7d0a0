// Dialogue box with a typewriter reveal.

use bevy::prelude::*;

use crate::schedule::{TimerId, Timeline};
use crate::sections::Sections;
use crate::story::StoryDialogue;

pub struct DialoguePlugin;

impl Plugin for DialoguePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Story), spawn_dialogue_box)
            .add_systems(Update, render_dialogue_box.run_if(in_state(Sections::Story)));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub speaker: String,
    pub text: String,
}

impl Line {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Typing,
    LineComplete,
    Closed,
}

/// What a confirm press did.
#[derive(Debug, PartialEq, Eq)]
pub enum Advance<C> {
    Ignored,
    Revealed,
    NextLine,
    /// The sequence ended; carries the completion cue, handed out once.
    Closed(Option<C>),
}

/// Plays one sequence of lines at a time.
#[derive(Resource)]
pub struct DialoguePlayer<C: Send + Sync + 'static> {
    lines: Vec<Line>,
    index: usize,
    revealed: usize,
    phase: Phase,
    on_complete: Option<C>,
    reveal: Timeline<()>,
    reveal_timer: Option<TimerId>,
    interval: f32,
}

impl<C: Send + Sync + 'static> DialoguePlayer<C> {
    pub fn new(interval: f32) -> Self {
        Self {
            lines: Vec::new(),
            index: 0,
            revealed: 0,
            phase: Phase::Idle,
            on_complete: None,
            reveal: Timeline::default(),
            reveal_timer: None,
            interval,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Typing | Phase::LineComplete)
    }

    #[cfg(test)]
    pub fn line_index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Line> {
        if self.is_open() {
            self.lines.get(self.index)
        } else {
            None
        }
    }

    /// The revealed prefix of the current line.
    pub fn visible_text(&self) -> String {
        self.current()
            .map(|line| line.text.chars().take(self.revealed).collect())
            .unwrap_or_default()
    }

    /// Replaces whatever is playing. An empty sequence does nothing and
    /// returns false.
    pub fn start(&mut self, lines: Vec<Line>, on_complete: Option<C>) -> bool {
        if lines.is_empty() {
            return false;
        }
        self.stop_reveal();
        self.lines = lines;
        self.index = 0;
        self.on_complete = on_complete;
        self.begin_line();
        true
    }

    /// Confirm input: finishes a typing line, otherwise moves on.
    pub fn advance(&mut self) -> Advance<C> {
        match self.phase {
            Phase::Idle | Phase::Closed => Advance::Ignored,
            Phase::Typing => {
                self.reveal_all();
                Advance::Revealed
            }
            Phase::LineComplete => {
                self.index += 1;
                if self.index < self.lines.len() {
                    self.begin_line();
                    Advance::NextLine
                } else {
                    self.phase = Phase::Closed;
                    self.lines.clear();
                    self.index = 0;
                    Advance::Closed(self.on_complete.take())
                }
            }
        }
    }

    /// Shows the whole current line. Does nothing unless a line is typing.
    pub fn reveal_all(&mut self) -> bool {
        if self.phase != Phase::Typing {
            return false;
        }
        self.stop_reveal();
        self.revealed = self.current_len();
        self.phase = Phase::LineComplete;
        true
    }

    /// Drops the current sequence without handing out its cue.
    pub fn abort(&mut self) {
        self.stop_reveal();
        self.lines.clear();
        self.index = 0;
        self.on_complete = None;
        self.phase = Phase::Idle;
    }

    pub fn tick(&mut self, dt: f32) {
        let steps = self.reveal.advance(dt).len();
        if self.phase != Phase::Typing {
            return;
        }
        self.revealed = (self.revealed + steps).min(self.current_len());
        if self.revealed >= self.current_len() {
            self.reveal_timer = None;
            self.phase = Phase::LineComplete;
        }
    }

    fn begin_line(&mut self) {
        self.revealed = 0;
        let len = self.current_len();
        self.reveal_timer = u32::try_from(len)
            .ok()
            .and_then(|times| self.reveal.every(self.interval, times, ()));
        self.phase = if self.reveal_timer.is_some() {
            Phase::Typing
        } else {
            Phase::LineComplete
        };
    }

    fn stop_reveal(&mut self) {
        if let Some(timer) = self.reveal_timer.take() {
            self.reveal.cancel(timer);
        }
    }

    fn current_len(&self) -> usize {
        self.lines
            .get(self.index)
            .map_or(0, |line| line.text.chars().count())
    }
}

// Dialogue box UI.

#[derive(Component)]
struct DialogueBox;

#[derive(Component)]
struct SpeakerText;

#[derive(Component)]
struct LineText;

fn spawn_dialogue_box(mut commands: Commands) {
    commands
        .spawn((
            DialogueBox,
            DespawnOnExit(Sections::Story),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                right: Val::Px(20.0),
                bottom: Val::Px(20.0),
                height: Val::Px(140.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(8.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            BorderColor::all(Color::WHITE),
            GlobalZIndex(100),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                SpeakerText,
                Text::new(""),
                TextFont {
                    font_size: 26.0,
                    ..default()
                },
                TextColor(Color::srgb_u8(0xff, 0xd1, 0x66)),
            ));
            parent.spawn((
                LineText,
                Text::new(""),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn render_dialogue_box(
    dialogue: Res<StoryDialogue>,
    mut boxes: Query<&mut Visibility, With<DialogueBox>>,
    mut speakers: Query<&mut Text, (With<SpeakerText>, Without<LineText>)>,
    mut lines: Query<&mut Text, (With<LineText>, Without<SpeakerText>)>,
) {
    let Ok(mut visibility) = boxes.single_mut() else {
        return;
    };
    let Some(line) = dialogue.current() else {
        *visibility = Visibility::Hidden;
        return;
    };
    *visibility = Visibility::Inherited;

    if let Ok(mut speaker) = speakers.single_mut() {
        speaker.0.clone_from(&line.speaker);
    }
    if let Ok(mut text) = lines.single_mut() {
        text.0 = dialogue.visible_text();
        if dialogue.phase() == Phase::LineComplete {
            text.0.push_str(" ▼");
        }
    }
}
