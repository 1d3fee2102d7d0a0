// Full-screen curtain for time skips, and the night tint.

use bevy::prelude::*;

use crate::sections::Sections;

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Story), spawn_screen_layers)
            .add_systems(Update, render_screen.run_if(in_state(Sections::Story)));
    }
}

/// One "some time later" card: captions shown in turn while the screen is
/// black, then a fade back in.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSkip {
    pub captions: Vec<String>,
    pub caption_interval: f32,
    pub hold: f32,
    pub fade_in: f32,
}

#[derive(Debug, Clone, PartialEq)]
enum Curtain {
    Clear,
    FadingOut { elapsed: f32, duration: f32 },
    Opaque,
    Holding { skip: TimeSkip, elapsed: f32 },
    FadingIn { elapsed: f32, duration: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct NightFilter {
    alpha: f32,
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl NightFilter {
    fn new() -> Self {
        Self {
            alpha: 0.0,
            from: 0.0,
            to: 0.0,
            elapsed: 0.0,
            duration: 0.0,
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    fn fade_to(&mut self, alpha: f32, duration: f32) {
        self.from = self.alpha;
        self.to = alpha;
        self.elapsed = 0.0;
        self.duration = duration;
        if duration <= 0.0 {
            self.alpha = alpha;
        }
    }

    fn tick(&mut self, dt: f32) {
        if self.alpha == self.to {
            return;
        }
        self.elapsed += dt;
        let t = (self.elapsed / self.duration).min(1.0);
        self.alpha = self.from + (self.to - self.from) * t;
    }
}

/// Screen-wide overlays the story scripts drive.
#[derive(Resource, Debug, Clone)]
pub struct Screen {
    curtain: Curtain,
    night: Option<NightFilter>,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            curtain: Curtain::Clear,
            night: None,
        }
    }
}

impl Screen {
    pub fn with_night_filter() -> Self {
        Self {
            night: Some(NightFilter::new()),
            ..default()
        }
    }

    pub fn curtain_alpha(&self) -> f32 {
        match &self.curtain {
            Curtain::Clear => 0.0,
            Curtain::FadingOut { elapsed, duration } => ratio(*elapsed, *duration),
            Curtain::Opaque | Curtain::Holding { .. } => 1.0,
            Curtain::FadingIn { elapsed, duration } => 1.0 - ratio(*elapsed, *duration),
        }
    }

    pub fn caption(&self) -> Option<&str> {
        let Curtain::Holding { skip, elapsed } = &self.curtain else {
            return None;
        };
        let step = if skip.caption_interval > 0.0 {
            (elapsed / skip.caption_interval) as usize
        } else {
            0
        };
        let last = skip.captions.len().checked_sub(1)?;
        skip.captions.get(step.min(last)).map(String::as_str)
    }

    /// Fading or holding. A plain black screen is not busy.
    pub fn curtain_busy(&self) -> bool {
        !matches!(self.curtain, Curtain::Clear | Curtain::Opaque)
    }

    #[cfg(test)]
    pub fn is_clear(&self) -> bool {
        self.curtain == Curtain::Clear
    }

    pub fn fade_out(&mut self, duration: f32) {
        self.curtain = if duration > 0.0 {
            Curtain::FadingOut {
                elapsed: 0.0,
                duration,
            }
        } else {
            Curtain::Opaque
        };
    }

    /// Shows the captions over a black screen, then fades back in.
    pub fn present(&mut self, skip: TimeSkip) {
        self.curtain = Curtain::Holding { skip, elapsed: 0.0 };
    }

    pub fn lift(&mut self) {
        self.curtain = Curtain::Clear;
    }

    pub fn night_alpha(&self) -> Option<f32> {
        self.night.as_ref().map(NightFilter::alpha)
    }

    /// Tints towards `alpha`. Without a filter installed this only logs.
    pub fn tint(&mut self, alpha: f32, duration: f32) {
        let Some(night) = self.night.as_mut() else {
            error!("Night filter missing, cannot tint to {alpha}");
            return;
        };
        night.fade_to(alpha, duration);
    }

    pub fn tick(&mut self, dt: f32) {
        if let Some(night) = self.night.as_mut() {
            night.tick(dt);
        }
        self.curtain = match std::mem::replace(&mut self.curtain, Curtain::Clear) {
            Curtain::FadingOut { elapsed, duration } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    Curtain::Opaque
                } else {
                    Curtain::FadingOut { elapsed, duration }
                }
            }
            Curtain::Holding { skip, elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed < skip.hold {
                    Curtain::Holding { skip, elapsed }
                } else if skip.fade_in > 0.0 {
                    Curtain::FadingIn {
                        elapsed: 0.0,
                        duration: skip.fade_in,
                    }
                } else {
                    Curtain::Clear
                }
            }
            Curtain::FadingIn { elapsed, duration } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    Curtain::Clear
                } else {
                    Curtain::FadingIn { elapsed, duration }
                }
            }
            settled => settled,
        };
    }
}

fn ratio(elapsed: f32, duration: f32) -> f32 {
    if duration > 0.0 {
        (elapsed / duration).clamp(0.0, 1.0)
    } else {
        1.0
    }
}

const NIGHT_TINT: Color = Color::srgb(0.0, 0.0, 0.2);

#[derive(Component)]
struct CardRoot;

#[derive(Component)]
struct CardText;

#[derive(Component)]
struct NightLayer;

fn spawn_screen_layers(mut commands: Commands) {
    commands.spawn((
        NightLayer,
        DespawnOnExit(Sections::Story),
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(NIGHT_TINT.with_alpha(0.0)),
        GlobalZIndex(5),
    ));

    commands
        .spawn((
            CardRoot,
            DespawnOnExit(Sections::Story),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::BLACK.with_alpha(0.0)),
            GlobalZIndex(90),
        ))
        .with_children(|parent| {
            parent.spawn((
                CardText,
                Text::new(""),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn render_screen(
    screen: Res<Screen>,
    mut texts: Query<&mut Text, With<CardText>>,
    mut cards: Query<&mut BackgroundColor, (With<CardRoot>, Without<NightLayer>)>,
    mut nights: Query<&mut BackgroundColor, (With<NightLayer>, Without<CardRoot>)>,
) {
    for mut bg in &mut cards {
        bg.0 = Color::BLACK.with_alpha(screen.curtain_alpha());
    }
    for mut text in &mut texts {
        text.0 = screen.caption().unwrap_or_default().to_string();
    }
    let night = screen.night_alpha().unwrap_or(0.0);
    for mut bg in &mut nights {
        bg.0 = NIGHT_TINT.with_alpha(night);
    }
}
