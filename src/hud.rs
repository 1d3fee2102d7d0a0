// Heads-up display: affection bar, reception, objective banner and the
// marker over the current mission's destination.

use bevy::prelude::*;

use crate::sections::{GameState, Sections};
use crate::signal;
use crate::zones::{ZoneRegistry, marker_zone};

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Story), (spawn_hud, spawn_marker))
            .add_systems(
                Update,
                (render_affection, render_signal, render_banner, render_marker)
                    .run_if(in_state(Sections::Story)),
            );
    }
}

/// Objective text that fades in, holds, then fades out. A zero hold keeps it
/// up until the next objective.
#[derive(Resource, Debug, Clone, Default)]
pub struct Banner {
    message: String,
    elapsed: f32,
    hold: f32,
    fade: f32,
}

impl Banner {
    pub fn new(fade: f32) -> Self {
        Self { fade, ..default() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn show(&mut self, message: impl Into<String>, hold: f32) {
        self.message = message.into();
        self.elapsed = 0.0;
        self.hold = hold;
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.message.is_empty() {
            self.elapsed += dt;
        }
    }

    pub fn alpha(&self) -> f32 {
        if self.message.is_empty() {
            return 0.0;
        }
        if self.fade <= 0.0 || self.elapsed >= self.fade {
            if self.hold <= 0.0 {
                return 1.0;
            }
            let out = self.elapsed - self.fade.max(0.0) - self.hold;
            if out <= 0.0 {
                return 1.0;
            }
            return if self.fade > 0.0 { (1.0 - out / self.fade).max(0.0) } else { 0.0 };
        }
        self.elapsed / self.fade
    }
}

const HEART_PINK: Color = Color::srgb(1.0, 0.3, 0.43);
const BAR_WIDTH: f32 = 200.0;

#[derive(Component)]
struct AffectionFill;

#[derive(Component)]
struct SignalText;

#[derive(Component)]
struct MessageNotice;

#[derive(Component)]
struct BannerText;

#[derive(Component)]
struct MissionMarker;

fn hud_text(text: &str, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn spawn_hud(mut commands: Commands) {
    // Affection bar.
    commands
        .spawn((
            DespawnOnExit(Sections::Story),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(20.0),
                top: Val::Px(20.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            GlobalZIndex(100),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(BAR_WIDTH + 4.0),
                        height: Val::Px(24.0),
                        padding: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        AffectionFill,
                        Node {
                            width: Val::Px(0.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(HEART_PINK),
                    ));
                });
            parent.spawn(hud_text("Love", 16.0, Color::WHITE));
        });

    // Reception and mail, top right.
    commands
        .spawn((
            DespawnOnExit(Sections::Story),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(20.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::End,
                row_gap: Val::Px(4.0),
                ..default()
            },
            GlobalZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((SignalText, hud_text("", 18.0, Color::WHITE)));
            parent.spawn((
                MessageNotice,
                hud_text("New message!", 18.0, Color::WHITE),
                Visibility::Hidden,
            ));
        });

    // Objective banner, top centre.
    commands
        .spawn((
            DespawnOnExit(Sections::Story),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Px(60.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            GlobalZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((BannerText, hud_text("", 24.0, Color::WHITE.with_alpha(0.0))));
        });
}

fn spawn_marker(mut commands: Commands) {
    commands.spawn((
        MissionMarker,
        DespawnOnExit(Sections::Story),
        Sprite::from_color(Color::srgb(1.0, 0.85, 0.2), Vec2::new(12.0, 18.0)),
        Transform::default(),
        Visibility::Hidden,
    ));
}

fn render_affection(state: Res<GameState>, mut fills: Query<&mut Node, With<AffectionFill>>) {
    let width = BAR_WIDTH * state.displayed_affection() as f32 / 100.0;
    for mut node in &mut fills {
        node.width = Val::Px(width);
    }
}

fn render_signal(
    state: Res<GameState>,
    mut signals: Query<(&mut Text, &mut TextColor), With<SignalText>>,
    mut notices: Query<&mut Visibility, With<MessageNotice>>,
) {
    for (mut text, mut color) in &mut signals {
        let (label, tint) = if state.has_signal {
            ("Signal", Color::srgb(0.3, 0.9, 0.4))
        } else {
            ("No signal", Color::srgb(0.95, 0.3, 0.3))
        };
        text.0 = label.to_string();
        color.0 = tint;
    }
    let shown = signal::notify(&state);
    for mut visibility in &mut notices {
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

fn render_banner(banner: Res<Banner>, mut texts: Query<(&mut Text, &mut TextColor), With<BannerText>>) {
    for (mut text, mut color) in &mut texts {
        text.0 = if banner.message().is_empty() {
            String::new()
        } else {
            format!("OBJECTIVE: {}", banner.message())
        };
        color.0 = Color::WHITE.with_alpha(banner.alpha());
    }
}

fn render_marker(
    time: Res<Time>,
    state: Res<GameState>,
    zones: Res<ZoneRegistry>,
    mut markers: Query<(&mut Transform, &mut Visibility), With<MissionMarker>>,
) {
    let Ok((mut transform, mut visibility)) = markers.single_mut() else {
        return;
    };
    let zone = state
        .mission
        .and_then(marker_zone)
        .and_then(|id| zones.zone(id));
    let Some(zone) = zone else {
        *visibility = Visibility::Hidden;
        return;
    };
    *visibility = Visibility::Inherited;
    // Bob 10px up and down over 1.6s.
    let bob = (time.elapsed_secs() * std::f32::consts::PI / 0.8).sin() * 10.0;
    let center = zone.bounds.center();
    transform.translation = Vec3::new(center.x, -(center.y - 30.0 + bob), 5.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_fades_in_holds_and_out() {
        let mut banner = Banner::new(0.5);
        assert_eq!(banner.alpha(), 0.0);
        banner.show("Go talk to Ana", 2.5);
        assert_eq!(banner.message(), "Go talk to Ana");
        banner.tick(0.25);
        assert!((banner.alpha() - 0.5).abs() < 1e-4);
        banner.tick(1.0);
        assert_eq!(banner.alpha(), 1.0);
        banner.tick(2.0);
        assert!((banner.alpha() - 0.5).abs() < 1e-3);
        banner.tick(1.0);
        assert_eq!(banner.alpha(), 0.0);
    }

    #[test]
    fn zero_hold_stays_up() {
        let mut banner = Banner::new(0.5);
        banner.show("The End", 0.0);
        banner.tick(60.0);
        assert_eq!(banner.alpha(), 1.0);
    }

    #[test]
    fn new_objective_restarts_the_fade() {
        let mut banner = Banner::new(0.5);
        banner.show("first", 1.0);
        banner.tick(5.0);
        banner.show("second", 1.0);
        assert_eq!(banner.alpha(), 0.0);
        assert_eq!(banner.message(), "second");
    }
}
