// Title screen

use bevy::prelude::*;

use crate::sections::Sections;

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Sections::Title), setup_title)
            .add_systems(
                Update,
                (button_visuals, button_actions, start_on_space).run_if(in_state(Sections::Title)),
            );
    }
}

pub const NORMAL_BUTTON: Color = Color::srgb(0.15, 0.15, 0.15);
const HOVERED_BUTTON: Color = Color::srgb(0.25, 0.25, 0.25);
const PRESSED_BUTTON: Color = Color::srgb(0.35, 0.35, 0.35);
pub const IDLE_EDGE: Color = Color::srgba(1.0, 1.0, 1.0, 0.3);

/// Fill and border for a button, shared by the title screen and choice menus.
pub fn button_colors(interaction: Interaction) -> (Color, Color) {
    match interaction {
        Interaction::Pressed => (PRESSED_BUTTON, Color::WHITE),
        Interaction::Hovered => (HOVERED_BUTTON, Color::WHITE),
        Interaction::None => (NORMAL_BUTTON, IDLE_EDGE),
    }
}

#[derive(Component)]
enum MenuButton {
    Start,
    #[cfg(not(target_arch = "wasm32"))]
    Exit,
}

fn setup_title(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(24.0),
                ..default()
            },
            BackgroundColor(Color::srgb(0.08, 0.06, 0.1)),
            DespawnOnExit(Sections::Title),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Where it all began ❤️"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            parent.spawn((
                Text::new("Posto Norte - 2012"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgba(0.8, 0.8, 0.8, 1.0)),
                Node {
                    margin: UiRect::bottom(Val::Px(32.0)),
                    ..default()
                },
            ));

            spawn_button(parent, "Start", MenuButton::Start);

            // Exit button (native only).
            #[cfg(not(target_arch = "wasm32"))]
            spawn_button(parent, "Exit", MenuButton::Exit);
        });
}

fn spawn_button(parent: &mut ChildSpawnerCommands, label: &str, marker: MenuButton) {
    parent
        .spawn((
            marker,
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor::all(IDLE_EDGE),
            BackgroundColor(NORMAL_BUTTON),
        ))
        .with_children(|btn| {
            btn.spawn((
                Text::new(label),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn button_visuals(
    mut query: Query<
        (&Interaction, &mut BackgroundColor, &mut BorderColor),
        (Changed<Interaction>, With<MenuButton>),
    >,
) {
    for (interaction, mut bg, mut border) in &mut query {
        let (fill, edge) = button_colors(*interaction);
        *bg = fill.into();
        *border = BorderColor::all(edge);
    }
}

fn button_actions(
    query: Query<(&Interaction, &MenuButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<Sections>>,
    #[cfg(not(target_arch = "wasm32"))] mut exit: MessageWriter<AppExit>,
) {
    for (interaction, button) in &query {
        if *interaction != Interaction::Pressed {
            continue;
        }
        match button {
            MenuButton::Start => {
                info!("Starting the story");
                next_state.set(Sections::Story);
            }
            #[cfg(not(target_arch = "wasm32"))]
            MenuButton::Exit => {
                exit.write(AppExit::Success);
            }
        }
    }
}

fn start_on_space(keyboard: Res<ButtonInput<KeyCode>>, mut next_state: ResMut<NextState<Sections>>) {
    if keyboard.just_pressed(KeyCode::Space) {
        next_state.set(Sections::Story);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_buttons_dim_their_border() {
        assert_eq!(button_colors(Interaction::None), (NORMAL_BUTTON, IDLE_EDGE));
        for interaction in [Interaction::Hovered, Interaction::Pressed] {
            let (fill, edge) = button_colors(interaction);
            assert_eq!(edge, Color::WHITE);
            assert_ne!(fill, NORMAL_BUTTON);
        }
        assert_ne!(
            button_colors(Interaction::Hovered).0,
            button_colors(Interaction::Pressed).0
        );
    }
}
