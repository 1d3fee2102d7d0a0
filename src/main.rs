// Main
mod actors;
mod choice;
mod config;
mod dialogue;
mod hud;
mod menu;
mod schedule;
mod sections;
mod signal;
mod story;
mod transition;
mod zones;

use actors::ActorsPlugin;
use bevy::prelude::*;
use choice::ChoicePlugin;
use dialogue::DialoguePlugin;
use hud::HudPlugin;
use menu::MenuPlugin;
use sections::Sections;
use story::StoryPlugin;
use transition::TransitionPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Where it all began".into(),
                ..default()
            }),
            ..default()
        }))
        .init_state::<Sections>()
        .add_plugins((
            MenuPlugin,
            StoryPlugin,
            ActorsPlugin,
            DialoguePlugin,
            ChoicePlugin,
            HudPlugin,
            TransitionPlugin,
        ))
        .run();
}
