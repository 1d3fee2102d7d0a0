// Choice menus: one button per option, all removed together on a pick.

use bevy::prelude::*;

use crate::config::StoryConfig;
use crate::menu::{IDLE_EDGE, NORMAL_BUTTON, button_colors};
use crate::sections::Sections;
use crate::story::StoryChoices;

pub struct ChoicePlugin;

impl Plugin for ChoicePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ChoicePicked>().add_systems(
            Update,
            (sync_choice_buttons, choice_button_visuals, choice_clicks)
                .chain()
                .run_if(in_state(Sections::Story)),
        );
    }
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

/// A button was pressed.
#[derive(Message, Debug, Clone, Copy)]
pub struct ChoicePicked(pub WidgetId);

#[derive(Debug, Clone)]
pub struct Choice<H> {
    pub label: String,
    pub handler: H,
}

impl<H> Choice<H> {
    pub fn new(label: impl Into<String>, handler: H) -> Self {
        Self {
            label: label.into(),
            handler,
        }
    }
}

/// Screen-space button rectangle, top-left origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceWidget {
    pub id: WidgetId,
    pub label: String,
    pub center: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceLayout {
    pub screen: Vec2,
    pub button: Vec2,
    pub spacing: f32,
}

impl From<&StoryConfig> for ChoiceLayout {
    fn from(config: &StoryConfig) -> Self {
        Self {
            screen: Vec2::new(config.screen_width, config.screen_height),
            button: Vec2::new(config.button_width, config.button_height),
            spacing: config.button_spacing,
        }
    }
}

#[derive(Resource)]
pub struct ChoicePresenter<H: Send + Sync + 'static> {
    layout: ChoiceLayout,
    title: Option<String>,
    widgets: Vec<ChoiceWidget>,
    handlers: Vec<H>,
    next_id: u64,
    generation: u64,
}

impl<H: Send + Sync + 'static> ChoicePresenter<H> {
    pub fn new(layout: ChoiceLayout) -> Self {
        Self {
            layout,
            title: None,
            widgets: Vec::new(),
            handlers: Vec::new(),
            next_id: 0,
            generation: 0,
        }
    }

    pub fn widgets(&self) -> &[ChoiceWidget] {
        &self.widgets
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_open(&self) -> bool {
        !self.widgets.is_empty()
    }

    /// Bumped whenever the displayed widgets change.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub fn show(&mut self, options: Vec<Choice<H>>) -> &[ChoiceWidget] {
        self.show_titled(None, options)
    }

    /// Replaces any displayed menu with a vertically centred column of buttons.
    pub fn show_titled(&mut self, title: Option<String>, options: Vec<Choice<H>>) -> &[ChoiceWidget] {
        self.clear();
        self.title = title;

        let ChoiceLayout {
            screen,
            button,
            spacing,
        } = self.layout;
        let pitch = button.y + spacing;
        let rows = options.len().saturating_sub(1) as f32;
        let start_y = screen.y / 2.0 - rows * pitch / 2.0;

        for (slot, option) in options.into_iter().enumerate() {
            let id = WidgetId(self.next_id);
            self.next_id += 1;
            self.widgets.push(ChoiceWidget {
                id,
                label: option.label,
                center: Vec2::new(screen.x / 2.0, start_y + slot as f32 * pitch),
                size: button,
            });
            self.handlers.push(option.handler);
        }
        &self.widgets
    }

    /// Removes every widget and returns the picked option's handler. Unknown
    /// or stale ids leave the menu untouched.
    pub fn select(&mut self, id: WidgetId) -> Option<H> {
        let slot = self.widgets.iter().position(|widget| widget.id == id)?;
        let handler = self.handlers.swap_remove(slot);
        self.clear();
        Some(handler)
    }

    pub fn clear(&mut self) {
        if self.widgets.is_empty() && self.title.is_none() {
            return;
        }
        self.widgets.clear();
        self.handlers.clear();
        self.title = None;
        self.generation += 1;
    }
}

// Buttons.

#[derive(Component)]
struct ChoiceRoot {
    generation: u64,
}

#[derive(Component)]
struct ChoiceButton(WidgetId);

fn sync_choice_buttons(
    mut commands: Commands,
    choices: Res<StoryChoices>,
    roots: Query<(Entity, &ChoiceRoot)>,
) {
    let generation = choices.generation();
    if roots.iter().all(|(_, root)| root.generation == generation) && !roots.is_empty() {
        return;
    }
    for (entity, _) in &roots {
        commands.entity(entity).despawn();
    }

    commands
        .spawn((
            ChoiceRoot { generation },
            DespawnOnExit(Sections::Story),
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                ..default()
            },
            GlobalZIndex(110),
        ))
        .with_children(|parent| {
            if let (Some(title), Some(first)) = (choices.title(), choices.widgets().first()) {
                parent.spawn((
                    Text::new(title),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::srgb_u8(0xff, 0xd1, 0x66)),
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(first.center.x - first.size.x / 2.0),
                        top: Val::Px(first.center.y - first.size.y * 1.5),
                        ..default()
                    },
                ));
            }
            for widget in choices.widgets() {
                spawn_choice_button(parent, widget);
            }
        });
}

fn spawn_choice_button(parent: &mut ChildSpawnerCommands, widget: &ChoiceWidget) {
    parent
        .spawn((
            ChoiceButton(widget.id),
            Button,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(widget.center.x - widget.size.x / 2.0),
                top: Val::Px(widget.center.y - widget.size.y / 2.0),
                width: Val::Px(widget.size.x),
                height: Val::Px(widget.size.y),
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
                Text::new(widget.label.as_str()),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn choice_button_visuals(
    mut query: Query<
        (&Interaction, &mut BackgroundColor, &mut BorderColor),
        (Changed<Interaction>, With<ChoiceButton>),
    >,
) {
    for (interaction, mut bg, mut border) in &mut query {
        let (fill, edge) = button_colors(*interaction);
        *bg = fill.into();
        *border = BorderColor::all(edge);
    }
}

fn choice_clicks(
    query: Query<(&Interaction, &ChoiceButton), Changed<Interaction>>,
    mut picked: MessageWriter<ChoicePicked>,
) {
    for (interaction, button) in &query {
        if *interaction == Interaction::Pressed {
            picked.write(ChoicePicked(button.0));
        }
    }
}
