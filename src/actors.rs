// Actors on the map: positions, facing, scripted walks and the camera rig.
//
// World coordinates grow downwards like the map they were authored on; the
// render systems flip y.

use std::f32::consts::PI;

use bevy::prelude::*;
use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::sections::Sections;

pub struct ActorsPlugin;

impl Plugin for ActorsPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb_u8(0x84, 0xc6, 0x69)))
            .add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(Sections::Story), spawn_actor_sprites)
            .add_systems(
                Update,
                (sync_actor_sprites, sync_camera).run_if(in_state(Sections::Story)),
            );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ActorId {
    Ana,
    Alexandre,
    /// Background customer at the snack bar.
    Patron,
    Waitress,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Facing {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Facing {
    pub fn opposite(self) -> Self {
        match self {
            Facing::Down => Facing::Up,
            Facing::Up => Facing::Down,
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    pub fn vector(self) -> Vec2 {
        match self {
            Facing::Down => Vec2::Y,
            Facing::Up => Vec2::NEG_Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }

    /// Dominant axis of a direction, for walk animations.
    pub fn from_direction(direction: Vec2) -> Self {
        if direction.x.abs() > direction.y.abs() {
            if direction.x < 0.0 { Facing::Left } else { Facing::Right }
        } else if direction.y < 0.0 {
            Facing::Up
        } else {
            Facing::Down
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Last facing set by input or a script; `None` until the first one.
    pub facing: Option<Facing>,
    /// Walk animation currently playing.
    pub animation: Option<Facing>,
    pub visible: bool,
    pub movable: bool,
    pub body_enabled: bool,
}

impl Actor {
    fn at(x: f32, y: f32, visible: bool) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            facing: None,
            animation: None,
            visible,
            movable: true,
            body_enabled: true,
        }
    }

    fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
        self.animation = None;
    }
}

/// Reported once when a scripted walk finishes both legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveTicket(u64);

#[derive(Debug, Clone)]
enum Leg {
    Horizontal { from: f32, to: f32 },
    Vertical { from: f32, to: f32 },
}

#[derive(Debug, Clone)]
struct Walk {
    ticket: MoveTicket,
    actor: ActorId,
    leg: Leg,
    elapsed: f32,
    duration: f32,
    vertical_duration: f32,
    target: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
enum CameraMode {
    Follow(ActorId),
    Pan {
        target: ActorId,
        from: Vec2,
        to: Vec2,
        elapsed: f32,
        duration: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub position: Vec2,
    mode: CameraMode,
    lerp: f32,
}

impl CameraRig {
    /// The actor being followed or panned to.
    #[cfg(test)]
    pub fn target(&self) -> ActorId {
        match self.mode {
            CameraMode::Follow(actor) | CameraMode::Pan { target: actor, .. } => actor,
        }
    }

    #[cfg(test)]
    pub fn is_panning(&self) -> bool {
        matches!(self.mode, CameraMode::Pan { .. })
    }
}

#[derive(Resource, Debug, Clone)]
pub struct Stage {
    actors: [Actor; 4],
    actor_size: f32,
    walks: Vec<Walk>,
    next_ticket: u64,
    pub camera: CameraRig,
}

impl Stage {
    /// The cast at their opening marks: Ana by her house, Alexandre at the
    /// school gate, the background pair hidden until needed.
    pub fn story(actor_size: f32, camera_lerp: f32) -> Self {
        let ana = Actor::at(1488.0, 496.0, true);
        let camera = CameraRig {
            position: ana.position,
            mode: CameraMode::Follow(ActorId::Ana),
            lerp: camera_lerp,
        };
        Self {
            actors: [
                ana,
                Actor::at(2982.0, 580.0, true),
                Actor::at(1488.0, 496.0, false),
                Actor::at(2982.0, 580.0, false),
            ],
            actor_size,
            walks: Vec::new(),
            next_ticket: 0,
            camera,
        }
    }

    pub fn actor(&self, id: ActorId) -> &Actor {
        &self.actors[id as usize]
    }

    pub fn actor_mut(&mut self, id: ActorId) -> &mut Actor {
        &mut self.actors[id as usize]
    }

    pub fn place(&mut self, id: ActorId, position: Vec2) {
        self.actor_mut(id).position = position;
    }

    pub fn bounds(&self, id: ActorId) -> Rect {
        Rect::from_center_size(self.actor(id).position, Vec2::splat(self.actor_size))
    }

    pub fn stop(&mut self, id: ActorId) {
        self.actor_mut(id).halt();
    }

    /// Halts both leads.
    pub fn stop_all(&mut self) {
        self.stop(ActorId::Ana);
        self.stop(ActorId::Alexandre);
    }

    pub fn face_permanently(&mut self, id: ActorId, facing: Facing) {
        let actor = self.actor_mut(id);
        actor.animation = None;
        actor.facing = Some(facing);
    }

    /// Turns `other` to face back at `first`, then halts both leads.
    pub fn look_at(&mut self, first: ActorId, other: ActorId) {
        let facing = self.actor(first).facing.unwrap_or_default().opposite();
        self.face_permanently(other, facing);
        self.stop_all();
    }

    /// Player input. Ignored for frozen or mid-walk actors.
    pub fn drive(&mut self, id: ActorId, direction: Option<Facing>, speed: f32) {
        let actor = self.actor_mut(id);
        if !actor.movable || !actor.body_enabled {
            return;
        }
        match direction {
            Some(facing) => {
                actor.velocity = facing.vector() * speed;
                actor.facing = Some(facing);
                actor.animation = Some(facing);
            }
            None => actor.halt(),
        }
    }

    /// Walks `follower` towards `leader` until within `min_distance`.
    pub fn pursue(&mut self, follower: ActorId, leader: ActorId, speed: f32, min_distance: f32) {
        let offset = self.actor(leader).position - self.actor(follower).position;
        let actor = self.actor_mut(follower);
        if !actor.movable || !actor.body_enabled {
            return;
        }
        if offset.length() > min_distance {
            let facing = Facing::from_direction(offset);
            actor.velocity = offset.normalize_or_zero() * speed;
            actor.facing = Some(facing);
            actor.animation = Some(facing);
        } else {
            actor.halt();
        }
    }

    /// Walks horizontally then vertically to `target`, with the body
    /// disabled until arrival.
    pub fn move_to(&mut self, id: ActorId, target: Vec2, horizontal: f32, vertical: f32) -> MoveTicket {
        let ticket = MoveTicket(self.next_ticket);
        self.next_ticket += 1;
        self.walks.retain(|walk| walk.actor != id);

        let actor = self.actor_mut(id);
        actor.velocity = Vec2::ZERO;
        actor.body_enabled = false;
        actor.animation = Some(if target.x < actor.position.x {
            Facing::Left
        } else {
            Facing::Right
        });
        let from = actor.position.x;

        self.walks.push(Walk {
            ticket,
            actor: id,
            leg: Leg::Horizontal { from, to: target.x },
            elapsed: 0.0,
            duration: horizontal,
            vertical_duration: vertical,
            target,
        });
        ticket
    }

    pub fn is_walking(&self, id: ActorId) -> bool {
        self.walks.iter().any(|walk| walk.actor == id)
    }

    /// Eases the camera over to `target`, then follows it and hands it control.
    pub fn pan_to(&mut self, target: ActorId, duration: f32) {
        self.camera.mode = CameraMode::Pan {
            target,
            from: self.camera.position,
            to: self.actor(target).position,
            elapsed: 0.0,
            duration,
        };
    }

    /// Follows `target` immediately.
    pub fn follow(&mut self, target: ActorId) {
        self.camera.position = self.actor(target).position;
        self.camera.mode = CameraMode::Follow(target);
        self.release(target);
    }

    /// Integrates velocities, steps scripted walks and the camera. Returns the
    /// walks that finished this tick.
    pub fn tick(&mut self, dt: f32) -> Vec<MoveTicket> {
        for actor in &mut self.actors {
            if actor.movable && actor.body_enabled {
                actor.position += actor.velocity * dt;
            }
        }
        let finished = self.step_walks(dt);
        self.step_camera(dt);
        finished
    }

    fn step_walks(&mut self, dt: f32) -> Vec<MoveTicket> {
        let mut finished = Vec::new();
        let mut walks = std::mem::take(&mut self.walks);
        walks.retain_mut(|walk| {
            walk.elapsed += dt;
            let t = if walk.duration > 0.0 {
                (walk.elapsed / walk.duration).min(1.0)
            } else {
                1.0
            };
            let actor = &mut self.actors[walk.actor as usize];
            match walk.leg {
                Leg::Horizontal { from, to } => {
                    actor.position.x = from + (to - from) * t;
                    if t >= 1.0 {
                        walk.leg = Leg::Vertical {
                            from: actor.position.y,
                            to: walk.target.y,
                        };
                        walk.elapsed = 0.0;
                        walk.duration = walk.vertical_duration;
                        actor.animation = Some(Facing::Up);
                    }
                    true
                }
                Leg::Vertical { from, to } => {
                    actor.position.y = from + (to - from) * t;
                    if t < 1.0 {
                        return true;
                    }
                    actor.position = walk.target;
                    actor.halt();
                    actor.body_enabled = true;
                    finished.push(walk.ticket);
                    false
                }
            }
        });
        self.walks = walks;
        finished
    }

    fn step_camera(&mut self, dt: f32) {
        match self.camera.mode {
            CameraMode::Follow(target) => {
                let goal = self.actor(target).position;
                // Per-frame lerp at 60 fps, scaled to the actual frame time.
                let blend = 1.0 - (1.0 - self.camera.lerp).powf(dt * 60.0);
                self.camera.position = self.camera.position.lerp(goal, blend);
            }
            CameraMode::Pan {
                target,
                from,
                to,
                elapsed,
                duration,
            } => {
                let elapsed = elapsed + dt;
                let t = if duration > 0.0 { (elapsed / duration).min(1.0) } else { 1.0 };
                let eased = 0.5 - 0.5 * (PI * t).cos();
                self.camera.position = from.lerp(to, eased);
                if t >= 1.0 {
                    self.camera.mode = CameraMode::Follow(target);
                    self.release(target);
                } else {
                    self.camera.mode = CameraMode::Pan {
                        target,
                        from,
                        to,
                        elapsed,
                        duration,
                    };
                }
            }
        }
    }

    fn release(&mut self, id: ActorId) {
        let actor = self.actor_mut(id);
        actor.movable = true;
        actor.visible = true;
    }
}

// Rendering.

const ACTOR_COLORS: [Color; 4] = [
    Color::srgb(0.93, 0.45, 0.62),
    Color::srgb(0.29, 0.48, 0.85),
    Color::srgb(0.62, 0.55, 0.42),
    Color::srgb(0.85, 0.78, 0.35),
];

#[derive(Component)]
struct ActorSprite(ActorId);

/// Marks which way a sprite faces.
#[derive(Component)]
struct FacingMark(ActorId);

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_actor_sprites(mut commands: Commands, stage: Res<Stage>) {
    for id in ActorId::iter() {
        let size = stage.bounds(id).size();
        commands
            .spawn((
                ActorSprite(id),
                Name::new(<&'static str>::from(id)),
                Sprite::from_color(ACTOR_COLORS[id as usize], size),
                Transform::default(),
                Visibility::Hidden,
                DespawnOnExit(Sections::Story),
            ))
            .with_children(|parent| {
                parent.spawn((
                    FacingMark(id),
                    Sprite::from_color(Color::srgba(0.0, 0.0, 0.0, 0.6), size * 0.25),
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            });
    }
}

fn world_to_render(position: Vec2) -> Vec2 {
    Vec2::new(position.x, -position.y)
}

fn sync_actor_sprites(
    stage: Res<Stage>,
    mut sprites: Query<(&ActorSprite, &mut Transform, &mut Visibility), Without<FacingMark>>,
    mut marks: Query<(&FacingMark, &mut Transform), Without<ActorSprite>>,
) {
    for (ActorSprite(id), mut transform, mut visibility) in &mut sprites {
        let actor = stage.actor(*id);
        // Lower on the map draws on top.
        transform.translation = world_to_render(actor.position).extend(1.0 + actor.position.y * 1e-4);
        *visibility = if actor.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for (FacingMark(id), mut transform) in &mut marks {
        let actor = stage.actor(*id);
        let facing = actor.animation.or(actor.facing).unwrap_or_default();
        let offset = world_to_render(facing.vector()) * stage.bounds(*id).size().x * 0.3;
        transform.translation = offset.extend(0.1);
    }
}

fn sync_camera(stage: Res<Stage>, mut cameras: Query<&mut Transform, With<Camera2d>>) {
    let Ok(mut transform) = cameras.single_mut() else {
        return;
    };
    let position = world_to_render(stage.camera.position);
    transform.translation.x = position.x;
    transform.translation.y = position.y;
}
