//! Radar HUD
//!
//! A circular minimap in the lower-left corner showing every body's
//! bearing relative to the camera. Projection is done by the core radar
//! math; this module only owns the UI nodes. Blips for out-of-range
//! bodies sit dimmed on the disk rim.

use bevy::prelude::*;
use orrery_core::{radar, BodyId};

use crate::bodies::{body_world_position, Body};
use crate::camera::Rig;
use crate::input::NavCommand;
use crate::{NavSet, RadarSettings};

const BLIP_SIZE: f32 = 6.0;
const DISK_COLOR: Color = Color::srgba(0.05, 0.12, 0.08, 0.75);
const BLIP_COLOR: Color = Color::srgb(0.35, 1.0, 0.45);
const BLIP_CLAMPED_COLOR: Color = Color::srgba(0.35, 1.0, 0.45, 0.35);
const LOCKED_COLOR: Color = Color::srgb(1.0, 0.75, 0.25);

/// Whether the radar HUD is currently shown
#[derive(Debug, Clone, Resource)]
pub struct HudVisible(pub bool);

impl Default for HudVisible {
    fn default() -> Self {
        Self(true)
    }
}

/// Root node of the radar disk
#[derive(Debug, Component)]
struct RadarDisk;

/// One blip, keyed by the body it tracks
#[derive(Debug, Component)]
struct RadarBlip(BodyId);

pub struct RadarHudPlugin;

impl Plugin for RadarHudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HudVisible>()
            .add_systems(Startup, spawn_disk)
            .add_systems(
                Update,
                (toggle_hud, update_radar).chain().in_set(NavSet::Radar),
            );
    }
}

fn spawn_disk(mut commands: Commands, radar: Res<RadarSettings>) {
    let diameter = radar.0.radius * 2.0;
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(16.0),
            width: Val::Px(diameter),
            height: Val::Px(diameter),
            ..default()
        },
        BackgroundColor(DISK_COLOR),
        BorderRadius::MAX,
        RadarDisk,
    ));
}

fn toggle_hud(
    mut commands: EventReader<NavCommand>,
    mut visible: ResMut<HudVisible>,
    mut disk: Query<&mut Visibility, With<RadarDisk>>,
) {
    for command in commands.read() {
        if *command == NavCommand::ToggleHud {
            visible.0 = !visible.0;
            if let Ok(mut visibility) = disk.single_mut() {
                *visibility = if visible.0 {
                    Visibility::Inherited
                } else {
                    Visibility::Hidden
                };
            }
        }
    }
}

/// Re-project every body into the disk. Blips are spawned lazily the
/// first frame their body appears, so the system spec never needs to
/// be known at HUD build time.
fn update_radar(
    mut commands: Commands,
    radar: Res<RadarSettings>,
    visible: Res<HudVisible>,
    rig: Res<Rig>,
    bodies: Query<(&Body, &Transform, Option<&ChildOf>)>,
    transforms: Query<&Transform>,
    disk: Query<Entity, With<RadarDisk>>,
    mut blips: Query<(&RadarBlip, &mut Node, &mut BackgroundColor)>,
) {
    if !visible.0 {
        return;
    }
    let Ok(disk) = disk.single() else {
        return;
    };

    let locked = rig.0.locked_target();
    let center = radar.0.radius;

    for (body, _, _) in &bodies {
        let Some(world) = body_world_position(&body.id, &bodies, &transforms) else {
            continue;
        };
        let point = radar::project(rig.0.translation, rig.0.rotation, world, &radar.0);

        // +y in radar space is toward the top of the disk; UI tops grow
        // downward
        let left = center + point.offset.x - BLIP_SIZE / 2.0;
        let top = center - point.offset.y - BLIP_SIZE / 2.0;
        let color = if locked == Some(&body.id) {
            LOCKED_COLOR
        } else if point.clamped {
            BLIP_CLAMPED_COLOR
        } else {
            BLIP_COLOR
        };

        match blips.iter_mut().find(|(blip, _, _)| blip.0 == body.id) {
            Some((_, mut node, mut background)) => {
                node.left = Val::Px(left);
                node.top = Val::Px(top);
                background.0 = color;
            }
            None => {
                let blip = commands
                    .spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            left: Val::Px(left),
                            top: Val::Px(top),
                            width: Val::Px(BLIP_SIZE),
                            height: Val::Px(BLIP_SIZE),
                            ..default()
                        },
                        BackgroundColor(color),
                        BorderRadius::MAX,
                        RadarBlip(body.id.clone()),
                    ))
                    .id();
                commands.entity(blip).insert(ChildOf(disk));
            }
        }
    }
}
