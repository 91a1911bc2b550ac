//! Camera driver
//!
//! Owns the [`CameraRig`] as a resource and drives the camera entity
//! from it. The rig is updated from the frame's fused intent first,
//! then its pose is copied onto the camera transform, so the rig stays
//! testable without an ECS in the loop.

use bevy::prelude::*;
use orrery_core::CameraRig;
use tracing::info;

use crate::bodies::{body_world_position, Body};
use crate::input::{FrameIntent, NavCommand, PadState};
use crate::{NavSet, NavSettings};

/// Marker for the one navigable camera
#[derive(Debug, Component)]
pub struct MainCamera;

/// The navigation rig driving the camera entity
#[derive(Debug, Clone, Resource)]
pub struct Rig(pub CameraRig);

impl Default for Rig {
    fn default() -> Self {
        // Above and behind the system, looking at the star
        Self(CameraRig::looking_at(
            Vec3::new(0.0, 120.0, 260.0),
            Vec3::ZERO,
        ))
    }
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Rig>()
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (update_rig, sync_camera).chain().in_set(NavSet::Camera),
            );
    }
}

fn spawn_camera(mut commands: Commands, rig: Res<Rig>) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(rig.0.translation).with_rotation(rig.0.rotation),
        MainCamera,
    ));
}

/// Apply mode commands and the frame's intent to the rig.
///
/// The lock target's world position is resolved fresh here, after the
/// kinematics pass, so the chase offset follows this frame's orbit
/// positions rather than last frame's.
fn update_rig(
    time: Res<Time>,
    nav: Res<NavSettings>,
    mut rig: ResMut<Rig>,
    mut intent: ResMut<FrameIntent>,
    pad: Res<PadState>,
    mut commands: EventReader<NavCommand>,
    mut cycle: Local<usize>,
    bodies: Query<(&Body, &Transform, Option<&ChildOf>)>,
    transforms: Query<&Transform>,
) {
    for command in commands.read() {
        match command {
            NavCommand::LockNext => {
                // Stable cycle order regardless of spawn order
                let mut ids: Vec<_> =
                    bodies.iter().map(|(body, _, _)| body.clone()).collect();
                ids.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
                if ids.is_empty() {
                    continue;
                }
                let next = &ids[*cycle % ids.len()];
                *cycle += 1;
                info!(target = %next.id, "camera lock");
                rig.0.lock_on(next.id.clone(), next.radius, &nav.0);
            }
            NavCommand::Unlock => rig.0.unlock(),
            NavCommand::ToggleTop => rig.0.toggle_top(&nav.0),
            NavCommand::ToggleHud => {}
        }
    }

    let target_position = rig
        .0
        .locked_target()
        .cloned()
        .and_then(|id| body_world_position(&id, &bodies, &transforms));

    rig.0.update(
        time.delta_secs(),
        &mut intent.0,
        &pad.0,
        target_position,
        &nav.0,
    );
}

fn sync_camera(rig: Res<Rig>, mut camera: Query<&mut Transform, With<MainCamera>>) {
    if let Ok(mut transform) = camera.single_mut() {
        transform.translation = rig.0.translation;
        transform.rotation = rig.0.rotation;
    }
}
