//! Body spawning and orbital motion
//!
//! Each configured body becomes a sphere entity carrying its orbital
//! elements; moons are spawned as children of their parent so the
//! scene graph composes their motion instead of re-adding the parent's.

use bevy::prelude::*;
use orrery_core::{kinematics, BodyId, BodySpec, OrbitalElements};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::{NavSet, NavSettings};

/// Marker plus identity for a tracked body
#[derive(Debug, Clone, Component)]
pub struct Body {
    pub id: BodyId,
    /// Physical radius in scene units
    pub radius: f32,
}

/// Orbital elements driving this body's transform
#[derive(Debug, Clone, Component)]
pub struct Orbit(pub OrbitalElements);

/// The declarative planetary system, inserted by the viewer from its
/// configuration
#[derive(Debug, Clone, Resource, Default)]
pub struct SystemSpec(pub Vec<BodySpec>);

pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SystemSpec>()
            .add_systems(Startup, (setup_lighting, spawn_system))
            .add_systems(Update, advance_orbits.in_set(NavSet::Kinematics));
    }
}

fn setup_lighting(mut commands: Commands) {
    // The star is the only real light source; a faint ambient keeps
    // night sides readable
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.8, 0.85, 1.0),
        brightness: 60.0,
        ..default()
    });
    commands.spawn((
        PointLight {
            intensity: 5e9,
            range: 2000.0,
            shadows_enabled: false,
            color: Color::srgb(1.0, 0.95, 0.85),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
}

/// Build the planetary system from the declarative spec.
///
/// Roots spawn first; satellites attach to their parent entity and a
/// satellite naming a missing parent is skipped with a warning rather
/// than failing scene assembly.
fn spawn_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    spec: Res<SystemSpec>,
) {
    let mut spawned: HashMap<String, Entity> = HashMap::new();

    for body in spec.0.iter().filter(|b| b.parent.is_none()) {
        let entity = spawn_body(&mut commands, &mut meshes, &mut materials, body);
        spawned.insert(body.id.clone(), entity);
    }

    for body in spec.0.iter().filter(|b| b.parent.is_some()) {
        let parent_id = body.parent.as_deref().unwrap_or_default();
        match spawned.get(parent_id) {
            Some(&parent) => {
                let entity = spawn_body(&mut commands, &mut meshes, &mut materials, body);
                commands.entity(entity).insert(ChildOf(parent));
                spawned.insert(body.id.clone(), entity);
            }
            None => {
                warn!(body = %body.id, parent = %parent_id, "satellite parent not found, skipping");
            }
        }
    }

    info!(bodies = spawned.len(), "planetary system assembled");
}

fn spawn_body(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    spec: &BodySpec,
) -> Entity {
    let color = Color::srgb(spec.color[0], spec.color[1], spec.color[2]);
    let material = if spec.emissive {
        StandardMaterial {
            base_color: color,
            emissive: LinearRgba::rgb(
                spec.color[0] * 20.0,
                spec.color[1] * 20.0,
                spec.color[2] * 20.0,
            ),
            ..default()
        }
    } else {
        StandardMaterial {
            base_color: color,
            metallic: 0.1,
            perceptual_roughness: 0.8,
            ..default()
        }
    };

    commands
        .spawn((
            Mesh3d(meshes.add(Sphere::new(spec.body_radius).mesh().uv(48, 24))),
            MeshMaterial3d(materials.add(material)),
            Transform::default(),
            Body {
                id: spec.body_id(),
                radius: spec.body_radius,
            },
            Orbit(spec.elements()),
        ))
        .id()
}

/// Recompute every body's parent-relative translation from elapsed
/// time. Runs first in the frame so input, camera and radar all see
/// this frame's positions.
fn advance_orbits(
    time: Res<Time>,
    nav: Res<NavSettings>,
    mut bodies: Query<(&Orbit, &mut Transform), With<Body>>,
) {
    let t = time.elapsed_secs();
    let scale = nav.0.orbit_speed_scale;
    for (orbit, mut transform) in &mut bodies {
        if orbit.0.radius > 0.0 {
            transform.translation = kinematics::body_translation(&orbit.0, t, scale);
        }
    }
}

/// Resolve a body's world position for this frame by composing its
/// parent-relative translation with its parent's. Satellites nest one
/// level (moons around planets), so a single hop suffices.
pub fn body_world_position(
    id: &BodyId,
    bodies: &Query<(&Body, &Transform, Option<&ChildOf>)>,
    transforms: &Query<&Transform>,
) -> Option<Vec3> {
    let (_, transform, child_of) = bodies.iter().find(|(body, _, _)| &body.id == id)?;
    let mut position = transform.translation;
    if let Some(child_of) = child_of {
        if let Ok(parent_transform) = transforms.get(child_of.0) {
            position += parent_transform.translation;
        }
    }
    Some(position)
}
