//! Device input fusion
//!
//! Keyboard edges, mouse motion/wheel and the first connected gamepad
//! are fused into one [`FrameIntent`] plus a polled [`PadState`] each
//! frame, before the camera system runs. Mode hotkeys are surfaced as
//! [`NavCommand`] events instead of flags so each press acts exactly
//! once.

use bevy::input::gamepad::Gamepad;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use orrery_core::{deadzone, ControlIntent, IntentFlag, PadSample};

use crate::{NavSet, NavSettings};

/// The frame's fused control intent, consumed by the camera system
#[derive(Debug, Clone, Resource, Default)]
pub struct FrameIntent(pub ControlIntent);

/// Gamepad snapshot for this frame
#[derive(Debug, Clone, Resource, Default)]
pub struct PadState(pub PadSample);

/// Discrete mode changes, one event per press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Event)]
pub enum NavCommand {
    /// Cycle camera lock to the next body
    LockNext,
    /// Release any camera lock
    Unlock,
    /// Toggle the top-down view
    ToggleTop,
    /// Show or hide the radar HUD
    ToggleHud,
}

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameIntent>()
            .init_resource::<PadState>()
            .add_event::<NavCommand>()
            .add_systems(
                Update,
                (keyboard_intent, mouse_intent, gamepad_sample, mode_hotkeys)
                    .in_set(NavSet::Input),
            );
    }
}

/// Navigation key bindings. Held keys keep their flag set until the
/// release edge arrives.
const KEYMAP: &[(KeyCode, IntentFlag)] = &[
    (KeyCode::KeyW, IntentFlag::Forward),
    (KeyCode::KeyS, IntentFlag::Back),
    (KeyCode::KeyA, IntentFlag::Left),
    (KeyCode::KeyD, IntentFlag::Right),
    (KeyCode::KeyR, IntentFlag::Up),
    (KeyCode::KeyF, IntentFlag::Down),
    (KeyCode::KeyQ, IntentFlag::RollLeft),
    (KeyCode::KeyE, IntentFlag::RollRight),
    (KeyCode::ArrowUp, IntentFlag::PitchUp),
    (KeyCode::ArrowDown, IntentFlag::PitchDown),
    (KeyCode::ArrowLeft, IntentFlag::YawLeft),
    (KeyCode::ArrowRight, IntentFlag::YawRight),
];

fn keyboard_intent(keyboard: Res<ButtonInput<KeyCode>>, mut intent: ResMut<FrameIntent>) {
    for &(key, flag) in KEYMAP {
        if keyboard.just_pressed(key) {
            intent.0.set(flag, true);
        }
        if keyboard.just_released(key) {
            intent.0.set(flag, false);
        }
    }
    // Either shift key boosts; polled rather than edge-driven so
    // releasing one while holding the other keeps the boost
    let boost =
        keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    intent.0.set(IntentFlag::Boost, boost);
}

fn mouse_intent(
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    nav: Res<NavSettings>,
    mut intent: ResMut<FrameIntent>,
) {
    for event in motion.read() {
        intent.0.add_mouse_delta(event.delta);
    }
    for event in wheel.read() {
        // Line-scroll units are whole detents; pixel scrolling arrives
        // much finer and is scaled down to match
        let factor = match event.unit {
            bevy::input::mouse::MouseScrollUnit::Line => 1.0,
            bevy::input::mouse::MouseScrollUnit::Pixel => 0.05,
        };
        intent.0.zoom_velocity += event.y * factor * nav.0.zoom_increment;
    }
}

/// Zoom step for the held D-pad state: up backs the camera away,
/// down pulls it in.
fn dpad_zoom_steps(up_pressed: bool, down_pressed: bool) -> f32 {
    let mut steps = 0.0;
    if up_pressed {
        steps -= 1.0;
    }
    if down_pressed {
        steps += 1.0;
    }
    steps
}

/// Poll the first connected gamepad into this frame's [`PadState`].
/// No gamepad degrades to the default (all-idle) sample, so a
/// mid-session disconnect cannot leave stale stick values behind.
fn gamepad_sample(gamepads: Query<&Gamepad>, nav: Res<NavSettings>, mut pad: ResMut<PadState>) {
    let Some(gamepad) = gamepads.iter().next() else {
        pad.0 = PadSample::default();
        return;
    };

    let threshold = nav.0.deadzone;
    let move_stick = deadzone(
        Vec2::new(
            gamepad.get(GamepadAxis::LeftStickX).unwrap_or(0.0),
            gamepad.get(GamepadAxis::LeftStickY).unwrap_or(0.0),
        ),
        threshold,
    );
    let look_stick = deadzone(
        Vec2::new(
            gamepad.get(GamepadAxis::RightStickX).unwrap_or(0.0),
            gamepad.get(GamepadAxis::RightStickY).unwrap_or(0.0),
        ),
        threshold,
    );

    let zoom_steps = dpad_zoom_steps(
        gamepad.pressed(GamepadButton::DPadUp),
        gamepad.pressed(GamepadButton::DPadDown),
    );

    pad.0 = PadSample {
        move_stick,
        look_stick,
        up: gamepad.pressed(GamepadButton::South),
        down: gamepad.pressed(GamepadButton::East),
        roll_left: gamepad.pressed(GamepadButton::LeftTrigger),
        roll_right: gamepad.pressed(GamepadButton::RightTrigger),
        boost: gamepad
            .get(GamepadAxis::RightZ)
            .map(|v| v >= 0.5)
            .unwrap_or(false)
            || gamepad.pressed(GamepadButton::RightTrigger2),
        zoom_steps,
    };
}

fn mode_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<NavCommand>,
) {
    if keyboard.just_pressed(KeyCode::Tab) {
        commands.write(NavCommand::LockNext);
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        commands.write(NavCommand::Unlock);
    }
    if keyboard.just_pressed(KeyCode::KeyT) {
        commands.write(NavCommand::ToggleTop);
    }
    if keyboard.just_pressed(KeyCode::KeyH) {
        commands.write(NavCommand::ToggleHud);
    }
}
