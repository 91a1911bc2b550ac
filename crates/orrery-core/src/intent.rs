//! Per-frame control intent
//!
//! All input sources funnel into one frame-coherent record: keyboard
//! edges set held flags, mouse motion accumulates into a delta that is
//! drained exactly once when consumed, and gamepad state is polled into
//! a supplemental [`PadSample`] each frame. The camera rig consumes
//! both; nothing else reads them.

use glam::Vec2;

/// Which intent flag a discrete input edge maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentFlag {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    RollLeft,
    RollRight,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    Boost,
}

/// Frame-coherent snapshot of navigation intent.
///
/// Boolean flags are held state driven by key edges; `mouse_delta` and
/// `zoom_velocity` are accumulators. The mouse delta is drained on
/// consumption so each pixel of motion applies exactly once regardless
/// of frame rate; zoom velocity persists across frames and decays under
/// the rig's damping rule.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub boost: bool,
    /// Accumulated mouse motion since last consumption
    pub mouse_delta: Vec2,
    /// Zoom velocity accumulator (positive = toward / closer)
    pub zoom_velocity: f32,
}

impl ControlIntent {
    /// Apply a discrete device edge (key down / key up)
    pub fn set(&mut self, flag: IntentFlag, pressed: bool) {
        match flag {
            IntentFlag::Forward => self.forward = pressed,
            IntentFlag::Back => self.back = pressed,
            IntentFlag::Left => self.left = pressed,
            IntentFlag::Right => self.right = pressed,
            IntentFlag::Up => self.up = pressed,
            IntentFlag::Down => self.down = pressed,
            IntentFlag::RollLeft => self.roll_left = pressed,
            IntentFlag::RollRight => self.roll_right = pressed,
            IntentFlag::PitchUp => self.pitch_up = pressed,
            IntentFlag::PitchDown => self.pitch_down = pressed,
            IntentFlag::YawLeft => self.yaw_left = pressed,
            IntentFlag::YawRight => self.yaw_right = pressed,
            IntentFlag::Boost => self.boost = pressed,
        }
    }

    /// Accumulate mouse motion from a motion event
    pub fn add_mouse_delta(&mut self, delta: Vec2) {
        self.mouse_delta += delta;
    }

    /// Drain the accumulated mouse delta. Draining twice without an
    /// intervening motion event yields zero, so double consumption in
    /// one frame has no effect.
    pub fn take_mouse_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.mouse_delta)
    }

    /// True if any translational intent is active this frame, from
    /// keyboard flags or the gamepad movement stick. Rotation-only
    /// input never counts.
    pub fn any_translation(&self, pad: &PadSample) -> bool {
        self.forward
            || self.back
            || self.left
            || self.right
            || self.up
            || self.down
            || pad.up
            || pad.down
            || pad.move_stick != Vec2::ZERO
    }
}

/// Supplemental gamepad state, polled once per frame.
///
/// Sticks are already deadzone-filtered. The right stick is handed to
/// the camera rig directly (rotation must stay analog, not boolean),
/// while the left stick biases the translate flags. An absent gamepad
/// degrades to `PadSample::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PadSample {
    /// Left stick, +x right / +y forward
    pub move_stick: Vec2,
    /// Right stick, +x right / +y up
    pub look_stick: Vec2,
    pub up: bool,
    pub down: bool,
    pub roll_left: bool,
    pub roll_right: bool,
    pub boost: bool,
    /// D-pad zoom steps this frame: +1 zooms in (D-pad down), -1
    /// zooms out (D-pad up), 0 idle. Held buttons contribute every
    /// polled frame, which is intentional: the accumulator produces
    /// acceleration-like zoom.
    pub zoom_steps: f32,
}

/// Radial deadzone filter: stick vectors shorter than `threshold` are
/// treated as zero to suppress drift.
pub fn deadzone(v: Vec2, threshold: f32) -> Vec2 {
    if v.length() < threshold {
        Vec2::ZERO
    } else {
        v
    }
}
