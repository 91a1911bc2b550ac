//! Camera rig state machine
//!
//! The rig owns the camera pose and the navigation mode: free 6-DOF
//! flight, a lock-on spherical orbit around a chosen body, or the
//! top-down variant of that orbit. Mode transitions always complete
//! within the frame they are requested; a lock target that vanished
//! from the scene forces a fall-back to free flight instead of a stale
//! dereference.

use crate::body::BodyId;
use crate::config::NavConfig;
use crate::intent::{ControlIntent, PadSample};
use glam::{Mat3, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};
use tracing::{debug, warn};

/// Orbit distance never drops below this multiple of the target radius
pub const MIN_DISTANCE_FACTOR: f32 = 1.5;

/// Keeps the vertical orbit angle away from the poles
const PHI_EPSILON: f32 = 0.02;
const PHI_LIMIT: f32 = FRAC_PI_2 - PHI_EPSILON;

/// Zoom velocities below this are snapped to rest
const ZOOM_EPSILON: f32 = 1e-3;

/// Fixed starting angles for a fresh lock: neither edge-on nor overhead
const LOCK_THETA: f32 = FRAC_PI_4;
const LOCK_PHI: f32 = 0.3;

/// Spherical-orbit state shared by the chase and top-down lock views
#[derive(Debug, Clone, PartialEq)]
pub struct LockState {
    /// Identifier resolved against the scene each frame; the rig never
    /// owns the body
    pub target: BodyId,
    /// Physical radius of the target, drives the distance floor
    pub target_radius: f32,
    /// Orbit distance from the target center
    pub distance: f32,
    /// Horizontal orbit angle
    pub theta: f32,
    /// Vertical orbit angle, clamped inside (-pi/2, pi/2)
    pub phi: f32,
}

impl LockState {
    fn min_distance(&self) -> f32 {
        MIN_DISTANCE_FACTOR * self.target_radius
    }

    /// Camera offset from the target for the chase view
    fn chase_offset(&self) -> Vec3 {
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        Vec3::new(
            self.distance * cos_phi * sin_theta,
            self.distance * sin_phi,
            self.distance * cos_phi * cos_theta,
        )
    }
}

/// Navigation mode as an explicit tagged state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RigMode {
    #[default]
    Free,
    LockedChase(LockState),
    LockedTop(LockState),
}

/// The camera rig: pose plus navigation mode.
///
/// `update` is called exactly once per frame, after kinematics and
/// input sampling; it drains the intent's mouse accumulator and decays
/// its zoom velocity, and leaves the pose ready for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub translation: Vec3,
    pub rotation: Quat,
    /// Vertical reference, flipped to -Z for top-down views
    pub up: Vec3,
    pub mode: RigMode,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            up: Vec3::Y,
            mode: RigMode::Free,
        }
    }
}

impl CameraRig {
    /// Free-flight rig at `position` oriented toward `target`
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        Self {
            translation: position,
            rotation: look_rotation(target - position, Vec3::Y),
            up: Vec3::Y,
            mode: RigMode::Free,
        }
    }

    pub fn is_locked(&self) -> bool {
        !matches!(self.mode, RigMode::Free)
    }

    /// Target of the current lock, if any
    pub fn locked_target(&self) -> Option<&BodyId> {
        match &self.mode {
            RigMode::Free => None,
            RigMode::LockedChase(lock) | RigMode::LockedTop(lock) => Some(&lock.target),
        }
    }

    /// Enter the lock-on orbit around `target`
    pub fn lock_on(&mut self, target: BodyId, target_radius: f32, cfg: &NavConfig) {
        let distance = (target_radius * cfg.lock_distance_multiplier)
            .max(MIN_DISTANCE_FACTOR * target_radius);
        debug!(target = %target, distance, "lock-on");
        self.up = Vec3::Y;
        self.mode = RigMode::LockedChase(LockState {
            target,
            target_radius,
            distance,
            theta: LOCK_THETA,
            phi: LOCK_PHI,
        });
    }

    /// Drop any lock and return to free flight. Idempotent.
    pub fn unlock(&mut self) {
        if self.is_locked() {
            debug!("unlock");
        }
        self.mode = RigMode::Free;
        self.up = Vec3::Y;
    }

    /// Toggle the top-down view.
    ///
    /// While locked this flips the orbit offset overhead without
    /// touching the lock state. While free it snaps to the fixed
    /// absolute overhead pose - a separate, non-orbiting feature.
    pub fn toggle_top(&mut self, cfg: &NavConfig) {
        self.mode = match std::mem::take(&mut self.mode) {
            RigMode::Free => {
                self.translation = Vec3::new(0.0, cfg.top_height, 0.0);
                self.up = Vec3::NEG_Z;
                self.rotation = look_rotation(Vec3::NEG_Y, self.up);
                RigMode::Free
            }
            RigMode::LockedChase(lock) => {
                self.up = Vec3::NEG_Z;
                RigMode::LockedTop(lock)
            }
            RigMode::LockedTop(lock) => {
                self.up = Vec3::Y;
                RigMode::LockedChase(lock)
            }
        };
    }

    /// Where the locked camera wants to sit this frame, before
    /// smoothing. None in free mode.
    pub fn desired_position(&self, target_position: Vec3) -> Option<Vec3> {
        match &self.mode {
            RigMode::Free => None,
            RigMode::LockedChase(lock) => Some(target_position + lock.chase_offset()),
            RigMode::LockedTop(lock) => {
                Some(target_position + Vec3::new(0.0, lock.distance, 0.0))
            }
        }
    }

    /// Per-frame update. `target_position` is the lock target's world
    /// position resolved fresh this frame; `None` while locked means
    /// the target vanished and forces a transition to free flight.
    pub fn update(
        &mut self,
        dt: f32,
        intent: &mut ControlIntent,
        pad: &PadSample,
        target_position: Option<Vec3>,
        cfg: &NavConfig,
    ) {
        // Held D-pad contributes one zoom increment per polled frame
        intent.zoom_velocity += pad.zoom_steps * cfg.zoom_increment;

        if self.is_locked() {
            if intent.any_translation(pad) {
                debug!("auto-unlock on movement intent");
                self.unlock();
            } else {
                match target_position {
                    Some(target) => {
                        self.update_locked(dt, intent, pad, target, cfg);
                        return;
                    }
                    None => {
                        warn!("lock target vanished, falling back to free flight");
                        self.unlock();
                    }
                }
            }
        }
        self.update_free(dt, intent, pad, cfg);
    }

    fn update_free(
        &mut self,
        dt: f32,
        intent: &mut ControlIntent,
        pad: &PadSample,
        cfg: &NavConfig,
    ) {
        // Rotation: drained mouse delta at fixed sensitivity plus
        // analog stick and held arrow keys at the angular rate
        let mouse = intent.take_mouse_delta();
        let mut yaw = -mouse.x * cfg.mouse_sensitivity;
        let mut pitch = -mouse.y * cfg.mouse_sensitivity;
        yaw -= pad.look_stick.x * cfg.orbit_rate * dt;
        pitch += pad.look_stick.y * cfg.orbit_rate * dt;
        if intent.yaw_left {
            yaw += cfg.orbit_rate * dt;
        }
        if intent.yaw_right {
            yaw -= cfg.orbit_rate * dt;
        }
        if intent.pitch_up {
            pitch += cfg.orbit_rate * dt;
        }
        if intent.pitch_down {
            pitch -= cfg.orbit_rate * dt;
        }
        let mut roll = 0.0;
        if intent.roll_left || pad.roll_left {
            roll += cfg.roll_speed * dt;
        }
        if intent.roll_right || pad.roll_right {
            roll -= cfg.roll_speed * dt;
        }
        if yaw != 0.0 || pitch != 0.0 || roll != 0.0 {
            self.rotation = self.rotation
                * Quat::from_rotation_y(yaw)
                * Quat::from_rotation_x(pitch)
                * Quat::from_rotation_z(roll);
            self.rotation = self.rotation.normalize();
        }

        // Translation along local axes
        let mut axis = Vec3::ZERO;
        if intent.forward || pad.move_stick.y > 0.0 {
            axis.z -= 1.0;
        }
        if intent.back || pad.move_stick.y < 0.0 {
            axis.z += 1.0;
        }
        if intent.left || pad.move_stick.x < 0.0 {
            axis.x -= 1.0;
        }
        if intent.right || pad.move_stick.x > 0.0 {
            axis.x += 1.0;
        }
        if intent.up || pad.up {
            axis.y += 1.0;
        }
        if intent.down || pad.down {
            axis.y -= 1.0;
        }
        if axis != Vec3::ZERO {
            let boost = if intent.boost || pad.boost {
                cfg.boost_multiplier
            } else {
                1.0
            };
            self.translation += self.rotation * axis * cfg.fly_speed * boost * dt;
        }

        // Zoom inertia glides along the local forward axis
        let travel = integrate_zoom(intent, dt, cfg);
        if travel != 0.0 {
            let forward = self.rotation * Vec3::NEG_Z;
            self.translation += forward * travel;
        }
    }

    fn update_locked(
        &mut self,
        dt: f32,
        intent: &mut ControlIntent,
        pad: &PadSample,
        target: Vec3,
        cfg: &NavConfig,
    ) {
        let travel = integrate_zoom(intent, dt, cfg);
        let mouse = intent.take_mouse_delta();
        let top = matches!(self.mode, RigMode::LockedTop(_));

        let lock = match &mut self.mode {
            RigMode::LockedChase(lock) | RigMode::LockedTop(lock) => lock,
            RigMode::Free => unreachable!("update_locked called in free mode"),
        };

        // Positive zoom velocity moves toward the target; the distance
        // floor holds for any input sequence
        lock.distance = (lock.distance - travel).max(lock.min_distance());

        // Orbit angles: held arrows, inverted mouse drag, analog stick
        if intent.yaw_left {
            lock.theta += cfg.orbit_rate * dt;
        }
        if intent.yaw_right {
            lock.theta -= cfg.orbit_rate * dt;
        }
        if intent.pitch_up {
            lock.phi += cfg.orbit_rate * dt;
        }
        if intent.pitch_down {
            lock.phi -= cfg.orbit_rate * dt;
        }
        lock.theta += mouse.x * cfg.mouse_sensitivity;
        lock.phi += mouse.y * cfg.mouse_sensitivity;
        lock.theta -= pad.look_stick.x * cfg.orbit_rate * dt;
        lock.phi += pad.look_stick.y * cfg.orbit_rate * dt;
        // Clamped at the point of mutation, never at the point of use
        lock.phi = lock.phi.clamp(-PHI_LIMIT, PHI_LIMIT);

        let desired = if top {
            target + Vec3::new(0.0, lock.distance, 0.0)
        } else {
            target + lock.chase_offset()
        };

        // Position is smoothed toward the desired offset; orientation
        // is an instantaneous look-at so the target never drifts
        // off-center
        self.up = if top { Vec3::NEG_Z } else { Vec3::Y };
        self.translation = self.translation.lerp(desired, cfg.smoothing);
        self.rotation = look_rotation(target - self.translation, self.up);
    }
}

/// Advance the zoom accumulator one frame: returns the travel distance
/// for this frame and applies exponential decay, so a single impulse
/// glides to rest over several frames.
fn integrate_zoom(intent: &mut ControlIntent, dt: f32, cfg: &NavConfig) -> f32 {
    let velocity = intent.zoom_velocity;
    if velocity.abs() <= ZOOM_EPSILON {
        intent.zoom_velocity = 0.0;
        return 0.0;
    }
    intent.zoom_velocity = velocity * cfg.zoom_damping;
    velocity * dt * cfg.zoom_scale
}

/// Orientation looking along `forward` with the given vertical
/// reference. Degenerate inputs collapse to identity rather than NaN.
pub(crate) fn look_rotation(forward: Vec3, up: Vec3) -> Quat {
    let Some(back) = (-forward).try_normalize() else {
        return Quat::IDENTITY;
    };
    let up = up.try_normalize().unwrap_or(Vec3::Y);
    let right = up
        .cross(back)
        .try_normalize()
        .unwrap_or_else(|| back.any_orthonormal_vector());
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentFlag;
    use glam::Vec2;

    const DT: f32 = 0.016;
    const EPS: f32 = 1e-4;

    fn cfg() -> NavConfig {
        NavConfig::default()
    }

    fn locked_rig(cfg: &NavConfig) -> CameraRig {
        let mut rig = CameraRig::default();
        rig.lock_on(BodyId::new("rocky"), 2.0, cfg);
        rig
    }

    #[test]
    fn test_lock_on_initial_state() {
        let cfg = cfg();
        let rig = locked_rig(&cfg);
        match &rig.mode {
            RigMode::LockedChase(lock) => {
                // radius 2 x multiplier 3
                assert!((lock.distance - 6.0).abs() < EPS);
                assert!((lock.theta - FRAC_PI_4).abs() < EPS);
                assert!((lock.phi - 0.3).abs() < EPS);
            }
            other => panic!("expected chase lock, got {other:?}"),
        }
    }

    #[test]
    fn test_auto_unlock_on_any_translation_flag() {
        let cfg = cfg();
        for flag in [
            IntentFlag::Forward,
            IntentFlag::Back,
            IntentFlag::Left,
            IntentFlag::Right,
            IntentFlag::Up,
            IntentFlag::Down,
        ] {
            let mut rig = locked_rig(&cfg);
            let mut intent = ControlIntent::default();
            intent.set(flag, true);
            rig.update(DT, &mut intent, &PadSample::default(), Some(Vec3::ZERO), &cfg);
            assert_eq!(rig.mode, RigMode::Free, "flag {flag:?} must unlock");
        }
    }

    #[test]
    fn test_rotation_only_intent_keeps_lock() {
        let cfg = cfg();
        let mut rig = locked_rig(&cfg);
        let mut intent = ControlIntent::default();
        intent.set(IntentFlag::YawLeft, true);
        intent.set(IntentFlag::PitchUp, true);
        intent.set(IntentFlag::RollLeft, true);
        intent.add_mouse_delta(Vec2::new(12.0, -4.0));
        rig.update(DT, &mut intent, &PadSample::default(), Some(Vec3::ZERO), &cfg);
        assert!(rig.is_locked());
    }

    #[test]
    fn test_move_stick_auto_unlocks() {
        let cfg = cfg();
        let mut rig = locked_rig(&cfg);
        let pad = PadSample {
            move_stick: Vec2::new(0.0, 0.8),
            ..Default::default()
        };
        let mut intent = ControlIntent::default();
        rig.update(DT, &mut intent, &pad, Some(Vec3::ZERO), &cfg);
        assert_eq!(rig.mode, RigMode::Free);
    }

    #[test]
    fn test_phi_never_reaches_the_poles() {
        let cfg = cfg();
        let mut rig = locked_rig(&cfg);
        let mut intent = ControlIntent::default();
        intent.set(IntentFlag::PitchUp, true);
        for _ in 0..10_000 {
            rig.update(0.1, &mut intent, &PadSample::default(), Some(Vec3::ZERO), &cfg);
        }
        match &rig.mode {
            RigMode::LockedChase(lock) => {
                assert!(lock.phi < FRAC_PI_2);
                assert!(lock.phi >= PHI_LIMIT - EPS);
            }
            other => panic!("lock lost: {other:?}"),
        }
    }

    #[test]
    fn test_distance_floor_holds_under_zoom() {
        let cfg = cfg();
        let mut rig = locked_rig(&cfg);
        let mut intent = ControlIntent::default();
        for _ in 0..500 {
            intent.zoom_velocity = 50.0;
            rig.update(DT, &mut intent, &PadSample::default(), Some(Vec3::ZERO), &cfg);
        }
        match &rig.mode {
            RigMode::LockedChase(lock) => {
                assert!(lock.distance >= MIN_DISTANCE_FACTOR * lock.target_radius - EPS);
            }
            other => panic!("lock lost: {other:?}"),
        }
    }

    #[test]
    fn test_zoom_inertia_decay_and_travel() {
        let cfg = cfg();
        let mut rig = CameraRig::default();
        let mut intent = ControlIntent {
            zoom_velocity: 10.0,
            ..Default::default()
        };
        rig.update(DT, &mut intent, &PadSample::default(), None, &cfg);
        // velocity decays by the damping factor
        assert!((intent.zoom_velocity - 9.0).abs() < EPS);
        // camera displaced along local -Z by v * dt * zoom_scale
        let expected = 10.0 * DT * cfg.zoom_scale;
        assert!((rig.translation.z + expected).abs() < EPS);
        assert!(rig.translation.x.abs() < EPS);
    }

    #[test]
    fn test_dpad_up_widens_the_orbit() {
        let cfg = cfg();
        let mut rig = CameraRig::default();
        rig.lock_on(BodyId::new("gassy"), 10.0, &cfg);
        // Negative steps (D-pad up) must zoom out
        let pad = PadSample {
            zoom_steps: -1.0,
            ..Default::default()
        };
        let mut intent = ControlIntent::default();
        rig.update(DT, &mut intent, &pad, Some(Vec3::ZERO), &cfg);
        let widened = match &rig.mode {
            RigMode::LockedChase(lock) => lock.distance,
            other => panic!("lock lost: {other:?}"),
        };
        // radius 10 x multiplier 3 = 30 before the step
        assert!(widened > 30.0);

        // Positive steps (D-pad down) pull back in
        intent.zoom_velocity = 0.0;
        let pad = PadSample {
            zoom_steps: 1.0,
            ..Default::default()
        };
        for _ in 0..20 {
            rig.update(DT, &mut intent, &pad, Some(Vec3::ZERO), &cfg);
        }
        match &rig.mode {
            RigMode::LockedChase(lock) => assert!(lock.distance < widened),
            other => panic!("lock lost: {other:?}"),
        }
    }

    #[test]
    fn test_idle_input_leaves_free_rig_at_rest() {
        let cfg = cfg();
        let mut rig = CameraRig::looking_at(Vec3::new(5.0, 2.0, 9.0), Vec3::ZERO);
        let before = rig.clone();
        let mut intent = ControlIntent::default();
        for _ in 0..10 {
            rig.update(DT, &mut intent, &PadSample::default(), None, &cfg);
        }
        assert_eq!(rig, before);
    }

    #[test]
    fn test_zoom_velocity_snaps_to_rest() {
        let cfg = cfg();
        let mut rig = CameraRig::default();
        let mut intent = ControlIntent {
            zoom_velocity: 5e-4,
            ..Default::default()
        };
        rig.update(DT, &mut intent, &PadSample::default(), None, &cfg);
        assert_eq!(intent.zoom_velocity, 0.0);
        assert_eq!(rig.translation, Vec3::ZERO);
    }

    #[test]
    fn test_locked_position_is_smoothed_not_teleported() {
        let cfg = cfg();
        let mut rig = locked_rig(&cfg);
        // Settle near a stationary target first
        let mut intent = ControlIntent::default();
        for _ in 0..200 {
            rig.update(DT, &mut intent, &PadSample::default(), Some(Vec3::ZERO), &cfg);
        }
        let before = rig.translation;
        // Target jumps 100 units in one frame
        let moved = Vec3::new(100.0, 0.0, 0.0);
        let desired = rig.desired_position(moved).unwrap();
        rig.update(DT, &mut intent, &PadSample::default(), Some(moved), &cfg);
        let expected = before.lerp(desired, cfg.smoothing);
        assert!((rig.translation - expected).length() < 1e-3);
        // And it is nowhere near the full jump yet
        assert!((rig.translation - desired).length() > 1.0);
    }

    #[test]
    fn test_look_at_keeps_target_centered() {
        let cfg = cfg();
        let mut rig = locked_rig(&cfg);
        let target = Vec3::new(30.0, 5.0, -12.0);
        let mut intent = ControlIntent::default();
        for _ in 0..50 {
            rig.update(DT, &mut intent, &PadSample::default(), Some(target), &cfg);
        }
        let forward = rig.rotation * Vec3::NEG_Z;
        let to_target = (target - rig.translation).normalize();
        assert!(forward.dot(to_target) > 0.999);
    }

    #[test]
    fn test_vanished_target_falls_back_to_free() {
        let cfg = cfg();
        let mut rig = locked_rig(&cfg);
        let mut intent = ControlIntent::default();
        rig.update(DT, &mut intent, &PadSample::default(), None, &cfg);
        assert_eq!(rig.mode, RigMode::Free);
        assert_eq!(rig.up, Vec3::Y);
    }

    #[test]
    fn test_top_toggle_preserves_lock_state() {
        let cfg = cfg();
        let mut rig = locked_rig(&cfg);
        rig.toggle_top(&cfg);
        match &rig.mode {
            RigMode::LockedTop(lock) => {
                assert!((lock.distance - 6.0).abs() < EPS);
                assert_eq!(lock.target.as_str(), "rocky");
            }
            other => panic!("expected top lock, got {other:?}"),
        }
        assert_eq!(rig.up, Vec3::NEG_Z);
        rig.toggle_top(&cfg);
        assert!(matches!(rig.mode, RigMode::LockedChase(_)));
        assert_eq!(rig.up, Vec3::Y);
    }

    #[test]
    fn test_top_view_orbits_overhead() {
        let cfg = cfg();
        let mut rig = locked_rig(&cfg);
        rig.toggle_top(&cfg);
        let target = Vec3::new(10.0, 0.0, 10.0);
        let desired = rig.desired_position(target).unwrap();
        assert!((desired - (target + Vec3::new(0.0, 6.0, 0.0))).length() < EPS);
    }

    #[test]
    fn test_free_top_is_an_absolute_pose() {
        let cfg = cfg();
        let mut rig = CameraRig::looking_at(Vec3::new(50.0, 20.0, 50.0), Vec3::ZERO);
        rig.toggle_top(&cfg);
        assert_eq!(rig.mode, RigMode::Free);
        assert_eq!(rig.translation, Vec3::new(0.0, cfg.top_height, 0.0));
        assert_eq!(rig.up, Vec3::NEG_Z);
        let forward = rig.rotation * Vec3::NEG_Z;
        assert!(forward.dot(Vec3::NEG_Y) > 0.999);
    }

    #[test]
    fn test_free_translation_uses_local_axes() {
        let cfg = cfg();
        let mut rig = CameraRig::default();
        let mut intent = ControlIntent::default();
        intent.set(IntentFlag::Forward, true);
        rig.update(1.0, &mut intent, &PadSample::default(), None, &cfg);
        // Identity orientation: forward is -Z at fly_speed
        assert!((rig.translation.z + cfg.fly_speed).abs() < EPS);
    }

    #[test]
    fn test_boost_multiplies_speed() {
        let cfg = cfg();
        let mut plain = CameraRig::default();
        let mut boosted = CameraRig::default();
        let mut intent = ControlIntent::default();
        intent.set(IntentFlag::Forward, true);
        plain.update(1.0, &mut intent.clone(), &PadSample::default(), None, &cfg);
        intent.set(IntentFlag::Boost, true);
        boosted.update(1.0, &mut intent, &PadSample::default(), None, &cfg);
        let ratio = boosted.translation.length() / plain.translation.length();
        assert!((ratio - cfg.boost_multiplier).abs() < EPS);
    }

    #[test]
    fn test_update_drains_mouse_delta() {
        let cfg = cfg();
        let mut rig = CameraRig::default();
        let mut intent = ControlIntent::default();
        intent.add_mouse_delta(Vec2::new(10.0, 10.0));
        rig.update(DT, &mut intent, &PadSample::default(), None, &cfg);
        assert_eq!(intent.mouse_delta, Vec2::ZERO);
    }

    #[test]
    fn test_look_rotation_degenerate_forward() {
        assert_eq!(look_rotation(Vec3::ZERO, Vec3::Y), Quat::IDENTITY);
    }
}
