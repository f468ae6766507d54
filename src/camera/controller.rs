use glam::{Vec2, Vec3};
use web_time::{Duration, Instant};

use super::core::CameraHandle;
use super::spherical::{clamp_pitch, spherical_to_offset};
use super::target::OrbitTarget;
use super::tween::{CameraTween, MotionSource, OrbitPose, TweenHandle};
use crate::error::{ensure_finite, OrbitError};
use crate::input::{
    GestureState, InputEvent, InputKind, InputSurface, MouseButton, Subscriptions,
    Touches,
};
use crate::options::OrbitOptions;
use crate::util::easing::EasingFunction;

/// Gaps smaller than this snap shut so damping lands exactly on target.
const SETTLE_EPSILON: f32 = 1e-4;

/// Orbit camera rig: yaw/pitch/distance around a target point with
/// damped motion and fly-to tweens.
///
/// Input handlers, mutators and tweens only write the *target* fields.
/// [`update`](Self::update) is the only writer of the *current* fields and
/// the only place the camera handle is touched.
pub struct OrbitCameraController<C: CameraHandle> {
    camera: C,
    options: OrbitOptions,
    home: OrbitPose,
    target_point: Vec3,

    yaw: f32,
    pitch: f32,
    distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,

    gesture: GestureState,
    motion: MotionSource,
    tween: Option<CameraTween>,
    tween_generation: u64,
    subscriptions: Subscriptions,
}

impl<C: CameraHandle> OrbitCameraController<C> {
    /// Build a rig around the world origin and register its input
    /// listeners on `surface`.
    ///
    /// The camera is placed at the home pose immediately.
    pub fn new<S: InputSurface + ?Sized>(
        camera: C,
        surface: &mut S,
        options: OrbitOptions,
    ) -> Result<Self, OrbitError> {
        options.validate()?;

        let home = OrbitPose::new(options.initial_yaw, options.initial_pitch, options.distance)
            .clamped(options.min_distance, options.max_distance);
        let subscriptions = Subscriptions::register_all(surface);

        let mut controller = Self {
            camera,
            options,
            home,
            target_point: Vec3::ZERO,
            yaw: home.yaw,
            pitch: home.pitch,
            distance: home.distance,
            target_yaw: home.yaw,
            target_pitch: home.pitch,
            target_distance: home.distance,
            gesture: GestureState::new(),
            motion: MotionSource::Idle,
            tween: None,
            tween_generation: 0,
            subscriptions,
        };
        controller.apply_pose();

        log::debug!(
            "orbit rig created: yaw {} pitch {} distance {} ({} listeners)",
            home.yaw,
            home.pitch,
            home.distance,
            controller.subscriptions.len()
        );
        Ok(controller)
    }

    /// Builder form of [`set_target`](Self::set_target).
    pub fn with_target(mut self, target: impl OrbitTarget) -> Result<Self, OrbitError> {
        self.set_target(target)?;
        self.apply_pose();
        Ok(self)
    }

    /// Remove every listener registered at construction and hand the
    /// camera back to the host.
    pub fn destroy<S: InputSurface + ?Sized>(mut self, surface: &mut S) -> C {
        let removed = self.subscriptions.release(surface);
        log::debug!("orbit rig destroyed, {removed} listeners removed");
        self.camera
    }

    // ── Per-frame ──

    /// Close `damping` of each remaining gap and write the resulting pose
    /// onto the camera.
    ///
    /// Smoothing is per call: the host's `dt` does not scale it.
    pub fn update(&mut self, _dt: f32) {
        let damping = self.options.damping;
        self.yaw = approach(self.yaw, self.target_yaw, damping);
        self.pitch = clamp_pitch(approach(self.pitch, self.target_pitch, damping));
        self.distance = self
            .options
            .clamp_distance(approach(self.distance, self.target_distance, damping));
        self.apply_pose();
    }

    /// Advance the fly-to tween (if any) and then run [`update`](Self::update).
    pub fn frame(&mut self, now: Instant, dt: f32) {
        let _ = self.advance_animation(now);
        self.update(dt);
    }

    /// Write the tween's sample at `now` into the target fields.
    ///
    /// Returns `true` if a tween wrote this call. A tween that reaches its
    /// goal writes the goal exactly and then retires.
    pub fn advance_animation(&mut self, now: Instant) -> bool {
        let Some(tween) = &self.tween else {
            return false;
        };
        let sample = tween.sample(now);
        let complete = tween.is_complete(now);
        let handle = tween.handle();

        self.target_yaw = sample.yaw;
        self.target_pitch = clamp_pitch(sample.pitch);
        self.target_distance = self.options.clamp_distance(sample.distance);

        if complete {
            self.tween = None;
            if self.motion == MotionSource::Tween(handle) {
                self.motion = MotionSource::Idle;
            }
            log::debug!("tween {} finished", handle.generation());
        }
        true
    }

    fn apply_pose(&mut self) {
        let position = self.target_point
            + spherical_to_offset(self.yaw, self.pitch, self.distance);
        self.camera.set_position(position);
        self.camera.look_at(self.target_point);
    }

    // ── Input ──

    /// Feed one input event. Returns `true` if the rig consumed it.
    ///
    /// [`InputEvent::ContextMenu`] is always consumed so right-drag can
    /// rotate without the platform menu appearing.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if !event.is_finite() {
            log::warn!("ignoring non-finite input event {event:?}");
            return false;
        }
        log::trace!("orbit input {event:?}");

        match event {
            InputEvent::PointerDown { x, y, button } => {
                self.pointer_down(Vec2::new(x, y), button)
            }
            InputEvent::PointerMove { x, y } => self.drag_to(Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.end_gesture(),
            InputEvent::Wheel { delta_y } => self.wheel(delta_y),
            InputEvent::TouchStart { touches } => self.touch_start(touches),
            InputEvent::TouchMove { touches } => self.touch_move(touches),
            InputEvent::TouchEnd { touches } => self.touch_end(touches),
            InputEvent::ContextMenu => true,
        }
    }

    /// Feed a batch of events in order; returns how many were consumed.
    pub fn handle_events(&mut self, events: impl IntoIterator<Item = InputEvent>) -> usize {
        let mut consumed = 0;
        for event in events {
            if self.handle_event(event) {
                consumed += 1;
            }
        }
        consumed
    }

    fn pointer_down(&mut self, pos: Vec2, button: MouseButton) -> bool {
        if !button.rotates() {
            return false;
        }
        self.begin_drag(pos);
        true
    }

    fn begin_drag(&mut self, pos: Vec2) {
        self.take_over_from_tween();
        self.gesture.begin_drag(pos);
        self.motion = MotionSource::UserDrag;
        log::debug!("drag started at ({}, {})", pos.x, pos.y);
    }

    fn drag_to(&mut self, pos: Vec2) -> bool {
        let Some(delta) = self.gesture.drag_to(pos) else {
            return false;
        };
        self.claim_for_user();
        let sensitivity = self.options.sensitivity;
        self.target_yaw -= delta.x * sensitivity;
        self.target_pitch = clamp_pitch(self.target_pitch - delta.y * sensitivity);
        true
    }

    fn end_gesture(&mut self) -> bool {
        let was_active =
            self.gesture.is_dragging() || self.gesture.last_pinch_distance().is_some();
        self.gesture.end();
        if self.motion == MotionSource::UserDrag {
            self.motion = MotionSource::Idle;
        }
        if was_active {
            log::debug!("gesture ended");
        }
        was_active
    }

    fn wheel(&mut self, delta_y: f32) -> bool {
        if delta_y == 0.0 {
            return false;
        }
        self.take_over_from_tween();
        let step = delta_y.signum() * self.options.zoom_speed;
        self.target_distance = self.options.clamp_distance(self.target_distance + step);
        true
    }

    fn touch_start(&mut self, touches: Touches) -> bool {
        match (touches.len(), touches.first(), touches.pinch_distance()) {
            (1, Some(pos), _) => {
                self.begin_drag(pos);
                true
            }
            (2, _, Some(spread)) => {
                self.take_over_from_tween();
                self.gesture.begin_pinch(spread);
                self.motion = MotionSource::UserDrag;
                true
            }
            _ => false,
        }
    }

    fn touch_move(&mut self, touches: Touches) -> bool {
        match (touches.len(), touches.first(), touches.pinch_distance()) {
            (1, Some(pos), _) => self.drag_to(pos),
            (2, _, Some(spread)) => {
                let Some(closed_by) = self.gesture.pinch_to(spread) else {
                    return false;
                };
                self.claim_for_user();
                self.target_distance = self
                    .options
                    .clamp_distance(self.target_distance + closed_by * self.options.pinch_scale);
                true
            }
            _ => false,
        }
    }

    fn touch_end(&mut self, touches: Touches) -> bool {
        match (touches.len(), touches.first(), touches.pinch_distance()) {
            (0, ..) => self.end_gesture(),
            (1, Some(pos), _) => {
                // Pinch over; keep rotating from where the remaining finger is
                self.gesture.end_pinch();
                self.begin_drag(pos);
                true
            }
            (2, _, Some(spread)) => {
                self.gesture.begin_pinch(spread);
                true
            }
            _ => false,
        }
    }

    // ── Programmatic control ──

    /// Orbit around a new center. Takes effect on the next update.
    pub fn set_target(&mut self, target: impl OrbitTarget) -> Result<(), OrbitError> {
        let point = target.target_position();
        if !point.is_finite() {
            return Err(OrbitError::NonFinite { what: "target" });
        }
        self.target_point = point;
        Ok(())
    }

    /// Desired distance, clamped to the configured bounds.
    pub fn set_distance(&mut self, distance: f32) -> Result<(), OrbitError> {
        let distance = ensure_finite(distance, "distance")?;
        self.target_distance = self.options.clamp_distance(distance);
        Ok(())
    }

    /// Desired yaw in degrees.
    pub fn set_yaw(&mut self, yaw: f32) -> Result<(), OrbitError> {
        self.target_yaw = ensure_finite(yaw, "yaw")?;
        Ok(())
    }

    /// Desired pitch in degrees, clamped to ±89.
    pub fn set_pitch(&mut self, pitch: f32) -> Result<(), OrbitError> {
        self.target_pitch = clamp_pitch(ensure_finite(pitch, "pitch")?);
        Ok(())
    }

    /// Head back to the pose the rig was built with. Cancels any tween.
    pub fn reset(&mut self) {
        let _ = self.cancel_animation();
        self.target_yaw = self.home.yaw;
        self.target_pitch = self.home.pitch;
        self.target_distance = self.options.clamp_distance(self.home.distance);
    }

    /// Re-center on `target`, optionally changing the distance as well.
    ///
    /// Nothing changes if either argument is rejected.
    pub fn focus_on(
        &mut self,
        target: impl OrbitTarget,
        distance: Option<f32>,
    ) -> Result<(), OrbitError> {
        if let Some(d) = distance {
            let _ = ensure_finite(d, "distance")?;
        }
        self.set_target(target)?;
        if let Some(d) = distance {
            self.set_distance(d)?;
        }
        Ok(())
    }

    /// Fly to a pose over `duration` with a cubic ease-out, starting now.
    ///
    /// Any tween already in flight is replaced; its handle goes stale.
    pub fn animate_to(
        &mut self,
        yaw: f32,
        pitch: f32,
        distance: f32,
        duration: Duration,
    ) -> Result<TweenHandle, OrbitError> {
        self.start_tween(
            OrbitPose::new(yaw, pitch, distance),
            duration,
            EasingFunction::DEFAULT,
            Instant::now(),
        )
    }

    /// Fly to `goal` with an explicit easing curve and start time.
    ///
    /// The tween starts from the current smoothed pose. Pitch and
    /// distance of the goal are clamped. A drag or pinch already in
    /// progress stays alive and cancels the tween on its next move.
    pub fn start_tween(
        &mut self,
        goal: OrbitPose,
        duration: Duration,
        easing: EasingFunction,
        start_time: Instant,
    ) -> Result<TweenHandle, OrbitError> {
        let _ = ensure_finite(goal.yaw, "yaw")?;
        let _ = ensure_finite(goal.pitch, "pitch")?;
        let _ = ensure_finite(goal.distance, "distance")?;
        let goal = goal.clamped(self.options.min_distance, self.options.max_distance);

        if let Some(previous) = self.tween.take() {
            log::debug!(
                "tween {} superseded",
                previous.handle().generation()
            );
        }
        self.tween_generation += 1;
        let handle = TweenHandle::new(self.tween_generation);
        self.tween = Some(CameraTween::new(
            handle,
            self.pose(),
            goal,
            duration,
            easing,
            start_time,
        ));
        self.motion = MotionSource::Tween(handle);
        log::debug!(
            "tween {} to {goal:?} over {duration:?}",
            handle.generation()
        );
        Ok(handle)
    }

    /// Stop the tween in flight, leaving targets where its last sample put
    /// them. Returns `true` if one was running.
    pub fn cancel_animation(&mut self) -> bool {
        let Some(tween) = self.tween.take() else {
            return false;
        };
        if self.motion == MotionSource::Tween(tween.handle()) {
            self.motion = MotionSource::Idle;
        }
        log::debug!("tween {} cancelled", tween.handle().generation());
        true
    }

    fn take_over_from_tween(&mut self) {
        if let Some(tween) = self.tween.take() {
            if self.motion == MotionSource::Tween(tween.handle()) {
                self.motion = MotionSource::Idle;
            }
            log::debug!(
                "tween {} interrupted by user input",
                tween.handle().generation()
            );
        }
    }

    /// A drag or pinch that outlived a tween start wins on its next move.
    fn claim_for_user(&mut self) {
        self.take_over_from_tween();
        self.motion = MotionSource::UserDrag;
    }

    /// Replace the options. The home pose keeps its construction-time
    /// value; current and target distances are re-clamped to the new
    /// bounds.
    pub fn set_options(&mut self, options: OrbitOptions) -> Result<(), OrbitError> {
        options.validate()?;
        self.target_distance = options.clamp_distance(self.target_distance);
        self.distance = options.clamp_distance(self.distance);
        self.options = options;
        Ok(())
    }

    // ── Accessors ──

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &OrbitOptions {
        &self.options
    }

    /// Orbit center.
    #[must_use]
    pub fn target_point(&self) -> Vec3 {
        self.target_point
    }

    /// Smoothed yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Smoothed pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Smoothed distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Desired yaw in degrees.
    #[must_use]
    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    /// Desired pitch in degrees.
    #[must_use]
    pub fn target_pitch(&self) -> f32 {
        self.target_pitch
    }

    /// Desired distance.
    #[must_use]
    pub fn target_distance(&self) -> f32 {
        self.target_distance
    }

    /// Smoothed pose.
    #[must_use]
    pub fn pose(&self) -> OrbitPose {
        OrbitPose::new(self.yaw, self.pitch, self.distance)
    }

    /// Desired pose.
    #[must_use]
    pub fn target_pose(&self) -> OrbitPose {
        OrbitPose::new(self.target_yaw, self.target_pitch, self.target_distance)
    }

    /// Pose [`reset`](Self::reset) returns to.
    #[must_use]
    pub fn home_pose(&self) -> OrbitPose {
        self.home
    }

    /// Whether the smoothed pose has reached the desired pose.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pose() == self.target_pose()
    }

    /// Whether a rotate drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Who currently owns the target fields.
    #[must_use]
    pub fn motion_source(&self) -> MotionSource {
        self.motion
    }

    /// Whether any tween is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Whether `handle` is the tween in flight.
    #[must_use]
    pub fn is_tween_active(&self, handle: TweenHandle) -> bool {
        self.tween.as_ref().is_some_and(|t| t.handle() == handle)
    }

    /// Camera facing direction.
    #[must_use]
    pub fn forward_vector(&self) -> Vec3 {
        self.camera.forward()
    }

    /// Camera right direction.
    #[must_use]
    pub fn right_vector(&self) -> Vec3 {
        self.camera.right()
    }

    /// Camera up direction.
    #[must_use]
    pub fn up_vector(&self) -> Vec3 {
        self.camera.up()
    }

    /// The driven camera.
    #[must_use]
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable access to the driven camera (projection tweaks, resize).
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// Kinds of listener currently registered.
    pub fn listened_kinds(&self) -> impl Iterator<Item = InputKind> + '_ {
        self.subscriptions.kinds()
    }
}

impl<C: CameraHandle> std::fmt::Debug for OrbitCameraController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbitCameraController")
            .field("target_point", &self.target_point)
            .field("pose", &self.pose())
            .field("target_pose", &self.target_pose())
            .field("motion", &self.motion)
            .field("listeners", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

/// Move `current` toward `target` by `damping` of the gap, snapping once
/// the gap is negligible.
fn approach(current: f32, target: f32, damping: f32) -> f32 {
    let next = current + (target - current) * damping;
    // At large magnitudes the step can round away before the gap is small
    if (target - next).abs() < SETTLE_EPSILON || next == current {
        target
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::camera::core::Camera;
    use crate::input::{ListenerId, NullSurface};

    fn rig(options: OrbitOptions) -> OrbitCameraController<Camera> {
        OrbitCameraController::new(Camera::default(), &mut NullSurface::default(), options)
            .unwrap()
    }

    fn default_rig() -> OrbitCameraController<Camera> {
        rig(OrbitOptions::default())
    }

    fn settle(controller: &mut OrbitCameraController<Camera>) {
        for _ in 0..1000 {
            controller.update(1.0 / 60.0);
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    fn move_to(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMove { x, y }
    }

    #[test]
    fn zero_angles_place_camera_on_positive_z() {
        let controller = default_rig();
        assert_eq!(controller.camera().eye, Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(controller.camera().target, Vec3::ZERO);
    }

    #[test]
    fn offset_is_relative_to_target_point() {
        let mut controller = default_rig()
            .with_target(Vec3::new(1.0, 2.0, 3.0))
            .unwrap();
        controller.update(0.016);
        assert_eq!(controller.camera().eye, Vec3::new(1.0, 2.0, 13.0));
        assert_eq!(controller.camera().target, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn drag_rotates_targets_only() {
        let mut controller = default_rig();
        assert!(controller.handle_event(down(100.0, 100.0)));
        assert!(controller.handle_event(move_to(150.0, 130.0)));

        assert!(approx(controller.target_yaw(), -15.0), "{}", controller.target_yaw());
        assert!(approx(controller.target_pitch(), -9.0), "{}", controller.target_pitch());
        assert_eq!(controller.target_distance(), 10.0);
        // Current state only moves in update
        assert_eq!(controller.yaw(), 0.0);
        assert_eq!(controller.pitch(), 0.0);
    }

    #[test]
    fn move_without_drag_is_ignored() {
        let mut controller = default_rig();
        assert!(!controller.handle_event(move_to(150.0, 130.0)));
        assert_eq!(controller.target_yaw(), 0.0);

        let _ = controller.handle_event(down(0.0, 0.0));
        assert!(controller.handle_event(InputEvent::PointerUp {
            button: MouseButton::Left
        }));
        assert!(!controller.is_dragging());
        assert!(!controller.handle_event(move_to(50.0, 50.0)));
        assert_eq!(controller.target_yaw(), 0.0);
    }

    #[test]
    fn right_button_rotates_middle_does_not() {
        let mut controller = default_rig();
        assert!(!controller.handle_event(InputEvent::PointerDown {
            x: 0.0,
            y: 0.0,
            button: MouseButton::Middle,
        }));
        assert!(!controller.is_dragging());

        assert!(controller.handle_event(InputEvent::PointerDown {
            x: 0.0,
            y: 0.0,
            button: MouseButton::Right,
        }));
        assert!(controller.is_dragging());
        assert!(controller.handle_event(InputEvent::ContextMenu));
    }

    #[test]
    fn pitch_stays_clamped_under_drag_and_setter() {
        let mut controller = default_rig();
        let _ = controller.handle_event(down(0.0, 0.0));
        let _ = controller.handle_event(move_to(0.0, -10_000.0));
        assert_eq!(controller.target_pitch(), 89.0);
        let _ = controller.handle_event(move_to(0.0, 10_000.0));
        assert_eq!(controller.target_pitch(), -89.0);

        controller.set_pitch(200.0).unwrap();
        assert_eq!(controller.target_pitch(), 89.0);
        for _ in 0..500 {
            controller.update(0.016);
            assert!((-89.0..=89.0).contains(&controller.pitch()));
        }
        assert_eq!(controller.pitch(), 89.0);
    }

    #[test]
    fn wheel_steps_by_zoom_speed() {
        let mut controller = default_rig();
        assert!(controller.handle_event(InputEvent::Wheel { delta_y: 120.0 }));
        assert_eq!(controller.target_distance(), 10.5);
        assert!(controller.handle_event(InputEvent::Wheel { delta_y: -3.0 }));
        assert!(controller.handle_event(InputEvent::Wheel { delta_y: -0.01 }));
        assert_eq!(controller.target_distance(), 9.5);
        assert!(!controller.handle_event(InputEvent::Wheel { delta_y: 0.0 }));
        assert_eq!(controller.target_distance(), 9.5);
    }

    #[test]
    fn distance_stays_within_bounds() {
        let mut controller = default_rig();
        for _ in 0..100 {
            let _ = controller.handle_event(InputEvent::Wheel { delta_y: 1.0 });
            assert!(controller.target_distance() <= 20.0);
        }
        assert_eq!(controller.target_distance(), 20.0);

        let _ = controller.handle_event(InputEvent::TouchStart {
            touches: Touches::two(Vec2::ZERO, Vec2::new(10.0, 0.0)),
        });
        let _ = controller.handle_event(InputEvent::TouchMove {
            touches: Touches::two(Vec2::ZERO, Vec2::new(5_000.0, 0.0)),
        });
        assert_eq!(controller.target_distance(), 2.0);

        settle(&mut controller);
        assert_eq!(controller.distance(), 2.0);
    }

    #[test]
    fn pinch_closing_zooms_out() {
        let mut controller = default_rig();
        assert!(controller.handle_event(InputEvent::TouchStart {
            touches: Touches::two(Vec2::ZERO, Vec2::new(100.0, 0.0)),
        }));
        assert!(controller.handle_event(InputEvent::TouchMove {
            touches: Touches::two(Vec2::ZERO, Vec2::new(60.0, 0.0)),
        }));
        // (100 - 60) * 0.05
        assert!(approx(controller.target_distance(), 12.0));
        assert_eq!(controller.target_yaw(), 0.0);
    }

    #[test]
    fn pinch_rebaselines_when_two_fingers_remain() {
        let mut controller = default_rig();
        let _ = controller.handle_event(InputEvent::TouchStart {
            touches: Touches::two(Vec2::ZERO, Vec2::new(100.0, 0.0)),
        });
        // Third finger lifted, the other two now 20px apart
        assert!(controller.handle_event(InputEvent::TouchEnd {
            touches: Touches::two(Vec2::ZERO, Vec2::new(20.0, 0.0)),
        }));
        let _ = controller.handle_event(InputEvent::TouchMove {
            touches: Touches::two(Vec2::ZERO, Vec2::new(40.0, 0.0)),
        });
        // Spread grew by 20 from the new baseline
        assert!(approx(controller.target_distance(), 9.0));
    }

    #[test]
    fn one_finger_touch_rotates() {
        let mut controller = default_rig();
        assert!(controller.handle_event(InputEvent::TouchStart {
            touches: Touches::one(Vec2::new(100.0, 100.0)),
        }));
        assert!(controller.handle_event(InputEvent::TouchMove {
            touches: Touches::one(Vec2::new(150.0, 130.0)),
        }));
        assert!(approx(controller.target_yaw(), -15.0));
        assert!(approx(controller.target_pitch(), -9.0));

        assert!(controller.handle_event(InputEvent::TouchEnd {
            touches: Touches::NONE
        }));
        assert!(!controller.is_dragging());
        assert_eq!(controller.motion_source(), MotionSource::Idle);
    }

    #[test]
    fn lifting_to_one_finger_resumes_rotation_without_jump() {
        let mut controller = default_rig();
        let _ = controller.handle_event(InputEvent::TouchStart {
            touches: Touches::two(Vec2::ZERO, Vec2::new(100.0, 0.0)),
        });
        assert!(controller.handle_event(InputEvent::TouchEnd {
            touches: Touches::one(Vec2::new(300.0, 300.0)),
        }));
        let _ = controller.handle_event(InputEvent::TouchMove {
            touches: Touches::one(Vec2::new(310.0, 300.0)),
        });
        assert!(approx(controller.target_yaw(), -3.0));
    }

    #[test]
    fn damping_converges_monotonically_without_overshoot() {
        let mut controller = default_rig();
        controller.set_yaw(90.0).unwrap();
        controller.set_pitch(-45.0).unwrap();
        controller.set_distance(18.0).unwrap();

        let gaps = |c: &OrbitCameraController<Camera>| {
            [
                c.target_yaw() - c.yaw(),
                c.target_pitch() - c.pitch(),
                c.target_distance() - c.distance(),
            ]
        };
        let mut prev = gaps(&controller);
        for _ in 0..400 {
            controller.update(1.0 / 60.0);
            let next = gaps(&controller);
            for (p, n) in prev.iter().zip(&next) {
                // Same side of the target, strictly closer or exactly there
                assert!(n.abs() < p.abs() || *n == 0.0, "{p} -> {n}");
                assert!(p.signum() == n.signum() || *n == 0.0, "overshoot {p} -> {n}");
            }
            prev = next;
        }
        assert!(controller.is_settled());
        assert_eq!(controller.yaw(), 90.0);
    }

    #[test]
    fn first_update_closes_damping_fraction() {
        let mut controller = default_rig();
        controller.set_yaw(100.0).unwrap();
        controller.update(0.016);
        assert!(approx(controller.yaw(), 10.0));
    }

    #[test]
    fn full_damping_snaps_in_one_update() {
        let mut controller = rig(OrbitOptions {
            damping: 1.0,
            ..OrbitOptions::default()
        });
        controller.set_yaw(33.0).unwrap();
        controller.update(0.016);
        assert_eq!(controller.yaw(), 33.0);
    }

    #[test]
    fn settled_update_leaves_camera_unchanged() {
        let mut controller = default_rig();
        controller.set_yaw(25.0).unwrap();
        settle(&mut controller);
        let before = controller.camera().clone();
        controller.update(0.016);
        assert_eq!(controller.camera(), &before);
    }

    #[test]
    fn reset_returns_to_construction_pose() {
        let mut controller = rig(OrbitOptions {
            distance: 8.0,
            initial_yaw: 30.0,
            initial_pitch: 20.0,
            ..OrbitOptions::default()
        });
        let _ = controller.handle_event(down(0.0, 0.0));
        let _ = controller.handle_event(move_to(333.0, -71.0));
        let _ = controller.handle_event(InputEvent::Wheel { delta_y: 1.0 });
        controller.set_distance(19.0).unwrap();
        settle(&mut controller);

        controller.reset();
        settle(&mut controller);
        assert_eq!(controller.pose(), OrbitPose::new(30.0, 20.0, 8.0));
    }

    #[test]
    fn home_pose_is_clamped() {
        let controller = rig(OrbitOptions {
            distance: 100.0,
            initial_pitch: 95.0,
            ..OrbitOptions::default()
        });
        assert_eq!(controller.home_pose(), OrbitPose::new(0.0, 89.0, 20.0));
        assert_eq!(controller.distance(), 20.0);
    }

    #[test]
    fn tween_lands_exactly_on_goal() {
        let mut controller = default_rig();
        let t0 = Instant::now();
        let handle = controller
            .start_tween(
                OrbitPose::new(90.0, 10.0, 20.0),
                Duration::from_millis(1000),
                EasingFunction::CubicOut,
                t0,
            )
            .unwrap();
        assert!(controller.is_tween_active(handle));
        assert_eq!(controller.motion_source(), MotionSource::Tween(handle));

        assert!(controller.advance_animation(t0 + Duration::from_millis(500)));
        assert!(approx(controller.target_yaw(), 78.75));

        assert!(controller.advance_animation(t0 + Duration::from_millis(1000)));
        assert_eq!(controller.target_pose(), OrbitPose::new(90.0, 10.0, 20.0));
        assert!(!controller.is_animating());
        assert_eq!(controller.motion_source(), MotionSource::Idle);
        assert!(!controller.advance_animation(t0 + Duration::from_millis(1100)));
    }

    #[test]
    fn tween_starts_from_smoothed_pose() {
        let mut controller = default_rig();
        controller.set_yaw(100.0).unwrap();
        controller.update(0.016);
        let t0 = Instant::now();
        let _ = controller
            .start_tween(
                OrbitPose::new(0.0, 0.0, 10.0),
                Duration::from_secs(1),
                EasingFunction::Linear,
                t0,
            )
            .unwrap();
        let _ = controller.advance_animation(t0);
        assert!(approx(controller.target_yaw(), 10.0));
    }

    #[test]
    fn frame_drives_tween_and_damping() {
        let mut controller = rig(OrbitOptions {
            damping: 1.0,
            ..OrbitOptions::default()
        });
        let t0 = Instant::now();
        let _ = controller
            .start_tween(
                OrbitPose::new(90.0, 0.0, 10.0),
                Duration::from_millis(100),
                EasingFunction::CubicOut,
                t0,
            )
            .unwrap();
        controller.frame(t0 + Duration::from_millis(200), 0.2);
        assert_eq!(controller.yaw(), 90.0);
        assert!((controller.camera().eye - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn newer_tween_supersedes_older() {
        let mut controller = default_rig();
        let t0 = Instant::now();
        let first = controller
            .start_tween(OrbitPose::new(90.0, 0.0, 10.0), Duration::from_secs(1), EasingFunction::CubicOut, t0)
            .unwrap();
        let second = controller
            .start_tween(OrbitPose::new(-45.0, 0.0, 10.0), Duration::from_secs(1), EasingFunction::CubicOut, t0)
            .unwrap();
        assert_ne!(first, second);
        assert!(!controller.is_tween_active(first));
        assert!(controller.is_tween_active(second));

        let _ = controller.advance_animation(t0 + Duration::from_secs(2));
        assert_eq!(controller.target_yaw(), -45.0);
    }

    #[test]
    fn wheel_cancels_tween() {
        let mut controller = default_rig();
        let t0 = Instant::now();
        let handle = controller
            .start_tween(OrbitPose::new(90.0, 0.0, 10.0), Duration::from_secs(1), EasingFunction::CubicOut, t0)
            .unwrap();
        assert!(controller.handle_event(InputEvent::Wheel { delta_y: 1.0 }));
        assert!(!controller.is_animating());
        assert!(!controller.is_tween_active(handle));
        assert_eq!(controller.motion_source(), MotionSource::Idle);
        assert_eq!(controller.target_distance(), 10.5);
        assert!(!controller.advance_animation(t0 + Duration::from_millis(500)));
        assert_eq!(controller.target_yaw(), 0.0);
    }

    #[test]
    fn pinch_cancels_tween() {
        let mut controller = default_rig();
        let t0 = Instant::now();
        let handle = controller
            .start_tween(OrbitPose::new(90.0, 0.0, 10.0), Duration::from_secs(1), EasingFunction::CubicOut, t0)
            .unwrap();
        let _ = controller.handle_event(InputEvent::TouchStart {
            touches: Touches::two(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)),
        });
        assert!(!controller.is_tween_active(handle));
        assert_eq!(controller.motion_source(), MotionSource::UserDrag);
        assert!(!controller.advance_animation(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn lifting_a_pinch_finger_during_tween_hands_control_to_drag() {
        let mut controller = default_rig();
        let _ = controller.handle_event(InputEvent::TouchStart {
            touches: Touches::two(Vec2::new(200.0, 300.0), Vec2::new(300.0, 300.0)),
        });
        let t0 = Instant::now();
        let handle = controller
            .start_tween(OrbitPose::new(90.0, 0.0, 10.0), Duration::from_secs(1), EasingFunction::CubicOut, t0)
            .unwrap();
        let _ = controller.handle_event(InputEvent::TouchEnd {
            touches: Touches::one(Vec2::new(300.0, 300.0)),
        });
        assert!(!controller.is_tween_active(handle));
        assert!(controller.is_dragging());
        assert_eq!(controller.motion_source(), MotionSource::UserDrag);

        let _ = controller.handle_event(InputEvent::TouchMove {
            touches: Touches::one(Vec2::new(400.0, 300.0)),
        });
        assert!(approx(controller.target_yaw(), -30.0));
        assert!(!controller.advance_animation(t0 + Duration::from_millis(500)));
        assert!(approx(controller.target_yaw(), -30.0));
    }

    #[test]
    fn drag_held_through_tween_start_takes_over_on_move() {
        let mut controller = default_rig();
        let _ = controller.handle_event(down(100.0, 100.0));
        let t0 = Instant::now();
        let handle = controller
            .start_tween(OrbitPose::new(90.0, 0.0, 10.0), Duration::from_secs(1), EasingFunction::CubicOut, t0)
            .unwrap();
        assert!(controller.is_dragging());
        assert_eq!(controller.motion_source(), MotionSource::Tween(handle));

        assert!(controller.handle_event(move_to(110.0, 100.0)));
        assert!(!controller.is_tween_active(handle));
        assert_eq!(controller.motion_source(), MotionSource::UserDrag);
        assert!(approx(controller.target_yaw(), -3.0));
        assert!(!controller.advance_animation(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn pinch_held_through_tween_start_still_zooms() {
        let mut controller = default_rig();
        let _ = controller.handle_event(InputEvent::TouchStart {
            touches: Touches::two(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0)),
        });
        let t0 = Instant::now();
        let handle = controller
            .start_tween(OrbitPose::new(90.0, 0.0, 10.0), Duration::from_secs(1), EasingFunction::CubicOut, t0)
            .unwrap();
        assert!(controller.handle_event(InputEvent::TouchMove {
            touches: Touches::two(Vec2::new(0.0, 0.0), Vec2::new(60.0, 0.0)),
        }));
        assert!(!controller.is_tween_active(handle));
        assert!(approx(controller.target_distance(), 12.0));
    }

    #[test]
    fn settles_at_large_yaw() {
        let mut controller = default_rig();
        controller.set_yaw(1.0e6).unwrap();
        settle(&mut controller);
        assert!(controller.is_settled());
        assert_eq!(controller.yaw(), 1.0e6);
    }

    #[test]
    fn handle_events_counts_consumed() {
        let mut controller = default_rig();
        let consumed = controller.handle_events([
            down(0.0, 0.0),
            InputEvent::PointerDown { x: 0.0, y: 0.0, button: MouseButton::Middle },
            move_to(10.0, 0.0),
            InputEvent::Wheel { delta_y: 0.0 },
            InputEvent::ContextMenu,
        ]);
        assert_eq!(consumed, 3);
        assert!(approx(controller.target_yaw(), -3.0));
    }

    #[test]
    fn drag_cancels_tween() {
        let mut controller = default_rig();
        let t0 = Instant::now();
        let handle = controller
            .start_tween(OrbitPose::new(90.0, 0.0, 10.0), Duration::from_secs(1), EasingFunction::CubicOut, t0)
            .unwrap();
        let _ = controller.handle_event(down(0.0, 0.0));
        assert!(!controller.is_tween_active(handle));
        assert_eq!(controller.motion_source(), MotionSource::UserDrag);

        let _ = controller.handle_event(move_to(10.0, 0.0));
        assert!(!controller.advance_animation(t0 + Duration::from_secs(1)));
        assert!(approx(controller.target_yaw(), -3.0));
    }

    #[test]
    fn cancel_animation_keeps_last_sample() {
        let mut controller = default_rig();
        let t0 = Instant::now();
        let _ = controller
            .start_tween(OrbitPose::new(100.0, 0.0, 10.0), Duration::from_secs(1), EasingFunction::Linear, t0)
            .unwrap();
        let _ = controller.advance_animation(t0 + Duration::from_millis(250));
        assert!(controller.cancel_animation());
        assert!(!controller.cancel_animation());
        assert!(approx(controller.target_yaw(), 25.0));
        assert_eq!(controller.motion_source(), MotionSource::Idle);
    }

    #[test]
    fn tween_goal_is_clamped() {
        let mut controller = default_rig();
        let t0 = Instant::now();
        let _ = controller
            .start_tween(OrbitPose::new(0.0, 120.0, 500.0), Duration::ZERO, EasingFunction::CubicOut, t0)
            .unwrap();
        let _ = controller.advance_animation(t0);
        assert_eq!(controller.target_pose(), OrbitPose::new(0.0, 89.0, 20.0));
    }

    #[test]
    fn animate_to_uses_wall_clock() {
        let mut controller = default_rig();
        let handle = controller.animate_to(90.0, 10.0, 20.0, Duration::ZERO).unwrap();
        assert!(controller.is_tween_active(handle));
        assert!(controller.advance_animation(Instant::now()));
        assert_eq!(controller.target_pose(), OrbitPose::new(90.0, 10.0, 20.0));
    }

    #[test]
    fn non_finite_arguments_rejected() {
        let mut controller = default_rig();
        assert!(matches!(
            controller.set_distance(f32::NAN),
            Err(OrbitError::NonFinite { what: "distance" })
        ));
        assert!(controller.set_yaw(f32::INFINITY).is_err());
        assert!(controller.set_pitch(f32::NAN).is_err());
        assert!(controller.set_target(Vec3::new(f32::NAN, 0.0, 0.0)).is_err());
        assert!(controller.animate_to(f32::NAN, 0.0, 10.0, Duration::ZERO).is_err());
        assert!(!controller.is_animating());
        assert_eq!(controller.target_pose(), OrbitPose::new(0.0, 0.0, 10.0));
        assert_eq!(controller.target_point(), Vec3::ZERO);

        assert!(!controller.handle_event(InputEvent::Wheel { delta_y: f32::NAN }));
        assert_eq!(controller.target_distance(), 10.0);
    }

    #[test]
    fn focus_on_is_all_or_nothing() {
        let mut controller = default_rig();
        controller.focus_on([4.0_f32, 0.0, 0.0], Some(5.0)).unwrap();
        assert_eq!(controller.target_point(), Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(controller.target_distance(), 5.0);

        assert!(controller.focus_on((9.0_f32, 9.0_f32, 9.0_f32), Some(f32::NAN)).is_err());
        assert_eq!(controller.target_point(), Vec3::new(4.0, 0.0, 0.0));

        controller.focus_on(Vec3::ONE, None).unwrap();
        assert_eq!(controller.target_point(), Vec3::ONE);
        assert_eq!(controller.target_distance(), 5.0);
    }

    #[test]
    fn set_options_reclamps_distances() {
        let mut controller = default_rig();
        controller.set_distance(18.0).unwrap();
        settle(&mut controller);
        controller
            .set_options(OrbitOptions {
                max_distance: 12.0,
                ..OrbitOptions::default()
            })
            .unwrap();
        assert_eq!(controller.target_distance(), 12.0);
        assert_eq!(controller.distance(), 12.0);

        assert!(controller
            .set_options(OrbitOptions {
                damping: 0.0,
                ..OrbitOptions::default()
            })
            .is_err());
        assert_eq!(controller.options().max_distance, 12.0);
    }

    #[test]
    fn reset_respects_narrowed_bounds() {
        let mut controller = default_rig();
        controller
            .set_options(OrbitOptions {
                min_distance: 12.0,
                max_distance: 15.0,
                ..OrbitOptions::default()
            })
            .unwrap();
        controller.reset();
        assert_eq!(controller.target_distance(), 12.0);
        settle(&mut controller);
        assert!(controller.is_settled());
        assert_eq!(controller.home_pose().distance, 10.0);
    }

    #[test]
    fn invalid_options_rejected_at_construction() {
        let result = OrbitCameraController::new(
            Camera::default(),
            &mut NullSurface::default(),
            OrbitOptions {
                min_distance: 50.0,
                ..OrbitOptions::default()
            },
        );
        assert!(matches!(result, Err(OrbitError::InvalidOptions(_))));
    }

    #[test]
    fn basis_vectors_come_from_camera() {
        let mut controller = default_rig();
        controller.set_yaw(90.0).unwrap();
        settle(&mut controller);
        // Camera sits on +X looking back at the origin
        assert!((controller.forward_vector() - Vec3::NEG_X).length() < 1e-4);
        assert!((controller.up_vector() - Vec3::Y).length() < 1e-4);
        assert!((controller.right_vector() - Vec3::NEG_Z).length() < 1e-4);
    }

    #[derive(Default)]
    struct CountingSurface {
        next_id: u64,
        live: HashSet<ListenerId>,
    }

    impl InputSurface for CountingSurface {
        fn add_listener(&mut self, _kind: InputKind) -> ListenerId {
            self.next_id += 1;
            let id = ListenerId(self.next_id);
            let _ = self.live.insert(id);
            id
        }

        fn remove_listener(&mut self, id: ListenerId) {
            assert!(self.live.remove(&id), "listener {id:?} removed twice");
        }
    }

    #[test]
    fn destroy_removes_every_listener() {
        let mut surface = CountingSurface::default();
        let controller =
            OrbitCameraController::new(Camera::default(), &mut surface, OrbitOptions::default())
                .unwrap();
        assert_eq!(surface.live.len(), InputKind::ALL.len());
        assert_eq!(controller.listened_kinds().count(), InputKind::ALL.len());

        let camera = controller.destroy(&mut surface);
        assert!(surface.live.is_empty());
        assert_eq!(camera.eye, Vec3::new(0.0, 0.0, 10.0));
    }
}
