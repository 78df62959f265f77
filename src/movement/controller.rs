//! The locomotion controller.
//!
//! Two entry points, one per host tick:
//!
//! - [`LocomotionController::frame`] runs on the rendered-frame tick and
//!   turns raw input plus the camera heading into movement intent.
//! - [`LocomotionController::step`] runs on the fixed physics tick and does
//!   everything else in a fixed order: resolve the ground state, steer
//!   velocity, execute jumps, apply the powered window and gravity, then
//!   write the result back to the body.
//!
//! Between two steps the host feeds contact normals in through
//! [`LocomotionController::record_contact`]. The accumulator is cleared at
//! the bottom of `step`, so contacts always land in a fresh accumulator.

use glam::Vec3;

use crate::collision::ProbeWorld;

use super::config::LocomotionConfig;
use super::jump::JumpKind;
use super::state::{Body, InputCommand, LocomotionState};
use super::turn::{input_heading, yaw_forward};

/// Read-only view of controller internals for HUD and gizmo display.
#[derive(Debug, Clone, Copy)]
pub struct DebugSnapshot {
    pub grounded: bool,
    pub ground_contacts: u32,
    pub steep_contacts: u32,
    pub velocity: Vec3,
    pub desired_velocity: Vec3,
    pub facing: f32,
    pub jump_phase: u32,
}

/// Third-person locomotion controller.
///
/// Converts camera-relative input into a desired horizontal velocity,
/// reconciles it with the current velocity under acceleration limits,
/// classifies contact surfaces each step, snaps to ground over small bumps,
/// and runs the ground/air/wall jump protocol.
///
/// # Example
///
/// ```ignore
/// let controller = LocomotionController::with_default_config();
/// let mut state = LocomotionState::new();
/// let mut body = Body::new(spawn_position);
///
/// // Each rendered frame:
/// controller.frame(&mut state, &command, camera_yaw, frame_dt);
///
/// // Each fixed step, after the host reported contacts:
/// controller.step(&mut state, &mut body, &world, fixed_dt);
/// ```
#[derive(Debug, Clone)]
pub struct LocomotionController {
    /// Movement configuration.
    pub config: LocomotionConfig,
}

impl LocomotionController {
    /// Create a controller; the config is sanitized on the way in.
    pub fn new(mut config: LocomotionConfig) -> Self {
        config.sanitize();
        Self { config }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(LocomotionConfig::default())
    }

    // ========================================================================
    // Frame tick
    // ========================================================================

    /// Sample input and camera heading into movement intent.
    ///
    /// Runs once per rendered frame with the variable frame delta. The
    /// facing spring keeps easing toward the last heading even while input
    /// is idle; the desired velocity is zeroed immediately.
    pub fn frame(
        &self,
        state: &mut LocomotionState,
        command: &InputCommand,
        camera_yaw: f32,
        dt: f32,
    ) {
        if command.jump_pressed {
            state.jump_requested = true;
        }
        if command.jump_released {
            state.jump_requested = false;
            // Letting go early ends the powered ascent.
            state.jump.cancel_powered();
        }
        if command.attack {
            log::debug!("attack input");
        }

        state.move_active = command.has_movement();
        if state.move_active {
            state.target_heading = input_heading(command.movement, camera_yaw);
        }
        state
            .facing
            .tick(state.target_heading, self.config.turn_smooth_time, dt);

        state.desired_velocity = if state.move_active {
            yaw_forward(state.target_heading) * self.config.max_speed
        } else {
            Vec3::ZERO
        };
    }

    // ========================================================================
    // Contact feed
    // ========================================================================

    /// Record one contact normal reported by the host for the step in
    /// flight.
    pub fn record_contact(&self, state: &mut LocomotionState, normal: Vec3) {
        state.contacts.record(normal, self.config.min_ground_dot());
    }

    /// Record a batch of contact normals.
    pub fn record_contacts<I>(&self, state: &mut LocomotionState, normals: I)
    where
        I: IntoIterator<Item = Vec3>,
    {
        for normal in normals {
            self.record_contact(state, normal);
        }
    }

    // ========================================================================
    // Fixed tick
    // ========================================================================

    /// Advance one fixed physics step.
    pub fn step(
        &self,
        state: &mut LocomotionState,
        body: &mut Body,
        world: &ProbeWorld,
        dt: f32,
    ) {
        self.update_ground_state(state, body, world);
        self.adjust_velocity(state, dt);

        if state.jump_requested {
            state.jump_requested = false;
            self.try_jump(state);
        }

        if state.move_active {
            body.yaw = state.facing.angle;
        }

        if state.jump.powered {
            state.velocity += state.jump.direction * self.config.ground_jump_power * dt;
            state.jump.tick_powered(dt);
        }

        if !state.contacts.grounded() {
            state.velocity.y += self.config.gravity * dt;
            if state.velocity.y < self.config.max_falling_speed {
                state.velocity.y = self.config.max_falling_speed;
            }
        }

        body.velocity = state.velocity;

        self.track_landing(state, body);
        state.contacts.clear();
    }

    // ========================================================================
    // Ground resolution
    // ========================================================================

    /// Classify the step: grounded directly, grounded by snap, grounded by
    /// merged steep contacts, or airborne.
    fn update_ground_state(
        &self,
        state: &mut LocomotionState,
        body: &Body,
        world: &ProbeWorld,
    ) {
        state.jump.steps_since_grounded += 1;
        state.jump.steps_since_jump += 1;
        state.velocity = body.velocity;

        if state.contacts.grounded()
            || self.snap_to_ground(state, body, world)
            || self.merge_steep_contacts(state)
        {
            state.jump.steps_since_grounded = 0;
            // A jump launched on the previous step must not be invalidated
            // by the contacts it is still touching.
            if state.jump.steps_since_jump > 1 {
                state.jump.phase = 0;
            }
            if state.contacts.ground_count > 1 {
                state.contacts.ground_normal = state.contacts.ground_normal.normalize_or_zero();
            }
        } else {
            state.contacts.ground_normal = Vec3::Y;
        }
    }

    /// Reattach to ground that was lost at most one step ago.
    ///
    /// Skipped right after a jump and above the snap speed limit. On a
    /// successful probe the velocity is re-projected onto the new surface
    /// plane with its magnitude preserved, so running over a small bump
    /// does not launch the character.
    fn snap_to_ground(
        &self,
        state: &mut LocomotionState,
        body: &Body,
        world: &ProbeWorld,
    ) -> bool {
        if state.jump.steps_since_grounded > 1 || state.jump.steps_since_jump <= 2 {
            return false;
        }
        let speed = state.velocity.length();
        if speed > self.config.max_snap_speed {
            return false;
        }
        let hit = match world.raycast(
            body.position,
            Vec3::NEG_Y,
            self.config.probe_distance,
            self.config.probe_mask,
        ) {
            Some(hit) => hit,
            None => return false,
        };
        if hit.normal.y < self.config.min_ground_dot() {
            return false;
        }

        state.contacts.ground_count = 1;
        state.contacts.ground_normal = hit.normal;
        let dot = state.velocity.dot(hit.normal);
        if dot > 0.0 {
            state.velocity = (state.velocity - hit.normal * dot).normalize_or_zero() * speed;
        }
        true
    }

    /// Crevasse case: several steep surfaces can merge into walkable
    /// ground.
    fn merge_steep_contacts(&self, state: &mut LocomotionState) -> bool {
        if state.contacts.steep_count > 1 {
            state.contacts.steep_normal = state.contacts.steep_normal.normalize_or_zero();
            if state.contacts.steep_normal.y >= self.config.min_ground_dot() {
                state.contacts.ground_count = 1;
                state.contacts.ground_normal = state.contacts.steep_normal;
                return true;
            }
        }
        false
    }

    // ========================================================================
    // Velocity integration
    // ========================================================================

    /// Steer the tangential velocity components toward the desired velocity
    /// under the acceleration limit.
    ///
    /// Each axis approaches its target independently, so diagonal
    /// acceleration can exceed the per-axis limit by up to sqrt(2).
    fn adjust_velocity(&self, state: &mut LocomotionState, dt: f32) {
        let normal = state.contacts.ground_normal;
        let x_axis = project_on_plane(Vec3::X, normal).normalize_or_zero();
        let z_axis = project_on_plane(Vec3::Z, normal).normalize_or_zero();

        let current_x = state.velocity.dot(x_axis);
        let current_z = state.velocity.dot(z_axis);

        let acceleration = if state.contacts.grounded() {
            self.config.max_acceleration
        } else {
            self.config.max_air_acceleration
        };
        let max_change = acceleration * dt;

        let new_x = move_towards(current_x, state.desired_velocity.x, max_change);
        let new_z = move_towards(current_z, state.desired_velocity.z, max_change);

        state.velocity += x_axis * (new_x - current_x) + z_axis * (new_z - current_z);
    }

    // ========================================================================
    // Jumping
    // ========================================================================

    /// Execute a requested jump. First match wins: ground, wall, air.
    fn try_jump(&self, state: &mut LocomotionState) {
        let kind;
        let mut direction;

        if state.contacts.grounded() {
            kind = JumpKind::Ground;
            direction = state.contacts.ground_normal;
        } else if state.contacts.on_steep() {
            kind = JumpKind::Wall;
            direction = state.contacts.steep_normal;
            state.jump.phase = 0;
        } else if self.config.max_air_jumps > 0 && state.jump.phase <= self.config.max_air_jumps {
            kind = JumpKind::Air;
            if state.jump.phase == 0 {
                state.jump.phase = 1;
            }
            direction = state.contacts.ground_normal;
        } else {
            return;
        }

        state.jump.steps_since_jump = 0;
        state.jump.phase += 1;

        // Bias the launch toward vertical, then force a full upward
        // component regardless of surface tilt. Not a unit vector.
        direction = (direction + Vec3::Y).normalize_or_zero();
        direction.y = 1.0;

        state.velocity.y = 0.0;

        let mut jump_speed = self.config.jump_speed(self.config.fixed_jump_height);
        if kind == JumpKind::Ground {
            state.jump.start_powered(self.config.ground_jump_time);
            jump_speed = self.config.jump_speed(self.config.ground_jump_min_height);
        }
        state.velocity += direction * jump_speed;

        state.jump.kind = Some(kind);
        state.jump.direction = direction;
        log::debug!("jump: {:?} phase={}", kind, state.jump.phase);
    }

    // ========================================================================
    // Landing
    // ========================================================================

    /// Raise drag for one step after touchdown, then restore it.
    fn track_landing(&self, state: &mut LocomotionState, body: &mut Body) {
        if state.just_landed {
            state.just_landed = false;
            body.linear_drag = 0.0;
        }
        let grounded = state.contacts.grounded();
        if grounded && !state.was_grounded {
            state.just_landed = true;
            body.linear_drag = self.config.landing_drag;
        }
        state.was_grounded = grounded;
    }

    // ========================================================================
    // Debug
    // ========================================================================

    /// Read-only view of the controller internals for display.
    pub fn snapshot(&self, state: &LocomotionState) -> DebugSnapshot {
        DebugSnapshot {
            grounded: state.contacts.grounded(),
            ground_contacts: state.contacts.ground_count,
            steep_contacts: state.contacts.steep_count,
            velocity: state.velocity,
            desired_velocity: state.desired_velocity,
            facing: state.facing.angle,
            jump_phase: state.jump.phase,
        }
    }
}

/// Remove the component of `vector` along `normal`.
fn project_on_plane(vector: Vec3, normal: Vec3) -> Vec3 {
    vector - normal * vector.dot(normal)
}

/// Move `current` toward `target` by at most `max_delta`.
fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

// ============================================================================
// Tests
// ============================================================================
