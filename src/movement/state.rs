//! Body mirror, input intent and the controller's owned state.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::contacts::Contacts;
use super::jump::JumpState;
use super::turn::TurnState;

/// Mirror of the host rigid body the controller drives.
///
/// The host engine owns the real body and integrates positions; the
/// controller reads this mirror at the top of each fixed step and writes
/// the fields it changed back at the bottom. The host is responsible for
/// syncing the mirror both ways around the step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// World position of the feet (bottom of the collision shape). Origin
    /// of the downward ground-snap probe.
    pub position: Vec3,

    /// Linear velocity (meters/second).
    pub velocity: Vec3,

    /// Facing yaw the host should rotate the visual body to (radians).
    pub yaw: f32,

    /// Linear drag coefficient on the host body. Raised for one step after
    /// touchdown to kill residual slide.
    pub linear_drag: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Body {
    /// Create a body mirror at the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            linear_drag: 0.0,
        }
    }
}

/// Player intent for one frame, sampled once from the host input system.
///
/// Edge flags are one-frame pulses: `jump_pressed` fires on the frame the
/// button went down, `jump_released` on the frame it came up. Sampling into
/// a struct once per frame keeps the controller free of callback-ordering
/// surprises.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputCommand {
    /// Stick/key movement vector in camera space; x strafes, y advances.
    pub movement: Vec2,

    /// Jump button went down this frame.
    pub jump_pressed: bool,

    /// Jump button came up this frame.
    pub jump_released: bool,

    /// Attack button fired this frame.
    pub attack: bool,
}

impl InputCommand {
    /// Whether the movement vector is meaningfully non-zero.
    #[inline]
    pub fn has_movement(&self) -> bool {
        self.movement.length_squared() > 1e-4
    }
}

/// Everything the controller owns between ticks.
///
/// All fields are touched only from the frame and step callbacks, which the
/// host scheduler invokes from a single thread in a fixed order, so no
/// locking is needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionState {
    /// Contact accumulator for the step in flight.
    pub contacts: Contacts,

    /// Jump phase, step counters and powered-window state.
    pub jump: JumpState,

    /// Facing-angle smoothing spring.
    pub facing: TurnState,

    /// Heading the facing spring chases. Holds its last value when input
    /// goes idle so the character keeps its orientation.
    pub target_heading: f32,

    /// Velocity the integrator steers toward; derived each frame, not
    /// persisted meaningfully across them.
    pub desired_velocity: Vec3,

    /// Movement input was active on the last frame tick.
    pub move_active: bool,

    /// One-shot jump request armed by the press edge, disarmed by release
    /// or by the next step.
    pub jump_requested: bool,

    /// Working copy of the body velocity during a step.
    pub velocity: Vec3,

    /// Grounded result of the previous step, for landing detection.
    pub was_grounded: bool,

    /// Set for exactly one step after touchdown.
    pub just_landed: bool,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            contacts: Contacts::new(),
            jump: JumpState::new(),
            facing: TurnState::default(),
            target_heading: 0.0,
            desired_velocity: Vec3::ZERO,
            move_active: false,
            jump_requested: false,
            velocity: Vec3::ZERO,
            was_grounded: false,
            just_landed: false,
        }
    }
}

impl LocomotionState {
    /// Create a neutral locomotion state.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_movement_threshold() {
        let mut command = InputCommand::default();
        assert!(!command.has_movement());

        command.movement = Vec2::new(0.0, 1.0);
        assert!(command.has_movement());

        // Stick noise below the dead zone does not count.
        command.movement = Vec2::new(0.001, 0.001);
        assert!(!command.has_movement());
    }

    #[test]
    fn test_body_new() {
        let body = Body::new(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(body.linear_drag, 0.0);
    }
}
