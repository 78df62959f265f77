//! Decorative constant-rate rotation for level props.

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Which way a spinner turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpinDirection {
    Clockwise,
    CounterClockwise,
}

/// Spins an orientation at a constant Euler rate.
///
/// Purely cosmetic; the host applies the returned orientation to its body
/// each fixed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spinner {
    /// Rotation is paused while false.
    pub enabled: bool,

    /// Spin direction; `CounterClockwise` negates the rate.
    pub direction: SpinDirection,

    /// Euler angular velocity (radians/second) around the Y, X and Z axes.
    pub euler_velocity: Vec3,
}

impl Spinner {
    /// Create an enabled clockwise spinner with the given rate.
    pub fn new(euler_velocity: Vec3) -> Self {
        Self {
            enabled: true,
            direction: SpinDirection::Clockwise,
            euler_velocity,
        }
    }

    /// Advance `rotation` by one fixed step.
    pub fn step(&self, rotation: Quat, dt: f32) -> Quat {
        if !self.enabled {
            return rotation;
        }
        let sign = match self.direction {
            SpinDirection::Clockwise => 1.0,
            SpinDirection::CounterClockwise => -1.0,
        };
        let rate = self.euler_velocity * sign * dt;
        rotation * Quat::from_euler(EulerRot::YXZ, rate.y, rate.x, rate.z)
    }
}
