//! Facing-angle smoothing and camera-relative headings.
//!
//! Movement input is a 2D stick vector in camera space. The target heading
//! is `atan2(x, y)` offset by the camera yaw; the rendered facing chases it
//! with a critically damped spring so turns ease in and out instead of
//! snapping. All angles are radians.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};

/// Smallest usable smoothing time; keeps the spring finite when the
/// smoothing slider is set to zero.
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Heading the camera-space input vector points at.
pub fn input_heading(input: Vec2, camera_yaw: f32) -> f32 {
    input.x.atan2(input.y) + camera_yaw
}

/// Horizontal unit vector for a yaw angle.
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Wrap an angle difference onto the shortest signed arc.
fn shortest_arc(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// Critically damped angular smoothing state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TurnState {
    /// Current smoothed facing angle.
    pub angle: f32,

    /// Angular velocity of the smoothing spring.
    pub velocity: f32,
}

impl TurnState {
    /// Create a turn state at the given facing angle.
    pub fn new(angle: f32) -> Self {
        Self {
            angle,
            velocity: 0.0,
        }
    }

    /// Move the facing toward `target`, settling over roughly `smooth_time`
    /// seconds. Returns the new angle.
    ///
    /// The target is rebased onto the shortest arc first, so chasing a
    /// heading across the ±π seam never spins the long way round. The
    /// spring never overshoots the target.
    pub fn tick(&mut self, target: f32, smooth_time: f32, dt: f32) -> f32 {
        let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
        let omega = 2.0 / smooth_time;
        let x = omega * dt;
        let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let target = self.angle - shortest_arc(self.angle - target);
        let change = self.angle - target;
        let temp = (self.velocity + omega * change) * dt;
        self.velocity = (self.velocity - omega * temp) * decay;
        let mut output = target + (change + temp) * decay;

        if (target > self.angle) == (output > target) {
            output = target;
            self.velocity = 0.0;
        }

        self.angle = output;
        self.angle
    }
}
