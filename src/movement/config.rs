//! Locomotion tuning parameters.
//!
//! All movement parameters are grouped here for easy tuning. Values use
//! metric units (meters, seconds, radians) unless noted otherwise.

use serde::{Deserialize, Serialize};

use crate::collision::LayerMask;

/// Configuration for the locomotion controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocomotionConfig {
    // ========================================================================
    // Movement
    // ========================================================================
    /// Maximum horizontal speed (meters/second).
    ///
    /// Must never be configured equal to `max_snap_speed`: the ground-snap
    /// re-projection preserves speed, and at the shared value a snapped
    /// state becomes indistinguishable from intentional max-speed movement.
    pub max_speed: f32,

    /// Acceleration limit while grounded (meters/second²).
    pub max_acceleration: f32,

    /// Acceleration limit while airborne (meters/second²).
    pub max_air_acceleration: f32,

    /// Time constant for the facing-angle smoothing spring (seconds).
    pub turn_smooth_time: f32,

    // ========================================================================
    // Jumping
    // ========================================================================
    /// Apex height of air and wall jumps (meters).
    pub fixed_jump_height: f32,

    /// Launch height of a ground jump; the powered phase adds the rest
    /// (meters).
    pub ground_jump_min_height: f32,

    /// Extra acceleration along the jump direction during the powered phase
    /// of a ground jump (meters/second²).
    pub ground_jump_power: f32,

    /// Duration of the powered phase (seconds).
    pub ground_jump_time: f32,

    /// Number of extra jumps allowed while airborne.
    pub max_air_jumps: u32,

    // ========================================================================
    // Ground detection
    // ========================================================================
    /// Steepest surface tilt still walkable (degrees from horizontal).
    pub max_ground_angle: f32,

    /// Ground snapping is skipped above this speed (meters/second).
    pub max_snap_speed: f32,

    /// Reach of the downward ground-snap probe (meters).
    pub probe_distance: f32,

    /// Layers the ground-snap probe may hit.
    pub probe_mask: LayerMask,

    // ========================================================================
    // Falling
    // ========================================================================
    /// Gravity acceleration; stored negative (meters/second²).
    pub gravity: f32,

    /// Terminal vertical velocity; stored negative (meters/second).
    pub max_falling_speed: f32,

    // ========================================================================
    // Landing
    // ========================================================================
    /// Linear drag applied to the body for one step after touchdown, to
    /// kill residual slide.
    pub landing_drag: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            // Movement
            max_speed: 10.0,
            max_acceleration: 10.0,
            max_air_acceleration: 1.0,
            turn_smooth_time: 0.05,

            // Jumping
            fixed_jump_height: 2.0,
            ground_jump_min_height: 1.0,
            ground_jump_power: 80.0,
            ground_jump_time: 0.2,
            max_air_jumps: 0,

            // Ground detection
            max_ground_angle: 25.0,
            max_snap_speed: 100.0,
            probe_distance: 3.0,
            probe_mask: LayerMask::GROUND_PROBE,

            // Falling
            gravity: -9.81,
            max_falling_speed: -25.0,

            // Landing
            landing_drag: 10.0,
        }
    }
}

impl LocomotionConfig {
    /// Clamp every parameter into its supported range and normalize signs.
    ///
    /// Applied once when a controller adopts the config; gravity and the
    /// terminal fall speed are forced negative so the integrator can rely
    /// on their signs.
    pub fn sanitize(&mut self) {
        self.max_speed = self.max_speed.clamp(0.0, 100.0);
        self.max_acceleration = self.max_acceleration.clamp(0.0, 100.0);
        self.max_air_acceleration = self.max_air_acceleration.clamp(0.0, 100.0);
        self.turn_smooth_time = self.turn_smooth_time.clamp(0.0, 0.1);
        self.fixed_jump_height = self.fixed_jump_height.clamp(0.0, 10.0);
        self.ground_jump_min_height = self.ground_jump_min_height.clamp(0.0, 10.0);
        self.ground_jump_power = self.ground_jump_power.clamp(0.0, 1000.0);
        self.ground_jump_time = self.ground_jump_time.clamp(0.0, 0.5);
        self.max_air_jumps = self.max_air_jumps.min(5);
        self.max_ground_angle = self.max_ground_angle.clamp(0.0, 90.0);
        self.max_snap_speed = self.max_snap_speed.clamp(0.0, 100.0);
        self.probe_distance = self.probe_distance.max(0.0);
        self.gravity = -self.gravity.abs();
        self.max_falling_speed = -self.max_falling_speed.abs();
        self.landing_drag = self.landing_drag.max(0.0);
    }

    /// Cosine of the walkable slope limit, for dot-product tests against
    /// contact normals.
    pub fn min_ground_dot(&self) -> f32 {
        self.max_ground_angle.to_radians().cos()
    }

    /// Launch speed that reaches `height` meters under this gravity.
    pub fn jump_speed(&self, height: f32) -> f32 {
        (-2.0 * self.gravity * height).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LocomotionConfig::default();
        assert!(config.max_speed > 0.0);
        assert!(config.gravity < 0.0);
        assert!(config.max_falling_speed < 0.0);
        // Documented caller hazard: these must differ.
        assert!(config.max_speed != config.max_snap_speed);
    }

    #[test]
    fn test_sanitize_normalizes_signs() {
        let mut config = LocomotionConfig {
            gravity: 9.81,
            max_falling_speed: 25.0,
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.gravity, -9.81);
        assert_eq!(config.max_falling_speed, -25.0);
    }

    #[test]
    fn test_sanitize_clamps_ranges() {
        let mut config = LocomotionConfig {
            max_speed: 500.0,
            turn_smooth_time: 3.0,
            max_ground_angle: 180.0,
            max_air_jumps: 99,
            probe_distance: -1.0,
            ..Default::default()
        };
        config.sanitize();
        assert_eq!(config.max_speed, 100.0);
        assert_eq!(config.turn_smooth_time, 0.1);
        assert_eq!(config.max_ground_angle, 90.0);
        assert_eq!(config.max_air_jumps, 5);
        assert_eq!(config.probe_distance, 0.0);
    }

    #[test]
    fn test_min_ground_dot() {
        let config = LocomotionConfig {
            max_ground_angle: 25.0,
            ..Default::default()
        };
        assert!((config.min_ground_dot() - 25f32.to_radians().cos()).abs() < 1e-6);
    }

    #[test]
    fn test_jump_speed_from_height() {
        let config = LocomotionConfig {
            gravity: -9.81,
            ..Default::default()
        };
        // v = sqrt(-2 g h)
        assert!((config.jump_speed(2.0) - (2.0f32 * 9.81 * 2.0).sqrt()).abs() < 1e-5);
        assert!((config.jump_speed(1.0) - (2.0f32 * 9.81).sqrt()).abs() < 1e-5);
    }
}
