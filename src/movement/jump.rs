//! Jump bookkeeping.
//!
//! Tracks which jump mode is active, how many successive jumps were spent
//! since the character was last grounded, and the powered window of a
//! ground jump during which extra upward force accrues. The window is an
//! explicit countdown advanced by the fixed step: a new ground jump
//! restarts it, releasing the jump input cancels it immediately.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The surface relationship a jump launched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    /// Launched from walkable ground; opens the powered window.
    Ground,
    /// Launched midair, spending one air jump.
    Air,
    /// Launched off a steep surface.
    Wall,
}

/// Jump phase counter, step counters and powered-window state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpState {
    /// Successive jumps since last grounded; bounds air jumps.
    pub phase: u32,

    /// Physics steps since the character was last grounded.
    pub steps_since_grounded: u32,

    /// Physics steps since the last jump.
    pub steps_since_jump: u32,

    /// Mode of the most recent jump, if any.
    pub kind: Option<JumpKind>,

    /// Launch direction of the most recent jump. Deliberately not a unit
    /// vector: the vertical component is forced to 1 at launch.
    pub direction: Vec3,

    /// Whether a powered ground-jump window is open.
    pub powered: bool,

    /// Seconds left in the powered window.
    pub powered_remaining: f32,
}

impl Default for JumpState {
    fn default() -> Self {
        Self {
            phase: 0,
            steps_since_grounded: 0,
            steps_since_jump: 0,
            kind: None,
            direction: Vec3::Y,
            powered: false,
            powered_remaining: 0.0,
        }
    }
}

impl JumpState {
    /// Create a neutral jump state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or restart) the powered window for `duration` seconds.
    pub fn start_powered(&mut self, duration: f32) {
        self.powered = true;
        self.powered_remaining = duration;
    }

    /// Close the powered window immediately.
    pub fn cancel_powered(&mut self) {
        self.powered = false;
        self.powered_remaining = 0.0;
    }

    /// Advance the powered countdown by one fixed step.
    pub fn tick_powered(&mut self, dt: f32) {
        if self.powered {
            self.powered_remaining -= dt;
            if self.powered_remaining <= 0.0 {
                self.cancel_powered();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Binary-exact step so countdown arithmetic has no rounding residue.
    const DT: f32 = 1.0 / 64.0;

    #[test]
    fn test_powered_window_expires() {
        let mut jump = JumpState::new();
        jump.start_powered(0.25);
        assert!(jump.powered);

        // 0.25s at 64Hz is 16 steps.
        for _ in 0..15 {
            jump.tick_powered(DT);
            assert!(jump.powered);
        }
        jump.tick_powered(DT);
        assert!(!jump.powered);
        assert_eq!(jump.powered_remaining, 0.0);
    }

    #[test]
    fn test_restart_replaces_running_window() {
        let mut jump = JumpState::new();
        jump.start_powered(0.25);
        for _ in 0..10 {
            jump.tick_powered(DT);
        }
        jump.start_powered(0.25);
        assert!((jump.powered_remaining - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_cancel_is_immediate() {
        let mut jump = JumpState::new();
        jump.start_powered(0.2);
        jump.cancel_powered();
        assert!(!jump.powered);

        // Ticking a cancelled window stays cancelled.
        jump.tick_powered(DT);
        assert!(!jump.powered);
    }
}
