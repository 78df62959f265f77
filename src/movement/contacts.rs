//! Per-step contact classification.
//!
//! The host physics engine reports every contact normal touching the
//! character during a step. Contacts are sorted into walkable ground and
//! steep (near-vertical) surfaces by the vertical component of their
//! normal, and the normals of each class are summed so the ground resolver
//! can derive a single surface normal per class.
//!
//! The accumulator must be cleared exactly once per step, after all
//! movement logic for that step has consumed it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Contacts with a normal pointing below this are ceilings and overhangs;
/// they are ignored outright.
const STEEP_DOT_CUTOFF: f32 = -0.01;

/// Accumulated contact information for the physics step in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contacts {
    /// Number of walkable ground contacts this step.
    pub ground_count: u32,

    /// Number of steep contacts this step.
    pub steep_count: u32,

    /// Summed ground contact normals. The ground resolver normalizes this
    /// in place and may overwrite it with the effective surface normal for
    /// the step (snap hit, merged steep normal, or up when airborne).
    pub ground_normal: Vec3,

    /// Summed steep contact normals.
    pub steep_normal: Vec3,
}

impl Contacts {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and record one contact normal.
    ///
    /// `min_ground_dot` is the cosine of the walkable slope limit: normals
    /// at or above it count as ground, normals below it but still facing
    /// upward-ish count as steep.
    pub fn record(&mut self, normal: Vec3, min_ground_dot: f32) {
        if normal.y >= min_ground_dot {
            self.ground_count += 1;
            self.ground_normal += normal;
        } else if normal.y > STEEP_DOT_CUTOFF {
            self.steep_count += 1;
            self.steep_normal += normal;
        }
    }

    /// Whether any walkable contact was seen this step.
    #[inline]
    pub fn grounded(&self) -> bool {
        self.ground_count > 0
    }

    /// Whether any steep contact was seen this step.
    #[inline]
    pub fn on_steep(&self) -> bool {
        self.steep_count > 0
    }

    /// Reset for the next step. Call once per step, last.
    pub fn clear(&mut self) {
        self.ground_count = 0;
        self.steep_count = 0;
        self.ground_normal = Vec3::ZERO;
        self.steep_normal = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // cos(25 degrees), a typical walkable limit
    const MIN_GROUND_DOT: f32 = 0.906_307_8;

    #[test]
    fn test_flat_ground_contact() {
        let mut contacts = Contacts::new();
        contacts.record(Vec3::Y, MIN_GROUND_DOT);

        assert!(contacts.grounded());
        assert!(!contacts.on_steep());
        assert_eq!(contacts.ground_count, 1);
        assert_eq!(contacts.ground_normal, Vec3::Y);
    }

    #[test]
    fn test_threshold_boundary_is_ground_never_steep() {
        let mut contacts = Contacts::new();
        // Normal exactly at the slope limit.
        let normal = Vec3::new(
            (1.0 - MIN_GROUND_DOT * MIN_GROUND_DOT).sqrt(),
            MIN_GROUND_DOT,
            0.0,
        );
        contacts.record(normal, MIN_GROUND_DOT);

        assert_eq!(contacts.ground_count, 1);
        assert_eq!(contacts.steep_count, 0);
    }

    #[test]
    fn test_wall_contact_is_steep() {
        let mut contacts = Contacts::new();
        contacts.record(Vec3::X, MIN_GROUND_DOT);

        assert!(!contacts.grounded());
        assert!(contacts.on_steep());
        assert_eq!(contacts.steep_normal, Vec3::X);
    }

    #[test]
    fn test_ceiling_contact_ignored() {
        let mut contacts = Contacts::new();
        contacts.record(Vec3::NEG_Y, MIN_GROUND_DOT);

        assert_eq!(contacts.ground_count, 0);
        assert_eq!(contacts.steep_count, 0);
    }

    #[test]
    fn test_normals_accumulate() {
        let mut contacts = Contacts::new();
        let tilted = Vec3::new(0.1, 0.99, 0.0).normalize();
        contacts.record(Vec3::Y, MIN_GROUND_DOT);
        contacts.record(tilted, MIN_GROUND_DOT);

        assert_eq!(contacts.ground_count, 2);
        assert!((contacts.ground_normal - (Vec3::Y + tilted)).length() < 1e-6);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut contacts = Contacts::new();
        contacts.record(Vec3::Y, MIN_GROUND_DOT);
        contacts.record(Vec3::X, MIN_GROUND_DOT);
        contacts.clear();

        assert_eq!(contacts.ground_count, 0);
        assert_eq!(contacts.steep_count, 0);
        assert_eq!(contacts.ground_normal, Vec3::ZERO);
        assert_eq!(contacts.steep_normal, Vec3::ZERO);
    }
}
