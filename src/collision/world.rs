//! Static probe geometry and raycast queries.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::Ray;
use parry3d::shape::{Shape, SharedShape};

use super::layers::LayerMask;

/// A piece of static probe geometry.
#[derive(Clone)]
struct ProbeBrush {
    shape: SharedShape,
    transform: Isometry<Real>,
    layers: LayerMask,
}

/// Result of a raycast probe.
#[derive(Debug, Clone, Copy)]
pub struct ProbeHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// Hit point in world space.
    pub point: Vec3,
    /// Surface normal at the hit point, facing back toward the ray origin.
    pub normal: Vec3,
}

/// World of static geometry for locomotion probes.
///
/// Built once from level geometry, then queried. Queries never mutate, so a
/// shared reference can be handed to any number of controllers.
#[derive(Default)]
pub struct ProbeWorld {
    brushes: Vec<ProbeBrush>,
}

impl ProbeWorld {
    /// Create an empty probe world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
        }
    }

    /// Add an axis-aligned box.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    /// * `layers` - Layers this geometry belongs to
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, layers: LayerMask) {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let transform = Isometry::translation(center.x, center.y, center.z);

        self.brushes.push(ProbeBrush {
            shape,
            transform,
            layers,
        });
    }

    /// Add a convex hull from its vertices.
    ///
    /// Returns `false` if the points are degenerate and no hull could be
    /// built; the world is left unchanged in that case.
    pub fn add_convex_hull(&mut self, points: &[Vec3], layers: LayerMask) -> bool {
        let parry_points: Vec<Point<Real>> =
            points.iter().map(|p| Point::new(p.x, p.y, p.z)).collect();

        let shape = match SharedShape::convex_hull(&parry_points) {
            Some(shape) => shape,
            None => return false,
        };

        self.brushes.push(ProbeBrush {
            shape,
            transform: Isometry::identity(),
            layers,
        });
        true
    }

    /// Number of probe brushes in the world.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Cast a ray and return the nearest hit within `max_distance`.
    ///
    /// # Arguments
    ///
    /// * `origin` - Ray starting position
    /// * `direction` - Ray direction (will be normalized)
    /// * `max_distance` - Maximum probe distance
    /// * `mask` - Layers to probe against
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut nearest: Option<(Real, &ProbeBrush)> = None;

        for brush in &self.brushes {
            if !mask.intersects(brush.layers) {
                continue;
            }

            if let Some(toi) = brush.shape.cast_ray(&brush.transform, &ray, max_distance, true) {
                let is_closer = nearest.as_ref().map_or(true, |(dist, _)| toi < *dist);
                if is_closer {
                    nearest = Some((toi, brush));
                }
            }
        }

        let (distance, brush) = nearest?;
        let normal = self.hit_normal(&ray, distance, brush, dir);

        Some(ProbeHit {
            distance,
            point: origin + dir * distance,
            normal,
        })
    }

    /// Surface normal at a ray intersection.
    fn hit_normal(&self, ray: &Ray, toi: Real, brush: &ProbeBrush, dir: Vec3) -> Vec3 {
        if let Some(intersection) =
            brush
                .shape
                .cast_ray_and_get_normal(&brush.transform, ray, toi + 0.01, true)
        {
            Vec3::new(
                intersection.normal.x,
                intersection.normal.y,
                intersection.normal.z,
            )
        } else {
            // Fallback: face the ray back the way it came.
            -dir
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_world() -> ProbeWorld {
        let mut world = ProbeWorld::new();

        // Floor with its top face at y=0
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(50.0, 0.5, 50.0),
            LayerMask::WORLD,
        );

        world
    }

    #[test]
    fn test_raycast_down_hits_floor() {
        let world = create_test_world();

        let hit = world
            .raycast(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, 10.0, LayerMask::ALL)
            .expect("should hit floor");

        assert!((hit.distance - 2.0).abs() < 0.01);
        assert!((hit.normal.y - 1.0).abs() < 0.01);
        assert!(hit.point.y.abs() < 0.01);
    }

    #[test]
    fn test_raycast_miss() {
        let world = create_test_world();

        let hit = world.raycast(Vec3::new(0.0, 2.0, 0.0), Vec3::Y, 10.0, LayerMask::ALL);
        assert!(hit.is_none());
    }

    #[test]
    fn test_raycast_out_of_range() {
        let world = create_test_world();

        let hit = world.raycast(Vec3::new(0.0, 20.0, 0.0), Vec3::NEG_Y, 3.0, LayerMask::ALL);
        assert!(hit.is_none());
    }

    #[test]
    fn test_layer_filtering() {
        let mut world = ProbeWorld::new();

        // Trigger volume above a solid floor
        world.add_box(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(10.0, 0.5, 10.0),
            LayerMask::TRIGGER,
        );
        world.add_box(
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(10.0, 0.5, 10.0),
            LayerMask::WORLD,
        );

        let hit = world
            .raycast(
                Vec3::new(0.0, 5.0, 0.0),
                Vec3::NEG_Y,
                10.0,
                LayerMask::GROUND_PROBE,
            )
            .expect("should hit floor through trigger");

        // The trigger at y=1.5 is skipped; the floor top is at y=0.
        assert!((hit.distance - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_ramp_normal() {
        let mut world = ProbeWorld::new();

        // Wedge sloping down from (0, 5) to (10, 0) along x.
        let ramp = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 10.0),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, 5.0, 10.0),
        ];
        assert!(world.add_convex_hull(&ramp, LayerMask::WORLD));

        let hit = world
            .raycast(Vec3::new(5.0, 10.0, 5.0), Vec3::NEG_Y, 20.0, LayerMask::ALL)
            .expect("should hit ramp face");

        // Slant plane x/10 + y/5 = 1 has normal (1, 2, 0)/sqrt(5).
        assert!((hit.normal.x - 0.447).abs() < 0.01);
        assert!((hit.normal.y - 0.894).abs() < 0.01);
        assert!(hit.normal.z.abs() < 0.01);
    }

    #[test]
    fn test_brush_count() {
        let mut world = ProbeWorld::new();
        assert_eq!(world.brush_count(), 0);
        world.add_box(Vec3::ZERO, Vec3::ONE, LayerMask::WORLD);
        assert_eq!(world.brush_count(), 1);
    }
}
