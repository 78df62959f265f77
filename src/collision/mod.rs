//! Collision probe queries.
//!
//! The host engine owns real-time collision detection and reports contact
//! normals into the movement code as they happen. This module is the
//! smaller half of the story: a world of static probe geometry that
//! locomotion can raycast against, filtered by collision layer. Its one
//! consumer of consequence is the downward ground-snap probe.

mod layers;
mod world;

pub use layers::LayerMask;
pub use world::{ProbeHit, ProbeWorld};
