//! Strider Physics
//!
//! A deterministic third-person character locomotion engine: velocity-based
//! movement over uneven terrain, contact-normal surface classification,
//! ground snapping, and a multi-mode jump state machine with a powered
//! ascent window.
//!
//! # Architecture
//!
//! The crate is split into two main systems:
//!
//! - **Collision**: layer-filtered raycast probes against static geometry,
//!   used for the downward ground-snap probe
//! - **Movement**: shapes input into intent and integrates the character's
//!   velocity through the ground/steep/air state machine
//!
//! The host engine stays in charge of rigid bodies, broad-phase collision
//! and input devices. It drives the controller through two callbacks (one
//! per rendered frame, one per fixed physics step), feeds contact normals
//! in between steps, and syncs the [`Body`] mirror with its real rigid
//! body. Given the same sequence of commands, contacts and fixed steps, the
//! controller always produces the same body state.

pub mod collision;
pub mod movement;
pub mod spin;

// Re-export commonly used types
pub use collision::{LayerMask, ProbeHit, ProbeWorld};
pub use movement::{
    Body, Contacts, InputCommand, JumpKind, JumpState, LocomotionConfig, LocomotionController,
    LocomotionState,
};
pub use spin::{SpinDirection, Spinner};
