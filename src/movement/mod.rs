//! Character locomotion.
//!
//! This module implements velocity-based third-person movement with:
//!
//! - Camera-relative steering with critically damped turn smoothing
//! - Contact-normal classification into ground and steep surfaces
//! - Ground snapping over small bumps and ledges
//! - Ground, air and wall jumps with a powered ascent window
//! - Landing detection with a one-step drag spike
//!
//! # Design
//!
//! Movement is driven by the [`LocomotionController`], which the host calls
//! twice: [`LocomotionController::frame`] on the rendered-frame tick to
//! shape input into intent, and [`LocomotionController::step`] on the fixed
//! physics tick to do everything else. Within a step the call order is
//! fixed - classify, resolve, integrate, jump - so there are no hidden
//! ordering hazards between the shared fields.
//!
//! All movement is deterministic: the same commands, contacts and fixed
//! steps always produce the same body state.

mod config;
mod contacts;
mod controller;
mod jump;
mod state;
mod turn;

pub use config::LocomotionConfig;
pub use contacts::Contacts;
pub use controller::{DebugSnapshot, LocomotionController};
pub use jump::{JumpKind, JumpState};
pub use state::{Body, InputCommand, LocomotionState};
pub use turn::TurnState;
