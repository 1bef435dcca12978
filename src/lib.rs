//! Pitchside - browser client for a networked two-team goal game
//!
//! The server owns the simulation. This crate only draws what it is told
//! and reports where the local player's pointer is.
//!
//! Core modules:
//! - `field`: Session configuration received from the server
//! - `transform`: Simulation <-> device coordinate mapping
//! - `world`: Last known players, ball and score
//! - `input`: Pointer sampling into field coordinates
//! - `renderer`: Scene composition and the WebGPU pipeline
//! - `protocol`: Wire messages and the receive/render/transmit session
//! - `platform`: Browser/native glue

pub mod error;
pub mod field;
pub mod input;
pub mod platform;
pub mod protocol;
pub mod renderer;
pub mod settings;
pub mod transform;
pub mod world;

pub use error::{DecodeError, RenderError, TransportError};
pub use field::{FieldConfig, PlayerId};
pub use protocol::{Outcome, Session, Transport};
pub use settings::{QualityPreset, Settings};
pub use transform::{Transform, Viewport};
pub use world::{Team, WorldModel};
