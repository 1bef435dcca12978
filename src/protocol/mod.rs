//! Server protocol: wire types and the client session loop

pub mod session;
pub mod wire;

pub use session::{FrameReport, IgnoreReason, Outcome, Session};
pub use wire::{Inbound, Outbound};

use crate::error::TransportError;

/// Outbound half of the server connection
pub trait Transport {
    fn send_text(&mut self, text: &str) -> Result<(), TransportError>;
}
