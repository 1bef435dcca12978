//! Platform abstraction layer
//!
//! Browser side: websocket transport and canvas sizing.
//! Native side: sinks used by the transcript replay tool.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;
