//! Error types for the client loop
//!
//! None of these are fatal: the session logs them and keeps running.

/// Inbound message could not be turned into a typed payload
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("malformed config payload: {0}")]
    Config(#[source] serde_json::Error),

    #[error("malformed state payload: {0}")]
    State(#[source] serde_json::Error),

    #[error("invalid config value for {field}: {value}")]
    InvalidConfig { field: &'static str, value: f32 },
}

/// Outbound transmission failed
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("connection is not open")]
    Closed,

    #[error("send failed: {0}")]
    Send(String),

    #[error("failed to encode outbound message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A frame could not be presented
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("{0}")]
    Backend(String),
}
