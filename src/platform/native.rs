//! Headless sinks for replaying recorded sessions

use std::io::Write;

use crate::error::{RenderError, TransportError};
use crate::protocol::Transport;
use crate::renderer::{DrawCmd, FrameSink, Scene};
use crate::transform::Transform;

/// Counts frames and logs what would have been drawn
#[derive(Debug, Default)]
pub struct LogSink {
    pub frames: usize,
    pub last_command_count: usize,
}

impl FrameSink for LogSink {
    fn present(&mut self, scene: &Scene, transform: &Transform) -> Result<(), RenderError> {
        self.frames += 1;
        self.last_command_count = scene.len();

        let players = scene
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCmd::FillCircle { .. }))
            .count();
        log::debug!(
            "Frame {}: {} commands, {} filled circles, scale {:.3}",
            self.frames,
            scene.len(),
            players,
            transform.scale()
        );
        Ok(())
    }
}

/// Writes each outbound message as one line
pub struct LineTransport<W> {
    out: W,
    pub sent: usize,
}

impl<W: Write> LineTransport<W> {
    pub fn new(out: W) -> Self {
        Self { out, sent: 0 }
    }
}

impl<W: Write> Transport for LineTransport<W> {
    fn send_text(&mut self, text: &str) -> Result<(), TransportError> {
        writeln!(self.out, "{}", text).map_err(|e| TransportError::Send(e.to_string()))?;
        self.sent += 1;
        Ok(())
    }
}
